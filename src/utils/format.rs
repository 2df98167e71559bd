//! Display helpers for amounts: dot-grouped thousands and lenient parsing.

/// Formats an amount the way the household screens show it: integer part only,
/// thousands grouped with `.`, and a leading `-` for negative values.
///
/// Non-finite input renders as `"0"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let whole = value.floor().abs() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Parses user-entered amounts such as `"1.500"` or `"$ 2.000,50"`.
///
/// Dots are thousands separators and a comma marks decimals. Anything that
/// still fails to parse degrades to `0.0`.
pub fn parse_formatted_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '.' | '$' | ' ' | '\u{a0}'))
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Renders a percentage with no decimals, e.g. `0.256` -> `"26%"`.
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "0%".into();
    }
    format!("{:.0}%", fraction * 100.0)
}
