//! Spreadsheet-friendly CSV export of transactions.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::core::errors::{BudgetError, Result};
use crate::domain::Transaction;
use crate::utils::format::format_number;

pub const HEADERS: [&str; 5] = ["Fecha", "Tipo", "Categoria", "Monto", "Detalle/Nota"];
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `transactions` in the given order, BOM first so spreadsheet tools
/// pick up UTF-8.
pub fn write_csv<'a, W, I>(mut out: W, transactions: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    out.write_all(BOM)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    writer.write_record(HEADERS)?;

    let mut rows = 0;
    for txn in transactions {
        let date = txn.date.format("%d/%m/%Y").to_string();
        let amount = format_number(txn.amount);
        writer.write_record([
            date.as_str(),
            txn.kind.code(),
            txn.category.as_str(),
            amount.as_str(),
            txn.note.as_deref().unwrap_or(""),
        ])?;
        rows += 1;
    }
    writer
        .flush()
        .map_err(|err| BudgetError::ExportError(err.to_string()))?;
    Ok(rows)
}

pub fn to_csv_string<'a, I>(transactions: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buffer = Vec::new();
    write_csv(&mut buffer, transactions)?;
    String::from_utf8(buffer).map_err(|err| BudgetError::ExportError(err.to_string()))
}
