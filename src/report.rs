//! Text rendering of a month's figures for the terminal.

use std::fmt::{self, Write as _};

use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::services::bill_service::{BillReminder, BillService, ReminderStatus};
use crate::core::services::budget_service::{BudgetLine, BudgetService, BudgetStatus};
use crate::core::services::forecast_service::{ForecastService, Projection};
use crate::core::services::net_worth_service::{NetWorth, NetWorthService};
use crate::core::services::summary_service::{CategoryShare, MonthlyStats, SummaryService};
use crate::core::services::trend_service::{MonthlyPoint, TrendService};
use crate::domain::{FinanceBook, Period};
use crate::utils::format::{format_number, format_percent};

/// Everything shown for one period, computed from a book snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub today: NaiveDate,
    pub stats: MonthlyStats,
    pub breakdown: Vec<CategoryShare>,
    pub budgets: Vec<BudgetLine>,
    pub projection: Option<Projection>,
    pub net_worth: NetWorth,
    pub reminders: Vec<BillReminder>,
    pub trend: Vec<MonthlyPoint>,
}

impl Report {
    pub fn build(book: &FinanceBook, period: Period, clock: &dyn Clock, config: &Config) -> Self {
        let today = clock.today();
        let stats = SummaryService::monthly_stats(book, period);
        let breakdown = SummaryService::category_breakdown(&stats, &book.categories);
        Self {
            today,
            breakdown,
            budgets: BudgetService::reconcile_period(book, period),
            projection: ForecastService::project_period(book, period, clock),
            net_worth: NetWorthService::for_period(book, period),
            reminders: BillService::reminders(book, today),
            trend: TrendService::monthly_series(&book.transactions, period, config.trend_months),
            stats,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Positive,
    Negative,
    Warning,
    Detail,
}

pub struct Formatter {
    plain: bool,
}

impl Formatter {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_report(&mut out, report);
        out
    }

    fn write_report(&self, out: &mut String, report: &Report) -> fmt::Result {
        let stats = &report.stats;
        writeln!(out, "{}", self.style(Style::Header, format!("=== {} ===", stats.period.label())))?;
        self.row(out, "Ingresos", money(stats.income), Style::Positive)?;
        self.row(out, "Gastos", money(stats.expense), Style::Negative)?;
        self.row(out, "Ahorro", money(stats.savings_amount), Style::Detail)?;
        self.row(out, "Inversión", money(stats.investment_amount), Style::Detail)?;
        let available_style = if stats.available < 0.0 { Style::Negative } else { Style::Positive };
        self.row(out, "Disponible", money(stats.available), available_style)?;
        self.row(out, "Sin asignar", money(stats.available_to_assign), Style::Detail)?;

        if !report.breakdown.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style(Style::Header, "Gastos por categoría"))?;
            for share in &report.breakdown {
                let label = match &share.emoji {
                    Some(emoji) => format!("{emoji} {}", share.category),
                    None => share.category.clone(),
                };
                let value = format!(
                    "{} ({})",
                    money(share.spent),
                    format_percent(share.share_percent / 100.0)
                );
                self.row(out, &label, value, Style::Detail)?;
            }
        }

        let assigned: Vec<&BudgetLine> = report
            .budgets
            .iter()
            .filter(|line| line.status != BudgetStatus::Unassigned)
            .collect();
        if !assigned.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style(Style::Header, "Presupuestos"))?;
            for line in assigned {
                let style = match line.status {
                    BudgetStatus::OverBudget => Style::Negative,
                    BudgetStatus::AtLimit => Style::Warning,
                    _ => Style::Detail,
                };
                let value = format!(
                    "{} / {} ({})",
                    money(line.spent),
                    money(line.limit),
                    format_percent(line.progress)
                );
                self.row(out, &line.category, value, style)?;
            }
        }

        if let Some(projection) = &report.projection {
            writeln!(out)?;
            writeln!(out, "{}", self.style(Style::Header, "Proyección"))?;
            self.row(out, "Gasto diario", money(projection.daily_rate), Style::Detail)?;
            self.row(out, "Gasto a fin de mes", money(projection.projected_expense), Style::Warning)?;
            let style = if projection.projected_available < 0.0 { Style::Negative } else { Style::Positive };
            self.row(out, "Disponible proyectado", money(projection.projected_available), style)?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.style(Style::Header, "Patrimonio"))?;
        self.row(out, "Activos", money(report.net_worth.assets), Style::Positive)?;
        self.row(out, "Pasivos", money(report.net_worth.liabilities), Style::Negative)?;
        self.row(out, "Neto", money(report.net_worth.net), Style::Detail)?;

        if !report.reminders.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.style(Style::Header, "Vencimientos"))?;
            for reminder in &report.reminders {
                let (tag, style) = match reminder.status {
                    ReminderStatus::Overdue => ("VENCIDO", Style::Negative),
                    ReminderStatus::DueToday => ("HOY", Style::Warning),
                    ReminderStatus::Upcoming => ("PRÓXIMO", Style::Detail),
                };
                let value = format!(
                    "{} {} [{tag}]",
                    reminder.due_date.format("%d/%m/%Y"),
                    money(reminder.amount)
                );
                self.row(out, &reminder.title, value, style)?;
            }
        }

        if report.trend.len() > 1 {
            writeln!(out)?;
            writeln!(out, "{}", self.style(Style::Header, "Tendencia"))?;
            for point in &report.trend {
                let value = format!(
                    "+{} -{} = {}",
                    format_number(point.income),
                    format_number(point.expense),
                    money(point.balance)
                );
                self.row(out, &point.period.to_string(), value, Style::Detail)?;
            }
            let average = TrendService::average_monthly_expense(&report.trend);
            self.row(out, "Gasto promedio", money(average), Style::Detail)?;
        }
        Ok(())
    }

    fn row(&self, out: &mut String, label: &str, value: String, style: Style) -> fmt::Result {
        writeln!(out, "  {:<24} {}", label, self.style(style, value))
    }

    fn style(&self, style: Style, text: impl fmt::Display) -> String {
        let text = text.to_string();
        if self.plain {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Positive => text.green().to_string(),
            Style::Negative => text.red().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Detail => text,
        }
    }
}

fn money(value: f64) -> String {
    format!("$ {}", format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::domain::{Bill, Budget, OwnerId, Strategy, Transaction, TransactionKind};

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn sample_book() -> FinanceBook {
        let owner = OwnerId::new("owner");
        let mut book = FinanceBook::new(owner.clone());
        book.set_strategy(Strategy::new(10.0, 5.0));
        book.add_transaction(Transaction::new(owner.clone(), TransactionKind::Income, 10000.0, "Sueldo", march(1)));
        book.add_transaction(Transaction::new(owner, TransactionKind::Expense, 500.0, "Ocio", march(5)));
        book.upsert_budget(Budget::new("Ocio", 400.0));
        book.add_bill(Bill::new("Luz", 1200.0, march(11), "Servicios"));
        book
    }

    #[test]
    fn plain_report_lists_every_section() {
        let clock = FixedClock::new(march(10));
        let book = sample_book();
        let report = Report::build(&book, Period::new(2025, 3).unwrap(), &clock, &Config::default());
        let text = Formatter::new(true).render(&report);

        assert!(text.contains("=== MARZO 2025 ==="));
        assert!(text.contains("$ 10.000"));
        assert!(text.contains("$ 8.000"));
        assert!(text.contains("Presupuestos"));
        assert!(text.contains("Proyección"));
        assert!(text.contains("Luz"));
        assert!(text.contains("[PRÓXIMO]"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn past_month_has_no_projection() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
        let report = Report::build(&sample_book(), Period::new(2025, 3).unwrap(), &clock, &Config::default());
        assert!(report.projection.is_none());
        assert!(!Formatter::new(true).render(&report).contains("Proyección"));
    }
}
