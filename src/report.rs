//! Console report: loan summary, schedule table and totals.

use crate::affordability::Affordability;
use crate::error::Result;
use crate::precision::Precision;
use crate::schedule::{PeriodRow, Schedule};
use crate::terms::LoanTerms;
use std::io::Write;

/// Presentation settings for the console report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Prefix for currency amounts.
    pub currency_symbol: String,

    /// Print the period-by-period table. Totals are always printed.
    pub show_schedule: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            currency_symbol: "$".to_string(),
            show_schedule: true,
        }
    }
}

/// Everything the console report needs, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub terms: &'a LoanTerms,
    pub payment: f64,
    pub schedule: &'a Schedule,
    pub affordability: Option<&'a Affordability>,
}

impl Report<'_> {
    /// Writes the full report to `out`.
    pub fn write_to<W: Write>(&self, mut out: W, options: &ReportOptions) -> Result<()> {
        let symbol = options.currency_symbol.as_str();

        writeln!(
            out,
            "Loan amount: {}",
            format_currency(self.terms.principal, symbol)
        )?;
        writeln!(
            out,
            "Annual rate: {}%",
            format_rate(self.terms.annual_rate_percent)
        )?;
        writeln!(out, "Term: {} months", self.terms.term_periods)?;
        writeln!(
            out,
            "Monthly payment: {}",
            format_currency(self.payment, symbol)
        )?;
        writeln!(out)?;

        if options.show_schedule {
            write_schedule(&mut out, self.schedule)?;
            writeln!(out)?;
        }

        writeln!(
            out,
            "Total paid:    {}",
            format_currency(self.schedule.total_paid(), symbol)
        )?;
        writeln!(
            out,
            "Total interest:{}",
            format_currency(self.schedule.total_interest(), symbol)
        )?;

        if let Some(affordability) = self.affordability {
            writeln!(out)?;
            writeln!(
                out,
                "Monthly income: {}",
                format_currency(affordability.monthly_income, symbol)
            )?;
            writeln!(
                out,
                "Payment to income: {:.1}%",
                affordability.percent_of_income()
            )?;
            writeln!(out, "Status: {}", affordability.status())?;
        }

        out.flush()?;
        Ok(())
    }
}

/// Header line of the schedule table.
pub fn table_header() -> String {
    format!(
        "{:>5} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Payment", "Interest", "Principal", "Balance"
    )
}

/// One formatted table line.
pub fn table_row(row: &PeriodRow) -> String {
    format!(
        "{:>5} {:>12} {:>12} {:>12} {:>14}",
        row.period,
        format_amount(row.payment),
        format_amount(row.interest),
        format_amount(row.principal),
        format_amount(row.balance)
    )
}

/// Writes the header, a dashed rule and one line per period.
pub fn write_schedule<W: Write>(out: &mut W, schedule: &Schedule) -> Result<()> {
    let header = table_header();
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    for row in schedule {
        writeln!(out, "{}", table_row(row))?;
    }
    Ok(())
}

/// Formats `value` as `<symbol>1,234.56`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{}{}", symbol, format_amount(value))
}

/// Formats `value` with thousands separators and two decimals.
///
/// Rounds half-to-even on the exact binary value, so `2.675` prints as
/// `2.67`.
pub fn format_amount(value: f64) -> String {
    let Some(cents) = Precision::new(2).to_decimal(value) else {
        return format!("{:.2}", value);
    };

    let text = cents.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    format!("{}{}.{}", sign, group_thousands(integer), fraction)
}

/// Formats an annual rate with up to four significant digits, trailing zeros
/// trimmed (`10` stays `10`, `3.14159` becomes `3.142`).
pub fn format_rate(rate: f64) -> String {
    if rate == 0.0 || !rate.is_finite() {
        return rate.to_string();
    }

    let magnitude = rate.abs().log10().floor() as i32 + 1;
    let digits = (4 - magnitude).clamp(0, Precision::MAX_DIGITS as i32) as u32;
    match Precision::new(digits).to_decimal(rate) {
        Some(decimal) => decimal.normalize().to_string(),
        None => rate.to_string(),
    }
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
