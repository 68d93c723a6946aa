//! Payslip summary rows, as a text table or CSV.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::PayslipDocument;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TABLE_HEADER: &str = "Begin      End        Paydate     Hours     Gross       Net";
const RULE: &str = "------ --------- ---------";
/// The three date columns and their separators; subtotals start under the hours.
const SUBTOTAL_INDENT: usize = 33;

/// Returns the CSV header line matching [`SummaryRow::to_csv`].
pub fn csv_header() -> &'static str {
    "Paydate,Hours,Gross,Net"
}

/// The fields of one payslip that appear in summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// First day of the pay period.
    pub period_begin: NaiveDate,
    /// Last day of the pay period.
    pub period_end: NaiveDate,
    /// The date the payslip was paid.
    pub payment_date: NaiveDate,
    /// Total hours worked.
    pub hours: f64,
    /// Gross earnings.
    pub gross: f64,
    /// Net pay.
    pub net: f64,
}

impl SummaryRow {
    /// Builds a row from a fully parsed payslip.
    ///
    /// Returns `None` for a header-only document, which has no amounts.
    pub fn from_document(document: &PayslipDocument) -> Option<Self> {
        let summary = document.summary()?;
        Some(Self {
            period_begin: document.pay_period.period_begin,
            period_end: document.pay_period.period_end,
            payment_date: document.pay_period.payment_date,
            hours: summary.total_hours_worked,
            gross: summary.gross,
            net: summary.net_pay,
        })
    }

    /// Formats the row as a CSV record.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use payslip_parser::render::SummaryRow;
    ///
    /// let row = SummaryRow {
    ///     period_begin: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
    ///     period_end: NaiveDate::from_ymd_opt(2023, 9, 16).unwrap(),
    ///     payment_date: NaiveDate::from_ymd_opt(2023, 9, 21).unwrap(),
    ///     hours: 2.5,
    ///     gross: 35.0,
    ///     net: 32.32,
    /// };
    /// assert_eq!(row.to_csv(), "2023-09-10,2023-09-16,2023-09-21,2.50,35.00,32.32");
    /// ```
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{:.2},{:.2},{:.2}",
            self.period_begin.format(DATE_FORMAT),
            self.period_end.format(DATE_FORMAT),
            self.payment_date.format(DATE_FORMAT),
            self.hours,
            self.gross,
            self.net
        )
    }

    fn to_table_line(&self) -> String {
        format!(
            "{} {} {} {:6.2} {:9.2} {:9.2}",
            self.period_begin.format(DATE_FORMAT),
            self.period_end.format(DATE_FORMAT),
            self.payment_date.format(DATE_FORMAT),
            self.hours,
            self.gross,
            self.net
        )
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    hours: f64,
    gross: f64,
    net: f64,
}

/// A text table of payslip rows with monthly subtotals.
///
/// Rows are grouped by the month their pay period begins in. When the month
/// changes the running subtotal is printed, followed by a fresh header. The
/// last group's subtotal is printed by [`SummaryTable::finish`].
#[derive(Debug, Clone)]
pub struct SummaryTable {
    lines: Vec<String>,
    current_month: Option<(i32, u32)>,
    month_totals: Totals,
}

impl SummaryTable {
    /// Starts a table with its header line.
    pub fn new() -> Self {
        Self {
            lines: vec![TABLE_HEADER.to_string()],
            current_month: None,
            month_totals: Totals::default(),
        }
    }

    /// Appends a row, closing the previous month's group if needed.
    pub fn push(&mut self, row: &SummaryRow) {
        let month = (row.period_begin.year(), row.period_begin.month());
        if self.current_month.is_some_and(|current| current != month) {
            self.push_subtotal();
            self.lines.push(String::new());
            self.lines.push(TABLE_HEADER.to_string());
            self.month_totals = Totals::default();
        }
        self.current_month = Some(month);

        self.month_totals.hours += row.hours;
        self.month_totals.gross += row.gross;
        self.month_totals.net += row.net;
        self.lines.push(row.to_table_line());
    }

    /// Closes the last group and returns the finished table.
    pub fn finish(mut self) -> String {
        if self.current_month.is_some() {
            self.push_subtotal();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    fn push_subtotal(&mut self) {
        let indent = " ".repeat(SUBTOTAL_INDENT);
        let Totals { hours, gross, net } = self.month_totals;
        self.lines.push(format!("{indent}{RULE}"));
        self.lines.push(format!("{indent}{hours:6.2} {gross:9.2} {net:9.2}"));
    }
}

impl Default for SummaryTable {
    fn default() -> Self {
        Self::new()
    }
}
