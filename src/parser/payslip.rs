//! Payslip document parser.
//!
//! Reads the text of one payslip top to bottom and assembles a
//! [`PayslipDocument`]. Most lines are fixed labels checked literally; the
//! sections that move around between payslip revisions are handled by the
//! helpers in [`super::sections`].

use tracing::debug;

use crate::cursor::LineCursor;
use crate::error::ParseResult;
use crate::models::{
    Company, Employee, LineItem, PayPeriod, PaySummary, PayslipDetails, PayslipDocument,
    WithholdingElection,
};

use super::columns::read_labels;
use super::fields::{parse_date, parse_number, read_date_range, read_number, word_at};
use super::sections::{
    Subtotals, SICK_HOURS_PREFIX, TOTAL_HOURS_PREFIX, read_additional_amount,
    read_after_tax_subtotal, read_distributions, read_division, read_earnings_detail,
    read_tax_subtotal, read_trailing_blocks, skip_employee_contribution, skip_tax_table_heading,
};

/// Parses a payslip from its extracted text lines.
///
/// With `header_only` set, parsing stops once the payment date and payroll
/// label have been read, and the returned document has no
/// [`PayslipDetails`]. This is enough to date-stamp a payslip without
/// depending on the layout of its financial sections.
///
/// # Errors
///
/// - [`ParseError::ExhaustedInput`](crate::error::ParseError::ExhaustedInput) if the text ends mid-document
/// - [`ParseError::StructuralMismatch`](crate::error::ParseError::StructuralMismatch) if a label or prefix is missing
/// - [`ParseError::NumericFormat`](crate::error::ParseError::NumericFormat) if gross, net pay or hours are not numbers
/// - [`ParseError::DateFormat`](crate::error::ParseError::DateFormat) if a period or payment date is malformed
pub fn parse_payslip<I, S>(
    document_id: &str,
    lines: I,
    header_only: bool,
) -> ParseResult<PayslipDocument>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut cursor = LineCursor::new(document_id, lines);

    let mut company = read_company(&mut cursor)?;
    let employee = read_employee(&mut cursor)?;
    read_division(&mut cursor, &mut company)?;
    let mut pay_period = read_pay_period(&mut cursor)?;

    if header_only {
        debug!(
            document_id,
            lines_read = cursor.consumed_count(),
            "Stopped after header fields"
        );
        return Ok(PayslipDocument {
            document_id: document_id.to_string(),
            company,
            employee,
            pay_period,
            details: None,
        });
    }

    let details = read_details(&mut cursor, &mut company, &mut pay_period)?;
    debug!(
        document_id,
        lines_read = cursor.consumed_count(),
        lines_left = cursor.remaining(),
        earnings = details.earnings.len(),
        tax_deductions = details.tax_deductions.len(),
        distributions = details.distributions.len(),
        "Parsed payslip"
    );

    Ok(PayslipDocument {
        document_id: document_id.to_string(),
        company,
        employee,
        pay_period,
        details: Some(details),
    })
}

/// Parses a payslip from a block of text, split on line boundaries.
pub fn parse_payslip_text(
    document_id: &str,
    text: &str,
    header_only: bool,
) -> ParseResult<PayslipDocument> {
    parse_payslip(document_id, text.lines(), header_only)
}

fn read_company(cursor: &mut LineCursor) -> ParseResult<Company> {
    let company = Company {
        legal_name_lines: [cursor.pop_front()?, cursor.pop_front()?],
        address_lines: [cursor.pop_front()?, cursor.pop_front()?],
        division: None,
        hr_location: None,
    };
    cursor.expect_blank()?;
    Ok(company)
}

fn read_employee(cursor: &mut LineCursor) -> ParseResult<Employee> {
    cursor.expect_prefix("Person Number: ")?;
    let line = cursor.pop_front()?;
    let employee = Employee {
        employee_number: word_at(cursor, &line, 2, "Person Number: <number>")?,
        name: cursor.pop_front()?,
        address_lines: [cursor.pop_front()?, cursor.pop_front()?],
    };
    cursor.expect_blank()?;
    Ok(employee)
}

/// Reads the column headings and the period, payment date and payroll label.
fn read_pay_period(cursor: &mut LineCursor) -> ParseResult<PayPeriod> {
    for heading in ["Period", "Payment Date", "Payroll", "", "Pay Frequency", ""] {
        cursor.expect_line(heading)?;
    }

    let (period_begin, period_end) = read_date_range(cursor)?;
    let line = cursor.pop_front()?;
    let payment_date = parse_date(cursor, "payment_date", &line)?;

    Ok(PayPeriod {
        period_begin,
        period_end,
        payment_date,
        payroll_label: cursor.pop_front()?,
        pay_frequency: None,
        hourly_rate: None,
    })
}

fn read_details(
    cursor: &mut LineCursor,
    company: &mut Company,
    pay_period: &mut PayPeriod,
) -> ParseResult<PayslipDetails> {
    cursor.expect_blank()?;
    pay_period.pay_frequency = Some(cursor.pop_front()?);
    cursor.expect_blank()?;

    read_division(cursor, company)?;

    cursor.expect_line("Hourly Rate")?;
    cursor.expect_blank()?;
    pay_period.hourly_rate = Some(cursor.pop_front()?);
    cursor.expect_blank()?;

    let mut withholding = read_jurisdictions(cursor)?;

    for heading in ["Current", "Year To Date", "", "Name"] {
        cursor.expect_line(heading)?;
    }
    let mut earnings = read_line_items(cursor)?;
    cursor.expect_blank()?;

    read_withholding_status(cursor, &mut withholding)?;
    read_additional_amount(cursor, &mut withholding)?;

    cursor.expect_line("Gross Earnings")?;
    let gross = read_number(cursor, "gross")?;
    let gross_ytd = cursor.pop_front()?;
    cursor.expect_blank()?;

    let (non_payroll, non_payroll_ytd) = read_labelled_pair(cursor, "Non Payroll")?;

    for heading in [" Earnings", "", "Summary", ""] {
        cursor.expect_line(heading)?;
    }

    let (pretax_deductions, pretax_deductions_ytd) =
        read_labelled_pair(cursor, "Pretax Deductions")?;

    let mut totals = Subtotals::default();
    read_tax_subtotal(cursor, &mut totals)?;
    read_after_tax_subtotal(cursor, &mut totals, false)?;
    read_earnings_detail(cursor, &mut earnings)?;
    read_tax_subtotal(cursor, &mut totals)?;
    skip_employee_contribution(cursor)?;
    read_after_tax_subtotal(cursor, &mut totals, true)?;

    skip_tax_table_heading(cursor)?;
    let mut tax_deductions = read_line_items(cursor)?;
    cursor.expect_blank()?;

    read_trailing_blocks(cursor, &mut tax_deductions, &mut withholding, &mut totals)?;
    let Some((net_pay, net_pay_ytd)) = totals.net_pay else {
        return Err(cursor.mismatch_next("Net Pay"));
    };
    let (total_hours_worked, sick_hours_available) = read_hours(cursor)?;

    let (tax, tax_ytd) = totals.tax_deductions.unzip();
    let (after_tax, after_tax_ytd) = totals.after_tax_deduction.unzip();

    let summary = PaySummary {
        gross,
        gross_ytd,
        non_payroll,
        non_payroll_ytd,
        pretax_deductions,
        pretax_deductions_ytd,
        tax_deductions: tax,
        tax_deductions_ytd: tax_ytd,
        after_tax_deduction: after_tax,
        after_tax_deduction_ytd: after_tax_ytd,
        net_pay,
        net_pay_ytd,
        total_hours_worked,
        sick_hours_available,
    };

    let distributions = read_distributions(cursor)?;

    Ok(PayslipDetails {
        withholding,
        summary,
        earnings,
        tax_deductions,
        distributions,
    })
}

/// Reads the "Type" heading and the three jurisdiction lines beneath it.
fn read_jurisdictions(cursor: &mut LineCursor) -> ParseResult<WithholdingElection> {
    cursor.expect_line("Type")?;
    let mut jurisdiction_lines = Vec::with_capacity(3);
    for _ in 0..3 {
        let line = cursor.pop_front()?;
        if !line.is_empty() {
            jurisdiction_lines.push(line);
        }
    }
    Ok(WithholdingElection {
        jurisdiction_lines,
        ..WithholdingElection::default()
    })
}

fn read_withholding_status(
    cursor: &mut LineCursor,
    withholding: &mut WithholdingElection,
) -> ParseResult<()> {
    cursor.expect_line("Marital Status")?;
    withholding.marital_status = Some(cursor.pop_front()?);
    cursor.expect_blank()?;

    cursor.expect_line("W4 Information")?;
    cursor.expect_blank()?;

    cursor.expect_line("Exemptions")?;
    withholding.exemptions = Some([cursor.pop_front()?, cursor.pop_front()?]);
    cursor.expect_blank()
}

/// Reads a label followed by a current and a year-to-date value.
fn read_labelled_pair(cursor: &mut LineCursor, label: &str) -> ParseResult<(String, String)> {
    cursor.expect_line(label)?;
    let pair = (cursor.pop_front()?, cursor.pop_front()?);
    cursor.expect_blank()?;
    Ok(pair)
}

fn read_line_items(cursor: &mut LineCursor) -> ParseResult<Vec<LineItem>> {
    Ok(read_labels(cursor)?
        .iter()
        .map(|name| LineItem::named(name.trim()))
        .collect())
}

/// Reads "Total Hours Worked: " and the optional "Sick Hours Available: " line.
fn read_hours(cursor: &mut LineCursor) -> ParseResult<(f64, Option<f64>)> {
    cursor.expect_prefix(TOTAL_HOURS_PREFIX)?;
    let line = cursor.pop_front()?;
    let hours = word_at(cursor, &line, 3, "Total Hours Worked: <hours>")?;
    let total_hours_worked = parse_number(cursor, "total_hours_worked", &hours)?;
    cursor.expect_blank()?;

    let mut sick_hours_available = None;
    if cursor.next_starts_with(SICK_HOURS_PREFIX)? {
        let line = cursor.pop_front()?;
        let hours = word_at(cursor, &line, 3, "Sick Hours Available: <hours>")?;
        sick_hours_available = Some(parse_number(cursor, "sick_hours_available", &hours)?);
        cursor.expect_blank()?;
    }

    Ok((total_hours_worked, sick_hours_available))
}
