//! Optional and variant payslip sections.
//!
//! Each routine here handles one section whose presence or position varies
//! between payslip revisions. A routine peeks at the next line, decides
//! whether its section is there, and consumes it if so. Keeping them apart
//! makes every tolerance rule easy to audit on its own.

use tracing::{debug, trace};

use crate::cursor::LineCursor;
use crate::error::ParseResult;
use crate::models::{Company, Distribution, LineItem, WithholdingElection};

use super::columns::{fill_column, read_labels};
use super::fields::{read_number, word_at};

pub(crate) const TAX_DEDUCTIONS: &str = "Tax Deductions";
pub(crate) const AFTER_TAX_DEDUCTION: &str = "After Tax Deduction";
pub(crate) const PRETAX_DEDUCTIONS: &str = "Pretax Deductions";
pub(crate) const ADDITIONAL_AMOUNT: &str = "Additional Amount";
pub(crate) const NAME: &str = "Name";
pub(crate) const TOTAL_HOURS_PREFIX: &str = "Total Hours Worked: ";
pub(crate) const SICK_HOURS_PREFIX: &str = "Sick Hours Available: ";

const DIVISION_PREFIX: &str = "Division: ";
const HR_LOCATION_PREFIX: &str = "HR Location: ";
const EARNINGS_DETAIL_HEADER: &str =
    "Start Date End Date Hours  x  Rate  xi Factor  =  Current Hrs YTD Earnings YTD";
const DETAIL_BLOCK_EXITS: [&str; 3] = [TAX_DEDUCTIONS, AFTER_TAX_DEDUCTION, NAME];

/// Subtotals whose position in the document varies.
#[derive(Debug, Default)]
pub(crate) struct Subtotals {
    pub tax_deductions: Option<(String, String)>,
    pub after_tax_deduction: Option<(String, String)>,
    pub net_pay: Option<(f64, String)>,
}

/// Reads the division / HR location block if it sits at the cursor.
///
/// The block appears either after the employee address or after the pay
/// frequency, so this is tried at both places.
pub(crate) fn read_division(cursor: &mut LineCursor, company: &mut Company) -> ParseResult<()> {
    if !cursor.next_starts_with(DIVISION_PREFIX)? {
        return Ok(());
    }
    let line = cursor.pop_front()?;
    company.division = Some(word_at(cursor, &line, 1, "Division: <division>")?);

    cursor.expect_prefix(HR_LOCATION_PREFIX)?;
    let line = cursor.pop_front()?;
    company.hr_location = Some(word_at(cursor, &line, 2, "HR Location: <location>")?);
    cursor.expect_blank()?;

    debug!(
        document_id = cursor.document_id(),
        line = cursor.consumed_count(),
        "Read division block"
    );
    Ok(())
}

/// Reads the optional "Additional Amount" pair into the W4 data.
pub(crate) fn read_additional_amount(
    cursor: &mut LineCursor,
    withholding: &mut WithholdingElection,
) -> ParseResult<()> {
    if !cursor.pop_if(ADDITIONAL_AMOUNT)? {
        return Ok(());
    }
    withholding.additional_amount = Some([cursor.pop_front()?, cursor.pop_front()?]);
    cursor.expect_blank()
}

/// Reads the "Tax Deductions" subtotal if it sits at the cursor.
pub(crate) fn read_tax_subtotal(cursor: &mut LineCursor, totals: &mut Subtotals) -> ParseResult<()> {
    if !cursor.pop_if(TAX_DEDUCTIONS)? {
        return Ok(());
    }
    totals.tax_deductions = Some((cursor.pop_front()?, cursor.pop_front()?));
    cursor.expect_blank()
}

/// Reads the "After Tax Deduction" subtotal if it sits at the cursor.
///
/// The subtotal is followed by repeated "Pretax Deductions" and "Tax
/// Deductions" labels. In its later position a blank line may separate them.
pub(crate) fn read_after_tax_subtotal(
    cursor: &mut LineCursor,
    totals: &mut Subtotals,
    allow_gap: bool,
) -> ParseResult<()> {
    if !cursor.pop_if(AFTER_TAX_DEDUCTION)? {
        return Ok(());
    }
    totals.after_tax_deduction = Some((cursor.pop_front()?, cursor.pop_front()?));
    cursor.expect_line(PRETAX_DEDUCTIONS)?;
    if allow_gap {
        cursor.pop_if("")?;
    }
    cursor.expect_line(TAX_DEDUCTIONS)?;
    cursor.expect_blank()
}

/// Reads the per-row earnings detail block if it sits at the cursor.
///
/// Only the YTD earnings column is taken from it. The rest (start/end date,
/// rate, factor) is discarded up to the next known section.
pub(crate) fn read_earnings_detail(
    cursor: &mut LineCursor,
    earnings: &mut [LineItem],
) -> ParseResult<()> {
    if !cursor.pop_if(EARNINGS_DETAIL_HEADER)? {
        return Ok(());
    }
    fill_column(cursor, earnings, |row, v| row.ytd_amount = Some(v))?;

    let mut skipped = 0usize;
    while !DETAIL_BLOCK_EXITS.contains(&cursor.peek()?) {
        let line = cursor.pop_front()?;
        trace!(document_id = cursor.document_id(), line = %line, "Discarding detail line");
        skipped += 1;
    }
    debug!(
        document_id = cursor.document_id(),
        skipped,
        "Skipped earnings detail block"
    );
    Ok(())
}

/// Skips the "Employee Contribution" table heading if it sits at the cursor.
pub(crate) fn skip_employee_contribution(cursor: &mut LineCursor) -> ParseResult<()> {
    if !(cursor.next_is(NAME)? && cursor.peek_nth(1) == Some("Employee Contribution")) {
        return Ok(());
    }
    cursor.pop_front()?;
    cursor.pop_front()?;
    cursor.expect_line("Total")?;
    cursor.expect_blank()?;
    debug!(
        document_id = cursor.document_id(),
        "Skipped employee contribution heading"
    );
    Ok(())
}

/// Consumes the heading of the itemized tax-deduction table.
///
/// The heading is normally "Name". Otherwise two unvalidated lines stand in
/// its place and are discarded.
pub(crate) fn skip_tax_table_heading(cursor: &mut LineCursor) -> ParseResult<()> {
    if cursor.pop_if(NAME)? {
        return Ok(());
    }
    let first = cursor.pop_front()?;
    let second = cursor.pop_front()?;
    debug!(
        document_id = cursor.document_id(),
        first = %first,
        second = %second,
        "Discarded tax table heading"
    );
    Ok(())
}

/// Blocks recognised between the tax-deduction labels and the hours line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrailingBlock {
    CurrentColumn,
    AfterTaxHeading,
    AdditionalAmount,
    NetPay,
    YtdColumn,
    TotalHours,
    Unmodeled,
}

impl TrailingBlock {
    fn classify(line: &str) -> Self {
        match line {
            "Current" => TrailingBlock::CurrentColumn,
            "After Tax(AT) Deductions" => TrailingBlock::AfterTaxHeading,
            ADDITIONAL_AMOUNT => TrailingBlock::AdditionalAmount,
            "Net Pay" => TrailingBlock::NetPay,
            "YTD" => TrailingBlock::YtdColumn,
            _ if line.starts_with(TOTAL_HOURS_PREFIX) => TrailingBlock::TotalHours,
            _ => TrailingBlock::Unmodeled,
        }
    }
}

/// Reads the blocks that follow the tax-deduction labels, in any order,
/// until the "Total Hours Worked: " line (which is left at the cursor).
///
/// Unrecognised lines are discarded.
pub(crate) fn read_trailing_blocks(
    cursor: &mut LineCursor,
    tax_deductions: &mut [LineItem],
    withholding: &mut WithholdingElection,
    totals: &mut Subtotals,
) -> ParseResult<()> {
    loop {
        match TrailingBlock::classify(cursor.peek()?) {
            TrailingBlock::TotalHours => return Ok(()),
            TrailingBlock::CurrentColumn => {
                cursor.pop_front()?;
                fill_column(cursor, tax_deductions, |row, v| row.current_amount = Some(v))?;
                cursor.expect_blank()?;
            }
            TrailingBlock::AfterTaxHeading => {
                cursor.pop_front()?;
                cursor.expect_blank()?;
            }
            TrailingBlock::AdditionalAmount => read_additional_amount(cursor, withholding)?,
            TrailingBlock::NetPay => {
                cursor.pop_front()?;
                let net_pay = read_number(cursor, "net_pay")?;
                totals.net_pay = Some((net_pay, cursor.pop_front()?));
                cursor.expect_blank()?;
            }
            TrailingBlock::YtdColumn => {
                cursor.pop_front()?;
                fill_column(cursor, tax_deductions, |row, v| row.ytd_amount = Some(v))?;
                cursor.expect_blank()?;
            }
            TrailingBlock::Unmodeled => {
                let line = cursor.pop_front()?;
                trace!(document_id = cursor.document_id(), line = %line, "Discarding unmodeled line");
            }
        }
    }
}

/// Reads the net-pay distribution table.
pub(crate) fn read_distributions(cursor: &mut LineCursor) -> ParseResult<Vec<Distribution>> {
    let columns: [(&str, fn(&mut Distribution, String)); 5] = [
        ("Bank Name", |row, v| row.bank_name = Some(v)),
        ("Branch", |row, v| row.branch = Some(v)),
        ("Account Type", |row, v| row.account_type = Some(v)),
        ("Payment Reference", |row, v| row.payment_reference = Some(v)),
        ("Payment Amount", |row, v| row.payment_amount = Some(v)),
    ];

    cursor.expect_line("Net Pay Distribution")?;
    cursor.expect_line("Payment Method")?;
    let mut rows: Vec<Distribution> = read_labels(cursor)?
        .into_iter()
        .map(Distribution::with_method)
        .collect();
    cursor.expect_blank()?;

    for (heading, set) in columns {
        cursor.expect_line(heading)?;
        fill_column(cursor, &mut rows, set)?;
        cursor.expect_blank()?;
    }
    Ok(rows)
}
