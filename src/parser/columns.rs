//! Column tables.
//!
//! Tables on a payslip are printed column by column: first the row labels,
//! then each value column in turn. A value column may stop short at a blank
//! line, which leaves the remaining rows without a value in that column.
//! Values are matched to rows by position only.

use crate::cursor::LineCursor;
use crate::error::ParseResult;

/// Reads row labels up to (not including) the next blank line.
pub(crate) fn read_labels(cursor: &mut LineCursor) -> ParseResult<Vec<String>> {
    let mut labels = Vec::new();
    while !cursor.next_is_blank()? {
        labels.push(cursor.pop_front()?);
    }
    Ok(labels)
}

/// Reads at most `rows` values, stopping early at a blank line.
///
/// The terminating blank line, if any, is left for the caller.
pub(crate) fn read_column(cursor: &mut LineCursor, rows: usize) -> ParseResult<Vec<String>> {
    let mut values = Vec::with_capacity(rows);
    while values.len() < rows && !cursor.next_is_blank()? {
        values.push(cursor.pop_front()?);
    }
    Ok(values)
}

/// Reads one value column and stores it into `rows` by index.
pub(crate) fn fill_column<T>(
    cursor: &mut LineCursor,
    rows: &mut [T],
    set: fn(&mut T, String),
) -> ParseResult<()> {
    let values = read_column(cursor, rows.len())?;
    for (row, value) in rows.iter_mut().zip(values) {
        set(row, value);
    }
    Ok(())
}
