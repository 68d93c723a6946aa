//! Field extraction from single lines.
//!
//! Helpers that turn a consumed line into a typed value, raising errors that
//! point at that line.

use chrono::NaiveDate;

use crate::cursor::LineCursor;
use crate::error::ParseResult;

/// Date format used throughout the payslip (e.g. `09/21/23`).
pub(crate) const DATE_FORMAT: &str = "%m/%d/%y";

/// Returns the whitespace-separated word at `index` of `line`.
///
/// `shape` describes the expected line for the error message.
pub(crate) fn word_at(
    cursor: &LineCursor,
    line: &str,
    index: usize,
    shape: &str,
) -> ParseResult<String> {
    line.split_whitespace()
        .nth(index)
        .map(str::to_string)
        .ok_or_else(|| cursor.mismatch(shape, line))
}

/// Parses `value` as a plain decimal number.
pub(crate) fn parse_number(cursor: &LineCursor, field: &str, value: &str) -> ParseResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| cursor.numeric_error(field, value))
}

/// Consumes the next line and parses it as a plain decimal number.
pub(crate) fn read_number(cursor: &mut LineCursor, field: &str) -> ParseResult<f64> {
    let line = cursor.pop_front()?;
    parse_number(cursor, field, &line)
}

/// Parses `value` as a `MM/DD/YY` date.
pub(crate) fn parse_date(cursor: &LineCursor, field: &str, value: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| cursor.date_error(field, value))
}

/// Consumes a `MM/DD/YY - MM/DD/YY` line and returns both dates.
pub(crate) fn read_date_range(cursor: &mut LineCursor) -> ParseResult<(NaiveDate, NaiveDate)> {
    let line = cursor.pop_front()?;
    let words: Vec<&str> = line.split_whitespace().collect();
    let [begin, _, end] = words.as_slice() else {
        return Err(cursor.mismatch("MM/DD/YY - MM/DD/YY", line.as_str()));
    };
    Ok((
        parse_date(cursor, "period_begin", begin)?,
        parse_date(cursor, "period_end", end)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn cursor(lines: &[&str]) -> LineCursor {
        LineCursor::new("fields.txt", lines.iter().copied())
    }

    #[test]
    fn test_word_at_picks_nth_word() {
        let c = cursor(&[]);
        let word = word_at(&c, "Person Number: 1234567", 2, "Person Number: <n>").unwrap();
        assert_eq!(word, "1234567");
    }

    #[test]
    fn test_word_at_missing_word_is_mismatch() {
        let mut c = cursor(&["Division:"]);
        let line = c.pop_front().unwrap();
        let err = word_at(&c, &line, 1, "Division: <division>").unwrap_err();
        assert_eq!(
            err,
            ParseError::StructuralMismatch {
                document_id: "fields.txt".to_string(),
                line: 1,
                expected: "Division: <division>".to_string(),
                actual: "Division:".to_string(),
            }
        );
    }

    #[test]
    fn test_read_number_accepts_plain_decimal() {
        let mut c = cursor(&["35.00"]);
        assert_eq!(read_number(&mut c, "gross").unwrap(), 35.0);
    }

    #[test]
    fn test_read_number_rejects_currency_suffix() {
        let mut c = cursor(&["x", "35.00 USD"]);
        c.pop_front().unwrap();
        let err = read_number(&mut c, "gross").unwrap_err();
        assert!(matches!(
            err,
            ParseError::NumericFormat { line: 2, ref field, .. } if field == "gross"
        ));
    }

    #[test]
    fn test_read_date_range() {
        let mut c = cursor(&["09/10/23 - 09/16/23"]);
        let (begin, end) = read_date_range(&mut c).unwrap();
        assert_eq!(begin, NaiveDate::from_ymd_opt(2023, 9, 10).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2023, 9, 16).unwrap());
    }

    #[test]
    fn test_read_date_range_wrong_shape_is_mismatch() {
        let mut c = cursor(&["09/10/23"]);
        assert!(matches!(
            read_date_range(&mut c),
            Err(ParseError::StructuralMismatch { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_date_range_bad_date_is_date_format() {
        let mut c = cursor(&["13/40/23 - 09/16/23"]);
        assert!(matches!(
            read_date_range(&mut c),
            Err(ParseError::DateFormat { ref field, .. }) if field == "period_begin"
        ));
    }
}
