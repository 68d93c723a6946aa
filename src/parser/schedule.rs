//! Weekly schedule parser.
//!
//! Turns the tokens scraped from a weekly schedule view into [`Shift`]s.
//! Each day starts with a day name and a day-of-month number, followed by
//! free-text tokens up to the next day name. Time ranges become shifts;
//! everything else (holiday captions, "You have nothing planned.", job
//! location codes) is skipped.

use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::cursor::LineCursor;
use crate::error::ParseResult;
use crate::models::Shift;

/// Document identifier used in schedule parse errors.
pub const SCHEDULE_DOCUMENT_ID: &str = "schedule";

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Matches "1:15 PM-8:00 PM [6.75]"; the bracketed hours are optional.
static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<fr_hh>\d{1,2}):(?P<fr_mm>\d{1,2}) (?P<fr_ampm>[AP]M)-(?P<to_hh>\d{1,2}):(?P<to_mm>\d{1,2}) (?P<to_ampm>[AP]M)(?: \[(?P<hours>\d+(?:\.\d+)?)\])?",
    )
    .unwrap()
});

/// Parses schedule tokens into shifts.
///
/// `anchor_date` supplies the year and month of the first day listed. Each
/// time a later day number is `1` the month advances, so a schedule that runs
/// across a month end gets the right dates. A shift identical to the one
/// before it (the view renders the current day twice) is dropped.
///
/// # Errors
///
/// - [`ParseError::ExhaustedInput`](crate::error::ParseError::ExhaustedInput) if a day name is not followed by a day number
/// - [`ParseError::NumericFormat`](crate::error::ParseError::NumericFormat) if a day number is not an integer or
///   puts the date out of range
///
/// # Example
///
/// ```
/// use payslip_parser::parser::parse_schedule;
/// use chrono::NaiveDate;
///
/// let tokens = ["Sun", "26", "1:00 PM-7:30 PM [6.50]", "Mon", "27", "You have nothing planned."];
/// let shifts = parse_schedule(tokens, NaiveDate::from_ymd_opt(2023, 9, 25).unwrap()).unwrap();
/// assert_eq!(shifts.len(), 1);
/// assert_eq!(shifts[0].duration_minutes, 390);
/// ```
pub fn parse_schedule<I, S>(tokens: I, anchor_date: NaiveDate) -> ParseResult<Vec<Shift>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut cursor = LineCursor::new(SCHEDULE_DOCUMENT_ID, tokens);
    let mut month_start = anchor_date - Duration::days(i64::from(anchor_date.day0()));
    let mut shifts: Vec<Shift> = Vec::new();
    let mut first_day = true;

    while !cursor.is_empty() {
        let day_name = cursor.pop_front()?;
        let token = cursor.pop_front()?;
        let day_number: u32 = token
            .trim()
            .parse()
            .map_err(|_| cursor.numeric_error("day_number", token.as_str()))?;

        if !first_day && day_number == 1 {
            month_start = month_start
                .checked_add_months(Months::new(1))
                .ok_or_else(|| cursor.numeric_error("day_number", token.as_str()))?;
            debug!(month = %month_start.format("%Y-%m"), "Schedule rolled into next month");
        }
        first_day = false;
        let date = month_start
            .checked_add_signed(Duration::days(i64::from(day_number) - 1))
            .ok_or_else(|| cursor.numeric_error("day_number", token.as_str()))?;

        while !cursor.is_empty() && !DAY_NAMES.contains(&cursor.peek()?) {
            let token = cursor.pop_front()?;
            if token == "Today" {
                continue;
            }
            match parse_shift(&day_name, day_number, date, &token) {
                Some(shift) if shifts.last() == Some(&shift) => {
                    debug!(day = %day_name, day_number, token = %token, "Ignoring repeated shift");
                }
                Some(shift) => shifts.push(shift),
                None => debug!(day = %day_name, day_number, token = %token, "Skipping non-shift token"),
            }
        }
    }

    Ok(shifts)
}

/// Parses a single time-range token into a shift on `date`.
///
/// Returns `None` if the token is not a time range. `12:xx AM` is just after
/// midnight, and a range that ends at or before its start runs past midnight.
pub fn parse_shift(day_name: &str, day_number: u32, date: NaiveDate, token: &str) -> Option<Shift> {
    let caps = TIME_RANGE.captures(token)?;
    let from = minutes_since_midnight(&caps["fr_hh"], &caps["fr_mm"], &caps["fr_ampm"])?;
    let to = minutes_since_midnight(&caps["to_hh"], &caps["to_mm"], &caps["to_ampm"])?;

    let mut duration_minutes = to - from;
    if duration_minutes <= 0 {
        duration_minutes += MINUTES_PER_DAY;
    }

    Some(Shift {
        day_name: day_name.to_string(),
        day_number,
        start_instant: date.and_time(NaiveTime::MIN) + Duration::minutes(from),
        duration_minutes,
        raw_time_range: token.to_string(),
        scheduled_hours: caps
            .name("hours")
            .and_then(|m| Decimal::from_str(m.as_str()).ok()),
    })
}

fn minutes_since_midnight(hh: &str, mm: &str, ampm: &str) -> Option<i64> {
    let hh: i64 = hh.parse().ok()?;
    let mm: i64 = mm.parse().ok()?;
    if !(1..=12).contains(&hh) || mm > 59 {
        return None;
    }
    let hh = if ampm == "PM" { hh % 12 + 12 } else { hh % 12 };
    Some(hh * 60 + mm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_today_row_duplicate_is_collapsed() {
        let tokens = [
            "Sat",
            "25",
            "Today",
            "12:00 PM-4:30 PM [4.50]",
            "12:00 PM-4:30 PM [4.50]",
            "0660/03/00054/E-Commerce/E-Commerce Clerk",
            "Sun",
            "26",
            "1:00 PM-7:30 PM [6.50]",
        ];
        let shifts = parse_schedule(tokens, date(2023, 9, 25)).unwrap();

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].start_instant, at("2023-09-25 12:00"));
        assert_eq!(shifts[0].duration_minutes, 270);
        assert_eq!(shifts[0].scheduled_hours, Some(Decimal::new(450, 2)));
        assert_eq!(shifts[1].day_name, "Sun");
        assert_eq!(shifts[1].day_number, 26);
        assert_eq!(shifts[1].start_instant, at("2023-09-26 13:00"));
        assert_eq!(shifts[1].duration_minutes, 390);
    }

    #[test]
    fn test_full_week_with_split_day_and_empty_days() {
        let tokens = [
            "Sat", "25", "Today", "12:00 PM-4:30 PM [4.50]", "12:00 PM-4:30 PM [4.50]",
            "0660/03/00054/E-Commerce/E-Commerce Clerk",
            "Sun", "26", "1:00 PM-7:30 PM [6.50]",
            "Mon", "27", "9:00 AM-12:00 PM [3.00]",
            "Mon", "27", "3:45 PM-7:45 PM [4.00]",
            "Tue", "28", "9:15 AM-3:00 PM [5.75]",
            "Wed", "29", "You have nothing planned.",
            "Thu", "30", "You have nothing planned.",
            "Fri", "31", "12:00 PM-4:30 PM [4.50]",
        ];
        let shifts = parse_schedule(tokens, date(2023, 3, 25)).unwrap();

        assert_eq!(shifts.len(), 6);
        assert_eq!(shifts[2].start_instant, at("2023-03-27 09:00"));
        assert_eq!(shifts[2].duration_minutes, 180);
        assert_eq!(shifts[3].start_instant, at("2023-03-27 15:45"));
        assert_eq!(shifts[4].duration_minutes, 345);
        assert_eq!(shifts[5].start_instant, at("2023-03-31 12:00"));
    }

    #[test]
    fn test_holiday_captions_are_skipped() {
        let tokens = [
            "Thu", "4", "Today", "Independence Day", "Independence Day for Calc",
            "3:00 PM-7:30 PM [4.50]", "3:00 PM-7:30 PM [4.50]",
            "0660/03/00054/E-Commerce/E-Commerce Clerk",
            "Fri", "5", "12:00 PM-5:00 PM [5.00]",
            "Sat", "6", "You have nothing planned.",
        ];
        let shifts = parse_schedule(tokens, date(2024, 7, 4)).unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].start_instant, at("2024-07-04 15:00"));
        assert_eq!(shifts[1].start_instant, at("2024-07-05 12:00"));
    }

    #[test]
    fn test_month_rolls_over_once_at_day_one() {
        let tokens = [
            "Thu", "30", "9:00 AM-10:00 AM",
            "Fri", "31", "9:00 AM-10:00 AM",
            "Sat", "1", "9:00 AM-10:00 AM",
            "Sun", "2", "9:00 AM-10:00 AM",
        ];
        let shifts = parse_schedule(tokens, date(2023, 3, 30)).unwrap();
        let dates: Vec<NaiveDate> = shifts.iter().map(|s| s.start_instant.date()).collect();
        assert_eq!(
            dates,
            vec![date(2023, 3, 30), date(2023, 3, 31), date(2023, 4, 1), date(2023, 4, 2)]
        );
    }

    #[test]
    fn test_december_rolls_into_january() {
        let tokens = ["Sun", "31", "9:00 AM-5:00 PM", "Mon", "1", "9:00 AM-5:00 PM"];
        let shifts = parse_schedule(tokens, date(2023, 12, 31)).unwrap();
        assert_eq!(shifts[1].start_instant, at("2024-01-01 09:00"));
    }

    #[test]
    fn test_first_day_of_one_does_not_roll() {
        let tokens = ["Fri", "1", "9:00 AM-5:00 PM"];
        let shifts = parse_schedule(tokens, date(2023, 9, 1)).unwrap();
        assert_eq!(shifts[0].start_instant, at("2023-09-01 09:00"));
    }

    #[test]
    fn test_non_numeric_day_number() {
        let err = parse_schedule(["Sat", "Today"], date(2023, 9, 25)).unwrap_err();
        assert!(matches!(err, ParseError::NumericFormat { line: 2, .. }));
    }

    #[test]
    fn test_oversized_day_number_is_numeric_error() {
        let err = parse_schedule(["Sat", "4000000000", "9:00 AM-5:00 PM"], date(2023, 9, 25))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::NumericFormat {
                document_id: SCHEDULE_DOCUMENT_ID.to_string(),
                line: 2,
                field: "day_number".to_string(),
                value: "4000000000".to_string(),
            }
        );
    }

    #[test]
    fn test_rollover_past_last_date_is_numeric_error() {
        let err = parse_schedule(["Sat", "31", "Sun", "1"], NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, ParseError::NumericFormat { line: 4, .. }));
    }

    #[test]
    fn test_day_name_without_number_is_exhausted() {
        let err = parse_schedule(["Sat"], date(2023, 9, 25)).unwrap_err();
        assert_eq!(
            err,
            ParseError::ExhaustedInput {
                document_id: SCHEDULE_DOCUMENT_ID.to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_empty_schedule() {
        let tokens: [&str; 0] = [];
        assert!(parse_schedule(tokens, date(2023, 9, 25)).unwrap().is_empty());
    }

    #[test]
    fn test_parse_shift_midnight_and_overnight() {
        let d = date(2023, 9, 25);
        let early = parse_shift("Mon", 25, d, "12:30 AM-6:00 AM").unwrap();
        assert_eq!(early.start_instant, at("2023-09-25 00:30"));
        assert_eq!(early.duration_minutes, 330);

        let overnight = parse_shift("Mon", 25, d, "10:00 PM-2:00 AM").unwrap();
        assert_eq!(overnight.duration_minutes, 240);
        assert_eq!(overnight.end_instant(), at("2023-09-26 02:00"));
        assert_eq!(overnight.scheduled_hours, None);
    }

    #[test]
    fn test_parse_shift_rejects_other_text() {
        let d = date(2023, 9, 25);
        assert!(parse_shift("Mon", 25, d, "You have nothing planned.").is_none());
        assert!(parse_shift("Mon", 25, d, "13:00 PM-4:00 PM").is_none());
        assert!(parse_shift("Mon", 25, d, "9:75 AM-4:00 PM").is_none());
    }

    proptest! {
        #[test]
        fn duration_is_within_one_day(
            fh in 1i64..=12, fm in 0i64..60, fp in proptest::bool::ANY,
            th in 1i64..=12, tm in 0i64..60, tp in proptest::bool::ANY,
        ) {
            let ampm = |pm: bool| if pm { "PM" } else { "AM" };
            let token = format!("{}:{:02} {}-{}:{:02} {}", fh, fm, ampm(fp), th, tm, ampm(tp));
            let shift = parse_shift("Mon", 1, date(2024, 1, 1), &token).unwrap();
            prop_assert!(shift.duration_minutes > 0);
            prop_assert!(shift.duration_minutes <= MINUTES_PER_DAY);
            prop_assert_eq!(shift.start_instant.date(), date(2024, 1, 1));
        }
    }
}
