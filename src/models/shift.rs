//! Shift model.
//!
//! This module defines the [`Shift`] struct for one scheduled work interval
//! read from a weekly schedule view.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A scheduled work shift.
///
/// Equality only looks at the start instant and the duration: the schedule
/// view renders the current day twice, and two rows that start at the same
/// moment and last as long are the same shift regardless of their labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// The day name as printed (e.g. "Sat").
    pub day_name: String,
    /// The day of month as printed.
    pub day_number: u32,
    /// When the shift starts.
    pub start_instant: NaiveDateTime,
    /// How long the shift lasts, in minutes.
    pub duration_minutes: i64,
    /// The time range as printed (e.g. "12:00 PM-4:30 PM [4.50]").
    pub raw_time_range: String,
    /// The bracketed paid hours, when printed.
    #[serde(default)]
    pub scheduled_hours: Option<Decimal>,
}

impl PartialEq for Shift {
    fn eq(&self, other: &Self) -> bool {
        self.start_instant == other.start_instant && self.duration_minutes == other.duration_minutes
    }
}

impl Eq for Shift {}

impl Shift {
    /// Returns when the shift ends.
    pub fn end_instant(&self) -> NaiveDateTime {
        self.start_instant + Duration::minutes(self.duration_minutes)
    }

    /// Returns the length of the shift in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_parser::models::Shift;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     day_name: "Sat".to_string(),
    ///     day_number: 25,
    ///     start_instant: NaiveDateTime::parse_from_str("2023-09-25 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     duration_minutes: 270,
    ///     raw_time_range: "12:00 PM-4:30 PM [4.50]".to_string(),
    ///     scheduled_hours: Some(Decimal::new(450, 2)),
    /// };
    /// assert_eq!(shift.worked_hours(), Decimal::new(45, 1)); // 4.5 hours
    /// ```
    pub fn worked_hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes, 0) / Decimal::new(60, 0)
    }
}
