//! Pay period model.
//!
//! This module contains the [`PayPeriod`] block: the dates that identify a
//! payslip and the pay frequency and hourly rate printed beside them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The pay period a payslip covers.
///
/// The period dates, payment date and payroll label are the identity fields of
/// a payslip and are present even in a header-only parse. Pay frequency and
/// hourly rate are only read by a full parse.
///
/// # Example
///
/// ```
/// use payslip_parser::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     period_begin: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
///     period_end: NaiveDate::from_ymd_opt(2023, 9, 16).unwrap(),
///     payment_date: NaiveDate::from_ymd_opt(2023, 9, 21).unwrap(),
///     payroll_label: "Retail Weekly Sun-Sat".to_string(),
///     pay_frequency: None,
///     hourly_rate: None,
/// };
///
/// assert!(period.period_begin <= period.period_end);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first day of the period (inclusive).
    pub period_begin: NaiveDate,
    /// The last day of the period (inclusive).
    pub period_end: NaiveDate,
    /// The date the payment was made.
    pub payment_date: NaiveDate,
    /// The payroll label (e.g. "Retail Weekly Sun-Sat").
    pub payroll_label: String,
    /// The pay frequency (e.g. "Weekly").
    #[serde(default)]
    pub pay_frequency: Option<String>,
    /// The hourly rate as printed (e.g. "14.0000 USD").
    #[serde(default)]
    pub hourly_rate: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_weekly_period() -> PayPeriod {
        PayPeriod {
            period_begin: NaiveDate::from_ymd_opt(2023, 9, 10).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 9, 16).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2023, 9, 21).unwrap(),
            payroll_label: "Retail Weekly Sun-Sat".to_string(),
            pay_frequency: Some("Weekly".to_string()),
            hourly_rate: Some("14.0000 USD".to_string()),
        }
    }

    #[test]
    fn test_serialize_pay_period() {
        let period = create_weekly_period();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"period_begin\":\"2023-09-10\""));
        assert!(json.contains("\"payment_date\":\"2023-09-21\""));
        assert!(json.contains("\"pay_frequency\":\"Weekly\""));
    }

    #[test]
    fn test_deserialize_header_only_pay_period() {
        let json = r#"{
            "period_begin": "2023-09-10",
            "period_end": "2023-09-16",
            "payment_date": "2023-09-21",
            "payroll_label": "Retail Weekly Sun-Sat"
        }"#;
        let period: PayPeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.pay_frequency, None);
        assert_eq!(period.hourly_rate, None);
    }
}
