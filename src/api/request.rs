//! Request types for the payslip parser API.
//!
//! This module defines the JSON request bodies for the `/payslip`,
//! `/schedule` and `/archive-name` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request body for the `/payslip` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// Identifier used in error messages (usually the source file name).
    pub document_id: String,
    /// The payslip text, one printed line per line.
    pub text: String,
    /// Stop after the pay period block.
    #[serde(default)]
    pub header_only: bool,
}

/// Request body for the `/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// The schedule tokens in display order.
    pub tokens: Vec<String>,
    /// A date in the month the schedule starts in.
    pub anchor_date: NaiveDate,
}

/// Request body for the `/archive-name` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveNameRequest {
    /// Identifier used in error messages.
    pub document_id: String,
    /// The payslip text; only the header is read.
    pub text: String,
    /// Extension of the archived file.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    "pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payslip_request_header_only_defaults_to_false() {
        let req: PayslipRequest =
            serde_json::from_str(r#"{"document_id": "a.txt", "text": ""}"#).unwrap();
        assert!(!req.header_only);
    }

    #[test]
    fn test_schedule_request_parses_anchor_date() {
        let req: ScheduleRequest =
            serde_json::from_str(r#"{"tokens": ["Sat", "25"], "anchor_date": "2023-09-25"}"#)
                .unwrap();
        assert_eq!(req.anchor_date, NaiveDate::from_ymd_opt(2023, 9, 25).unwrap());
        assert_eq!(req.tokens.len(), 2);
    }

    #[test]
    fn test_archive_name_request_default_extension() {
        let req: ArchiveNameRequest =
            serde_json::from_str(r#"{"document_id": "a.txt", "text": ""}"#).unwrap();
        assert_eq!(req.extension, "pdf");
    }
}
