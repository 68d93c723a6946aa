//! Employer and employee identity records.
//!
//! This module defines the [`Company`] and [`Employee`] blocks that open every
//! payslip.

use serde::{Deserialize, Serialize};

/// The employer block at the top of a payslip.
///
/// The legal name is printed across two lines (the second usually carries the
/// tail of the FEIN), followed by a two-line street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// The two lines of the company's legal name.
    pub legal_name_lines: [String; 2],
    /// The two lines of the company's address.
    pub address_lines: [String; 2],
    /// The division code, when the payslip carries one.
    #[serde(default)]
    pub division: Option<String>,
    /// The HR location code, when the payslip carries one.
    #[serde(default)]
    pub hr_location: Option<String>,
}

impl Company {
    /// Returns the legal name with both lines joined.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_parser::models::Company;
    ///
    /// let company = Company {
    ///     legal_name_lines: ["Acme Food Centers, Inc. (FEIN: 12-".to_string(), "3456789)".to_string()],
    ///     address_lines: ["1 Main Street".to_string(), "Springfield OH 45202".to_string()],
    ///     division: None,
    ///     hr_location: None,
    /// };
    /// assert_eq!(company.legal_name(), "Acme Food Centers, Inc. (FEIN: 12-3456789)");
    /// ```
    pub fn legal_name(&self) -> String {
        self.legal_name_lines.concat()
    }
}

/// The employee block of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employer-assigned person number.
    pub employee_number: String,
    /// The employee's name as printed.
    pub name: String,
    /// The two lines of the employee's mailing address.
    pub address_lines: [String; 2],
}
