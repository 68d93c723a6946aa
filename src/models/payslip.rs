//! The parsed payslip record.
//!
//! [`PayslipDocument`] is what the payslip parser returns. The identity blocks
//! (company, employee, pay period) are always present; everything after the
//! payroll label lives in [`PayslipDetails`] and is absent for a header-only
//! parse.

use serde::{Deserialize, Serialize};

use super::employee::{Company, Employee};
use super::pay_period::PayPeriod;

/// Withholding election (W4) data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingElection {
    /// The lines under the "Type" heading, e.g. `FEDERAL_2020`, `AZ`.
    pub jurisdiction_lines: Vec<String>,
    /// The marital status as printed.
    pub marital_status: Option<String>,
    /// Exemptions, one per jurisdiction column.
    pub exemptions: Option<[String; 2]>,
    /// Additional withholding amounts, one per jurisdiction column.
    pub additional_amount: Option<[String; 2]>,
}

/// One row of an earnings or tax-deduction table.
///
/// Amounts are kept exactly as printed. A column that stopped short of this
/// row leaves the corresponding amount unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The row label (e.g. "Regular Pay", "Medicare").
    pub name: String,
    /// The current-period amount.
    pub current_amount: Option<String>,
    /// The year-to-date amount.
    pub ytd_amount: Option<String>,
}

impl LineItem {
    /// Creates a row with no amounts yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_amount: None,
            ytd_amount: None,
        }
    }
}

/// The earnings summary block.
///
/// Only `gross`, `net_pay`, `total_hours_worked` and `sick_hours_available` are
/// numeric; the other amounts mix currency-labelled and bare figures and are
/// kept as printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaySummary {
    /// Gross earnings for the period.
    pub gross: f64,
    /// Gross earnings year to date.
    pub gross_ytd: String,
    /// Non-payroll amount for the period.
    pub non_payroll: String,
    /// Non-payroll amount year to date.
    pub non_payroll_ytd: String,
    /// Pretax deductions for the period.
    pub pretax_deductions: String,
    /// Pretax deductions year to date.
    pub pretax_deductions_ytd: String,
    /// Tax deductions subtotal for the period.
    pub tax_deductions: Option<String>,
    /// Tax deductions subtotal year to date.
    pub tax_deductions_ytd: Option<String>,
    /// After-tax deductions for the period.
    pub after_tax_deduction: Option<String>,
    /// After-tax deductions year to date.
    pub after_tax_deduction_ytd: Option<String>,
    /// Net pay for the period.
    pub net_pay: f64,
    /// Net pay year to date.
    pub net_pay_ytd: String,
    /// Total hours worked in the period.
    pub total_hours_worked: f64,
    /// Sick hours available, when printed.
    pub sick_hours_available: Option<f64>,
}

/// One net-pay distribution row (where the money went).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// The payment method (e.g. "Direct Deposit").
    pub payment_method: String,
    /// The receiving bank.
    pub bank_name: Option<String>,
    /// The bank branch or routing number.
    pub branch: Option<String>,
    /// The account type (e.g. "Checking").
    pub account_type: Option<String>,
    /// The payment reference (usually a masked account number).
    pub payment_reference: Option<String>,
    /// The amount paid through this method.
    pub payment_amount: Option<String>,
}

impl Distribution {
    /// Creates a row with only the payment method filled in.
    pub fn with_method(payment_method: impl Into<String>) -> Self {
        Self {
            payment_method: payment_method.into(),
            bank_name: None,
            branch: None,
            account_type: None,
            payment_reference: None,
            payment_amount: None,
        }
    }
}

/// Everything on a payslip after the identity blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipDetails {
    /// Withholding election data.
    pub withholding: WithholdingElection,
    /// Earnings summary.
    pub summary: PaySummary,
    /// Itemized earnings.
    pub earnings: Vec<LineItem>,
    /// Itemized tax deductions.
    pub tax_deductions: Vec<LineItem>,
    /// Net-pay distributions.
    pub distributions: Vec<Distribution>,
}

/// A parsed payslip.
///
/// # Example
///
/// ```
/// use payslip_parser::parser::parse_payslip_text;
///
/// let text = "\
/// Acme Food Centers, Inc. (FEIN: 12-
/// 3456789)
/// 1 Main Street
/// Springfield OH 45202
///
/// Person Number: 1234567
/// John Doe
/// 125 N. Main Street
/// Anytown US 12345
///
/// Period
/// Payment Date
/// Payroll
///
/// Pay Frequency
///
/// 09/10/23 - 09/16/23
/// 09/21/23
/// Retail Weekly Sun-Sat
/// ";
/// let doc = parse_payslip_text("payslip.txt", text, true).unwrap();
/// assert!(doc.is_header_only());
/// assert_eq!(doc.employee.employee_number, "1234567");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipDocument {
    /// The identifier the document was parsed under (usually its file name).
    pub document_id: String,
    /// The employer block.
    pub company: Company,
    /// The employee block.
    pub employee: Employee,
    /// The pay period block.
    pub pay_period: PayPeriod,
    /// Financial detail; `None` for a header-only parse.
    pub details: Option<PayslipDetails>,
}

impl PayslipDocument {
    /// Returns true if the document was parsed in header-only mode.
    pub fn is_header_only(&self) -> bool {
        self.details.is_none()
    }

    /// Returns the earnings summary of a fully parsed document.
    pub fn summary(&self) -> Option<&PaySummary> {
        self.details.as_ref().map(|d| &d.summary)
    }
}
