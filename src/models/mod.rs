//! Data models produced by the parsers.
//!
//! This module contains the payslip record and its blocks, and the shift
//! record produced by the schedule parser.

mod employee;
mod pay_period;
mod payslip;
mod shift;

pub use employee::{Company, Employee};
pub use pay_period::PayPeriod;
pub use payslip::{
    Distribution, LineItem, PaySummary, PayslipDetails, PayslipDocument, WithholdingElection,
};
pub use shift::Shift;
