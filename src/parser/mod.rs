//! Parsers for payslip text and weekly schedules.
//!
//! Both parsers are built on [`LineCursor`](crate::cursor::LineCursor) and
//! read their input exactly once, front to back.
//!
//! # Example
//!
//! ```
//! use payslip_parser::parser::parse_payslip_text;
//!
//! let text = include_str!("../../tests/fixtures/payslip_standard.txt");
//! let document = parse_payslip_text("payslip_standard.txt", text, false).unwrap();
//! assert_eq!(document.employee.employee_number, "1234567");
//! ```

mod columns;
mod fields;
mod payslip;
mod schedule;
mod sections;

pub use payslip::{parse_payslip, parse_payslip_text};
pub use schedule::{parse_schedule, parse_shift, SCHEDULE_DOCUMENT_ID};
