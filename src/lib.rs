//! Payslip text parser
//!
//! This crate parses the text of employer payslip statements into typed
//! records, and the tokens of weekly schedule views into shifts.
//!
//! - [`cursor`]: the single-pass line cursor both parsers are built on
//! - [`parser`]: payslip and schedule parsers
//! - [`render`]: summary tables, CSV, archive naming and calendar commands
//! - [`api`]: the HTTP API
//!
//! # Example
//!
//! ```
//! use payslip_parser::parser::parse_payslip_text;
//!
//! let text = include_str!("../tests/fixtures/payslip_standard.txt");
//! let document = parse_payslip_text("payslip_standard.txt", text, false).unwrap();
//! let summary = document.summary().unwrap();
//! assert_eq!(summary.gross, 35.0);
//! assert_eq!(summary.total_hours_worked, 2.5);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod cursor;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;
