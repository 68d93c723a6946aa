//! Output produced from parsed payslips and schedules.
//!
//! - [`summary`]: one-line-per-payslip text tables and CSV
//! - [`archive`]: naming and copying payslips into the archive directory
//! - [`calendar`]: calendar commands for scheduled shifts

pub mod archive;
pub mod calendar;
pub mod summary;

pub use archive::{archive_document, archive_file_name};
pub use calendar::{calendar_command, shell_join};
pub use summary::{csv_header, SummaryRow, SummaryTable};
