//! Configuration loading for the payslip tools.
//!
//! This module loads the archive, calendar and server settings from a single
//! YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payslip_parser::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payslip.yaml").unwrap();
//! println!("Calendar: {}", config.calendar().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ArchiveConfig, CalendarConfig, PayslipConfig, ServerConfig};
