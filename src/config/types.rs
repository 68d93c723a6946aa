//! Configuration types for the payslip tools.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and
//! field has a default, so a partial file (or an empty one) is valid.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayslipConfig {
    /// Where archived payslips are copied to and how they are named.
    pub archive: ArchiveConfig,
    /// Target calendar for shift events.
    pub calendar: CalendarConfig,
    /// HTTP server binding.
    pub server: ServerConfig,
}

/// Archive destination settings.
///
/// Archived copies are named `<file_prefix>-YYYY-MM-DD.<ext>` after the
/// payment date of the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// The directory archived payslips are copied into.
    pub directory: PathBuf,
    /// The file name prefix for archived copies.
    pub file_prefix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("payslips"),
            file_prefix: "Payslip".to_string(),
        }
    }
}

/// Calendar event settings used when exporting shifts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// The name of the calendar events are added to.
    pub name: String,
    /// The title given to each shift event.
    pub title: String,
    /// The reminder offset, e.g. `30m`.
    pub reminder: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            name: "Work".to_string(),
            title: "Shift".to_string(),
            reminder: "30m".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The interface to bind.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` address to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
