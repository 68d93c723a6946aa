//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payslip
//! tools' configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

use super::types::{ArchiveConfig, CalendarConfig, PayslipConfig, ServerConfig};

/// Loads and provides access to configuration.
///
/// # File Layout
///
/// ```text
/// archive:
///   directory: /home/me/payslips
///   file_prefix: Payslip
/// calendar:
///   name: Work
///   title: Shift
///   reminder: 30m
/// server:
///   host: 127.0.0.1
///   port: 3000
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_parser::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payslip.yaml").unwrap();
/// println!("Archiving to {}", loader.archive().directory.display());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayslipConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or mistyped fields
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payslip_parser::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payslip.yaml")?;
    /// # Ok::<(), payslip_parser::error::ConfigError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ConfigError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&path_str, &content)
    }

    /// Parses configuration from YAML text; `origin` names it in errors.
    pub fn from_yaml_str(origin: &str, content: &str) -> ConfigResult<Self> {
        // An empty file deserializes as a unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content).map_err(|e| ConfigError::ConfigParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayslipConfig) -> Self {
        Self { config }
    }

    /// Returns the whole configuration.
    pub fn config(&self) -> &PayslipConfig {
        &self.config
    }

    /// Returns the archive settings.
    pub fn archive(&self) -> &ArchiveConfig {
        &self.config.archive
    }

    /// Returns the calendar settings.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.config.calendar
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}
