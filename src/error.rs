//! Error types for the payslip parser.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every way a payslip or schedule can fail to parse, plus the errors
//! raised while loading configuration and archiving payslips.

use thiserror::Error;

/// The error type returned by the payslip and schedule parsers.
///
/// Every variant is fatal for the document being parsed. Callers working
/// through a batch are expected to report the error and move on to the
/// next document.
///
/// # Example
///
/// ```
/// use payslip_parser::error::ParseError;
///
/// let error = ParseError::StructuralMismatch {
///     document_id: "payslip.txt".to_string(),
///     line: 6,
///     expected: "Person Number: ".to_string(),
///     actual: "Employee: 1234567".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Expected \"Person Number: \" but found \"Employee: 1234567\" at line 6 of 'payslip.txt'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input ran out of lines before the document was complete.
    #[error("Unexpected end of input after line {line} of '{document_id}'")]
    ExhaustedInput {
        /// The document being parsed.
        document_id: String,
        /// The number of lines consumed when the input ran out.
        line: usize,
    },

    /// A line did not match the literal or prefix required at that position.
    #[error("Expected {expected:?} but found {actual:?} at line {line} of '{document_id}'")]
    StructuralMismatch {
        /// The document being parsed.
        document_id: String,
        /// The 1-based line number of the offending line.
        line: usize,
        /// The literal (or prefix) that was required.
        expected: String,
        /// The text actually found.
        actual: String,
    },

    /// A field documented as a plain decimal number could not be parsed.
    #[error("Invalid number for {field}: {value:?} at line {line} of '{document_id}'")]
    NumericFormat {
        /// The document being parsed.
        document_id: String,
        /// The 1-based line number of the offending line.
        line: usize,
        /// The field that was being read.
        field: String,
        /// The text that failed to parse.
        value: String,
    },

    /// A `MM/DD/YY` date could not be parsed.
    #[error("Invalid date for {field}: {value:?} at line {line} of '{document_id}'")]
    DateFormat {
        /// The document being parsed.
        document_id: String,
        /// The 1-based line number of the offending line.
        line: usize,
        /// The field that was being read.
        field: String,
        /// The text that failed to parse.
        value: String,
    },
}

impl ParseError {
    /// Returns the identifier of the document that failed to parse.
    pub fn document_id(&self) -> &str {
        match self {
            ParseError::ExhaustedInput { document_id, .. }
            | ParseError::StructuralMismatch { document_id, .. }
            | ParseError::NumericFormat { document_id, .. }
            | ParseError::DateFormat { document_id, .. } => document_id,
        }
    }

    /// Returns the 1-based line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::ExhaustedInput { line, .. }
            | ParseError::StructuralMismatch { line, .. }
            | ParseError::NumericFormat { line, .. }
            | ParseError::DateFormat { line, .. } => *line,
        }
    }
}

/// A type alias for Results that return ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while copying a payslip into the archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive directory could not be created.
    #[error("Failed to create archive directory '{path}': {source}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The payslip could not be copied.
    #[error("Failed to copy '{from}' to '{to}': {source}")]
    Copy {
        /// The source file.
        from: String,
        /// The archive destination.
        to: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The archived copy's modification time could not be set.
    #[error("Failed to set modification time of '{path}': {source}")]
    SetModified {
        /// The archived copy.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// A type alias for Results that return ArchiveError.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
