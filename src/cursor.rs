//! Single-pass line cursor.
//!
//! [`LineCursor`] owns the lines of one document and hands them out front to
//! back. A consumed line is never seen again, which keeps every parser built
//! on it single-pass. The cursor also knows the document identifier so that
//! the errors it raises can say where things went wrong.

use std::collections::VecDeque;

use crate::error::{ParseError, ParseResult};

/// An owned, front-consuming cursor over the lines of a single document.
///
/// # Example
///
/// ```
/// use payslip_parser::cursor::LineCursor;
///
/// let mut cursor = LineCursor::new("doc", ["Period", "Payment Date"]);
/// assert_eq!(cursor.peek().unwrap(), "Period");
/// assert_eq!(cursor.pop_front().unwrap(), "Period");
/// assert_eq!(cursor.consumed_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LineCursor {
    document_id: String,
    lines: VecDeque<String>,
    consumed: usize,
}

impl LineCursor {
    /// Creates a cursor over `lines`, labelled with `document_id` for diagnostics.
    pub fn new<I, S>(document_id: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            document_id: document_id.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            consumed: 0,
        }
    }

    /// Returns the identifier of the document being read.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Removes and returns the front line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExhaustedInput`] when no lines remain.
    pub fn pop_front(&mut self) -> ParseResult<String> {
        let line = self.lines.pop_front().ok_or_else(|| self.exhausted())?;
        self.consumed += 1;
        Ok(line)
    }

    /// Returns the front line without consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExhaustedInput`] when no lines remain.
    pub fn peek(&self) -> ParseResult<&str> {
        self.lines
            .front()
            .map(String::as_str)
            .ok_or_else(|| self.exhausted())
    }

    /// Looks `n` lines past the front (`peek_nth(0)` is the front line).
    pub fn peek_nth(&self, n: usize) -> Option<&str> {
        self.lines.get(n).map(String::as_str)
    }

    /// Returns how many lines have been consumed so far.
    pub fn consumed_count(&self) -> usize {
        self.consumed
    }

    /// Returns how many lines are left.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when every line has been consumed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if the front line equals `literal`.
    pub fn next_is(&self, literal: &str) -> ParseResult<bool> {
        Ok(self.peek()? == literal)
    }

    /// Returns true if the front line starts with `prefix`.
    pub fn next_starts_with(&self, prefix: &str) -> ParseResult<bool> {
        Ok(self.peek()?.starts_with(prefix))
    }

    /// Returns true if the front line is blank.
    pub fn next_is_blank(&self) -> ParseResult<bool> {
        Ok(self.peek()?.is_empty())
    }

    /// Consumes the front line if it equals `literal`.
    pub fn pop_if(&mut self, literal: &str) -> ParseResult<bool> {
        if self.next_is(literal)? {
            self.pop_front()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the front line, failing unless it equals `expected`.
    pub fn expect_line(&mut self, expected: &str) -> ParseResult<()> {
        let line = self.pop_front()?;
        if line == expected {
            Ok(())
        } else {
            Err(self.mismatch_at(self.consumed, expected, line))
        }
    }

    /// Consumes the front line, failing unless it is blank.
    pub fn expect_blank(&mut self) -> ParseResult<()> {
        self.expect_line("")
    }

    /// Checks, without consuming, that the front line starts with `prefix`.
    pub fn expect_prefix(&self, prefix: &str) -> ParseResult<()> {
        let line = self.peek()?;
        if line.starts_with(prefix) {
            Ok(())
        } else {
            Err(self.mismatch_at(self.consumed + 1, prefix, line))
        }
    }

    /// Builds a [`ParseError::StructuralMismatch`] for the line most recently consumed.
    pub fn mismatch(&self, expected: impl Into<String>, actual: impl Into<String>) -> ParseError {
        self.mismatch_at(self.consumed, expected, actual)
    }

    /// Builds a [`ParseError::StructuralMismatch`] for the line at the front.
    ///
    /// Falls back to [`ParseError::ExhaustedInput`] when there is no such line.
    pub fn mismatch_next(&self, expected: impl Into<String>) -> ParseError {
        match self.peek() {
            Ok(line) => self.mismatch_at(self.consumed + 1, expected, line),
            Err(err) => err,
        }
    }

    /// Builds a [`ParseError::NumericFormat`] for the line most recently consumed.
    pub fn numeric_error(&self, field: &str, value: impl Into<String>) -> ParseError {
        ParseError::NumericFormat {
            document_id: self.document_id.clone(),
            line: self.consumed,
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// Builds a [`ParseError::DateFormat`] for the line most recently consumed.
    pub fn date_error(&self, field: &str, value: impl Into<String>) -> ParseError {
        ParseError::DateFormat {
            document_id: self.document_id.clone(),
            line: self.consumed,
            field: field.to_string(),
            value: value.into(),
        }
    }

    fn mismatch_at(
        &self,
        line: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> ParseError {
        ParseError::StructuralMismatch {
            document_id: self.document_id.clone(),
            line,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    fn exhausted(&self) -> ParseError {
        ParseError::ExhaustedInput {
            document_id: self.document_id.clone(),
            line: self.consumed,
        }
    }
}
