// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Logical line reader.
//!
//! RFC 5545 wraps long content lines by inserting a line break followed by a
//! single whitespace character. The reader reverses this: every physical line
//! starting with whitespace is appended, without its leading whitespace, to
//! the logical line before it.
//!
//! ```text
//! SUMMARY:Hel       ┐
//!  lo World         ┘ → SUMMARY:Hello World
//! ```
//!
//! An empty physical line is never part of a fold.

use std::io::{self, BufRead};

use crate::error::ParseError;

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the physical line the logical line starts on
    pub line: usize,
    /// The unfolded text, without line terminator
    pub text: String,
}

/// Iterator over the logical lines of a line-oriented source.
///
/// Needs exactly one physical line of lookahead, kept in a single slot. The
/// iterator stops after the first read failure.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    peeked: Option<String>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader over `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
            line_no: 0,
            failed: false,
        }
    }

    /// Reads the next logical line, `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying stream, including invalid UTF-8.
    pub fn next_line(&mut self) -> io::Result<Option<LogicalLine>> {
        let Some(mut text) = self.next_physical()? else {
            return Ok(None);
        };
        let line = self.line_no;

        // An empty physical line neither continues nor starts a fold.
        if text.is_empty() {
            return Ok(Some(LogicalLine { line, text }));
        }

        while matches!(self.peek_physical()?, Some(next) if next.starts_with(char::is_whitespace))
        {
            if let Some(continuation) = self.peeked.take() {
                text.push_str(continuation.trim_start());
            }
        }

        Ok(Some(LogicalLine { line, text }))
    }

    fn next_physical(&mut self) -> io::Result<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_physical(),
        }
    }

    fn peek_physical(&mut self) -> io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_physical()?;
        }
        Ok(self.peeked.as_deref())
    }

    fn read_physical(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        self.line_no += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<LogicalLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_line() {
            Ok(line) => line.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(ParseError::Read(e)))
            }
        }
    }
}
