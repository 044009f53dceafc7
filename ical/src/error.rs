// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

/// Errors that abort parsing of an iCalendar document.
///
/// Line numbers are 1-based and point at the first physical line of the
/// offending logical line.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying stream reported a failure.
    #[error("failed to read iCalendar source: {0}")]
    Read(#[from] io::Error),

    /// A content line does not follow `NAME[;PARAM=VALUE...]:VALUE`.
    #[error("malformed content line {line}: {reason}")]
    MalformedLine {
        /// Line number of the logical line
        line: usize,
        /// What is wrong with the line
        reason: String,
    },

    /// `END:X` closes a block that was opened with a different name.
    #[error("line {line}: expected END:{expected}, found END:{found}")]
    UnmatchedBlock {
        /// Line number of the END line
        line: usize,
        /// Name of the innermost open block
        expected: String,
        /// Name given on the END line
        found: String,
    },

    /// `END:X` without any open block.
    #[error("line {line}: END:{found} without a matching BEGIN")]
    UnexpectedEnd {
        /// Line number of the END line
        line: usize,
        /// Name given on the END line
        found: String,
    },

    /// The input ended while a block was still open.
    #[error("unexpected end of input: BEGIN:{name} is never closed")]
    UnclosedBlock {
        /// Name of the innermost open block
        name: String,
    },

    /// No top-level `VCALENDAR` component in the document.
    #[error("could not find a top-level VCALENDAR component")]
    NotFound,

    /// A typed view was requested over a component with another name.
    #[error("expected a {expected} component, found {found}")]
    InvalidComponent {
        /// Component name required by the view
        expected: &'static str,
        /// Component name actually present
        found: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}
