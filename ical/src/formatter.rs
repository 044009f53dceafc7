// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! Writes a component tree back to text: `BEGIN`, the properties in
//! insertion order, the children in document order, then `END`. Long lines
//! are written as they are, without folding.
//!
//! # Example
//!
//! ```
//! use calport_ical::{Calendar, Event, format};
//!
//! let mut calendar = Calendar::new();
//! let mut event = Event::new_component();
//! event.add_property("SUMMARY", "Team Sync");
//! calendar.add_event(event).unwrap();
//!
//! let ics = format(&calendar);
//! assert!(ics.contains("BEGIN:VEVENT\r\nSUMMARY:Team Sync\r\nEND:VEVENT\r\n"));
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::component::Component;
use crate::keyword::{KW_BEGIN, KW_END};
use crate::property::Property;

/// Convenience function to format a component tree to a `String` (uses default options).
#[must_use]
pub fn format(component: &Component) -> String {
    FormatOptions::default().write_to_string(component)
}

/// Line terminator written after each content line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// CRLF (RFC 5545 default)
    #[default]
    CrLf,
    /// LF
    Lf,
}

impl LineEnding {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Line terminator.
    ///
    /// Default: `LineEnding::CrLf`.
    pub line_ending: LineEnding,
}

impl FormatOptions {
    /// Set the line terminator.
    #[must_use]
    pub const fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Write a component tree to any `Write` implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, component: &Component, w: &mut impl Write) -> io::Result<()> {
        write_component(w, component, self.line_ending.as_str())
    }

    /// Write a component tree to a `String`.
    #[must_use]
    pub fn write_to_string(&self, component: &Component) -> String {
        let mut buffer = String::new();
        render(&mut buffer, component, self.line_ending.as_str());
        buffer
    }
}

// Components are nested as deep as the data says; the explicit stack keeps
// deep documents from exhausting the call stack.
fn write_component(w: &mut impl Write, root: &Component, eol: &str) -> io::Result<()> {
    enum Step<'a> {
        Open(&'a Component),
        Close(&'a Component),
    }

    let mut steps = vec![Step::Open(root)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Open(component) => {
                write!(w, "{KW_BEGIN}:{}{eol}", component.name())?;
                for prop in component.properties() {
                    write!(w, "{prop}{eol}")?;
                }
                steps.push(Step::Close(component));
                steps.extend(component.children().iter().rev().map(Step::Open));
            }
            Step::Close(component) => write!(w, "{KW_END}:{}{eol}", component.name())?,
        }
    }
    Ok(())
}

fn render(buffer: &mut String, component: &Component, eol: &str) {
    let mut bytes = Vec::new();
    // Writing into a Vec cannot fail, and every piece written is a &str.
    if write_component(&mut bytes, component, eol).is_ok() {
        buffer.push_str(&String::from_utf8_lossy(&bytes));
    }
}

/// Single-line rendering: `NAME[;PARAM=VALUE...][:VALUE]`.
///
/// An empty value omits the colon.
impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for (name, value) in self.params() {
            write!(f, ";{name}={value}")?;
        }
        if !self.value().is_empty() {
            write!(f, ":{}", self.value())?;
        }
        Ok(())
    }
}
