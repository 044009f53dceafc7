// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stack-based parser building the component tree from logical lines.
//!
//! 1. On `BEGIN:X`, push a new component onto the stack
//! 2. On any other property, add it to the current component (top of stack)
//! 3. On `END:X`, pop the stack, check the name and append the component to
//!    its parent (or to the top-level list)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::component::{Calendar, Component};
use crate::error::ParseError;
use crate::keyword::{KW_BEGIN, KW_END, KW_VCALENDAR};
use crate::property::parse_content_line;
use crate::reader::{LineReader, LogicalLine};

/// Parse an iCalendar document and return its first top-level `VCALENDAR`.
///
/// ## Errors
///
/// Fails on read errors, malformed content lines, mismatched or unclosed
/// blocks, and when no top-level `VCALENDAR` exists. No partial tree is
/// returned.
///
/// ## Examples
///
/// ```
/// # use calport_ical::parse;
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendar = parse(src.as_bytes()).unwrap();
/// assert_eq!(calendar.events().count(), 1);
/// ```
pub fn parse(reader: impl BufRead) -> Result<Calendar, ParseError> {
    parse_components(reader)?
        .into_iter()
        .find(|component| component.name() == KW_VCALENDAR)
        .ok_or(ParseError::NotFound)?
        .try_into()
}

/// Parse an iCalendar document held in memory.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(src: &str) -> Result<Calendar, ParseError> {
    parse(src.as_bytes())
}

/// Parse the iCalendar file at `path`.
///
/// # Errors
///
/// Returns [`ParseError::Read`] if the file cannot be opened, otherwise see [`parse`].
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Calendar, ParseError> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file))
}

/// Parse a document into its top-level components, in document order.
///
/// # Errors
///
/// Same as [`parse`], except that a missing `VCALENDAR` is not an error.
pub fn parse_components(reader: impl BufRead) -> Result<Vec<Component>, ParseError> {
    let mut roots: Vec<Component> = Vec::new();
    let mut stack: Vec<Component> = Vec::new();

    for line in LineReader::new(reader) {
        let LogicalLine { line, text } = line?;
        if text.trim().is_empty() {
            tracing::trace!(line, "skipping blank line");
            continue;
        }

        let prop = parse_content_line(&text, line)?;
        match prop.name() {
            KW_BEGIN => stack.push(Component::new(prop.value())),

            KW_END => {
                let Some(component) = stack.pop() else {
                    return Err(ParseError::UnexpectedEnd {
                        line,
                        found: prop.value().to_owned(),
                    });
                };

                if component.name() != prop.value() {
                    return Err(ParseError::UnmatchedBlock {
                        line,
                        expected: component.name().to_owned(),
                        found: prop.value().to_owned(),
                    });
                }

                match stack.last_mut() {
                    Some(parent) => parent.add_component(component),
                    None => roots.push(component),
                }
            }

            _ => match stack.last_mut() {
                Some(current) => {
                    current.insert_property(prop);
                }
                None => tracing::debug!(line, name = prop.name(), "ignoring top-level property"),
            },
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedBlock {
            name: open.name().to_owned(),
        });
    }

    tracing::debug!(components = roots.len(), "parsed iCalendar document");
    Ok(roots)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;

    fn components(src: &str) -> Result<Vec<Component>, ParseError> {
        parse_components(src.as_bytes())
    }

    #[test]
    fn parser_simple_calendar() {
        let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
        let roots = components(src).unwrap();

        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), "VCALENDAR");
        assert_eq!(roots[0].properties().len(), 1);
        assert!(roots[0].children().is_empty());
    }

    #[test]
    fn parser_deeply_nested() {
        let src = "BEGIN:VCALENDAR\r\n\
BEGIN:VTIMEZONE\r\n\
BEGIN:STANDARD\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
END:VCALENDAR\r\n";
        let roots = components(src).unwrap();

        let tz = &roots[0].children()[0];
        assert_eq!(tz.name(), "VTIMEZONE");
        assert_eq!(tz.children()[0].name(), "STANDARD");
        assert_eq!(
            tz.children()[0].property("TZNAME").map(|p| p.value()),
            Some("EST")
        );
    }

    #[test]
    fn parser_keeps_sibling_order() {
        let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\nUID:1\nEND:VEVENT\n\
BEGIN:VTODO\nUID:2\nEND:VTODO\n\
BEGIN:VEVENT\nUID:3\nEND:VEVENT\n\
END:VCALENDAR\n";
        let roots = components(src).unwrap();

        let names: Vec<_> = roots[0].children().iter().map(Component::name).collect();
        assert_eq!(names, vec!["VEVENT", "VTODO", "VEVENT"]);
    }

    #[test]
    fn parser_later_duplicate_property_wins() {
        let src = "BEGIN:VEVENT\nSUMMARY:one\nUID:x\nSUMMARY:two\nEND:VEVENT\n";
        let roots = components(src).unwrap();

        assert_eq!(roots[0].properties().len(), 2);
        assert_eq!(
            roots[0].property("SUMMARY").map(|p| p.value()),
            Some("two")
        );
    }

    #[test]
    fn parser_mismatched_end() {
        let src = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nEND:VCALENDAR\n";
        match components(src).unwrap_err() {
            ParseError::UnmatchedBlock {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, "VEVENT");
                assert_eq!(found, "VCALENDAR");
            }
            other => panic!("Expected UnmatchedBlock, got {other:?}"),
        }
    }

    #[test]
    fn parser_end_without_begin() {
        let src = "BEGIN:VCALENDAR\nEND:VCALENDAR\nEND:VCALENDAR\n";
        assert!(matches!(
            components(src),
            Err(ParseError::UnexpectedEnd { line: 3, .. })
        ));
    }

    #[test]
    fn parser_unclosed_begin() {
        let src = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:1\nEND:VEVENT\n";
        match components(src).unwrap_err() {
            ParseError::UnclosedBlock { name } => assert_eq!(name, "VCALENDAR"),
            other => panic!("Expected UnclosedBlock, got {other:?}"),
        }
    }

    #[test]
    fn parser_skips_blank_lines() {
        let src = "BEGIN:VCALENDAR\n\nVERSION:2.0\n   \nEND:VCALENDAR\n\n";
        let roots = components(src).unwrap();
        assert_eq!(roots[0].properties().len(), 1);
    }

    #[test]
    fn parser_malformed_line_aborts() {
        let src = "BEGIN:VCALENDAR\nINVALID LINE\nEND:VCALENDAR\n";
        assert!(matches!(
            components(src),
            Err(ParseError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn parse_returns_first_vcalendar() {
        let src = "BEGIN:X-OTHER\nEND:X-OTHER\n\
BEGIN:VCALENDAR\nX-WR-CALNAME:first\nEND:VCALENDAR\n\
BEGIN:VCALENDAR\nX-WR-CALNAME:second\nEND:VCALENDAR\n";
        let calendar = parse_str(src).unwrap();
        assert_eq!(
            calendar.property("X-WR-CALNAME").map(|p| p.value()),
            Some("first")
        );
    }

    #[test]
    fn parse_without_vcalendar_is_not_found() {
        let src = "BEGIN:VEVENT\nUID:1\nEND:VEVENT\n";
        assert!(matches!(parse_str(src), Err(ParseError::NotFound)));
    }

    #[test]
    fn parse_nested_vcalendar_is_not_top_level() {
        let src = "BEGIN:X-WRAP\nBEGIN:VCALENDAR\nEND:VCALENDAR\nEND:X-WRAP\n";
        assert!(matches!(parse_str(src), Err(ParseError::NotFound)));
    }
}
