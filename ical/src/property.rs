// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Content line grammar: `NAME[;PARAM=VALUE...]:VALUE`.
//!
//! Only the first colon separates the name part from the value, and only the
//! first equal sign separates a parameter name from its value. Quoting is not
//! interpreted.

use std::ops::Range;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::lexer::{SpannedToken, Token, tokenize};

/// Property parameters keyed by name, in first-insertion order.
pub type Parameters = IndexMap<String, String>;

/// A single iCalendar property (name, parameters and raw value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: String,
    params: Parameters,
}

impl Property {
    /// Creates a property without parameters.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "property name must not be empty");
        Self {
            name,
            value: value.into(),
            params: Parameters::new(),
        }
    }

    /// Adds a parameter, replacing the value of an existing one.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(name, value);
        self
    }

    /// Sets a parameter; a duplicate name keeps its position and takes the new value.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), value.into());
    }

    /// Property name as written, e.g. `DTSTART` or `X-FOO`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw property value, possibly empty
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// All parameters
    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Looks up one parameter value
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parses one unfolded content line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedLine`] when the line has no colon, an
    /// empty name, or a parameter without an equal sign.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        parse_content_line(line, 1)
    }
}

impl FromStr for Property {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Byte range of one `;`-separated segment left of the first colon.
#[derive(Debug)]
struct Segment {
    start: usize,
    end: usize,
    equal: Option<usize>,
}

impl Segment {
    const fn at(start: usize) -> Self {
        Self {
            start,
            end: start,
            equal: None,
        }
    }
}

pub(crate) fn parse_content_line(src: &str, line: usize) -> Result<Property, ParseError> {
    let mut segments = Vec::new();
    let mut current = Segment::at(0);
    let mut value_start = None;

    for SpannedToken(token, span) in tokenize(src) {
        match token {
            Token::Colon => {
                current.end = span.start;
                value_start = Some(span.end);
                break;
            }
            Token::Semicolon => {
                current.end = span.start;
                segments.push(current);
                current = Segment::at(span.end);
            }
            Token::Equal => {
                current.equal.get_or_insert(span.start);
            }
            Token::Text(_) => {}
        }
    }

    let Some(value_start) = value_start else {
        return Err(ParseError::malformed(line, "missing ':' between name and value"));
    };
    segments.push(current);

    let mut segments = segments.into_iter();
    let name = segments
        .next()
        .map(|seg| slice(src, seg.start..seg.end))
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ParseError::malformed(line, "empty property name"));
    }

    let mut params = Parameters::new();
    for seg in segments {
        let Some(equal) = seg.equal else {
            let segment = slice(src, seg.start..seg.end);
            return Err(ParseError::malformed(
                line,
                format!("parameter '{segment}' has no '='"),
            ));
        };
        // Later duplicates win
        params.insert(
            slice(src, seg.start..equal).to_owned(),
            slice(src, equal + 1..seg.end).to_owned(),
        );
    }

    Ok(Property {
        name: name.to_owned(),
        value: slice(src, value_start..src.len()).to_owned(),
        params,
    })
}

fn slice(src: &str, range: Range<usize>) -> &str {
    src.get(range).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_params_and_value_with_colons() {
        let prop = Property::parse("X-FOO;A=1;B=2:hello:world").unwrap();

        assert_eq!(prop.name(), "X-FOO");
        assert_eq!(prop.value(), "hello:world");
        assert_eq!(prop.params().len(), 2);
        assert_eq!(prop.param("A"), Some("1"));
        assert_eq!(prop.param("B"), Some("2"));
    }

    #[test]
    fn parses_empty_value() {
        let prop = Property::parse("X-FLAG:").unwrap();
        assert_eq!(prop.name(), "X-FLAG");
        assert_eq!(prop.value(), "");
    }

    #[test]
    fn parameter_value_keeps_extra_equal_signs() {
        let prop = Property::parse("ATTACH;X-Q=a=b=c:data").unwrap();
        assert_eq!(prop.param("X-Q"), Some("a=b=c"));
    }

    #[test]
    fn parameter_value_may_be_empty() {
        let prop = Property::parse("X;P=:v").unwrap();
        assert_eq!(prop.param("P"), Some(""));
    }

    #[test]
    fn duplicate_parameter_last_wins() {
        let prop = Property::parse("DTSTART;TZID=A;VALUE=DATE;TZID=B:20240101").unwrap();
        assert_eq!(prop.param("TZID"), Some("B"));
        let keys: Vec<_> = prop.params().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["TZID", "VALUE"]);
    }

    #[test]
    fn equal_sign_in_value_is_not_a_parameter() {
        let prop = Property::parse("RRULE:FREQ=WEEKLY;BYDAY=MO").unwrap();
        assert_eq!(prop.name(), "RRULE");
        assert_eq!(prop.value(), "FREQ=WEEKLY;BYDAY=MO");
        assert!(prop.params().is_empty());
    }

    #[test]
    fn missing_colon_is_malformed() {
        let err = Property::parse("INVALID LINE").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn parameter_without_equal_is_malformed() {
        let err = Property::parse("DTSTART;TZID:20240101").unwrap_err();
        match err {
            ParseError::MalformedLine { reason, .. } => assert!(reason.contains("TZID")),
            other => panic!("Expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn empty_name_is_malformed() {
        assert!(matches!(
            Property::parse(":value"),
            Err(ParseError::MalformedLine { .. })
        ));
        assert!(matches!(
            Property::parse(";A=1:value"),
            Err(ParseError::MalformedLine { .. })
        ));
    }

    #[test]
    fn from_str_matches_parse() {
        let prop: Property = "LOCATION;LANGUAGE=en:Room 1".parse().unwrap();
        assert_eq!(
            prop,
            Property::new("LOCATION", "Room 1").with_param("LANGUAGE", "en")
        );
    }

    #[test]
    fn line_number_is_reported() {
        let err = parse_content_line("nope", 42).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 42, .. }));
    }
}
