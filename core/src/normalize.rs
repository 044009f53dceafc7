// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Event normalization: typed fields out of a raw `VEVENT`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use calport_ical::Event;
use jiff::Zoned;
use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::NormalizeError;

/// Event properties that take part in normalization.
///
/// Names are matched exactly as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EventField {
    /// `UID`
    Uid,
    /// `SUMMARY`
    Summary,
    /// `LOCATION`
    Location,
    /// `DESCRIPTION`
    Description,
    /// `SEQUENCE`
    Sequence,
    /// `RRULE`
    Rrule,
    /// `EXRULE`
    Exrule,
    /// `RDATE`
    Rdate,
    /// `EXDATE`
    Exdate,
    /// `DTSTART`
    Dtstart,
    /// `DTEND`
    Dtend,
}

impl EventField {
    /// Property name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Whether the property is carried into the recurrence list.
    #[must_use]
    pub const fn is_recurrence(self) -> bool {
        matches!(self, Self::Rrule | Self::Exrule | Self::Rdate | Self::Exdate)
    }
}

/// Start or end of a normalized event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDateTime {
    /// All-day value without time-of-day or zone.
    Date(Date),

    /// Timestamp in the configured zone.
    DateTime {
        /// The zoned timestamp
        datetime: Zoned,
        /// IANA identifier of the zone, as configured
        timezone: String,
    },
}

impl EventDateTime {
    /// The civil date, whichever variant this is.
    #[must_use]
    pub fn date(&self) -> Date {
        match self {
            Self::Date(date) => *date,
            Self::DateTime { datetime, .. } => datetime.date(),
        }
    }

    /// Timezone identifier, absent for all-day values.
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        match self {
            Self::Date(_) => None,
            Self::DateTime { timezone, .. } => Some(timezone),
        }
    }
}

/// `YYYY-MM-DD` for dates, RFC 3339 with offset for date-times.
impl fmt::Display for EventDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime { datetime, .. } => {
                write!(f, "{}", datetime.strftime("%Y-%m-%dT%H:%M:%S%:z"))
            }
        }
    }
}

/// Google Calendar `EventDateTime` shape: `{"date"}` or `{"dateTime", "timeZone"}`.
impl Serialize for EventDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Date(_) => {
                let mut state = serializer.serialize_struct("EventDateTime", 1)?;
                state.serialize_field("date", &self.to_string())?;
                state.end()
            }
            Self::DateTime { timezone, .. } => {
                let mut state = serializer.serialize_struct("EventDateTime", 2)?;
                state.serialize_field("dateTime", &self.to_string())?;
                state.serialize_field("timeZone", timezone)?;
                state.end()
            }
        }
    }
}

/// An event reduced to the fields a calendar service imports.
///
/// Serializes as a Google Calendar event resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct NormalizedEvent {
    /// `UID`
    #[serde(rename = "iCalUID", skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// `SUMMARY`; events without one are not delivered
    pub summary: String,

    /// `LOCATION`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// `DESCRIPTION`, with literal `\n` turned into newlines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `SEQUENCE`, 0 when absent or not a number
    pub sequence: i64,

    /// Rendered `RRULE`, `EXRULE`, `RDATE` and `EXDATE` lines
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,

    /// `DTSTART`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,

    /// `DTEND`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
}

impl NormalizedEvent {
    /// Whether the event is sent to the calendar service; untitled events are not.
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        !self.summary.is_empty()
    }
}

/// Converts `VEVENT` components into [`NormalizedEvent`]s.
///
/// Every date-time is read in the configured zone. A trailing `Z` or a
/// `TZID` parameter does not change that.
#[derive(Debug, Clone)]
pub struct Normalizer {
    tz: TimeZone,
    tz_name: String,
}

impl Normalizer {
    /// Creates a normalizer for the IANA timezone `timezone`, e.g. `Asia/Tokyo`.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnknownTimeZone`] if the zone cannot be found.
    pub fn new(timezone: impl Into<String>) -> Result<Self, NormalizeError> {
        let tz_name = timezone.into();
        let tz = TimeZone::get(&tz_name).map_err(|source| NormalizeError::UnknownTimeZone {
            name: tz_name.clone(),
            source,
        })?;
        Ok(Self { tz, tz_name })
    }

    /// The configured timezone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.tz_name
    }

    /// Normalizes one event.
    ///
    /// Properties are visited in insertion order, so recurrence lines keep
    /// the order of the document.
    ///
    /// # Errors
    ///
    /// Fails if `DTSTART` or `DTEND` cannot be resolved.
    pub fn normalize(&self, event: Event<'_>) -> Result<NormalizedEvent, NormalizeError> {
        let mut normalized = NormalizedEvent::default();
        for prop in event.component().properties() {
            let Ok(field) = EventField::from_str(prop.name()) else {
                continue;
            };

            let value = prop.value();
            match field {
                EventField::Uid => normalized.uid = Some(value.to_owned()),
                EventField::Summary => normalized.summary = value.to_owned(),
                EventField::Location => normalized.location = Some(value.to_owned()),
                EventField::Description => {
                    normalized.description = Some(value.replace("\\n", "\n"));
                }
                EventField::Sequence => normalized.sequence = parse_sequence(value),
                EventField::Rrule | EventField::Exrule | EventField::Rdate | EventField::Exdate => {
                    normalized.recurrence.push(prop.to_string());
                }
                EventField::Dtstart => normalized.start = Some(self.resolve_datetime(value)?),
                EventField::Dtend => normalized.end = Some(self.resolve_datetime(value)?),
            }
        }
        Ok(normalized)
    }

    /// Resolves a raw `DTSTART`/`DTEND` value.
    ///
    /// `YYYYMMDDTHHMMSS...` becomes a date-time in the configured zone, and
    /// `YYYYMMDD...` becomes an all-day date. Only the prefix is read.
    ///
    /// # Errors
    ///
    /// [`NormalizeError::UnsupportedFormat`] if neither prefix matches, and
    /// [`NormalizeError::InvalidDateTime`] if the digits are out of range.
    pub fn resolve_datetime(&self, value: &str) -> Result<EventDateTime, NormalizeError> {
        const RE_DATETIME: &str = r"^([0-9]{4})([0-9]{2})([0-9]{2})T([0-9]{2})([0-9]{2})([0-9]{2})";
        const RE_DATE: &str = r"^([0-9]{4})([0-9]{2})([0-9]{2})";
        static DATETIME: OnceLock<Regex> = OnceLock::new();
        static DATE: OnceLock<Regex> = OnceLock::new();

        let invalid = |source: jiff::Error| NormalizeError::InvalidDateTime {
            value: value.to_owned(),
            source,
        };

        let datetime = DATETIME.get_or_init(|| Regex::new(RE_DATETIME).unwrap());
        if let Some(captures) = datetime.captures(value) {
            let (_, [year, month, day, hour, minute, second]) = captures.extract();
            let date = civil_date(value, year, month, day)?;
            let time = Time::new(
                digits(value, hour)?,
                digits(value, minute)?,
                digits(value, second)?,
                0,
            )
            .map_err(invalid)?;
            let zoned = date.to_datetime(time).to_zoned(self.tz.clone()).map_err(invalid)?;
            return Ok(EventDateTime::DateTime {
                datetime: zoned,
                timezone: self.tz_name.clone(),
            });
        }

        let date = DATE.get_or_init(|| Regex::new(RE_DATE).unwrap());
        if let Some(captures) = date.captures(value) {
            let (_, [year, month, day]) = captures.extract();
            return Ok(EventDateTime::Date(civil_date(value, year, month, day)?));
        }

        Err(NormalizeError::UnsupportedFormat(value.to_owned()))
    }
}

fn civil_date(value: &str, year: &str, month: &str, day: &str) -> Result<Date, NormalizeError> {
    Date::new(digits(value, year)?, digits(value, month)?, digits(value, day)?).map_err(|source| {
        NormalizeError::InvalidDateTime {
            value: value.to_owned(),
            source,
        }
    })
}

fn digits<N: lexical::FromLexical>(value: &str, field: &str) -> Result<N, NormalizeError> {
    lexical::parse(field).map_err(|_| NormalizeError::UnsupportedFormat(value.to_owned()))
}

fn parse_sequence(value: &str) -> i64 {
    lexical::parse(value).unwrap_or_else(|_| {
        tracing::debug!(value, "SEQUENCE is not an integer, using 0");
        0
    })
}
