// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Failure to normalize one event.
///
/// Local to the event: callers skip it and continue with the next one.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The value starts with neither `YYYYMMDDTHHMMSS` nor `YYYYMMDD`.
    #[error("unsupported datetime format: {0}")]
    UnsupportedFormat(String),

    /// The digits do not form a valid date or time, e.g. month 13.
    #[error("invalid datetime {value}: {source}")]
    InvalidDateTime {
        /// Raw property value
        value: String,
        /// Underlying parse or conversion failure
        source: jiff::Error,
    },

    /// The configured timezone is not in the IANA database.
    #[error("unknown timezone {name}: {source}")]
    UnknownTimeZone {
        /// Timezone identifier as configured
        name: String,
        /// Lookup failure
        source: jiff::Error,
    },
}

/// Failure to deliver events to the calendar service.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The service answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The request could not be sent or its response not decoded.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The client is misconfigured.
    #[error("configuration error: {0}")]
    Config(String),
}
