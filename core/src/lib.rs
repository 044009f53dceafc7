// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Turns parsed iCalendar events into normalized records and delivers them
//! to a calendar service.
//!
//! ```text
//! Calendar → Normalizer → NormalizedEvent → EventImporter (Google Calendar)
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::module_name_repetitions, clippy::single_match_else)]

mod config;
mod error;
mod google;
mod import;
mod normalize;

pub use crate::config::{APP_NAME, Config, GOOGLE_TOKEN_ENV, GoogleConfig};
pub use crate::error::{ImportError, NormalizeError};
pub use crate::google::{CalendarListEntry, GoogleCalendarClient};
pub use crate::import::{EventImporter, ImportReport, import_calendar, normalize_calendar};
pub use crate::normalize::{EventDateTime, EventField, NormalizedEvent, Normalizer};
