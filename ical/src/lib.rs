// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read, represent and write iCalendar components and properties.
//!
//! The crate works on the generic block structure of RFC 5545 documents:
//!
//! ```text
//! raw text → LineReader → logical lines → Property::parse → parser stack → Component tree
//! ```
//!
//! Property values are kept as raw strings; typed interpretation is left to
//! the consumer.

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

mod component;
mod error;
pub mod formatter;
pub mod keyword;
pub mod lexer;
mod parser;
mod property;
pub mod reader;

pub use crate::component::{Calendar, Component, Event};
pub use crate::error::ParseError;
pub use crate::formatter::{FormatOptions, LineEnding, format};
pub use crate::parser::{parse, parse_components, parse_file, parse_str};
pub use crate::property::{Parameters, Property};
pub use crate::reader::{LineReader, LogicalLine};
