// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of calport.

mod arg;
mod cli;
mod cmd_calendars;
mod cmd_format;
mod cmd_generate_completion;
mod cmd_import;
mod cmd_show;
mod config;
mod prompt;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::parse_config;
