// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn file() -> Arg {
        arg!(file: <FILE> "Path to the iCalendar (.ics) file")
            .value_parser(value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath)
    }

    pub fn get_file(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("file")
            .cloned()
            .unwrap_or_default()
    }

    pub fn timezone() -> Arg {
        arg!(-z --timezone <TZ> "Timezone used to read event times, e.g. Asia/Tokyo").long_help(
            "\
IANA timezone used to read every DTSTART and DTEND, e.g. Asia/Tokyo. Overrides the configured \
timezone. A trailing Z or a TZID parameter on the value is not taken into account.",
        )
    }

    pub fn get_timezone(matches: &ArgMatches) -> Option<String> {
        matches.get_one("timezone").cloned()
    }
}
