// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use calport_core::{Config, normalize_calendar};
use clap::{ArgMatches, Command};
use colored::Colorize;

use crate::arg::CommonArgs;
use crate::util::{build_normalizer, read_calendar, write_events};

#[derive(Debug, Clone)]
pub struct CmdShow {
    pub file: PathBuf,
    pub timezone: Option<String>,
}

impl CmdShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the normalized events of an iCalendar file as JSON lines")
            .arg(CommonArgs::file())
            .arg(CommonArgs::timezone())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: CommonArgs::get_file(matches),
            timezone: CommonArgs::get_timezone(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing events...");
        let calendar = read_calendar(&self.file)?;
        let normalizer = build_normalizer(self.timezone.as_deref(), config)?;

        let mut events = Vec::new();
        for (index, result) in normalize_calendar(&calendar, &normalizer).into_iter().enumerate() {
            match result {
                Ok(event) => events.push(event),
                Err(e) => eprintln!("{} event #{}: {}", "Warning:".yellow(), index + 1, e),
            }
        }
        write_events(&mut io::stdout().lock(), &events)
    }
}
