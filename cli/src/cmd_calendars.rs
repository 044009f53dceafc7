// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calport_core::{Config, GoogleCalendarClient};
use clap::{ArgMatches, Command};
use colored::Colorize;

#[derive(Debug, Clone, Copy)]
pub struct CmdCalendars;

impl CmdCalendars {
    pub const NAME: &str = "calendars";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("List the calendars of the Google account")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!("listing calendars...");
        let client = GoogleCalendarClient::new(config.google.clone())?;
        let calendars = client.list_calendars().await?;
        if calendars.is_empty() {
            println!("No calendars found.");
            return Ok(());
        }

        for calendar in &calendars {
            match &calendar.summary {
                Some(summary) => println!("{}  {}", calendar.id, summary.dimmed()),
                None => println!("{}", calendar.id),
            }
        }
        Ok(())
    }
}
