// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::PathBuf};

use calport_core::{
    Config, GoogleCalendarClient, ImportReport, NormalizedEvent, import_calendar,
    normalize_calendar,
};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::arg::CommonArgs;
use crate::prompt::prompt_calendar;
use crate::util::{build_normalizer, read_calendar, write_events};

#[derive(Debug, Clone)]
pub struct CmdImport {
    pub file: PathBuf,
    pub calendar: Option<String>,
    pub timezone: Option<String>,
    pub dry_run: bool,
}

impl CmdImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Import the events of an iCalendar file into Google Calendar")
            .arg(CommonArgs::file())
            .arg(
                arg!(--calendar <ID> "Calendar to import into, e.g. primary").long_help(
                    "\
Calendar to import into, e.g. primary. Defaults to calendar_id from the configuration; \
if neither is given the calendars of the account are listed to choose from.",
                ),
            )
            .arg(CommonArgs::timezone())
            .arg(arg!(--"dry-run" "Print the events that would be imported and exit"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: CommonArgs::get_file(matches),
            calendar: matches.get_one("calendar").cloned(),
            timezone: CommonArgs::get_timezone(matches),
            dry_run: matches.get_flag("dry-run"),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "importing events...");
        let calendar = read_calendar(&self.file)?;
        let normalizer = build_normalizer(self.timezone.as_deref(), config)?;

        if self.dry_run {
            let events = deliverable_events(normalize_calendar(&calendar, &normalizer));
            return write_events(&mut io::stdout().lock(), &events);
        }

        let client = GoogleCalendarClient::new(config.google.clone())?;
        let calendar_id = match self.calendar.or_else(|| config.calendar_id.clone()) {
            Some(id) => id,
            None => {
                let calendars = client.list_calendars().await?;
                prompt_calendar(&calendars)?
            }
        };

        println!("Import events into Google Calendar: {calendar_id}");
        let report = import_calendar(&calendar, &normalizer, &client, &calendar_id).await;
        print_report(&report);

        if report.failed > 0 {
            return Err(format!(
                "{} of {} events failed to import",
                report.failed,
                report.total()
            )
            .into());
        }
        Ok(())
    }
}

/// Keep the events an import would send, warning about the rest.
fn deliverable_events<E: Error>(results: Vec<Result<NormalizedEvent, E>>) -> Vec<NormalizedEvent> {
    results
        .into_iter()
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(event) if !event.is_deliverable() => {
                tracing::debug!(index, "skipping event without summary");
                None
            }
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(index, "failed to normalize event: {e}");
                None
            }
        })
        .collect()
}

fn print_report(report: &ImportReport) {
    println!(
        "{} imported, {} skipped as invalid, {} skipped without summary, {} failed",
        report.imported.to_string().green(),
        report.skipped_invalid.to_string().yellow(),
        report.skipped_untitled.to_string().yellow(),
        report.failed.to_string().red(),
    );
}
