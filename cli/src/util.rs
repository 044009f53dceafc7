// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io, path::Path};

use calport_core::{Config, NormalizedEvent, Normalizer};
use calport_ical::Calendar;

/// Read and parse the calendar at `path`.
pub fn read_calendar(path: &Path) -> Result<Calendar, Box<dyn Error>> {
    tracing::debug!(path = %path.display(), "reading calendar...");
    calport_ical::parse_file(path)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e).into())
}

/// Build a normalizer for `timezone`, falling back to the configured zone.
pub fn build_normalizer(
    timezone: Option<&str>,
    config: &Config,
) -> Result<Normalizer, Box<dyn Error>> {
    let timezone = timezone.unwrap_or_else(|| config.timezone());
    tracing::debug!(timezone, "reading event times");
    Ok(Normalizer::new(timezone)?)
}

/// Write events as JSON, one per line.
pub fn write_events<'a>(
    w: &mut impl io::Write,
    events: impl IntoIterator<Item = &'a NormalizedEvent>,
) -> Result<(), Box<dyn Error>> {
    for event in events {
        serde_json::to_writer(&mut *w, event)?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}
