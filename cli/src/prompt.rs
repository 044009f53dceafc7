// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use calport_core::CalendarListEntry;
use cliclack::{intro, outro, select};

/// Ask the user which calendar to import into.
pub fn prompt_calendar(calendars: &[CalendarListEntry]) -> Result<String, Box<dyn Error>> {
    if calendars.is_empty() {
        return Err("No calendars found for this account".into());
    }

    intro("Calendar Selection")?;
    let mut prompt = select("Calendar to import into:");
    for calendar in calendars {
        let label = calendar.summary.as_deref().unwrap_or(&calendar.id);
        prompt = prompt.item(calendar.id.clone(), label, &calendar.id);
    }

    let id = prompt.interact()?;
    outro(format!("Selected {id}"))?;
    Ok(id)
}
