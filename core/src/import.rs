// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Delivery of normalized events to a calendar service.

use async_trait::async_trait;
use calport_ical::Calendar;

use crate::error::{ImportError, NormalizeError};
use crate::normalize::{NormalizedEvent, Normalizer};

/// A calendar service that accepts normalized events.
#[async_trait]
pub trait EventImporter: Send + Sync {
    /// Delivers one event into the calendar `calendar_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the event or cannot be reached.
    async fn import_event(
        &self,
        calendar_id: &str,
        event: &NormalizedEvent,
    ) -> Result<(), ImportError>;
}

/// Outcome counts of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Events accepted by the service
    pub imported: usize,
    /// Events whose date-times could not be resolved
    pub skipped_invalid: usize,
    /// Events without a summary
    pub skipped_untitled: usize,
    /// Events the service rejected or that could not be sent
    pub failed: usize,
}

impl ImportReport {
    /// Number of events seen.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.imported + self.skipped_invalid + self.skipped_untitled + self.failed
    }
}

/// Normalizes every `VEVENT` of `calendar`, in document order.
pub fn normalize_calendar(
    calendar: &Calendar,
    normalizer: &Normalizer,
) -> Vec<Result<NormalizedEvent, NormalizeError>> {
    calendar
        .events()
        .map(|event| normalizer.normalize(event))
        .collect()
}

/// Imports every event of `calendar` into `calendar_id`, one at a time.
///
/// An event that cannot be normalized, has no summary, or is rejected by
/// the service is counted and skipped. The run continues with the next
/// event and nothing is retried.
pub async fn import_calendar(
    calendar: &Calendar,
    normalizer: &Normalizer,
    importer: &(impl EventImporter + ?Sized),
    calendar_id: &str,
) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, result) in normalize_calendar(calendar, normalizer).into_iter().enumerate() {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(index, "failed to normalize event: {e}");
                report.skipped_invalid += 1;
                continue;
            }
        };

        if !event.is_deliverable() {
            tracing::debug!(index, uid = ?event.uid, "skipping event without summary");
            report.skipped_untitled += 1;
            continue;
        }

        match importer.import_event(calendar_id, &event).await {
            Ok(()) => {
                tracing::info!(summary = %event.summary, "imported event");
                report.imported += 1;
            }
            Err(e) => {
                tracing::warn!(summary = %event.summary, "failed to import event: {e}");
                report.failed += 1;
            }
        }
    }
    report
}
