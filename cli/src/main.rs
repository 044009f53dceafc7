// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! calport - import iCalendar files into Google Calendar

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    calport_cli::run().await
}
