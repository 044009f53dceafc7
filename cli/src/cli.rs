// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, io, path::PathBuf, process::ExitCode};

use calport_core::{APP_NAME, Config};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_calendars::CmdCalendars;
use crate::cmd_format::CmdFormat;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_import::CmdImport;
use crate::cmd_show::CmdShow;
use crate::config::parse_config;

/// Run the calport command-line interface.
pub async fn run() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);
    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so that stdout only carries command output.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Enable debug logging
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Import iCalendar files into Google Calendar.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $CALPORT_CONFIG, then $XDG_CONFIG_HOME/calport/config.toml \
on Linux and MacOS, %APPDATA%/calport/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(arg!(-v --verbose "Enable debug logging").global(true))
            .subcommand(CmdImport::command())
            .subcommand(CmdShow::command())
            .subcommand(CmdFormat::command())
            .subcommand(CmdCalendars::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::{Calendars, Format, GenerateCompletion, Import, Show};
        let Some((name, sub)) = matches.subcommand() else {
            return Err("No command given".into());
        };

        let command = match name {
            CmdImport::NAME => Import(CmdImport::from(sub)),
            CmdShow::NAME => Show(CmdShow::from(sub)),
            CmdFormat::NAME => Format(CmdFormat::from(sub)),
            CmdCalendars::NAME => Calendars(CmdCalendars::from(sub)),
            CmdGenerateCompletion::NAME => GenerateCompletion(CmdGenerateCompletion::from(sub)?),
            _ => return Err(format!("Unknown command: {name}").into()),
        };

        // Global args may be given before or after the subcommand
        let config = sub
            .get_one::<PathBuf>("config")
            .or_else(|| matches.get_one("config"))
            .cloned();
        let verbose = sub.get_flag("verbose") || matches.get_flag("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Import the events of a file
    Import(CmdImport),

    /// Print the normalized events of a file
    Show(CmdShow),

    /// Re-serialize a file
    Format(CmdFormat),

    /// List the calendars of the account
    Calendars(CmdCalendars),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::{Calendars, Format, GenerateCompletion, Import, Show};
        match self {
            Import(a)    => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Show(a)      => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Calendars(a) => Self::run_with(config, |x| a.run(x).boxed_local()).await,
            Format(a)    => a.run(),
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Config) -> LocalBoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        f(&config).await
    }
}
