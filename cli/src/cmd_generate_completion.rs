// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::{ArgMatches, Command, ValueEnum, arg};
use clap_complete::{Shell, generate};
use clap_complete_nushell::Nushell;

use crate::Cli;

/// Target of a completion script: a shell `clap_complete` knows, or nushell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionShell {
    Builtin(Shell),
    Nushell,
}

const NUSHELL: &str = "nushell";

fn shell_parser() -> impl TypedValueParser<Value = CompletionShell> {
    let names = Shell::value_variants()
        .iter()
        .filter_map(ValueEnum::to_possible_value)
        .chain([PossibleValue::new(NUSHELL)]);

    PossibleValuesParser::new(names).map(|name| {
        name.parse::<Shell>()
            .map_or(CompletionShell::Nushell, CompletionShell::Builtin)
    })
}

#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: CompletionShell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a shell completion script for calport")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Shell to generate the script for").value_parser(shell_parser()))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let shell = matches
            .get_one::<CompletionShell>("shell")
            .copied()
            .ok_or("Missing shell")?;
        Ok(Self { shell })
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.generate(&mut io::stdout());
        Ok(())
    }

    pub fn generate(self, buf: &mut impl io::Write) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        match self.shell {
            CompletionShell::Builtin(shell) => generate(shell, &mut cmd, name, buf),
            CompletionShell::Nushell => generate(Nushell, &mut cmd, name, buf),
        }
    }
}
