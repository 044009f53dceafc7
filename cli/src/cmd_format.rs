// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use calport_ical::{FormatOptions, LineEnding, parse_components};
use clap::{ArgMatches, Command, arg};

use crate::arg::CommonArgs;

#[derive(Debug, Clone)]
pub struct CmdFormat {
    pub file: PathBuf,
    pub lf: bool,
}

impl CmdFormat {
    pub const NAME: &str = "format";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("fmt")
            .about("Re-serialize an iCalendar file to stdout with unfolded lines")
            .arg(CommonArgs::file())
            .arg(arg!(--lf "End lines with LF instead of CRLF"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: CommonArgs::get_file(matches),
            lf: matches.get_flag("lf"),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "formatting file...");
        let file = File::open(&self.file)
            .map_err(|e| format!("Failed to open {}: {}", self.file.display(), e))?;
        let components = parse_components(BufReader::new(file))
            .map_err(|e| format!("Failed to load {}: {}", self.file.display(), e))?;

        let mut stdout = io::stdout().lock();
        self.write(&components, &mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn write(
        &self,
        components: &[calport_ical::Component],
        w: &mut impl Write,
    ) -> io::Result<()> {
        let line_ending = if self.lf {
            LineEnding::Lf
        } else {
            LineEnding::CrLf
        };
        let options = FormatOptions::default().line_ending(line_ending);
        for component in components {
            options.write(component, w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Team \r\n sync\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    fn format_with(lf: bool) -> String {
        let cmd = CmdFormat {
            file: PathBuf::new(),
            lf,
        };
        let components = parse_components(SRC.as_bytes()).unwrap();
        let mut output = Vec::new();
        cmd.write(&components, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_format() {
        let cmd = Command::new("test").subcommand(CmdFormat::command());
        let matches = cmd.try_get_matches_from(["test", "fmt", "a.ics"]).unwrap();
        let sub_matches = matches.subcommand_matches("format").unwrap();
        let parsed = CmdFormat::from(sub_matches);
        assert_eq!(parsed.file, PathBuf::from("a.ics"));
        assert!(!parsed.lf);
    }

    #[test]
    fn test_write_crlf() {
        assert_eq!(
            format_with(false),
            "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Team sync\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn test_write_lf() {
        assert_eq!(
            format_with(true),
            "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Team sync\nEND:VEVENT\nEND:VCALENDAR\n"
        );
    }
}
