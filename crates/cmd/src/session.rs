// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The interactive read-dispatch loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use diagnostics::{log_debug, log_info, log_warn};
use treefs::Namespace;

use crate::command::{self, COMMANDS, Command};

pub const PROMPT: &str = "Enter command: ";

/// Default snapshot file for `save_state` and `load_state`
pub const DEFAULT_STATE_FILE: &str = "file_system_state.json";

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What a command prints
enum Output {
    Nothing,
    Line(String),
    Lines(Vec<String>),
    Text(String),
}

impl Output {
    fn write_to<W: Write>(self, out: &mut W) -> io::Result<()> {
        match self {
            Output::Nothing => Ok(()),
            Output::Line(line) => writeln!(out, "{line}"),
            Output::Lines(lines) => lines.iter().try_for_each(|line| writeln!(out, "{line}")),
            Output::Text(text) => write!(out, "{text}"),
        }
    }
}

/// A namespace plus the settings of one interactive session.
///
/// Engine failures are silent unless the session is strict, in which case
/// they are written to the error stream. The namespace is never left
/// half-modified either way.
pub struct Session {
    ns: Namespace,
    state_file: PathBuf,
    strict: bool,
}

impl Session {
    pub fn new(ns: Namespace) -> Self {
        Self {
            ns,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            strict: false,
        }
    }

    #[must_use]
    pub fn with_state_file<P: Into<PathBuf>>(mut self, file: P) -> Self {
        self.state_file = file.into();
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn namespace(&self) -> &Namespace {
        &self.ns
    }

    pub fn into_namespace(self) -> Namespace {
        self.ns
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Reads commands until `exit` or end of input.
    ///
    /// Bytes that are not UTF-8 are replaced before parsing, so a garbled
    /// line is reported like any other unknown command.
    pub fn run<R, W, E>(&mut self, mut input: R, out: &mut W, err: &mut E) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut raw = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            raw.clear();
            if input.read_until(b'\n', &mut raw)? == 0 {
                log_debug!("end of input");
                break;
            }
            let line = String::from_utf8_lossy(&raw);
            if std::str::from_utf8(&raw).is_err() {
                log_warn!("input line is not valid UTF-8");
            }

            match command::parse(&line) {
                Ok(None) => {}
                Ok(Some(cmd)) => {
                    if self.execute(cmd, out, err)? == Flow::Exit {
                        break;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Ok(())
    }

    /// Runs one command. Only failures writing to `out` or `err` are returned.
    pub fn execute<W, E>(&mut self, cmd: Command, out: &mut W, err: &mut E) -> anyhow::Result<Flow>
    where
        W: Write,
        E: Write,
    {
        log_debug!("execute {command}", command: format!("{cmd:?}"));
        let output = match cmd {
            Command::Exit => {
                log_info!("session ended by exit");
                return Ok(Flow::Exit);
            }
            Command::Help => Output::Lines(
                COMMANDS
                    .iter()
                    .map(|spec| format!("  {:<20} {}", spec.usage, spec.about))
                    .collect(),
            ),
            cmd if self.strict => match self.apply_checked(cmd) {
                Ok(output) => output,
                Err(e) => {
                    writeln!(err, "error: {e}")?;
                    Output::Nothing
                }
            },
            cmd => self.apply_quiet(cmd),
        };
        output.write_to(out)?;
        Ok(Flow::Continue)
    }

    fn state_path(&self, file: Option<String>) -> PathBuf {
        file.map_or_else(|| self.state_file.clone(), PathBuf::from)
    }

    fn apply_checked(&mut self, cmd: Command) -> treefs::Result<Output> {
        let output = match cmd {
            Command::Mkdir(path) => {
                self.ns.mkdir(&path)?;
                Output::Nothing
            }
            Command::Touch(path) => {
                self.ns.touch(&path)?;
                Output::Nothing
            }
            Command::Cd(path) => {
                self.ns.cd(&path)?;
                Output::Nothing
            }
            Command::Ls(path) => Output::Lines(self.ns.ls(path.as_deref())?),
            Command::Mv {
                source,
                destination,
            } => {
                self.ns.mv(&source, &destination)?;
                Output::Nothing
            }
            Command::Cp {
                source,
                destination,
            } => {
                self.ns.cp(&source, &destination)?;
                Output::Nothing
            }
            Command::Rm(path) => {
                self.ns.rm(&path)?;
                Output::Nothing
            }
            Command::Cat(path) => Output::Line(self.ns.cat(&path)?),
            Command::Echo { text, path } => {
                self.ns.echo(&text, &path)?;
                Output::Nothing
            }
            Command::Grep { pattern, path } => Output::Lines(self.ns.grep(&pattern, &path)?),
            Command::Pwd => Output::Line(self.ns.pwd()),
            Command::Tree(path) => Output::Text(self.ns.tree_view(path.as_deref())?),
            Command::SaveState(file) => {
                self.ns.save_state(self.state_path(file))?;
                Output::Nothing
            }
            Command::LoadState(file) => {
                let file = self.state_path(file);
                self.ns.load_state(file)?;
                Output::Nothing
            }
            Command::Help | Command::Exit => Output::Nothing,
        };
        Ok(output)
    }

    fn apply_quiet(&mut self, cmd: Command) -> Output {
        let state_file = match &cmd {
            Command::SaveState(file) | Command::LoadState(file) => self.state_path(file.clone()),
            _ => PathBuf::new(),
        };
        let mut ns = self.ns.compat();
        match cmd {
            Command::Mkdir(path) => ns.mkdir(&path),
            Command::Touch(path) => ns.touch(&path),
            Command::Cd(path) => ns.cd(&path),
            Command::Ls(path) => return Output::Lines(ns.ls(path.as_deref())),
            Command::Mv {
                source,
                destination,
            } => ns.mv(&source, &destination),
            Command::Cp {
                source,
                destination,
            } => ns.cp(&source, &destination),
            Command::Rm(path) => ns.rm(&path),
            Command::Cat(path) => return ns.cat(&path).map_or(Output::Nothing, Output::Line),
            Command::Echo { text, path } => ns.echo(&text, &path),
            Command::Grep { pattern, path } => return Output::Lines(ns.grep(&pattern, &path)),
            Command::Pwd => return Output::Line(ns.pwd()),
            Command::Tree(path) => {
                return ns
                    .tree_view(path.as_deref())
                    .map_or(Output::Nothing, Output::Text);
            }
            Command::SaveState(_) => ns.save_state(&state_file),
            Command::LoadState(_) => ns.load_state(&state_file),
            Command::Help | Command::Exit => {}
        }
        Output::Nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(session: &mut Session, script: &str) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        session
            .run(script.as_bytes(), &mut out, &mut err)
            .expect("in-memory streams");
        (
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    fn without_prompts(output: &str) -> String {
        output.replace(PROMPT, "")
    }

    #[test]
    fn test_prompt_per_line_and_eof() {
        let mut session = Session::new(Namespace::new());
        let (out, _) = run_script(&mut session, "pwd\n\n");
        // One prompt per line read plus the one answered by end of input.
        assert_eq!(out.matches(PROMPT).count(), 3);
        assert_eq!(without_prompts(&out), "/\n");
    }

    #[test]
    fn test_exit_stops_reading() {
        let mut session = Session::new(Namespace::new());
        let (out, _) = run_script(&mut session, "mkdir /a\nexit\nmkdir /b\n");
        assert_eq!(out.matches(PROMPT).count(), 2);
        assert_eq!(
            session.namespace().ls(Some("/")),
            Ok(vec!["a".to_string()])
        );
    }

    #[test]
    fn test_invalid_and_usage_messages() {
        let mut session = Session::new(Namespace::new());
        let (out, err) = run_script(&mut session, "frobnicate\nmv onlyone\n");
        assert_eq!(
            without_prompts(&out),
            "Invalid command. Try again.\nusage: mv SOURCE DIRECTORY\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_non_utf8_line_does_not_end_session() {
        let mut session = Session::new(Namespace::new());
        let mut out = Vec::new();
        let mut err = Vec::new();
        session
            .run(&b"mkdir /a\n\xff\xfe\nmkdir /b\n"[..], &mut out, &mut err)
            .expect("in-memory streams");

        let out = String::from_utf8(out).expect("utf8");
        assert_eq!(without_prompts(&out), "Invalid command. Try again.\n");
        assert_eq!(
            session.namespace().ls(Some("/")),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_engine_errors_quiet_unless_strict() {
        let mut quiet = Session::new(Namespace::new());
        let (out, err) = run_script(&mut quiet, "cat /missing\n");
        assert_eq!(without_prompts(&out), "");
        assert!(err.is_empty());

        let mut strict = Session::new(Namespace::new()).strict(true);
        let (_, err) = run_script(&mut strict, "cat /missing\n");
        assert_eq!(err, "error: Path not found: /missing\n");
    }
}
