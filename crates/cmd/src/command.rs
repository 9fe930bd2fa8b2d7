// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing of interactive command lines.
//!
//! The first word of a line names the command and is looked up in
//! [`COMMANDS`]. Each entry parses the rest of the line and checks its own
//! arity, so a parsed [`Command`] is always complete.

/// A fully parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mkdir(String),
    Touch(String),
    Cd(String),
    Ls(Option<String>),
    Mv { source: String, destination: String },
    Cp { source: String, destination: String },
    Rm(String),
    Cat(String),
    Echo { text: String, path: String },
    Grep { pattern: String, path: String },
    Pwd,
    Tree(Option<String>),
    SaveState(Option<String>),
    LoadState(Option<String>),
    Help,
    Exit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command. Try again.")]
    InvalidCommand(String),

    #[error("usage: {usage}")]
    Usage { usage: &'static str },
}

/// One entry of the command table
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub about: &'static str,
    parse: fn(&str) -> Option<Command>,
}

fn words(rest: &str) -> Vec<&str> {
    rest.split_whitespace().collect()
}

fn one(rest: &str) -> Option<String> {
    match words(rest).as_slice() {
        [arg] => Some(arg.to_string()),
        _ => None,
    }
}

fn optional(rest: &str) -> Option<Option<String>> {
    match words(rest).as_slice() {
        [] => Some(None),
        [arg] => Some(Some(arg.to_string())),
        _ => None,
    }
}

fn two(rest: &str) -> Option<(String, String)> {
    match words(rest).as_slice() {
        [a, b] => Some((a.to_string(), b.to_string())),
        _ => None,
    }
}

fn none(rest: &str, cmd: Command) -> Option<Command> {
    rest.is_empty().then_some(cmd)
}

/// Everything up to the last word is the text, spacing included.
fn echo(rest: &str) -> Option<Command> {
    let (text, path) = rest.rsplit_once(char::is_whitespace)?;
    let text = text.trim_end();
    (!text.is_empty()).then(|| Command::Echo {
        text: text.to_string(),
        path: path.to_string(),
    })
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "mkdir",
        usage: "mkdir PATH",
        about: "Create an empty directory",
        parse: |rest| one(rest).map(Command::Mkdir),
    },
    CommandSpec {
        name: "touch",
        usage: "touch PATH",
        about: "Create an empty file",
        parse: |rest| one(rest).map(Command::Touch),
    },
    CommandSpec {
        name: "cd",
        usage: "cd PATH",
        about: "Change the current directory",
        parse: |rest| one(rest).map(Command::Cd),
    },
    CommandSpec {
        name: "ls",
        usage: "ls [PATH]",
        about: "List a directory",
        parse: |rest| optional(rest).map(Command::Ls),
    },
    CommandSpec {
        name: "mv",
        usage: "mv SOURCE DIRECTORY",
        about: "Move a file or directory into a directory",
        parse: |rest| {
            two(rest).map(|(source, destination)| Command::Mv {
                source,
                destination,
            })
        },
    },
    CommandSpec {
        name: "cp",
        usage: "cp SOURCE DIRECTORY",
        about: "Copy a file or directory into a directory",
        parse: |rest| {
            two(rest).map(|(source, destination)| Command::Cp {
                source,
                destination,
            })
        },
    },
    CommandSpec {
        name: "rm",
        usage: "rm PATH",
        about: "Remove a file or directory",
        parse: |rest| one(rest).map(Command::Rm),
    },
    CommandSpec {
        name: "cat",
        usage: "cat FILE",
        about: "Print a file",
        parse: |rest| one(rest).map(Command::Cat),
    },
    CommandSpec {
        name: "echo",
        usage: "echo TEXT... FILE",
        about: "Replace the content of an existing file",
        parse: echo,
    },
    CommandSpec {
        name: "grep",
        usage: "grep PATTERN FILE",
        about: "Print the lines of a file containing PATTERN",
        parse: |rest| two(rest).map(|(pattern, path)| Command::Grep { pattern, path }),
    },
    CommandSpec {
        name: "pwd",
        usage: "pwd",
        about: "Print the current directory",
        parse: |rest| none(rest, Command::Pwd),
    },
    CommandSpec {
        name: "tree",
        usage: "tree [PATH]",
        about: "Draw a subtree",
        parse: |rest| optional(rest).map(Command::Tree),
    },
    CommandSpec {
        name: "save_state",
        usage: "save_state [FILE]",
        about: "Write the namespace to a snapshot file",
        parse: |rest| optional(rest).map(Command::SaveState),
    },
    CommandSpec {
        name: "load_state",
        usage: "load_state [FILE]",
        about: "Replace the namespace with a snapshot file",
        parse: |rest| optional(rest).map(Command::LoadState),
    },
    CommandSpec {
        name: "help",
        usage: "help",
        about: "List commands",
        parse: |rest| none(rest, Command::Help),
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        about: "End the session",
        parse: |_| Some(Command::Exit),
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Parses one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let spec = lookup(name).ok_or_else(|| CommandError::InvalidCommand(name.to_string()))?;
    (spec.parse)(rest.trim_start())
        .map(Some)
        .ok_or(CommandError::Usage { usage: spec.usage })
}
