// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur in namespace operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Entry already exists: {0}")]
    AlreadyExists(String),

    #[error("Path is empty")]
    EmptyPath,

    /// `.` and `..` cannot name an entry
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// The root cannot be moved, copied or removed
    #[error("Immutable path: {0}")]
    Immutable(String),

    #[error("Cannot move a directory into itself: {0}")]
    MoveIntoSelf(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}

impl Error {
    pub fn not_found<S: AsRef<str>>(path: S) -> Self {
        Error::NotFound(path.as_ref().into())
    }

    pub fn not_a_directory<S: AsRef<str>>(path: S) -> Self {
        Error::NotADirectory(path.as_ref().into())
    }

    pub fn not_a_file<S: AsRef<str>>(path: S) -> Self {
        Error::NotAFile(path.as_ref().into())
    }

    pub fn already_exists<S: AsRef<str>>(path: S) -> Self {
        Error::AlreadyExists(path.as_ref().into())
    }

    pub fn empty_path() -> Self {
        Error::EmptyPath
    }

    pub fn invalid_name<S: AsRef<str>>(name: S) -> Self {
        Error::InvalidName(name.as_ref().into())
    }

    pub fn immutable<S: AsRef<str>>(path: S) -> Self {
        Error::Immutable(path.as_ref().into())
    }

    pub fn move_into_self<S: AsRef<str>>(path: S) -> Self {
        Error::MoveIntoSelf(path.as_ref().into())
    }

    pub fn snapshot<S: AsRef<str>>(msg: S) -> Self {
        Error::Snapshot(msg.as_ref().into())
    }
}

// Kept as strings so the enum stays comparable in tests.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Snapshot(err.to_string())
    }
}
