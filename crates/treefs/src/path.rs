// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Path syntax for the namespace.
//!
//! Paths are plain strings separated by `/`. Empty segments are dropped, so
//! `/a/b`, `/a//b` and `/a/b/` all name the same node. A leading separator
//! makes the path absolute.

use crate::error::Error;
use crate::error::Result;

pub const SEPARATOR: char = '/';

/// One step of a path walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component<'a> {
    RootDir,
    CurDir,
    ParentDir,
    Normal(&'a str),
}

/// Splits a path into components, discarding empty segments
pub fn components(path: &str) -> impl Iterator<Item = Component<'_>> {
    let root = is_absolute(path).then_some(Component::RootDir);
    root.into_iter().chain(
        path.split(SEPARATOR)
            .filter(|seg| !seg.is_empty())
            .map(|seg| match seg {
                "." => Component::CurDir,
                ".." => Component::ParentDir,
                name => Component::Normal(name),
            }),
    )
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Splits off the last segment, returning `(parent, name)`.
///
/// The parent keeps the absolute/relative form of the input. Returns
/// `None` when the path has no segments at all.
pub fn split_last(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.rsplit_once(SEPARATOR) {
        Some(("", name)) => Some(("/", name)),
        Some((parent, name)) => Some((parent, name)),
        None => Some(("", trimmed)),
    }
}

/// Extracts the final segment of a path, if any
pub fn basename(path: &str) -> Option<&str> {
    split_last(path).map(|(_, name)| name)
}

/// Appends `name` to a directory path
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with(SEPARATOR) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, SEPARATOR, name)
    }
}

/// Checks that `name` can label a single entry
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::empty_path());
    }
    if name == "." || name == ".." || name.contains(SEPARATOR) {
        return Err(Error::invalid_name(name));
    }
    Ok(())
}
