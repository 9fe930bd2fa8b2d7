// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! An in-memory hierarchical namespace of directories and files.
//!
//! ```
//! use treefs::Namespace;
//!
//! let mut ns = Namespace::new();
//! ns.mkdir("/docs")?;
//! ns.touch("/docs/a.txt")?;
//! ns.echo("hello", "/docs/a.txt")?;
//! assert_eq!(ns.cat("/docs/a.txt")?, "hello");
//! assert_eq!(ns.ls(Some("/docs"))?, vec!["a.txt"]);
//! # Ok::<(), treefs::Error>(())
//! ```

mod compat;
mod error;
mod namespace;
mod node;
pub mod path;
mod snapshot;
mod tree;
pub mod tree_format;

pub use compat::Compat;
pub use error::{Error, Result};
pub use namespace::{DuplicateNames, Namespace, NamespaceConfig};
pub use node::{Node, NodeID, NodeKind, ROOT_ID, ROOT_NAME};
pub use snapshot::{Snapshot, SnapshotNode};
pub use tree::Tree;

#[cfg(test)]
mod tests;
