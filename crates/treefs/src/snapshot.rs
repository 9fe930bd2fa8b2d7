// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Whole-namespace snapshots in JSON.
//!
//! ```json
//! {
//!   "root": { "name": "/", "kind": "directory", "children": [
//!     { "name": "notes.txt", "kind": "file", "content": "hello" }
//!   ] },
//!   "current_directory": "/"
//! }
//! ```
//!
//! Loading rebuilds an equivalent tree; node IDs are not preserved.
//! Besides its path, the current directory is recorded as a list of child
//! positions from the root, which stays exact when sibling names repeat.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::namespace::{DuplicateNames, Namespace};
use crate::node::*;
use crate::path;
use crate::tree::Tree;
use diagnostics::{log_info, log_warn};

/// Serialized form of one node and its descendants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

/// Serialized form of a whole namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: SnapshotNode,
    #[serde(default = "default_current_directory")]
    pub current_directory: String,
    /// Child positions leading from the root to the current directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_directory_index: Vec<usize>,
}

fn default_current_directory() -> String {
    ROOT_NAME.to_string()
}

impl Namespace {
    /// Captures the tree and the current directory
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            root: self.snapshot_node(self.root())?,
            current_directory: self.pwd(),
            current_directory_index: self.cursor_positions(),
        })
    }

    fn cursor_positions(&self) -> Vec<usize> {
        let mut positions = Vec::new();
        let mut id = self.cwd();
        while let Some(parent) = self.node(id).and_then(Node::parent) {
            if let Some(pos) = self
                .node(parent)
                .and_then(|p| p.children().iter().position(|&c| c == id))
            {
                positions.push(pos);
            }
            id = parent;
        }
        positions.reverse();
        positions
    }

    fn snapshot_node(&self, id: NodeID) -> Result<SnapshotNode> {
        let node = self
            .node(id)
            .ok_or_else(|| Error::not_found(format!("#{}", id)))?;
        Ok(SnapshotNode {
            name: node.name().to_string(),
            kind: node.kind(),
            content: node.content().to_string(),
            children: node
                .children()
                .iter()
                .map(|&cid| self.snapshot_node(cid))
                .collect::<Result<_>>()?,
        })
    }

    /// Replaces the whole namespace with the contents of `snapshot`.
    ///
    /// The snapshot is validated in full before anything is replaced. A
    /// current directory that does not resolve in the new tree falls back
    /// to the root.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.root.kind != NodeKind::Directory {
            return Err(Error::snapshot("root is not a directory"));
        }

        let mut tree = Tree::new();
        self.build_children(&mut tree, ROOT_ID, &snapshot.root)?;

        // Positions win when they agree with the recorded path.
        let indexed = follow_positions(&tree, &snapshot.current_directory_index)
            .filter(|&id| tree.path_of(id).as_deref() == Some(snapshot.current_directory.as_str()));

        let mut restored = Namespace::with_config(self.config().clone());
        match indexed {
            Some(cwd) => restored.replace(tree, cwd),
            None => {
                restored.replace(tree, ROOT_ID);
                if restored.cd(&snapshot.current_directory).is_err() {
                    log_warn!(
                        "Snapshot current directory {cwd} not found, using root",
                        cwd: snapshot.current_directory.as_str()
                    );
                }
            }
        }
        *self = restored;
        Ok(())
    }

    fn build_children(&self, tree: &mut Tree, parent: NodeID, node: &SnapshotNode) -> Result<()> {
        if node.kind == NodeKind::File && !node.children.is_empty() {
            return Err(Error::snapshot(format!("file '{}' has children", node.name)));
        }

        let mut seen = HashSet::new();
        for child in &node.children {
            path::validate_name(&child.name)
                .map_err(|e| Error::snapshot(format!("bad entry name: {}", e)))?;
            if self.config().duplicate_names == DuplicateNames::Reject
                && !seen.insert(child.name.as_str())
            {
                return Err(Error::snapshot(format!(
                    "duplicate entry '{}' in '{}'",
                    child.name, node.name
                )));
            }

            let mut fresh = Node::new(child.name.as_str(), child.kind);
            if child.kind == NodeKind::File {
                fresh.set_content(child.content.clone());
            }
            let id = tree.alloc(fresh);
            tree.attach(parent, id)?;
            self.build_children(tree, id, child)?;
        }
        Ok(())
    }

    /// Writes the namespace to `file` as JSON
    pub fn save_state<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let shown = file.display().to_string();
        let json = serde_json::to_string_pretty(&self.snapshot()?)?;
        std::fs::write(file, json)?;
        log_info!("Saved namespace to {file}", file: shown.as_str());
        Ok(())
    }

    /// Replaces the namespace with the one stored in `file`.
    ///
    /// A missing file yields a fresh, empty namespace.
    pub fn load_state<P: AsRef<Path>>(&mut self, file: P) -> Result<()> {
        let file = file.as_ref();
        let shown = file.display().to_string();
        if !file.exists() {
            log_info!("No snapshot at {file}, starting empty", file: shown.as_str());
            *self = Namespace::with_config(self.config().clone());
            return Ok(());
        }

        let json = std::fs::read_to_string(file)?;
        // Each directory level nests two JSON values.
        let mut de = serde_json::Deserializer::from_str(&json);
        de.disable_recursion_limit();
        let snapshot = Snapshot::deserialize(&mut de)?;
        de.end()?;
        self.restore(&snapshot)?;
        log_info!("Loaded namespace from {file}", file: shown.as_str());
        Ok(())
    }
}

fn follow_positions(tree: &Tree, positions: &[usize]) -> Option<NodeID> {
    positions.iter().try_fold(ROOT_ID, |id, &pos| {
        let child = *tree.get(id)?.children().get(pos)?;
        tree.get(child).filter(|n| n.is_dir()).map(|_| child)
    })
}
