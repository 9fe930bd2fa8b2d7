// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::*;
use crate::node::*;
use crate::path::{self, Component};
use crate::tree::Tree;
use crate::tree_format::{TreeNode, format_tree};
use diagnostics::log_debug;

/// What to do when a new entry would share its name with a sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateNames {
    /// Creation, copy and move fail with `AlreadyExists`
    #[default]
    Reject,
    /// Siblings may share a name; lookups pick the first in insertion order
    Allow,
}

#[derive(Debug, Clone, Default)]
pub struct NamespaceConfig {
    pub duplicate_names: DuplicateNames,
}

impl NamespaceConfig {
    /// Configuration that accepts duplicate sibling names
    pub fn permissive() -> Self {
        Self {
            duplicate_names: DuplicateNames::Allow,
        }
    }
}

/// A tree of directories and files plus a current directory.
///
/// Relative paths are resolved from the current directory, absolute paths
/// from the root. Every operation resolves its paths first and then makes
/// a single edit; an operation that returns an error has changed nothing.
#[derive(Debug, Clone)]
pub struct Namespace {
    tree: Tree,
    cwd: NodeID,
    config: NamespaceConfig,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Creates a namespace with an empty root as the current directory
    pub fn new() -> Self {
        Self::with_config(NamespaceConfig::default())
    }

    pub fn with_config(config: NamespaceConfig) -> Self {
        Namespace {
            tree: Tree::new(),
            cwd: ROOT_ID,
            config,
        }
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeID {
        ROOT_ID
    }

    /// The current directory
    pub fn cwd(&self) -> NodeID {
        self.cwd
    }

    pub fn node(&self, id: NodeID) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Swaps in a whole new tree, e.g. after loading a snapshot
    pub(crate) fn replace(&mut self, tree: Tree, cwd: NodeID) {
        self.tree = tree;
        self.cwd = cwd;
    }

    /// Resolves `path` from `start` to a directory.
    ///
    /// Each named segment matches only directory children, including the
    /// last one, so a path ending in a file name is `NotFound`. Use
    /// [`Namespace::lookup`] to reach files.
    pub fn resolve(&self, start: NodeID, path: &str) -> Result<NodeID> {
        self.walk(start, path, false)
    }

    /// Resolves `path` from `start` to a node of either kind.
    ///
    /// Intermediate segments must still be directories; only the final
    /// segment may name a file.
    pub fn lookup(&self, start: NodeID, path: &str) -> Result<NodeID> {
        self.walk(start, path, true)
    }

    /// Resolves the directory that holds the last segment of `path`
    pub fn parent_of(&self, start: NodeID, path: &str) -> Result<NodeID> {
        let (parent, _) = path::split_last(path).ok_or_else(Error::empty_path)?;
        self.resolve(start, parent)
    }

    fn walk(&self, start: NodeID, path: &str, file_at_end: bool) -> Result<NodeID> {
        let mut current = self.tree.node(start).map(|_| start)?;
        let mut components = path::components(path).peekable();

        while let Some(comp) = components.next() {
            match comp {
                Component::RootDir => current = ROOT_ID,
                Component::CurDir => continue,
                Component::ParentDir => {
                    current = self.tree.node(current)?.parent().unwrap_or(ROOT_ID);
                }
                Component::Normal(name) => {
                    let last = components.peek().is_none();
                    let found = if last && file_at_end {
                        self.tree.find_child(current, name, |_| true)
                    } else {
                        self.tree.find_child(current, name, Node::is_dir)
                    };

                    match found {
                        Some(id) => current = id,
                        None if file_at_end
                            && self.tree.find_child(current, name, Node::is_file).is_some() =>
                        {
                            return Err(Error::not_a_directory(path));
                        }
                        None => {
                            log_debug!("resolve: '{name}' not found in {path}", name: name, path: path);
                            return Err(Error::not_found(path));
                        }
                    }
                }
            }
        }

        Ok(current)
    }

    /// Resolves a path argument, relative paths starting at the current directory
    fn resolve_dir(&self, path: &str) -> Result<NodeID> {
        self.resolve(self.cwd, path)
    }

    fn lookup_entry(&self, path: &str) -> Result<NodeID> {
        self.lookup(self.cwd, path)
    }

    /// Absolute path of the current directory
    pub fn pwd(&self) -> String {
        self.path_of(self.cwd)
            .unwrap_or_else(|| ROOT_NAME.to_string())
    }

    /// Absolute path of a live node
    pub fn path_of(&self, id: NodeID) -> Option<String> {
        self.tree.path_of(id)
    }

    /// Enforces the duplicate-name policy for a new entry `name` in `dir`.
    /// `moving` is ignored so a node can be moved within its own parent.
    fn check_vacant(
        &self,
        dir: NodeID,
        name: &str,
        path: &str,
        moving: Option<NodeID>,
    ) -> Result<()> {
        if self.config.duplicate_names == DuplicateNames::Allow {
            return Ok(());
        }
        let taken = self.tree.node(dir)?.children().iter().any(|&cid| {
            Some(cid) != moving && self.tree.get(cid).is_some_and(|c| c.name() == name)
        });
        if taken {
            return Err(Error::already_exists(path));
        }
        Ok(())
    }

    /// Attaches a freshly allocated subtree, releasing it if that fails
    fn attach_new(&mut self, dir: NodeID, id: NodeID) -> Result<()> {
        self.tree.attach(dir, id).inspect_err(|_| self.tree.free_subtree(id))
    }

    fn create_node(&mut self, path: &str, kind: NodeKind) -> Result<NodeID> {
        let (parent, name) = path::split_last(path).ok_or_else(Error::empty_path)?;
        path::validate_name(name)?;
        let dir = self.resolve_dir(parent)?;
        self.check_vacant(dir, name, path, None)?;

        let id = self.tree.alloc(Node::new(name, kind));
        self.attach_new(dir, id)?;
        log_debug!("Created {kind} {path}", kind: kind.as_str(), path: path);
        Ok(id)
    }

    /// Creates an empty directory.
    ///
    /// A bare name is created in the current directory; otherwise the
    /// parent directories must already exist.
    pub fn mkdir(&mut self, path: &str) -> Result<NodeID> {
        self.create_node(path, NodeKind::Directory)
    }

    /// Creates an empty file
    pub fn touch(&mut self, path: &str) -> Result<NodeID> {
        self.create_node(path, NodeKind::File)
    }

    /// Changes the current directory.
    ///
    /// On failure the current directory is left where it was.
    pub fn cd(&mut self, path: &str) -> Result<()> {
        let target = if path == ROOT_NAME {
            ROOT_ID
        } else {
            self.resolve_dir(path)?
        };
        self.cwd = target;
        log_debug!("cd {path}", path: path);
        Ok(())
    }

    /// Names of the entries in `path`, or in the current directory
    pub fn ls(&self, path: Option<&str>) -> Result<Vec<String>> {
        let dir = match path {
            Some(p) => self.resolve_dir(p)?,
            None => self.cwd,
        };
        self.tree.child_names(dir)
    }

    /// Moves `source` into the directory `destination`.
    ///
    /// The node keeps its identity; only its owner changes.
    pub fn mv(&mut self, source: &str, destination: &str) -> Result<()> {
        let src = self.lookup_entry(source)?;
        if src.is_root() {
            return Err(Error::immutable(source));
        }
        let dst = self.resolve_dir(destination)?;
        if self.tree.is_ancestor(src, dst) {
            return Err(Error::move_into_self(source));
        }
        let name = self.tree.node(src)?.name().to_string();
        self.check_vacant(dst, &name, &path::join(destination, &name), Some(src))?;

        self.tree.detach(src)?;
        self.tree.attach(dst, src)?;
        log_debug!("Moved {source} to {destination}", source: source, destination: destination);
        Ok(())
    }

    /// Copies the subtree at `source` into the directory `destination`.
    ///
    /// Returns the ID of the new copy, which shares no nodes with the
    /// original.
    pub fn cp(&mut self, source: &str, destination: &str) -> Result<NodeID> {
        let src = self.lookup_entry(source)?;
        if src.is_root() {
            return Err(Error::immutable(source));
        }
        let dst = self.resolve_dir(destination)?;
        let name = self.tree.node(src)?.name().to_string();
        self.check_vacant(dst, &name, &path::join(destination, &name), None)?;

        // The copy is complete before it is attached, so copying a
        // directory into itself terminates.
        let copy = self.tree.deep_copy(src)?;
        self.attach_new(dst, copy)?;
        log_debug!("Copied {source} to {destination}", source: source, destination: destination);
        Ok(copy)
    }

    /// Removes the node at `path` together with everything below it.
    ///
    /// If the current directory was inside the removed subtree it moves
    /// back to the root.
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let id = self.lookup_entry(path)?;
        if id.is_root() {
            return Err(Error::immutable(path));
        }
        let cwd_removed = self.tree.is_ancestor(id, self.cwd);

        self.tree.detach(id)?;
        self.tree.free_subtree(id);
        if cwd_removed {
            self.cwd = ROOT_ID;
            log_debug!("Current directory removed with {path}, reset to root", path: path);
        }
        log_debug!("Removed {path}", path: path);
        Ok(())
    }

    fn file_at(&self, path: &str) -> Result<NodeID> {
        let id = self.lookup_entry(path)?;
        if self.tree.node(id)?.is_file() {
            Ok(id)
        } else {
            Err(Error::not_a_file(path))
        }
    }

    /// Whole content of the file at `path`
    pub fn read_all(&self, path: &str) -> Result<String> {
        let id = self.file_at(path)?;
        Ok(self.tree.node(id)?.content().to_string())
    }

    /// Content of the file at `path`, split into lines
    pub fn read_lines(&self, path: &str) -> Result<Vec<String>> {
        Ok(self.read_all(path)?.lines().map(str::to_string).collect())
    }

    /// Replaces the content of the existing file at `path`
    pub fn write_all(&mut self, path: &str, text: &str) -> Result<()> {
        let id = self.file_at(path)?;
        self.tree.set_content(id, text.to_string())?;
        log_debug!("Wrote {len} bytes to {path}", len: text.len(), path: path);
        Ok(())
    }

    pub fn cat(&self, path: &str) -> Result<String> {
        self.read_all(path)
    }

    /// Overwrites an existing file; it does not create one
    pub fn echo(&mut self, text: &str, path: &str) -> Result<()> {
        self.write_all(path, text)
    }

    /// Lines of the file at `path` containing `pattern`
    pub fn grep(&self, pattern: &str, path: &str) -> Result<Vec<String>> {
        Ok(self
            .read_lines(path)?
            .into_iter()
            .filter(|line| line.contains(pattern))
            .collect())
    }

    /// Renders the subtree at `path` (or the current directory)
    pub fn tree_view(&self, path: Option<&str>) -> Result<String> {
        let id = match path {
            Some(p) => self.lookup_entry(p)?,
            None => self.cwd,
        };
        Ok(format_tree(&self.tree_node(id)?))
    }

    fn tree_node(&self, id: NodeID) -> Result<TreeNode> {
        let node = self.tree.node(id)?;
        let label = if node.is_dir() && !id.is_root() {
            format!("{}/", node.name())
        } else {
            node.name().to_string()
        };
        let mut tn = TreeNode::new(label);
        for &child in node.children() {
            tn.add_child(self.tree_node(child)?);
        }
        Ok(tn)
    }
}
