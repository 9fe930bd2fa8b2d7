// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub const ROOT_ID: NodeID = NodeID(0);

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

/// Index of a node in the namespace arena.
///
/// An ID stays valid while its node is attached to the tree. Once the node
/// is removed its slot may be handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeID(usize);

impl std::fmt::Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl NodeID {
    pub(crate) fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == ROOT_ID
    }
}

/// Type of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Directory => "directory",
            NodeKind::File => "file",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directory or a plain file.
///
/// Children are kept in insertion order and are only ever populated for
/// directories. The parent link is owned by the tree and is `None` only
/// for the root and for nodes not yet attached.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    content: String,
    pub(crate) parent: Option<NodeID>,
    pub(crate) children: Vec<NodeID>,
}

impl Node {
    pub fn new<S: Into<String>>(name: S, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn parent(&self) -> Option<NodeID> {
        self.parent
    }

    pub fn children(&self) -> &[NodeID] {
        &self.children
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}
