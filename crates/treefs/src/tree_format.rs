// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Box-drawing rendering of a namespace subtree, as printed by `tree`.
//!
//! ```
//! use treefs::tree_format::{TreeNode, format_tree};
//!
//! let root = TreeNode::new("/")
//!     .with_child(TreeNode::new("a.txt"))
//!     .with_child(TreeNode::new("docs/").with_child(TreeNode::new("b.txt")));
//!
//! assert_eq!(format_tree(&root), "/\n├── a.txt\n└─┬ docs/\n  └── b.txt\n");
//! ```

use std::fmt;

/// A labelled node of a tree to be rendered
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node (builder pattern)
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }
}

/// Renders `root` and its descendants, one node per line
pub fn format_tree(root: &TreeNode) -> String {
    let mut output = String::new();
    output.push_str(&root.label);
    output.push('\n');
    format_children(&mut output, &root.children, "");
    output
}

fn format_children(output: &mut String, children: &[TreeNode], prefix: &str) {
    for (index, child) in children.iter().enumerate() {
        let is_last = index + 1 == children.len();

        // Nodes with children get a tee so the branch below connects.
        let (connector, continuation) = match (is_last, child.children.is_empty()) {
            (true, true) => ("└──", ' '),
            (false, true) => ("├──", '│'),
            (true, false) => ("└─┬", ' '),
            (false, false) => ("├─┬", '│'),
        };

        output.push_str(prefix);
        output.push_str(connector);
        output.push(' ');
        output.push_str(&child.label);
        output.push('\n');

        if !child.children.is_empty() {
            let nested = format!("{}{} ", prefix, continuation);
            format_children(output, &child.children, &nested);
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_tree(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_directory() {
        let root = TreeNode::new("/")
            .with_child(TreeNode::new("a"))
            .with_child(TreeNode::new("b"));

        assert_eq!(format_tree(&root), "/\n├── a\n└── b\n");
    }

    #[test]
    fn test_nested_tree() {
        let root = TreeNode::new("/")
            .with_child(TreeNode::new("d/").with_child(TreeNode::new("x.txt")))
            .with_child(TreeNode::new("y.txt"));

        let output = format_tree(&root);
        assert!(output.contains("├─┬ d/"));
        assert!(output.contains("│ └── x.txt"));
        assert!(output.contains("└── y.txt"));
    }

    #[test]
    fn test_deep_nesting() {
        let root = TreeNode::new("/").with_child(
            TreeNode::new("a/").with_child(TreeNode::new("b/").with_child(TreeNode::new("c"))),
        );

        let output = format_tree(&root);
        assert!(output.contains("└─┬ a/"));
        assert!(output.contains("  └─┬ b/"));
        assert!(output.contains("    └── c"));
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(TreeNode::new("/").to_string(), "/\n");
    }
}
