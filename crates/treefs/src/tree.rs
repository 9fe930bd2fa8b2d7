// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use crate::error::Result;
use crate::node::*;

/// Arena that owns every node of a namespace.
///
/// Directories refer to their children by [`NodeID`]; each child records
/// its parent so it can be detached without walking the path again. Slots
/// of removed nodes go on a free list and are reused by later allocations.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeID>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only an empty root directory
    pub fn new() -> Self {
        Tree {
            nodes: vec![Some(Node::new(ROOT_NAME, NodeKind::Directory))],
            free: Vec::new(),
        }
    }

    /// Retrieves a live node by its ID
    pub fn get(&self, id: NodeID) -> Option<&Node> {
        self.nodes.get(id.as_usize()).and_then(Option::as_ref)
    }

    pub(crate) fn node(&self, id: NodeID) -> Result<&Node> {
        self.get(id).ok_or_else(|| Error::not_found(format!("#{}", id)))
    }

    fn node_mut(&mut self, id: NodeID) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.as_usize())
            .and_then(Option::as_mut)
            .ok_or_else(|| Error::not_found(format!("#{}", id)))
    }

    /// Number of live nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds an unattached node to the arena
    pub(crate) fn alloc(&mut self, node: Node) -> NodeID {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.as_usize()] = Some(node);
                id
            }
            None => {
                let id = NodeID::new(self.nodes.len());
                self.nodes.push(Some(node));
                id
            }
        }
    }

    /// Appends `child` to the children of directory `parent`.
    ///
    /// The child must be unattached; a node has exactly one owner.
    pub(crate) fn attach(&mut self, parent: NodeID, child: NodeID) -> Result<()> {
        let dir = self.node(parent)?;
        if !dir.is_dir() {
            return Err(Error::not_a_directory(dir.name().to_string()));
        }
        let node = self.node_mut(child)?;
        if node.parent.is_some() {
            return Err(Error::already_exists(node.name().to_string()));
        }
        node.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Removes `child` from its parent's children, matching by identity.
    ///
    /// Returns the former parent.
    pub(crate) fn detach(&mut self, child: NodeID) -> Result<NodeID> {
        let node = self.node_mut(child)?;
        let parent = node
            .parent
            .take()
            .ok_or_else(|| Error::immutable(node.name().to_string()))?;
        self.node_mut(parent)?.children.retain(|&id| id != child);
        Ok(parent)
    }

    /// Releases the slots of `id` and all its descendants.
    ///
    /// The node must already be detached.
    pub(crate) fn free_subtree(&mut self, id: NodeID) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(id.as_usize()).and_then(Option::take) {
                pending.extend(node.children);
                self.free.push(id);
            }
        }
    }

    /// Builds an unattached duplicate of the subtree at `src`.
    ///
    /// Every level gets a fresh ID; names, kinds, content and child order
    /// are preserved.
    pub(crate) fn deep_copy(&mut self, src: NodeID) -> Result<NodeID> {
        let orig = self.node(src)?;
        let mut copy = Node::new(orig.name(), orig.kind());
        copy.set_content(orig.content().to_string());
        let children = orig.children.clone();

        let id = self.alloc(copy);
        for child in children {
            let child_copy = self.deep_copy(child)?;
            self.attach(id, child_copy)?;
        }
        Ok(id)
    }

    /// First child of `dir` named `name` that satisfies `accept`
    pub fn find_child<F>(&self, dir: NodeID, name: &str, accept: F) -> Option<NodeID>
    where
        F: Fn(&Node) -> bool,
    {
        self.get(dir)?.children.iter().copied().find(|&cid| {
            self.get(cid)
                .is_some_and(|child| child.name() == name && accept(child))
        })
    }

    /// True when `ancestor` is `id` or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: NodeID, id: NodeID) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.get(current).and_then(Node::parent);
        }
        false
    }

    /// Absolute path of a live node
    pub fn path_of(&self, id: NodeID) -> Option<String> {
        let mut names = Vec::new();
        let mut current = id;
        while !current.is_root() {
            let node = self.get(current)?;
            names.push(node.name());
            current = node.parent()?;
        }
        names.reverse();
        Some(format!("/{}", names.join("/")))
    }

    /// Names of the children of `dir`, in insertion order
    pub fn child_names(&self, dir: NodeID) -> Result<Vec<String>> {
        let node = self.node(dir)?;
        Ok(node
            .children()
            .iter()
            .filter_map(|&cid| self.get(cid))
            .map(|child| child.name().to_string())
            .collect())
    }

    pub(crate) fn set_content(&mut self, id: NodeID, content: String) -> Result<()> {
        self.node_mut(id)?.set_content(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(tree: &mut Tree, parent: NodeID, name: &str, kind: NodeKind) -> NodeID {
        let id = tree.alloc(Node::new(name, kind));
        tree.attach(parent, id).unwrap();
        id
    }

    #[test]
    fn test_attach_and_detach() {
        let mut tree = Tree::new();
        let a = add(&mut tree, ROOT_ID, "a", NodeKind::Directory);
        let f = add(&mut tree, a, "f", NodeKind::File);

        assert_eq!(tree.path_of(f), Some("/a/f".to_string()));
        assert_eq!(tree.detach(f), Ok(a));
        assert!(tree.child_names(a).unwrap().is_empty());
        assert_eq!(tree.get(f).unwrap().parent(), None);
    }

    #[test]
    fn test_detach_by_identity_with_duplicate_names() {
        let mut tree = Tree::new();
        let first = add(&mut tree, ROOT_ID, "dup", NodeKind::File);
        let second = add(&mut tree, ROOT_ID, "dup", NodeKind::File);

        tree.detach(second).unwrap();
        assert_eq!(tree.get(ROOT_ID).unwrap().children(), &[first]);
    }

    #[test]
    fn test_attach_to_file_fails() {
        let mut tree = Tree::new();
        let f = add(&mut tree, ROOT_ID, "f", NodeKind::File);
        let g = tree.alloc(Node::new("g", NodeKind::File));
        assert_eq!(tree.attach(f, g), Err(Error::not_a_directory("f")));
    }

    #[test]
    fn test_root_cannot_be_detached() {
        let mut tree = Tree::new();
        assert_eq!(tree.detach(ROOT_ID), Err(Error::immutable(ROOT_NAME)));
    }

    #[test]
    fn test_free_subtree_recycles_slots() {
        let mut tree = Tree::new();
        let a = add(&mut tree, ROOT_ID, "a", NodeKind::Directory);
        add(&mut tree, a, "b", NodeKind::Directory);
        assert_eq!(tree.len(), 3);

        tree.detach(a).unwrap();
        tree.free_subtree(a);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(a).is_none());

        let reused = add(&mut tree, ROOT_ID, "c", NodeKind::File);
        assert!(reused.as_usize() < 3);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_deep_copy_shares_no_ids() {
        let mut tree = Tree::new();
        let a = add(&mut tree, ROOT_ID, "a", NodeKind::Directory);
        let f = add(&mut tree, a, "f", NodeKind::File);
        tree.set_content(f, "data".into()).unwrap();

        let copy = tree.deep_copy(a).unwrap();
        assert_ne!(copy, a);
        let copy_node = tree.get(copy).unwrap();
        assert_eq!(copy_node.parent(), None);
        assert_eq!(copy_node.children().len(), 1);

        let copied_file = copy_node.children()[0];
        assert_ne!(copied_file, f);
        assert_eq!(tree.get(copied_file).unwrap().content(), "data");
    }

    #[test]
    fn test_is_ancestor() {
        let mut tree = Tree::new();
        let a = add(&mut tree, ROOT_ID, "a", NodeKind::Directory);
        let b = add(&mut tree, a, "b", NodeKind::Directory);
        assert!(tree.is_ancestor(a, b));
        assert!(tree.is_ancestor(b, b));
        assert!(tree.is_ancestor(ROOT_ID, b));
        assert!(!tree.is_ancestor(b, a));
    }
}
