//! Structural guarantees of the namespace, checked over small trees.

use crate::*;

/// Names, kinds, content and shape of a subtree, ignoring node IDs
#[derive(Debug, PartialEq)]
struct Shape {
    name: String,
    kind: NodeKind,
    content: String,
    children: Vec<Shape>,
}

fn shape(ns: &Namespace, id: NodeID) -> Shape {
    let node = ns.node(id).expect("live node");
    Shape {
        name: node.name().to_string(),
        kind: node.kind(),
        content: node.content().to_string(),
        children: node.children().iter().map(|&c| shape(ns, c)).collect(),
    }
}

/// Every ID in the subtree, root included
fn ids(ns: &Namespace, id: NodeID) -> Vec<NodeID> {
    let mut all = vec![id];
    if let Some(node) = ns.node(id) {
        for &child in node.children() {
            all.extend(ids(ns, child));
        }
    }
    all
}

fn child_count(ns: &Namespace, id: NodeID) -> usize {
    ns.node(id).map_or(0, |n| n.children().len())
}

fn sample_tree(ns: &mut Namespace) -> Result<()> {
    ns.mkdir("/src")?;
    ns.mkdir("/src/lib")?;
    ns.touch("/src/lib/a.rs")?;
    ns.echo("fn a() {}", "/src/lib/a.rs")?;
    ns.touch("/src/main.rs")?;
    ns.mkdir("/dst")?;
    Ok(())
}

#[test]
fn test_creation_count_matches_calls() -> Result<()> {
    // Permissive: any sequence of names, repeats included.
    let mut ns = Namespace::with_config(NamespaceConfig::permissive());
    let d = ns.mkdir("/d")?;
    ns.cd("/d")?;
    let sequence = ["x", "y", "x", "z", "y", "x"];
    for (i, name) in sequence.iter().enumerate() {
        if i % 2 == 0 {
            ns.mkdir(name)?;
        } else {
            ns.touch(name)?;
        }
    }
    assert_eq!(child_count(&ns, d), sequence.len());

    // Default policy: distinct names all succeed.
    let mut ns = Namespace::new();
    for i in 0..10 {
        ns.touch(&format!("f{}", i))?;
    }
    assert_eq!(child_count(&ns, ROOT_ID), 10);
    Ok(())
}

#[test]
fn test_cp_is_structurally_equal_and_unaliased() -> Result<()> {
    let mut ns = Namespace::new();
    sample_tree(&mut ns)?;
    let src = ns.lookup(ROOT_ID, "/src")?;
    let before = shape(&ns, src);

    let copy = ns.cp("/src", "/dst")?;
    assert_eq!(shape(&ns, copy), before);

    let original_ids = ids(&ns, src);
    assert!(ids(&ns, copy).iter().all(|id| !original_ids.contains(id)));

    // Mutating the copy leaves the original alone...
    ns.echo("changed", "/dst/src/lib/a.rs")?;
    ns.touch("/dst/src/lib/new.rs")?;
    ns.rm("/dst/src/main.rs")?;
    assert_eq!(shape(&ns, src), before);

    // ...and the other way round.
    let copy_shape = shape(&ns, copy);
    ns.rm("/src/lib")?;
    assert_eq!(shape(&ns, copy), copy_shape);
    Ok(())
}

#[test]
fn test_mv_equals_cp_then_remove() -> Result<()> {
    let mut via_mv = Namespace::new();
    sample_tree(&mut via_mv)?;
    let mut via_cp = Namespace::new();
    sample_tree(&mut via_cp)?;

    let moved = via_mv.lookup(ROOT_ID, "/src/lib")?;
    let src_before = child_count(&via_mv, via_mv.lookup(ROOT_ID, "/src")?);
    let dst = via_mv.lookup(ROOT_ID, "/dst")?;
    let dst_before = child_count(&via_mv, dst);

    via_mv.mv("/src/lib", "/dst")?;
    via_cp.cp("/src/lib", "/dst")?;
    via_cp.rm("/src/lib")?;

    assert_eq!(shape(&via_mv, ROOT_ID), shape(&via_cp, ROOT_ID));
    // Same node, new owner.
    assert_eq!(via_mv.lookup(ROOT_ID, "/dst/lib")?, moved);
    assert_eq!(
        child_count(&via_mv, via_mv.lookup(ROOT_ID, "/src")?),
        src_before - 1
    );
    assert_eq!(child_count(&via_mv, dst), dst_before + 1);
    Ok(())
}

#[test]
fn test_rm_then_resolve_fails() -> Result<()> {
    let mut ns = Namespace::new();
    sample_tree(&mut ns)?;

    ns.rm("/src/lib")?;
    assert_eq!(ns.resolve(ROOT_ID, "/src/lib"), Err(Error::not_found("/src/lib")));
    ns.rm("/src/main.rs")?;
    assert_eq!(
        ns.lookup(ROOT_ID, "/src/main.rs"),
        Err(Error::not_found("/src/main.rs"))
    );
    Ok(())
}

#[test]
fn test_resolve_of_file_is_not_found() -> Result<()> {
    let mut ns = Namespace::new();
    sample_tree(&mut ns)?;
    assert_eq!(
        ns.resolve(ROOT_ID, "/src/lib/a.rs"),
        Err(Error::not_found("/src/lib/a.rs"))
    );
    Ok(())
}

#[test]
fn test_touch_echo_cat_scenario() -> Result<()> {
    let mut ns = Namespace::new();
    ns.touch("/a.txt")?;
    ns.echo("hello", "/a.txt")?;
    assert_eq!(ns.cat("/a.txt")?, "hello");
    Ok(())
}

#[test]
fn test_cp_scenario() -> Result<()> {
    let mut ns = Namespace::new();
    ns.mkdir("/d")?;
    ns.touch("/x.txt")?;
    ns.cp("/x.txt", "/d")?;

    assert_eq!(ns.ls(Some("/d"))?, vec!["x.txt".to_string()]);
    assert!(ns.ls(Some("/"))?.contains(&"x.txt".to_string()));
    Ok(())
}

#[test]
fn test_mv_scenario() -> Result<()> {
    let mut ns = Namespace::new();
    ns.mkdir("/d")?;
    ns.touch("/x.txt")?;
    ns.mv("/x.txt", "/d")?;

    assert!(!ns.ls(Some("/"))?.contains(&"x.txt".to_string()));
    assert!(ns.ls(Some("/d"))?.contains(&"x.txt".to_string()));
    Ok(())
}

#[test]
fn test_tree_invariants_after_mixed_edits() -> Result<()> {
    let mut ns = Namespace::new();
    sample_tree(&mut ns)?;
    ns.cp("/src", "/dst")?;
    ns.mv("/dst/src/lib", "/")?;
    ns.rm("/src/main.rs")?;
    ns.cp("/lib", "/dst")?;

    // Each live node is owned exactly once and points back at its owner.
    let all = ids(&ns, ROOT_ID);
    assert_eq!(all.len(), ns.tree().len());
    for &id in &all {
        let node = ns.node(id).expect("live node");
        for &child in node.children() {
            assert_eq!(ns.node(child).and_then(Node::parent), Some(id));
        }
        if node.is_file() {
            assert!(node.children().is_empty());
        }
    }
    let mut sorted = all.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), all.len());
    Ok(())
}
