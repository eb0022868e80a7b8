// src/sections/tree.rs
// Rebuild the section hierarchy from flat parent references

use crate::types::Section;
use serde::Serialize;
use std::collections::HashMap;

/// Separator between ancestor names in a section path
pub const PATH_SEPARATOR: &str = " > ";

/// A section placed in the hierarchy. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: u64,
    pub name: String,
    pub depth: u32,
    pub parent_id: Option<u64>,
    /// Ancestor names joined by " > ", ending with this node's name
    pub path: String,
    pub children: Vec<TreeNode>,
}

// Iterative so that very deep chains are released without deep recursion
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Build a forest from sections that reference their parent by id.
///
/// A section becomes a root when it has no parent, when its parent id is not
/// among the input, or when its parent link closes a cycle. Siblings keep the
/// relative order they had in `sections`.
pub fn build_section_tree(sections: &[Section]) -> Vec<TreeNode> {
    let slots: HashMap<u64, usize> = sections
        .iter()
        .enumerate()
        .map(|(slot, s)| (s.id, slot))
        .collect();

    let parents = resolve_parents(sections, &slots);
    let paths = compute_paths(sections, &parents);

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); sections.len()];
    for (slot, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(slot),
            None => roots.push(slot),
        }
    }

    assemble(sections, &roots, &children, paths)
}

/// Parent slot of every section, with dangling references and cycles cut
fn resolve_parents(sections: &[Section], slots: &HashMap<u64, usize>) -> Vec<Option<usize>> {
    let mut parents: Vec<Option<usize>> = sections
        .iter()
        .map(|s| s.parent_id.and_then(|pid| slots.get(&pid).copied()))
        .collect();

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        OnChain,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; sections.len()];
    let mut chain = Vec::new();

    for start in 0..sections.len() {
        let mut current = start;
        loop {
            match marks[current] {
                Mark::Done => break,
                Mark::OnChain => {
                    // The last node walked points back into the chain
                    if let Some(&closer) = chain.last() {
                        parents[closer] = None;
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::OnChain;
                    chain.push(current);
                    match parents[current] {
                        Some(next) => current = next,
                        None => break,
                    }
                }
            }
        }
        for slot in chain.drain(..) {
            marks[slot] = Mark::Done;
        }
    }

    parents
}

/// Full path of every section, computed from the complete parent table so the
/// result does not depend on input order
fn compute_paths(sections: &[Section], parents: &[Option<usize>]) -> Vec<String> {
    let mut paths: Vec<Option<String>> = vec![None; sections.len()];
    let mut pending = Vec::new();

    for start in 0..sections.len() {
        let mut current = Some(start);
        while let Some(slot) = current {
            if paths[slot].is_some() {
                break;
            }
            pending.push(slot);
            current = parents[slot];
        }

        while let Some(slot) = pending.pop() {
            let name = &sections[slot].name;
            let path = match parents[slot].and_then(|p| paths[p].as_deref()) {
                Some(parent_path) => format!("{}{}{}", parent_path, PATH_SEPARATOR, name),
                None => name.clone(),
            };
            paths[slot] = Some(path);
        }
    }

    paths.into_iter().map(Option::unwrap_or_default).collect()
}

/// Turn the slot-level child lists into owned nodes, deepest first, without
/// recursing per level
fn assemble(
    sections: &[Section],
    roots: &[usize],
    children: &[Vec<usize>],
    paths: Vec<String>,
) -> Vec<TreeNode> {
    let mut order = Vec::with_capacity(sections.len());
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(slot) = stack.pop() {
        order.push(slot);
        stack.extend(children[slot].iter().copied());
    }

    let mut paths: Vec<Option<String>> = paths.into_iter().map(Some).collect();
    let mut built: Vec<Option<TreeNode>> = (0..sections.len()).map(|_| None).collect();

    // Parents precede their children in `order`, so walking it backwards builds children first
    for &slot in order.iter().rev() {
        let section = &sections[slot];
        let node = TreeNode {
            id: section.id,
            name: section.name.clone(),
            depth: section.depth,
            parent_id: section.parent_id,
            path: paths[slot].take().unwrap_or_default(),
            children: children[slot]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect(),
        };
        built[slot] = Some(node);
    }

    roots.iter().filter_map(|&slot| built[slot].take()).collect()
}
