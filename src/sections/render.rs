// src/sections/render.rs
// Text and flat projections of a section forest

use super::tree::TreeNode;
use serde::Serialize;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// A tree node without its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatSection {
    pub id: u64,
    pub name: String,
    pub depth: u32,
    pub parent_id: Option<u64>,
    pub path: String,
}

impl From<&TreeNode> for FlatSection {
    fn from(node: &TreeNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            depth: node.depth,
            parent_id: node.parent_id,
            path: node.path.clone(),
        }
    }
}

/// Draw the forest with box-drawing connectors, one section per line.
///
/// Roots are printed bare as `Name (id)`; their descendants hang below them.
/// Lines are joined with `\n`, with no trailing newline.
pub fn render_ascii_tree(forest: &[TreeNode]) -> String {
    let mut lines = Vec::new();
    // (node, indentation inherited from ancestors, last among its siblings)
    let mut stack: Vec<(&TreeNode, String, bool)> = Vec::new();

    for root in forest {
        lines.push(label(root));
        push_children(&mut stack, &root.children, "");

        while let Some((node, prefix, last)) = stack.pop() {
            let connector = if last { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{}{}{}", prefix, connector, label(node)));

            if !node.children.is_empty() {
                let indent = if last { SPACE_INDENT } else { PIPE_INDENT };
                push_children(&mut stack, &node.children, &format!("{}{}", prefix, indent));
            }
        }
    }
    lines.join("\n")
}

/// Queue siblings so the first one is popped first
fn push_children<'a>(stack: &mut Vec<(&'a TreeNode, String, bool)>, nodes: &'a [TreeNode], prefix: &str) {
    let count = nodes.len();
    for (i, node) in nodes.iter().enumerate().rev() {
        stack.push((node, prefix.to_string(), i + 1 == count));
    }
}

fn label(node: &TreeNode) -> String {
    format!("{} ({})", node.name, node.id)
}

/// Pre-order, depth-first list of every node with children stripped
pub fn flatten_tree(forest: &[TreeNode]) -> Vec<FlatSection> {
    let mut flat = Vec::new();
    let mut stack: Vec<&TreeNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        flat.push(FlatSection::from(node));
        stack.extend(node.children.iter().rev());
    }
    flat
}
