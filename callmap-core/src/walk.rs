//! Depth-first syntax tree walk producing a per-file partial call graph.
//!
//! The walk threads the current enclosing function name through the
//! recursion and attributes every call site to that function. Two legacy
//! behaviors are load-bearing and kept as-is:
//!
//! - A function definition nested inside another function's body is
//!   appended to the parent's call list, same as a call site. Attribution
//!   is by lexical nesting, not by invocation.
//! - A definition whose location falls outside the analyzed directory is
//!   skipped together with its whole subtree. Calls nested under an
//!   out-of-tree definition never reach the graph.

use std::path::Path;

use crate::ast::{NodeKind, SyntaxNode};
use crate::graph::CallGraph;

/// Walk one file's syntax tree into a partial call graph.
///
/// `source_root` bounds which function definitions count: definitions
/// located outside it (vendored code, generated trees) are dropped.
pub fn build_partial(root: &SyntaxNode, source_root: &Path) -> CallGraph {
    let mut graph = CallGraph::new();
    visit(root, &mut graph, None, source_root);
    graph
}

fn visit(node: &SyntaxNode, graph: &mut CallGraph, enclosing: Option<&str>, source_root: &Path) {
    match node.kind {
        NodeKind::FunctionDefinition => {
            let in_tree = node
                .location
                .as_ref()
                .is_some_and(|loc| loc.file.starts_with(source_root));
            if !in_tree {
                // Out-of-tree definition: drop the subtree entirely.
                return;
            }

            graph.ensure_node(&node.name);
            if let Some(caller) = enclosing {
                graph.record_call(caller, &node.name);
            }
            for child in &node.children {
                visit(child, graph, Some(&node.name), source_root);
            }
        }
        NodeKind::CallExpression => {
            graph.ensure_node(&node.name);
            if let Some(caller) = enclosing {
                graph.record_call(caller, &node.name);
            }
            // A call does not open a new attribution scope: nested calls
            // in the argument list belong to the same enclosing function.
            for child in &node.children {
                visit(child, graph, enclosing, source_root);
            }
        }
        NodeKind::Other => {
            for child in &node.children {
                visit(child, graph, enclosing, source_root);
            }
        }
    }
}
