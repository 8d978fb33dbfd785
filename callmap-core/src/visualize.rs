//! Graphviz DOT export of the filtered call graph.
//!
//! Two flavors share the same edge walk:
//! - [`generate_dot`]: the plain textual description, one line per
//!   (caller, callee) pair, used for the on-disk .dot file
//! - [`generate_render_dot`]: adds one node statement per key so the
//!   renderer draws leaf functions even when they have no edges

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{CallmapError, CallmapResult, IoResultExt};
use crate::graph::CallGraph;

/// Generate the textual graph description.
///
/// Fixed header and footer; one edge line per (caller, callee) pair in
/// iteration order of the graph. Parallel edges are repeated, not
/// collapsed.
pub fn generate_dot(graph: &CallGraph) -> String {
    // ~40 bytes per edge plus header/footer
    let mut dot = String::with_capacity(graph.edge_count() * 40 + 32);

    dot.push_str("digraph CallGraph {\n");
    for (caller, callees) in graph.iter() {
        for callee in callees {
            // Writing to a String cannot fail
            let _ = writeln!(dot, "  \"{}\" -> \"{}\";", escape(caller), escape(callee));
        }
    }
    dot.push_str("}\n");
    dot
}

/// Generate DOT input for the image renderer.
///
/// Unlike [`generate_dot`], every key gets an explicit node statement so
/// functions without surviving edges still appear in the drawing.
pub fn generate_render_dot(graph: &CallGraph) -> String {
    let mut dot = String::with_capacity(
        graph.node_count() * 30 + graph.edge_count() * 40 + 96,
    );

    dot.push_str("digraph CallGraph {\n");
    dot.push_str("  node [shape=box, fontname=\"monospace\"];\n");
    for (name, _) in graph.iter() {
        let _ = writeln!(dot, "  \"{}\";", escape(name));
    }
    for (caller, callees) in graph.iter() {
        for callee in callees {
            let _ = writeln!(dot, "  \"{}\" -> \"{}\";", escape(caller), escape(callee));
        }
    }
    dot.push_str("}\n");
    dot
}

/// Write the textual graph description to the configured path.
pub fn write_dot_file(graph: &CallGraph, path: &Path) -> CallmapResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(CallmapError::config(
                parent,
                "output directory does not exist",
            ));
        }
    }
    std::fs::write(path, generate_dot(graph)).with_path(path)
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_filtered() -> CallGraph {
        let mut g = CallGraph::new();
        g.ensure_node("main");
        g.record_call("main", "foo");
        g.record_call("main", "foo");
        g.record_call("main", "bar");
        g.ensure_node("foo");
        g.ensure_node("bar");
        g.record_call("bar", "foo");
        g
    }

    #[test]
    fn test_dot_header_and_footer() {
        let dot = generate_dot(&CallGraph::new());
        assert_eq!(dot, "digraph CallGraph {\n}\n");
    }

    #[test]
    fn test_dot_edge_lines_in_discovery_order() {
        let dot = generate_dot(&example_filtered());
        let edge_lines: Vec<&str> = dot
            .lines()
            .filter(|l| l.contains("->"))
            .collect();

        assert_eq!(
            edge_lines,
            vec![
                "  \"main\" -> \"foo\";",
                "  \"main\" -> \"foo\";",
                "  \"main\" -> \"bar\";",
                "  \"bar\" -> \"foo\";",
            ]
        );
        assert!(dot.starts_with("digraph CallGraph {\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_render_dot_has_node_statements() {
        let dot = generate_render_dot(&example_filtered());
        assert!(dot.contains("  \"main\";"));
        assert!(dot.contains("  \"foo\";"));
        assert!(dot.contains("  \"bar\";"));
        // Parallel edges preserved
        assert_eq!(dot.matches("\"main\" -> \"foo\";").count(), 2);
    }

    #[test]
    fn test_escape_quotes() {
        let mut g = CallGraph::new();
        g.ensure_node("odd\"name");
        g.record_call("odd\"name", "x");
        let dot = generate_dot(&g);
        assert!(dot.contains("\"odd\\\"name\" -> \"x\";"));
    }

    #[test]
    fn test_write_dot_file() {
        let dir = std::env::temp_dir().join(format!("callmap_dot_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.dot");

        write_dot_file(&example_filtered(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("digraph CallGraph {"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_write_dot_file_missing_dir_is_config_error() {
        let path = std::env::temp_dir()
            .join(format!("callmap_dot_missing_{}", std::process::id()))
            .join("out.dot");
        let err = write_dot_file(&example_filtered(), &path).unwrap_err();
        assert!(matches!(err, CallmapError::Config { .. }));
    }
}
