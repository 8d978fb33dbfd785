//! Output formatting - plaintext and JSON summaries of an analysis run.

use serde_json::json;

use crate::builder::AnalysisResult;

/// Prints a plain text summary of the run.
pub fn print_plain(result: &AnalysisResult) {
    println!(
        "Scanned {} file(s): {} function(s), {} call edge(s) ({} after filtering)",
        result.files_scanned,
        result.graph.node_count(),
        result.graph.edge_count(),
        result.filtered.edge_count(),
    );

    if !result.skipped.is_empty() {
        println!("SKIPPED FILES ({}):", result.skipped.len());
        for (path, reason) in &result.skipped {
            println!("- {}: {}", path.display(), reason);
        }
    }

    for (caller, callees) in result.filtered.iter() {
        if callees.is_empty() {
            println!("{} (leaf)", caller);
        } else {
            println!("{} -> {}", caller, callees.join(", "));
        }
    }
}

/// Prints the filtered graph and skip list in JSON format.
pub fn print_json(result: &AnalysisResult) {
    let graph: Vec<_> = result
        .filtered
        .iter()
        .map(|(caller, callees)| {
            json!({
                "function": caller,
                "calls": callees,
            })
        })
        .collect();

    let skipped: Vec<_> = result
        .skipped
        .iter()
        .map(|(path, reason)| {
            json!({
                "file": path.display().to_string(),
                "error": reason,
            })
        })
        .collect();

    let payload = json!({
        "files_scanned": result.files_scanned,
        "functions": result.graph.node_count(),
        "edges": result.graph.edge_count(),
        "graph": graph,
        "skipped": skipped,
    });

    match serde_json::to_string_pretty(&payload) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{}", payload);
        }
    }
}
