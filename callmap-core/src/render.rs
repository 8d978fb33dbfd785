//! Image rendering via the external Graphviz `dot` binary.
//!
//! The renderer is a pure sink: it gets the render DOT body on stdin and
//! writes `<basename>.<format>` itself. Availability is checked up front
//! so a missing Graphviz install aborts before any output is produced.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::info;

use crate::config::CallmapConfig;
use crate::error::{CallmapError, CallmapResult};
use crate::graph::CallGraph;
use crate::visualize::generate_render_dot;

/// Check that the `dot` binary is reachable on PATH.
///
/// Absence is a fatal configuration-class error, surfaced before any
/// processing rather than after a full analysis run.
pub fn check_renderer_available() -> CallmapResult<()> {
    let check = Command::new("dot")
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match check {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(CallmapError::render(format!(
            "dot found but returned exit code {:?}",
            status.code()
        ))),
        Err(_) => Err(CallmapError::render(
            "Graphviz `dot` not found in PATH; install graphviz to render images",
        )),
    }
}

/// Render the filtered graph to `<image_basename>.<image_format>`.
///
/// Returns the path of the produced image.
pub fn render_image(graph: &CallGraph, config: &CallmapConfig) -> CallmapResult<PathBuf> {
    check_renderer_available()?;

    let output = PathBuf::from(format!(
        "{}.{}",
        config.image_basename, config.image_format
    ));
    let dot_input = generate_render_dot(graph);

    let mut child = Command::new("dot")
        .arg(format!("-T{}", config.image_format))
        .arg("-o")
        .arg(&output)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CallmapError::render(format!("failed to spawn dot: {}", e)))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(dot_input.as_bytes())
            .map_err(|e| CallmapError::render(format!("failed to feed dot: {}", e)))?;
    }

    let result = child
        .wait_with_output()
        .map_err(|e| CallmapError::render(format!("failed to wait for dot: {}", e)))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(CallmapError::render(format!(
            "dot exited with {:?}: {}",
            result.status.code(),
            stderr.trim()
        )));
    }

    info!(image = %output.display(), "rendered call graph");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_renderer_is_fatal() {
        // Whatever the environment, the error class must be fatal when
        // the binary is absent.
        let err = CallmapError::render("Graphviz `dot` not found in PATH");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_output_name_combines_basename_and_format() {
        let config = CallmapConfig {
            image_basename: "func_tree".to_string(),
            image_format: "svg".to_string(),
            ..CallmapConfig::default()
        };
        let expected = format!("{}.{}", config.image_basename, config.image_format);
        assert_eq!(expected, "func_tree.svg");
    }
}
