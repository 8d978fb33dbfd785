//! callmap CLI - static call graph extractor for Rust source trees.
//!
//! Walks every .rs file under a directory, builds the merged call graph,
//! drops functions that are never referenced, writes a Graphviz DOT
//! description, and optionally renders an image via the `dot` binary.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use callmap_core::{
    check_renderer_available, init_structured_logging, print_json, print_plain, render_image,
    write_dot_file, Callmap,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Static call graph extractor for Rust source trees")]
pub struct Cli {
    /// Path to the root of the source tree
    #[arg(default_value = ".")]
    path: String,

    /// Write the DOT graph description to this file
    #[arg(long, value_name = "FILE")]
    dot_file: Option<String>,

    /// Render an image of the filtered graph (requires Graphviz)
    #[arg(long)]
    render: bool,

    /// Base name for the rendered image
    #[arg(long, value_name = "BASENAME")]
    image: Option<String>,

    /// Raster format for the rendered image (png, svg, ...)
    #[arg(long, value_name = "FMT")]
    format: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Directory names to exclude from scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Skip writing the DOT file (report only)
    #[arg(long)]
    no_dot: bool,
}

/// Validates output file paths to prevent path traversal.
///
/// Rejects absolute paths, `..` components, and null bytes.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    Ok(p)
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] callmap internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with code 2.");
    }));

    // Structured JSON logs to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let root = Path::new(&cli.path);
    if !root.is_dir() {
        return Err(anyhow!("Not a directory: {}", cli.path));
    }

    let mut builder = Callmap::new(root);
    if let Some(dot_file) = &cli.dot_file {
        let validated = validate_output_path(dot_file)?;
        builder = builder.dot_path(validated);
    }
    if let Some(image) = &cli.image {
        validate_output_path(image)?;
        builder = builder.image_basename(image.clone());
    }
    if let Some(format) = &cli.format {
        builder = builder.image_format(format.clone());
    }
    if !cli.exclude.is_empty() {
        builder = builder.exclude_dirs(cli.exclude.iter().cloned());
    }

    let config = builder.resolve_config()?;

    // Fail fast on a missing renderer before any work happens
    if cli.render {
        check_renderer_available().context("Renderer unavailable")?;
    }

    let result = builder
        .analyze()
        .with_context(|| format!("Failed to analyze {}", cli.path))?;

    if !cli.no_dot {
        write_dot_file(&result.filtered, &config.dot_path)
            .with_context(|| format!("Failed to write {}", config.dot_path.display()))?;
        eprintln!("Wrote {}", config.dot_path.display());
    }

    if cli.render {
        let image = render_image(&result.filtered, &config).context("Failed to render image")?;
        eprintln!("Rendered {}", image.display());
    }

    if cli.json {
        print_json(&result);
    } else {
        print_plain(&result);
    }

    Ok(())
}
