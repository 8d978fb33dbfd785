//! Builder pattern API for call graph extraction.
//!
//! Provides a fluent interface for configuring and running an analysis:
//!
//! ```rust,ignore
//! use callmap_core::Callmap;
//!
//! let result = Callmap::new("/path/to/crate")
//!     .dot_path("calls.dot")
//!     .analyze()?;
//!
//! for (caller, callees) in result.filtered.iter() {
//!     println!("{} -> {:?}", caller, callees);
//! }
//! ```
//!
//! The pipeline is fully sequential: discover, then parse and walk one
//! file at a time, then merge, then filter. A file that fails to parse is
//! logged and skipped; every other file still contributes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::{load_config, CallmapConfig};
use crate::graph::CallGraph;
use crate::parse::parse_source;
use crate::scan::gather_rs_files_with_excludes;
use crate::walk::build_partial;

/// Builder for configuring a call graph extraction run.
#[derive(Debug, Clone)]
pub struct Callmap {
    /// Root path of the source tree to analyze
    root: PathBuf,

    /// Override for the DOT output path
    dot_path: Option<PathBuf>,

    /// Override for the rendered image base name
    image_basename: Option<String>,

    /// Override for the raster format
    image_format: Option<String>,

    /// Custom excluded directories
    excluded_dirs: Vec<String>,

    /// Whether to honor callmap.toml at the root
    load_file_config: bool,
}

impl Callmap {
    /// Create a new analysis builder for the given source directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dot_path: None,
            image_basename: None,
            image_format: None,
            excluded_dirs: Vec::new(),
            load_file_config: true,
        }
    }

    /// Set the DOT output path.
    pub fn dot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_path = Some(path.into());
        self
    }

    /// Set the rendered image base name.
    pub fn image_basename(mut self, name: impl Into<String>) -> Self {
        self.image_basename = Some(name.into());
        self
    }

    /// Set the raster format handed to the renderer.
    pub fn image_format(mut self, format: impl Into<String>) -> Self {
        self.image_format = Some(format.into());
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Enable or disable loading callmap.toml from the root.
    pub fn load_file_config(mut self, enabled: bool) -> Self {
        self.load_file_config = enabled;
        self
    }

    /// Resolve the effective configuration.
    ///
    /// Precedence: defaults, then callmap.toml, then builder overrides.
    pub fn resolve_config(&self) -> Result<CallmapConfig> {
        let mut config = CallmapConfig::for_dir(&self.root);

        if self.load_file_config {
            if let Some(file) = load_config(&self.root).context("Failed to load callmap.toml")? {
                config.apply_file(&file);
            }
        }

        if let Some(path) = &self.dot_path {
            config.dot_path = path.clone();
        }
        if let Some(name) = &self.image_basename {
            config.image_basename = name.clone();
        }
        if let Some(format) = &self.image_format {
            config.image_format = format.clone();
        }

        Ok(config)
    }

    /// Run the analysis and return results.
    ///
    /// Per-file parse failures are recovered: the file is recorded in
    /// `skipped` and the run continues. Only configuration-class
    /// failures abort.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let excludes: Vec<&str> = self.excluded_dirs.iter().map(String::as_str).collect();
        let files = gather_rs_files_with_excludes(&self.root, &excludes)
            .context("Failed to gather .rs files")?;

        let mut partials: Vec<CallGraph> = Vec::with_capacity(files.len());
        let mut skipped: Vec<(PathBuf, String)> = Vec::new();

        for file in &files {
            match parse_source(file) {
                Ok(tree) => partials.push(build_partial(&tree, &self.root)),
                Err(e) if e.is_recoverable() => {
                    warn!(file = %file.display(), error = %e, "skipping unparsable file");
                    skipped.push((file.clone(), e.to_string()));
                }
                Err(e) => return Err(e).context("Analysis aborted"),
            }
        }

        let graph = CallGraph::merge(partials);
        let filtered = graph.retain_referenced();

        info!(
            files = files.len(),
            skipped = skipped.len(),
            functions = graph.node_count(),
            edges = graph.edge_count(),
            kept = filtered.node_count(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            files_scanned: files.len(),
            graph,
            filtered,
            skipped,
        })
    }
}

/// Result of running call graph extraction.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Root path that was analyzed
    pub root: PathBuf,

    /// Number of source files discovered (including skipped ones)
    pub files_scanned: usize,

    /// Merged call graph across all parsed files
    pub graph: CallGraph,

    /// Graph with never-referenced, non-calling entries removed
    pub filtered: CallGraph,

    /// Files that failed to parse, with the diagnostic text
    pub skipped: Vec<(PathBuf, String)>,
}

impl AnalysisResult {
    /// Number of entries the filter dropped.
    pub fn dropped_count(&self) -> usize {
        self.graph.node_count() - self.filtered.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_crate(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "callmap_builder_{}_{}",
            label,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(dir.join("src")).expect("Failed to create test directory");

        fs::write(
            dir.join("src/main.rs"),
            "fn main() { foo(); foo(); bar(); }\nfn foo() {}\nfn bar() { foo(); }\nfn baz() {}\n",
        )
        .expect("Failed to write main.rs");

        dir
    }

    #[test]
    fn test_analyze_worked_example() {
        let dir = create_test_crate("example");
        let result = Callmap::new(&dir).analyze().unwrap();

        assert_eq!(
            result.graph.calls_of("main").unwrap(),
            &["foo".to_string(), "foo".to_string(), "bar".to_string()]
        );
        assert_eq!(result.graph.calls_of("bar").unwrap(), &["foo".to_string()]);
        assert_eq!(result.graph.calls_of("baz").unwrap().len(), 0);

        // baz neither calls nor is called: dropped
        assert!(!result.filtered.contains("baz"));
        assert!(result.filtered.contains("foo"));
        assert_eq!(result.dropped_count(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_analyze_skips_broken_file() {
        let dir = create_test_crate("broken");
        fs::write(dir.join("src/broken.rs"), "fn oops( {").unwrap();

        let result = Callmap::new(&dir).analyze().unwrap();

        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].0.ends_with("src/broken.rs"));
        // The good file still contributed
        assert!(result.filtered.contains("main"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_resolve_config_precedence() {
        let dir = create_test_crate("config");
        fs::write(
            dir.join("callmap.toml"),
            "[output]\ndot_file = \"from_file.dot\"\nformat = \"svg\"\n",
        )
        .unwrap();

        let config = Callmap::new(&dir)
            .dot_path("from_builder.dot")
            .resolve_config()
            .unwrap();

        // Builder override wins over file; file wins over default
        assert_eq!(config.dot_path, PathBuf::from("from_builder.dot"));
        assert_eq!(config.image_format, "svg");
        assert_eq!(config.image_basename, "callmap");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_exclude_dirs_respected() {
        let dir = create_test_crate("excl");
        fs::create_dir_all(dir.join("vendor")).unwrap();
        fs::write(dir.join("vendor/extra.rs"), "fn vendored() { foo(); }").unwrap();

        let result = Callmap::new(&dir)
            .exclude_dirs(["vendor"])
            .analyze()
            .unwrap();

        assert!(!result.graph.contains("vendored"));

        fs::remove_dir_all(&dir).ok();
    }
}
