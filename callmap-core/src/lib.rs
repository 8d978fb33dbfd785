//! callmap-core: static call graph extraction for Rust source trees.
//!
//! Walks every source file under a directory, records which functions
//! call which, drops functions that are never referenced, and exports
//! the result as a Graphviz DOT description plus a rendered image.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use callmap_core::Callmap;
//!
//! let result = Callmap::new("/path/to/crate").analyze()?;
//! for (caller, callees) in result.filtered.iter() {
//!     println!("{} -> {:?}", caller, callees);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`ast`]: generic syntax tree consumed by the walker
//! - [`parse`]: syn-based lowering of Rust sources into that tree
//! - [`walk`]: depth-first walk producing per-file partial graphs
//! - [`graph`]: merged graph, merger, and unused-node filter
//! - [`scan`]: sequential file discovery
//! - [`visualize`]: DOT export
//! - [`render`]: image rendering via the external Graphviz binary
//! - [`builder`]: fluent entry point
//! - [`error`]: typed error handling

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod parse;
pub mod report;
pub mod scan;
pub mod visualize;
pub mod walk;

#[cfg(feature = "render")]
pub mod render;

// Error types
pub use error::{CallmapError, CallmapResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Callmap};

// Data model
pub use ast::{NodeKind, SourceLocation, SyntaxNode};
pub use graph::CallGraph;

// Configuration
pub use config::{load_config, CallmapConfig, ConfigFile, OutputConfig};

// Pipeline stages
pub use parse::{lower_file, lower_source, parse_source};
pub use scan::{gather_rs_files, gather_rs_files_with_excludes};
pub use walk::build_partial;

// Exporters
pub use visualize::{generate_dot, generate_render_dot, write_dot_file};

#[cfg(feature = "render")]
pub use render::{check_renderer_available, render_image};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Reporting
pub use report::{print_json, print_plain};
