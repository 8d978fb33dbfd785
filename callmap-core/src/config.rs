//! Configuration loading from callmap.toml.
//!
//! All knobs live in one explicit struct passed into the entry point.
//! An optional `callmap.toml` at the analyzed root may override the
//! output settings; CLI flags take precedence over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CallmapError, CallmapResult};

/// Runtime configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct CallmapConfig {
    /// Directory whose sources are analyzed
    pub source_dir: PathBuf,
    /// Where the DOT graph description is written
    pub dot_path: PathBuf,
    /// Base name for the rendered image (extension comes from the format)
    pub image_basename: String,
    /// Raster format handed to the renderer
    pub image_format: String,
}

impl Default for CallmapConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            dot_path: PathBuf::from("callmap.dot"),
            image_basename: "callmap".to_string(),
            image_format: "png".to_string(),
        }
    }
}

impl CallmapConfig {
    /// Configuration for analyzing the given directory, other settings
    /// at their defaults.
    pub fn for_dir(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Apply overrides from a loaded callmap.toml, if any.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(output) = &file.output {
            if let Some(dot) = &output.dot_file {
                self.dot_path = PathBuf::from(dot);
            }
            if let Some(image) = &output.image {
                self.image_basename = image.clone();
            }
            if let Some(format) = &output.format {
                self.image_format = format.clone();
            }
        }
    }
}

/// On-disk structure of callmap.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output settings section.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// DOT file path.
    pub dot_file: Option<String>,
    /// Rendered image base name.
    pub image: Option<String>,
    /// Raster format (png, svg, ...).
    pub format: Option<String>,
}

/// Loads callmap.toml from the analyzed root if it exists.
///
/// A missing file is not an error; a malformed one is fatal.
pub fn load_config(root: &Path) -> CallmapResult<Option<ConfigFile>> {
    let path = root.join("callmap.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| CallmapError::io(&path, e))?;
    let cfg = toml::from_str(&content)
        .map_err(|e| CallmapError::config(&path, format!("invalid callmap.toml: {}", e)))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let cfg = CallmapConfig::default();
        assert_eq!(cfg.dot_path, PathBuf::from("callmap.dot"));
        assert_eq!(cfg.image_basename, "callmap");
        assert_eq!(cfg.image_format, "png");
    }

    #[test]
    fn test_apply_file_overrides() {
        let mut cfg = CallmapConfig::for_dir("/project");
        let file: ConfigFile = toml::from_str(
            r#"
[output]
dot_file = "graphs/calls.dot"
image = "calls"
format = "svg"
"#,
        )
        .unwrap();
        cfg.apply_file(&file);

        assert_eq!(cfg.source_dir, PathBuf::from("/project"));
        assert_eq!(cfg.dot_path, PathBuf::from("graphs/calls.dot"));
        assert_eq!(cfg.image_basename, "calls");
        assert_eq!(cfg.image_format, "svg");
    }

    #[test]
    fn test_load_config_missing_is_none() {
        let dir = std::env::temp_dir().join(format!("callmap_cfg_none_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        assert!(load_config(&dir).unwrap().is_none());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_malformed_is_fatal() {
        let dir = std::env::temp_dir().join(format!("callmap_cfg_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("callmap.toml"), "not [valid toml").unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(!err.is_recoverable());

        fs::remove_dir_all(&dir).ok();
    }
}
