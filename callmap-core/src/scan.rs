//! Sequential, deterministic source file discovery with directory pruning.
//!
//! The whole pipeline is single-threaded by design: files are discovered,
//! parsed, and walked one at a time. Discovery sorts its results so the
//! merged graph's key order is stable on a given machine even though the
//! underlying directory walk order is platform-defined.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories to exclude by default (standard Rust project conventions).
const EXCLUDED_DIRS: &[&str] = &["target", ".git", "node_modules", ".cargo"];

/// Checks if a directory entry should be pruned (excluded from traversal).
///
/// Called by `WalkDir::filter_entry`, which skips whole subtrees in O(1).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers all .rs files recursively under the root path.
///
/// Automatically excludes `target/`, `.git/`, `node_modules/`, and
/// `.cargo/`. Results are sorted by path.
pub fn gather_rs_files(root: &Path) -> Result<Vec<PathBuf>> {
    gather_rs_files_with_excludes(root, &[])
}

/// Gathers all .rs files with custom exclusion patterns.
///
/// Combines default exclusions with custom directory names for efficient
/// subtree skipping.
pub fn gather_rs_files_with_excludes(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!("Failed to gather .rs files from {}", root.display()))?;

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_tree(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "callmap_scan_{}_{}",
            label,
            std::process::id()
        ));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }

        fs::create_dir_all(dir.join("src/nested")).unwrap();
        fs::create_dir_all(dir.join("target/debug")).unwrap();

        fs::write(dir.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.join("src/nested/util.rs"), "pub fn util() {}").unwrap();
        fs::write(dir.join("src/notes.txt"), "not source").unwrap();
        fs::write(dir.join("target/debug/gen.rs"), "fn generated() {}").unwrap();

        dir
    }

    #[test]
    fn test_gather_finds_rs_files_only() {
        let dir = create_test_tree("find");
        let files = gather_rs_files(&dir).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("src/main.rs")));
        assert!(files.iter().any(|f| f.ends_with("src/nested/util.rs")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_prunes_target_dir() {
        let dir = create_test_tree("prune");
        let files = gather_rs_files(&dir).unwrap();

        assert!(!files.iter().any(|f| f.to_string_lossy().contains("target")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_results_sorted() {
        let dir = create_test_tree("sorted");
        let files = gather_rs_files(&dir).unwrap();
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_custom_excludes() {
        let dir = create_test_tree("excludes");
        let files = gather_rs_files_with_excludes(&dir, &["nested"]).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/main.rs"));

        fs::remove_dir_all(&dir).ok();
    }
}
