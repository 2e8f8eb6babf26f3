//! Java file discovery
//!
//! Walks the target path with gitignore semantics and returns the `.java`
//! files to analyze, minus any configured exclude globs.

use crate::config::Config;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid exclude pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to walk {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
}

/// Finds Java source files under a root
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn find_files(&self, root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
        if root.is_file() {
            return Ok(if is_java(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.config.exclude {
            let negated = format!("!{pattern}");
            overrides
                .add(&negated)
                .map_err(|e| DiscoveryError::Pattern {
                    pattern: pattern.clone(),
                    source: e,
                })?;
        }
        let overrides = overrides.build().map_err(|e| DiscoveryError::Walk {
            path: root.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in WalkBuilder::new(root).overrides(overrides).build() {
            let entry = entry.map_err(|e| DiscoveryError::Walk {
                path: root.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if entry.file_type().map_or(false, |t| t.is_file()) && is_java(path) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        debug!("discovered {} java files under {}", files.len(), root.display());
        Ok(files)
    }
}

fn is_java(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "java")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_java_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("A.java"), "class A {}").unwrap();
        fs::write(dir.path().join("sub/B.java"), "class B {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let config = Config::default();
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["A.java", "B.java"]);
    }

    #[test]
    fn exclude_patterns_filter_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("Keep.java"), "class Keep {}").unwrap();
        fs::write(dir.path().join("generated/Gen.java"), "class Gen {}").unwrap();

        let config = Config {
            exclude: vec!["generated/**".to_string()],
            ..Config::default()
        };
        let files = FileFinder::new(&config).find_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Keep.java"));
    }

    #[test]
    fn single_file_root_is_returned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Only.java");
        fs::write(&file, "class Only {}").unwrap();

        let config = Config::default();
        let files = FileFinder::new(&config).find_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }
}
