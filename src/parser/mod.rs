mod java;

pub use java::JavaParser;

use crate::model::SourceModel;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced while turning Java files into a [`SourceModel`]
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tree-sitter rejected the Java grammar: {0}")]
    Language(String),

    #[error("tree-sitter produced no syntax tree for {path}")]
    NoTree { path: PathBuf },
}

/// Sequential model builder, one file at a time
pub struct ModelBuilder {
    parser: JavaParser,
    model: SourceModel,
}

impl ModelBuilder {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            parser: JavaParser::new()?,
            model: SourceModel::new(),
        })
    }

    pub fn process_file(&mut self, path: &Path) -> Result<(), ParseError> {
        debug!("parsing {}", path.display());
        let file_model = self.parser.parse_file(path)?;
        self.model.merge(file_model);
        Ok(())
    }

    pub fn build(self) -> SourceModel {
        self.model
    }
}

/// Parallel model builder - parses files across rayon workers, then merges
pub struct ParallelModelBuilder;

impl ParallelModelBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_from_files(&self, files: &[PathBuf]) -> Result<SourceModel, ParseError> {
        let file_models: Result<Vec<SourceModel>, ParseError> = files
            .par_iter()
            .map(|path| {
                // tree-sitter parsers are not Sync, so each task owns one
                let mut parser = JavaParser::new()?;
                parser.parse_file(path)
            })
            .collect();

        let mut model = SourceModel::new();
        for file_model in file_models? {
            model.merge(file_model);
        }
        Ok(model)
    }
}

impl Default for ParallelModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
