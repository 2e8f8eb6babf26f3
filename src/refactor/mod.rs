//! Quick-fix application
//!
//! Fixes are command objects captured during a scan and applied later,
//! independently of it. Application never assumes the file is unchanged:
//! a snapshot of the declaration header is re-verified first, and any
//! mismatch or I/O failure propagates to the caller instead of being
//! swallowed.

mod editor;
mod make_static;

pub use editor::{FileEditor, TextEdit};
pub use make_static::MakeStaticFix;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from applying a quick-fix
#[derive(Debug, Error)]
pub enum FixError {
    #[error("{path}: source changed since analysis, fix for '{name}' not applied")]
    Stale { path: PathBuf, name: String },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("edit at byte {offset} is out of bounds for {path}")]
    OutOfBounds { path: PathBuf, offset: usize },
}
