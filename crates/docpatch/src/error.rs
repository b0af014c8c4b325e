use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an operation rather than a single work item.
///
/// Most per-item failures (a header the compiler cannot dump, a refused
/// generation request, a patch that does not apply) are logged and skipped
/// at the call site; the variants here are the ones worth propagating.
#[derive(Debug, Error)]
pub enum DocpatchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("AST dump of {path} failed: {detail}")]
    AstDump { path: PathBuf, detail: String },

    #[error("malformed AST JSON: {0}")]
    Ast(#[from] serde_json::Error),

    #[error("invalid filter pattern `{pattern}`: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid config {path}: {detail}")]
    Config { path: PathBuf, detail: String },

    #[error("generation request failed: {0}")]
    Generate(#[from] reqwest::Error),
}

impl DocpatchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocpatchError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocpatchError>;
