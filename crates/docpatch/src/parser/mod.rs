//! Clang-backed header parsing.
//!
//! The compiler is treated as a black box: it is invoked as a subprocess
//! with `-ast-dump=json`, the dump is deserialized through typed nodes, and
//! the tree is flattened into document-order [`SyntaxRecord`]s.

mod ast_dump;
pub mod clang_nodes;
mod walk;

use std::path::Path;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::Result;

pub use walk::{DocComment, SyntaxRecord};

/// Parse one file with the configured compiler and flatten the typed AST
/// into document-order records.
pub fn parse_records(config: &ParserConfig, path: &Path) -> Result<Vec<SyntaxRecord>> {
    let json = ast_dump::run_ast_dump(config, path)?;
    let root: clang_nodes::Node = serde_json::from_str(&json)?;

    let mut records = Vec::new();
    walk::walk(&root, &mut records);
    debug!("[parse] {} record(s) from {}", records.len(), path.display());
    Ok(records)
}
