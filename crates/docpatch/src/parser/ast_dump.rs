use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{DocpatchError, Result};

fn dump_args(config: &ParserConfig, file: &Path) -> Vec<String> {
    let mut args = vec![
        format!("-std={}", config.std),
        "-Xclang".to_string(),
        "-ast-dump=json".to_string(),
        "-fsyntax-only".to_string(),
        "-fno-color-diagnostics".to_string(),
    ];
    args.extend(config.extra_args.iter().cloned());
    args.push(file.display().to_string());
    args
}

/// Run the configured compiler's AST dump and return the raw JSON string.
///
/// A non-zero exit does not fail the dump on its own: headers that do not
/// compile cleanly still produce a partial AST that is usually good enough
/// to scan. The dump only fails when no usable JSON came back at all.
pub(crate) fn run_ast_dump(config: &ParserConfig, file: &Path) -> Result<String> {
    let args = dump_args(config, file);

    debug!("AST dump: {} {}", config.binary, args.join(" "));

    let output = Command::new(&config.binary)
        .args(&args)
        .output()
        .map_err(|e| DocpatchError::AstDump {
            path: file.to_path_buf(),
            detail: format!("failed to run `{}`: {e}", config.binary),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            if line.contains("error:") {
                warn!("[ast-dump] compiler error: {line}");
            }
        }
        debug!("[ast-dump] exited with non-zero status (partial AST may still be usable)");
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if stdout.is_empty() || !stdout.starts_with('{') {
        return Err(DocpatchError::AstDump {
            path: file.to_path_buf(),
            detail: "produced no usable JSON".to_string(),
        });
    }

    debug!("[ast-dump] produced {} bytes of JSON for {}", stdout.len(), file.display());

    Ok(stdout)
}

#[cfg(test)]
#[path = "../../tests/src/parser/ast_dump_tests.rs"]
mod tests;
