use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

/// Outcome of one `--apply-patches` pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub failed: usize,
}

fn patch_files(patch_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(patch_dir) else {
        return Vec::new();
    };
    let mut patches: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "patch"))
        .collect();
    patches.sort();
    patches
}

/// Apply every persisted patch under `patch_dir` with `patch -p0 --forward`.
///
/// Paths inside the patches resolve relative to the current working
/// directory, the same way they were recorded at synthesis time. A patch
/// that fails to apply is reported and the pass moves on; there is no
/// rollback of the ones already applied.
pub fn apply_patches(patch_dir: &Path) -> ApplySummary {
    let mut summary = ApplySummary::default();

    if !patch_dir.is_dir() {
        warn!("[apply] patch directory {} does not exist", patch_dir.display());
        return summary;
    }

    let patches = patch_files(patch_dir);
    if patches.is_empty() {
        warn!("[apply] no patch files in {}", patch_dir.display());
        return summary;
    }

    for patch in &patches {
        // Null stdin keeps patch(1) from stopping at a "File to patch:" prompt.
        let output = match Command::new("patch")
            .args(["-p0", "--forward", "-i"])
            .arg(patch)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                warn!("[apply] failed to run patch for {}: {e}", patch.display());
                summary.failed += 1;
                continue;
            }
        };

        if output.status.success() {
            info!("[apply] applied {}", patch.display());
            summary.applied += 1;
        } else {
            // patch(1) reports rejected hunks on stdout, other failures on stderr.
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() { stdout } else { stderr };
            warn!("[apply] {} failed: {}", patch.display(), detail.trim());
            summary.failed += 1;
        }
    }

    info!("[apply] {} applied, {} failed", summary.applied, summary.failed);
    summary
}

#[cfg(test)]
#[path = "../../tests/src/patch/apply_tests.rs"]
mod tests;
