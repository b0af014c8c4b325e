use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use similar::TextDiff;
use tracing::{debug, info, warn};

use crate::decls::{CorrelationMap, DeclTable};
use crate::discover::is_patchable;
use crate::error::{DocpatchError, Result};
use crate::generate::DocGenerator;

/// Knobs for one synthesis pass.
#[derive(Debug)]
pub struct SynthesisOptions<'a> {
    /// Where patch artifacts land.
    pub patch_dir: &'a Path,
    /// Print patches to stdout instead of persisting anything.
    pub dry_run: bool,
    /// Warn (rather than quietly skip) when a docstring would land past the
    /// end of its file.
    pub warn_out_of_range: bool,
}

/// Outcome of one synthesis pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisSummary {
    /// Non-empty diffs produced (written to disk, or printed on dry runs).
    pub patches: usize,
    /// Docstrings spliced into working copies.
    pub insertions: usize,
    /// Declarations skipped because their insert position was out of range.
    pub skipped: usize,
}

/// Split into lines, each keeping its terminator (the last may lack one).
fn split_keep_ends(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Insert position under the cumulative shift model, or `None` when it
/// falls outside the working buffer. Index `len` itself is allowed — that
/// appends after the last line.
fn insertion_index(line: u32, shift: usize, len: usize) -> Option<usize> {
    let index = line.saturating_sub(1) as usize + shift;
    (index <= len).then_some(index)
}

/// Turn the undocumented subset of the table into one unified-diff patch
/// per affected file.
///
/// Source files are never touched: insertions happen in an in-memory
/// working copy, processed in ascending line order under a per-file
/// cumulative shift, and only the diff against the original is persisted
/// (or printed on dry runs).
pub fn synthesize_patches(
    table: &DeclTable,
    map: &CorrelationMap,
    generator: &dyn DocGenerator,
    options: &SynthesisOptions<'_>,
) -> Result<SynthesisSummary> {
    // BTreeMap keeps the file order deterministic run to run.
    let mut by_file: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, decl) in table.iter().enumerate() {
        if decl.is_documented() || !is_patchable(&decl.file) {
            continue;
        }
        // Only the record the name lookup points at receives a docstring.
        // `typedef struct foo { ... } foo;` declares its name twice, and
        // documenting both records would stack two comment blocks.
        if table.index_of(&decl.name) != Some(idx) {
            debug!("[patch] {} at {}:{} is shadowed; skipping", decl.name, decl.file, decl.line);
            continue;
        }
        by_file.entry(decl.file.as_str()).or_default().push(idx);
    }

    let mut summary = SynthesisSummary::default();
    let mut written_names: HashSet<String> = HashSet::new();

    for (file, mut indices) in by_file {
        // Stable sort: same-line declarations keep their insertion order.
        indices.sort_by_key(|&idx| table.get(idx).map_or(0, |d| d.line));

        let original = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!("[patch] cannot read {file}: {e}");
                continue;
            }
        };

        let mut working = split_keep_ends(&original);
        let mut shift = 0usize;

        for idx in indices {
            let Some(decl) = table.get(idx) else {
                continue;
            };

            let docstring = generator.docstring_for(decl, map.get(idx));
            // Unconditional trailing terminator so the last docstring line
            // does not glue itself onto the declaration below it.
            let doc_lines = split_keep_ends(&format!("{docstring}\n"));

            let Some(at) = insertion_index(decl.line, shift, working.len()) else {
                if options.warn_out_of_range {
                    warn!(
                        "[patch] {}:{} is past the end of the working copy; skipping {}",
                        file, decl.line, decl.name
                    );
                } else {
                    debug!("[patch] {}:{} out of range; skipping {}", file, decl.line, decl.name);
                }
                summary.skipped += 1;
                continue;
            };

            shift += doc_lines.len();
            working.splice(at..at, doc_lines);
            summary.insertions += 1;
            info!("[patch] {}:{} docs for {}", file, decl.line, decl.name);
        }

        let modified = working.concat();
        let diff = TextDiff::from_lines(original.as_str(), modified.as_str());
        let patch_text = diff.unified_diff().context_radius(3).header(file, file).to_string();
        if patch_text.trim().is_empty() {
            debug!("[patch] no changes for {file}");
            continue;
        }

        if options.dry_run {
            println!("Patch for {file}:");
            print!("{patch_text}");
            println!();
            summary.patches += 1;
            continue;
        }

        fs::create_dir_all(options.patch_dir)
            .map_err(|e| DocpatchError::io(options.patch_dir, e))?;

        let file_name = Path::new(file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        if !written_names.insert(file_name.clone()) {
            warn!("[patch] two patched files share the name {file_name}; the earlier patch is overwritten");
        }

        let patch_path = options.patch_dir.join(format!("{file_name}.patch"));
        fs::write(&patch_path, &patch_text).map_err(|e| DocpatchError::io(&patch_path, e))?;
        info!("[patch] wrote {}", patch_path.display());
        summary.patches += 1;
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "../../tests/src/patch/synth_tests.rs"]
mod tests;
