//! File enumeration for the scan and correlation passes.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{DocpatchError, Result};

/// Extensions eligible for docstring insertion.
pub const PATCHABLE_EXTENSIONS: [&str; 4] = ["h", "c", "hpp", "cpp"];

pub fn is_patchable(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PATCHABLE_EXTENSIONS.contains(&ext))
}

/// Header files to scan for declarations: every `.h` under `root`, sorted.
pub fn find_headers(root: &Path) -> Vec<PathBuf> {
    files_with_extension(root, "h")
}

/// Files to scan for definitions.
///
/// `.c` files come before `.h` files so implementation sites win the
/// first-match correlation over redeclarations in other headers.
pub fn find_definition_files(root: &Path) -> Vec<PathBuf> {
    let mut files = files_with_extension(root, "c");
    files.extend(files_with_extension(root, "h"));
    files
}

fn files_with_extension(root: &Path, wanted: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(should_descend)
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == wanted))
        .map(DirEntry::into_path)
        .collect();
    files.sort();
    files
}

fn should_descend(entry: &DirEntry) -> bool {
    // The root itself is always entered, even when its name would otherwise
    // be skipped (e.g. scanning `.`).
    if entry.depth() == 0 {
        return true;
    }
    if !entry.file_type().is_dir() {
        return true;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    !matches!(name, "target" | "build" | "node_modules" | "out" | "bin" | "obj")
}

/// Fail fast when the scan root is missing or cannot be enumerated.
///
/// The walk reports an unreadable directory as per-entry errors that the
/// enumeration drops, which would turn a permission problem into a silent
/// empty scan.
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(DocpatchError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        ));
    }
    if root.is_dir() {
        std::fs::read_dir(root).map_err(|e| DocpatchError::io(root, e))?;
    }
    Ok(())
}

/// Decide whether two path spellings refer to the same file.
///
/// Canonicalization is authoritative whenever both paths resolve, so two
/// existing files that merely share a name stay distinct. File-name
/// equality is the last resort for spellings that no longer exist on disk.
pub fn paths_equivalent(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let pa = Path::new(a);
    let pb = Path::new(b);
    if let (Ok(ca), Ok(cb)) = (pa.canonicalize(), pb.canonicalize()) {
        return ca == cb;
    }
    matches!((pa.file_name(), pb.file_name()), (Some(fa), Some(fb)) if fa == fb)
}

#[cfg(test)]
#[path = "../tests/src/discover_tests.rs"]
mod tests;
