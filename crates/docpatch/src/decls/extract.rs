use std::path::Path;

use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::discover::paths_equivalent;
use crate::filter::RuleSet;
use crate::parser::{SyntaxRecord, parse_records};

use super::info::{DeclKind, Declaration};
use super::table::DeclTable;

/// Fold one header's documentable records into the table.
///
/// Records whose location lies outside `header` (nodes dragged in through
/// includes) are ignored, as are declarations the rule set rejects.
pub fn extract_into(table: &mut DeclTable, records: &[SyntaxRecord], header: &Path, rules: &RuleSet) {
    let header_str = header.display().to_string();
    for record in records {
        if !paths_equivalent(&record.file, &header_str) {
            continue;
        }
        if !rules.accepts(&record.name, record.kind) {
            continue;
        }
        table.insert(Declaration {
            name: record.name.clone(),
            kind: record.kind,
            is_typedef: record.kind == DeclKind::Typedef,
            file: record.file.clone(),
            line: record.line,
            docstring: record.doc.as_ref().and_then(|d| d.text()).map(str::to_owned),
        });
    }
}

/// Parse one header and collect its declarations.
///
/// A header the compiler cannot dump is skipped with a warning so its
/// siblings still get scanned.
pub fn extract_header(config: &ParserConfig, header: &Path, rules: &RuleSet, table: &mut DeclTable) {
    match parse_records(config, header) {
        Ok(records) => {
            let before = table.len();
            extract_into(table, &records, header, rules);
            info!("[scan] {}: {} declaration(s)", header.display(), table.len() - before);
        }
        Err(e) => warn!("[scan] skipping {}: {e}", header.display()),
    }
}

#[cfg(test)]
#[path = "../../tests/src/decls/extract_tests.rs"]
mod tests;
