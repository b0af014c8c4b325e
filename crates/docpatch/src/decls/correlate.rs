use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::ParserConfig;
use crate::discover::{find_definition_files, paths_equivalent};
use crate::parser::parse_records;

use super::info::Definition;
use super::table::{CorrelationMap, DeclTable};

/// Walk every source file under `root` and attach the first full-body match
/// for each declared name.
///
/// The scan order is deterministic (`.c` files before `.h` files, each set
/// sorted by path) and a slot never changes once filled, so reruns over an
/// unchanged tree produce the same correlations. Names are the sole key:
/// a definition matches a declaration purely by spelling.
pub fn correlate(config: &ParserConfig, table: &DeclTable, root: &Path) -> CorrelationMap {
    let mut map = CorrelationMap::for_table(table);
    if table.is_empty() {
        return map;
    }

    let files = find_definition_files(root);
    debug!("[correlate] scanning {} file(s) under {}", files.len(), root.display());

    for file in &files {
        let records = match parse_records(config, file) {
            Ok(records) => records,
            Err(e) => {
                warn!("[correlate] skipping {}: {e}", file.display());
                continue;
            }
        };

        let file_str = file.display().to_string();
        for record in &records {
            if !record.is_definition || !paths_equivalent(&record.file, &file_str) {
                continue;
            }
            let Some(idx) = table.index_of(&record.name) else {
                continue;
            };
            if map.is_attached(idx) {
                continue;
            }
            map.attach(
                idx,
                Definition {
                    file: record.file.clone(),
                    line: record.line,
                    is_definition: record.is_definition,
                    docstring: record.doc.as_ref().and_then(|d| d.text()).map(str::to_owned),
                    extent: record.extent,
                },
            );
            info!("[correlate] {} -> {}:{}", record.name, record.file, record.line);
        }
    }

    info!(
        "[correlate] {} of {} declaration(s) have definitions",
        map.attached_count(),
        table.len()
    );
    map
}
