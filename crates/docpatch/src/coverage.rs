use std::collections::BTreeMap;
use std::fmt;

use crate::decls::{CorrelationMap, DeclKind, DeclTable};

/// Documentation coverage counters for one declaration kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub declared: usize,
    pub defined: usize,
    pub documented: usize,
    pub undocumented: usize,
}

/// Read-only coverage summary over a correlated declaration table.
#[derive(Debug, Default)]
pub struct CoverageReport {
    pub per_kind: BTreeMap<DeclKind, KindCounts>,
    pub totals: KindCounts,
    /// Names declared but never defined anywhere in the scanned tree.
    pub missing_definitions: Vec<String>,
    /// Same-name declarations that shadowed an earlier table entry.
    pub collisions: usize,
}

impl CoverageReport {
    pub fn collect(table: &DeclTable, map: &CorrelationMap) -> Self {
        let mut report = CoverageReport::default();

        for (idx, decl) in table.iter().enumerate() {
            let counts = report.per_kind.entry(decl.kind).or_default();
            counts.declared += 1;
            report.totals.declared += 1;

            if map.is_attached(idx) {
                counts.defined += 1;
                report.totals.defined += 1;
            } else {
                report.missing_definitions.push(decl.name.clone());
            }

            if decl.is_documented() {
                counts.documented += 1;
                report.totals.documented += 1;
            } else {
                counts.undocumented += 1;
                report.totals.undocumented += 1;
            }
        }

        report.collisions = table.collisions().len();
        report
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Declaration statistics:")?;
        writeln!(f, "{}", "-".repeat(50))?;

        for (kind, counts) in &self.per_kind {
            writeln!(f)?;
            writeln!(f, "{kind}:")?;
            writeln!(f, "  declared:     {}", counts.declared)?;
            writeln!(f, "  defined:      {}", counts.defined)?;
            writeln!(f, "  documented:   {}", counts.documented)?;
            writeln!(f, "  undocumented: {}", counts.undocumented)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "total declared:     {}", self.totals.declared)?;
        writeln!(f, "total defined:      {}", self.totals.defined)?;
        writeln!(f, "total documented:   {}", self.totals.documented)?;
        writeln!(f, "total undocumented: {}", self.totals.undocumented)?;

        if !self.missing_definitions.is_empty() {
            writeln!(f)?;
            writeln!(f, "declarations without definitions ({}):", self.missing_definitions.len())?;
            for name in &self.missing_definitions {
                writeln!(f, "  - {name}")?;
            }
        }

        if self.collisions > 0 {
            writeln!(f)?;
            writeln!(f, "shadowed duplicate names: {}", self.collisions)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/src/coverage_tests.rs"]
mod tests;
