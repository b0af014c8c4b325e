use std::collections::HashMap;

use tracing::warn;

use super::info::{Declaration, Definition};

/// A recorded same-name insertion.
///
/// Both records stay in the arena; the lookup slot moves to the newer one,
/// so later correlation targets the most recent declaration of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    /// Arena index of the declaration that lost its lookup slot.
    pub shadowed: usize,
    /// Arena index of the declaration the slot now points at.
    pub winner: usize,
}

/// Arena of declarations with a name-keyed lookup.
///
/// Every inserted declaration is kept, even when names repeat across
/// headers; duplicates are surfaced as [`NameCollision`] events instead of
/// silently replacing each other.
#[derive(Debug, Default)]
pub struct DeclTable {
    decls: Vec<Declaration>,
    by_name: HashMap<String, usize>,
    collisions: Vec<NameCollision>,
}

impl DeclTable {
    pub fn new() -> Self {
        DeclTable::default()
    }

    /// Append a declaration, returning its arena index.
    pub fn insert(&mut self, decl: Declaration) -> usize {
        let idx = self.decls.len();
        if let Some(&previous) = self.by_name.get(&decl.name) {
            warn!(
                "duplicate declaration of `{}` ({}:{} shadows {}:{})",
                decl.name, decl.file, decl.line, self.decls[previous].file, self.decls[previous].line,
            );
            self.collisions.push(NameCollision {
                name: decl.name.clone(),
                shadowed: previous,
                winner: idx,
            });
        }
        self.by_name.insert(decl.name.clone(), idx);
        self.decls.push(decl);
        idx
    }

    /// Arena index the name lookup currently points at.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, idx: usize) -> Option<&Declaration> {
        self.decls.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    pub fn decls(&self) -> &[Declaration] {
        &self.decls
    }

    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Write-once definition slots parallel to a [`DeclTable`] arena.
///
/// Correlation fills slots by index as it scans files; a slot never changes
/// once filled, which is what makes the first matching definition win.
#[derive(Debug, Default)]
pub struct CorrelationMap {
    slots: Vec<Option<Definition>>,
}

impl CorrelationMap {
    pub fn for_table(table: &DeclTable) -> Self {
        CorrelationMap {
            slots: vec![None; table.len()],
        }
    }

    /// Fill the slot for `idx` unless it is already taken.
    ///
    /// Returns `true` when the definition was stored.
    pub fn attach(&mut self, idx: usize, def: Definition) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot @ None) => {
                *slot = Some(def);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&Definition> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub fn is_attached(&self, idx: usize) -> bool {
        self.get(idx).is_some()
    }

    pub fn attached_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src/decls/table_tests.rs"]
mod tests;
