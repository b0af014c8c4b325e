//! The declaration table and the two pipeline phases around it.
//!
//! Extraction fills an arena of immutable [`Declaration`]s; correlation then
//! assembles a write-once [`CorrelationMap`] of definitions keyed by arena
//! index. Nothing mutates a declaration after it is inserted.

mod correlate;
mod extract;
mod info;
mod table;

pub use correlate::correlate;
pub use extract::{extract_header, extract_into};
pub use info::{DeclKind, Declaration, Definition, Extent};
pub use table::{CorrelationMap, DeclTable, NameCollision};
