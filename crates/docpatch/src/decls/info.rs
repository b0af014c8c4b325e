use std::fmt;

use serde::{Deserialize, Serialize};

/// The declaration kinds the scanner considers documentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Function,
    Struct,
    Union,
    Enum,
    EnumConstant,
    Typedef,
}

impl DeclKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Struct => "struct",
            DeclKind::Union => "union",
            DeclKind::Enum => "enum",
            DeclKind::EnumConstant => "enum-constant",
            DeclKind::Typedef => "typedef",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A documentable declaration found in a header.
///
/// Immutable once built: correlation results live in a separate
/// [`CorrelationMap`](super::CorrelationMap) keyed by arena index rather
/// than being written back into the record.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Symbol name.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Whether the symbol was introduced through a typedef.
    pub is_typedef: bool,
    /// Path of the header that declares the symbol, as handed to the parser.
    pub file: String,
    /// 1-based line number in the declaring header.
    pub line: u32,
    /// Documentation comment already attached at the declaration site.
    pub docstring: Option<String>,
}

impl Declaration {
    pub fn is_documented(&self) -> bool {
        self.docstring.is_some()
    }
}

/// Full text span of a node, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// An out-of-line definition correlated with a declaration.
#[derive(Debug, Clone)]
pub struct Definition {
    /// Path of the file holding the definition.
    pub file: String,
    /// 1-based line number of the definition.
    pub line: u32,
    /// Whether the node is a full body rather than another forward declaration.
    pub is_definition: bool,
    /// Documentation comment attached at the definition site.
    pub docstring: Option<String>,
    /// Text span of the definition body, when the dump reports one.
    pub extent: Option<Extent>,
}
