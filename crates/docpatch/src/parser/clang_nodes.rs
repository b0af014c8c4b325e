use clang_ast::{BareSourceLocation, SourceLocation, SourceRange};
use serde::Deserialize;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the scanner cares about.
///
/// Each variant corresponds to a Clang AST node `"kind"` value.
/// The `Other` fallback efficiently skips all unrecognized node kinds.
#[derive(Deserialize)]
pub enum Clang {
    // --- Declarations ---
    FunctionDecl(DeclData),
    RecordDecl(DeclData),
    CXXRecordDecl(DeclData),
    EnumDecl(DeclData),
    EnumConstantDecl(DeclData),
    TypedefDecl(DeclData),

    // --- Statements ---
    // A CompoundStmt directly under a FunctionDecl is the function body;
    // its presence is what separates a definition from a prototype.
    CompoundStmt {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },

    // --- Documentation comments ---
    FullComment(CommentData),
    ParagraphComment(CommentData),
    TextComment(TextCommentData),

    // --- Catch-all ---
    // The `loc` and `range` fields MUST be deserialized even for unrecognized
    // node kinds. The `clang-ast` crate tracks "current file" state across the
    // deserialization stream via `SourceLocation`; if we skip locations for
    // nodes that set the file path, all subsequent nodes inherit an empty file.
    #[allow(dead_code)]
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Common data for all declaration nodes.
#[derive(Deserialize, Debug)]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    /// `"struct"`, `"union"`, `"class"` or `"enum"` on tag declarations.
    #[serde(rename = "tagUsed")]
    pub tag_used: Option<String>,
    /// Present (and `true`) only on tag declarations with a body.
    #[serde(rename = "completeDefinition")]
    pub complete_definition: Option<bool>,
}

/// Positional data for comment-tree nodes.
#[derive(Deserialize, Debug)]
pub struct CommentData {
    #[allow(dead_code)]
    pub loc: Option<SourceLocation>,
    #[allow(dead_code)]
    pub range: Option<SourceRange>,
}

/// A leaf text run inside a documentation comment.
#[derive(Deserialize, Debug)]
pub struct TextCommentData {
    #[serde(default)]
    pub text: String,
    #[allow(dead_code)]
    pub loc: Option<SourceLocation>,
    #[allow(dead_code)]
    pub range: Option<SourceRange>,
}

impl DeclData {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }
    pub fn tag(&self) -> Option<&str> {
        self.tag_used.as_deref()
    }
    pub fn is_complete_definition(&self) -> bool {
        self.complete_definition.unwrap_or(false)
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location (where a macro was invoked — the position
/// the user sees in their source file) over the spelling location (inside the
/// macro definition).
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}
