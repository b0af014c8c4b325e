use clang_ast::SourceRange;

use crate::decls::{DeclKind, Extent};

use super::clang_nodes::{Clang, DeclData, Node, resolve_loc};

/// One documentable node from the parser's document-order stream.
#[derive(Debug, Clone)]
pub struct SyntaxRecord {
    pub kind: DeclKind,
    pub name: String,
    /// File the node was spelled in (includes drag in foreign files).
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub col: u32,
    /// Full text span, when the dump reports one.
    pub extent: Option<Extent>,
    /// Whether the node is a full body rather than a forward declaration.
    pub is_definition: bool,
    /// Documentation comment attached to the node.
    pub doc: Option<DocComment>,
}

/// Documentation comment reassembled from the dump's comment subtree.
#[derive(Debug, Clone, Default)]
pub struct DocComment {
    /// Every text line of the comment.
    pub full: String,
    /// First paragraph only.
    pub brief: String,
}

impl DocComment {
    /// The full comment when present, else the brief, else nothing.
    pub fn text(&self) -> Option<&str> {
        if !self.full.is_empty() {
            Some(&self.full)
        } else if !self.brief.is_empty() {
            Some(&self.brief)
        } else {
            None
        }
    }
}

/// Collect a declaration node into the record stream.
fn collect_decl(
    node: &Node,
    data: &DeclData,
    kind: DeclKind,
    is_definition: bool,
    records: &mut Vec<SyntaxRecord>,
) {
    // Anonymous records and enums have nothing to hang a docstring on.
    let name = match data.name() {
        Some(n) if !n.is_empty() => n,
        _ => return,
    };

    if data.is_implicit() {
        return;
    }

    // For declarations, prefer spelling location so macro-generated declarations
    // resolve to the declaration text in the macro body instead of call-site lines.
    let bare = match data
        .loc
        .as_ref()
        .and_then(|loc| loc.spelling_loc.as_ref().or(loc.expansion_loc.as_ref()))
        .or_else(|| data.loc.as_ref().and_then(resolve_loc))
    {
        Some(bare) if bare.line > 0 => bare,
        _ => return,
    };

    records.push(SyntaxRecord {
        kind,
        name: name.to_owned(),
        file: bare.file.to_string(),
        line: bare.line as u32,
        col: bare.col as u32,
        extent: extent_of(data.range.as_ref()),
        is_definition,
        doc: find_doc_comment(node),
    });
}

fn extent_of(range: Option<&SourceRange>) -> Option<Extent> {
    let range = range?;
    let begin = resolve_loc(&range.begin)?;
    let end = resolve_loc(&range.end)?;
    if begin.line == 0 || end.line == 0 {
        return None;
    }
    Some(Extent {
        start_line: begin.line as u32,
        start_col: begin.col as u32,
        end_line: end.line as u32,
        // `col` points at the last token's first character.
        end_col: (end.col + end.tok_len) as u32,
    })
}

/// A function definition carries its body as a direct CompoundStmt child.
fn has_body(node: &Node) -> bool {
    node.inner.iter().any(|child| matches!(child.kind, Clang::CompoundStmt { .. }))
}

/// Map a tag declaration to the documentable kind it declares.
///
/// C++ `class` is deliberately absent: the scanner covers the C surface of
/// a header, and classes do not fit the struct/union split downstream.
fn tag_kind(data: &DeclData) -> Option<DeclKind> {
    match data.tag() {
        Some("struct") => Some(DeclKind::Struct),
        Some("union") => Some(DeclKind::Union),
        _ => None,
    }
}

fn find_doc_comment(node: &Node) -> Option<DocComment> {
    let full_comment = node.inner.iter().find(|c| matches!(c.kind, Clang::FullComment(_)))?;

    let mut full_lines = Vec::new();
    collect_comment_text(full_comment, &mut full_lines);

    let brief_lines = full_comment
        .inner
        .iter()
        .find(|c| matches!(c.kind, Clang::ParagraphComment(_)))
        .map(|paragraph| {
            let mut lines = Vec::new();
            collect_comment_text(paragraph, &mut lines);
            lines
        })
        .unwrap_or_default();

    let doc = DocComment {
        full: full_lines.join("\n"),
        brief: brief_lines.join("\n"),
    };
    doc.text().is_some().then_some(doc)
}

fn collect_comment_text(node: &Node, out: &mut Vec<String>) {
    if let Clang::TextComment(t) = &node.kind {
        let text = t.text.trim();
        if !text.is_empty() {
            out.push(text.to_owned());
        }
    }
    for child in &node.inner {
        collect_comment_text(child, out);
    }
}

/// Recursively walk the typed AST in document order, collecting records.
pub(crate) fn walk(node: &Node, records: &mut Vec<SyntaxRecord>) {
    match &node.kind {
        Clang::FunctionDecl(d) => {
            collect_decl(node, d, DeclKind::Function, has_body(node), records);
        }
        Clang::RecordDecl(d) | Clang::CXXRecordDecl(d) => {
            if let Some(kind) = tag_kind(d) {
                collect_decl(node, d, kind, d.is_complete_definition(), records);
            }
        }
        Clang::EnumDecl(d) => {
            collect_decl(node, d, DeclKind::Enum, d.is_complete_definition(), records);
        }
        // Enum constants and typedefs are their own definition.
        Clang::EnumConstantDecl(d) => {
            collect_decl(node, d, DeclKind::EnumConstant, true, records);
        }
        Clang::TypedefDecl(d) => {
            collect_decl(node, d, DeclKind::Typedef, true, records);
        }

        Clang::CompoundStmt { .. }
        | Clang::FullComment(_)
        | Clang::ParagraphComment(_)
        | Clang::TextComment(_)
        | Clang::Other { .. } => {}
    }

    for child in &node.inner {
        walk(child, records);
    }
}

#[cfg(test)]
#[path = "../../tests/src/parser/walk_tests.rs"]
mod tests;
