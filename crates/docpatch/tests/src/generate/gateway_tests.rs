use std::sync::atomic::{AtomicU64, Ordering};

use super::*;
use crate::decls::{DeclKind, Extent};

/// Create a unique temporary directory for each test.
fn test_dir() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("docpatch_gateway_{}_{id}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn decl(name: &str, file: &str, line: u32) -> Declaration {
    Declaration {
        name: name.to_string(),
        kind: DeclKind::Function,
        is_typedef: false,
        file: file.to_string(),
        line,
        docstring: None,
    }
}

#[test]
fn snippet_prefers_the_definition_extent() {
    let dir = test_dir();
    let source = dir.join("mc.c");
    fs::write(&source, "int a;\nint mc_init(void)\n{\n    return 0;\n}\n").unwrap();

    let d = decl("mc_init", "/elsewhere/mc.h", 1);
    let def = Definition {
        file: source.to_string_lossy().into_owned(),
        line: 2,
        is_definition: true,
        docstring: None,
        extent: Some(Extent { start_line: 2, start_col: 1, end_line: 5, end_col: 2 }),
    };

    let snippet = source_snippet(&d, Some(&def)).unwrap();
    assert_eq!(snippet, "int mc_init(void)\n{\n    return 0;\n}\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn snippet_falls_back_to_single_lines() {
    let dir = test_dir();
    let header = dir.join("mc.h");
    fs::write(&header, "#pragma once\nint mc_free(void);\n").unwrap();
    let header_str = header.to_string_lossy().into_owned();

    // No definition: the declaration's own line.
    let d = decl("mc_free", &header_str, 2);
    assert_eq!(source_snippet(&d, None).unwrap(), "int mc_free(void);\n");

    // A definition without an extent: its single line.
    let def = Definition {
        file: header_str,
        line: 1,
        is_definition: true,
        docstring: None,
        extent: None,
    };
    assert_eq!(source_snippet(&d, Some(&def)).unwrap(), "#pragma once\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn snippet_read_failures_surface_as_io_errors() {
    let d = decl("ghost", "/nonexistent/ghost.h", 1);
    assert!(source_snippet(&d, None).is_err());
}

#[test]
fn prompt_embeds_the_snippet_in_a_code_fence() {
    let prompt = build_prompt("int mc_init(void);");
    assert!(prompt.starts_with(PROMPT_PREAMBLE));
    assert!(prompt.contains("```\nint mc_init(void);\n```"));
}

#[test]
fn placeholder_is_a_well_formed_c_comment() {
    let text = placeholder("mc_init", "connection refused");
    assert!(text.starts_with("/*"));
    assert!(text.ends_with("*/"));
    assert!(text.contains("mc_init"));
    assert!(text.contains("connection refused"));
}

#[test]
fn audit_files_capture_the_exchange() {
    let dir = test_dir();
    let generator = OllamaGenerator::new(&GeneratorConfig::default(), Some(dir.clone())).unwrap();

    generator.write_audit("mc_init", "the query", "the result");

    let body = fs::read_to_string(dir.join("out_mc_init.txt")).unwrap();
    assert_eq!(body, "query:\nthe query\n\nresult:\nthe result\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn disabled_audit_writes_nothing() {
    let dir = test_dir();
    let generator = OllamaGenerator::new(&GeneratorConfig::default(), None).unwrap();

    generator.write_audit("mc_init", "q", "r");

    assert!(fs::read_dir(&dir).unwrap().next().is_none());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreachable_backend_degrades_to_a_placeholder() {
    let dir = test_dir();
    let source = dir.join("mc.h");
    fs::write(&source, "int mc_init(void);\n").unwrap();

    // Port 1 refuses immediately, so this does not wait on a real backend.
    let config = GeneratorConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        model: "m".to_string(),
        audit_dir: dir.clone(),
    };
    let generator = OllamaGenerator::new(&config, Some(dir.clone())).unwrap();
    let d = decl("mc_init", &source.to_string_lossy(), 1);

    let text = generator.docstring_for(&d, None);
    assert!(text.starts_with("/*"), "transport failure must still yield a comment: {text}");
    assert!(text.contains("mc_init"));
    assert!(
        dir.join("out_mc_init.txt").exists(),
        "the failed exchange is still recorded for audit"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_source_skips_the_backend_entirely() {
    let dir = test_dir();
    let generator = OllamaGenerator::new(&GeneratorConfig::default(), Some(dir.clone())).unwrap();
    let d = decl("ghost", "/nonexistent/ghost.h", 1);

    let text = generator.docstring_for(&d, None);
    assert!(text.starts_with("/*"));
    assert!(
        !dir.join("out_ghost.txt").exists(),
        "no prompt was built, so there is nothing to audit"
    );

    let _ = fs::remove_dir_all(&dir);
}
