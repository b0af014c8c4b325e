use super::*;
use crate::decls::{Declaration, Definition};

fn decl(name: &str, kind: DeclKind, doc: Option<&str>) -> Declaration {
    Declaration {
        name: name.to_string(),
        kind,
        is_typedef: kind == DeclKind::Typedef,
        file: "/tree/include/mc.h".to_string(),
        line: 1,
        docstring: doc.map(str::to_owned),
    }
}

fn def(file: &str) -> Definition {
    Definition {
        file: file.to_string(),
        line: 10,
        is_definition: true,
        docstring: None,
        extent: None,
    }
}

#[test]
fn collect_counts_per_kind_and_in_total() {
    let mut table = DeclTable::new();
    table.insert(decl("mc_init", DeclKind::Function, Some("Sets things up.")));
    table.insert(decl("mc_free", DeclKind::Function, None));
    table.insert(decl("point", DeclKind::Struct, None));

    let mut map = CorrelationMap::for_table(&table);
    assert!(map.attach(0, def("/tree/src/mc.c")));

    let report = CoverageReport::collect(&table, &map);
    assert_eq!(report.totals.declared, 3);
    assert_eq!(report.totals.defined, 1);
    assert_eq!(report.totals.documented, 1);
    assert_eq!(report.totals.undocumented, 2);

    let functions = report.per_kind[&DeclKind::Function];
    assert_eq!(functions.declared, 2);
    assert_eq!(functions.defined, 1);
    assert_eq!(functions.documented, 1);
    assert_eq!(functions.undocumented, 1);

    let structs = report.per_kind[&DeclKind::Struct];
    assert_eq!(structs.declared, 1);
    assert_eq!(structs.defined, 0);

    assert_eq!(
        report.missing_definitions,
        vec!["mc_free".to_string(), "point".to_string()],
        "missing names keep table order"
    );
    assert_eq!(report.collisions, 0);
}

#[test]
fn empty_table_produces_an_empty_report() {
    let table = DeclTable::new();
    let map = CorrelationMap::for_table(&table);
    let report = CoverageReport::collect(&table, &map);

    assert!(report.per_kind.is_empty());
    assert_eq!(report.totals, KindCounts::default());
    assert!(report.missing_definitions.is_empty());
}

#[test]
fn display_renders_kinds_totals_missing_and_collisions() {
    let mut table = DeclTable::new();
    table.insert(decl("mc_run", DeclKind::Function, None));
    table.insert(decl("mc_run", DeclKind::Function, None));

    let map = CorrelationMap::for_table(&table);
    let report = CoverageReport::collect(&table, &map);
    let text = report.to_string();

    assert!(text.starts_with("Declaration statistics:\n"));
    assert!(text.contains("function:\n"));
    assert!(text.contains("  declared:     2"));
    assert!(text.contains("total declared:     2"));
    assert!(text.contains("total undocumented: 2"));
    assert!(text.contains("declarations without definitions (2):"));
    assert!(text.contains("  - mc_run"));
    assert!(text.contains("shadowed duplicate names: 1"));
}

#[test]
fn display_omits_empty_sections() {
    let mut table = DeclTable::new();
    table.insert(decl("mc_run", DeclKind::Function, Some("Runs.")));
    let mut map = CorrelationMap::for_table(&table);
    assert!(map.attach(0, def("/tree/src/mc.c")));

    let text = CoverageReport::collect(&table, &map).to_string();
    assert!(!text.contains("declarations without definitions"));
    assert!(!text.contains("shadowed duplicate names"));
}
