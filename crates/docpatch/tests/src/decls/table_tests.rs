use super::*;
use crate::decls::DeclKind;

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

fn def(file: &str, line: u32) -> Definition {
    Definition {
        file: file.to_string(),
        line,
        is_definition: true,
        docstring: None,
        extent: None,
    }
}

#[test]
fn insert_keeps_every_record() {
    let mut table = DeclTable::new();
    table.insert(decl("a", "one.h", 1));
    table.insert(decl("b", "one.h", 2));
    table.insert(decl("a", "two.h", 7));

    assert_eq!(table.len(), 3, "shadowed declarations stay in the arena");
    assert_eq!(table.decls()[0].file, "one.h");
    assert_eq!(table.decls()[2].file, "two.h");
}

#[test]
fn duplicate_names_repoint_the_lookup_and_record_a_collision() {
    let mut table = DeclTable::new();
    let first = table.insert(decl("a", "one.h", 1));
    table.insert(decl("b", "one.h", 2));
    let second = table.insert(decl("a", "two.h", 7));

    assert_eq!(table.index_of("a"), Some(second), "the most recent declaration wins the lookup");
    assert_eq!(table.index_of("b"), Some(1));
    assert_eq!(table.index_of("missing"), None);

    let collisions = table.collisions();
    assert_eq!(collisions.len(), 1);
    assert_eq!(collisions[0].name, "a");
    assert_eq!(collisions[0].shadowed, first);
    assert_eq!(collisions[0].winner, second);
}

#[test]
fn attach_is_write_once() {
    let mut table = DeclTable::new();
    table.insert(decl("a", "one.h", 1));
    table.insert(decl("b", "one.h", 2));

    let mut map = CorrelationMap::for_table(&table);
    assert_eq!(map.len(), 2);
    assert!(!map.is_attached(0));

    assert!(map.attach(0, def("one.c", 10)));
    assert!(!map.attach(0, def("other.c", 99)), "a second definition must be refused");

    let kept = map.get(0).expect("first attach sticks");
    assert_eq!(kept.file, "one.c");
    assert_eq!(kept.line, 10);
    assert!(map.get(1).is_none());
    assert_eq!(map.attached_count(), 1);
}

#[test]
fn attach_out_of_bounds_is_refused() {
    let mut table = DeclTable::new();
    table.insert(decl("a", "one.h", 1));
    let mut map = CorrelationMap::for_table(&table);
    assert!(!map.attach(5, def("one.c", 10)));
    assert_eq!(map.attached_count(), 0);
}

#[test]
fn empty_table_yields_an_empty_map() {
    let table = DeclTable::new();
    assert!(table.is_empty());
    let map = CorrelationMap::for_table(&table);
    assert!(map.is_empty());
}
