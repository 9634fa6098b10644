//! End-to-end behaviour of the document API.

use cellgrid_core::{CellRef, Document, EditOutcome, ErrorKind, LoadOutcome, Value};
use std::path::PathBuf;

fn at(name: &str) -> CellRef {
    CellRef::from_str(name).unwrap()
}

fn value(doc: &Document, name: &str) -> Option<Value> {
    doc.get_all_values().get(&at(name)).cloned().flatten()
}

struct Cleanup(PathBuf);
impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cellgrid_it_{}_{}_{}_{:?}.json",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
        std::thread::current().id(),
    ))
}

#[test]
fn test_arithmetic_across_cells() {
    let mut doc = Document::new();
    doc.set_expression("A1", "10").unwrap();
    doc.set_expression("A2", "5").unwrap();
    doc.set_expression("B1", "=A1+A2").unwrap();
    assert_eq!(value(&doc, "B1"), Some(Value::int(15)));
}

#[test]
fn test_circular_reference_sentinel() {
    let mut doc = Document::new();
    doc.set_expression("X1", "=Y1").unwrap();
    let x1_before = value(&doc, "X1");
    let outcome = doc.set_expression("Y1", "=X1").unwrap();

    assert!(matches!(outcome, EditOutcome::CycleDetected(_)));
    assert_eq!(value(&doc, "Y1"), Some(Value::Error(ErrorKind::CircularReference)));
    assert_eq!(value(&doc, "X1"), x1_before);
    assert_eq!(doc.get_cell_display(&at("Y1")), "#CYCLE!");
}

#[test]
fn test_recalculation_is_idempotent() {
    let mut doc = Document::new();
    doc.set_expression("A1", "3").unwrap();
    doc.set_expression("B1", "=INC(A1) * 2").unwrap();
    doc.set_expression("C1", "=B1 > 7").unwrap();
    let before = doc.get_all_values();

    let outcome = doc.recalculate_all();
    assert_eq!(outcome.rounds, 1);
    assert_eq!(outcome.changed, 0);
    assert_eq!(doc.get_all_values(), before);
    assert_eq!(value(&doc, "C1"), Some(Value::Boolean(true)));
}

#[test]
fn test_forward_chain_propagates_leaf_edit() {
    let mut doc = Document::new();
    doc.set_expression("A1", "1").unwrap();
    for row in 2..=10 {
        doc.set_expression(&format!("A{}", row), &format!("=A{}*2", row - 1))
            .unwrap();
    }
    assert_eq!(value(&doc, "A10"), Some(Value::int(512)));

    let outcome = doc.set_expression("A1", "3").unwrap();
    match outcome {
        EditOutcome::Recalculated(recalc) => assert!(recalc.converged),
        other => panic!("expected recalculation, got {other:?}"),
    }
    assert_eq!(value(&doc, "A10"), Some(Value::int(1536)));
}

#[test]
fn test_round_trip_preserves_expressions_and_values() {
    let path = temp_path("round_trip");
    let _cleanup = Cleanup(path.clone());

    let mut doc = Document::new();
    doc.set_expression("A1", "10").unwrap();
    doc.set_expression("A2", "0").unwrap();
    doc.set_expression("B1", "=A1/A2").unwrap();
    doc.set_expression("B2", "=Z99").unwrap();
    doc.set_expression("C1", "=MMIN(A1, 4, INC(A2))").unwrap();
    doc.set_expression("C2", "TRUE").unwrap();
    doc.save_to_file(&path).unwrap();

    let mut loaded = Document::new();
    let outcome = loaded.load_from_file(&path).unwrap();
    assert!(matches!(outcome, LoadOutcome::Recalculated(_)));
    assert_eq!(loaded.get_all_values(), doc.get_all_values());
    for cell_ref in doc.cell_refs() {
        assert_eq!(
            loaded.get_or_create(&cell_ref).expression,
            doc.get_or_create(&cell_ref).expression
        );
    }
    assert_eq!(value(&loaded, "B1"), Some(Value::Error(ErrorKind::DivideByZero)));
    assert_eq!(value(&loaded, "B2"), Some(Value::Error(ErrorKind::UnknownReference)));
    assert_eq!(value(&loaded, "C1"), Some(Value::int(1)));
}

#[test]
fn test_row_and_column_deletion() {
    let mut doc = Document::new();
    doc.set_expression("A1", "2").unwrap();
    doc.set_expression("B1", "=A1*A1").unwrap();
    doc.set_expression("A2", "=B1+1").unwrap();

    doc.on_column_deleted("B").unwrap();
    assert_eq!(value(&doc, "A2"), Some(Value::Error(ErrorKind::TypeMismatch)));

    doc.on_row_deleted(1);
    assert!(doc.cell_refs() == vec![at("A2")]);
}
