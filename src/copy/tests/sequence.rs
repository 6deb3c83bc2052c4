//! Sequence → sequence.

use crate::value::{Seq, Ty, Value};

use super::common::copy_into;

#[test]
fn unconvertible_elements_are_dropped() {
    let from = Seq::from_items(Ty::Str, ["1", "x", "3"]);
    let (report, to) = copy_into(from, Seq::new(Ty::I32));

    assert_eq!(to.as_seq().unwrap().items(), [Value::I32(1), Value::I32(3)]);
    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 1);
    assert!(!report.is_complete());
}

#[test]
fn appends_to_existing_items() {
    let from = Seq::from_items(Ty::I64, [2i64, 3]);
    let (report, to) = copy_into(from, Seq::from_items(Ty::I32, [1i32]));

    assert!(report.is_complete());
    assert_eq!(
        to.as_seq().unwrap().items(),
        [Value::I32(1), Value::I32(2), Value::I32(3)]
    );
}

#[test]
fn nil_elements_are_skipped() {
    let from = Seq::from_items(
        Ty::ptr(Ty::I32),
        [Value::ptr(1i32), Value::null(Ty::I32), Value::ptr(3i32)],
    );
    let (report, to) = copy_into(from, Seq::new(Ty::I32));

    assert_eq!(to.as_seq().unwrap().len(), 2);
    assert_eq!(report.skipped, 1);
}

#[test]
fn pointer_elements_are_allocated() {
    let from = Seq::from_items(Ty::Str, ["7"]);
    let (_, to) = copy_into(from, Seq::new(Ty::ptr(Ty::U16)));

    assert_eq!(to.as_seq().unwrap().items(), [Value::ptr(7u16)]);
}

#[test]
fn numbers_to_text() {
    let from = Seq::from_items(Ty::F32, [0.5f32, 3.14]);
    let (_, to) = copy_into(from, Seq::new(Ty::Str));

    assert_eq!(to.as_seq().unwrap().items(), [Value::from("0.5"), Value::from("3.14")]);
}

#[test]
fn identical_sequences() {
    let from = Seq::from_items(Ty::Bool, [true, false]);
    let (report, to) = copy_into(from.clone(), Seq::new(Ty::Bool));

    assert_eq!(report.written, 2);
    assert_eq!(to, Value::Seq(from));
}
