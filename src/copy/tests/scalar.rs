//! Destination handling and whole-value conversions.

use crate::copy::{Copier, copy};
use crate::value::{Map, Record, Seq, Ty, Value};

use super::common::{copier, copy_into, named_type};

#[test]
fn scalar_to_scalar() {
    let (report, to) = copy_into(42i32, String::new());
    assert_eq!(to, Value::from("42"));
    assert_eq!(report.written, 1);

    let (report, to) = copy_into("x", 0i32);
    assert_eq!(to, Value::I32(0));
    assert_eq!(report.skipped, 1);
}

#[test]
fn non_pointer_destination_is_untouched() {
    let before = Value::Record(Record::new(&named_type()));
    let mut to = before.clone();
    let from = Map::from_entries(Ty::Str, Ty::Str, [("Name", "A")]);

    let report = copier().copy(&from.into(), &mut to);

    assert_eq!(to, before);
    assert_eq!(report.written + report.skipped, 0);
}

#[test]
fn nil_destination_pointer_is_untouched() {
    let mut to = Value::null(Ty::Str);
    copy(&Value::from("a"), &mut to);
    assert_eq!(to, Value::null(Ty::Str));
}

#[test]
fn nil_source_is_a_noop() {
    let mut to = Value::ptr("keep");
    copy(&Value::null(Ty::Str), &mut to);
    assert_eq!(to.as_str(), Some("keep"));
}

#[test]
fn mismatched_shapes_fall_back_to_unit_conversion() {
    let (report, to) = copy_into(Seq::from_items(Ty::I32, [1i32]), Record::new(&named_type()));
    assert_eq!(report.skipped, 1);
    assert_eq!(to, Value::Record(Record::new(&named_type())));
}

#[test]
fn custom_strategy_is_used_for_every_unit() {
    // Upper-case text, defer everything else to a no-op.
    let upper = |from: &Value, to: &mut Value| match (from.as_str(), to.indirect_mut()) {
        (Some(s), Some(slot @ Value::Str(_))) => {
            *slot = Value::from(s.to_uppercase());
            true
        }
        _ => false,
    };
    let copier = Copier::with_coercer(upper);

    let mut to = Value::ptr(Seq::new(Ty::Str));
    let from = Seq::from_items(Ty::Str, ["a", "b"]);
    let report = copier.copy(&from.into(), &mut to);

    assert_eq!(report.written, 2);
    assert_eq!(to.as_seq().unwrap().items(), [Value::from("A"), Value::from("B")]);
}

#[test]
fn custom_strategy_can_wrap_the_default() {
    let default = copier().coercer().clone();
    let no_bools = move |from: &Value, to: &mut Value| {
        !matches!(from, Value::Bool(_)) && crate::Coerce::coerce(&default, from, to)
    };

    let from = Seq::from_items(Ty::Bool, [true]);
    let mut to = Value::ptr(Seq::new(Ty::Str));
    let report = Copier::with_coercer(no_bools).copy(&from.into(), &mut to);

    assert_eq!(report.skipped, 1);
    assert!(to.as_seq().unwrap().is_empty());
}
