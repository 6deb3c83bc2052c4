//! Record → record.

use crate::value::{Record, RecordType, Ty, Value};

use super::common::{copy_into, dest_type, source_type};

#[test]
fn copies_by_name_and_ignores_mismatches() {
    let from = Record::new(&source_type())
        .with("Name", "A")
        .unwrap()
        .with("Extra", 1i32)
        .unwrap();
    let (report, to) = copy_into(from, Record::new(&dest_type()));

    let to = to.as_record().unwrap();
    assert_eq!(to.get("Name"), Some(&Value::from("A")));
    assert_eq!(to.get("Other"), Some(&Value::I32(0)));
    assert_eq!(to.get("Extra"), None);
    // Fields missing on the destination are not counted.
    assert_eq!(report.written, 1);
    assert!(report.is_complete());
}

#[test]
fn names_are_case_sensitive() {
    let lower = RecordType::builder("Lower").field("name", Ty::Str).build();
    let from = Record::new(&source_type()).with("Name", "A").unwrap();
    let (report, to) = copy_into(from, Record::new(&lower));

    assert_eq!(to.as_record().unwrap().get("name"), Some(&Value::from("")));
    assert_eq!(report.written, 0);
}

#[test]
fn fields_are_coerced() {
    let from_ty = RecordType::builder("Form")
        .field("Age", Ty::Str)
        .field("Active", Ty::Bool)
        .field("Score", Ty::F64)
        .build();
    let to_ty = RecordType::builder("Model")
        .field("Age", Ty::U8)
        .field("Active", Ty::Str)
        .field("Score", Ty::I32)
        .build();
    let from = Record::new(&from_ty)
        .with("Age", "41")
        .unwrap()
        .with("Active", true)
        .unwrap()
        .with("Score", 97.6f64)
        .unwrap();
    let (report, to) = copy_into(from, Record::new(&to_ty));

    let to = to.as_record().unwrap();
    assert_eq!(to.get("Age"), Some(&Value::U8(41)));
    assert_eq!(to.get("Active"), Some(&Value::from("true")));
    assert_eq!(to.get("Score"), Some(&Value::I32(97)));
    assert_eq!(report.written, 3);
}

#[test]
fn unset_pointer_fields_are_allocated() {
    let to_ty = RecordType::builder("Opt").field("Name", Ty::ptr(Ty::Str)).build();
    let from = Record::new(&source_type()).with("Name", "A").unwrap();
    let (_, to) = copy_into(from, Record::new(&to_ty));

    assert_eq!(to.as_record().unwrap().get("Name"), Some(&Value::ptr("A")));
}

#[test]
fn pointer_field_stays_allocated_when_conversion_fails() {
    let from_ty = RecordType::builder("From").field("N", Ty::Str).build();
    let to_ty = RecordType::builder("To").field("N", Ty::ptr(Ty::I32)).build();
    let from = Record::new(&from_ty).with("N", "many").unwrap();
    let (report, to) = copy_into(from, Record::new(&to_ty));

    assert_eq!(to.as_record().unwrap().get("N"), Some(&Value::ptr(0i32)));
    assert_eq!(report.skipped, 1);
}

#[test]
fn read_only_fields_are_skipped() {
    let to_ty = RecordType::builder("Locked")
        .readonly("Name", Ty::Str)
        .field("Extra", Ty::I64)
        .build();
    let from = Record::new(&source_type())
        .with("Name", "A")
        .unwrap()
        .with("Extra", 5i32)
        .unwrap();
    let (report, to) = copy_into(from, Record::new(&to_ty));

    let to = to.as_record().unwrap();
    assert_eq!(to.get("Name"), Some(&Value::from("")));
    assert_eq!(to.get("Extra"), Some(&Value::I64(5)));
    assert_eq!(report, crate::CopyReport { written: 1, skipped: 1 });
}

#[test]
fn nested_records_are_copied_by_layout() {
    let inner_a = RecordType::builder("InnerA").field("X", Ty::I32).build();
    let inner_b = RecordType::builder("InnerB").field("X", Ty::I32).build();
    let outer_a = RecordType::builder("OuterA").field("In", Ty::Record(inner_a.clone())).build();
    let outer_b = RecordType::builder("OuterB").field("In", Ty::Record(inner_b.clone())).build();

    let inner = Record::new(&inner_a).with("X", 3i32).unwrap();
    let from = Record::new(&outer_a).with("In", inner).unwrap();
    let (_, to) = copy_into(from, Record::new(&outer_b));

    let expected = Record::new(&inner_b).with("X", 3i32).unwrap();
    assert_eq!(to.as_record().unwrap().get("In"), Some(&Value::Record(expected)));
}
