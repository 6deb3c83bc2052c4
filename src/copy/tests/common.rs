//! Shared fixtures for driver tests.

use std::sync::Arc;

use crate::coerce::DefaultCoercer;
use crate::copy::{Copier, CopyReport};
use crate::time::TimeConfig;
use crate::value::{RecordType, Ty, Value};

/// Copier pinned to the default layout and zone, independent of globals.
pub fn copier() -> Copier {
    Copier::with_coercer(DefaultCoercer::new(TimeConfig::default()))
}

/// Copy into a pointer to `to` and return the report and the pointee.
pub fn copy_into(from: impl Into<Value>, to: impl Into<Value>) -> (CopyReport, Value) {
    let mut dst = Value::ptr(to.into());
    let report = copier().copy(&from.into(), &mut dst);
    let Value::Ptr(ptr) = dst else {
        unreachable!("destination is always a pointer")
    };
    (report, ptr.get().cloned().expect("pointer stays allocated"))
}

/// `{Name string, Extra i32}`
pub fn source_type() -> Arc<RecordType> {
    RecordType::builder("Source")
        .field("Name", Ty::Str)
        .field("Extra", Ty::I32)
        .build()
}

/// `{Name string, Other i32}`
pub fn dest_type() -> Arc<RecordType> {
    RecordType::builder("Dest")
        .field("Name", Ty::Str)
        .field("Other", Ty::I32)
        .build()
}

/// `{Name string}`
pub fn named_type() -> Arc<RecordType> {
    RecordType::builder("Named").field("Name", Ty::Str).build()
}
