//! Structural copy driver.
//!
//! Inspects the shapes of the source and destination and picks a strategy:
//!
//! | source | destination | strategy |
//! |---|---|---|
//! | sequence | sequence | element-wise, unconvertible elements dropped |
//! | record | record | field-wise by exact name |
//! | map | map | entry-wise, key and value must both convert |
//! | map | record | text keys name destination fields |
//! | record | map | field names become keys |
//! | anything else | | one unit conversion |
//!
//! Every unit is handed to a [`Coerce`] strategy. Nothing is ever reported as
//! an error: units that do not convert are skipped, so a copy can be partial.
//! [`CopyReport`] counts written and skipped units for callers that need to
//! tell a partial copy from a complete one.

use crate::coerce::{Coerce, DefaultCoercer};
use crate::value::{Map, Record, Seq, Ty, Value};

/// Outcome counts of one copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Units the strategy wrote.
    pub written: usize,
    /// Units that were skipped (unconvertible, read-only or nil).
    pub skipped: usize,
}

impl CopyReport {
    /// Whether no unit was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    fn record(&mut self, written: bool) {
        if written {
            self.written += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Copies values between shapes using a [`Coerce`] strategy.
///
/// # Example
///
/// ```
/// use value_copy::{Copier, Seq, Ty, Value};
///
/// let from = Value::Seq(Seq::from_items(Ty::Str, ["1", "x", "3"]));
/// let mut to = Value::ptr(Seq::new(Ty::I32));
///
/// let report = Copier::new().copy(&from, &mut to);
/// assert_eq!(report.written, 2);
/// assert_eq!(report.skipped, 1);
/// assert_eq!(to.as_seq().unwrap().items(), [Value::I32(1), Value::I32(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct Copier<C = DefaultCoercer> {
    coercer: C,
}

impl Copier {
    /// Copier using [`DefaultCoercer::default`].
    pub fn new() -> Self {
        Self::with_coercer(DefaultCoercer::default())
    }
}

impl Default for Copier {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Coerce> Copier<C> {
    /// Copier using the given strategy.
    pub fn with_coercer(coercer: C) -> Self {
        Self { coercer }
    }

    /// The strategy in use.
    pub fn coercer(&self) -> &C {
        &self.coercer
    }

    /// Copy `from` into the slot `to` points at.
    ///
    /// `to` must be a non-nil [`Value::Ptr`]; anything else leaves it
    /// untouched. A nil source is a no-op as well.
    pub fn copy(&self, from: &Value, to: &mut Value) -> CopyReport {
        let mut report = CopyReport::default();

        if !matches!(to, Value::Ptr(_)) {
            tracing::debug!(to = %to.ty(), "destination is not a pointer, nothing copied");
            return report;
        }
        let Some(from) = from.indirect() else {
            tracing::debug!("source is nil, nothing copied");
            return report;
        };
        let Some(to) = to.indirect_mut() else {
            tracing::debug!("destination pointer is nil, nothing copied");
            return report;
        };

        match (from, to) {
            (Value::Seq(from), Value::Seq(to)) => self.seq_to_seq(from, to, &mut report),
            (Value::Record(from), Value::Record(to)) => {
                self.record_to_record(from, to, &mut report)
            }
            (Value::Map(from), Value::Map(to)) => self.map_to_map(from, to, &mut report),
            (Value::Map(from), Value::Record(to)) => self.map_to_record(from, to, &mut report),
            (Value::Record(from), Value::Map(to)) => self.record_to_map(from, to, &mut report),
            (from, to) => report.record(self.coercer.coerce(from, to)),
        }

        report
    }

    fn seq_to_seq(&self, from: &Seq, to: &mut Seq, report: &mut CopyReport) {
        let elem = to.elem().clone();
        for (index, item) in from.items().iter().enumerate() {
            let mut slot = elem.alloc();
            if self.coercer.coerce(item, &mut slot) {
                to.push(slot);
                report.record(true);
            } else {
                tracing::debug!(index, to = %elem, "element skipped");
                report.record(false);
            }
        }
    }

    fn record_to_record(&self, from: &Record, to: &mut Record, report: &mut CopyReport) {
        for (name, value) in from.iter() {
            if let Some(written) = self.write_field(value, name, to) {
                report.record(written);
            }
        }
    }

    fn map_to_map(&self, from: &Map, to: &mut Map, report: &mut CopyReport) {
        to.ensure_allocated();
        for (key, value) in from.iter() {
            let written = self.write_entry(key, value, to);
            report.record(written);
        }
    }

    fn map_to_record(&self, from: &Map, to: &mut Record, report: &mut CopyReport) {
        for (key, value) in from.iter() {
            let Some(name) = key.as_str() else {
                continue;
            };
            if let Some(written) = self.write_field(value, name, to) {
                report.record(written);
            }
        }
    }

    fn record_to_map(&self, from: &Record, to: &mut Map, report: &mut CopyReport) {
        to.ensure_allocated();
        for (name, value) in from.iter() {
            let written = self.write_entry(&Value::from(name), value, to);
            report.record(written);
        }
    }

    /// Convert `value` into the destination field `name`.
    ///
    /// Returns `None` when the destination has no such field, which does not
    /// count as a skipped unit.
    fn write_field(&self, value: &Value, name: &str, to: &mut Record) -> Option<bool> {
        let def = to.record_type().field(name)?;
        if !def.writable {
            tracing::debug!(field = name, record = to.record_type().name(), "read-only field skipped");
            return Some(false);
        }
        let slot = to.get_mut(name)?;
        if let Value::Ptr(ptr) = &mut *slot {
            ptr.ensure_allocated();
        }
        let written = self.coercer.coerce(value, slot);
        if !written {
            tracing::debug!(field = name, "field skipped");
        }
        Some(written)
    }

    /// Insert `key → value` only if both convert.
    fn write_entry(&self, key: &Value, value: &Value, to: &mut Map) -> bool {
        let key_ty: &Ty = to.key_ty();
        let mut key_slot = key_ty.alloc();
        if !self.coercer.coerce(key, &mut key_slot) {
            tracing::debug!(key = %key, to = %key_ty, "entry skipped, key does not convert");
            return false;
        }
        let value_ty = to.value_ty();
        let mut value_slot = value_ty.alloc();
        if !self.coercer.coerce(value, &mut value_slot) {
            tracing::debug!(key = %key, to = %value_ty, "entry skipped, value does not convert");
            return false;
        }
        to.insert(key_slot, value_slot);
        true
    }
}

/// Copy `from` into the slot `to` points at, using the default strategy.
///
/// Best effort: units that do not convert are silently left out, and the
/// caller cannot tell a partial copy from a complete one. Use
/// [`Copier::copy`] to get a [`CopyReport`].
///
/// # Example
///
/// ```
/// use value_copy::{Record, RecordType, Ty, Value, copy};
///
/// let src_ty = RecordType::builder("Src")
///     .field("Name", Ty::Str)
///     .field("Extra", Ty::I32)
///     .build();
/// let dst_ty = RecordType::builder("Dst")
///     .field("Name", Ty::Str)
///     .field("Other", Ty::I32)
///     .build();
///
/// let from = Record::new(&src_ty).with("Name", "A")?.with("Extra", 1i32)?;
/// let mut to = Value::ptr(Record::new(&dst_ty));
/// copy(&from.into(), &mut to);
///
/// let to = to.as_record().unwrap();
/// assert_eq!(to.get("Name"), Some(&Value::from("A")));
/// assert_eq!(to.get("Other"), Some(&Value::I32(0)));
/// # Ok::<(), value_copy::ValueError>(())
/// ```
pub fn copy(from: &Value, to: &mut Value) {
    Copier::new().copy(from, to);
}

#[cfg(test)]
mod tests;
