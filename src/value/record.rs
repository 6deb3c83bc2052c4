//! Record values.

use std::sync::Arc;

use super::{RecordType, Value};
use crate::error::ValueError;

/// A value of a [`RecordType`]: one value per declared field, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Value>,
}

impl Record {
    /// Zeroed record of the given type.
    pub fn new(ty: &Arc<RecordType>) -> Self {
        let values = ty.fields().iter().map(|f| f.ty.zero()).collect();
        Self {
            ty: ty.clone(),
            values,
        }
    }

    /// The record's type.
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    /// Field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.position(name).map(|i| &self.values[i])
    }

    /// Mutable field value by name.
    ///
    /// Ignores the field's `writable` flag; the copy driver checks it.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.ty.position(name).map(|i| &mut self.values[i])
    }

    /// Iterate `(field name, value)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name.as_str(), v))
    }

    /// Set a field, checking that the value has the declared type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValueError> {
        let value = value.into();
        let Some(index) = self.ty.position(name) else {
            return Err(ValueError::UnknownField {
                record: self.ty.name().to_string(),
                field: name.to_string(),
            });
        };
        let expected = &self.ty.fields()[index].ty;
        let found = value.ty();
        if *expected != found {
            return Err(ValueError::TypeMismatch {
                field: name.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Chaining form of [`set`](Self::set).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, ValueError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Rebuild with another type of identical layout.
    pub(crate) fn retyped(&self, ty: &Arc<RecordType>) -> Self {
        Self {
            ty: ty.clone(),
            values: self.values.clone(),
        }
    }

    /// Text rendering, if the type declares one.
    pub fn render(&self) -> Option<String> {
        self.ty.render().map(|render| render(self))
    }
}
