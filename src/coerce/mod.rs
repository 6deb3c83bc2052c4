//! Unit-level value coercion.
//!
//! [`Coerce`] decides, for one source value and one destination slot, whether
//! and how to write a converted value. [`DefaultCoercer`] implements the
//! standard decision procedure; embedders can supply their own strategy to
//! [`Copier`](crate::Copier), typically wrapping the default one.
//!
//! # Decision procedure
//!
//! First match wins:
//!
//! 1. Follow pointer layers on both sides. A nil on either side: no write.
//! 2. Identical types: copy verbatim.
//! 3. Text destination: render booleans, integers, floats, timestamps and
//!    records with a text rendering. Anything else: no write.
//! 4. Text source, scalar destination: parse booleans, integers, floats and
//!    timestamps. Anything else: no write.
//! 5. Numeric ↔ numeric, or record → record of identical layout: convert.
//! 6. Otherwise: no write.
//!
//! A failed timestamp parse in step 4 still reports `true` without writing.

mod scalar;

use crate::config;
use crate::time::TimeConfig;
use crate::value::{Kind, Ty, Value};

pub use scalar::{convert, from_text, parse_bool, to_text};

/// Strategy for converting one value into one destination slot.
///
/// Returns whether the destination was written. Implementations must not
/// panic on unconvertible input; they return `false` instead.
pub trait Coerce {
    /// Attempt to write a value derived from `from` into `to`.
    fn coerce(&self, from: &Value, to: &mut Value) -> bool;
}

impl<F> Coerce for F
where
    F: Fn(&Value, &mut Value) -> bool,
{
    fn coerce(&self, from: &Value, to: &mut Value) -> bool {
        self(from, to)
    }
}

/// The standard decision procedure.
#[derive(Debug, Clone)]
pub struct DefaultCoercer {
    time: TimeConfig,
}

/// Snapshot of the process-wide time configuration.
impl Default for DefaultCoercer {
    fn default() -> Self {
        Self::new(config::time_config())
    }
}

impl DefaultCoercer {
    /// Coercer with an explicit time configuration.
    pub fn new(time: TimeConfig) -> Self {
        Self { time }
    }

    /// The time configuration in use.
    pub fn time_config(&self) -> &TimeConfig {
        &self.time
    }

    /// Text source into a non-text destination.
    fn parse_into(&self, text: &str, to: &mut Value, to_ty: &Ty) -> bool {
        if *to_ty == Ty::Time {
            match self.time.parse(text) {
                Ok(time) => *to = Value::Time(time),
                Err(err) => tracing::trace!(%err, "timestamp parse failed, destination left as is"),
            }
            return true;
        }

        match from_text(text, to_ty) {
            Some(value) => {
                *to = value;
                true
            }
            None => {
                tracing::trace!(text, to = %to_ty, "text does not parse");
                false
            }
        }
    }
}

impl Coerce for DefaultCoercer {
    fn coerce(&self, from: &Value, to: &mut Value) -> bool {
        let Some(from) = from.indirect() else {
            tracing::trace!("source is nil");
            return false;
        };
        let Some(to) = to.indirect_mut() else {
            tracing::trace!("destination is nil");
            return false;
        };

        let from_ty = from.ty();
        let to_ty = to.ty();

        if from_ty == to_ty {
            *to = from.clone();
            return true;
        }

        if to_ty.kind() == Kind::Str {
            return match to_text(from, &self.time) {
                Some(text) => {
                    *to = Value::Str(text);
                    true
                }
                None => {
                    tracing::trace!(from = %from_ty, "no text form");
                    false
                }
            };
        }

        if let Value::Str(text) = from {
            return self.parse_into(text, to, &to_ty);
        }

        match convert(from, &to_ty) {
            Some(value) => {
                *to = value;
                true
            }
            None => {
                tracing::trace!(from = %from_ty, to = %to_ty, "types are not convertible");
                false
            }
        }
    }
}
