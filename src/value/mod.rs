//! Runtime value model.
//!
//! Every [`Value`] carries enough information to recover its [`Ty`], so the
//! copy engine can classify and convert values without static knowledge of
//! the caller's types.
//!
//! # Modules
//!
//! - `ty` - Type descriptors, [`Kind`] classification, record types
//! - `record` - Record values
//! - `collection` - Sequences, maps, pointers and opaque values

mod collection;
mod record;
mod ty;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use chrono::{DateTime, Utc};

pub use collection::{Map, Opaque, Ptr, Seq};
pub use record::Record;
pub use ty::{FieldDef, Kind, RecordType, RecordTypeBuilder, Render, Ty};

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`.
    Bool(bool),
    /// `i8`.
    I8(i8),
    /// `i16`.
    I16(i16),
    /// `i32`.
    I32(i32),
    /// `i64`.
    I64(i64),
    /// `u8`.
    U8(u8),
    /// `u16`.
    U16(u16),
    /// `u32`.
    U32(u32),
    /// `u64`.
    U64(u64),
    /// `f32`.
    F32(f32),
    /// `f64`.
    F64(f64),
    /// Text.
    Str(String),
    /// UTC timestamp.
    Time(DateTime<Utc>),
    /// Record.
    Record(Record),
    /// Sequence.
    Seq(Seq),
    /// Mapping.
    Map(Map),
    /// Nullable indirection.
    Ptr(Ptr),
    /// Uninspectable value.
    Opaque(Opaque),
}

impl Value {
    /// Runtime type of this value.
    pub fn ty(&self) -> Ty {
        match self {
            Value::Bool(_) => Ty::Bool,
            Value::I8(_) => Ty::I8,
            Value::I16(_) => Ty::I16,
            Value::I32(_) => Ty::I32,
            Value::I64(_) => Ty::I64,
            Value::U8(_) => Ty::U8,
            Value::U16(_) => Ty::U16,
            Value::U32(_) => Ty::U32,
            Value::U64(_) => Ty::U64,
            Value::F32(_) => Ty::F32,
            Value::F64(_) => Ty::F64,
            Value::Str(_) => Ty::Str,
            Value::Time(_) => Ty::Time,
            Value::Record(r) => Ty::Record(r.record_type().clone()),
            Value::Seq(s) => Ty::seq(s.elem().clone()),
            Value::Map(m) => Ty::map(m.key_ty().clone(), m.value_ty().clone()),
            Value::Ptr(p) => Ty::ptr(p.elem().clone()),
            Value::Opaque(o) => Ty::Opaque(o.name().clone()),
        }
    }

    /// Classification of the value's type.
    pub fn kind(&self) -> Kind {
        self.ty().kind()
    }

    /// Follow pointer layers to the first concrete value.
    ///
    /// Returns `None` when a nil pointer is reached.
    pub fn indirect(&self) -> Option<&Value> {
        let mut value = self;
        while let Value::Ptr(ptr) = value {
            value = ptr.get()?;
        }
        Some(value)
    }

    /// Mutable counterpart of [`indirect`](Self::indirect).
    pub fn indirect_mut(&mut self) -> Option<&mut Value> {
        match self {
            Value::Ptr(ptr) => ptr.get_mut()?.indirect_mut(),
            other => Some(other),
        }
    }

    /// Wrap in a non-nil pointer.
    pub fn ptr(value: impl Into<Value>) -> Self {
        Value::Ptr(Ptr::new(value.into()))
    }

    /// Nil pointer to `elem`.
    pub fn null(elem: Ty) -> Self {
        Value::Ptr(Ptr::nil(elem))
    }

    /// Borrow as text, looking through pointers.
    pub fn as_str(&self) -> Option<&str> {
        match self.indirect()? {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a record, looking through pointers.
    pub fn as_record(&self) -> Option<&Record> {
        match self.indirect()? {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Borrow as a sequence, looking through pointers.
    pub fn as_seq(&self) -> Option<&Seq> {
        match self.indirect()? {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a map, looking through pointers.
    pub fn as_map(&self) -> Option<&Map> {
        match self.indirect()? {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Compact JSON rendering (see [`crate::json::to_json`]).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::json::to_json(self))
    }
}

/// Agrees with `PartialEq`: `0.0` and `-0.0` hash alike, and maps hash by
/// their types and length only.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::I8(n) => n.hash(state),
            Value::I16(n) => n.hash(state),
            Value::I32(n) => n.hash(state),
            Value::I64(n) => n.hash(state),
            Value::U8(n) => n.hash(state),
            Value::U16(n) => n.hash(state),
            Value::U32(n) => n.hash(state),
            Value::U64(n) => n.hash(state),
            Value::F32(f) => (if *f == 0.0 { 0.0 } else { *f }).to_bits().hash(state),
            Value::F64(f) => (if *f == 0.0 { 0.0 } else { *f }).to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Time(t) => t.hash(state),
            Value::Record(r) => {
                r.record_type().name().hash(state);
                r.iter().for_each(|(_, v)| v.hash(state));
            }
            Value::Seq(s) => {
                s.elem().hash(state);
                s.items().hash(state);
            }
            Value::Map(m) => {
                m.key_ty().hash(state);
                m.value_ty().hash(state);
                m.len().hash(state);
            }
            Value::Ptr(p) => {
                p.elem().hash(state);
                p.get().hash(state);
            }
            Value::Opaque(o) => {
                o.name().hash(state);
                o.payload().hash(state);
            }
        }
    }
}

macro_rules! impl_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
    DateTime<Utc> => Time,
    Record => Record,
    Seq => Seq,
    Map => Map,
    Ptr => Ptr,
    Opaque => Opaque,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
