//! Type descriptors and shape classification.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rustc_hash::FxHashMap;

use super::{Map, Ptr, Record, Seq, Value};

/// Text rendering capability of a record type.
pub type Render = fn(&Record) -> String;

// =============================================================================
// Kind - Shape Classification
// =============================================================================

/// Classification of a type, driving every dispatch decision.
///
/// Pointer layers are looked through: `*i32` is [`Kind::Int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    Uint,
    /// `f32` / `f64`.
    Float,
    /// Text.
    Str,
    /// Timestamps.
    Time,
    /// Record with a text rendering.
    Stringable,
    /// Record without a text rendering.
    Record,
    /// Sequences.
    Seq,
    /// Mappings.
    Map,
    /// Anything the engine cannot look into.
    Other,
}

impl Kind {
    /// Whether values of this kind have named fields.
    pub fn is_record(self) -> bool {
        matches!(self, Kind::Record | Kind::Stringable)
    }
}

// =============================================================================
// Ty - Type Descriptor
// =============================================================================

/// Runtime type descriptor of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// `bool`.
    Bool,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// Text.
    Str,
    /// UTC timestamp.
    Time,
    /// Named record type.
    Record(Arc<RecordType>),
    /// Sequence of the element type.
    Seq(Box<Ty>),
    /// Mapping from key type to value type.
    Map(Box<Ty>, Box<Ty>),
    /// Nullable indirection to the element type.
    Ptr(Box<Ty>),
    /// Type the engine cannot inspect, identified by name.
    Opaque(Arc<str>),
}

impl Ty {
    /// Sequence of `elem`.
    pub fn seq(elem: Ty) -> Self {
        Ty::Seq(Box::new(elem))
    }

    /// Mapping from `key` to `value`.
    pub fn map(key: Ty, value: Ty) -> Self {
        Ty::Map(Box::new(key), Box::new(value))
    }

    /// Nullable indirection to `elem`.
    pub fn ptr(elem: Ty) -> Self {
        Ty::Ptr(Box::new(elem))
    }

    /// Opaque type with the given name.
    pub fn opaque(name: &str) -> Self {
        Ty::Opaque(Arc::from(name))
    }

    /// Strip all pointer layers.
    pub fn indirect(&self) -> &Ty {
        let mut ty = self;
        while let Ty::Ptr(elem) = ty {
            ty = elem;
        }
        ty
    }

    /// Classify the innermost concrete type.
    pub fn kind(&self) -> Kind {
        match self.indirect() {
            Ty::Bool => Kind::Bool,
            Ty::I8 | Ty::I16 | Ty::I32 | Ty::I64 => Kind::Int,
            Ty::U8 | Ty::U16 | Ty::U32 | Ty::U64 => Kind::Uint,
            Ty::F32 | Ty::F64 => Kind::Float,
            Ty::Str => Kind::Str,
            Ty::Time => Kind::Time,
            Ty::Record(rt) if rt.render.is_some() => Kind::Stringable,
            Ty::Record(_) => Kind::Record,
            Ty::Seq(_) => Kind::Seq,
            Ty::Map(..) => Kind::Map,
            Ty::Ptr(_) | Ty::Opaque(_) => Kind::Other,
        }
    }

    /// Zero value: nil pointer, nil map, empty sequence, zeroed record.
    pub fn zero(&self) -> Value {
        match self {
            Ty::Bool => Value::Bool(false),
            Ty::I8 => Value::I8(0),
            Ty::I16 => Value::I16(0),
            Ty::I32 => Value::I32(0),
            Ty::I64 => Value::I64(0),
            Ty::U8 => Value::U8(0),
            Ty::U16 => Value::U16(0),
            Ty::U32 => Value::U32(0),
            Ty::U64 => Value::U64(0),
            Ty::F32 => Value::F32(0.0),
            Ty::F64 => Value::F64(0.0),
            Ty::Str => Value::Str(String::new()),
            Ty::Time => Value::Time(zero_time()),
            Ty::Record(rt) => Value::Record(Record::new(rt)),
            Ty::Seq(elem) => Value::Seq(Seq::new((**elem).clone())),
            Ty::Map(key, value) => Value::Map(Map::nil((**key).clone(), (**value).clone())),
            Ty::Ptr(elem) => Value::Ptr(Ptr::nil((**elem).clone())),
            Ty::Opaque(name) => Value::Opaque(super::Opaque::new(name.clone(), Vec::new())),
        }
    }

    /// Zero value with every pointer layer allocated.
    ///
    /// `**i32` yields a pointer to a pointer to `0`.
    pub fn alloc(&self) -> Value {
        match self {
            Ty::Ptr(elem) => Value::Ptr(Ptr::to_value((**elem).clone(), elem.alloc())),
            other => other.zero(),
        }
    }
}

/// January 1 of year 1, 00:00:00 UTC.
fn zero_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Bool => f.write_str("bool"),
            Ty::I8 => f.write_str("i8"),
            Ty::I16 => f.write_str("i16"),
            Ty::I32 => f.write_str("i32"),
            Ty::I64 => f.write_str("i64"),
            Ty::U8 => f.write_str("u8"),
            Ty::U16 => f.write_str("u16"),
            Ty::U32 => f.write_str("u32"),
            Ty::U64 => f.write_str("u64"),
            Ty::F32 => f.write_str("f32"),
            Ty::F64 => f.write_str("f64"),
            Ty::Str => f.write_str("string"),
            Ty::Time => f.write_str("time"),
            Ty::Record(rt) => f.write_str(&rt.name),
            Ty::Seq(elem) => write!(f, "[]{elem}"),
            Ty::Map(key, value) => write!(f, "map[{key}]{value}"),
            Ty::Ptr(elem) => write!(f, "*{elem}"),
            Ty::Opaque(name) => f.write_str(name),
        }
    }
}

// =============================================================================
// RecordType
// =============================================================================

/// A declared record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// Field name, matched case-sensitively.
    pub name: String,
    /// Declared type.
    pub ty: Ty,
    /// Read-only fields are never written by a copy.
    pub writable: bool,
}

/// A named record type: ordered fields plus an optional text rendering.
pub struct RecordType {
    name: String,
    fields: Vec<FieldDef>,
    index: FxHashMap<String, usize>,
    render: Option<Render>,
}

impl RecordType {
    /// Start building a record type.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
            render: None,
        }
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Position of a field by exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Field definition by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.position(name).map(|i| &self.fields[i])
    }

    /// Text rendering capability, if declared.
    pub fn render(&self) -> Option<Render> {
        self.render
    }

    /// Same field names and types in the same order (type names may differ).
    pub fn same_layout(&self, other: &RecordType) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.ty == b.ty)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for RecordType {}

impl std::hash::Hash for RecordType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.fields.hash(state);
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Builder for [`RecordType`].
///
/// # Example
///
/// ```
/// use value_copy::{RecordType, Ty};
///
/// let user = RecordType::builder("User")
///     .field("Name", Ty::Str)
///     .field("Age", Ty::I32)
///     .readonly("Id", Ty::U64)
///     .build();
/// assert_eq!(user.fields().len(), 3);
/// ```
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<FieldDef>,
    render: Option<Render>,
}

impl RecordTypeBuilder {
    /// Add a writable field. A later field with the same name replaces it.
    pub fn field(self, name: impl Into<String>, ty: Ty) -> Self {
        self.push(name.into(), ty, true)
    }

    /// Add a read-only field.
    pub fn readonly(self, name: impl Into<String>, ty: Ty) -> Self {
        self.push(name.into(), ty, false)
    }

    /// Declare the text rendering used when the record is copied into text.
    pub fn render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }

    /// Finish the type.
    pub fn build(self) -> Arc<RecordType> {
        let index = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Arc::new(RecordType {
            name: self.name,
            fields: self.fields,
            index,
            render: self.render,
        })
    }

    fn push(mut self, name: String, ty: Ty, writable: bool) -> Self {
        let def = FieldDef { name, ty, writable };
        match self.fields.iter_mut().find(|f| f.name == def.name) {
            Some(existing) => *existing = def,
            None => self.fields.push(def),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_pointers() {
        assert_eq!(Ty::ptr(Ty::ptr(Ty::I32)).kind(), Kind::Int);
        assert_eq!(Ty::ptr(Ty::Str).indirect(), &Ty::Str);
        assert_eq!(Ty::opaque("chan").kind(), Kind::Other);
    }

    #[test]
    fn test_stringable_record_kind() {
        let plain = RecordType::builder("Plain").field("A", Ty::I32).build();
        let named = RecordType::builder("Named")
            .field("A", Ty::I32)
            .render(|_| "named".to_string())
            .build();
        assert_eq!(Ty::Record(plain).kind(), Kind::Record);
        assert_eq!(Ty::Record(named.clone()).kind(), Kind::Stringable);
        assert!(Ty::Record(named).kind().is_record());
    }

    #[test]
    fn test_display() {
        let user = RecordType::builder("User").build();
        assert_eq!(Ty::seq(Ty::Str).to_string(), "[]string");
        assert_eq!(Ty::map(Ty::Str, Ty::I64).to_string(), "map[string]i64");
        assert_eq!(Ty::ptr(Ty::Record(user)).to_string(), "*User");
    }

    #[test]
    fn test_zero_and_alloc() {
        assert_eq!(Ty::ptr(Ty::I32).zero(), Value::Ptr(Ptr::nil(Ty::I32)));
        let allocated = Ty::ptr(Ty::ptr(Ty::I32)).alloc();
        assert_eq!(allocated.indirect(), Some(&Value::I32(0)));
        assert!(matches!(Ty::map(Ty::Str, Ty::Str).zero(), Value::Map(m) if m.is_nil()));
    }

    #[test]
    fn test_zero_time_is_year_one() {
        let Value::Time(t) = Ty::Time.zero() else {
            panic!("time zero is a timestamp");
        };
        assert_eq!(t.to_rfc3339(), "0001-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_duplicate_field_replaces() {
        let rt = RecordType::builder("Dup")
            .field("A", Ty::I32)
            .readonly("A", Ty::Str)
            .build();
        assert_eq!(rt.fields().len(), 1);
        let field = rt.field("A").unwrap();
        assert_eq!(field.ty, Ty::Str);
        assert!(!field.writable);
    }

    #[test]
    fn test_same_layout_ignores_name() {
        let a = RecordType::builder("A").field("X", Ty::I32).build();
        let b = RecordType::builder("B").field("X", Ty::I32).build();
        let c = RecordType::builder("C").field("X", Ty::I64).build();
        assert!(a.same_layout(&b));
        assert!(!a.same_layout(&c));
        assert_ne!(*a, *b);
    }
}
