//! Sequences, maps, pointers and opaque values.

use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use rustc_hash::{FxBuildHasher, FxHashMap};

use super::{Ty, Value};

// =============================================================================
// Seq
// =============================================================================

/// Ordered sequence with a declared element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Seq {
    elem: Ty,
    items: Vec<Value>,
}

impl Seq {
    /// Empty sequence of `elem`.
    pub fn new(elem: Ty) -> Self {
        Self {
            elem,
            items: Vec::new(),
        }
    }

    /// Sequence from items. Items are not checked against `elem`.
    pub fn from_items<I, V>(elem: Ty, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            elem,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Element type.
    pub fn elem(&self) -> &Ty {
        &self.elem
    }

    /// Items in order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Append an item.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Map
// =============================================================================

/// Key/value mapping with declared key and value types.
///
/// A map may be nil (no entry storage at all), mirroring an unset map slot.
/// Keys are compared by value equality; inserting an equal key replaces
/// the existing entry. Entries keep insertion order.
#[derive(Clone)]
pub struct Map {
    key: Ty,
    value: Ty,
    entries: Option<Vec<(Value, Value)>>,
    /// Key hash → positions in `entries` carrying that hash.
    index: FxHashMap<u64, Vec<usize>>,
}

impl Map {
    /// Empty, allocated map.
    pub fn new(key: Ty, value: Ty) -> Self {
        Self {
            key,
            value,
            entries: Some(Vec::new()),
            index: FxHashMap::default(),
        }
    }

    /// Nil map.
    pub fn nil(key: Ty, value: Ty) -> Self {
        Self {
            key,
            value,
            entries: None,
            index: FxHashMap::default(),
        }
    }

    /// Map from entries.
    pub fn from_entries<I, K, V>(key: Ty, value: Ty, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut map = Self::new(key, value);
        for (k, v) in entries {
            map.insert(k.into(), v.into());
        }
        map
    }

    /// Key type.
    pub fn key_ty(&self) -> &Ty {
        &self.key
    }

    /// Value type.
    pub fn value_ty(&self) -> &Ty {
        &self.value
    }

    /// Whether the map is nil.
    pub fn is_nil(&self) -> bool {
        self.entries.is_none()
    }

    /// Allocate entry storage if nil.
    pub fn ensure_allocated(&mut self) {
        self.entries.get_or_insert_with(Vec::new);
    }

    /// Insert or replace an entry, allocating the map if nil.
    pub fn insert(&mut self, key: Value, value: Value) {
        let entries = self.entries.get_or_insert_with(Vec::new);
        let bucket = self.index.entry(FxBuildHasher.hash_one(&key)).or_default();
        match bucket.iter().copied().find(|&i| entries[i].0 == key) {
            Some(i) => entries[i].1 = value,
            None => {
                bucket.push(entries.len());
                entries.push((key, value));
            }
        }
    }

    /// Value for a key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        let entries = self.entries.as_ref()?;
        self.index
            .get(&FxBuildHasher.hash_one(key))?
            .iter()
            .map(|&i| &entries[i])
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Entries in insertion order. A nil map yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().flatten().map(|(k, v)| (k, v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value && self.entries == other.entries
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("entries", &self.entries)
            .finish()
    }
}

// =============================================================================
// Ptr
// =============================================================================

/// Nullable indirection to a value of the element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Ptr {
    elem: Ty,
    target: Option<Box<Value>>,
}

impl Ptr {
    /// Pointer to `value`; the element type is the value's type.
    pub fn new(value: Value) -> Self {
        Self {
            elem: value.ty(),
            target: Some(Box::new(value)),
        }
    }

    /// Pointer with an explicit element type.
    pub(crate) fn to_value(elem: Ty, value: Value) -> Self {
        Self {
            elem,
            target: Some(Box::new(value)),
        }
    }

    /// Nil pointer to `elem`.
    pub fn nil(elem: Ty) -> Self {
        Self { elem, target: None }
    }

    /// Element type.
    pub fn elem(&self) -> &Ty {
        &self.elem
    }

    /// Whether the pointer is nil.
    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    /// Pointee, if any.
    pub fn get(&self) -> Option<&Value> {
        self.target.as_deref()
    }

    /// Mutable pointee, if any.
    pub fn get_mut(&mut self) -> Option<&mut Value> {
        self.target.as_deref_mut()
    }

    /// Point at a freshly allocated zero value if nil.
    pub fn ensure_allocated(&mut self) {
        if self.target.is_none() {
            self.target = Some(Box::new(self.elem.alloc()));
        }
    }
}

// =============================================================================
// Opaque
// =============================================================================

/// A value the engine cannot look into, such as a handle or a channel.
///
/// Opaque values are only ever copied verbatim into the same opaque type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    name: Arc<str>,
    payload: Vec<u8>,
}

impl Opaque {
    /// Opaque value of the named type.
    pub fn new(name: Arc<str>, payload: Vec<u8>) -> Self {
        Self { name, payload }
    }

    /// Type name.
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Raw payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
