//! Associative map values.
//!
//! [`ValueMap`] wraps an [`IndexMap`] so entries iterate in insertion order. That
//! order is what Display, Encode and Equal observe, which keeps output stable
//! between runs.
//!
//! Keys are arbitrary [`Value`]s compared by exact structural equality: floats by
//! their total order (so `NaN` can be a key), references and functions by identity.
//!
//! ## Examples
//!
//! ```rust
//! use introspect::{Type, Value, ValueMap};
//!
//! let mut map = ValueMap::new(Type::String, Type::Int(introspect::IntKind::I32));
//! map.insert(Value::from("a"), Value::from(1));
//! map.insert(Value::from("b"), Value::from(2));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Value::from("b")), Some(&Value::from(2)));
//! ```

use crate::types::Type;
use crate::Value;
use indexmap::{Equivalent, IndexMap};
use ordered_float::OrderedFloat;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A map key. Hashes and compares its value structurally.
#[derive(Clone, Debug)]
pub(crate) struct Key(Value);

impl Key {
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for Key {}

/// Borrowed lookup key, so `get` does not have to clone the probe value.
struct Probe<'a>(&'a Value);

impl Hash for Probe<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self.0, state);
    }
}

impl Equivalent<Key> for Probe<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        key_eq(self.0, &key.0)
    }
}

/// An insertion-ordered map from [`Value`] keys to [`Value`]s, with declared key
/// and value types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMap {
    key: Arc<Type>,
    value: Arc<Type>,
    entries: IndexMap<Key, Value>,
}

impl ValueMap {
    /// Creates an empty map of type `Map<key, value>`.
    #[must_use]
    pub fn new(key: Type, value: Type) -> Self {
        ValueMap {
            key: Arc::new(key),
            value: Arc::new(value),
            entries: IndexMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn key_type(&self) -> &Type {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn value_type(&self) -> &Type {
        &self.value
    }

    pub(crate) fn key_type_arc(&self) -> Arc<Type> {
        Arc::clone(&self.key)
    }

    pub(crate) fn value_type_arc(&self) -> Arc<Type> {
        Arc::clone(&self.value)
    }

    /// Inserts an entry. If the key was present its old value is returned and the
    /// entry keeps its original position.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.entries.insert(Key(key), value)
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(&Probe(key))
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(&Probe(key))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (&key.0, value))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.keys().map(Key::as_value)
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Invalid => {}
        Value::Bool(b) => b.hash(state),
        Value::Int(kind, i) => {
            kind.hash(state);
            i.hash(state);
        }
        Value::Uint(kind, u) => {
            kind.hash(state);
            u.hash(state);
        }
        Value::Float(kind, f) => {
            kind.hash(state);
            OrderedFloat(*f).hash(state);
        }
        Value::Complex(kind, c) => {
            kind.hash(state);
            OrderedFloat(c.re).hash(state);
            OrderedFloat(c.im).hash(state);
        }
        Value::String(s) => s.hash(state),
        Value::Ref { pointee, target } => {
            pointee.hash(state);
            target.hash(state);
        }
        Value::Interface { ty, held } => {
            ty.hash(state);
            if let Some(held) = held {
                hash_value(held, state);
            }
        }
        Value::Array { elem, items } | Value::Slice { elem, items } => {
            elem.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Record(record) => {
            record.type_name().hash(state);
            for (name, field) in record.fields() {
                name.hash(state);
                hash_value(field, state);
            }
        }
        // Order-independent: only the shape contributes.
        Value::Map(map) => {
            map.key.hash(state);
            map.value.hash(state);
            map.len().hash(state);
        }
        Value::Chan { id, .. } | Value::Func { id, .. } => id.hash(state),
        Value::RawPtr(target) => target.hash(state),
    }
}

fn key_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Invalid, Value::Invalid) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(kx, x), Value::Int(ky, y)) => kx == ky && x == y,
        (Value::Uint(kx, x), Value::Uint(ky, y)) => kx == ky && x == y,
        (Value::Float(kx, x), Value::Float(ky, y)) => {
            kx == ky && OrderedFloat(*x) == OrderedFloat(*y)
        }
        (Value::Complex(kx, x), Value::Complex(ky, y)) => {
            kx == ky
                && OrderedFloat(x.re) == OrderedFloat(y.re)
                && OrderedFloat(x.im) == OrderedFloat(y.im)
        }
        (Value::String(x), Value::String(y)) => x == y,
        (
            Value::Ref {
                pointee: px,
                target: tx,
            },
            Value::Ref {
                pointee: py,
                target: ty,
            },
        ) => px == py && tx == ty,
        (Value::Interface { ty: nx, held: hx }, Value::Interface { ty: ny, held: hy }) => {
            nx == ny
                && match (hx, hy) {
                    (Some(x), Some(y)) => key_eq(x, y),
                    (None, None) => true,
                    _ => false,
                }
        }
        (Value::Array { elem: ex, items: x }, Value::Array { elem: ey, items: y })
        | (Value::Slice { elem: ex, items: x }, Value::Slice { elem: ey, items: y }) => {
            ex == ey && x.len() == y.len() && x.iter().zip(y).all(|(x, y)| key_eq(x, y))
        }
        (Value::Record(x), Value::Record(y)) => {
            x.type_name() == y.type_name()
                && x.len() == y.len()
                && x
                    .fields()
                    .zip(y.fields())
                    .all(|((nx, vx), (ny, vy))| nx == ny && key_eq(vx, vy))
        }
        (Value::Map(x), Value::Map(y)) => {
            x.key == y.key
                && x.value == y.value
                && x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| key_eq(v, w)))
        }
        (Value::Chan { id: x, .. }, Value::Chan { id: y, .. })
        | (Value::Func { id: x, .. }, Value::Func { id: y, .. }) => x == y,
        (Value::RawPtr(x), Value::RawPtr(y)) => x == y,
        _ => false,
    }
}
