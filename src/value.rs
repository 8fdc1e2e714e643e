//! Dynamic value representation.
//!
//! [`Value`] is a closed sum type over every shape the traversals understand. Values
//! form trees; graph edges (and therefore cycles) only exist through
//! [`Value::Ref`], which points at a slot of a [`Heap`](crate::Heap).
//!
//! ## Creating Values
//!
//! ```rust
//! use introspect::{record, Heap, Type, Value};
//!
//! // From primitives
//! let flag = Value::from(true);
//! let count = Value::from(42u8);
//! let text = Value::from("hello");
//!
//! // Records keep their field order
//! let person = record!("people::Person" => { Name: "Ann", Age: 3 });
//!
//! // References point into a heap
//! let mut heap = Heap::new();
//! let slot = heap.alloc(person);
//! let ptr = Value::reference(Type::record("people::Person"), slot);
//! assert!(ptr.is_ref());
//! ```

use crate::types::{FloatKind, IntKind, Kind, Type, TypeName, UintKind};
use crate::{SlotId, ValueMap};
use num_complex::{Complex, Complex64};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of a function or channel value.
///
/// Identities are minted from a process-wide counter, so two independently created
/// functions never compare equal even when their signatures match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    #[must_use]
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ObjectId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A record (struct) value: a nominal type plus ordered, named fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    ty: TypeName,
    fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Record {
            ty: ty.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.push((name.to_string(), value.into()));
    }

    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.ty
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn raw_fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A dynamically-typed runtime value.
///
/// # Examples
///
/// ```rust
/// use introspect::{IntKind, Kind, Type, Value};
///
/// let numbers = Value::slice(Type::Int(IntKind::I64), vec![
///     Value::from(1i64),
///     Value::from(2i64),
/// ]);
/// assert_eq!(numbers.kind(), Kind::Slice);
/// assert_eq!(numbers.ty().unwrap().to_string(), "Vec<i64>");
/// assert!(Value::Invalid.ty().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// The absent value. It has no type.
    #[default]
    Invalid,
    Bool(bool),
    Int(IntKind, i64),
    Uint(UintKind, u64),
    Float(FloatKind, f64),
    Complex(FloatKind, Complex64),
    String(String),
    Ref {
        pointee: Arc<Type>,
        target: Option<SlotId>,
    },
    Interface {
        ty: Option<TypeName>,
        held: Option<Box<Value>>,
    },
    /// Fixed-length sequence, stored inline.
    Array {
        elem: Arc<Type>,
        items: Vec<Value>,
    },
    /// Growable sequence.
    Slice {
        elem: Arc<Type>,
        items: Vec<Value>,
    },
    Record(Record),
    Map(ValueMap),
    Chan {
        elem: Arc<Type>,
        id: ObjectId,
    },
    Func {
        signature: Arc<str>,
        id: ObjectId,
    },
    RawPtr(Option<SlotId>),
}

impl Value {
    /// A reference to `target`, which must hold a value of type `pointee`.
    #[must_use]
    pub fn reference(pointee: Type, target: SlotId) -> Self {
        Value::Ref {
            pointee: Arc::new(pointee),
            target: Some(target),
        }
    }

    /// A nil reference.
    #[must_use]
    pub fn nil(pointee: Type) -> Self {
        Value::Ref {
            pointee: Arc::new(pointee),
            target: None,
        }
    }

    #[must_use]
    pub fn slice(elem: Type, items: Vec<Value>) -> Self {
        Value::Slice {
            elem: Arc::new(elem),
            items,
        }
    }

    #[must_use]
    pub fn array(elem: Type, items: Vec<Value>) -> Self {
        Value::Array {
            elem: Arc::new(elem),
            items,
        }
    }

    /// An interface value holding `held`. `ty` of `None` is `dyn Any`.
    #[must_use]
    pub fn interface(ty: Option<TypeName>, held: Value) -> Self {
        Value::Interface {
            ty,
            held: Some(Box::new(held)),
        }
    }

    /// An interface value holding nothing.
    #[must_use]
    pub fn empty_interface(ty: Option<TypeName>) -> Self {
        Value::Interface { ty, held: None }
    }

    /// A function with a fresh identity.
    #[must_use]
    pub fn func(signature: &str) -> Self {
        Value::Func {
            signature: Arc::from(signature),
            id: ObjectId::fresh(),
        }
    }

    /// A channel with a fresh identity.
    #[must_use]
    pub fn chan(elem: Type) -> Self {
        Value::Chan {
            elem: Arc::new(elem),
            id: ObjectId::fresh(),
        }
    }

    /// The dynamic type, or `None` for [`Value::Invalid`].
    #[must_use]
    pub fn ty(&self) -> Option<Type> {
        let ty = match self {
            Value::Invalid => return None,
            Value::Bool(_) => Type::Bool,
            Value::Int(kind, _) => Type::Int(*kind),
            Value::Uint(kind, _) => Type::Uint(*kind),
            Value::Float(kind, _) => Type::Float(*kind),
            Value::Complex(kind, _) => Type::Complex(*kind),
            Value::String(_) => Type::String,
            Value::Ref { pointee, .. } => Type::Ref(Arc::clone(pointee)),
            Value::Interface { ty, .. } => Type::Interface(ty.clone()),
            Value::Array { elem, items } => Type::Array(items.len(), Arc::clone(elem)),
            Value::Slice { elem, .. } => Type::Slice(Arc::clone(elem)),
            Value::Record(record) => Type::Record(record.type_name().clone()),
            Value::Map(map) => Type::Map(map.key_type_arc(), map.value_type_arc()),
            Value::Chan { elem, .. } => Type::Chan(Arc::clone(elem)),
            Value::Func { signature, .. } => Type::Func(Arc::clone(signature)),
            Value::RawPtr(_) => Type::RawPtr,
        };
        Some(ty)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Invalid => Kind::Invalid,
            Value::Bool(_) => Kind::Bool,
            Value::Int(..) => Kind::Int,
            Value::Uint(..) => Kind::Uint,
            Value::Float(..) => Kind::Float,
            Value::Complex(..) => Kind::Complex,
            Value::String(_) => Kind::String,
            Value::Ref { .. } => Kind::Ref,
            Value::Interface { .. } => Kind::Interface,
            Value::Array { .. } => Kind::Array,
            Value::Slice { .. } => Kind::Slice,
            Value::Record(_) => Kind::Record,
            Value::Map(_) => Kind::Map,
            Value::Chan { .. } => Kind::Chan,
            Value::Func { .. } => Kind::Func,
            Value::RawPtr(_) => Kind::RawPtr,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    #[inline]
    #[must_use]
    pub const fn is_ref(&self) -> bool {
        matches!(self, Value::Ref { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Signed integers of any width, and unsigned ones that fit.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(_, i) => Some(*i),
            Value::Uint(_, u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(_, f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }


    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Elements of an array or slice.
    #[must_use]
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array { items, .. } | Value::Slice { items, .. } => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(IntKind::I8, value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(IntKind::I16, value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(IntKind::I32, value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(IntKind::I64, value)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(IntKind::Isize, value as i64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Uint(UintKind::U8, value as u64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Uint(UintKind::U16, value as u64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Uint(UintKind::U32, value as u64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Uint(UintKind::U64, value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Uint(UintKind::Usize, value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(FloatKind::F32, value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(FloatKind::F64, value)
    }
}

impl From<Complex<f32>> for Value {
    fn from(value: Complex<f32>) -> Self {
        Value::Complex(
            FloatKind::F32,
            Complex64::new(value.re as f64, value.im as f64),
        )
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Value::Complex(FloatKind::F64, value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}
