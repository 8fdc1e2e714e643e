//! Read-only value handles.
//!
//! A [`Handle`] is the uniform view every traversal walks: a value, the heap its
//! references resolve in, and the value's [`Location`] when it has one.
//! [`Handle::shape`] classifies the value into a [`Shape`] whose composite variants
//! yield child handles, with locations propagated from parent to child.
//!
//! Addressability follows storage: a slot's contents and everything stored
//! inline in it (record fields, array and slice elements) are addressable. Map
//! entries, interface payloads and free-standing values are not.

use crate::heap::{Location, EMPTY};
use crate::map::ValueMap;
use crate::types::{Kind, Type};
use crate::value::ObjectId;
use crate::{Heap, SlotId, Value};
use num_complex::Complex64;
use std::fmt;

static INVALID: Value = Value::Invalid;

/// A borrowed view of one value.
#[derive(Clone, Copy)]
pub struct Handle<'h> {
    heap: &'h Heap,
    value: &'h Value,
    location: Option<Location>,
}

impl<'h> Handle<'h> {
    pub(crate) fn new(heap: &'h Heap, value: &'h Value, location: Option<Location>) -> Self {
        Handle {
            heap,
            value,
            location,
        }
    }

    /// A handle with no heap. Any reference it reaches dereferences to an
    /// invalid value.
    #[must_use]
    pub fn detached(value: &'h Value) -> Self {
        Handle::new(&EMPTY, value, None)
    }

    fn invalid(heap: &'h Heap) -> Self {
        Handle::new(heap, &INVALID, None)
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &'h Value {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn heap(&self) -> &'h Heap {
        self.heap
    }

    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    #[inline]
    #[must_use]
    pub fn is_addressable(&self) -> bool {
        self.location.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value.is_valid()
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    #[inline]
    #[must_use]
    pub fn ty(&self) -> Option<Type> {
        self.value.ty()
    }

    /// The type as text, `invalid` when there is none.
    #[must_use]
    pub fn type_label(&self) -> String {
        self.value
            .ty()
            .map_or_else(|| "invalid".to_string(), |ty| ty.to_string())
    }

    fn deref(&self, target: Option<SlotId>) -> Option<Handle<'h>> {
        let slot = target?;
        Some(
            self.heap
                .slot(slot)
                .unwrap_or_else(|| Handle::invalid(self.heap)),
        )
    }

    fn detached_child(&self, value: &'h Value) -> Handle<'h> {
        Handle::new(self.heap, value, None)
    }

    /// Classifies the value and exposes its children.
    #[must_use]
    pub fn shape(&self) -> Shape<'h> {
        match self.value {
            Value::Invalid => Shape::Invalid,
            Value::Bool(b) => Shape::Bool(*b),
            Value::Int(_, i) => Shape::Int(*i),
            Value::Uint(_, u) => Shape::Uint(*u),
            Value::Float(_, f) => Shape::Float(*f),
            Value::Complex(_, c) => Shape::Complex(*c),
            Value::String(s) => Shape::String(s),
            Value::Ref { target, .. } => Shape::Ref(self.deref(*target)),
            Value::Interface { held, .. } => {
                Shape::Interface(held.as_deref().map(|held| self.detached_child(held)))
            }
            Value::Array { items, .. } => Shape::Array(Elements::new(self, items)),
            Value::Slice { items, .. } => Shape::Slice(Elements::new(self, items)),
            Value::Record(record) => Shape::Record(Fields::new(self, record.raw_fields())),
            Value::Map(map) => Shape::Map(Entries {
                heap: self.heap,
                map,
            }),
            Value::Chan { id, .. } => Shape::Chan(*id),
            Value::Func { id, .. } => Shape::Func(*id),
            Value::RawPtr(target) => Shape::RawPtr(*target),
        }
    }
}

impl<'h> From<&'h Value> for Handle<'h> {
    fn from(value: &'h Value) -> Self {
        Handle::detached(value)
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("value", self.value)
            .field("location", &self.location)
            .finish()
    }
}

/// Shape category of a handle, with payloads and child accessors.
#[derive(Debug)]
pub enum Shape<'h> {
    Invalid,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex64),
    String(&'h str),
    /// The pointee, or `None` for a nil reference.
    Ref(Option<Handle<'h>>),
    /// The held value, or `None` when the interface holds nothing.
    Interface(Option<Handle<'h>>),
    Array(Elements<'h>),
    Slice(Elements<'h>),
    Record(Fields<'h>),
    Map(Entries<'h>),
    Chan(ObjectId),
    Func(ObjectId),
    RawPtr(Option<SlotId>),
}

/// Number of locations a value occupies inside its slot.
fn footprint(value: &Value) -> usize {
    match value {
        Value::Array { items, .. } | Value::Slice { items, .. } => {
            1 + items.iter().map(footprint).sum::<usize>()
        }
        Value::Record(record) => 1 + record.fields().map(|(_, v)| footprint(v)).sum::<usize>(),
        _ => 1,
    }
}

/// Hands out child locations in pre-order.
#[derive(Clone, Copy, Debug)]
struct Cursor {
    next: Option<Location>,
}

impl Cursor {
    fn first_child_of(parent: Option<Location>) -> Self {
        Cursor {
            next: parent.map(|loc| Location::new(loc.slot(), loc.offset() + 1)),
        }
    }

    fn advance(&mut self, child: &Value) -> Option<Location> {
        let current = self.next;
        self.next = current.map(|loc| Location::new(loc.slot(), loc.offset() + footprint(child)));
        current
    }
}

/// Positional children of an array or slice.
#[derive(Debug)]
pub struct Elements<'h> {
    heap: &'h Heap,
    items: std::slice::Iter<'h, Value>,
    cursor: Cursor,
}

impl<'h> Elements<'h> {
    fn new(parent: &Handle<'h>, items: &'h [Value]) -> Self {
        Elements {
            heap: parent.heap,
            items: items.iter(),
            cursor: Cursor::first_child_of(parent.location),
        }
    }
}

impl<'h> Iterator for Elements<'h> {
    type Item = Handle<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        let location = self.cursor.advance(item);
        Some(Handle::new(self.heap, item, location))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for Elements<'_> {}

/// Named children of a record, in declaration order.
#[derive(Debug)]
pub struct Fields<'h> {
    heap: &'h Heap,
    fields: std::slice::Iter<'h, (String, Value)>,
    cursor: Cursor,
}

impl<'h> Fields<'h> {
    fn new(parent: &Handle<'h>, fields: &'h [(String, Value)]) -> Self {
        Fields {
            heap: parent.heap,
            fields: fields.iter(),
            cursor: Cursor::first_child_of(parent.location),
        }
    }
}

impl<'h> Iterator for Fields<'h> {
    type Item = (&'h str, Handle<'h>);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, value) = self.fields.next()?;
        let location = self.cursor.advance(value);
        Some((name.as_str(), Handle::new(self.heap, value, location)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fields.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> {}

/// Entries of a map. Neither keys nor values are addressable.
#[derive(Clone, Copy, Debug)]
pub struct Entries<'h> {
    heap: &'h Heap,
    map: &'h ValueMap,
}

impl<'h> Entries<'h> {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up the entry whose key is exactly `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<Handle<'h>> {
        self.map
            .get(key)
            .map(|value| Handle::new(self.heap, value, None))
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Handle<'h>, Handle<'h>)> + 'h {
        let heap = self.heap;
        self.map
            .iter()
            .map(move |(key, value)| (Handle::new(heap, key, None), Handle::new(heap, value, None)))
    }
}
