//! Slot arena backing reference values.
//!
//! A [`Heap`] owns every value that a [`Value::Ref`] can point at. The
//! [`SlotId`] of a slot is its stable identity, and values nested inline inside a
//! slot are identified by a [`Location`]: the slot plus the value's pre-order
//! position in it. Traversals use locations where a garbage-collected runtime
//! would use raw memory addresses.
//!
//! Cycles are built by reserving a slot first and filling it afterwards:
//!
//! ```rust
//! use introspect::{record, has_cycle, Heap, Type, Value};
//!
//! let node = Type::record("list::Node");
//! let mut heap = Heap::new();
//! let slot = heap.reserve();
//! heap.replace(slot, record!("list::Node" => {
//!     Value: 1,
//!     Next: Value::reference(node.clone(), slot),
//! })).unwrap();
//!
//! let root = Value::reference(node, slot);
//! assert!(has_cycle(heap.handle(&root)));
//! ```

use crate::{Error, Handle, Result, Value};
use std::fmt;

/// Identity of a heap slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An addressable location: a slot plus the pre-order offset of a value inside it.
///
/// The slot root is offset 0; its inline children (record fields, array and
/// slice elements) follow in order, each occupying as many offsets as it has
/// inline descendants plus one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    slot: SlotId,
    offset: usize,
}

impl Location {
    pub(crate) const fn new(slot: SlotId, offset: usize) -> Self {
        Location { slot, offset }
    }

    #[inline]
    #[must_use]
    pub const fn slot(self) -> SlotId {
        self.slot
    }

    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// A synthetic address for human-readable output. Slots occupy disjoint
    /// 4 GiB windows and null is never produced.
    #[must_use]
    pub const fn address(self) -> u64 {
        ((self.slot.0 as u64 + 1) << 32) | (self.offset as u64 & 0xffff_ffff)
    }
}

/// The arena. Slots are never freed, so a `SlotId` stays valid for the life of
/// the heap that issued it.
#[derive(Debug, Default, Clone)]
pub struct Heap {
    slots: Vec<Value>,
}

pub(crate) static EMPTY: Heap = Heap::new();

impl Heap {
    #[must_use]
    pub const fn new() -> Self {
        Heap { slots: Vec::new() }
    }

    /// Moves `value` into a new slot.
    pub fn alloc(&mut self, value: Value) -> SlotId {
        self.slots.push(value);
        SlotId(self.slots.len() - 1)
    }

    /// Allocates a slot holding [`Value::Invalid`], to be filled with
    /// [`Heap::replace`] once values referring to it exist.
    pub fn reserve(&mut self) -> SlotId {
        self.alloc(Value::Invalid)
    }

    /// Stores `value` in `slot`, returning the previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingSlot`] if `slot` was not issued by this heap.
    pub fn replace(&mut self, slot: SlotId, value: Value) -> Result<Value> {
        let current = self
            .slots
            .get_mut(slot.0)
            .ok_or(Error::DanglingSlot(slot))?;
        Ok(std::mem::replace(current, value))
    }

    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&Value> {
        self.slots.get(slot.0)
    }

    #[must_use]
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut Value> {
        self.slots.get_mut(slot.0)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// A handle on a free-standing value whose references resolve in this heap.
    /// The value itself is not addressable.
    #[must_use]
    pub fn handle<'h>(&'h self, value: &'h Value) -> Handle<'h> {
        Handle::new(self, value, None)
    }

    /// An addressable handle on the contents of `slot`.
    #[must_use]
    pub fn slot(&self, slot: SlotId) -> Option<Handle<'_>> {
        self.slots
            .get(slot.0)
            .map(|value| Handle::new(self, value, Some(Location::new(slot, 0))))
    }
}
