//! # introspect
//!
//! Generic traversal of dynamically typed value graphs: human-readable dumps,
//! a canonical text encoding, deep equality and cycle detection.
//!
//! ## What is a value graph?
//!
//! A [`Value`] is a closed sum type covering scalars, strings, records, arrays,
//! slices, maps, interfaces, references, channels, functions and raw pointers.
//! Values nest as trees. References point into a [`Heap`] of slots, which is where
//! sharing and cycles come from.
//!
//! ## Key Features
//!
//! - **Display**: one line per leaf, prefixed with its access path, bounded by a
//!   per-call budget so cyclic graphs still terminate
//! - **Encode**: a deterministic, parenthesized encoding that rejects values it
//!   cannot represent and graphs that loop back on themselves
//! - **Equal**: structural equality with float tolerance that terminates on cycles
//! - **Cycle detection**: reports whether a graph loops back into itself
//! - **Serde Compatible**: build values from any `#[derive(Serialize)]` type with
//!   [`to_value`]
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! introspect = "0.1"
//! ```
//!
//! ### Inspecting a record
//!
//! ```rust
//! use introspect::{display_to_writer, encode_to_string, record};
//!
//! let person = record!("people::Person" => { Name: "Ann", Age: 3 });
//!
//! let mut out = Vec::new();
//! display_to_writer(&mut out, "p", &person).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Display p (people::Person)\np.Name = \"Ann\"\np.Age = 3\n"
//! );
//!
//! assert_eq!(encode_to_string(&person).unwrap(), r#"((Name"Ann") (Age3))"#);
//! ```
//!
//! ### Graphs with cycles
//!
//! ```rust
//! use introspect::{equal, has_cycle, record, Heap, Type, Value};
//!
//! let node = Type::record("list::Node");
//! let mut heap = Heap::new();
//! let slot = heap.reserve();
//! heap.replace(slot, record!("list::Node" => {
//!     Value: 1,
//!     Next: Value::reference(node.clone(), slot),
//! })).unwrap();
//! let list = Value::reference(node, slot);
//!
//! assert!(has_cycle(heap.handle(&list)));
//! assert!(equal(heap.handle(&list), heap.handle(&list)));
//! ```
//!
//! ### From Rust data
//!
//! ```rust
//! use introspect::{encode_to_string, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(encode_to_string(&value).unwrap(), "((x1) (y2))");
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Identity comes from heap slots and minted ids, never from memory addresses
//! - Every traversal keeps its state in the call, so concurrent calls never
//!   interfere
//!
//! ## Format Reference
//!
//! The exact line and encoding formats are documented in [`format`].

pub mod cycle;
pub mod display;
pub mod encode;
pub mod equal;
pub mod error;
pub mod format;
pub mod handle;
pub mod heap;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod types;
pub mod value;

pub use cycle::has_cycle;
pub use display::{display_with_options, format_atom};
pub use encode::Encoder;
pub use equal::{equal, equal_with_options};
pub use error::{Error, Result};
pub use handle::{Elements, Entries, Fields, Handle, Shape};
pub use heap::{Heap, Location, SlotId};
pub use map::ValueMap;
pub use options::{Budget, DisplayOptions, EncodeOptions, EqualOptions};
pub use ser::ValueSerializer;
pub use types::{FloatKind, IntKind, Kind, Type, TypeName, UintKind};
pub use value::{ObjectId, Record, Value};

use serde::Serialize;
use std::io;

/// Writes a dump of `value` to standard output.
///
/// # Examples
///
/// ```rust
/// use introspect::{display, Value};
///
/// display("answer", &Value::from(42)).unwrap();
/// // Display answer (i32)
/// // answer = 42
/// ```
///
/// # Errors
///
/// Returns an error if writing to standard output fails.
pub fn display<'h>(label: &str, value: impl Into<Handle<'h>>) -> Result<()> {
    let stdout = io::stdout();
    display_to_writer(stdout.lock(), label, value)
}

/// Writes a dump of `value` to `writer` with the default options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn display_to_writer<'h, W>(writer: W, label: &str, value: impl Into<Handle<'h>>) -> Result<()>
where
    W: io::Write,
{
    display_with_options(writer, label, value, &DisplayOptions::default())
}

/// Encode a value in canonical form.
///
/// # Examples
///
/// ```rust
/// use introspect::{encode, Value};
///
/// assert_eq!(encode(&Value::from(true)).unwrap(), b"t");
/// assert_eq!(encode(&Value::from("hi")).unwrap(), b"\"hi\"");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the graph contains a function, channel
/// or raw pointer, and [`Error::Cycle`] if it loops back on itself. No bytes are
/// returned in either case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<'h>(value: impl Into<Handle<'h>>) -> Result<Vec<u8>> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encode a value in canonical form as a `String`.
///
/// # Errors
///
/// Same as [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_to_string<'h>(value: impl Into<Handle<'h>>) -> Result<String> {
    let mut encoder = Encoder::new(EncodeOptions::default());
    encoder.encode(value.into())?;
    Ok(encoder.into_inner())
}

/// Encode a value in canonical form with custom options.
///
/// # Errors
///
/// Same as [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options<'h>(
    value: impl Into<Handle<'h>>,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(options.clone());
    encoder.encode(value.into())?;
    Ok(encoder.into_inner().into_bytes())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use introspect::{to_value, Kind};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.kind(), Kind::Record);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, such as a 128-bit integer.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct Worker {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_display_derived_struct() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let mut out = Vec::new();
        display_to_writer(&mut out, "pt", &value).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Display pt (Point)\npt.x = 1\npt.y = 2\n"
        );
    }

    #[test]
    fn test_encode_variants_agree() {
        let value = to_value(&Worker {
            name: "Ann".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        })
        .unwrap();
        let text = encode_to_string(&value).unwrap();
        assert_eq!(text, r#"((name"Ann") (tags("a" "b")))"#);
        assert_eq!(encode(&value).unwrap(), text.into_bytes());
    }

    #[test]
    fn test_encode_with_precision() {
        let options = EncodeOptions::new().with_float_precision(1);
        assert_eq!(encode_with_options(&Value::from(1.26), &options).unwrap(), b"1.3");
    }

    #[test]
    fn test_equal_through_serde() {
        let a = to_value(&Point { x: 1, y: 2 }).unwrap();
        let b = to_value(&Point { x: 1, y: 2 }).unwrap();
        let c = to_value(&Point { x: 2, y: 1 }).unwrap();
        assert!(equal(&a, &b));
        assert!(!equal(&a, &c));
        assert!(!has_cycle(&a));
    }
}
