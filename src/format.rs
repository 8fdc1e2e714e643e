//! Output Formats
//!
//! This module documents the two text forms the crate produces: the line-oriented
//! dump written by [`display`](crate::display) and the canonical encoding returned
//! by [`encode`](crate::encode).
//!
//! # Display
//!
//! ## Header
//!
//! ```text
//! Display <label> (<type>)
//! ```
//!
//! `<type>` is `invalid` for the invalid value. The header can be switched off
//! with [`DisplayOptions::with_header`](crate::DisplayOptions::with_header).
//!
//! ## Paths
//!
//! Every line starts with the path from the root label to the value:
//!
//! | Step | Path suffix | Example |
//! |------|-------------|---------|
//! | Record field | `.Field` | `p.Name` |
//! | Sequence element | `[i]` | `p.Tags[0]` |
//! | Map entry | `[<key atom>]` | `m["a"]` |
//! | Reference or interface target | `.value` | `p.value.Name` |
//!
//! ## Lines
//!
//! | Value | Line |
//! |-------|------|
//! | Invalid | `<path> is invalid` |
//! | Nil reference, empty interface | `<path> is nil` |
//! | Reference | `<path>.type = <atom of the target>` then the target under `<path>.value` |
//! | Interface | `<path>.type = <held type>` then the held value under `<path>.value` |
//! | Anything else without children | `<path> = <atom>` |
//!
//! Arrays, slices, records and maps print no line of their own; only their
//! children do. Empty ones print nothing.
//!
//! ## Atoms
//!
//! | Value | Atom | Example |
//! |-------|------|---------|
//! | Bool | `true` / `false` | `true` |
//! | Integer | decimal | `-12` |
//! | Float | shortest round-trip form at its own width | `0.1` |
//! | Complex | `re+imi` | `1+2i` |
//! | String | quoted, escaped | `"a\"b"` |
//! | Record | `<type>{Field: atom, ...}` | `geo::Point{X: 1, Y: 2}` |
//! | Array | `<type>[atom, ...]` | `[i32; 2][1, 2]` |
//! | Reference | `<type> 0x<address>` | `&list::Node 0x100000000` |
//! | Slice, map | `<type> 0x<address>` | `Vec<String> 0x100000000` |
//! | Channel, function, raw pointer | `<type> 0x<address>` | `Chan<bool> 0x2a` |
//! | Interface | atom of the held value, `nil` when empty | `3` |
//!
//! Addresses are synthetic. A reference shows the address of its target slot, a
//! slice or map its own location inside a slot, a channel or function its
//! identity.
//!
//! A slice or map that is not stored in a heap has no location and prints
//! `0x0`, the same address a nil reference prints. Tell them apart by type: a
//! nil reference atom always starts with `&`.
//!
//! ## Budget
//!
//! | Budget | Effect |
//! |--------|--------|
//! | `Depth(n)` (default `n = 20`) | values more than `n` levels below the root are skipped |
//! | `Calls(n)` | the dump stops after `n` values have been visited in total |
//! | `Unbounded` | no limit; does not terminate on cyclic graphs |
//!
//! # Canonical Encoding
//!
//! ```text
//! value     = "invalid" | int | float | string | "t" | "nil" | complex
//!           | list | record | map | interface
//! complex   = "$C(" float " " float ")"
//! list      = "(" [ value { " " value } ] ")"
//! record    = "(" [ field { " " field } ] ")"
//! field     = "(" name value ")"
//! map       = "(" [ entry { " " entry } ] ")"
//! entry     = "(" value " " value ")"
//! interface = "(" tag " " value ")"
//! tag       = qualified-name | string
//! ```
//!
//! **Rules**:
//! - Floats print in fixed point with
//!   [`EncodeOptions::float_precision`](crate::EncodeOptions) digits (default 6)
//! - `true` encodes as `t`, `false` as `nil`
//! - References encode as their target; a nil reference and an empty interface
//!   encode as `invalid`
//! - Record fields and map entries keep their order
//! - An interface tag is the qualified name of the held value's type when it is a
//!   record or named interface, otherwise its type string quoted (`"i32"`)
//! - Functions, channels and raw pointers cannot be encoded
//!
//! ## Examples
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `vec![1, 2, 3]` | `(1 2 3)` |
//! | `Person { Name: "Ann", Age: 3 }` | `((Name"Ann") (Age3))` |
//! | `{"a": 1}` | `(("a" 1))` |
//! | `Some(1.5)` as `dyn Any` | `("f64" 1.500000)` |
