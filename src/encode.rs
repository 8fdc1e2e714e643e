//! Canonical encoding.
//!
//! This module provides the [`Encoder`] that turns a value graph into a
//! deterministic, parenthesized text form.
//!
//! ## Grammar
//!
//! - **Scalars**: `invalid`, decimal integers, fixed-point floats, quoted strings,
//!   `t` / `nil` for booleans, `$C(re im)` for complex numbers
//! - **Sequences**: `(e1 e2 ...)`
//! - **Records**: `((Name<enc>) (Name<enc>) ...)`, the field name glued to its value
//! - **Maps**: `((k1 v1) (k2 v2) ...)` in insertion order
//! - **Interfaces**: `(<type name> <enc>)`
//!
//! References are transparent. Functions, channels and raw pointers have no
//! encoding and fail with [`Error::UnsupportedType`]. A reference that leads back
//! to a slot still being encoded fails with [`Error::Cycle`].
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use introspect::{encode_to_string, Value};
//!
//! let items = Value::slice(introspect::Type::Int(introspect::IntKind::I32), vec![
//!     Value::from(1),
//!     Value::from(2),
//!     Value::from(3),
//! ]);
//! assert_eq!(encode_to_string(&items).unwrap(), "(1 2 3)");
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use introspect::{EncodeOptions, Encoder, Handle, Value};
//!
//! let mut encoder = Encoder::new(EncodeOptions::new());
//! encoder.encode(Handle::from(&Value::from(true))).unwrap();
//! assert_eq!(encoder.into_inner(), "t");
//! ```

use crate::handle::{Handle, Shape};
use crate::{EncodeOptions, Error, Result, SlotId};
use tracing::debug;

/// The canonical encoder.
///
/// Output accumulates across calls to [`Encoder::encode`] until
/// [`Encoder::into_inner`] takes it.
pub struct Encoder {
    output: String,
    options: EncodeOptions,
    // Slots entered on the way from the root to the current value.
    active: Vec<SlotId>,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Encoder {
            output: String::with_capacity(128),
            options,
            active: Vec::new(),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the encoding of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for functions, channels and raw
    /// pointers, and [`Error::Cycle`] when a reference re-enters a slot that is
    /// already on the current path. Output appended before the failure is left in
    /// place; callers should discard it.
    pub fn encode(&mut self, value: Handle<'_>) -> Result<()> {
        match value.shape() {
            Shape::Invalid | Shape::Ref(None) | Shape::Interface(None) => {
                self.output.push_str("invalid");
            }
            Shape::Bool(b) => self.output.push_str(if b { "t" } else { "nil" }),
            Shape::Int(i) => self.output.push_str(&i.to_string()),
            Shape::Uint(u) => self.output.push_str(&u.to_string()),
            Shape::Float(f) => self.write_float(f),
            Shape::Complex(c) => {
                self.output.push_str("$C(");
                self.write_float(c.re);
                self.output.push(' ');
                self.write_float(c.im);
                self.output.push(')');
            }
            Shape::String(s) => write_quoted(&mut self.output, s),
            Shape::Ref(Some(pointee)) => self.encode_pointee(pointee)?,
            Shape::Array(items) | Shape::Slice(items) => {
                self.output.push('(');
                for (i, item) in items.enumerate() {
                    if i > 0 {
                        self.output.push(' ');
                    }
                    self.encode(item)?;
                }
                self.output.push(')');
            }
            Shape::Record(fields) => {
                self.output.push('(');
                for (i, (name, field)) in fields.enumerate() {
                    if i > 0 {
                        self.output.push(' ');
                    }
                    self.output.push('(');
                    self.output.push_str(name);
                    self.encode(field)?;
                    self.output.push(')');
                }
                self.output.push(')');
            }
            Shape::Map(entries) => {
                self.output.push('(');
                for (i, (key, entry)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.output.push(' ');
                    }
                    self.output.push('(');
                    self.encode(key)?;
                    self.output.push(' ');
                    self.encode(entry)?;
                    self.output.push(')');
                }
                self.output.push(')');
            }
            Shape::Interface(Some(held)) => {
                if !held.is_valid() {
                    self.output.push_str("invalid");
                    return Ok(());
                }
                self.output.push('(');
                self.write_type_tag(held);
                self.output.push(' ');
                self.encode(held)?;
                self.output.push(')');
            }
            Shape::Chan(_) | Shape::Func(_) | Shape::RawPtr(_) => {
                let ty = value.type_label();
                debug!(ty = %ty, "value has no canonical encoding");
                return Err(Error::unsupported_type(ty));
            }
        }
        Ok(())
    }

    fn encode_pointee(&mut self, pointee: Handle<'_>) -> Result<()> {
        let Some(slot) = pointee.location().map(|loc| loc.slot()) else {
            return self.encode(pointee);
        };
        if self.active.contains(&slot) {
            let ty = pointee.type_label();
            debug!(ty = %ty, %slot, "encoder re-entered a slot on its own path");
            return Err(Error::cycle(ty));
        }
        self.active.push(slot);
        let result = self.encode(pointee);
        self.active.pop();
        result
    }

    #[inline]
    fn write_float(&mut self, f: f64) {
        self.output
            .push_str(&format!("{:.*}", self.options.float_precision, f));
    }

    // Named types print their qualified name, anything else its quoted type string.
    fn write_type_tag(&mut self, held: Handle<'_>) {
        match held.ty() {
            Some(ty) => match ty.name() {
                Some(name) => self.output.push_str(&name.to_string()),
                None => write_quoted(&mut self.output, &ty.to_string()),
            },
            None => self.output.push_str("invalid"),
        }
    }
}

/// Appends `s` in double quotes, escaping quotes, backslashes and control
/// characters.
pub(crate) fn write_quoted(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            '\0' => output.push_str("\\0"),
            c if c.is_control() => output.push_str(&format!("\\u{{{:x}}}", c as u32)),
            _ => output.push(ch),
        }
    }
    output.push('"');
}
