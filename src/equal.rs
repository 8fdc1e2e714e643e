//! Deep equality.
//!
//! Two values are equal when they have the same dynamic type and the same
//! contents, looking through references and interfaces. Floats and complex
//! numbers compare within an absolute tolerance. Functions, channels and raw
//! pointers compare by identity.
//!
//! Cyclic graphs terminate: every pair of addressable values already under
//! comparison is remembered and assumed equal when met again.
//!
//! ```rust
//! use introspect::{equal, record};
//!
//! let a = record!("people::Person" => { Name: "Ann", Age: 3 });
//! let b = record!("people::Person" => { Name: "Ann", Age: 3 });
//! assert!(equal(&a, &b));
//! ```

use crate::handle::{Handle, Shape};
use crate::heap::Location;
use crate::types::Type;
use crate::EqualOptions;
use std::collections::HashSet;
use tracing::trace;

/// Reports whether `a` and `b` are deeply equal, using the default tolerance.
pub fn equal<'a, 'b>(a: impl Into<Handle<'a>>, b: impl Into<Handle<'b>>) -> bool {
    equal_with_options(a, b, &EqualOptions::default())
}

/// Reports whether `a` and `b` are deeply equal.
pub fn equal_with_options<'a, 'b>(
    a: impl Into<Handle<'a>>,
    b: impl Into<Handle<'b>>,
    options: &EqualOptions,
) -> bool {
    let mut comparison = Comparison {
        tolerance: options.tolerance,
        seen: HashSet::new(),
    };
    comparison.equal(a.into(), b.into())
}

#[derive(PartialEq, Eq, Hash)]
struct Visit {
    a: Location,
    b: Location,
    ty: Type,
}

struct Comparison {
    tolerance: f64,
    seen: HashSet<Visit>,
}

impl Comparison {
    fn equal(&mut self, x: Handle<'_>, y: Handle<'_>) -> bool {
        let (tx, ty) = match (x.ty(), y.ty()) {
            (Some(tx), Some(ty)) => (tx, ty),
            (None, None) => return true,
            _ => return false,
        };
        if tx != ty {
            return false;
        }

        if let (Some(a), Some(b)) = (x.location(), y.location()) {
            if !self.seen.insert(Visit { a, b, ty: tx }) {
                trace!(?a, ?b, "pair already under comparison");
                return true;
            }
        }

        match (x.shape(), y.shape()) {
            (Shape::Bool(a), Shape::Bool(b)) => a == b,
            (Shape::String(a), Shape::String(b)) => a == b,
            (Shape::Int(a), Shape::Int(b)) => a == b,
            (Shape::Uint(a), Shape::Uint(b)) => a == b,
            (Shape::Float(a), Shape::Float(b)) => self.close(a, b),
            (Shape::Complex(a), Shape::Complex(b)) => {
                self.close(a.re, b.re) && self.close(a.im, b.im)
            }
            (Shape::Chan(a), Shape::Chan(b)) | (Shape::Func(a), Shape::Func(b)) => a == b,
            (Shape::RawPtr(a), Shape::RawPtr(b)) => a == b,
            (Shape::Ref(a), Shape::Ref(b)) | (Shape::Interface(a), Shape::Interface(b)) => {
                self.unwrapped(a, b)
            }
            (Shape::Array(xs), Shape::Array(ys)) | (Shape::Slice(xs), Shape::Slice(ys)) => {
                xs.len() == ys.len() && xs.zip(ys).all(|(x, y)| self.equal(x, y))
            }
            (Shape::Record(xs), Shape::Record(ys)) => {
                // Same-named records may still be laid out differently.
                xs.len() == ys.len()
                    && xs
                        .zip(ys)
                        .all(|((nx, x), (ny, y))| nx == ny && self.equal(x, y))
            }
            (Shape::Map(xs), Shape::Map(ys)) => {
                // Driven by the left map only; equal sizes make this sufficient.
                xs.len() == ys.len()
                    && xs.iter().all(|(key, x)| match ys.get(key.value()) {
                        Some(y) => self.equal(x, y),
                        None => !x.is_valid(),
                    })
            }
            _ => false,
        }
    }

    // A missing side stands for the invalid value.
    fn unwrapped(&mut self, x: Option<Handle<'_>>, y: Option<Handle<'_>>) -> bool {
        match (x, y) {
            (Some(x), Some(y)) => self.equal(x, y),
            (None, None) => true,
            (Some(h), None) | (None, Some(h)) => !h.is_valid(),
        }
    }

    #[inline]
    fn close(&self, x: f64, y: f64) -> bool {
        x - self.tolerance <= y && y <= x + self.tolerance
    }
}
