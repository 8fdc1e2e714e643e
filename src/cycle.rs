//! Cycle detection.

use crate::handle::{Handle, Shape};
use crate::heap::Location;
use std::collections::HashSet;
use tracing::trace;

/// Reports whether walking `value` can reach a location it is already inside.
///
/// Only the path from the root counts: a slot reached twice along different
/// branches (a DAG) is not a cycle. Map keys are not walked.
///
/// ```rust
/// use introspect::{has_cycle, Heap, Type, Value};
///
/// let mut heap = Heap::new();
/// let shared = heap.alloc(Value::from(1));
/// let ptr = Value::reference(Type::Int(introspect::IntKind::I32), shared);
/// let pair = Value::slice(Type::reference(Type::Int(introspect::IntKind::I32)), vec![
///     ptr.clone(),
///     ptr,
/// ]);
/// assert!(!has_cycle(heap.handle(&pair)));
/// ```
pub fn has_cycle<'h>(value: impl Into<Handle<'h>>) -> bool {
    let mut detector = Detector {
        path: HashSet::new(),
    };
    detector.visit(value.into())
}

struct Detector {
    path: HashSet<Location>,
}

impl Detector {
    fn visit(&mut self, value: Handle<'_>) -> bool {
        // Records and arrays share storage with their first inline child, so
        // only the children are tracked.
        let tracked = match value.location() {
            Some(location) if !value.kind().is_inline_composite() => {
                if !self.path.insert(location) {
                    trace!(?location, ty = %value.type_label(), "cycle found");
                    return true;
                }
                Some(location)
            }
            _ => None,
        };

        let found = match value.shape() {
            Shape::Ref(Some(inner)) | Shape::Interface(Some(inner)) => self.visit(inner),
            Shape::Record(mut fields) => fields.any(|(_, field)| self.visit(field)),
            Shape::Array(mut items) | Shape::Slice(mut items) => items.any(|item| self.visit(item)),
            Shape::Map(entries) => entries.iter().any(|(_, entry)| self.visit(entry)),
            _ => false,
        };

        if let Some(location) = tracked {
            self.path.remove(&location);
        }
        found
    }
}
