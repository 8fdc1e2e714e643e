//! Human-readable dumps.
//!
//! Display walks a value and writes one line per leaf, each prefixed with the
//! access path that reaches it from the root label:
//!
//! ```text
//! Display p (&people::Person)
//! p.type = people::Person{Name: "Ann", Age: 3}
//! p.value.Name = "Ann"
//! p.value.Age = 3
//! ```
//!
//! How far the walk goes is set by a [`Budget`]; once it is used up the affected
//! values are skipped without any marker in the output.

use crate::encode::write_quoted;
use crate::handle::{Handle, Shape};
use crate::heap::Location;
use crate::types::FloatKind;
use crate::{Budget, DisplayOptions, Result, Value};
use num_complex::Complex;
use std::io::Write;
use tracing::debug;

/// Writes a dump of `value` to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the writer fails.
pub fn display_with_options<'h, W: Write>(
    writer: W,
    label: &str,
    value: impl Into<Handle<'h>>,
    options: &DisplayOptions,
) -> Result<()> {
    let value: Handle<'h> = value.into();
    let mut printer = Printer {
        out: writer,
        budget: options.budget,
        calls: 0,
        exhausted: false,
    };
    if options.header {
        writeln!(printer.out, "Display {} ({})", label, value.type_label())?;
    }
    printer.visit(label, value, 1)?;
    if printer.exhausted {
        debug!(label, budget = ?options.budget, visits = printer.calls, "display budget exhausted");
    }
    printer.out.flush()?;
    Ok(())
}

struct Printer<W> {
    out: W,
    budget: Budget,
    calls: usize,
    exhausted: bool,
}

impl<W: Write> Printer<W> {
    fn admit(&mut self, depth: usize) -> bool {
        self.calls += 1;
        let admitted = match self.budget {
            Budget::Depth(max) => depth <= max,
            Budget::Calls(max) => self.calls <= max,
            Budget::Unbounded => true,
        };
        if !admitted {
            self.exhausted = true;
        }
        admitted
    }

    fn visit(&mut self, path: &str, value: Handle<'_>, depth: usize) -> Result<()> {
        if !self.admit(depth) {
            return Ok(());
        }
        match value.shape() {
            Shape::Invalid => writeln!(self.out, "{} is invalid", path)?,
            Shape::Array(items) | Shape::Slice(items) => {
                for (i, item) in items.enumerate() {
                    self.visit(&format!("{}[{}]", path, i), item, depth + 1)?;
                }
            }
            Shape::Record(fields) => {
                for (name, field) in fields {
                    self.visit(&format!("{}.{}", path, name), field, depth + 1)?;
                }
            }
            Shape::Map(entries) => {
                for (key, entry) in entries.iter() {
                    self.visit(&format!("{}[{}]", path, format_atom(key)), entry, depth + 1)?;
                }
            }
            Shape::Ref(None) | Shape::Interface(None) => writeln!(self.out, "{} is nil", path)?,
            Shape::Ref(Some(pointee)) => {
                writeln!(self.out, "{}.type = {}", path, format_atom(pointee))?;
                self.visit(&format!("{}.value", path), pointee, depth + 1)?;
            }
            Shape::Interface(Some(held)) => {
                writeln!(self.out, "{}.type = {}", path, held.type_label())?;
                self.visit(&format!("{}.value", path), held, depth + 1)?;
            }
            _ => writeln!(self.out, "{} = {}", path, format_atom(value))?,
        }
        Ok(())
    }
}

/// Formats a value without descending through references.
///
/// Records and arrays print inline. References, slices, maps, channels,
/// functions and raw pointers print as their type and a hex address.
///
/// ```rust
/// use introspect::{format_atom, record, Handle, Value};
///
/// let point = record!("geo::Point" => { X: 1, Y: -2 });
/// assert_eq!(format_atom(Handle::from(&point)), "geo::Point{X: 1, Y: -2}");
/// assert_eq!(format_atom(Handle::from(&Value::from("a\"b"))), r#""a\"b""#);
/// ```
#[must_use]
pub fn format_atom(value: Handle<'_>) -> String {
    let mut out = String::new();
    write_atom(&mut out, value);
    out
}

fn write_atom(out: &mut String, value: Handle<'_>) {
    match value.shape() {
        Shape::Invalid => out.push_str("invalid"),
        Shape::Bool(b) => out.push_str(if b { "true" } else { "false" }),
        Shape::Int(i) => out.push_str(&i.to_string()),
        Shape::Uint(u) => out.push_str(&u.to_string()),
        // f32 values are stored widened; print them at their own width.
        Shape::Float(f) if is_f32(value) => out.push_str(&(f as f32).to_string()),
        Shape::Float(f) => out.push_str(&f.to_string()),
        Shape::Complex(c) if is_f32(value) => {
            out.push_str(&Complex::new(c.re as f32, c.im as f32).to_string());
        }
        Shape::Complex(c) => out.push_str(&c.to_string()),
        Shape::String(s) => write_quoted(out, s),
        Shape::Ref(pointee) => {
            let address = pointee.and_then(|p| p.location()).map_or(0, Location::address);
            write_addressed(out, value, address);
        }
        Shape::Slice(_) | Shape::Map(_) => {
            let address = value.location().map_or(0, Location::address);
            write_addressed(out, value, address);
        }
        Shape::Chan(id) | Shape::Func(id) => write_addressed(out, value, id.get()),
        Shape::RawPtr(target) => {
            let address = target.map_or(0, |slot| Location::new(slot, 0).address());
            write_addressed(out, value, address);
        }
        Shape::Record(fields) => {
            out.push_str(&value.type_label());
            out.push('{');
            for (i, (name, field)) in fields.enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                write_atom(out, field);
            }
            out.push('}');
        }
        Shape::Array(items) => {
            out.push_str(&value.type_label());
            out.push('[');
            for (i, item) in items.enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_atom(out, item);
            }
            out.push(']');
        }
        Shape::Interface(None) => out.push_str("nil"),
        Shape::Interface(Some(held)) => write_atom(out, held),
    }
}

fn is_f32(value: Handle<'_>) -> bool {
    matches!(
        value.value(),
        Value::Float(FloatKind::F32, _) | Value::Complex(FloatKind::F32, _)
    )
}

fn write_addressed(out: &mut String, value: Handle<'_>, address: u64) {
    out.push_str(&format!("{} 0x{:x}", value.type_label(), address));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntKind, Type, TypeName};
    use crate::{record, Heap, ValueMap};
    use num_complex::Complex64;

    fn dump(value: Handle<'_>, options: &DisplayOptions) -> String {
        let mut out = Vec::new();
        display_with_options(&mut out, "v", value, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn bare() -> DisplayOptions {
        DisplayOptions::new().with_header(false)
    }

    fn cyclic_list(heap: &mut Heap) -> Value {
        let node = Type::record("list::Node");
        let slot = heap.reserve();
        heap.replace(
            slot,
            record!("list::Node" => {
                Value: 1,
                Next: Value::reference(node.clone(), slot),
            }),
        )
        .unwrap();
        Value::reference(node, slot)
    }

    #[test]
    fn test_record_fields_in_order() {
        let person = record!("people::Person" => { Name: "Ann", Age: 3 });
        let mut out = Vec::new();
        display_with_options(&mut out, "p", &person, &DisplayOptions::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Display p (people::Person)\np.Name = \"Ann\"\np.Age = 3\n"
        );
    }

    #[test]
    fn test_invalid_and_nil() {
        assert_eq!(dump(Handle::from(&Value::Invalid), &bare()), "v is invalid\n");
        assert_eq!(dump(Handle::from(&Value::nil(Type::Bool)), &bare()), "v is nil\n");
        assert_eq!(
            dump(Handle::from(&Value::empty_interface(None)), &bare()),
            "v is nil\n"
        );
    }

    #[test]
    fn test_header_names_invalid_type() {
        let out = dump(Handle::from(&Value::Invalid), &DisplayOptions::new());
        assert!(out.starts_with("Display v (invalid)\n"));
    }

    #[test]
    fn test_sequences_and_maps() {
        let items = Value::slice(Type::String, vec![Value::from("a"), Value::from("b")]);
        assert_eq!(dump(Handle::from(&items), &bare()), "v[0] = \"a\"\nv[1] = \"b\"\n");

        let mut map = ValueMap::new(Type::String, Type::Int(IntKind::I32));
        map.insert(Value::from("x"), Value::from(1));
        map.insert(Value::from("y"), Value::from(2));
        assert_eq!(
            dump(Handle::from(&Value::Map(map)), &bare()),
            "v[\"x\"] = 1\nv[\"y\"] = 2\n"
        );
    }

    #[test]
    fn test_reference_lines() {
        let mut heap = Heap::new();
        let slot = heap.alloc(Value::from(true));
        let root = Value::reference(Type::Bool, slot);
        assert_eq!(
            dump(heap.handle(&root), &bare()),
            "v.type = true\nv.value = true\n"
        );
    }

    #[test]
    fn test_interface_lines() {
        let shape = Value::interface(
            Some(TypeName::new("shapes::Shape")),
            record!("shapes::Circle" => { R: 2 }),
        );
        assert_eq!(
            dump(Handle::from(&shape), &bare()),
            "v.type = shapes::Circle\nv.value.R = 2\n"
        );
    }

    #[test]
    fn test_atoms() {
        let arr = Value::array(Type::Int(IntKind::I32), vec![Value::from(1), Value::from(2)]);
        assert_eq!(format_atom(Handle::from(&arr)), "[i32; 2][1, 2]");
        assert_eq!(format_atom(Handle::from(&Value::from(1.5))), "1.5");
        assert_eq!(format_atom(Handle::from(&Value::nil(Type::Bool))), "&bool 0x0");
        assert_eq!(format_atom(Handle::from(&Value::RawPtr(None))), "*const () 0x0");
        assert_eq!(
            format_atom(Handle::from(&Value::interface(None, Value::from(false)))),
            "false"
        );
    }

    #[test]
    fn test_f32_prints_at_its_own_width() {
        assert_eq!(format_atom(Handle::from(&Value::from(0.1f32))), "0.1");
        assert_eq!(format_atom(Handle::from(&Value::from(0.1f64))), "0.1");
        let c = Value::from(Complex::new(0.1f32, -0.2f32));
        assert_eq!(format_atom(Handle::from(&c)), "0.1-0.2i");
        let c = Value::from(Complex64::new(0.5, 2.0));
        assert_eq!(format_atom(Handle::from(&c)), "0.5+2i");

        let sample = record!("m::Sample" => { X: 0.1f32 });
        assert_eq!(dump(Handle::from(&sample), &bare()), "v.X = 0.1\n");
    }

    #[test]
    fn test_unstored_sequences_print_zero_address() {
        let items = Value::slice(Type::String, vec![Value::from("a")]);
        assert_eq!(format_atom(Handle::from(&items)), "Vec<String> 0x0");

        let mut heap = Heap::new();
        let slot = heap.alloc(items);
        assert_eq!(
            format_atom(heap.slot(slot).unwrap()),
            "Vec<String> 0x100000000"
        );
    }

    #[test]
    fn test_reference_atom_uses_slot_address() {
        let mut heap = Heap::new();
        let list = cyclic_list(&mut heap);
        let out = dump(heap.handle(&list), &bare().with_budget(Budget::Depth(2)));
        assert_eq!(
            out,
            "v.type = list::Node{Value: 1, Next: &list::Node 0x100000000}\n"
        );
    }

    #[test]
    fn test_depth_budget_terminates_on_cycles() {
        let mut heap = Heap::new();
        let list = cyclic_list(&mut heap);
        let out = dump(heap.handle(&list), &bare());
        // Each lap around the cycle costs two levels: the reference and the record.
        // References sit at odd depths 1..=19 and print their type line, the
        // records below them print `Value` at depths 3..=19.
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines.iter().filter(|line| line.ends_with(".Value = 1")).count(), 9);
        let deepest = format!(
            "v{}.type = list::Node{{Value: 1, Next: &list::Node 0x100000000}}",
            ".value.Next".repeat(9)
        );
        assert_eq!(lines.last().copied(), Some(deepest.as_str()));
    }

    #[test]
    fn test_calls_budget_counts_every_visit() {
        let mut heap = Heap::new();
        let list = cyclic_list(&mut heap);
        let out = dump(heap.handle(&list), &bare().with_budget(Budget::Calls(3)));
        assert_eq!(out.lines().count(), 2);
        assert_eq!(out.lines().nth(1), Some("v.value.Value = 1"));
    }

    #[test]
    fn test_writer_errors_propagate() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = display_with_options(Broken, "v", &Value::from(1), &DisplayOptions::new());
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
