//! Building values from Rust data.
//!
//! [`ValueSerializer`] is a serde [`Serializer`](serde::Serializer) whose output is
//! a [`Value`]. Use it through [`to_value`](crate::to_value):
//!
//! ```rust
//! use introspect::{encode_to_string, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.ty().unwrap().to_string(), "Point");
//! assert_eq!(encode_to_string(&value).unwrap(), "((x1) (y2))");
//! ```
//!
//! ## Mapping
//!
//! - Integers and floats keep their width; `char` and `str` become strings
//! - `Option` becomes a `dyn Any` interface that is empty for `None`
//! - Sequences become slices, tuples become arrays
//! - Structs, tuple structs and unit structs become records; tuple fields are
//!   named `0`, `1`, ...
//! - Enum variants become a `dyn Enum` interface holding an `Enum::Variant` record
//! - Maps become [`ValueMap`]s in insertion order
//!
//! Element, key and value types are inferred. A collection whose members all
//! share one type uses it; otherwise the collection is typed `dyn Any` and each
//! member is wrapped in an interface.

use crate::types::{Type, TypeName, UintKind};
use crate::{Error, Record, Result, Value, ValueMap};
use serde::{ser, Serialize};

/// Serializer producing [`Value`]s.
pub struct ValueSerializer;

/// Collects elements of a sequence or tuple.
pub struct SerializeSeq {
    items: Vec<Value>,
    fixed: bool,
}

/// Collects the fields of a struct, tuple struct or enum variant.
pub struct SerializeRecord {
    record: Record,
    // Set for variants: the enum the record is wrapped in.
    enum_name: Option<&'static str>,
}

/// Collects map entries.
pub struct SerializeMap {
    entries: Vec<(Value, Value)>,
    current_key: Option<Value>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeSeq;
    type SerializeTuple = SerializeSeq;
    type SerializeTupleStruct = SerializeRecord;
    type SerializeTupleVariant = SerializeRecord;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeRecord;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let items = v.iter().map(|&b| Value::from(b)).collect();
        Ok(Value::slice(Type::Uint(UintKind::U8), items))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::empty_interface(None))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(into_any(value.serialize(self)?))
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Invalid)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::Record(Record::new(name)))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(variant_value(name, Record::new(variant_name(name, variant))))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let record = Record::new(variant_name(name, variant)).with_field("0", to_value(value)?);
        Ok(variant_value(name, record))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeSeq> {
        Ok(SerializeSeq::new(len.unwrap_or(0), false))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeSeq> {
        Ok(SerializeSeq::new(len, true))
    }

    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(TypeName::new(name), None))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(variant_name(name, variant), Some(name)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(TypeName::new(name), None))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(variant_name(name, variant), Some(name)))
    }
}

impl SerializeSeq {
    fn new(capacity: usize, fixed: bool) -> Self {
        SerializeSeq {
            items: Vec::with_capacity(capacity),
            fixed,
        }
    }

    fn finish(self) -> Value {
        let (elem, items) = unify(self.items);
        if self.fixed {
            Value::array(elem, items)
        } else {
            Value::slice(elem, items)
        }
    }
}

impl SerializeRecord {
    fn new(ty: TypeName, enum_name: Option<&'static str>) -> Self {
        SerializeRecord {
            record: Record::new(ty),
            enum_name,
        }
    }

    fn push_positional(&mut self, value: Value) {
        let index = self.record.len().to_string();
        self.record.push(&index, value);
    }

    fn finish(self) -> Value {
        match self.enum_name {
            Some(name) => variant_value(name, self.record),
            None => Value::Record(self.record),
        }
    }
}

impl ser::SerializeSeq for SerializeSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let (keys, values): (Vec<_>, Vec<_>) = self.entries.into_iter().unzip();
        let (key_type, keys) = unify(keys);
        let (value_type, values) = unify(values);

        let mut map = ValueMap::new(key_type, value_type);
        for (key, value) in keys.into_iter().zip(values) {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.push(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeRecord {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.push(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

fn variant_name(name: &str, variant: &str) -> TypeName {
    TypeName::in_module(name, variant)
}

fn variant_value(name: &str, record: Record) -> Value {
    Value::interface(Some(TypeName::new(name)), Value::Record(record))
}

/// Stores `value` in a `dyn Any` interface. Interfaces are not nested: one that
/// already holds a value hands it over.
fn into_any(value: Value) -> Value {
    match value {
        Value::Invalid => Value::empty_interface(None),
        Value::Interface { held, .. } => Value::Interface { ty: None, held },
        other => Value::interface(None, other),
    }
}

/// Picks the common type of `values`, or `dyn Any` with every value boxed.
fn unify(values: Vec<Value>) -> (Type, Vec<Value>) {
    let mut types = values.iter().map(Value::ty);
    let common = match types.next() {
        Some(Some(first)) if types.all(|ty| ty.as_ref() == Some(&first)) => Some(first),
        _ => None,
    };
    match common {
        Some(ty) => (ty, values),
        None => (Type::any(), values.into_iter().map(into_any).collect()),
    }
}
