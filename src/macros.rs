/// Builds a [`Value::Record`](crate::Value::Record) from a type path and
/// `Field: value` pairs, keeping the fields in the order written.
///
/// Each value goes through `Value::from`, so primitives, strings, records and
/// prebuilt values can be mixed freely.
///
/// ```rust
/// use introspect::{record, Value};
///
/// let person = record!("people::Person" => { Name: "Ann", Age: 3 });
/// let fields = person.as_record().unwrap();
/// assert_eq!(fields.type_name().to_string(), "people::Person");
/// assert_eq!(fields.field("Age"), Some(&Value::from(3)));
///
/// let unit = record!("markers::Done");
/// assert!(unit.as_record().unwrap().is_empty());
/// ```
#[macro_export]
macro_rules! record {
    ($ty:expr) => {
        $crate::Value::Record($crate::Record::new($ty))
    };

    ($ty:expr => {}) => {
        $crate::Value::Record($crate::Record::new($ty))
    };

    ($ty:expr => { $($field:ident : $value:expr),+ $(,)? }) => {{
        let mut record = $crate::Record::new($ty);
        $(
            record.push(stringify!($field), $crate::Value::from($value));
        )+
        $crate::Value::Record(record)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{IntKind, Type, Value};

    #[test]
    fn test_record_macro_fields() {
        let value = record!("people::Person" => {
            Name: "Alice",
            Age: 30,
            Admin: true,
        });

        let record = value.as_record().unwrap();
        assert_eq!(record.len(), 3);
        let names: Vec<_> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Name", "Age", "Admin"]);
        assert_eq!(record.field("Name"), Some(&Value::from("Alice")));
        assert_eq!(record.field("Admin"), Some(&Value::from(true)));
    }

    #[test]
    fn test_record_macro_nesting() {
        let value = record!("geo::Line" => {
            From: record!("geo::Point" => { X: 0, Y: 0 }),
            To: record!("geo::Point" => { X: 3, Y: 4 }),
            Tags: Value::slice(Type::String, vec![Value::from("a")]),
        });

        let to = value.as_record().and_then(|r| r.field("To")).unwrap();
        assert_eq!(
            to.as_record().and_then(|r| r.field("Y")).and_then(Value::as_i64),
            Some(4)
        );
        assert_eq!(
            value.ty(),
            Some(Type::record("geo::Line"))
        );
    }

    #[test]
    fn test_record_macro_empty() {
        assert_eq!(record!("markers::Done"), record!("markers::Done" => {}));
        assert_ne!(
            record!("markers::Done"),
            record!("markers::Done" => { N: Value::Int(IntKind::I64, 0) })
        );
    }
}
