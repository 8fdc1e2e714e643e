use introspect::{encode_to_string, equal, record, Heap, Kind, Record, Type, Value};

#[test]
fn test_record_macro_empty() {
    let value = record!("markers::Done");
    assert_eq!(value, Value::Record(Record::new("markers::Done")));
    assert_eq!(value.kind(), Kind::Record);
    assert_eq!(encode_to_string(&value).unwrap(), "()");
}

#[test]
fn test_record_macro_primitives() {
    let value = record!("cfg::Server" => {
        Host: "localhost",
        Port: 8080u16,
        Debug: true,
        Ratio: 0.5,
    });

    let record = value.as_record().unwrap();
    assert_eq!(record.field("Host"), Some(&Value::from("localhost")));
    assert_eq!(record.field("Port"), Some(&Value::from(8080u16)));
    assert_eq!(record.field("Debug"), Some(&Value::from(true)));
    assert_eq!(record.field("Ratio"), Some(&Value::from(0.5)));
}

#[test]
fn test_record_macro_expressions() {
    let port = 8000 + 80;
    let host = String::from("example.org");
    let value = record!("cfg::Server" => { Host: host.clone(), Port: port });
    let record = value.as_record().unwrap();
    assert_eq!(record.field("Host").and_then(Value::as_str), Some("example.org"));
    assert_eq!(record.field("Port").and_then(Value::as_i64), Some(8080));
}

#[test]
fn test_record_macro_type_path() {
    let value = record!("net::http::Request" => { Method: "GET" });
    let ty = value.ty().unwrap();
    assert_eq!(ty, Type::record("net::http::Request"));
    let name = ty.name().unwrap();
    assert_eq!(name.module(), Some("net::http"));
    assert_eq!(name.name(), "Request");
}

#[test]
fn test_record_macro_equality() {
    let a = record!("geo::Point" => { X: 1, Y: 2 });
    let b = record!("geo::Point" => { X: 1, Y: 2 });
    let swapped = record!("geo::Point" => { Y: 2, X: 1 });
    assert!(equal(&a, &b));
    // Fields compare by position.
    assert!(!equal(&a, &swapped));
}

#[test]
fn test_record_macro_with_references() {
    let mut heap = Heap::new();
    let config = heap.alloc(record!("cfg::Config" => { Retries: 3 }));
    let service = record!("svc::Service" => {
        Name: "api",
        Config: Value::reference(Type::record("cfg::Config"), config),
    });
    assert_eq!(
        encode_to_string(heap.handle(&service)).unwrap(),
        r#"((Name"api") (Config((Retries3))))"#
    );
}
