use introspect::{
    display_to_writer, display_with_options, encode, encode_to_string, equal, has_cycle, record,
    to_value, Budget, DisplayOptions, Error, Heap, IntKind, Type, TypeName, Value, ValueMap,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Serialize, Debug, Clone)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Debug, Clone)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

fn sample_order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    }
}

fn dump(label: &str, value: &Value) -> String {
    let mut out = Vec::new();
    display_to_writer(&mut out, label, value).unwrap();
    String::from_utf8(out).unwrap()
}

fn string_map(pairs: &[(&str, i64)]) -> Value {
    let mut map = ValueMap::new(Type::String, Type::Int(IntKind::I64));
    for (key, value) in pairs {
        map.insert(Value::from(*key), Value::from(*value));
    }
    Value::Map(map)
}

/// Two nodes pointing at each other: a -> b -> a.
fn two_node_ring(heap: &mut Heap, first: i64) -> Value {
    let node = Type::record("list::Node");
    let a = heap.reserve();
    let b = heap.reserve();
    heap.replace(
        a,
        record!("list::Node" => { Value: first, Next: Value::reference(node.clone(), b) }),
    )
    .unwrap();
    heap.replace(
        b,
        record!("list::Node" => { Value: 2i64, Next: Value::reference(node.clone(), a) }),
    )
    .unwrap();
    Value::reference(node, a)
}

#[test]
fn test_display_record_lines() {
    let person = record!("people::Person" => { Name: "Ann", Age: 3 });
    let out = dump("p", &person);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines, vec!["Display p (people::Person)", "p.Name = \"Ann\"", "p.Age = 3"]);
}

#[test]
fn test_display_nested_order() {
    let value = to_value(&sample_order()).unwrap();
    let out = dump("o", &value);
    println!("{}", out);

    let lines: Vec<_> = out.lines().skip(1).collect();
    assert_eq!(lines[0], "o.order_id = 12345");
    assert_eq!(lines[1], "o.customer.id = 123");
    assert_eq!(lines[2], "o.customer.name = \"Alice\"");
    assert_eq!(lines[3], "o.customer.active = true");
    assert_eq!(lines[4], "o.customer.tags[0] = \"vip\"");
    assert_eq!(lines[5], "o.items[0].sku = \"WIDGET-001\"");
    assert_eq!(lines[6], "o.items[0].price = 29.99");
    assert_eq!(lines.last(), Some(&"o.total = 109.97"));
}

#[test]
fn test_display_through_heap() {
    let mut heap = Heap::new();
    let slot = heap.alloc(record!("people::Person" => { Name: "Ann", Age: 3 }));
    let root = Value::reference(Type::record("people::Person"), slot);

    let mut out = Vec::new();
    display_to_writer(&mut out, "p", heap.handle(&root)).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Display p (&people::Person)\n\
         p.type = people::Person{Name: \"Ann\", Age: 3}\n\
         p.value.Name = \"Ann\"\n\
         p.value.Age = 3\n"
    );
}

#[test]
fn test_display_cyclic_graph_terminates() {
    let mut heap = Heap::new();
    let ring = two_node_ring(&mut heap, 1);

    // Default Depth(20): references at odd depths print a type line, records
    // below them print their `Value` field, up to depth 19.
    let mut out = Vec::new();
    display_to_writer(&mut out, "r", heap.handle(&ring)).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<_> = text.lines().skip(1).collect();
    assert_eq!(lines.len(), 19);
    assert_eq!(lines[1], "r.value.Value = 1");
    assert_eq!(lines[3], "r.value.Next.value.Value = 2");
    let deepest = format!("r{}.type = ", ".value.Next".repeat(9));
    assert!(lines[18].starts_with(&deepest));
    assert!(lines[18].ends_with("{Value: 2, Next: &list::Node 0x100000000}"));

    let mut out = Vec::new();
    let options = DisplayOptions::new().with_budget(Budget::Calls(100));
    display_with_options(&mut out, "r", heap.handle(&ring), &options).unwrap();
    // header plus: each Ref visit prints one line, each Value field one line.
    let lines = String::from_utf8(out).unwrap().lines().count();
    assert!(lines > 1 && lines <= 101);
}

#[test]
fn test_encode_scenarios() {
    let items = to_value(&vec![1i32, 2, 3]).unwrap();
    assert_eq!(encode(&items).unwrap(), b"(1 2 3)");
    assert_eq!(encode(&Value::from(true)).unwrap(), b"t");
    assert_eq!(encode(&Value::from(false)).unwrap(), b"nil");
    assert_eq!(encode(&Value::from("hi")).unwrap(), b"\"hi\"");
}

#[test]
fn test_encode_structurally_equal_values_match() {
    let a = to_value(&sample_order()).unwrap();
    let b = to_value(&sample_order()).unwrap();
    assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
}

#[test]
fn test_encode_nested() {
    let value = to_value(&sample_order().customer).unwrap();
    assert_eq!(
        encode_to_string(&value).unwrap(),
        r#"((id123) (name"Alice") (activet) (tags("vip")))"#
    );
}

#[test]
fn test_encode_rejects_function_fields() {
    let job = record!("jobs::Job" => {
        Name: "nightly",
        Run: Value::func("fn() -> Result<(), Error>"),
    });
    match encode(&job) {
        Err(Error::UnsupportedType(ty)) => assert_eq!(ty, "fn() -> Result<(), Error>"),
        other => panic!("expected an unsupported type error, got {:?}", other),
    }

    let worker = record!("jobs::Worker" => { Inbox: Value::chan(Type::String) });
    assert!(matches!(encode(&worker), Err(Error::UnsupportedType(_))));
}

#[test]
fn test_encode_rejects_cycles() {
    let mut heap = Heap::new();
    let ring = two_node_ring(&mut heap, 1);
    let err = encode(heap.handle(&ring)).unwrap_err();
    assert!(matches!(err, Error::Cycle(_)));
    assert!(err.to_string().contains("list::Node"));
}

#[test]
fn test_equal_maps() {
    let ab = string_map(&[("a", 1), ("b", 2)]);
    let ab_again = string_map(&[("a", 1), ("b", 2)]);
    let a = string_map(&[("a", 1)]);
    assert!(equal(&ab, &ab_again));
    assert!(!equal(&a, &ab));
    assert!(!equal(&ab, &a));
}

#[test]
fn test_equal_serde_maps() {
    let mut left = BTreeMap::new();
    left.insert("x".to_string(), vec![1u8, 2]);
    let mut right = left.clone();
    assert!(equal(&to_value(&left).unwrap(), &to_value(&right).unwrap()));

    right.insert("y".to_string(), Vec::new());
    assert!(!equal(&to_value(&left).unwrap(), &to_value(&right).unwrap()));
}

#[test]
fn test_json_documents() {
    let doc = json!({ "name": "Ann", "city": "Oslo" });
    let value = to_value(&doc).unwrap();
    assert_eq!(
        encode_to_string(&value).unwrap(),
        r#"(("city" "Oslo") ("name" "Ann"))"#
    );
    assert_eq!(dump("d", &value).lines().nth(1), Some("d[\"city\"] = \"Oslo\""));

    let scores = to_value(&json!({ "a": [1, 2] })).unwrap();
    let mut typed = BTreeMap::new();
    typed.insert("a".to_string(), vec![1u64, 2]);
    assert!(equal(&scores, &to_value(&typed).unwrap()));
    assert!(!equal(&scores, &to_value(&json!({ "a": [1, 3] })).unwrap()));
}

#[test]
fn test_display_f32_fields() {
    #[derive(Serialize)]
    struct Sample {
        x: f32,
    }

    let value = to_value(&Sample { x: 0.1 }).unwrap();
    let out = dump("s", &value);
    assert_eq!(out.lines().nth(1), Some("s.x = 0.1"));
}

#[test]
fn test_equal_independent_cycles() {
    let mut left = Heap::new();
    let mut right = Heap::new();
    let x = two_node_ring(&mut left, 1);
    let y = two_node_ring(&mut right, 1);
    assert!(equal(left.handle(&x), right.handle(&y)));

    let mut other = Heap::new();
    let z = two_node_ring(&mut other, 7);
    assert!(!equal(left.handle(&x), other.handle(&z)));
}

#[test]
fn test_equal_differing_types() {
    assert!(!equal(&Value::from(1i32), &Value::from("1")));
    assert!(!equal(
        &record!("a::Point" => { X: 1 }),
        &record!("b::Point" => { X: 1 })
    ));
}

#[test]
fn test_has_cycle() {
    let mut heap = Heap::new();
    let ring = two_node_ring(&mut heap, 1);
    assert!(has_cycle(heap.handle(&ring)));

    let tree = to_value(&sample_order()).unwrap();
    assert!(!has_cycle(&tree));
}

#[test]
fn test_shared_slot_is_a_dag() {
    let leaf_ty = Type::record("t::Leaf");
    let mut heap = Heap::new();
    let leaf = heap.alloc(record!("t::Leaf" => { N: 1 }));
    let root = record!("t::Pair" => {
        Left: Value::reference(leaf_ty.clone(), leaf),
        Right: Value::reference(leaf_ty, leaf),
    });

    assert!(!has_cycle(heap.handle(&root)));
    assert_eq!(
        encode_to_string(heap.handle(&root)).unwrap(),
        "((Left((N1))) (Right((N1))))"
    );
}

#[test]
fn test_enum_interfaces() {
    #[derive(Serialize)]
    enum Shape {
        Circle { r: i32 },
    }

    let value = to_value(&Shape::Circle { r: 2 }).unwrap();
    assert_eq!(value.ty(), Some(Type::Interface(Some(TypeName::new("Shape")))));
    assert_eq!(encode_to_string(&value).unwrap(), "(Shape::Circle ((r2)))");

    let out = dump("s", &value);
    assert!(out.contains("s.type = Shape::Circle\n"));
    assert!(out.contains("s.value.r = 2\n"));
}
