//! Inspecting values built at runtime.
//!
//! Run with: cargo run --example dynamic_values

use introspect::{
    display, encode_to_string, equal, has_cycle, record, to_value, Heap, Type, Value, ValueMap,
};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a config record by hand
    let mut limits = ValueMap::new(Type::String, Type::Uint(introspect::UintKind::U32));
    limits.insert(Value::from("requests"), Value::from(100u32));
    limits.insert(Value::from("burst"), Value::from(20u32));

    let config = record!("app::Config" => {
        Host: "localhost",
        Port: 8080u16,
        Features: Value::slice(Type::String, vec![Value::from("auth"), Value::from("metrics")]),
        Limits: limits,
    });

    display("config", &config)?;
    println!("encoded: {}\n", encode_to_string(&config)?);

    // Convert an existing struct
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };
    let user_value = to_value(&user)?;
    display("user", &user_value)?;
    println!("kind: {}\n", user_value.kind());

    // A list whose tail points back at its head
    let node = Type::record("list::Node");
    let mut heap = Heap::new();
    let head = heap.reserve();
    let tail = heap.alloc(record!("list::Node" => {
        Value: 2,
        Next: Value::reference(node.clone(), head),
    }));
    heap.replace(head, record!("list::Node" => {
        Value: 1,
        Next: Value::reference(node.clone(), tail),
    }))?;
    let list = Value::reference(node, head);

    println!("has cycle: {}", has_cycle(heap.handle(&list)));
    println!("equal to itself: {}", equal(heap.handle(&list), heap.handle(&list)));
    match encode_to_string(heap.handle(&list)) {
        Ok(text) => println!("encoded: {}", text),
        Err(err) => println!("encode failed: {}", err),
    }

    Ok(())
}
