use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use introspect::{
    display_with_options, encode, equal, has_cycle, record, to_value, Budget, DisplayOptions,
    Heap, Type, Value,
};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU-{:04}", i),
            name: format!("Product {}", i),
            price: 9.99 + i as f64,
            quantity: i as u32,
        })
        .collect()
}

/// A singly linked list of `len` nodes stored in heap slots.
fn linked_list(len: usize, cyclic: bool) -> (Heap, Value) {
    let node = Type::record("list::Node");
    let mut heap = Heap::new();
    let slots: Vec<_> = (0..len).map(|_| heap.reserve()).collect();
    for (i, slot) in slots.iter().enumerate() {
        let next = match slots.get(i + 1) {
            Some(next) => Value::reference(node.clone(), *next),
            None if cyclic => Value::reference(node.clone(), slots[0]),
            None => Value::nil(node.clone()),
        };
        heap.replace(*slot, record!("list::Node" => { Value: i as i64, Next: next }))
            .unwrap();
    }
    let root = Value::reference(node, slots[0]);
    (heap, root)
}

fn benchmark_to_value(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("to_value_simple_struct", |b| {
        b.iter(|| to_value(black_box(&user)))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_array");

    for size in [10, 50, 100, 500].iter() {
        let value = to_value(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| encode(black_box(value)))
        });
    }

    group.finish();
}

fn benchmark_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("equal");

    for size in [10, 100, 500].iter() {
        let left = to_value(&products(*size)).unwrap();
        let right = to_value(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::new("tree", size), &size, |b, _| {
            b.iter(|| equal(black_box(&left), black_box(&right)))
        });

        let (lheap, lroot) = linked_list(*size, true);
        let (rheap, rroot) = linked_list(*size, true);
        group.bench_with_input(BenchmarkId::new("ring", size), &size, |b, _| {
            b.iter(|| equal(lheap.handle(&lroot), rheap.handle(&rroot)))
        });
    }

    group.finish();
}

fn benchmark_has_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_cycle");

    for size in [10, 100, 500].iter() {
        let (heap, root) = linked_list(*size, false);
        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, _| {
            b.iter(|| has_cycle(heap.handle(black_box(&root))))
        });

        let (heap, root) = linked_list(*size, true);
        group.bench_with_input(BenchmarkId::new("ring", size), &size, |b, _| {
            b.iter(|| has_cycle(heap.handle(black_box(&root))))
        });
    }

    group.finish();
}

fn benchmark_display(c: &mut Criterion) {
    let value = to_value(&products(100)).unwrap();
    let options = DisplayOptions::new().with_budget(Budget::Unbounded);

    c.bench_function("display_array_100", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(16 * 1024);
            display_with_options(&mut out, "p", black_box(&value), &options).unwrap();
            out
        })
    });
}

criterion_group!(
    benches,
    benchmark_to_value,
    benchmark_encode,
    benchmark_equal,
    benchmark_has_cycle,
    benchmark_display
);
criterion_main!(benches);
