use criterion::{black_box, criterion_group, criterion_main, Criterion};

use record_ops::execution::{ExecutionEngine, ExecutionOptions};
use record_ops::processing::{
    apply_operations, create_filter, create_mapper, create_sorter, Operation, SortOrder,
};
use record_ops::types::{Record, Value};

fn dhabas(n: usize) -> Vec<Value> {
    (0..n as i64)
        .map(|i| {
            Value::from(
                Record::new()
                    .with("id", i)
                    .with("name", format!("dhaba-{i}"))
                    .with("rating", ((i * 37) % 50) as f64 / 10.0),
            )
        })
        .collect()
}

fn bench_sequential(c: &mut Criterion) {
    let data = dhabas(50_000);
    c.bench_function("apply_operations filter+sort+map 50k", |b| {
        b.iter(|| {
            let out = apply_operations(
                Value::List(data.clone()),
                vec![
                    Operation::filter(create_filter("rating", ">=", Value::from(3.5))),
                    Operation::sort(create_sorter("rating", SortOrder::Desc)),
                    Operation::map(create_mapper(&["name", "rating"])),
                ],
            );
            black_box(out)
        })
    });
}

fn bench_parallel(c: &mut Criterion) {
    let data = dhabas(50_000);
    let engine = ExecutionEngine::new(ExecutionOptions::default()).expect("thread pool");
    let pred = create_filter("rating", ">=", Value::from(3.5));
    let cmp = create_sorter("rating", SortOrder::Desc);
    c.bench_function("engine filter+sort 50k", |b| {
        b.iter(|| {
            let kept = engine.filter_parallel(&data, &pred);
            black_box(engine.sort_parallel(&kept, &cmp))
        })
    });
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
