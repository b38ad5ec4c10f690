#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::{collections::HashMap, hint::black_box};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use proptest::{
    prelude::any,
    strategy::{Strategy, ValueTree},
    test_runner::TestRunner,
};
use sepchain::ChainedHashTable;

const ITEMS_AMOUNT: usize = 100_000;
const SAMPLE_SIZE: usize = 10;
/// Small enough that the table grows several times while filling
const START_CAPACITY: usize = 5;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = proptest::collection::vec(any::<(i32, i32)>(), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("sepchain put (growing)", |b| {
        b.iter_batched(
            || ChainedHashTable::with_capacity(START_CAPACITY).unwrap(),
            |mut table| {
                for &(key, value) in &items {
                    table.put(key, value).unwrap();
                }
                black_box(table)
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("sepchain put (presized)", |b| {
        b.iter_batched(
            || ChainedHashTable::with_capacity(ITEMS_AMOUNT).unwrap(),
            |mut table| {
                for &(key, value) in &items {
                    table.put(key, value).unwrap();
                }
                black_box(table)
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("rust std insert", |b| {
        b.iter_batched(
            HashMap::new,
            |mut map| {
                for &(key, value) in &items {
                    map.insert(key, value);
                }
                black_box(map)
            },
            BatchSize::LargeInput,
        );
    });

    let mut table = ChainedHashTable::with_capacity(START_CAPACITY).unwrap();
    let mut rust_map = HashMap::new();
    for &(key, value) in &items {
        table.put(key, value).unwrap();
        rust_map.insert(key, value);
    }

    group.bench_function("sepchain get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(table.get(*key));
            }
        });
    });
    group.bench_function("sepchain get_into", |b| {
        let mut out = [0; 1];
        b.iter(|| {
            for (key, _) in &items {
                black_box(table.get_into(*key, &mut out).unwrap());
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(rust_map.get(key));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
