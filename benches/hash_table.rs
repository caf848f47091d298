#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use bucketchain::HashTable;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items: Vec<(String, u64)> = vec(("[a-z0-9]{4,16}", any::<u64>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("bucketchain insert", |b| {
        b.iter(|| {
            let mut table = HashTable::new(1);
            for (key, value) in &items {
                table.insert(key.as_str(), *value);
            }
            table
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in &items {
                map.insert(key.clone(), *value);
            }
            map
        });
    });

    let table: HashTable<u64> = items.iter().map(|(key, value)| (key.as_str(), *value)).collect();
    let map: HashMap<String, u64> = items.iter().cloned().collect();

    group.bench_function("bucketchain retrieve", |b| {
        b.iter(|| items.iter().filter_map(|(key, _)| table.retrieve(key)).count());
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| items.iter().filter_map(|(key, _)| map.get(key)).count());
    });

    group.bench_function("bucketchain remove", |b| {
        b.iter_batched(
            || table.clone(),
            |mut table| items.iter().filter(|(key, _)| table.remove(key).is_ok()).count(),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("rust std remove", |b| {
        b.iter_batched(
            || map.clone(),
            |mut map| items.iter().filter(|(key, _)| map.remove(key).is_some()).count(),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
