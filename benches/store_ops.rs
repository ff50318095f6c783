//! This bench test measures search and aggregate analysis over a populated
//! store, including the per-operation reload of the backing file.

#![allow(missing_docs)]

use std::path::Path;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rollbook::{Grade, Record, Store};
use tempfile::TempDir;

/// Seeds a backing file with a large record set.
fn preseed_store(path: &Path, count: u32) {
    let records: Vec<Record> = (1..=count)
        .map(|i| Record {
            id: i.to_string(),
            name: "Test Student".to_string(),
            age: 18 + i % 10,
            grade: Grade::B,
            marks: (i * 7) % 101,
        })
        .collect();
    Store::new(path.to_path_buf()).write_all(&records).unwrap();
}

fn search_records(c: &mut Criterion) {
    c.bench_function("search 1000 records", |b| {
        b.iter_batched(
            || {
                let tmp = TempDir::new().unwrap();
                preseed_store(&tmp.path().join("students.txt"), 1000);
                tmp
            },
            |tmp| {
                Store::new(tmp.path().join("students.txt"))
                    .search("student")
                    .unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

fn analyze_records(c: &mut Criterion) {
    c.bench_function("analyze 1000 records", |b| {
        b.iter_batched(
            || {
                let tmp = TempDir::new().unwrap();
                preseed_store(&tmp.path().join("students.txt"), 1000);
                tmp
            },
            |tmp| {
                Store::new(tmp.path().join("students.txt"))
                    .analyze()
                    .unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, search_records, analyze_records);
criterion_main!(benches);
