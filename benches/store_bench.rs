//! Benchmarks for linedb codec and store operations

use std::fs;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use linedb::codec::{decode, encode};
use linedb::config::{Config, SyncStrategy};
use linedb::LineDb;
use tempfile::TempDir;

const RECORD_COUNT: usize = 10_000;

fn sample_contents() -> String {
    let records: Vec<String> = (0..RECORD_COUNT)
        .map(|i| format!("record number {} with some payload", i))
        .collect();
    encode(records.iter().map(String::as_str), '\n')
}

fn codec_benchmarks(c: &mut Criterion) {
    let contents = sample_contents();
    let records = decode(contents.as_bytes(), '\n').unwrap();

    c.bench_function("decode_10k", |b| {
        b.iter(|| decode(black_box(contents.as_bytes()), '\n').unwrap())
    });

    c.bench_function("encode_10k", |b| {
        b.iter(|| encode(black_box(&records).iter().map(String::as_str), '\n'))
    });
}

fn store_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench.txt");
    let contents = sample_contents();
    let config = Config::builder()
        .sync_strategy(SyncStrategy::Never)
        .build();

    c.bench_function("select_10k", |b| {
        fs::write(&path, &contents).unwrap();
        let db = LineDb::open_with(&path, config.clone()).unwrap();
        b.iter(|| db.select(|rec| rec.text.ends_with("7 with some payload")))
    });

    c.bench_function("update_10k_no_sync", |b| {
        b.iter_batched(
            || {
                fs::write(&path, &contents).unwrap();
                LineDb::open_with(&path, config.clone()).unwrap()
            },
            |mut db| db.update(RECORD_COUNT as i64 / 2, "changed").unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, codec_benchmarks, store_benchmarks);
criterion_main!(benches);
