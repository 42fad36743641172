use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lineage_record::prelude::*;
use std::hint::black_box;

fn record_with(fields: usize, template: &Template) -> Record {
    let mut record = Record::derived_from(template);
    for i in 0..fields {
        record.insert(format!("field_{i}"), i).unwrap();
    }
    record
}

fn bench_own_vs_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    let base = Template::from_entries("base", (0..64).map(|i| (format!("base_{i}"), i)));
    let shared = Template::from_entries("shared", (0..64).map(|i| (format!("shared_{i}"), i)));
    shared.set_parent(Some(&base)).unwrap();

    let index_first = Enumerator::builder().order(KeyOrder::IndexFirst).build().unwrap();
    let sizes = [("8", 8usize), ("128", 128), ("2048", 2048)];

    for (label, size) in sizes {
        let record = record_with(size, &shared);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("own_insertion", label), &record, |b, r| {
            b.iter(|| own_entries(black_box(r)).count());
        });

        group.bench_with_input(BenchmarkId::new("own_index_first", label), &record, |b, r| {
            b.iter(|| index_first.own_entries(black_box(r)).count());
        });

        group.bench_with_input(BenchmarkId::new("visible", label), &record, |b, r| {
            b.iter(|| visible_entries(black_box(r)).unwrap().len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_own_vs_visible);
criterion_main!(benches);
