use std::{
    collections::{BTreeSet, HashSet},
    hint::black_box,
};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use intset::{IntSet, testutil::SetGen};
use roaring::RoaringBitmap;

fn benchmark_add_probe(c: &mut Criterion) {
    // (elements added, spread of values)
    let cases = [(2usize, 10usize), (10, 10), (10, 1000), (100, 1000), (4096, 100_000)];

    let mut group = c.benchmark_group("add_probe");
    let mut set_gen = SetGen::new(0xDEAD_BEEF);

    for (size, spread) in cases {
        let add = set_gen.probes(size, spread);
        let probe = set_gen.probes(size * 2, spread);
        let id = format!("{size}/{spread}");

        group.bench_function(BenchmarkId::new("intset", &id), |b| {
            let mut set = IntSet::<i64>::new();
            b.iter(|| {
                set.clear();
                for &x in &add {
                    set.add(x);
                }
                probe.iter().filter(|&&x| set.has(black_box(x))).count()
            })
        });

        group.bench_function(BenchmarkId::new("hashset", &id), |b| {
            let mut set = HashSet::<i64>::new();
            b.iter(|| {
                set.clear();
                for &x in &add {
                    set.insert(x);
                }
                probe.iter().filter(|&x| set.contains(black_box(x))).count()
            })
        });

        group.bench_function(BenchmarkId::new("btreeset", &id), |b| {
            let mut set = BTreeSet::<i64>::new();
            b.iter(|| {
                set.clear();
                for &x in &add {
                    set.insert(x);
                }
                probe.iter().filter(|&x| set.contains(black_box(x))).count()
            })
        });

        group.bench_function(BenchmarkId::new("roaring", &id), |b| {
            let mut set = RoaringBitmap::new();
            b.iter(|| {
                set.clear();
                for &x in &add {
                    set.insert(x as u32);
                }
                probe
                    .iter()
                    .filter(|&&x| set.contains(black_box(x as u32)))
                    .count()
            })
        });
    }

    group.finish();
}

fn benchmark_has(c: &mut Criterion) {
    const SPREAD: usize = 100_000;
    let cardinalities = [16usize, 256, 4096, 65536];

    let mut group = c.benchmark_group("has");
    let mut set_gen = SetGen::new(0xDEAD_BEEF);

    for &cardinality in &cardinalities {
        let set = set_gen.random_max(cardinality, SPREAD);
        // we want to lookup the cardinality/3th element
        let lookup = set[set.len() / 3];

        group.bench_function(BenchmarkId::new("intset", cardinality), |b| {
            let intset = IntSet::from_iter(set.iter().copied());
            assert!(intset.has(black_box(lookup)), "lookup {lookup}");
            b.iter(|| intset.has(black_box(lookup)))
        });

        group.bench_function(BenchmarkId::new("hashset", cardinality), |b| {
            let hashset: HashSet<i64> = set.iter().copied().collect();
            b.iter(|| hashset.contains(black_box(&lookup)))
        });

        group.bench_function(BenchmarkId::new("roaring", cardinality), |b| {
            let bitmap = RoaringBitmap::from_sorted_iter(set.iter().map(|&x| x as u32)).unwrap();
            b.iter(|| bitmap.contains(black_box(lookup as u32)))
        });
    }

    group.finish();
}

fn benchmark_len(c: &mut Criterion) {
    let mut group = c.benchmark_group("len");
    let mut set_gen = SetGen::new(0xDEAD_BEEF);

    for spread in [1024usize, 100_000] {
        let values = set_gen.probes(spread, spread);
        let intset = IntSet::from_iter(values.iter().copied());
        let hashset: HashSet<i64> = values.iter().copied().collect();

        group.bench_function(BenchmarkId::new("intset", spread), |b| {
            b.iter(|| black_box(&intset).len())
        });
        group.bench_function(BenchmarkId::new("hashset", spread), |b| {
            b.iter(|| black_box(&hashset).len())
        });
    }

    group.finish();
}

fn benchmark_add(c: &mut Criterion) {
    const MAGIC: i64 = 513;

    let mut group = c.benchmark_group("add");

    group.bench_function("intset/warm", |b| {
        let mut set = IntSet::<i64>::EMPTY;
        b.iter(|| set.add(black_box(MAGIC)))
    });

    group.bench_function("intset/cold", |b| {
        b.iter(|| IntSet::<i64>::default().add(black_box(MAGIC)))
    });

    group.bench_function("hashset/cold", |b| {
        b.iter(|| HashSet::<i64>::default().insert(black_box(MAGIC)))
    });

    group.bench_function("roaring/cold", |b| {
        b.iter(|| RoaringBitmap::default().insert(black_box(MAGIC as u32)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_add_probe, benchmark_has, benchmark_len, benchmark_add);
criterion_main!(benches);
