use criterion::{criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;
use rand::thread_rng;
use rangefreq::IndexedRangeAccumulator;
use std::hint::black_box;

fn criterion_benchmark(c: &mut Criterion) {
    let n: i64 = 100000;
    let (min, max) = (-n / 2, n / 2 - 1);
    let mut input: Vec<i64> = (min..=max).collect();
    input.shuffle(&mut thread_rng());

    c.bench_function("accumulator from_values 100k", |b| {
        b.iter(|| {
            let accumulator =
                IndexedRangeAccumulator::from_values(input.iter().copied(), min, max).unwrap();

            assert_eq!(accumulator.total(), n);
        })
    });
    c.bench_function("naive counts from values 100k", |b| {
        b.iter(|| {
            let mut counts = vec![0i64; n as usize];
            input.iter().for_each(|item| {
                counts[(item - min) as usize] += 1;
            });

            black_box(counts);
        })
    });

    let accumulator = IndexedRangeAccumulator::from_values(input.iter().copied(), min, max).unwrap();
    let mut counts = vec![0i64; n as usize];
    input.iter().for_each(|item| counts[(item - min) as usize] += 1);

    c.bench_function("accumulator query 100k", |b| {
        b.iter(|| {
            input.iter().for_each(|item| {
                black_box(accumulator.query(black_box(*item)));
            })
        })
    });
    c.bench_function("naive prefix query 1k", |b| {
        b.iter(|| {
            input.iter().take(1000).for_each(|item| {
                let end = (item - min) as usize;
                black_box(counts[..=end].iter().sum::<i64>());
            })
        })
    });
    c.bench_function("accumulator query_range 100k", |b| {
        b.iter(|| {
            input.windows(2).for_each(|pair| {
                let (a, z) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
                black_box(accumulator.query_range(black_box(a), black_box(z)));
            })
        })
    });
    c.bench_function("accumulator lower_bound 100k", |b| {
        b.iter(|| {
            (1..=n).for_each(|target| {
                black_box(accumulator.lower_bound(black_box(target)));
            })
        })
    });

    let mut adjusted = accumulator.clone();
    c.bench_function("accumulator adjust 100k", |b| {
        b.iter(|| {
            input.iter().for_each(|item| {
                adjusted.adjust(black_box(*item), black_box(1));
            })
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
