use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use boxworld::generator::Generator;
use boxworld::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_solve_two_boxes(c: &mut Criterion) {
    bench_level(c, "levels/custom/03-two-boxes.txt");
}

#[allow(unused)]
fn bench_solve_one_box(c: &mut Criterion) {
    bench_level(c, "levels/custom/01-one-box.txt");
}

#[allow(unused)]
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for &index in &[1, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(index), &index, |b, &index| {
            b.iter(|| Generator::from_seed(0).generate(criterion::black_box(index)))
        });
    }
    group.finish();
}

fn bench_level(c: &mut Criterion, level_path: &str) {
    let level = level_path.load_level().unwrap();

    let mut group = c.benchmark_group(level_path);
    group.sample_size(50);
    group.bench_function("solve", |b| {
        b.iter(|| criterion::black_box(level.solve(Duration::from_secs(5))))
    });
    group.bench_function("verify", |b| {
        b.iter(|| criterion::black_box(level.verify(criterion::black_box(50_000))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_solve_two_boxes,
    bench_solve_one_box,
    bench_generate,
);
criterion_main!(benches);
