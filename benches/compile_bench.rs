//! Benchmark for compiling graph programs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use graphdsl::{compile, CompileOptions};

fn chain_source(len: usize) -> String {
    (0..len)
        .map(|i| format!("({i})"))
        .collect::<Vec<_>>()
        .join(" -{w: w}> ")
}

fn benchmark_small_program(c: &mut Criterion) {
    let source = "a = (1, {color: c})\na -{length: l}> (2, {color: c}) <{}- (3)\n(4) -{}> a";
    c.bench_function("compile small program", |b| {
        b.iter(|| black_box(compile(black_box(source), &CompileOptions::default()).unwrap()));
    });
}

fn benchmark_long_chain(c: &mut Criterion) {
    let source = chain_source(1_000);
    c.bench_function("compile chain of 1000 nodes", |b| {
        b.iter(|| black_box(compile(black_box(&source), &CompileOptions::default()).unwrap()));
    });
}

fn benchmark_many_statements(c: &mut Criterion) {
    let source: String = (0..1_000)
        .map(|i| format!("n{i} = ({i}, {{label: 'node', weight: {i}.5}})\n"))
        .collect();
    let options = CompileOptions::default().node_default("shape", "circle");
    c.bench_function("compile 1000 assignments", |b| {
        b.iter(|| black_box(compile(black_box(&source), &options).unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_small_program,
    benchmark_long_chain,
    benchmark_many_statements
);
criterion_main!(benches);
