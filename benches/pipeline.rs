//! Micro-benchmarks of the derived-metric pipeline on synthetic timings.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::PathBuf;

use disasm_bench::derive::derive_format_only;
use disasm_bench::options::RunOptions;
use disasm_bench::registry::{self, BenchKind, LibraryIdentity};
use disasm_bench::report;
use disasm_bench::schema::{throughput_mb_per_s, Measurement};

fn sample_opts() -> RunOptions {
    RunOptions {
        code_filename: PathBuf::from("input/xul.dll"),
        code_offset: 0x400,
        code_len: 0x2460400,
        loop_count: 20,
    }
}

/// One synthetic measurement per registry row, combined slower than decode.
fn sample_measurements() -> Vec<Measurement> {
    let opts = sample_opts();
    registry::TARGETS
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let time_s = match d.kind {
                BenchKind::DecodeFmt => 2.0 + i as f64 * 0.05,
                _ => 0.5 + i as f64 * 0.05,
            };
            Measurement::new(
                d.kind,
                LibraryIdentity::new(d.name, d.language, d.flags),
                i,
                time_s,
                &opts,
            )
        })
        .collect()
}

fn bench_throughput(c: &mut Criterion) {
    c.bench_function("throughput_mb_per_s", |b| {
        b.iter(|| throughput_mb_per_s(black_box(0x2460400), black_box(20), black_box(1.75)))
    });
}

fn bench_derive(c: &mut Criterion) {
    let opts = sample_opts();
    let measurements = sample_measurements();
    c.bench_function("derive_format_only", |b| {
        b.iter(|| derive_format_only(black_box(&measurements), &opts))
    });
}

fn bench_rank(c: &mut Criterion) {
    let measurements = sample_measurements();
    c.bench_function("rank", |b| b.iter(|| report::rank(black_box(&measurements))));
}

criterion_group!(benches, bench_throughput, bench_derive, bench_rank);
criterion_main!(benches);
