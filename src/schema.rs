//! Measurement records, throughput normalization and the JSON run report.

use serde::Serialize;

use crate::options::RunOptions;
use crate::registry::{BenchKind, LibraryIdentity};

const BYTES_PER_MB: f64 = 1_048_576.0;

/// `payload_bytes` looped `loop_count` times over `elapsed_s` seconds, as
/// MB/s. No rounding here; display rounding happens in the report layer.
pub fn throughput_mb_per_s(payload_bytes: u64, loop_count: u64, elapsed_s: f64) -> f64 {
    payload_bytes as f64 / BYTES_PER_MB * loop_count as f64 / elapsed_s
}

/// One timed result, measured or derived. Written once when the target
/// finishes and never updated afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct Measurement {
    pub kind: BenchKind,
    pub lib: LibraryIdentity,
    /// Registry index of the originating target; derived measurements carry
    /// the lower of their two sources' indices.
    pub registry_index: usize,
    /// Elapsed wall-clock time the target reported, in seconds.
    pub time_s: f64,
    pub mb_per_s: f64,
}

impl Measurement {
    pub fn new(
        kind: BenchKind,
        lib: LibraryIdentity,
        registry_index: usize,
        time_s: f64,
        opts: &RunOptions,
    ) -> Self {
        Self {
            kind,
            lib,
            registry_index,
            time_s,
            mb_per_s: throughput_mb_per_s(opts.code_len, opts.loop_count, time_s),
        }
    }

    /// Chart label on the all-targets view: `Zydis (min) decode`.
    pub fn bench_name(&self) -> String {
        format!("{} {}", self.lib.label(), self.kind.as_str())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub input: String,
    pub code_offset: u64,
    pub code_len: u64,
    pub loop_count: u64,
}

impl RunMeta {
    pub fn for_run(opts: &RunOptions) -> Self {
        Self {
            schema_version: 1,
            bench_version: env!("CARGO_PKG_VERSION").to_string(),
            input: opts.code_filename.display().to_string(),
            code_offset: opts.code_offset,
            code_len: opts.code_len,
            loop_count: opts.loop_count,
        }
    }
}

/// Everything one run produced, for the optional JSON artifact.
#[derive(Clone, Debug, Serialize)]
pub struct BenchReport {
    pub run: RunMeta,
    pub measurements: Vec<Measurement>,
}
