//! Error taxonomy for a benchmark run.
//!
//! Every failure here is fatal: comparative charts need a complete,
//! consistent set of measurements, so nothing is retried, skipped or
//! clamped. Bad command-line arguments are handled separately by clap
//! before any of these can occur.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    /// A registry row points at an executable that isn't there.
    #[error("benchmark executable `{}` does not exist", .path.display())]
    MissingExecutable { path: PathBuf },

    /// A target exited non-zero; its timing can't be trusted.
    #[error("`{target}` exited with code {code}")]
    ExternalProcessFailure { target: String, code: i32 },

    /// No usable `<number> ms` timing token in the captured stdout.
    #[error("couldn't parse timing from output: `{output}`")]
    UnparsableOutput { output: String },

    /// The registry pairs benchmarks per library; this library's group is
    /// neither a lone entry nor a decode+fmt / decode-only pair.
    #[error("malformed target group for `{library}`: {detail}")]
    MalformedTargetGroup { library: String, detail: String },

    /// Combined time minus decode-only time came out non-positive, which
    /// signals a measurement anomaly rather than a real formatting cost.
    #[error("invalid derived format-only time for `{library}`: {time_s} s")]
    InvalidDerivedDuration { library: String, time_s: f64 },

    #[error(transparent)]
    Io(#[from] io::Error),
}
