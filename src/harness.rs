//! Invokes one benchmark executable and extracts its self-reported timing.
//!
//! Protocol: `<exe> <loop_count> <offset> <length> <input>` with the numeric
//! arguments as `0x`-prefixed uppercase hex. The target prints free-form
//! text containing `<elapsed> ms` on stdout and exits 0. Each target runs
//! with its own directory as working directory so it can resolve relative
//! resources of its own; the directory is passed per invocation instead of
//! mutating the orchestrator's cwd.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BenchError;
use crate::options::RunOptions;
use crate::registry::TargetSpec;
use crate::schema::Measurement;

static MS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S+) ms").expect("timing pattern compiles"));

/// Read the input once and discard it, so the first target doesn't pay a
/// cold-cache penalty the later ones skip.
pub fn warm_file_cache(path: &Path) -> io::Result<()> {
    fs::read(path).map(|_| ())
}

/// Extract the first `<number> ms` token and convert it to seconds.
pub fn parse_elapsed_s(output: &str) -> Result<f64, BenchError> {
    let unparsable = || BenchError::UnparsableOutput {
        output: output.to_string(),
    };
    let caps = MS_PATTERN.captures(output).ok_or_else(unparsable)?;
    let ms: f64 = caps[1].parse().map_err(|_| unparsable())?;
    Ok(ms / 1000.0)
}

/// A completed invocation: the measurement plus what the target printed and
/// how long the whole subprocess took from the outside.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub measurement: Measurement,
    pub stdout: String,
    pub observed_s: f64,
}

/// Run one target to completion, blocking until it exits. There is no
/// timeout and no retry: targets are trusted local binaries, and their own
/// loop count is what makes a run repeatable.
pub fn run_target(spec: &TargetSpec, opts: &RunOptions) -> Result<Invocation, BenchError> {
    let workdir = spec.path.parent().unwrap_or_else(|| Path::new("."));

    let started = Instant::now();
    let child = Command::new(&spec.path)
        .arg(format!("{:#X}", opts.loop_count))
        .arg(format!("{:#X}", opts.code_offset))
        .arg(format!("{:#X}", opts.code_len))
        .arg(&opts.code_filename)
        .current_dir(workdir)
        .stdout(Stdio::piped())
        .spawn()?;
    let output = child.wait_with_output()?;
    let observed_s = started.elapsed().as_secs_f64();

    if !output.status.success() {
        return Err(BenchError::ExternalProcessFailure {
            target: spec.lib.display_name(),
            code: output.status.code().unwrap_or(-1),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let time_s = parse_elapsed_s(&stdout)?;
    let measurement = Measurement::new(spec.kind, spec.lib.clone(), spec.index, time_s, opts);

    Ok(Invocation {
        measurement,
        stdout,
        observed_s,
    })
}
