//! Run configuration: what every benchmark target gets fed.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Code-section length of the legacy default input (`input/xul.dll`). The
/// fallback loop count scales against this so total processed bytes stay
/// comparable with historical runs against that file.
pub const REFERENCE_CODE_LEN: u64 = 0x2460400;

/// Loop count historically paired with [`REFERENCE_CODE_LEN`].
pub const REFERENCE_LOOP_COUNT: u64 = 20;

/// Byte offset of the code section in the default input.
pub const DEFAULT_CODE_OFFSET: u64 = 0x400;

/// Input file used when no arguments are given, relative to the bench root.
pub const DEFAULT_INPUT: &str = "input/xul.dll";

/// Process-wide configuration, constructed once before any measurement and
/// read-only for the rest of the run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub code_filename: PathBuf,
    pub code_offset: u64,
    pub code_len: u64,
    pub loop_count: u64,
}

impl RunOptions {
    /// The historical defaults: the bundled `xul.dll` sample.
    pub fn defaults(root: &Path) -> Self {
        Self {
            code_filename: root.join(DEFAULT_INPUT),
            code_offset: DEFAULT_CODE_OFFSET,
            code_len: REFERENCE_CODE_LEN,
            loop_count: REFERENCE_LOOP_COUNT,
        }
    }
}

/// Loop count for `code_len` chosen so the total number of processed bytes
/// roughly matches the reference run, rounded half-to-even. Never less than
/// one loop; a zero `code_len` also collapses to one loop rather than
/// dividing by zero.
pub fn default_loop_count(code_len: u64) -> u64 {
    if code_len == 0 {
        return 1;
    }
    let scaled = (REFERENCE_CODE_LEN * REFERENCE_LOOP_COUNT) as f64 / code_len as f64;
    (scaled.round_ties_even() as u64).max(1)
}

/// Parse a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_int(s: &str) -> Result<u64, ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    }
}
