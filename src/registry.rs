//! Static registry of benchmark targets.
//!
//! The registry is a data-driven table: one [`TargetDecl`] row per benchmark
//! executable, in a fixed order that doubles as the tie-breaking sort key for
//! derived results. Rows are resolved into [`TargetSpec`]s against a root
//! directory at startup, which is the only point where the filesystem is
//! consulted.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::BenchError;

/// Implementation language of a disassembler library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LangKind {
    C,
    Rust,
}

impl LangKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LangKind::C => "C",
            LangKind::Rust => "Rust",
        }
    }
}

/// What a benchmark executable times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchKind {
    /// Decode and format as one timed unit.
    DecodeFmt,
    /// Decode without formatting.
    Decode,
    /// Formatting cost alone; never measured directly, always derived.
    Fmt,
}

impl BenchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchKind::DecodeFmt => "decode+fmt",
            BenchKind::Decode => "decode",
            BenchKind::Fmt => "fmt",
        }
    }
}

/// A disassembler library, identified by name, language and variant flags.
///
/// Identities compare structurally; flags are sorted on construction so the
/// declaration order of flags doesn't matter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct LibraryIdentity {
    name: String,
    language: LangKind,
    flags: Vec<String>,
}

impl LibraryIdentity {
    pub fn new(name: &str, language: LangKind, flags: &[&str]) -> Self {
        let mut flags: Vec<String> = flags.iter().map(|f| f.to_string()).collect();
        flags.sort_unstable();
        Self {
            name: name.to_string(),
            language,
            flags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> LangKind {
        self.language
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Name plus flags: `Zydis (min)`.
    pub fn label(&self) -> String {
        if self.flags.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.flags.join(", "))
        }
    }

    /// Name plus flags plus language: `Zydis (min) (C)`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label(), self.language.as_str())
    }
}

/// One row of the static registry table.
#[derive(Clone, Copy, Debug)]
pub struct TargetDecl {
    pub kind: BenchKind,
    /// Executable path relative to the bench root; gains `.exe` on Windows.
    pub rel_path: &'static str,
    pub name: &'static str,
    pub language: LangKind,
    pub flags: &'static [&'static str],
}

const fn decl(
    kind: BenchKind,
    rel_path: &'static str,
    name: &'static str,
    language: LangKind,
) -> TargetDecl {
    TargetDecl {
        kind,
        rel_path,
        name,
        language,
        flags: &[],
    }
}

/// Every benchmark executable the harness knows about, in run order.
#[rustfmt::skip]
pub const TARGETS: &[TargetDecl] = &[
    // Decode + format
    decl(BenchKind::DecodeFmt, "bench/cs/bench-cs-fmt", "Capstone", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/zydis/bench-zydis-full-fmt", "Zydis", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/xed/bench-xed-fmt", "XED", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/distorm/bench-distorm-fmt", "diStorm", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/iced-x86/bench-iced-fmt", "iced", LangKind::Rust),
    decl(BenchKind::DecodeFmt, "bench/bddisasm/bench-bddisasm-fmt", "bddisasm", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/yaxpeax/bench-yaxpeax-fmt", "yaxpeax", LangKind::Rust),
    decl(BenchKind::DecodeFmt, "bench/udis86/bench-udis86-fmt", "udis86", LangKind::C),
    decl(BenchKind::DecodeFmt, "bench/beaengine/bench-beaengine-fmt", "BeaEngine", LangKind::C),

    // Decode only
    TargetDecl { kind: BenchKind::Decode, rel_path: "bench/zydis/bench-zydis-min-no-fmt", name: "Zydis", language: LangKind::C, flags: &["min"] },
    decl(BenchKind::Decode, "bench/zydis/bench-zydis-full-no-fmt", "Zydis", LangKind::C),
    decl(BenchKind::Decode, "bench/xed/bench-xed-no-fmt", "XED", LangKind::C),
    decl(BenchKind::Decode, "bench/distorm/bench-distorm-no-fmt", "diStorm", LangKind::C),
    decl(BenchKind::Decode, "bench/iced-x86/bench-iced-no-fmt", "iced", LangKind::Rust),
    decl(BenchKind::Decode, "bench/bddisasm/bench-bddisasm-no-fmt", "bddisasm", LangKind::C),
    decl(BenchKind::Decode, "bench/yaxpeax/bench-yaxpeax-no-fmt", "yaxpeax", LangKind::Rust),
    decl(BenchKind::Decode, "bench/udis86/bench-udis86-no-fmt", "udis86", LangKind::C),
];

/// A registry row resolved against a benchmark root directory.
#[derive(Clone, Debug)]
pub struct TargetSpec {
    /// Position in [`TARGETS`]; stable tie-breaking key for derived results.
    pub index: usize,
    pub kind: BenchKind,
    pub lib: LibraryIdentity,
    /// Absolute path to the executable.
    pub path: PathBuf,
}

fn executable_path(root: &Path, rel_path: &str) -> PathBuf {
    let mut path = root.join(rel_path);
    if cfg!(windows) {
        path.set_extension("exe");
    }
    path
}

/// Resolve the static table against `root`, verifying every executable
/// exists before anything is run. A missing executable aborts resolution so
/// no benchmark is invoked for a registry that can't complete.
pub fn resolve_targets(root: &Path) -> Result<Vec<TargetSpec>, BenchError> {
    TARGETS
        .iter()
        .enumerate()
        .map(|(index, d)| {
            let path = executable_path(root, d.rel_path);
            if !path.exists() {
                return Err(BenchError::MissingExecutable { path });
            }
            // Absolute path: targets run with their own directory as cwd,
            // so a relative path would no longer resolve.
            let path = path.canonicalize()?;
            Ok(TargetSpec {
                index,
                kind: d.kind,
                lib: LibraryIdentity::new(d.name, d.language, d.flags),
                path,
            })
        })
        .collect()
}

/// Distinct library identities in first-appearance order.
pub fn distinct_libraries(targets: &[TargetSpec]) -> Vec<LibraryIdentity> {
    let mut seen: Vec<LibraryIdentity> = Vec::new();
    for t in targets {
        if !seen.contains(&t.lib) {
            seen.push(t.lib.clone());
        }
    }
    seen
}
