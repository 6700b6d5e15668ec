use clap::{CommandFactory, Parser};
use disasm_bench::chart::{self, ChartEntry};
use disasm_bench::derive::derive_format_only;
use disasm_bench::error::BenchError;
use disasm_bench::harness;
use disasm_bench::options::{self, RunOptions};
use disasm_bench::registry::{self, BenchKind, LibraryIdentity, TargetSpec};
use disasm_bench::report;
use disasm_bench::schema::{BenchReport, Measurement, RunMeta};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "disasm-bench")]
#[command(about = "Compare disassembler throughput by driving the bundled benchmark executables")]
struct Args {
    /// Byte offset of the code section in the input file (decimal or 0x hex).
    #[arg(value_parser = options::parse_int, requires = "code_len")]
    code_offset: Option<u64>,

    /// Number of code bytes to process (decimal or 0x hex).
    #[arg(value_parser = options::parse_int, requires = "filename")]
    code_len: Option<u64>,

    /// Input file holding the code bytes.
    filename: Option<PathBuf>,

    /// How many times each target loops over the code bytes; when omitted it
    /// is derived so total processed bytes match the reference payload.
    #[arg(value_parser = options::parse_int)]
    loop_count: Option<u64>,

    /// Directory the registry's executable paths and the default input
    /// resolve against.
    #[arg(long, value_name = "DIR", default_value = ".")]
    bench_root: PathBuf,

    /// Also write the full run (measured and derived) as a JSON report.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn build_options(args: &Args) -> RunOptions {
    match (args.code_offset, args.code_len, &args.filename) {
        (Some(code_offset), Some(code_len), Some(filename)) => RunOptions {
            code_filename: filename.clone(),
            code_offset,
            code_len,
            loop_count: args
                .loop_count
                .unwrap_or_else(|| options::default_loop_count(code_len)),
        },
        _ => RunOptions::defaults(&args.bench_root),
    }
}

fn run_benchmarks(
    targets: &[TargetSpec],
    opts: &RunOptions,
) -> Result<Vec<Measurement>, BenchError> {
    // Pull the input through the OS file cache so the first target isn't
    // penalized by a cold read.
    harness::warm_file_cache(&opts.code_filename)?;

    println!("[*] Running all benchmarks");
    let mut measurements = Vec::with_capacity(targets.len());
    for spec in targets {
        println!("[*] Benchmarking {} ...", spec.path.display());
        let inv = harness::run_target(spec, opts)?;
        print!("{}", inv.stdout);
        println!(
            "[+] Completed in {:.2} ({:.2}) seconds",
            inv.measurement.time_s, inv.observed_s
        );
        measurements.push(inv.measurement);
    }
    Ok(measurements)
}

/// Chart plus markdown table for one benchmark kind.
fn render_view(
    what: &str,
    kind: BenchKind,
    chart_file: &str,
    source: &[Measurement],
    libraries: &[LibraryIdentity],
) -> Result<(), BenchError> {
    let view: Vec<&Measurement> = source.iter().filter(|m| m.kind == kind).collect();
    let ranked = report::rank(view);

    let entries: Vec<ChartEntry> = ranked
        .iter()
        .map(|m| ChartEntry {
            label: m.lib.display_name(),
            value: m.mb_per_s,
        })
        .collect();
    chart::write_chart(Path::new(chart_file), &format!("Throughput ({what})"), &entries)?;

    let missing = report::missing_libraries(libraries, &ranked);
    println!();
    print!("{}", report::render_table(what, &ranked, &missing));
    Ok(())
}

fn run(args: &Args, opts: &RunOptions) -> Result<(), BenchError> {
    let targets = registry::resolve_targets(&args.bench_root)?;
    let libraries = registry::distinct_libraries(&targets);

    let measurements = run_benchmarks(&targets, opts)?;
    let derived = derive_format_only(&measurements, opts)?;

    println!("[*] Generating charts");

    // All targets on one chart; labels carry the kind suffix since one
    // library can appear under several kinds here.
    let ranked_all = report::rank(&measurements);
    let entries: Vec<ChartEntry> = ranked_all
        .iter()
        .map(|m| ChartEntry {
            label: m.bench_name(),
            value: m.mb_per_s,
        })
        .collect();
    chart::write_chart(Path::new("bench.svg"), "Throughput", &entries)?;

    render_view(
        "decode + format",
        BenchKind::DecodeFmt,
        "bench-decode-fmt.svg",
        &measurements,
        &libraries,
    )?;
    render_view(
        "decode only",
        BenchKind::Decode,
        "bench-decode.svg",
        &measurements,
        &libraries,
    )?;
    render_view(
        "format only",
        BenchKind::Fmt,
        "bench-fmt.svg",
        &derived,
        &libraries,
    )?;

    if let Some(out) = &args.out {
        let mut all = measurements;
        all.extend(derived);
        let bench_report = BenchReport {
            run: RunMeta::for_run(opts),
            measurements: all,
        };
        let json = serde_json::to_string_pretty(&bench_report).map_err(io::Error::other)?;
        fs::write(out, json)?;
    }

    println!();
    println!("See all created *.svg files and all MD tables above");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let opts = build_options(&args);

    // Absolute input path: targets run with their own directory as cwd, so
    // a relative path would no longer resolve there. Canonicalization also
    // validates existence.
    let opts = match opts.code_filename.canonicalize() {
        Ok(code_filename) => RunOptions {
            code_filename,
            ..opts
        },
        Err(_) => {
            let mut cmd = Args::command();
            cmd.error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "input file `{}` does not exist",
                    opts.code_filename.display()
                ),
            )
            .exit();
        }
    };

    match run(&args, &opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
