//! CLI entry point for the instruction statistics dump tool.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use istat_core::{CategoryWeights, DecodeTable, ReportStyle, StatsConfig, StatsPreset};
use istat_dump::{load_trace, run_trace, write_report, DumpError, DEFAULT_OUTPUT};
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE_TEXT: &str = "\
Usage: istat-dump <trace> [options]

Replays a fetch trace and writes per-category instruction counts with a
weighted cycle estimate.

Trace format: one `<address> <word>` pair of hex numbers per line, `-` as the
word for a fetch without an instruction, `#` for comments.

Options:
  -o, --output <file>       Report file (default: InstructionStatistics.txt)
      --preset <name>       classic | extended (default: extended)
      --table <name>        Decode table override: base | extended
      --weights <list>      Weight override: division,multiply,branch,memory,other
      --style <name>        plain | aligned | weighted (default: plain)
  -v, --verbose             Log the run summary and print the report to stdout
  -h, --help                Show this help message

Examples:
  istat-dump run.trace
  istat-dump run.trace --preset classic --style aligned -o stats.txt
  istat-dump run.trace --weights 25,4,2,3,1 -v
";

#[derive(Debug, PartialEq)]
struct DumpArgs {
    trace: PathBuf,
    output: Option<PathBuf>,
    config: StatsConfig,
    style: ReportStyle,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    Dump(DumpArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut trace: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut preset = StatsPreset::default();
    let mut table: Option<DecodeTable> = None;
    let mut weights: Option<CategoryWeights> = None;
    let mut style = ReportStyle::default();
    let mut verbose = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--verbose" || arg == "-v" {
            verbose = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| format!("missing value for {}", arg.to_string_lossy()))?;
            output = Some(PathBuf::from(value));
            continue;
        }

        if arg == "--preset" {
            preset = option_value(&mut args, "--preset")?;
            continue;
        }

        if arg == "--table" {
            table = Some(option_value(&mut args, "--table")?);
            continue;
        }

        if arg == "--weights" {
            weights = Some(option_value(&mut args, "--weights")?);
            continue;
        }

        if arg == "--style" {
            style = option_value(&mut args, "--style")?;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if trace.is_some() {
            return Err("multiple trace paths provided".to_string());
        }
        trace = Some(PathBuf::from(arg));
    }

    let trace = trace.ok_or_else(|| "missing trace path".to_string())?;

    let mut config = StatsConfig::from_preset(preset);
    if let Some(table) = table {
        config = config.with_decode_table(table);
    }
    if let Some(weights) = weights {
        config = config.with_weights(weights);
    }

    Ok(ParseResult::Dump(DumpArgs {
        trace,
        output,
        config,
        style,
        verbose,
    }))
}

fn option_value<T>(args: &mut impl Iterator<Item = OsString>, name: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = istat_core::ConfigError>,
{
    let value = args
        .next()
        .ok_or_else(|| format!("missing value for {name}"))?;
    value
        .to_string_lossy()
        .parse()
        .map_err(|e| format!("{name}: {e}"))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_dump(args: &DumpArgs) -> Result<(), DumpError> {
    let events = load_trace(&args.trace)?;
    let snapshot = run_trace(args.config, events);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_report(&output, &snapshot, args.style)?;

    if args.verbose {
        print!("{}", snapshot.report(args.style));
    }
    info!(
        trace = %args.trace.display(),
        output = %output.display(),
        total = snapshot.total,
        "dump complete"
    );
    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Dump(args)) => {
            init_logging(args.verbose);
            match run_dump(&args) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error}");
                    1
                }
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
