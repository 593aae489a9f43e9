//! CLI entry point for the MKRAND generator binary.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use mkrand_core::{format_vector, parse_psi, Processor, Register, Vector, VectorFormat};
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: mkrand [options]

Generates 128-bit pseudo-random blocks from a rule-30 cellular
automaton. Without a seed the generator is free-running and mixes the
wall clock into each block; with -s it replays a deterministic stream.

Options:
  -s, --seed <psi>      Seed block in PSI text form [<:...:>]
  -n, --blocks <count>  Number of blocks to emit (default: 1)
  -f, --format <name>   Output format (default: psi)
  -o, --output <file>   Write to file instead of stdout
  -h, --help            Show this help message

Examples:
  mkrand
  mkrand -n 4 -f uuid
  mkrand -s '[<:00000000000000000000000000000001:>]' -n 16 -o stream.txt

Formats (binary written to a file is raw 16-byte blocks):
";

#[derive(Debug, PartialEq, Eq)]
struct Options {
    seed: Option<String>,
    blocks: usize,
    format: VectorFormat,
    output: Option<PathBuf>,
}

#[derive(Debug)]
enum ParseResult {
    Options(Options),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut seed: Option<String> = None;
    let mut blocks: Option<usize> = None;
    let mut format: Option<VectorFormat> = None;
    let mut output: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "-s" || arg == "--seed" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -s".to_string())?;
            seed = Some(value.to_string_lossy().to_string());
            continue;
        }

        if arg == "-n" || arg == "--blocks" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -n".to_string())?;
            let count: usize = value
                .to_string_lossy()
                .parse()
                .map_err(|_| format!("invalid block count: {}", value.to_string_lossy()))?;
            if count == 0 {
                return Err("block count must be at least 1".to_string());
            }
            blocks = Some(count);
            continue;
        }

        if arg == "-f" || arg == "--format" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -f".to_string())?;
            let name = value.to_string_lossy();
            format = Some(
                VectorFormat::from_name(&name).ok_or_else(|| format!("unknown format: {name}"))?,
            );
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            output = Some(PathBuf::from(value));
            continue;
        }

        return Err(format!("unknown option: {}", arg.to_string_lossy()));
    }

    Ok(ParseResult::Options(Options {
        seed,
        blocks: blocks.unwrap_or(1),
        format: format.unwrap_or(VectorFormat::Psi),
        output,
    }))
}

fn format_table() -> String {
    let mut table = String::new();
    for format in VectorFormat::ALL {
        let line = format!(
            "  {:<8} ({:>2})  {}\n",
            format.name(),
            format.code(),
            format.describe()
        );
        table.push_str(&line);
    }
    table
}

/// Drives the processor for the requested number of time quanta and
/// collects the output register after each one.
fn generate_blocks(cp: &mut Processor, opts: &Options) -> Result<Vec<Vector>, String> {
    if let Some(text) = &opts.seed {
        let seed = parse_psi(text).map_err(|e| format!("invalid seed: {e}"))?;
        cp.set_counter_mode(true);
        cp.load(Register::SdR30, &seed)
            .map_err(|e| format!("processor fault: {e}"))?;
    } else {
        let seed = cp.sample_seed().to_vector();
        cp.load(Register::SdR30, &seed)
            .map_err(|e| format!("processor fault: {e}"))?;
    }

    let mut out = Vec::with_capacity(opts.blocks);
    for _ in 0..opts.blocks {
        cp.time_quantum()
            .map_err(|e| format!("processor fault: {e}"))?;
        out.push(cp.register(Register::R).clone());
    }
    Ok(out)
}

fn render_text(blocks: &[Vector], format: VectorFormat) -> String {
    let mut text = String::new();
    for block in blocks {
        text.push_str(&format_vector(block, format));
        text.push('\n');
    }
    text
}

fn render_raw(blocks: &[Vector]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(blocks.len() * 16);
    for block in blocks {
        raw.extend_from_slice(&block.to_bytes());
    }
    raw
}

fn run(opts: &Options) -> Result<(), i32> {
    let mut cp = Processor::new();
    if let Err(e) = cp.check_clocks() {
        eprintln!("error: clock self-test failed: {e}");
        return Err(1);
    }

    let blocks = match generate_blocks(&mut cp, opts) {
        Ok(blocks) => blocks,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    match &opts.output {
        Some(path) => {
            let payload = if opts.format == VectorFormat::Binary {
                render_raw(&blocks)
            } else {
                render_text(&blocks, opts.format).into_bytes()
            };
            if let Err(e) = fs::write(path, payload) {
                eprintln!("error: failed to write output: {e}");
                return Err(1);
            }
        }
        None => {
            let text = render_text(&blocks, opts.format);
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(text.as_bytes()) {
                eprintln!("error: failed to write output: {e}");
                return Err(1);
            }
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}{}", format_table());
            0
        }
        Ok(ParseResult::Options(opts)) => match run(&opts) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}{}", format_table());
            1
        }
    };

    std::process::exit(exit_code);
}
