//! Command-line front end: `huffpack <mode> <source> <destination>`.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use huffpack::config::CodecConfig;
use huffpack::HuffmanCodec;

const USAGE: &str =
    "usage: huffpack <compress|decompress> <source> <destination> [--config <file>] [--json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Compress,
    Decompress,
}

struct Args {
    mode: Mode,
    source: String,
    destination: String,
    config: Option<String>,
    json: bool,
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut json = false;
    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a file argument")?;
                config = Some(path.clone());
            }
            "--json" => json = true,
            _ => positional.push(arg.clone()),
        }
    }

    let [mode, source, destination] = <[String; 3]>::try_from(positional)
        .map_err(|_| anyhow::anyhow!("expected exactly three arguments"))?;
    let mode = match mode.as_str() {
        "compress" | "-huff" => Mode::Compress,
        "decompress" | "-unhuff" => Mode::Decompress,
        other => bail!("unknown mode {other:?}"),
    };
    Ok(Args {
        mode,
        source,
        destination,
        config,
        json,
    })
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)?,
        None => CodecConfig::default(),
    };
    let codec = HuffmanCodec::new(config);

    match args.mode {
        Mode::Compress => {
            let summary = codec.compress_file(&args.source, &args.destination)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} -> {} bytes ({:.1}%)",
                    summary.original_size,
                    summary.compressed_size,
                    summary.ratio * 100.0
                );
            }
        }
        Mode::Decompress => {
            let summary = codec.decompress_file(&args.source, &args.destination)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} bytes restored", summary.decoded_size);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
