//! BinDat Reader CLI Application
//!
//! This is the command-line front end for the bindat-decoder library.
//! It adds:
//! - Configuration file support (config.toml)
//! - Parallel decoding of several input files
//! - Text and JSON reports

use anyhow::{Context, Result};
use bindat_decoder::{Container, Decoder, FloatOrder};
use clap::Parser;
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// BinDat Reader - Decode BinDat metadata and float64 datasets
#[derive(Parser, Debug)]
#[command(name = "bindat-cli")]
#[command(about = "Decode BinDat files (JSON metadata + float64 datasets)", long_about = None)]
#[command(version)]
struct Args {
    /// BinDat file(s) to decode
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Byte order of dataset values: little, big or native
    #[arg(long, value_name = "ORDER")]
    float_order: Option<FloatOrder>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of values shown per dataset in txt output
    #[arg(long, value_name = "COUNT")]
    preview: Option<usize>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("BinDat Reader CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", bindat_decoder::VERSION);

    let config = resolve_config(&args)?;

    if config.input.files.is_empty() {
        println!("BinDat Reader - No input specified");
        println!("\nQuick Start:");
        println!("  bindat-cli test.dat");
        println!("  bindat-cli --float-order big --format json run1.dat run2.dat");
        println!("\nWith a configuration file:");
        println!("  bindat-cli --config config.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    decode_all(&config)
}

/// Merge the optional config file with command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    config.input.files.extend(args.files.iter().cloned());
    if let Some(order) = args.float_order {
        config.decoding.float_order = order;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(preview) = args.preview {
        config.output.preview = preview;
    }

    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Decode every input file in parallel, then report in input order
fn decode_all(config: &AppConfig) -> Result<()> {
    let decoder = Decoder::new(config.decoding.clone());
    log::debug!(
        "Decoding {} file(s) with {} float order",
        config.input.files.len(),
        decoder.config().float_order
    );

    let results = decode_files(&decoder, &config.input.files);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;

    for (path, result) in &results {
        match result {
            Ok(container) => write_report(&mut out, path, container, config)?,
            Err(e) => {
                failures += 1;
                log::error!("{:#}", e);
            }
        }
    }
    out.flush()?;

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) failed to decode", failures, results.len());
    }
    Ok(())
}

/// Decode files in parallel; results come back in input order
fn decode_files<'a>(
    decoder: &Decoder,
    files: &'a [PathBuf],
) -> Vec<(&'a PathBuf, Result<Container>)> {
    files
        .par_iter()
        .map(|path| {
            let result = decoder
                .decode_file(path)
                .with_context(|| format!("Failed to decode {:?}", path));
            (path, result)
        })
        .collect()
}

fn write_report(
    out: &mut impl Write,
    path: &Path,
    container: &Container,
    config: &AppConfig,
) -> Result<()> {
    match config.output.format {
        OutputFormat::Txt => {
            let text = report::render_txt(path, container, config.output.preview)?;
            writeln!(out, "{}", text)?;
        }
        OutputFormat::Json => {
            let line = report::render_json(path, container)?;
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "bindat-cli",
            "--float-order",
            "big",
            "--format",
            "json",
            "--preview",
            "3",
            "a.dat",
            "b.dat",
        ]);
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.input.files, vec![PathBuf::from("a.dat"), PathBuf::from("b.dat")]);
        assert_eq!(config.decoding.float_order, FloatOrder::Big);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.preview, 3);
    }

    #[test]
    fn test_invalid_float_order_rejected() {
        let result = Args::try_parse_from(["bindat-cli", "--float-order", "middle", "a.dat"]);
        assert!(result.is_err());
    }

    /// Write a file with `{"run": n}` metadata and one dataset of `n` values
    fn write_run(dir: &Path, n: usize) -> PathBuf {
        let path = dir.join(format!("run{}.dat", n));
        let mut bytes = format!("{{\"run\":{}}}", n).into_bytes();
        bytes.push(0);
        bytes.extend_from_slice(&(n as u64).to_be_bytes());
        for i in 0..n {
            bytes.extend_from_slice(&(i as f64).to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_decode_files_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..16).rev().map(|n| write_run(dir.path(), n)).collect();

        let results = decode_files(&Decoder::default(), &files);

        assert_eq!(results.len(), files.len());
        for ((path, result), expected) in results.iter().zip(&files) {
            assert_eq!(*path, expected);
            let container = result.as_ref().unwrap();
            let n = container.metadata["run"].as_u64().unwrap() as usize;
            assert_eq!(path.file_name().unwrap(), format!("run{}.dat", n).as_str());
            assert_eq!(container.datasets[0].len(), n);
        }
    }

    #[test]
    fn test_decode_all_fails_when_any_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_run(dir.path(), 3);
        let missing = dir.path().join("missing.dat");

        let mut config = AppConfig::default();
        config.input.files = vec![good, missing.clone()];

        let err = decode_all(&config).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 file(s) failed to decode");

        let results = decode_files(&Decoder::default(), &config.input.files);
        assert!(results[0].1.is_ok());
        let failure = results[1].1.as_ref().unwrap_err();
        assert!(format!("{:#}", failure).contains(&format!("{:?}", missing)));
    }

    #[test]
    fn test_decode_all_succeeds_for_valid_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.input.files = vec![write_run(dir.path(), 1), write_run(dir.path(), 2)];
        config.output.format = OutputFormat::Json;

        assert!(decode_all(&config).is_ok());
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
