//! Standalone BinDat inspection tool
//!
//! Decodes a BinDat file and prints the metadata plus one line per dataset.
//!
//! Usage:
//!   inspect_bindat <file.dat> [--big-endian] [--verbose]
//!
//! Example:
//!   inspect_bindat test.dat --verbose

use bindat_decoder::{DatasetSummary, Decoder, DecoderConfig, FloatOrder};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <file.dat> [--big-endian] [--verbose]", args[0]);
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let mut float_order = FloatOrder::Little;
    let mut verbose = false;

    for arg in &args[2..] {
        match arg.as_str() {
            "--big-endian" => float_order = FloatOrder::Big,
            "--verbose" | "-v" => verbose = true,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
    }

    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let decoder = Decoder::new(DecoderConfig::new().with_float_order(float_order));
    let container = decoder.decode_file(&path)?;

    println!("=== {:?} ===", path);
    println!("Metadata: {}", serde_json::to_string_pretty(&container.metadata)?);
    println!("Datasets: {}", container.num_datasets());

    for (i, dataset) in container.datasets.iter().enumerate() {
        let summary = DatasetSummary::from_values(dataset);
        println!(
            "  [{}] {} rows  min={:?} max={:?} mean={:?}",
            i, summary.rows, summary.min, summary.max, summary.mean
        );
        if verbose {
            let doubled: Vec<f64> = dataset.iter().map(|v| v * 2.0).collect();
            println!("      {:?}", doubled);
        }
    }

    Ok(())
}
