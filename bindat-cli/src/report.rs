//! Report generation
//!
//! Renders decoded containers as human-readable text or as one JSON object
//! per file.

use anyhow::Result;
use bindat_decoder::{Container, DatasetSummary};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// JSON shape of one decoded file
#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a Path,
    metadata: &'a serde_json::Value,
    datasets: &'a [Vec<f64>],
}

/// Render a container as a single compact JSON line
pub fn render_json(path: &Path, container: &Container) -> Result<String> {
    let report = JsonReport {
        file: path,
        metadata: &container.metadata,
        datasets: &container.datasets,
    };
    Ok(serde_json::to_string(&report)?)
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// Render a container as text
///
/// `preview` limits how many values of each dataset are listed.
pub fn render_txt(path: &Path, container: &Container, preview: usize) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "═══════════════════════════════════════════════")?;
    writeln!(out, "  {}", path.display())?;
    writeln!(out, "═══════════════════════════════════════════════")?;
    writeln!(out, "Metadata:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&container.metadata)?)?;
    writeln!(
        out,
        "\nDatasets: {} ({} values)",
        container.num_datasets(),
        container.total_values()
    )?;

    for (i, dataset) in container.datasets.iter().enumerate() {
        let summary = DatasetSummary::from_values(dataset);
        writeln!(
            out,
            "  [{}] {} rows  min={} max={} mean={}",
            i,
            summary.rows,
            format_stat(summary.min),
            format_stat(summary.max),
            format_stat(summary.mean)
        )?;

        if preview > 0 && !dataset.is_empty() {
            let shown: Vec<String> = dataset
                .iter()
                .take(preview)
                .map(|v| format!("{:.3}", v))
                .collect();
            write!(out, "      {}", shown.join(", "))?;
            if dataset.len() > preview {
                write!(out, ", ... ({} more)", dataset.len() - preview)?;
            }
            writeln!(out)?;
        }
    }

    Ok(out)
}
