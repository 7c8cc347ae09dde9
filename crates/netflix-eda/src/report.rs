//! Text and JSON reports of the computed statistics.

use crate::error::Result;
use crate::stats::{ColumnSummary, CorrelationMatrix};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Widest cell printed for text values such as `top`.
const MAX_CELL_WIDTH: usize = 24;

const ROW_LABELS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Statistics printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub summary: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
    /// Excess kurtosis of `release_year`; `None` when undefined.
    pub kurtosis: Option<f64>,
    /// Skewness of `release_year`; `None` when undefined.
    pub skewness: Option<f64>,
}

/// Everything a run produced, for `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub input_file: String,
    pub rows_loaded: usize,
    pub rows_in_range: usize,
    pub movie_rows: usize,
    pub content_types: Vec<(String, usize)>,
    /// Rendered chart files, empty when rendering was disabled.
    pub charts: Vec<PathBuf>,
    pub statistics: StatisticsReport,
}

impl AnalysisReport {
    /// Stamp a report with the current local time.
    pub fn now(
        input_file: impl Into<String>,
        rows_loaded: usize,
        rows_in_range: usize,
        movie_rows: usize,
        content_types: Vec<(String, usize)>,
        charts: Vec<PathBuf>,
        statistics: StatisticsReport,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            rows_loaded,
            rows_in_range,
            movie_rows,
            content_types,
            charts,
            statistics,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.6}", v),
        _ => "NaN".to_string(),
    }
}

fn format_count(value: Option<usize>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

fn truncate_cell(s: &str) -> String {
    if s.chars().count() <= MAX_CELL_WIDTH {
        s.to_string()
    } else {
        let head: String = s.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", head)
    }
}

/// The eleven summary cells of one column, in [`ROW_LABELS`] order.
fn summary_cells(column: &ColumnSummary) -> Vec<String> {
    vec![
        column.count.to_string(),
        format_count(column.unique),
        column
            .top
            .as_deref()
            .map_or_else(|| "NaN".to_string(), truncate_cell),
        format_count(column.freq),
        format_value(column.mean),
        format_value(column.std),
        format_value(column.min),
        format_value(column.q25),
        format_value(column.q50),
        format_value(column.q75),
        format_value(column.max),
    ]
}

/// Write a right-aligned table with a header row and labelled rows.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: &[(String, Vec<String>)],
) -> fmt::Result {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|(_, cells)| cells.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:label_width$}", "")?;
    for (header, width) in headers.iter().zip(&widths) {
        write!(f, "  {:>width$}", header, width = *width)?;
    }
    writeln!(f)?;

    for (label, cells) in rows {
        write!(f, "{:<label_width$}", label)?;
        for (cell, width) in cells.iter().zip(&widths) {
            write!(f, "  {:>width$}", cell, width = *width)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Statistics:")?;
        let headers: Vec<String> = self.summary.iter().map(|c| truncate_cell(&c.name)).collect();
        let columns: Vec<Vec<String>> = self.summary.iter().map(summary_cells).collect();
        let rows: Vec<(String, Vec<String>)> = ROW_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cells = columns.iter().map(|c| c[i].clone()).collect();
                (label.to_string(), cells)
            })
            .collect();
        write_table(f, &headers, &rows)?;

        writeln!(f, "\nCorrelation Matrix:")?;
        let rows: Vec<(String, Vec<String>)> = self
            .correlation
            .columns
            .iter()
            .zip(&self.correlation.values)
            .map(|(name, values)| {
                let cells = values.iter().map(|v| format_value(Some(*v))).collect();
                (name.clone(), cells)
            })
            .collect();
        write_table(f, &self.correlation.columns, &rows)?;

        writeln!(
            f,
            "\nKurtosis of Release Year: {}",
            self.kurtosis.unwrap_or(f64::NAN)
        )?;
        write!(
            f,
            "Skewness of Release Year: {}",
            self.skewness.unwrap_or(f64::NAN)
        )
    }
}
