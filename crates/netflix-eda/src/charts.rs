//! Chart descriptions built from table views.
//!
//! Building a chart never draws anything: each builder groups or aggregates
//! the view and returns a [`Chart`] value. Drawing happens in
//! [`crate::render`]. An empty view gives an empty chart, not an error; only
//! a missing required column fails.

use crate::derive::{DURATION_MINUTES_COLUMN, category_counts, year_counts};
use crate::error::Result;
use crate::stats::{BoxSummary, CorrelationMatrix, correlation};
use crate::utils::{numeric_values, require_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Release-year counts plotted as a line with per-point value labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// `(year, count)`, ascending by year.
    pub points: Vec<(i64, usize)>,
}

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the total in percent.
    pub percentage: f64,
}

impl PieSlice {
    /// Wedge label with its percentage, e.g. `Movie (69.6%)`.
    pub fn display_label(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.percentage)
    }
}

/// Category shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    /// Clockwise from this angle, in degrees.
    pub start_angle: f64,
    pub slices: Vec<PieSlice>,
}

/// Distribution of a single numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    pub title: String,
    pub y_label: String,
    /// `None` when the column has no valid values.
    pub summary: Option<BoxSummary>,
}

/// Correlation matrix drawn as an annotated colour grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub title: String,
    pub matrix: CorrelationMatrix,
}

/// A renderable chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Chart {
    TrendLine(TrendLine),
    Pie(PieChart),
    BoxPlot(BoxPlot),
    Heatmap(Heatmap),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::TrendLine(c) => &c.title,
            Chart::Pie(c) => &c.title,
            Chart::BoxPlot(c) => &c.title,
            Chart::Heatmap(c) => &c.title,
        }
    }

    /// File name (without extension) used when the chart is rendered.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Chart::TrendLine(_) => "release_year_trend",
            Chart::Pie(_) => "content_type_pie",
            Chart::BoxPlot(_) => "duration_box_plot",
            Chart::Heatmap(_) => "correlation_heatmap",
        }
    }

    /// Whether the chart has no marks to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Chart::TrendLine(c) => c.points.is_empty(),
            Chart::Pie(c) => c.slices.is_empty(),
            Chart::BoxPlot(c) => c.summary.is_none(),
            Chart::Heatmap(c) => c.matrix.is_empty(),
        }
    }
}

/// Titles per release year, for a view already bounded to `year_range`.
pub fn trend_line(view: &DataFrame, year_range: (i64, i64)) -> Result<Chart> {
    Ok(Chart::TrendLine(TrendLine {
        title: format!(
            "Trend of Content Added by Release Year ({}-{})",
            year_range.0, year_range.1
        ),
        x_label: "Release Year".to_string(),
        y_label: "Number of Releases".to_string(),
        points: year_counts(view)?,
    }))
}

/// Share of each content type.
pub fn content_type_pie(view: &DataFrame) -> Result<Chart> {
    let counts = category_counts(view)?;
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    let slices = counts
        .into_iter()
        .map(|(label, count)| PieSlice {
            label,
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();

    Ok(Chart::Pie(PieChart {
        title: "Proportion of Content Types (Movies vs TV Shows)".to_string(),
        start_angle: 90.0,
        slices,
    }))
}

/// Box plot of `duration_minutes`; rows without a parsed duration are skipped.
pub fn duration_box_plot(view: &DataFrame) -> Result<Chart> {
    let minutes = numeric_values(require_column(view, DURATION_MINUTES_COLUMN)?)?;
    Ok(Chart::BoxPlot(BoxPlot {
        title: "Box Plot of Movie Durations".to_string(),
        y_label: "Duration (Minutes)".to_string(),
        summary: BoxSummary::from_values(&minutes),
    }))
}

/// Heatmap of the correlation between `columns`.
pub fn correlation_heatmap<S: AsRef<str>>(view: &DataFrame, columns: &[S]) -> Result<Chart> {
    Ok(Chart::Heatmap(Heatmap {
        title: "Correlation Heatmap for Numeric Features".to_string(),
        matrix: correlation(view, columns)?,
    }))
}
