//! Exploratory Data Analysis of Netflix Titles
//!
//! A batch analysis library built on Polars: it loads a CSV of Netflix titles,
//! computes descriptive statistics and draws four charts with plotters.
//!
//! # Overview
//!
//! - **Loading**: CSV to [`polars::prelude::DataFrame`] with schema inference
//! - **Views**: release-year filtering and a movie-only view with numeric durations
//! - **Statistics**: summary table, Pearson correlation, skewness and kurtosis
//! - **Charts**: release-year trend, content-type pie, duration box plot,
//!   correlation heatmap, described as values and rendered to PNG or SVG
//! - **Reports**: a plain-text report and a JSON report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use netflix_eda::{AnalysisConfig, ChartFormat, analysis};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("netflix_movies.csv")
//!     .output_dir("charts")
//!     .year_range(2000, 2020)
//!     .chart_format(ChartFormat::Svg)
//!     .build()?;
//!
//! let outcome = analysis::run(&config)?;
//! println!("{}", outcome.statistics);
//! ```
//!
//! The individual steps can also be used on their own:
//!
//! ```rust,ignore
//! use netflix_eda::{charts, derive, loader, stats};
//!
//! let titles = loader::load_titles("netflix_movies.csv")?;
//! let movies = derive::derive_duration_minutes(&titles)?;
//! let chart = charts::duration_box_plot(&movies)?;
//! let skew = stats::skewness(titles.column("release_year")?.as_materialized_series())?;
//! ```

pub mod analysis;
pub mod charts;
pub mod config;
pub mod derive;
pub mod error;
pub mod loader;
pub mod render;
pub mod report;
pub mod stats;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{AnalysisOutcome, run};
pub use charts::{BoxPlot, Chart, Heatmap, PieChart, PieSlice, TrendLine};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ChartFormat, ConfigValidationError};
pub use derive::{
    category_counts, derive_duration_minutes, derive_duration_minutes_for, filter_by_year_range,
    year_counts,
};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use loader::{LoaderOptions, load_titles, load_titles_with};
pub use render::ChartRenderer;
pub use report::{AnalysisReport, StatisticsReport};
pub use stats::{BoxSummary, ColumnSummary, CorrelationMatrix, SummaryKind};
