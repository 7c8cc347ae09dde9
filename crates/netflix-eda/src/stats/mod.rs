//! Descriptive statistics over the titles table.
//!
//! This module provides:
//! - Per-column summary statistics ([`summary_statistics`])
//! - Pearson correlation matrices ([`correlation`])
//! - Skewness and excess kurtosis of a numeric column ([`skewness`], [`kurtosis`])
//! - Box-plot summaries ([`BoxSummary`])
//!
//! The estimators themselves live in [`moments`] and work on plain slices.

mod correlation;
mod distribution;
pub mod moments;
mod summary;

pub use correlation::{CorrelationMatrix, correlation};
pub use distribution::{BoxSummary, WHISKER_IQR_FACTOR};
pub use moments::{pearson, quantile, sample_kurtosis, sample_skewness};
pub use summary::{ColumnSummary, SummaryKind, summarize_series, summary_statistics};

use crate::error::Result;
use crate::utils::numeric_values;
use polars::prelude::*;

/// Unbiased excess kurtosis of a numeric column, ignoring nulls.
///
/// `None` when fewer than four values remain.
pub fn kurtosis(series: &Series) -> Result<Option<f64>> {
    Ok(sample_kurtosis(&numeric_values(series)?))
}

/// Adjusted Fisher-Pearson skewness of a numeric column, ignoring nulls.
///
/// `None` when fewer than two values remain.
pub fn skewness(series: &Series) -> Result<Option<f64>> {
    Ok(sample_skewness(&numeric_values(series)?))
}
