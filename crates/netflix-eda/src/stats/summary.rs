//! Per-column descriptive statistics.

use super::moments::{mean, quantile, sample_std, sorted};
use crate::error::Result;
use crate::utils::{DtypeCategory, get_dtype_category, numeric_values, text_options, value_counts};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which family of statistics a [`ColumnSummary`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// mean/std/min/quartiles/max
    Numeric,
    /// unique/top/freq
    Categorical,
}

/// Descriptive statistics for one column.
///
/// Numeric columns fill the moment and quantile fields; every other column
/// fills `unique`, `top` and `freq`. Fields that do not apply, or that have
/// no valid values to summarise, are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub kind: SummaryKind,
    /// Non-null values.
    pub count: usize,
    pub unique: Option<usize>,
    /// Most frequent value.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    fn empty(name: &str, dtype: &DataType, kind: SummaryKind) -> Self {
        Self {
            name: name.to_string(),
            dtype: format!("{:?}", dtype),
            kind,
            count: 0,
            unique: None,
            top: None,
            freq: None,
            mean: None,
            std: None,
            min: None,
            q25: None,
            q50: None,
            q75: None,
            max: None,
        }
    }

    /// Whether the numeric fields apply to this column.
    pub fn is_numeric(&self) -> bool {
        self.kind == SummaryKind::Numeric
    }
}

/// Summarise every column of `df`, in column order.
pub fn summary_statistics(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    df.get_columns()
        .iter()
        .map(|col| summarize_series(col.as_materialized_series()))
        .collect()
}

/// Summarise a single column.
pub fn summarize_series(series: &Series) -> Result<ColumnSummary> {
    let name = series.name().as_str();
    let summary = match get_dtype_category(series.dtype()) {
        DtypeCategory::Numeric => summarize_numeric(series)?,
        DtypeCategory::Text | DtypeCategory::Boolean | DtypeCategory::Other => {
            summarize_text(series)?
        }
    };
    debug!("Summarised '{}' ({} valid values)", name, summary.count);
    Ok(summary)
}

fn summarize_numeric(series: &Series) -> Result<ColumnSummary> {
    let mut summary =
        ColumnSummary::empty(series.name().as_str(), series.dtype(), SummaryKind::Numeric);
    let values = sorted(&numeric_values(series)?);

    summary.count = values.len();
    summary.mean = mean(&values);
    summary.std = sample_std(&values);
    summary.min = values.first().copied();
    summary.q25 = quantile(&values, 0.25);
    summary.q50 = quantile(&values, 0.5);
    summary.q75 = quantile(&values, 0.75);
    summary.max = values.last().copied();
    Ok(summary)
}

fn summarize_text(series: &Series) -> Result<ColumnSummary> {
    let mut summary = ColumnSummary::empty(
        series.name().as_str(),
        series.dtype(),
        SummaryKind::Categorical,
    );
    let values: Vec<String> = text_options(series)?.into_iter().flatten().collect();

    summary.count = values.len();
    if values.is_empty() {
        return Ok(summary);
    }

    let counts = value_counts(&values);
    summary.unique = Some(counts.len());
    if let Some((top, freq)) = counts.into_iter().next() {
        summary.top = Some(top);
        summary.freq = Some(freq);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_summary() {
        let series = Series::new("release_year".into(), &[2010i64, 2015, 2010, 2020]);
        let summary = summarize_series(&series).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(2013.75));
        assert_eq!(summary.min, Some(2010.0));
        assert_eq!(summary.q25, Some(2010.0));
        assert_eq!(summary.q50, Some(2012.5));
        assert_eq!(summary.q75, Some(2016.25));
        assert_eq!(summary.max, Some(2020.0));
        assert!(summary.std.unwrap() > 0.0);
        assert_eq!(summary.unique, None);
        assert!(summary.is_numeric());
    }

    #[test]
    fn test_text_summary_mode_and_frequency() {
        let series = Series::new(
            "type".into(),
            &[Some("Movie"), Some("TV Show"), None, Some("Movie")],
        );
        let summary = summarize_series(&series).unwrap();

        assert_eq!(summary.count, 3);
        assert_eq!(summary.unique, Some(2));
        assert_eq!(summary.top.as_deref(), Some("Movie"));
        assert_eq!(summary.freq, Some(2));
        assert_eq!(summary.mean, None);
        assert!(!summary.is_numeric());
    }

    #[test]
    fn test_all_null_columns_produce_empty_entries() {
        let numeric = Series::new("n".into(), &[Option::<f64>::None, None]);
        let summary = summarize_series(&numeric).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.max, None);
        assert!(summary.is_numeric());

        let text = Series::new("t".into(), &[Option::<&str>::None, None]);
        let summary = summarize_series(&text).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.top, None);
        assert_eq!(summary.unique, None);
        assert!(!summary.is_numeric());
    }

    #[test]
    fn test_single_value_has_no_std() {
        let series = Series::new("x".into(), &[42.0f64]);
        let summary = summarize_series(&series).unwrap();
        assert_eq!(summary.mean, Some(42.0));
        assert_eq!(summary.std, None);
    }

    #[test]
    fn test_summary_statistics_covers_every_column() {
        let df = df![
            "type" => ["Movie", "TV Show"],
            "release_year" => [2010i64, 2012],
        ]
        .unwrap();
        let summaries = summary_statistics(&df).unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["type", "release_year"]);
    }
}
