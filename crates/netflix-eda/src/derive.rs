//! Filtered and derived views over the titles table.
//!
//! Every function here takes the source table by reference and returns a new
//! [`DataFrame`]; the source is never modified.

use crate::error::{EdaError, Result};
use crate::utils::{is_numeric_dtype, numeric_options, require_column, text_options, value_counts};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Category column (`Movie` / `TV Show`).
pub const TYPE_COLUMN: &str = "type";

/// Release year column.
pub const RELEASE_YEAR_COLUMN: &str = "release_year";

/// Free-text duration column (`"90 min"`, `"2 Seasons"`).
pub const DURATION_COLUMN: &str = "duration";

/// Column appended by [`derive_duration_minutes`].
pub const DURATION_MINUTES_COLUMN: &str = "duration_minutes";

/// Category value marking movie rows.
pub const MOVIE_LABEL: &str = "Movie";

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("Invalid regex: digit run"));

/// Parse the first contiguous run of ASCII digits in `text`.
///
/// ```rust,ignore
/// assert_eq!(leading_number("90 min"), Some(90.0));
/// assert_eq!(leading_number("2 Seasons"), Some(2.0));
/// assert_eq!(leading_number("unknown"), None);
/// ```
pub fn leading_number(text: &str) -> Option<f64> {
    DIGIT_RUN
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Release years as numbers, one entry per row.
///
/// Text columns are parsed value by value; anything that is not a number
/// becomes `None`.
fn release_years(df: &DataFrame) -> Result<Vec<Option<f64>>> {
    let series = require_column(df, RELEASE_YEAR_COLUMN)?;
    if is_numeric_dtype(series.dtype()) {
        return numeric_options(series);
    }

    debug!(
        "'{}' is {:?}; parsing values individually",
        RELEASE_YEAR_COLUMN,
        series.dtype()
    );
    Ok(text_options(series)?
        .into_iter()
        .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
        .collect())
}

/// Keep rows whose release year lies in `[low, high]`.
///
/// Rows with a missing or non-numeric year are dropped. Fails with
/// [`EdaError::ColumnNotFound`] when the table has no `release_year` column.
pub fn filter_by_year_range(df: &DataFrame, low: i64, high: i64) -> Result<DataFrame> {
    if low > high {
        return Err(EdaError::InvalidRange { low, high });
    }

    let (low_f, high_f) = (low as f64, high as f64);
    let mask: BooleanChunked = release_years(df)?
        .into_iter()
        .map(|year| year.is_some_and(|y| y >= low_f && y <= high_f))
        .collect();

    let filtered = df.filter(&mask)?;
    debug!(
        "Year filter [{}, {}] kept {} of {} rows",
        low,
        high,
        filtered.height(),
        df.height()
    );
    if filtered.height() == 0 {
        warn!("No titles released between {} and {}", low, high);
    }
    Ok(filtered)
}

/// Movie rows with a numeric `duration_minutes` column appended.
pub fn derive_duration_minutes(df: &DataFrame) -> Result<DataFrame> {
    derive_duration_minutes_for(df, MOVIE_LABEL)
}

/// Rows whose `type` equals `label`, with `duration_minutes` appended.
///
/// The derived value is the first digit run of `duration`, or null when the
/// text has none.
pub fn derive_duration_minutes_for(df: &DataFrame, label: &str) -> Result<DataFrame> {
    let types = text_options(require_column(df, TYPE_COLUMN)?)?;
    // checked before filtering so a missing column is reported even when no row matches
    require_column(df, DURATION_COLUMN)?;

    let mask: BooleanChunked = types
        .iter()
        .map(|t| t.as_deref() == Some(label))
        .collect();
    let mut movies = df.filter(&mask)?;

    let minutes: Vec<Option<f64>> = text_options(require_column(&movies, DURATION_COLUMN)?)?
        .into_iter()
        .map(|d| d.as_deref().and_then(leading_number))
        .collect();

    let parsed = minutes.iter().filter(|m| m.is_some()).count();
    debug!(
        "Derived {} for {} '{}' rows ({} parsed)",
        DURATION_MINUTES_COLUMN,
        minutes.len(),
        label,
        parsed
    );
    if parsed == 0 && !minutes.is_empty() {
        warn!("No '{}' row has a numeric duration", label);
    }

    movies.with_column(Series::new(DURATION_MINUTES_COLUMN.into(), minutes))?;
    Ok(movies)
}

/// Rows per category, most frequent first.
///
/// Equal counts keep first-seen order; null categories are skipped.
pub fn category_counts(df: &DataFrame) -> Result<Vec<(String, usize)>> {
    let types = text_options(require_column(df, TYPE_COLUMN)?)?;
    Ok(value_counts(types.into_iter().flatten()))
}

/// Rows per release year, sorted by year ascending.
pub fn year_counts(df: &DataFrame) -> Result<Vec<(i64, usize)>> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for year in release_years(df)?.into_iter().flatten() {
        if year.fract() != 0.0 {
            debug!("Skipping non-integral release year {}", year);
            continue;
        }
        *counts.entry(year as i64).or_insert(0) += 1;
    }
    Ok(counts.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles() -> DataFrame {
        df![
            "type" => ["Movie", "Movie", "TV Show", "Movie"],
            "release_year" => [2010i64, 2015, 2010, 1995],
            "duration" => [Some("90 min"), Some("120 min"), Some("2 Seasons"), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("90 min"), Some(90.0));
        assert_eq!(leading_number("2 Seasons"), Some(2.0));
        assert_eq!(leading_number("approx. 105 min (cut 98)"), Some(105.0));
        assert_eq!(leading_number("unknown"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_filter_by_year_range_inclusive_bounds() {
        let df = titles();
        let filtered = filter_by_year_range(&df, 2010, 2015).unwrap();
        assert_eq!(filtered.height(), 3);

        let years = numeric_options(require_column(&filtered, "release_year").unwrap()).unwrap();
        assert!(years.iter().flatten().all(|y| (2010.0..=2015.0).contains(y)));
    }

    #[test]
    fn test_filter_by_year_range_does_not_mutate_input() {
        let df = titles();
        let _ = filter_by_year_range(&df, 2011, 2020).unwrap();
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn test_filter_by_year_range_idempotent() {
        let df = titles();
        let once = filter_by_year_range(&df, 2000, 2012).unwrap();
        let twice = filter_by_year_range(&once, 2000, 2012).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_filter_by_year_range_excludes_missing_and_text_years() {
        let df = df![
            "release_year" => [Some("2010"), Some("n/a"), None, Some(" 2012 ")],
        ]
        .unwrap();
        let filtered = filter_by_year_range(&df, 2000, 2020).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn test_filter_by_year_range_missing_column() {
        let df = df!["type" => ["Movie"]].unwrap();
        let err = filter_by_year_range(&df, 2000, 2020).unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(name) if name == "release_year"));
    }

    #[test]
    fn test_filter_by_year_range_reversed_bounds() {
        let err = filter_by_year_range(&titles(), 2020, 2000).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RANGE");
    }

    #[test]
    fn test_derive_duration_minutes_keeps_only_movies() {
        let movies = derive_duration_minutes(&titles()).unwrap();
        assert_eq!(movies.height(), 3);

        let types = text_options(require_column(&movies, "type").unwrap()).unwrap();
        assert!(types.iter().all(|t| t.as_deref() == Some("Movie")));

        let minutes =
            numeric_options(require_column(&movies, "duration_minutes").unwrap()).unwrap();
        assert_eq!(minutes, vec![Some(90.0), Some(120.0), None]);
    }

    #[test]
    fn test_derive_duration_minutes_custom_label() {
        let shows = derive_duration_minutes_for(&titles(), "TV Show").unwrap();
        let seasons =
            numeric_options(require_column(&shows, "duration_minutes").unwrap()).unwrap();
        assert_eq!(seasons, vec![Some(2.0)]);
    }

    #[test]
    fn test_derive_duration_minutes_missing_duration_column() {
        let df = df!["type" => ["TV Show"]].unwrap();
        let err = derive_duration_minutes(&df).unwrap_err();
        assert!(matches!(err, EdaError::ColumnNotFound(name) if name == "duration"));
    }

    #[test]
    fn test_category_counts() {
        let counts = category_counts(&titles()).unwrap();
        assert_eq!(
            counts,
            vec![("Movie".to_string(), 3), ("TV Show".to_string(), 1)]
        );
    }

    #[test]
    fn test_year_counts_sorted_ascending() {
        let counts = year_counts(&titles()).unwrap();
        assert_eq!(counts, vec![(1995, 1), (2010, 2), (2015, 1)]);
    }
}
