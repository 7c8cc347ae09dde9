//! Integration tests for the titles analysis.
//!
//! These tests run the library end to end over the CSV fixtures.

use netflix_eda::derive::{DURATION_MINUTES_COLUMN, RELEASE_YEAR_COLUMN};
use netflix_eda::{
    AnalysisConfig, Chart, ChartFormat, EdaError, analysis, category_counts,
    derive_duration_minutes, filter_by_year_range, load_titles,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(filename: &str) -> PathBuf {
    fixtures_path().join(filename)
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("netflix-eda-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn offline_config(input: PathBuf) -> AnalysisConfig {
    AnalysisConfig::builder()
        .input_path(input)
        .render_charts(false)
        .build()
        .unwrap()
}

// ============================================================================
// Loading, Filtering and Deriving
// ============================================================================

#[test]
fn test_fixture_filter_keeps_all_rows() {
    let titles = load_titles(fixture("titles.csv")).unwrap();
    assert_eq!(titles.height(), 3);

    let in_range = filter_by_year_range(&titles, 2000, 2020).unwrap();
    assert_eq!(in_range.height(), 3);

    let again = filter_by_year_range(&in_range, 2000, 2020).unwrap();
    assert!(again.equals_missing(&in_range));
}

#[test]
fn test_fixture_movie_durations() {
    let titles = load_titles(fixture("titles.csv")).unwrap();
    let movies = derive_duration_minutes(&titles).unwrap();

    assert_eq!(movies.height(), 2);
    let minutes: Vec<Option<f64>> = movies
        .column(DURATION_MINUTES_COLUMN)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(minutes, vec![Some(90.0), Some(120.0)]);

    // The source table is untouched.
    assert!(titles.column(DURATION_MINUTES_COLUMN).is_err());
    assert_eq!(titles.height(), 3);
}

#[test]
fn test_fixture_category_counts() {
    let titles = load_titles(fixture("titles.csv")).unwrap();
    let counts = category_counts(&titles).unwrap();
    assert_eq!(
        counts,
        vec![("Movie".to_string(), 2), ("TV Show".to_string(), 1)]
    );
}

#[test]
fn test_quoted_commas_survive_loading() {
    let titles = load_titles(fixture("titles.csv")).unwrap();
    let names: Vec<Option<&str>> = titles
        .column("title")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(names[1], Some("Blood, Sweat and Code"));
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_missing_file_is_file_error() {
    let err = load_titles(fixture("does_not_exist.csv")).unwrap_err();
    assert!(err.is_file_error());
    assert_eq!(err.error_code(), "FILE_ERROR");
}

#[test]
fn test_missing_release_year_is_column_not_found() {
    let titles = load_titles(fixture("no_release_year.csv")).unwrap();
    let err = filter_by_year_range(&titles, 2000, 2020).unwrap_err();
    assert!(matches!(err, EdaError::ColumnNotFound(ref c) if c == RELEASE_YEAR_COLUMN));
}

#[test]
fn test_malformed_csv_is_parse_error() {
    let err = load_titles(fixture("malformed.csv")).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.error_code(), "PARSE_ERROR");
}

#[test]
fn test_run_reports_missing_column_code() {
    let err = analysis::run(&offline_config(fixture("no_release_year.csv"))).unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
}

#[test]
fn test_run_missing_input_fails() {
    let err = analysis::run(&offline_config(fixture("does_not_exist.csv"))).unwrap_err();
    assert!(err.is_file_error());
}

#[test]
fn test_error_serializes_with_code() {
    let err = load_titles(fixture("does_not_exist.csv")).unwrap_err();
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["code"], "FILE_ERROR");
    assert!(value["message"].as_str().unwrap().contains("does_not_exist.csv"));
}

// ============================================================================
// Full Analysis Runs
// ============================================================================

#[test]
fn test_run_without_rendering() {
    let outcome = analysis::run(&offline_config(fixture("titles.csv"))).unwrap();

    assert_eq!(outcome.rows_loaded, 3);
    assert_eq!(outcome.rows_in_range, 3);
    assert_eq!(outcome.movie_rows, 2);
    assert!(outcome.rendered.is_empty());
    assert_eq!(outcome.charts.len(), 4);

    let stats = &outcome.statistics;
    assert_eq!(stats.summary.len(), 5);
    assert_eq!(
        stats.correlation.get("release_year", "release_year"),
        Some(1.0)
    );
    // Three values: skewness defined, kurtosis not.
    assert!(stats.skewness.is_some());
    assert_eq!(stats.kurtosis, None);

    let text = stats.to_string();
    assert!(text.starts_with("Summary Statistics:"));
    assert!(text.contains("Kurtosis of Release Year: NaN"));
}

#[test]
fn test_run_respects_year_range() {
    let config = AnalysisConfig::builder()
        .input_path(fixture("titles.csv"))
        .year_range(2011, 2020)
        .render_charts(false)
        .build()
        .unwrap();
    let outcome = analysis::run(&config).unwrap();

    assert_eq!(outcome.rows_in_range, 1);
    let Chart::TrendLine(line) = &outcome.charts[0] else {
        panic!("expected a trend line first");
    };
    assert_eq!(line.points, vec![(2015, 1)]);
    assert!(line.title.ends_with("(2011-2020)"));

    // Statistics still cover every title.
    assert_eq!(outcome.statistics.summary[0].count, 3);
}

#[test]
fn test_json_report_lists_no_charts_when_disabled() {
    let outcome = analysis::run(&offline_config(fixture("titles.csv"))).unwrap();
    let json = outcome.to_report("titles.csv").to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["rows_loaded"], 3);
    assert_eq!(value["movie_rows"], 2);
    assert_eq!(value["charts"].as_array().unwrap().len(), 0);
    assert_eq!(value["content_types"][0][0], "Movie");
}

#[test]
#[ignore = "Font rendering not available in test environment"]
fn test_run_renders_every_chart() {
    let dir = scratch_dir("render");
    let config = AnalysisConfig::builder()
        .input_path(fixture("titles.csv"))
        .output_dir(&dir)
        .chart_format(ChartFormat::Svg)
        .build()
        .unwrap();
    let outcome = analysis::run(&config).unwrap();

    assert_eq!(outcome.rendered.len(), 4);
    for path in &outcome.rendered {
        assert!(path.exists(), "missing {}", path.display());
        assert_eq!(path.extension().unwrap(), "svg");
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
