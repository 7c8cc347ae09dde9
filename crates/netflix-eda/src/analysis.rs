//! The end-to-end run: load, filter/derive, compute, plot, report.

use crate::charts::{
    Chart, content_type_pie, correlation_heatmap, duration_box_plot, trend_line,
};
use crate::config::AnalysisConfig;
use crate::derive::{
    DURATION_MINUTES_COLUMN, RELEASE_YEAR_COLUMN, category_counts, derive_duration_minutes_for,
    filter_by_year_range,
};
use crate::error::{Result, ResultExt};
use crate::loader::load_titles;
use crate::render::ChartRenderer;
use crate::report::{AnalysisReport, StatisticsReport};
use crate::stats::{correlation, kurtosis, skewness, summary_statistics};
use crate::utils::require_column;
use polars::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub rows_loaded: usize,
    pub rows_in_range: usize,
    pub movie_rows: usize,
    pub content_types: Vec<(String, usize)>,
    pub statistics: StatisticsReport,
    /// Chart descriptions, in drawing order.
    pub charts: Vec<Chart>,
    /// Files written by the renderer; empty when rendering is disabled.
    pub rendered: Vec<PathBuf>,
}

impl AnalysisOutcome {
    pub fn to_report(&self, input_file: impl Into<String>) -> AnalysisReport {
        AnalysisReport::now(
            input_file,
            self.rows_loaded,
            self.rows_in_range,
            self.movie_rows,
            self.content_types.clone(),
            self.rendered.clone(),
            self.statistics.clone(),
        )
    }
}

/// Statistics over the full titles table.
pub fn compute_statistics(titles: &DataFrame) -> Result<StatisticsReport> {
    let years = require_column(titles, RELEASE_YEAR_COLUMN)?;
    Ok(StatisticsReport {
        summary: summary_statistics(titles)?,
        correlation: correlation(titles, &[RELEASE_YEAR_COLUMN])?,
        kurtosis: kurtosis(years)?,
        skewness: skewness(years)?,
    })
}

/// The four charts: the trend over the year-bounded view, content shares over
/// all titles, and durations and their correlations over movies.
pub fn build_charts(
    titles: &DataFrame,
    in_range: &DataFrame,
    movies: &DataFrame,
    year_range: (i64, i64),
) -> Result<Vec<Chart>> {
    Ok(vec![
        trend_line(in_range, year_range)?,
        content_type_pie(titles)?,
        duration_box_plot(movies)?,
        correlation_heatmap(movies, &[RELEASE_YEAR_COLUMN, DURATION_MINUTES_COLUMN])?,
    ])
}

/// Run the whole analysis described by `config`.
///
/// Stops at the first error; charts already written stay on disk.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    let start = Instant::now();
    config.validate()?;

    let titles = load_titles(&config.input_path)?;
    let (low, high) = config.year_range;
    let in_range = filter_by_year_range(&titles, low, high)
        .context(format!("Filtering release years to {}-{}", low, high))?;
    let movies = derive_duration_minutes_for(&titles, &config.movie_label)
        .context("Deriving movie durations")?;
    info!(
        "Prepared views: {} titles, {} in range, {} movies",
        titles.height(),
        in_range.height(),
        movies.height()
    );

    let statistics = compute_statistics(&titles).context("Computing statistics")?;
    let content_types = category_counts(&titles)?;
    let charts = build_charts(&titles, &in_range, &movies, config.year_range)?;
    debug!("Built {} chart descriptions", charts.len());

    let rendered = if config.render_charts {
        let renderer = ChartRenderer::from_config(config);
        info!(
            "Rendering {} charts into {}",
            charts.len(),
            renderer.output_dir().display()
        );
        charts
            .iter()
            .map(|chart| renderer.render(chart))
            .collect::<Result<Vec<_>>>()?
    } else {
        info!("Chart rendering disabled");
        Vec::new()
    };

    info!("Analysis finished in {:?}", start.elapsed());
    Ok(AnalysisOutcome {
        rows_loaded: titles.height(),
        rows_in_range: in_range.height(),
        movie_rows: movies.height(),
        content_types,
        statistics,
        charts,
        rendered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles() -> DataFrame {
        df![
            "type" => ["Movie", "Movie", "TV Show", "Movie"],
            "release_year" => [2010i64, 2015, 2010, 1995],
            "duration" => ["90 min", "120 min", "2 Seasons", "85 min"],
        ]
        .unwrap()
    }

    #[test]
    fn test_statistics_use_full_table() {
        let stats = compute_statistics(&titles()).unwrap();
        assert_eq!(stats.summary.len(), 3);
        assert_eq!(stats.summary[1].count, 4);
        assert_eq!(stats.correlation.columns, vec!["release_year".to_string()]);
        assert!(stats.kurtosis.is_some());
        assert!(stats.skewness.is_some());
    }

    #[test]
    fn test_charts_follow_their_views() {
        let titles = titles();
        let in_range = filter_by_year_range(&titles, 2000, 2020).unwrap();
        let movies = derive_duration_minutes_for(&titles, "Movie").unwrap();
        let charts = build_charts(&titles, &in_range, &movies, (2000, 2020)).unwrap();

        let stems: Vec<_> = charts.iter().map(|c| c.file_stem()).collect();
        assert_eq!(
            stems,
            vec![
                "release_year_trend",
                "content_type_pie",
                "duration_box_plot",
                "correlation_heatmap"
            ]
        );

        let Chart::TrendLine(line) = &charts[0] else {
            panic!("expected a trend line");
        };
        assert_eq!(line.points, vec![(2010, 2), (2015, 1)]);

        let Chart::BoxPlot(plot) = &charts[2] else {
            panic!("expected a box plot");
        };
        assert_eq!(plot.summary.as_ref().unwrap().count, 3);
    }

    #[test]
    fn test_statistics_require_release_year() {
        let df = df!["type" => ["Movie"]].unwrap();
        assert!(compute_statistics(&df).is_err());
    }
}
