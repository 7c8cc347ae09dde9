//! Configuration for an analysis run.
//!
//! Defaults reproduce the fixed batch job: `netflix_movies.csv` in the
//! working directory, titles released 2000-2020, PNG charts in `charts/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "netflix_movies.csv";

/// Default directory for rendered charts.
pub const DEFAULT_OUTPUT_DIR: &str = "charts";

/// Default category label for movie rows.
pub const DEFAULT_MOVIE_LABEL: &str = "Movie";

/// Default inclusive release-year window for the trend chart.
pub const DEFAULT_YEAR_RANGE: (i64, i64) = (2000, 2020);

/// Default chart size in pixels (width, height).
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1200, 600);

/// Image format for rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChartFormat {
    /// Bitmap output via the plotters bitmap backend
    #[default]
    Png,
    /// Vector output via the plotters SVG backend
    Svg,
}

impl ChartFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

/// Configuration for a single analysis run.
///
/// Use [`AnalysisConfig::builder()`] to override individual settings.
///
/// # Example
///
/// ```rust,ignore
/// use netflix_eda::config::{AnalysisConfig, ChartFormat};
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/netflix_titles.csv")
///     .year_range(2010, 2020)
///     .chart_format(ChartFormat::Svg)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV file to analyse.
    /// Default: "netflix_movies.csv"
    pub input_path: PathBuf,

    /// Directory that receives the rendered charts.
    /// Default: "charts"
    pub output_dir: PathBuf,

    /// Inclusive release-year bounds for the trend chart.
    /// Default: (2000, 2020)
    pub year_range: (i64, i64),

    /// Value of the `type` column that marks a movie.
    /// Default: "Movie"
    pub movie_label: String,

    /// Image format for charts.
    /// Default: Png
    pub chart_format: ChartFormat,

    /// Chart size in pixels (width, height).
    /// Default: (1200, 600)
    pub chart_size: (u32, u32),

    /// Whether to render charts at all.
    /// Default: true
    pub render_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            year_range: DEFAULT_YEAR_RANGE,
            movie_label: DEFAULT_MOVIE_LABEL.to_string(),
            chart_format: ChartFormat::default(),
            chart_size: DEFAULT_CHART_SIZE,
            render_charts: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let (low, high) = self.year_range;
        if low > high {
            return Err(ConfigValidationError::InvalidYearRange { low, high });
        }

        let (width, height) = self.chart_size;
        if width == 0 || height == 0 {
            return Err(ConfigValidationError::InvalidChartSize { width, height });
        }

        if self.movie_label.trim().is_empty() {
            return Err(ConfigValidationError::EmptyMovieLabel);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid year range: {low} > {high}")]
    InvalidYearRange { low: i64, high: i64 },

    #[error("Invalid chart size: {width}x{height} (both dimensions must be non-zero)")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Movie label must not be empty")]
    EmptyMovieLabel,
}

impl From<ConfigValidationError> for crate::error::EdaError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::EdaError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    year_range: Option<(i64, i64)>,
    movie_label: Option<String>,
    chart_format: Option<ChartFormat>,
    chart_size: Option<(u32, u32)>,
    render_charts: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the CSV file to analyse.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory for rendered charts.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the inclusive release-year bounds.
    pub fn year_range(mut self, low: i64, high: i64) -> Self {
        self.year_range = Some((low, high));
        self
    }

    /// Set the `type` value that marks a movie.
    pub fn movie_label(mut self, label: impl Into<String>) -> Self {
        self.movie_label = Some(label.into());
        self
    }

    /// Set the chart image format.
    pub fn chart_format(mut self, format: ChartFormat) -> Self {
        self.chart_format = Some(format);
        self
    }

    /// Set the chart size in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_size = Some((width, height));
        self
    }

    /// Enable or disable chart rendering.
    ///
    /// Statistics are still computed and reported when disabled.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            year_range: self.year_range.unwrap_or(DEFAULT_YEAR_RANGE),
            movie_label: self
                .movie_label
                .unwrap_or_else(|| DEFAULT_MOVIE_LABEL.to_string()),
            chart_format: self.chart_format.unwrap_or_default(),
            chart_size: self.chart_size.unwrap_or(DEFAULT_CHART_SIZE),
            render_charts: self.render_charts.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("netflix_movies.csv"));
        assert_eq!(config.year_range, (2000, 2020));
        assert_eq!(config.movie_label, "Movie");
        assert_eq!(config.chart_format, ChartFormat::Png);
        assert!(config.render_charts);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = AnalysisConfig::builder().build().unwrap();
        let default = AnalysisConfig::default();
        assert_eq!(built.input_path, default.input_path);
        assert_eq!(built.output_dir, default.output_dir);
        assert_eq!(built.chart_size, default.chart_size);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .input_path("titles.csv")
            .output_dir("out")
            .year_range(1990, 1999)
            .chart_format(ChartFormat::Svg)
            .chart_size(800, 800)
            .render_charts(false)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("titles.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.year_range, (1990, 1999));
        assert_eq!(config.chart_format.extension(), "svg");
        assert_eq!(config.chart_size, (800, 800));
        assert!(!config.render_charts);
    }

    #[test]
    fn test_validation_reversed_year_range() {
        let result = AnalysisConfig::builder().year_range(2020, 2000).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidYearRange { low: 2020, high: 2000 }
        ));
    }

    #[test]
    fn test_validation_zero_chart_size() {
        let result = AnalysisConfig::builder().chart_size(0, 600).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidChartSize { .. }
        ));
    }

    #[test]
    fn test_validation_empty_movie_label() {
        let result = AnalysisConfig::builder().movie_label("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyMovieLabel
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.year_range, deserialized.year_range);
        assert_eq!(config.chart_format, deserialized.chart_format);
    }
}
