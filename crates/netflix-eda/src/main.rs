//! CLI entry point for the Netflix titles analysis.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use netflix_eda::config::{DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, DEFAULT_YEAR_RANGE};
use netflix_eda::{AnalysisConfig, AnalysisOutcome, ChartFormat, analysis};
use tracing::{error, info};

/// CLI-compatible chart format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliChartFormat {
    /// Raster images
    Png,
    /// Vector images
    Svg,
}

impl From<CliChartFormat> for ChartFormat {
    fn from(cli: CliChartFormat) -> Self {
        match cli {
            CliChartFormat::Png => ChartFormat::Png,
            CliChartFormat::Svg => ChartFormat::Svg,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis of Netflix titles",
    long_about = "Computes summary statistics, correlation, kurtosis and skewness of a \
                  Netflix titles CSV and renders four charts.\n\n\
                  EXAMPLES:\n  \
                  # Analyse netflix_movies.csv in the current directory\n  \
                  netflix-eda\n\n  \
                  # Different input, SVG charts into out/\n  \
                  netflix-eda -i titles.csv -o out --format svg\n\n  \
                  # Statistics only, as JSON\n  \
                  netflix-eda --no-charts --json"
)]
struct Args {
    /// Path to the titles CSV file
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: String,

    /// Directory the charts are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: String,

    /// First release year of the trend chart (inclusive)
    #[arg(long, default_value_t = DEFAULT_YEAR_RANGE.0)]
    year_from: i64,

    /// Last release year of the trend chart (inclusive)
    #[arg(long, default_value_t = DEFAULT_YEAR_RANGE.1)]
    year_to: i64,

    /// Image format of the charts
    #[arg(long, value_enum, default_value = "png")]
    format: CliChartFormat,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// Output the report as JSON instead of text
    ///
    /// Disables all logs; only the JSON report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr. When `json_output` is true, logging is disabled.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the run configuration from the command line.
fn build_config(args: &Args) -> netflix_eda::EdaResult<AnalysisConfig> {
    Ok(AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output_dir)
        .year_range(args.year_from, args.year_to)
        .chart_format(args.format.into())
        .render_charts(!args.no_charts)
        .build()?)
}

/// Configure and run; every failure comes back as an `EdaError`.
fn execute(args: &Args) -> netflix_eda::EdaResult<AnalysisOutcome> {
    let config = build_config(args)?;
    info!("Analysing {}", args.input);
    analysis::run(&config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let outcome = match execute(&args) {
        Ok(outcome) => outcome,
        Err(e) if args.json => {
            eprintln!("{}", serde_json::to_string_pretty(&e)?);
            std::process::exit(1);
        }
        Err(e) => {
            error!("Analysis failed [{}]", e.error_code());
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", outcome.to_report(&args.input).to_json()?);
    } else {
        println!("{}", outcome.statistics);
        for path in &outcome.rendered {
            info!("Chart saved: {}", path.display());
        }
    }

    Ok(())
}
