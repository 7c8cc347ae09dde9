//! CSV loading into a polars [`DataFrame`].

use crate::error::{EdaError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options controlling how the CSV file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Rows scanned for type inference; `None` scans the whole file.
    ///
    /// With a bound, a value past the scanned rows that does not fit the
    /// inferred type fails the load with [`EdaError::Parse`].
    pub infer_schema_length: Option<usize>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_length: None,
        }
    }
}

/// Load a titles CSV with default options.
///
/// Numeric columns come back as integer or float columns; everything else is
/// text. Returns [`EdaError::File`] when the file cannot be opened and
/// [`EdaError::Parse`] when its contents are not well-formed CSV.
pub fn load_titles(path: impl AsRef<Path>) -> Result<DataFrame> {
    load_titles_with(path, &LoaderOptions::default())
}

/// Load a titles CSV with explicit [`LoaderOptions`].
pub fn load_titles_with(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());

    ensure_readable(path)?;

    let parse_error = |e: PolarsError| EdaError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(options.separator)
                .with_quote_char(Some(b'"')),
        )
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    debug!("Dataset loaded: {:?}", df.shape());
    Ok(df)
}

/// Fail with [`EdaError::File`] unless `path` is a readable regular file.
fn ensure_readable(path: &Path) -> Result<()> {
    let file_error = |source: std::io::Error| EdaError::File {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(file_error)?;
    if metadata.is_dir() {
        return Err(file_error(std::io::Error::new(
            std::io::ErrorKind::IsADirectory,
            "path is a directory",
        )));
    }

    File::open(path).map_err(file_error)?;
    Ok(())
}
