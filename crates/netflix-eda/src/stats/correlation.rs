//! Pearson correlation matrices over named columns.

use super::moments::pearson;
use crate::error::Result;
use crate::utils::{numeric_options, require_column};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Symmetric matrix of pairwise Pearson coefficients.
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`;
/// undefined pairs are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pairwise Pearson correlation between the named numeric columns.
///
/// Each pair uses only the rows where both values are present. The diagonal
/// is exactly `1.0` unless the column has zero variance, in which case it is
/// NaN like any other undefined pair.
pub fn correlation<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<CorrelationMatrix> {
    let names: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
    let data = names
        .iter()
        .map(|name| numeric_options(require_column(df, name)?))
        .collect::<Result<Vec<_>>>()?;

    let n = names.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&data[i], &data[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
        if values[i][i].is_nan() {
            warn!("Column '{}' has no variance; its correlations are undefined", names[i]);
        }
    }

    debug!("Computed {}x{} correlation matrix", n, n);
    Ok(CorrelationMatrix {
        columns: names,
        values,
    })
}
