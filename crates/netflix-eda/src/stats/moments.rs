//! Moment-based estimators over plain `f64` slices.
//!
//! Callers strip missing values first; none of these functions see nulls.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() as f64 - 1.0)).sqrt())
}

/// Quantile `q` in `[0, 1]` by linear interpolation between closest ranks.
///
/// `sorted` must be in ascending order.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Sorted copy of `values` (total order; callers have removed NaN).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Whether every value equals the first; such data has zero variance at any scale.
fn is_constant<'a>(mut values: impl Iterator<Item = &'a f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Sums of the 2nd, 3rd and 4th powers of deviations from the mean.
fn central_sums(values: &[f64]) -> Option<(f64, f64, f64)> {
    let m = mean(values)?;
    let mut s2 = 0.0;
    let mut s3 = 0.0;
    let mut s4 = 0.0;
    for v in values {
        let d = v - m;
        let d2 = d * d;
        s2 += d2;
        s3 += d2 * d;
        s4 += d2 * d2;
    }
    Some((s2, s3, s4))
}

/// Adjusted Fisher-Pearson skewness `G1`.
///
/// `None` below two values. Two values are always symmetric and constant
/// data has no asymmetry, so both give `0.0`.
pub fn sample_skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    if n == 2 {
        return Some(0.0);
    }

    if is_constant(values.iter()) {
        return Some(0.0);
    }
    let (s2, s3, _) = central_sums(values)?;

    let n = n as f64;
    Some(n * (n - 1.0).sqrt() / (n - 2.0) * s3 / s2.powf(1.5))
}

/// Unbiased excess kurtosis `G2` (normal distribution = 0).
///
/// `None` below four values; constant data gives `0.0`.
pub fn sample_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }

    if is_constant(values.iter()) {
        return Some(0.0);
    }
    let (s2, _, s4) = central_sums(values)?;

    let n = n as f64;
    let numerator = n * (n + 1.0) * (n - 1.0) * s4;
    let denominator = (n - 2.0) * (n - 3.0) * s2 * s2;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some(numerator / denominator - adjustment)
}

/// Pearson correlation over rows where both sides are present.
///
/// NaN when fewer than two rows pair up or either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2
        || is_constant(pairs.iter().map(|(a, _)| a))
        || is_constant(pairs.iter().map(|(_, b)| b))
    {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
