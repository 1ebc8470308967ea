/// Pearson correlation coefficient using the raw-score formula.
///
/// Returns `0.0` for empty input and when either sequence has zero variance.
/// The result is not clamped, so rounding can land marginally outside `[-1, 1]`.
///
/// # Examples
/// ```
/// use methylome::pearson_correlation;
///
/// let r = pearson_correlation(&[0.5, 1.0], &[0.5, 1.0]);
/// assert_eq!(r, 1.0);
/// assert_eq!(pearson_correlation(&[], &[]), 0.0);
/// ```
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "Sequences must be of equal length");

    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_x_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_y_sq: f64 = y.iter().map(|yi| yi * yi).sum();
    let psum: f64 = x.iter().zip(y).map(|(xi, yi)| xi * yi).sum();

    let numerator = psum - (sum_x * sum_y / n);
    let denominator =
        ((sum_x_sq - sum_x.powi(2) / n) * (sum_y_sq - sum_y.powi(2) / n)).sqrt();

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}
