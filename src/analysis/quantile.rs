//! Order-up-to level estimation from rolling window sums.

use crate::error::AnalysisError;

/// Linear-interpolation quantile of `values` at probability `p`.
///
/// With sorted values `x[0..n]` and rank `h = p * (n - 1)`, returns
/// `x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])`. Other
/// quantile definitions (nearest rank, midpoint) give different order-up-to
/// levels, so this one is fixed.
///
/// # Errors
///
/// - `InvalidQuantile` if `p` is not strictly between 0 and 1
/// - `InsufficientData` if `values` is empty
/// - `MalformedInput` if any value is not finite
pub fn linear_quantile(values: &[f64], p: f64) -> Result<f64, AnalysisError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(AnalysisError::InvalidQuantile(p));
    }
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData {
            series: "quantile input".to_string(),
            len: 0,
            window: 1,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::malformed("quantile input contains non-finite values"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - h.floor();
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}
