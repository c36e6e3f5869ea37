//! Demand variability and cross-region correlation diagnostics.
//!
//! Pooling demand in one national warehouse pays off when regional demand
//! is volatile and weakly correlated; these figures make that visible next
//! to the cost comparison.

use crate::demand::series::mean;
use crate::demand::{DemandSeries, DemandTable};
use crate::error::AnalysisError;

/// Sample standard deviation (n - 1 denominator), `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Sample standard deviation divided by the mean.
///
/// # Errors
///
/// - `InsufficientData` for fewer than two observations
/// - `MalformedInput` when mean demand is zero
pub fn coefficient_of_variation(series: &DemandSeries) -> Result<f64, AnalysisError> {
    let sd = sample_std_dev(series.values()).ok_or_else(|| AnalysisError::InsufficientData {
        series: series.name().to_string(),
        len: series.len(),
        window: 2,
    })?;
    let m = series.mean().unwrap_or(0.0);
    if m == 0.0 {
        return Err(AnalysisError::malformed(format!(
            "series `{}` has zero mean demand",
            series.name()
        )));
    }
    Ok(sd / m)
}

/// Pearson correlation of two equal-length slices.
///
/// Returns `NaN` when either side has zero variance or fewer than two values.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let (ma, mb) = (mean(a).unwrap_or(0.0), mean(b).unwrap_or(0.0));
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }
    if va == 0.0 || vb == 0.0 {
        return f64::NAN;
    }
    cov / (va.sqrt() * vb.sqrt())
}

/// Pairwise correlation matrix of the table's series, in table order.
/// The diagonal is always 1.0.
pub fn correlation_matrix(table: &DemandTable) -> Vec<Vec<f64>> {
    let series = table.series();
    (0..series.len())
        .map(|i| {
            (0..series.len())
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        pearson(series[i].values(), series[j].values())
                    }
                })
                .collect()
        })
        .collect()
}

/// Variability diagnostics for one product's regional demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandDiagnostics {
    /// Series names, in table order.
    pub names: Vec<String>,
    /// Coefficient of variation per series; `None` when undefined (zero mean).
    pub cv: Vec<Option<f64>>,
    /// Pairwise Pearson correlation.
    pub correlation: Vec<Vec<f64>>,
}

impl DemandDiagnostics {
    pub fn from_table(table: &DemandTable) -> Self {
        Self {
            names: table.names().map(str::to_string).collect(),
            cv: table
                .series()
                .iter()
                .map(|s| coefficient_of_variation(s).ok())
                .collect(),
            correlation: correlation_matrix(table),
        }
    }

    /// Mean of the off-diagonal correlations, ignoring undefined entries.
    pub fn mean_correlation(&self) -> Option<f64> {
        let off: Vec<f64> = self
            .correlation
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |(j, v)| *j != i && v.is_finite())
                    .map(|(_, v)| *v)
            })
            .collect();
        mean(&off)
    }
}
