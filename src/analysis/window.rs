//! Rolling sums of daily demand over the exposure period.

use crate::demand::DemandSeries;
use crate::error::AnalysisError;

/// Demand summed over every overlapping window of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    pub name: String,
    /// Window length in days.
    pub window: usize,
    /// Entry `i` is the sum of days `i..i + window`.
    pub sums: Vec<f64>,
}

impl RollingWindow {
    /// Computes all `len - window + 1` window sums using prefix sums.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the window is zero or longer than the
    /// series, since no full window can be formed.
    pub fn from_series(series: &DemandSeries, window: usize) -> Result<Self, AnalysisError> {
        let sums = rolling_sums(series.values(), window).ok_or_else(|| {
            AnalysisError::InsufficientData {
                series: series.name().to_string(),
                len: series.len(),
                window,
            }
        })?;
        Ok(Self {
            name: series.name().to_string(),
            window,
            sums,
        })
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Mean window demand.
    pub fn mean(&self) -> Option<f64> {
        crate::demand::series::mean(&self.sums)
    }
}

/// Sum of every `window`-length run of `values`, or `None` when no full
/// window fits.
pub fn rolling_sums(values: &[f64], window: usize) -> Option<Vec<f64>> {
    if window == 0 || values.len() < window {
        return None;
    }
    let mut prefix = Vec::with_capacity(values.len() + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for v in values {
        acc += v;
        prefix.push(acc);
    }
    Some(
        (0..=values.len() - window)
            .map(|i| prefix[i + window] - prefix[i])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_series_windows() {
        let sums = rolling_sums(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(sums, Some(vec![6.0, 9.0, 12.0]));
    }

    #[test]
    fn window_count_and_entries_match_brute_force() {
        let values: Vec<f64> = (0..365_i32).map(|d| f64::from((d * 37 + 11) % 53)).collect();
        let window = 11;
        let sums = rolling_sums(&values, window).expect("enough data");
        assert_eq!(sums.len(), 365 - window + 1);
        for (i, s) in sums.iter().enumerate() {
            let direct: f64 = values[i..i + window].iter().sum();
            assert!((s - direct).abs() < 1e-9, "window {i}: {s} vs {direct}");
        }
    }

    #[test]
    fn window_equal_to_length_gives_single_sum() {
        assert_eq!(rolling_sums(&[2.0, 3.0, 4.0], 3), Some(vec![9.0]));
    }

    #[test]
    fn short_series_is_insufficient() {
        let series = DemandSeries::constant("Region1", 1.0, 10).expect("constant series");
        let err = RollingWindow::from_series(&series, 11);
        match err {
            Err(AnalysisError::InsufficientData { series, len, window }) => {
                assert_eq!(series, "Region1");
                assert_eq!(len, 10);
                assert_eq!(window, 11);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn zero_window_is_insufficient() {
        assert_eq!(rolling_sums(&[1.0], 0), None);
    }

    #[test]
    fn constant_series_windows_are_constant() {
        let series = DemandSeries::constant("Region1", 10.0, 365).expect("constant series");
        let rw = RollingWindow::from_series(&series, 11).expect("window");
        assert_eq!(rw.len(), 355);
        assert!(rw.sums.iter().all(|&s| s == 110.0));
        assert_eq!(rw.mean(), Some(110.0));
    }
}
