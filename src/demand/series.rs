//! Daily demand series and the tables that group them.

use crate::error::AnalysisError;

/// Series name used for the nationally-summed demand.
pub const NATIONAL: &str = "National";

/// Daily demand for one region of one product, or a national sum.
///
/// Values are validated on construction (finite, non-negative) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandSeries {
    name: String,
    values: Vec<f64>,
}

impl DemandSeries {
    /// Creates a named series from daily values.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if any value is negative, NaN or infinite.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self, AnalysisError> {
        let name = name.into();
        if let Some((day, v)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(AnalysisError::malformed(format!(
                "series `{name}` has invalid demand {v} on day {day}"
            )));
        }
        Ok(Self { name, values })
    }

    /// A series repeating `value` for `days` days.
    ///
    /// # Errors
    ///
    /// Same as [`DemandSeries::new`].
    pub fn constant(
        name: impl Into<String>,
        value: f64,
        days: usize,
    ) -> Result<Self, AnalysisError> {
        Self::new(name, vec![value; days])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean, or `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        mean(&self.values)
    }
}

/// Arithmetic mean of a slice, `None` when empty.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Equal-length demand series sharing a common day index.
///
/// Series keep their load order, which is also the row order of every report
/// derived from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandTable {
    series: Vec<DemandSeries>,
}

impl DemandTable {
    /// Groups series into a table.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the table is empty, names repeat, or the
    /// series differ in length.
    pub fn new(series: Vec<DemandSeries>) -> Result<Self, AnalysisError> {
        let Some(first) = series.first() else {
            return Err(AnalysisError::malformed("demand table has no series"));
        };
        let days = first.len();
        for (i, s) in series.iter().enumerate() {
            if s.len() != days {
                return Err(AnalysisError::malformed(format!(
                    "series `{}` has {} days, expected {days}",
                    s.name(),
                    s.len()
                )));
            }
            if series[..i].iter().any(|other| other.name() == s.name()) {
                return Err(AnalysisError::malformed(format!(
                    "duplicate series name `{}`",
                    s.name()
                )));
            }
        }
        Ok(Self { series })
    }

    pub fn series(&self) -> &[DemandSeries] {
        &self.series
    }

    pub fn get(&self, name: &str) -> Option<&DemandSeries> {
        self.series.iter().find(|s| s.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(DemandSeries::name)
    }

    /// Number of days shared by every series.
    pub fn days(&self) -> usize {
        self.series.first().map_or(0, DemandSeries::len)
    }

    /// Number of series.
    pub fn width(&self) -> usize {
        self.series.len()
    }

    /// Sums every series day by day into a single [`NATIONAL`] series.
    pub fn national(&self) -> DemandTable {
        let mut total = vec![0.0; self.days()];
        for s in &self.series {
            for (acc, v) in total.iter_mut().zip(s.values()) {
                *acc += v;
            }
        }
        DemandTable {
            series: vec![DemandSeries {
                name: NATIONAL.to_string(),
                values: total,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_regions(value: f64, days: usize) -> DemandTable {
        let series = (1..=4)
            .map(|r| {
                DemandSeries::constant(format!("Region{r}"), value, days).expect("constant series")
            })
            .collect();
        DemandTable::new(series).expect("equal-length series")
    }

    #[test]
    fn national_sums_regions() {
        let table = constant_regions(10.0, 365);
        let national = table.national();
        assert_eq!(national.width(), 1);
        assert_eq!(national.days(), 365);
        let series = national.get(NATIONAL).expect("national series");
        assert!(series.values().iter().all(|&v| v == 40.0));
        assert_eq!(series.mean(), Some(40.0));
    }

    #[test]
    fn rejects_negative_and_nan() {
        assert!(DemandSeries::new("Region1", vec![1.0, -2.0]).is_err());
        assert!(DemandSeries::new("Region1", vec![1.0, f64::NAN]).is_err());
        assert!(DemandSeries::new("Region1", vec![0.0, 3.5]).is_ok());
    }

    #[test]
    fn rejects_unequal_lengths() {
        let err = DemandTable::new(vec![
            DemandSeries::constant("Region1", 1.0, 10).expect("constant series"),
            DemandSeries::constant("Region2", 1.0, 9).expect("constant series"),
        ]);
        assert!(matches!(err, Err(AnalysisError::MalformedInput(_))));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = DemandTable::new(vec![
            DemandSeries::constant("Region1", 1.0, 10).expect("constant series"),
            DemandSeries::constant("Region1", 2.0, 10).expect("constant series"),
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn rejects_empty_table() {
        assert!(DemandTable::new(Vec::new()).is_err());
    }

    #[test]
    fn constant_rejects_invalid_values() {
        assert!(DemandSeries::constant("x", f64::INFINITY, 3).is_err());
        assert!(DemandSeries::constant("x", f64::NAN, 3).is_err());
        assert!(DemandSeries::constant("x", -1.0, 3).is_err());
        assert!(DemandSeries::constant("x", 0.0, 3).is_ok());
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(DemandSeries::constant("x", 1.0, 0).expect("constant series").mean(), None);
    }
}
