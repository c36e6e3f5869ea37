//! Seeded demand generator with a tunable cross-region correlation.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::series::{DemandSeries, DemandTable};
use crate::config::SyntheticProductConfig;
use crate::error::AnalysisError;

/// Seeded generator of correlated regional demand for one product.
///
/// Each day draws one common Gaussian shock shared by all regions plus an
/// independent shock per region. With correlation `rho`, region `r` sees
///
/// `mean * (1 + cv * (sqrt(rho) * common + sqrt(1 - rho) * own_r))`
///
/// clamped at zero, so `rho` is the pairwise correlation of the unclamped
/// demand and `cv` its coefficient of variation.
#[derive(Debug, Clone)]
pub struct SyntheticDemand {
    /// Mean daily demand per region.
    pub mean: f64,
    /// Coefficient of variation of daily demand.
    pub cv: f64,
    /// Pairwise correlation between regions (0.0-1.0).
    pub correlation: f64,
    rng: StdRng,
}

impl SyntheticDemand {
    pub fn new(mean: f64, cv: f64, correlation: f64, seed: u64) -> Self {
        Self {
            mean,
            cv,
            correlation: correlation.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(cfg: &SyntheticProductConfig, seed: u64) -> Self {
        Self::new(cfg.mean, cfg.cv, cfg.correlation, seed)
    }

    /// Standard normal draw via Box-Muller.
    fn gaussian(&mut self) -> f64 {
        let u1: f64 = self.rng.random::<f64>().clamp(1e-12, 1.0);
        let u2: f64 = self.rng.random::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Generates `days` of demand for each of `regions`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `regions` is empty.
    pub fn table(&mut self, regions: &[String], days: usize) -> Result<DemandTable, AnalysisError> {
        let shared = self.correlation.sqrt();
        let own = (1.0 - self.correlation).sqrt();

        let mut columns = vec![Vec::with_capacity(days); regions.len()];
        for _ in 0..days {
            let common = self.gaussian();
            for col in &mut columns {
                let z = shared * common + own * self.gaussian();
                col.push((self.mean * (1.0 + self.cv * z)).max(0.0).round());
            }
        }

        let series = regions
            .iter()
            .zip(columns)
            .map(|(name, values)| DemandSeries::new(name.clone(), values))
            .collect::<Result<Vec<_>, _>>()?;
        DemandTable::new(series)
    }
}
