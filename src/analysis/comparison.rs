//! Regional versus national warehouse configurations for one product.

use super::metrics::{MetricsRow, Mode, analyze_table};
use super::stats::DemandDiagnostics;
use crate::config::{CostRates, PolicyConfig};
use crate::demand::DemandTable;
use crate::error::AnalysisError;

/// Name of the summed row appended to regional reports.
pub const TOTAL: &str = "Total";

/// Metrics of one product under one warehouse configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationReport {
    pub product: String,
    pub mode: Mode,
    /// Exposure window in days used for the order-up-to level.
    pub window: usize,
    /// One row per region, or the single national row.
    pub rows: Vec<MetricsRow>,
    /// Column sums of `rows`; present for regional reports only.
    pub total: Option<MetricsRow>,
}

impl ConfigurationReport {
    /// Analyzes each region independently at regional rates and appends a
    /// [`TOTAL`] row.
    ///
    /// # Errors
    ///
    /// Fails if any region cannot be analyzed.
    pub fn regional(
        product: &str,
        table: &DemandTable,
        policy: &PolicyConfig,
        rates: &CostRates,
    ) -> Result<Self, AnalysisError> {
        let rows = analyze_table(table, policy, rates)?;
        let total = MetricsRow::summed(TOTAL, &rows);
        Ok(Self {
            product: product.to_string(),
            mode: Mode::Regional,
            window: policy.exposure_days(),
            rows,
            total: Some(total),
        })
    }

    /// Sums regional demand into one national series and analyzes it at
    /// national rates.
    ///
    /// # Errors
    ///
    /// Fails if the summed series cannot be analyzed.
    pub fn national(
        product: &str,
        table: &DemandTable,
        policy: &PolicyConfig,
        rates: &CostRates,
    ) -> Result<Self, AnalysisError> {
        let rows = analyze_table(&table.national(), policy, rates)?;
        Ok(Self {
            product: product.to_string(),
            mode: Mode::National,
            window: policy.exposure_days(),
            rows,
            total: None,
        })
    }

    /// Per-series rows followed by the total row, if any.
    pub fn all_rows(&self) -> impl Iterator<Item = &MetricsRow> {
        self.rows.iter().chain(self.total.as_ref())
    }

    /// Daily holding plus transportation cost of the whole configuration:
    /// the total row for regional reports, the single row for national ones.
    pub fn total_daily_cost(&self) -> f64 {
        match &self.total {
            Some(total) => total.total_daily_cost,
            None => self.rows.iter().map(|r| r.total_daily_cost).sum(),
        }
    }
}

/// Which configuration costs less for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// The national warehouse is strictly cheaper.
    Centralize,
    /// Regional warehouses cost the same or less.
    KeepRegional,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Centralize => "centralize",
            Self::KeepRegional => "keep regional",
        }
    }
}

/// Both configurations of one product plus its demand diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductComparison {
    pub product: String,
    pub regional: ConfigurationReport,
    pub national: ConfigurationReport,
    pub diagnostics: DemandDiagnostics,
}

impl ProductComparison {
    pub fn new(
        regional: ConfigurationReport,
        national: ConfigurationReport,
        diagnostics: DemandDiagnostics,
    ) -> Self {
        Self {
            product: regional.product.clone(),
            regional,
            national,
            diagnostics,
        }
    }

    pub fn regional_cost(&self) -> f64 {
        self.regional.total_daily_cost()
    }

    pub fn national_cost(&self) -> f64 {
        self.national.total_daily_cost()
    }

    /// Daily cost saved by centralizing; negative when regional is cheaper.
    pub fn savings(&self) -> f64 {
        self.regional_cost() - self.national_cost()
    }

    pub fn recommendation(&self) -> Recommendation {
        if self.national_cost() < self.regional_cost() {
            Recommendation::Centralize
        } else {
            Recommendation::KeepRegional
        }
    }
}
