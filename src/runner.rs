//! Orchestrates the regional and national analysis of every product.

use tracing::{error, info};

use crate::analysis::{ConfigurationReport, DemandDiagnostics, Mode, ProductComparison};
use crate::config::ScenarioConfig;
use crate::demand::ProductDemand;
use crate::error::AnalysisError;

/// Both runs for one product. Each run succeeds or fails on its own.
#[derive(Debug)]
pub struct ProductOutcome {
    pub product: String,
    pub regional: Result<ConfigurationReport, AnalysisError>,
    pub national: Result<ConfigurationReport, AnalysisError>,
    pub diagnostics: DemandDiagnostics,
}

impl ProductOutcome {
    /// The cost comparison, available only when both runs succeeded.
    pub fn comparison(&self) -> Option<ProductComparison> {
        match (&self.regional, &self.national) {
            (Ok(r), Ok(n)) => Some(ProductComparison::new(
                r.clone(),
                n.clone(),
                self.diagnostics.clone(),
            )),
            _ => None,
        }
    }

    /// Successful reports, regional first.
    pub fn reports(&self) -> impl Iterator<Item = &ConfigurationReport> {
        self.regional.as_ref().ok().into_iter().chain(self.national.as_ref().ok())
    }
}

/// Outcome of analyzing every loaded product.
#[derive(Debug)]
pub struct AnalysisRun {
    /// Exposure window shared by every run.
    pub window: usize,
    pub outcomes: Vec<ProductOutcome>,
}

impl AnalysisRun {
    pub fn comparisons(&self) -> Vec<ProductComparison> {
        self.outcomes.iter().filter_map(ProductOutcome::comparison).collect()
    }

    /// Every failed run as `(product, mode, error)`.
    pub fn failures(&self) -> Vec<(&str, Mode, &AnalysisError)> {
        let mut failed = Vec::new();
        for o in &self.outcomes {
            if let Err(e) = &o.regional {
                failed.push((o.product.as_str(), Mode::Regional, e));
            }
            if let Err(e) = &o.national {
                failed.push((o.product.as_str(), Mode::National, e));
            }
        }
        failed
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}

/// Runs the regional and national analysis for one product.
pub fn analyze_product(product: &ProductDemand, cfg: &ScenarioConfig) -> ProductOutcome {
    let regional =
        ConfigurationReport::regional(&product.name, &product.table, &cfg.policy, &cfg.regional);
    log_run(&product.name, Mode::Regional, &regional);

    let national =
        ConfigurationReport::national(&product.name, &product.table, &cfg.policy, &cfg.national);
    log_run(&product.name, Mode::National, &national);

    ProductOutcome {
        product: product.name.clone(),
        regional,
        national,
        diagnostics: DemandDiagnostics::from_table(&product.table),
    }
}

/// Runs every product in order. Runs share no state.
pub fn run_analysis(products: &[ProductDemand], cfg: &ScenarioConfig) -> AnalysisRun {
    AnalysisRun {
        window: cfg.policy.exposure_days(),
        outcomes: products.iter().map(|p| analyze_product(p, cfg)).collect(),
    }
}

fn log_run(product: &str, mode: Mode, result: &Result<ConfigurationReport, AnalysisError>) {
    match result {
        Ok(report) => info!(
            product,
            mode = mode.as_str(),
            rows = report.rows.len(),
            total_daily_cost = report.total_daily_cost(),
            "run complete"
        ),
        Err(e) => error!(product, mode = mode.as_str(), error = %e, "run failed"),
    }
}
