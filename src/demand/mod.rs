//! Daily demand input: series types, file loaders and the synthetic generator.

pub mod loader;
pub mod series;
pub mod synthetic;

use std::path::Path;

use tracing::info;

pub use series::{DemandSeries, DemandTable, NATIONAL};
pub use synthetic::SyntheticDemand;

use crate::config::ScenarioConfig;
use crate::error::AnalysisError;

/// Regional demand for one product, as loaded from a single sheet or file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDemand {
    pub name: String,
    pub table: DemandTable,
}

/// Loads every configured product from the scenario's data source.
///
/// # Errors
///
/// Propagates loader failures; see [`loader::load_workbook`] and
/// [`loader::load_csv_dir`].
pub fn load_products(cfg: &ScenarioConfig) -> Result<Vec<ProductDemand>, AnalysisError> {
    let data = &cfg.data;
    let products = match data.source.as_str() {
        "workbook" => loader::load_workbook(
            Path::new(&data.path),
            &data.products,
            &data.regions,
            data.horizon_days,
        )?,
        "csv" => loader::load_csv_dir(
            Path::new(&data.path),
            &data.products,
            &data.regions,
            data.horizon_days,
        )?,
        "synthetic" => synthesize(cfg)?,
        other => {
            return Err(AnalysisError::malformed(format!(
                "unknown data source \"{other}\""
            )));
        }
    };
    info!(
        source = %data.source,
        products = products.len(),
        days = products.first().map_or(0, |p| p.table.days()),
        "demand loaded"
    );
    Ok(products)
}

fn synthesize(cfg: &ScenarioConfig) -> Result<Vec<ProductDemand>, AnalysisError> {
    let syn = &cfg.synthetic;
    syn.products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut generator = SyntheticDemand::from_config(p, syn.seed.wrapping_add(i as u64));
            Ok(ProductDemand {
                name: p.name.clone(),
                table: generator.table(&cfg.data.regions, cfg.data.horizon_days)?,
            })
        })
        .collect()
}
