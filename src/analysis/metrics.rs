//! Periodic-review inventory metrics for one demand series.

use std::fmt;

use tracing::debug;

use super::quantile::linear_quantile;
use super::window::RollingWindow;
use crate::config::{CostRates, PolicyConfig};
use crate::demand::{DemandSeries, DemandTable};
use crate::error::AnalysisError;

/// Which warehouse configuration a set of rows describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One warehouse per region, each facing its own demand.
    Regional,
    /// A single warehouse facing the summed demand of every region.
    National,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regional => "regional",
            Self::National => "national",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory and cost figures for one series under a periodic-review policy.
///
/// Quantities are in demand units, costs are per day.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    /// Region name, `National`, or `Total`.
    pub name: String,
    /// Mean daily demand.
    pub avg_1day_demand: f64,
    /// Mean demand over one exposure window (review interval + lead time).
    pub avg_window_demand: f64,
    /// Order-up-to level: window-demand quantile at the cycle service level.
    pub order_up_to_level: f64,
    /// Mean daily demand times the review interval.
    pub avg_order_quantity: f64,
    /// Half the average order quantity.
    pub avg_cycle_stock: f64,
    /// Order-up-to level minus mean window demand; may be negative.
    pub avg_safety_stock: f64,
    /// Cycle stock plus safety stock.
    pub avg_inventory: f64,
    pub daily_holding_cost: f64,
    pub daily_transport_cost: f64,
    /// Holding plus transportation cost.
    pub total_daily_cost: f64,
}

impl MetricsRow {
    /// Computes every metric for `series` from its precomputed rolling window.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if the series or window column is empty
    /// - `InvalidQuantile` if the cycle service level is outside (0, 1)
    pub fn compute(
        series: &DemandSeries,
        window: &RollingWindow,
        policy: &PolicyConfig,
        rates: &CostRates,
    ) -> Result<Self, AnalysisError> {
        let insufficient = || AnalysisError::InsufficientData {
            series: series.name().to_string(),
            len: series.len(),
            window: window.window,
        };
        let avg_1day_demand = series.mean().ok_or_else(insufficient)?;
        let avg_window_demand = window.mean().ok_or_else(insufficient)?;
        let order_up_to_level = linear_quantile(&window.sums, policy.cycle_service_level)?;

        let avg_order_quantity = avg_1day_demand * policy.review_interval as f64;
        let avg_cycle_stock = avg_order_quantity / 2.0;
        let avg_safety_stock = order_up_to_level - avg_window_demand;
        let avg_inventory = avg_cycle_stock + avg_safety_stock;
        let daily_holding_cost = avg_inventory * policy.unit_hold_cost;
        let daily_transport_cost = avg_1day_demand * rates.per_unit();

        Ok(Self {
            name: series.name().to_string(),
            avg_1day_demand,
            avg_window_demand,
            order_up_to_level,
            avg_order_quantity,
            avg_cycle_stock,
            avg_safety_stock,
            avg_inventory,
            daily_holding_cost,
            daily_transport_cost,
            total_daily_cost: daily_holding_cost + daily_transport_cost,
        })
    }

    /// Column-wise sum of `rows` under a new name.
    ///
    /// Every column is summed, including the order-up-to level and window
    /// demand, even though a sum of quantiles is not itself a quantile.
    pub fn summed(name: impl Into<String>, rows: &[MetricsRow]) -> Self {
        let sum = |f: fn(&MetricsRow) -> f64| rows.iter().map(f).sum::<f64>();
        Self {
            name: name.into(),
            avg_1day_demand: sum(|r| r.avg_1day_demand),
            avg_window_demand: sum(|r| r.avg_window_demand),
            order_up_to_level: sum(|r| r.order_up_to_level),
            avg_order_quantity: sum(|r| r.avg_order_quantity),
            avg_cycle_stock: sum(|r| r.avg_cycle_stock),
            avg_safety_stock: sum(|r| r.avg_safety_stock),
            avg_inventory: sum(|r| r.avg_inventory),
            daily_holding_cost: sum(|r| r.daily_holding_cost),
            daily_transport_cost: sum(|r| r.daily_transport_cost),
            total_daily_cost: sum(|r| r.total_daily_cost),
        }
    }

    /// Numeric columns in report order.
    pub fn values(&self) -> [f64; 10] {
        [
            self.avg_1day_demand,
            self.avg_window_demand,
            self.order_up_to_level,
            self.avg_order_quantity,
            self.avg_cycle_stock,
            self.avg_safety_stock,
            self.avg_inventory,
            self.daily_holding_cost,
            self.daily_transport_cost,
            self.total_daily_cost,
        ]
    }
}

/// Report column labels, including the leading name column.
///
/// The window column is labelled after the exposure period, e.g.
/// `avg_11day_d` for a six-day review interval and five-day lead time.
pub fn column_labels(window: usize) -> [String; 11] {
    [
        "name".to_string(),
        "avg_1day_d".to_string(),
        format!("avg_{window}day_d"),
        "OUL".to_string(),
        "avg_order_q".to_string(),
        "avg_cycle_stock".to_string(),
        "avg_safety_stock".to_string(),
        "avg_inventory".to_string(),
        "daily_inv_hold_c".to_string(),
        "daily_transport_c".to_string(),
        "hold_trans_total".to_string(),
    ]
}

/// Metrics for every series of `table`, each processed independently.
///
/// # Errors
///
/// Fails on the first series that cannot be analyzed; no partial rows are
/// returned.
pub fn analyze_table(
    table: &DemandTable,
    policy: &PolicyConfig,
    rates: &CostRates,
) -> Result<Vec<MetricsRow>, AnalysisError> {
    let window = policy.exposure_days();
    table
        .series()
        .iter()
        .map(|series| {
            let rolling = RollingWindow::from_series(series, window)?;
            let row = MetricsRow::compute(series, &rolling, policy, rates)?;
            debug!(
                series = series.name(),
                window,
                oul = row.order_up_to_level,
                total_daily_cost = row.total_daily_cost,
                "series analyzed"
            );
            Ok(row)
        })
        .collect()
}
