//! Periodic-review inventory analysis: rolling windows, order-up-to levels,
//! per-series metrics and the regional/national comparison.

pub mod comparison;
pub mod metrics;
pub mod quantile;
/// Demand variability and correlation diagnostics.
pub mod stats;
pub mod window;

pub use comparison::{ConfigurationReport, ProductComparison, Recommendation, TOTAL};
pub use metrics::{MetricsRow, Mode, analyze_table, column_labels};
pub use quantile::linear_quantile;
pub use stats::DemandDiagnostics;
pub use window::{RollingWindow, rolling_sums};
