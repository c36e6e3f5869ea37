//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Periodic-review policy parameters.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Transportation rates when every region runs its own warehouse.
    #[serde(default = "CostRates::regional", deserialize_with = "regional_rates")]
    pub regional: CostRates,
    /// Transportation rates when one national warehouse serves all regions.
    #[serde(default = "CostRates::national", deserialize_with = "national_rates")]
    pub national: CostRates,
    /// Where daily demand comes from.
    #[serde(default)]
    pub data: DataConfig,
    /// Generator settings used when `data.source = "synthetic"`.
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

/// Periodic-review policy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Days between successive orders (must be > 0).
    pub review_interval: usize,
    /// Days between placing and receiving an order.
    pub lead_time: usize,
    /// Probability that demand over the exposure period is covered (0-1, exclusive).
    pub cycle_service_level: f64,
    /// Holding cost per unit per day.
    pub unit_hold_cost: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            review_interval: 6,
            lead_time: 5,
            cycle_service_level: 0.95,
            unit_hold_cost: 0.15,
        }
    }
}

impl PolicyConfig {
    /// Days of demand an order-up-to level must cover: review interval plus
    /// lead time. This is the rolling-window size.
    pub fn exposure_days(&self) -> usize {
        self.review_interval + self.lead_time
    }
}

/// Per-unit transportation rates for one warehouse configuration.
///
/// The two configurations have different defaults, so a partial TOML table
/// is filled in from the defaults of the section it appears in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    /// Inbound cost per unit.
    pub inbound_cost: f64,
    /// Outbound cost per unit.
    pub outbound_cost: f64,
}

impl CostRates {
    pub fn regional() -> Self {
        Self {
            inbound_cost: 0.09,
            outbound_cost: 0.10,
        }
    }

    pub fn national() -> Self {
        Self {
            inbound_cost: 0.05,
            outbound_cost: 0.24,
        }
    }

    /// Inbound plus outbound cost per unit.
    pub fn per_unit(&self) -> f64 {
        self.inbound_cost + self.outbound_cost
    }
}

/// A `[regional]` or `[national]` table as written, before defaults apply.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RatesTable {
    inbound_cost: Option<f64>,
    outbound_cost: Option<f64>,
}

impl RatesTable {
    fn over(self, defaults: CostRates) -> CostRates {
        CostRates {
            inbound_cost: self.inbound_cost.unwrap_or(defaults.inbound_cost),
            outbound_cost: self.outbound_cost.unwrap_or(defaults.outbound_cost),
        }
    }
}

fn regional_rates<'de, D: Deserializer<'de>>(d: D) -> Result<CostRates, D::Error> {
    RatesTable::deserialize(d).map(|t| t.over(CostRates::regional()))
}

fn national_rates<'de, D: Deserializer<'de>>(d: D) -> Result<CostRates, D::Error> {
    RatesTable::deserialize(d).map(|t| t.over(CostRates::national()))
}

/// Longest accepted analysis horizon, one century of daily rows.
pub const MAX_HORIZON_DAYS: usize = 36_500;

/// Demand source and table layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// `"workbook"` (xlsx), `"csv"` (directory of `<product>.csv`) or `"synthetic"`.
    pub source: String,
    /// Workbook file or CSV directory. Ignored for synthetic data.
    pub path: String,
    /// Sheet or file names, one per product.
    pub products: Vec<String>,
    /// Region column headers.
    pub regions: Vec<String>,
    /// Number of leading days used from each table.
    pub horizon_days: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "workbook".to_string(),
            path: "product_demand.xlsx".to_string(),
            products: (1..=3).map(|i| format!("Product{i}")).collect(),
            regions: (1..=4).map(|i| format!("Region{i}")).collect(),
            horizon_days: 365,
        }
    }
}

/// Synthetic demand generator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    /// Master random seed; product `i` uses `seed + i`.
    pub seed: u64,
    /// One entry per generated product.
    pub products: Vec<SyntheticProductConfig>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            products: vec![
                SyntheticProductConfig::new("Product1", 150.0, 0.08, 0.2),
                SyntheticProductConfig::new("Product2", 40.0, 1.0, 0.0),
                SyntheticProductConfig::new("Product3", 60.0, 0.6, 0.9),
            ],
        }
    }
}

/// Demand shape of one synthetic product.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntheticProductConfig {
    pub name: String,
    /// Mean daily demand per region.
    pub mean: f64,
    /// Coefficient of variation of daily demand.
    pub cv: f64,
    /// Pairwise correlation between regions (0.0-1.0).
    #[serde(default)]
    pub correlation: f64,
}

impl SyntheticProductConfig {
    pub fn new(name: &str, mean: f64, cv: f64, correlation: f64) -> Self {
        Self {
            name: name.to_string(),
            mean,
            cv,
            correlation,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"policy.review_interval"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the reference policy and rates, reading
    /// `product_demand.xlsx` from the working directory.
    pub fn baseline() -> Self {
        Self {
            policy: PolicyConfig::default(),
            regional: CostRates::regional(),
            national: CostRates::national(),
            data: DataConfig::default(),
            synthetic: SyntheticConfig::default(),
        }
    }

    /// Returns the demo preset: baseline policy on seeded synthetic demand.
    pub fn demo() -> Self {
        Self {
            data: DataConfig {
                source: "synthetic".to_string(),
                path: String::new(),
                ..DataConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the high-service preset: demo data at a 99% cycle service level.
    pub fn high_service() -> Self {
        let demo = Self::demo();
        Self {
            policy: PolicyConfig {
                cycle_service_level: 0.99,
                ..demo.policy.clone()
            },
            ..demo
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "demo", "high_service"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "demo" => Ok(Self::demo()),
            "high_service" => Ok(Self::high_service()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.policy;

        if p.review_interval == 0 {
            errors.push(ConfigError {
                field: "policy.review_interval".into(),
                message: "must be > 0".into(),
            });
        }
        if !(p.cycle_service_level > 0.0 && p.cycle_service_level < 1.0) {
            errors.push(ConfigError {
                field: "policy.cycle_service_level".into(),
                message: format!("must be in (0.0, 1.0), got {}", p.cycle_service_level),
            });
        }
        if !(p.unit_hold_cost >= 0.0) {
            errors.push(ConfigError {
                field: "policy.unit_hold_cost".into(),
                message: "must be >= 0".into(),
            });
        }

        for (field, rates) in [("regional", &self.regional), ("national", &self.national)] {
            if !(rates.inbound_cost >= 0.0) {
                errors.push(ConfigError {
                    field: format!("{field}.inbound_cost"),
                    message: "must be >= 0".into(),
                });
            }
            if !(rates.outbound_cost >= 0.0) {
                errors.push(ConfigError {
                    field: format!("{field}.outbound_cost"),
                    message: "must be >= 0".into(),
                });
            }
        }

        let d = &self.data;
        if !matches!(d.source.as_str(), "workbook" | "csv" | "synthetic") {
            errors.push(ConfigError {
                field: "data.source".into(),
                message: format!(
                    "must be \"workbook\", \"csv\" or \"synthetic\", got \"{}\"",
                    d.source
                ),
            });
        }
        if matches!(d.source.as_str(), "workbook" | "csv") {
            if d.path.is_empty() {
                errors.push(ConfigError {
                    field: "data.path".into(),
                    message: format!("required for source \"{}\"", d.source),
                });
            }
            if d.products.is_empty() {
                errors.push(ConfigError {
                    field: "data.products".into(),
                    message: "must name at least one product".into(),
                });
            }
        }
        if d.regions.is_empty() {
            errors.push(ConfigError {
                field: "data.regions".into(),
                message: "must name at least one region".into(),
            });
        }
        if d.horizon_days > MAX_HORIZON_DAYS {
            errors.push(ConfigError {
                field: "data.horizon_days".into(),
                message: format!("must be <= {MAX_HORIZON_DAYS}"),
            });
        }
        if d.horizon_days < p.exposure_days() {
            errors.push(ConfigError {
                field: "data.horizon_days".into(),
                message: format!(
                    "must be >= policy.review_interval + policy.lead_time ({})",
                    p.exposure_days()
                ),
            });
        }

        if d.source == "synthetic" {
            let s = &self.synthetic;
            if s.products.is_empty() {
                errors.push(ConfigError {
                    field: "synthetic.products".into(),
                    message: "must define at least one product".into(),
                });
            }
            for (i, prod) in s.products.iter().enumerate() {
                if !(prod.mean >= 0.0) {
                    errors.push(ConfigError {
                        field: format!("synthetic.products[{i}].mean"),
                        message: "must be >= 0".into(),
                    });
                }
                if !(prod.cv >= 0.0) {
                    errors.push(ConfigError {
                        field: format!("synthetic.products[{i}].cv"),
                        message: "must be >= 0".into(),
                    });
                }
                if !(0.0..=1.0).contains(&prod.correlation) {
                    errors.push(ConfigError {
                        field: format!("synthetic.products[{i}].correlation"),
                        message: "must be in [0.0, 1.0]".into(),
                    });
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_reference_policy() {
        let cfg = ScenarioConfig::baseline();
        assert_eq!(cfg.policy.review_interval, 6);
        assert_eq!(cfg.policy.lead_time, 5);
        assert_eq!(cfg.policy.exposure_days(), 11);
        assert_eq!(cfg.policy.cycle_service_level, 0.95);
        assert_eq!(cfg.policy.unit_hold_cost, 0.15);
        assert_eq!(cfg.regional, CostRates::regional());
        assert_eq!(cfg.national, CostRates::national());
        assert_eq!(cfg.data.horizon_days, 365);
    }

    #[test]
    fn exposure_follows_policy() {
        let policy = PolicyConfig {
            review_interval: 7,
            lead_time: 3,
            ..PolicyConfig::default()
        };
        assert_eq!(policy.exposure_days(), 10);
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn high_service_raises_service_level() {
        let demo = ScenarioConfig::demo();
        let high = ScenarioConfig::high_service();
        assert!(high.policy.cycle_service_level > demo.policy.cycle_service_level);
        assert_eq!(high.data.source, "synthetic");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[policy]
review_interval = 7
lead_time = 3
cycle_service_level = 0.9
unit_hold_cost = 0.2

[regional]
inbound_cost = 0.1
outbound_cost = 0.1

[national]
inbound_cost = 0.04
outbound_cost = 0.3

[data]
source = "csv"
path = "demand/"
products = ["A", "B"]
regions = ["North", "South"]
horizon_days = 100
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.policy.exposure_days()), Some(10));
        assert_eq!(cfg.as_ref().map(|c| c.national.outbound_cost), Some(0.3));
        assert_eq!(cfg.as_ref().map(|c| c.data.regions.len()), Some(2));
        assert_eq!(cfg.as_ref().map(|c| &*c.data.source), Some("csv"));
    }

    #[test]
    fn synthetic_products_parse() {
        let toml = r#"
[data]
source = "synthetic"

[synthetic]
seed = 7

[[synthetic.products]]
name = "Widget"
mean = 20.0
cv = 0.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        let products = cfg.as_ref().map(|c| c.synthetic.products.len());
        assert_eq!(products, Some(1));
        assert_eq!(
            cfg.as_ref().map(|c| c.synthetic.products[0].correlation),
            Some(0.0)
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[policy]
review_interval = 6
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[policy]
cycle_service_level = 0.9
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.policy.cycle_service_level), Some(0.9));
        assert_eq!(cfg.as_ref().map(|c| c.policy.review_interval), Some(6));
        assert_eq!(cfg.as_ref().map(|c| c.national), Some(CostRates::national()));
    }

    #[test]
    fn validation_catches_service_level_bounds() {
        for bad in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
            let mut cfg = ScenarioConfig::baseline();
            cfg.policy.cycle_service_level = bad;
            let errors = cfg.validate();
            assert!(
                errors.iter().any(|e| e.field == "policy.cycle_service_level"),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn validation_catches_zero_review_interval() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.policy.review_interval = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "policy.review_interval"));
    }

    #[test]
    fn validation_catches_short_horizon() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.data.horizon_days = 10;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "data.horizon_days"));
    }

    #[test]
    fn validation_catches_oversized_horizon() {
        let mut cfg = ScenarioConfig::demo();
        cfg.data.horizon_days = 1 << 50;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "data.horizon_days" && e.message.contains("<="))
        );

        cfg.data.horizon_days = MAX_HORIZON_DAYS;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_rates_table_keeps_section_defaults() {
        let toml = r#"
[regional]
inbound_cost = 0.5

[national]
outbound_cost = 0.3
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("partial rates parse");
        assert_eq!(cfg.regional.inbound_cost, 0.5);
        assert_eq!(cfg.regional.outbound_cost, CostRates::regional().outbound_cost);
        assert_eq!(cfg.national.inbound_cost, CostRates::national().inbound_cost);
        assert_eq!(cfg.national.outbound_cost, 0.3);
    }

    #[test]
    fn rates_table_rejects_unknown_field() {
        let toml = r#"
[regional]
inbound = 0.5
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_bad_source() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.data.source = "parquet".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "data.source"));
    }

    #[test]
    fn validation_catches_negative_rates() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.national.outbound_cost = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "national.outbound_cost"));
    }

    #[test]
    fn validation_catches_bad_synthetic_correlation() {
        let mut cfg = ScenarioConfig::demo();
        cfg.synthetic.products[0].correlation = 1.5;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "synthetic.products[0].correlation")
        );
    }
}
