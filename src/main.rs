//! dc-inventory entry point: CLI wiring and config-driven analysis.

use std::path::Path;
use std::process;

use tracing::info;

use dc_inventory::cli::{self, CliOptions};
use dc_inventory::config::ScenarioConfig;
use dc_inventory::demand::load_products;
use dc_inventory::io::export::export_csv;
use dc_inventory::logging;
use dc_inventory::reporting::CostSummary;
use dc_inventory::runner::run_analysis;

/// Exit code when at least one product/mode run failed.
const EXIT_RUN_FAILED: i32 = 2;

fn load_scenario(opts: &CliOptions) -> Result<ScenarioConfig, String> {
    // --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = opts.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = opts.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::baseline()
    };
    opts.apply(&mut scenario);

    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err(errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"));
    }
    Ok(scenario)
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    logging::init(opts.verbosity);

    let scenario = match load_scenario(&opts) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    info!(
        window = scenario.policy.exposure_days(),
        service_level = scenario.policy.cycle_service_level,
        "scenario loaded"
    );

    let products = match load_products(&scenario) {
        Ok(products) => products,
        Err(e) => {
            eprintln!("error: failed to load demand: {e}");
            process::exit(1);
        }
    };

    let run = run_analysis(&products, &scenario);

    for outcome in &run.outcomes {
        for report in outcome.reports() {
            println!("{report}");
        }
        println!("--- {} demand variability ---", outcome.product);
        println!("{}", outcome.diagnostics);
    }

    let comparisons = run.comparisons();
    print!(
        "{}",
        CostSummary {
            comparisons: &comparisons
        }
    );

    if let Some(ref path) = opts.export {
        if let Err(e) = export_csv(&run, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Metrics written to {}", path.display());
    }

    let failures = run.failures();
    if !failures.is_empty() {
        for (product, mode, e) in &failures {
            eprintln!("error: {product} ({mode}): {e}");
        }
        process::exit(EXIT_RUN_FAILED);
    }
}
