use std::env;
use std::path::PathBuf;

use crate::config::ScenarioConfig;

/// Demand file given on the command line, overriding the scenario's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOverride {
    Workbook(PathBuf),
    CsvDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub data: Option<DataOverride>,
    pub seed: Option<u64>,
    pub export: Option<PathBuf>,
    /// `-v` count minus `-q` count.
    pub verbosity: i8,
}

impl CliOptions {
    /// Applies command-line overrides on top of a loaded scenario.
    pub fn apply(&self, cfg: &mut ScenarioConfig) {
        match &self.data {
            Some(DataOverride::Workbook(path)) => {
                cfg.data.source = "workbook".to_string();
                cfg.data.path = path.display().to_string();
            }
            Some(DataOverride::CsvDir(path)) => {
                cfg.data.source = "csv".to_string();
                cfg.data.path = path.display().to_string();
            }
            None => {}
        }
        if let Some(seed) = self.seed {
            cfg.synthetic.seed = seed;
        }
    }
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut scenario = None;
    let mut preset = None;
    let mut data = None;
    let mut seed = None;
    let mut export = None;
    let mut verbosity: i8 = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--workbook" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --workbook (expected an .xlsx file path)",
                )?;
                if data
                    .replace(DataOverride::Workbook(PathBuf::from(path)))
                    .is_some()
                {
                    return Err("only one of --workbook or --csv-dir may be given".to_string());
                }
            }
            "--csv-dir" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --csv-dir (expected a directory path)",
                )?;
                if data.replace(DataOverride::CsvDir(PathBuf::from(path))).is_some() {
                    return Err("only one of --workbook or --csv-dir may be given".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let value = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                seed = Some(value);
            }
            "--export" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --export (expected a CSV file path)",
                )?;
                if export.replace(PathBuf::from(path)).is_some() {
                    return Err("--export provided more than once".to_string());
                }
            }
            "-v" | "--verbose" => verbosity = verbosity.saturating_add(1),
            "-q" | "--quiet" => verbosity = verbosity.saturating_sub(1),
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if scenario.is_some() && preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(CliOptions {
        scenario,
        preset,
        data,
        seed,
        export,
        verbosity,
    })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("dc-inventory: periodic-review inventory analysis, regional vs national warehousing");
    eprintln!();
    eprintln!("Usage: dc-inventory [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>     Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --workbook <path>   Read demand from an .xlsx workbook");
    eprintln!("  --csv-dir <path>    Read demand from <path>/<product>.csv files");
    eprintln!("  --seed <u64>        Override the synthetic demand seed");
    eprintln!("  --export <path>     Write every metrics row to a CSV file");
    eprintln!("  -v, --verbose       More log output on stderr (repeatable)");
    eprintln!("  -q, --quiet         Less log output on stderr");
    eprintln!("  -h, --help          Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
