//! Command-line argument parsing for the `load-sim` binary.

use std::path::PathBuf;

use crate::sim::results::Statistic;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub trials: Option<usize>,
    pub percentile: Option<f32>,
    pub seed: Option<u64>,
    pub outputs: Option<PathBuf>,
    pub daily: bool,
    pub detailed: bool,
    pub homer: Option<Statistic>,
    pub verbose: bool,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
    #[cfg(feature = "tui")]
    pub tui: bool,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses an argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => opts.help = true,
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--trials" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --trials")?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--trials value \"{raw}\" is not a whole number"))?;
                opts.trials = Some(n);
            }
            "--percentile" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --percentile")?;
                let p = raw
                    .parse::<f32>()
                    .map_err(|_| format!("--percentile value \"{raw}\" is not a number"))?;
                opts.percentile = Some(p);
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed")?;
                let s = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(s);
            }
            "--outputs" => {
                i += 1;
                let dir = args.next_or_err(i, "missing value for --outputs (expected a directory)")?;
                opts.outputs = Some(PathBuf::from(dir));
            }
            "--daily" => opts.daily = true,
            "--detailed" => opts.detailed = true,
            "--homer" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --homer (expected mean or percentile)",
                )?;
                opts.homer = match raw.parse::<Statistic>()? {
                    s @ (Statistic::Mean | Statistic::Percentile) => Some(s),
                    other => {
                        return Err(format!(
                            "--homer {other} is not a load series (expected mean or percentile)"
                        ));
                    }
                };
            }
            "--verbose" | "-v" => opts.verbose = true,
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port")?;
                let p = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(p);
            }
            #[cfg(feature = "tui")]
            "--tui" => opts.tui = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    Ok(opts)
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
    eprintln!("load-sim: Monte Carlo electricity demand simulator for rural microgrids");
    eprintln!();
    eprintln!("Usage: load-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, quick, high_confidence)");
    eprintln!("  --trials <n>             Override Monte Carlo trials per month");
    eprintln!("  --percentile <p>         Override reported percentile (0-100)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --outputs <dir>          Override output directory");
    eprintln!("  --daily                  Also write daily energy per trial");
    eprintln!("  --detailed               Also write per-device hourly breakdown");
    eprintln!("  --homer <mean|percentile> Also write an 8760-hour HOMER load series");
    eprintln!("  --verbose, -v            Debug logging (RUST_LOG overrides)");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Watch trials accumulate in the terminal");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the demo preset is used.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = parse_args_from(&args(&["--scenario", "site.toml"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("site.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_preset_and_overrides() {
        let opts = parse_args_from(&args(&[
            "--preset",
            "quick",
            "--trials",
            "50",
            "--percentile",
            "97.5",
            "--seed",
            "7",
            "--daily",
            "--homer",
            "percentile",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("quick"));
        assert_eq!(opts.trials, Some(50));
        assert_eq!(opts.percentile, Some(97.5));
        assert_eq!(opts.seed, Some(7));
        assert!(opts.daily);
        assert!(!opts.detailed);
        assert_eq!(opts.homer, Some(Statistic::Percentile));
    }

    #[test]
    fn rejects_scenario_with_preset() {
        let err = parse_args_from(&args(&["--scenario", "a.toml", "--preset", "demo"]));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_missing_value() {
        let err = parse_args_from(&args(&["--trials"])).unwrap_err();
        assert!(err.contains("--trials"));
    }

    #[test]
    fn rejects_bad_numbers_and_unknown_flags() {
        assert!(parse_args_from(&args(&["--trials", "many"])).is_err());
        assert!(parse_args_from(&args(&["--homer", "median"])).is_err());
        assert!(parse_args_from(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn homer_only_accepts_load_statistics() {
        let err = parse_args_from(&args(&["--homer", "std_dev"])).unwrap_err();
        assert!(err.contains("mean or percentile"));
        assert!(parse_args_from(&args(&["--homer", "variability"])).is_err());
        let opts = parse_args_from(&args(&["--homer", "mean"])).expect("parse should succeed");
        assert_eq!(opts.homer, Some(Statistic::Mean));
    }

    #[cfg(feature = "api")]
    #[test]
    fn supports_serve_and_port() {
        let opts =
            parse_args_from(&args(&["--serve", "--port", "8080"])).expect("parse should succeed");
        assert!(opts.serve);
        assert_eq!(opts.port, Some(8080));
    }

    #[cfg(not(feature = "api"))]
    #[test]
    fn serve_requires_api_feature() {
        let err = parse_args_from(&args(&["--serve"])).unwrap_err();
        assert!(err.contains("--serve"));
        assert!(parse_args_from(&args(&["--port", "8080"])).is_err());
    }

    #[cfg(not(feature = "tui"))]
    #[test]
    fn tui_requires_tui_feature() {
        let err = parse_args_from(&args(&["--tui"])).unwrap_err();
        assert!(err.contains("--tui"));
    }

    #[test]
    fn help_is_flagged_not_fatal() {
        let opts = parse_args_from(&args(&["-h"])).expect("parse should succeed");
        assert!(opts.help);
    }
}
