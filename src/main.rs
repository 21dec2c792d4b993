//! load-sim entry point: CLI wiring, scenario loading and output files.

use std::process;

use tracing::{error, info, warn};

use load_sim::cli::{self, CliOptions};
use load_sim::config::ScenarioConfig;
use load_sim::logging;
use load_sim::runner::{self, ExportOptions};

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then
/// the demo preset. Command-line overrides are applied on top.
fn load_scenario(cli: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map_err(|e| e.to_string())?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name).map_err(|e| e.to_string())?
    } else {
        ScenarioConfig::demo()
    };

    if let Some(trials) = cli.trials {
        scenario.simulation.trials = trials;
    }
    if let Some(percentile) = cli.percentile {
        scenario.simulation.percentile = percentile;
    }
    if let Some(seed) = cli.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(ref dir) = cli.outputs {
        scenario.outputs.dir = dir.clone();
    }
    Ok(scenario)
}

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    logging::init(cli.verbose);

    let scenario = match load_scenario(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    if scenario.simulation.trials < 2 {
        warn!("a single trial gives zero standard deviation and variability");
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        let label = match (&cli.scenario, &cli.preset) {
            (Some(path), _) => path
                .file_stem()
                .map_or_else(|| "scenario".to_string(), |s| s.to_string_lossy().into_owned()),
            (None, Some(name)) => name.clone(),
            (None, None) => "demo".to_string(),
        };
        load_sim::tui::run(scenario, &label);
        return;
    }

    let mut engine = match runner::build_engine(&scenario) {
        Ok(engine) => engine,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let run = runner::run_year(&mut engine);

    let options = ExportOptions {
        daily: cli.daily,
        detailed: cli.detailed,
        homer: cli.homer,
    };
    match runner::write_outputs(
        &mut engine,
        &run,
        &scenario.outputs.dir,
        scenario.outputs.decimals,
        &options,
    ) {
        Ok(paths) => {
            for p in &paths {
                info!(path = %p.display(), "output written");
            }
        }
        Err(e) => {
            error!("failed to write outputs: {e}");
            process::exit(1);
        }
    }

    println!("{}", run.summary);

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(load_sim::api::AppState::from_run(&run));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(3000)));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(load_sim::api::serve(state, addr)) {
            error!("API server stopped: {e}");
            process::exit(1);
        }
    }
}
