use swarmsim::{Scenario, ScenarioConfig};
use swarmsim::{bench_distribution, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the number of frames to run
    #[arg(long)]
    steps: Option<u64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run the timing harness instead of a scenario
    #[arg(long)]
    bench: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.bench {
        bench_distribution();
        bench_step()?;
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(steps) = args.steps {
        scenario_cfg.engine.steps = steps;
    }
    if let Some(seed) = args.seed {
        scenario_cfg.engine.seed = seed;
    }

    let mut scenario = Scenario::build_scenario(scenario_cfg).context("building scenario")?;
    info!(
        elements = scenario.swarm.len(),
        steps = scenario.engine.steps,
        "running scenario {}",
        args.file_name
    );

    let report_every = scenario.engine.report_every;
    for _ in 0..scenario.engine.steps {
        scenario.step().context("stepping swarm")?;

        let frame = scenario.swarm.frame;
        if report_every > 0 && frame % report_every == 0 {
            info!(
                frame,
                t = scenario.swarm.t,
                mean_error = scenario.swarm.mean_tracking_error(),
                "progress"
            );
        }
    }

    info!(
        frames = scenario.swarm.frame,
        t = scenario.swarm.t,
        mean_error = scenario.swarm.mean_tracking_error(),
        "done"
    );

    Ok(())
}
