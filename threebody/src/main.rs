use threebody::{run, write_gif, Scenario, ScenarioConfig};
use threebody::bench_integrators;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Star, planet and moon under mutual gravity, rendered to an animated GIF
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario YAML; bare names are looked up in the crate's `scenarios/`
    #[arg(short, long)]
    file: Option<String>,

    /// Output GIF, overrides `render.output`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replay the finished run in a window
    #[arg(long)]
    view: bool,

    /// Time both integrators on the scenario instead of rendering
    #[arg(long)]
    bench: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn init_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let scenario_cfg = match &args.file {
        Some(name) => load_scenario_from_yaml(name)?,
        None => ScenarioConfig::default(),
    };
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    if args.bench {
        bench_integrators(&mut scenario).context("benchmark run failed")?;
        return Ok(());
    }

    let sim = run(&scenario).context("simulation aborted")?;
    info!(collisions = sim.collisions.len(), frames = sim.frames(), "simulation finished");

    let output = args.output.unwrap_or_else(|| PathBuf::from(&scenario.render.output));
    write_gif(&output, &sim.trajectories, &scenario.render)
        .with_context(|| format!("failed to render {}", output.display()))?;

    if args.view {
        #[cfg(feature = "viewer")]
        threebody::run_viewer(sim.trajectories, &scenario.render);
        #[cfg(not(feature = "viewer"))]
        tracing::warn!("built without the `viewer` feature, ignoring --view");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_flag_is_named_file() {
        let args = Args::try_parse_from(["threebody", "--file", "default.yaml"]).expect("long flag");
        assert_eq!(args.file.as_deref(), Some("default.yaml"));

        let args = Args::try_parse_from(["threebody", "-f", "legacy_signed.yaml", "-o", "out.gif"]).expect("short flags");
        assert_eq!(args.file.as_deref(), Some("legacy_signed.yaml"));
        assert_eq!(args.output, Some(PathBuf::from("out.gif")));

        assert!(Args::try_parse_from(["threebody", "--file-name", "default.yaml"]).is_err());
    }
}
