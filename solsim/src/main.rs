use solsim::{bench_frame_curve, load_scenario, preset_names, Engine, ScenarioConfig, AU};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use std::path::PathBuf;

/// Headless runner: build a system, advance it, report what happened
#[derive(Parser, Debug)]
struct Args {
    /// Preset to build (ignored when --config is given)
    #[arg(short, long, default_value = "Solar System")]
    preset: String,

    /// Scenario YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Physics frames to run
    #[arg(short, long, default_value_t = 365)]
    frames: u64,

    /// Multiplier on the baseline one-day tick
    #[arg(short, long, default_value_t = 1.0)]
    time_scale: f64,

    /// Time the force loop and frames instead of simulating
    #[arg(long)]
    bench: bool,

    /// List the available presets and exit
    #[arg(long)]
    list: bool,
}

// load here to keep main clean
fn build_engine(args: &Args) -> Result<Engine> {
    match &args.config {
        Some(path) => {
            let cfg: ScenarioConfig = load_scenario(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            Ok(Engine::from_config(&cfg)?)
        }
        None => Ok(Engine::create(&args.preset)?),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list {
        for name in preset_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut engine = build_engine(&args)?;

    if args.bench {
        bench_frame_curve(64, engine.parameters());
        return Ok(());
    }

    info!(
        "running `{}`: {} bodies, {} substeps, {} frames at x{}",
        engine.current_preset(),
        engine.len(),
        engine.substeps(),
        args.frames,
        args.time_scale
    );

    let e0 = engine.total_energy();
    for _ in 0..args.frames {
        let events = engine.step(args.time_scale)?;
        for ev in &events {
            info!("{} was absorbed by {}", ev.removed_name, ev.survivor_name);
        }
        if engine.is_empty() {
            warn!("no bodies left after frame {}", engine.frame_count());
            break;
        }
    }

    let e1 = engine.total_energy();
    let drift = if e0 != 0.0 { ((e1 - e0) / e0).abs() } else { 0.0 };
    info!(
        "done: {:.1} days simulated, {} bodies, relative energy drift {:.3e}",
        engine.elapsed() / 86_400.0,
        engine.len(),
        drift
    );
    for b in engine.bodies() {
        info!(
            "{:>10}: x = ({:8.4}, {:8.4}) AU, |v| = {:9.1} m/s",
            b.name,
            b.position.x / AU,
            b.position.y / AU,
            b.velocity.norm()
        );
    }
    let com = engine.center_of_mass();
    info!("center of mass: ({:.3e}, {:.3e}) m", com.x, com.y);

    Ok(())
}
