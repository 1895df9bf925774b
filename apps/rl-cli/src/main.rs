use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use rl_scenario::{PRESET_NAMES, ReflectionDef, Scenario, ScenarioResult, preset};
use rl_sim::{SimOptions, SystemSnapshot, Temperatures, run_sim};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rl-cli")]
#[command(about = "Radline CLI - one-dimensional radiative exchange thought experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and parameters
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// List built-in presets
    Presets,
    /// Run a scenario for a fixed number of ticks
    Run {
        /// Path to the scenario YAML or JSON file
        #[arg(conflicts_with = "preset", required_unless_present = "preset")]
        scenario_path: Option<PathBuf>,
        /// Built-in preset name instead of a file
        #[arg(long)]
        preset: Option<String>,
        /// Number of ticks to run
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,
        /// Print every N-th tick
        #[arg(long, default_value_t = 1_000)]
        record_every: u64,
        /// Override the scenario's mirror reflection convention
        #[arg(long, value_enum)]
        reflection: Option<ReflectionArg>,
        /// Emit snapshots as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReflectionArg {
    Observed,
    SameSide,
    OppositeSide,
}

impl From<ReflectionArg> for ReflectionDef {
    fn from(arg: ReflectionArg) -> Self {
        match arg {
            ReflectionArg::Observed => ReflectionDef::Observed,
            ReflectionArg::SameSide => ReflectionDef::SameSide,
            ReflectionArg::OppositeSide => ReflectionDef::OppositeSide,
        }
    }
}

fn main() -> ScenarioResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Presets => {
            cmd_presets();
            Ok(())
        }
        Commands::Run {
            scenario_path,
            preset,
            ticks,
            record_every,
            reflection,
            json,
        } => {
            let mut scenario = match scenario_path {
                Some(path) => rl_scenario::load(&path)?,
                None => rl_scenario::load_preset(preset.as_deref().unwrap_or_default())?,
            };
            if let Some(reflection) = reflection {
                scenario.reflection = reflection.into();
            }
            let opts = SimOptions {
                ticks,
                record_every,
            };
            cmd_run(&scenario, &opts, json)
        }
    }
}

fn cmd_validate(scenario_path: &Path) -> ScenarioResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = rl_scenario::load(scenario_path)?;
    scenario.topology()?;
    println!(
        "✓ Scenario is valid ({} participants)",
        scenario.participants.len()
    );
    Ok(())
}

fn cmd_presets() {
    println!("Built-in presets:");
    for name in PRESET_NAMES {
        let description = preset(name)
            .and_then(|s| s.description)
            .unwrap_or_default();
        println!("  {name:<24} {description}");
    }
}

fn cmd_run(scenario: &Scenario, opts: &SimOptions, json: bool) -> ScenarioResult<()> {
    debug!(scenario = %scenario.name, participants = scenario.participants.len(), "scenario loaded");
    let mut sim = scenario.into_simulation()?;
    let record = run_sim(&mut sim, opts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record.snapshots)?);
        return Ok(());
    }

    println!("Running scenario: {}", scenario.name);
    for snapshot in &record.snapshots {
        println!("{}", ledger_line(snapshot));
    }
    if let Some(last) = record.last() {
        println!();
        print_participants(last);
    }
    println!();
    println!(
        "Conservation residual: {:.3e} J ({} clamp events)",
        sim.conservation_residual(),
        sim.ledger().clamp_events()
    );
    Ok(())
}

fn ledger_line(s: &SystemSnapshot) -> String {
    format!(
        "t={:>8.3} s | Lost to space: {:.2} J, Watts to space: {:.2} W, System: {:.2} J, Watts to System: {} W, Total: {:.2} J",
        s.elapsed_s,
        s.ledger.lost_to_space_j,
        s.ledger.loss_rate_w,
        s.total_system_energy_j,
        s.total_power_input_w,
        s.total_accounted_j(),
    )
}

fn print_participants(s: &SystemSnapshot) {
    println!(
        "{:<5} {:<20} {:>20} {:>10} {:>14}",
        "slot", "kind", "temperature", "mean K", "emitted W"
    );
    for p in &s.participants {
        let mean = p
            .temperatures
            .mean_k()
            .map_or_else(|| "-".to_string(), |t| format!("{t:.2}"));
        println!(
            "{:<5} {:<20} {:>20} {:>10} {:>14.2}",
            p.slot.index(),
            p.kind.as_str(),
            temperature_cell(&p.temperatures),
            mean,
            p.emitted_left_w + p.emitted_right_w,
        );
    }
}

fn temperature_cell(t: &Temperatures) -> String {
    match *t {
        Temperatures::None => "-".to_string(),
        Temperatures::Single(t) => format!("{t:.2} K"),
        Temperatures::Split { left_k, right_k } => format!("{left_k:.2} | {right_k:.2} K"),
    }
}
