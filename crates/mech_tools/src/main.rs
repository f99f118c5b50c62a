//! Mech rules - Development Tools

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mech_core::context::RulesContext;
use mech_core::hit_table::HitTable;
use mech_core::location::Side;
use mech_tools::config::{read_chassis, RunConfig};
use mech_tools::error::Result;
use mech_tools::report::{build_report, render_json, render_text};
use mech_tools::simulate::{run_simulation, SimulationConfig};
use mech_tools::validate::validate_data_directory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mech-tools")]
#[command(about = "Development tools for the combat-unit rules core")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options and conditions shared by commands that run rules.
#[derive(Args)]
struct RulesArgs {
    /// RON file with game options
    #[arg(long)]
    options: Option<PathBuf>,

    /// RON file with planetary conditions
    #[arg(long)]
    conditions: Option<PathBuf>,

    /// Turn on a game option by name (repeatable)
    #[arg(long = "enable")]
    enable: Vec<String>,
}

impl RulesArgs {
    fn load(&self) -> Result<RunConfig> {
        RunConfig::load(self.options.as_deref(), self.conditions.as_deref(), &self.enable)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate chassis data files
    Validate {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: PathBuf,
    },
    /// Report MP, heat capacity and damage level of a chassis
    Report {
        /// Chassis RON file
        file: PathBuf,

        /// Current heat
        #[arg(long, default_value_t = 0)]
        heat: u32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RulesArgs,
    },
    /// Fire seeded volleys at a chassis and summarize the attrition
    Simulate {
        /// Chassis RON file
        file: PathBuf,

        /// Seed of the first run
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Number of runs
        #[arg(long, default_value_t = 10)]
        runs: u32,

        /// Volleys per run
        #[arg(long, default_value_t = 10)]
        volleys: u32,

        /// Shots per volley
        #[arg(long, default_value_t = 3)]
        shots: u32,

        /// Damage per shot
        #[arg(long, default_value_t = 5)]
        damage: u32,

        /// Hit table (0 normal, 1 punch, 2 kick, 3 swarm, 4 conventional swarm, 5 above, 6 below)
        #[arg(long, default_value_t = 0)]
        table: u8,

        /// Attack side (0 front, 1 left, 2 right, 3 rear)
        #[arg(long, default_value_t = 0)]
        side: u8,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RulesArgs,
    },
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate { path } => {
            tracing::info!("Validating data files in: {}", path.display());
            let report = validate_data_directory(&path)?;
            for warning in &report.warnings {
                tracing::warn!("{warning}");
            }
            for (file, error) in &report.failures {
                tracing::error!("{file}: {error}");
            }
            let report = report.into_result()?;
            println!(
                "{} chassis files valid, {} warnings",
                report.checked,
                report.warnings.len()
            );
        }
        Commands::Report {
            file,
            heat,
            json,
            rules,
        } => {
            let config = rules.load()?;
            let ctx = RulesContext::new(&config.options, &config.conditions);
            let mut chassis = mech_core::chassis::UnitChassis::from_data(&read_chassis(&file)?)?;
            chassis.set_heat(heat);
            let report = build_report(&chassis, &ctx);
            if json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
        }
        Commands::Simulate {
            file,
            seed,
            runs,
            volleys,
            shots,
            damage,
            table,
            side,
            json,
            rules,
        } => {
            let config = rules.load()?;
            let ctx = RulesContext::new(&config.options, &config.conditions);
            let data = read_chassis(&file)?;
            let sim = SimulationConfig {
                seed,
                runs,
                volleys,
                shots,
                damage,
                table: HitTable::try_from(table)?,
                side: Side::try_from(side)?,
            };
            let summary = run_simulation(&data, &sim, &ctx)?;
            if json {
                let text = serde_json::to_string_pretty(&summary)
                    .map_err(|e| mech_tools::error::ToolError::Render(e.to_string()))?;
                println!("{text}");
            } else {
                println!("{}: {} runs", summary.unit, summary.runs.len());
                println!(
                    "  destroyed {} ({:.0}%), crippled {}",
                    summary.destroyed,
                    summary.destroy_rate() * 100.0,
                    summary.crippled
                );
                if let Some(avg) = summary.avg_volleys_to_destroy {
                    println!("  average volleys to destroy: {avg:.1}");
                }
                for outcome in &summary.runs {
                    println!(
                        "  seed {:>6}: {:>3} volleys, {:<9} crits {:>2}",
                        outcome.seed,
                        outcome.volleys_fired,
                        outcome.final_level.label(),
                        outcome.critical_hits
                    );
                }
            }
        }
    }
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
