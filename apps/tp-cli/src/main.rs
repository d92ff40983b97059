mod config;
mod error;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tp_sim::{reference_plant, ReferencePlant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PlantConfig;
use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(about = "ThermoPlant CLI - headless driver for the reference plant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the reference plant and advance it
    Run {
        /// YAML file with `constants` and `plant` sections
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Simulated time to run, in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,
        /// Report interval in simulated seconds (defaults to the whole run)
        #[arg(long)]
        report_every: Option<f64>,
        /// Write one JSON snapshot per report to stdout
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as YAML
    Constants {
        /// YAML file with `constants` and `plant` sections
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            duration,
            report_every,
            json,
        } => cmd_run(config.as_deref(), duration, report_every, json),
        Commands::Constants { config } => cmd_constants(config.as_deref()),
    }
}

fn cmd_run(
    config_path: Option<&Path>,
    duration_s: f64,
    report_every_s: Option<f64>,
    json: bool,
) -> CliResult<()> {
    if !duration_s.is_finite() || duration_s < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "duration must be a non-negative number of seconds, got {duration_s}"
        )));
    }
    let interval_s = report_every_s.unwrap_or(duration_s);
    if !interval_s.is_finite() || interval_s < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "report interval must be a non-negative number of seconds, got {interval_s}"
        )));
    }

    let cfg = PlantConfig::load(config_path)?;
    let mut plant = reference_plant(&cfg.constants, &cfg.plant)?;
    let tick_s = cfg.constants.tick_s;
    let total = cfg.constants.ticks_in(duration_s);
    let per_report = cfg.constants.ticks_in(interval_s).max(1);

    info!(duration_s, ticks = total, tick_s, "running reference plant");

    let mut done = 0_u64;
    while done < total {
        let chunk = per_report.min(total - done);
        plant.sim.run_ticks(chunk);
        done += chunk;
        report(&plant, json)?;
    }
    if total == 0 {
        report(&plant, json)?;
    }

    if !json {
        println!(
            "✓ Simulated {:.4} s ({} ticks)",
            plant.sim.elapsed_s(),
            plant.sim.tick_count()
        );
    }
    Ok(())
}

fn report(plant: &ReferencePlant, json: bool) -> CliResult<()> {
    let sim = &plant.sim;
    if json {
        let mut out = io::stdout().lock();
        serde_json::to_writer(&mut out, &sim.snapshot())?;
        writeln!(out)?;
        return Ok(());
    }

    let h = &plant.handles;
    if let Some(motor) = sim.motor(h.motor) {
        info!(
            t_s = sim.elapsed_s(),
            state = ?motor.state(),
            rpm = motor.rpm(),
            current_a = motor.current_a(),
            wire_k = motor.wire_temperature_k(),
            "motor"
        );
    }
    if let Some(comp) = sim.compressor(h.compressor) {
        info!(
            state = ?comp.state(),
            pressure_atm = comp.pressure_atm(),
            volume_m3 = comp.volume_m3(),
            cycles = comp.completed_cycles(),
            "compressor"
        );
    }
    if let Some(hx) = sim.heat_exchanger(h.heat_exchanger) {
        info!(
            content = ?hx.content_state(),
            coolant = ?hx.coolant_state(),
            wall_k = hx.pipe().wall_temperature_k(),
            "heat exchanger"
        );
    }
    if let Some(ex) = sim.expander(h.expander) {
        let collected = sim
            .chambers()
            .get(h.expander_liquid_out)
            .map_or(0.0, |c| c.mass_kg());
        info!(
            state = ?ex.state(),
            vessel_k = ex.vessel().temperature_k(),
            liquid_collected_kg = collected,
            "expander"
        );
    }
    Ok(())
}

fn cmd_constants(config_path: Option<&Path>) -> CliResult<()> {
    let cfg = PlantConfig::load(config_path)?;
    print!("{}", serde_yaml::to_string(&cfg)?);
    Ok(())
}
