//! Route Swarm: load generator for the demo storefront app.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI flags ─┐
//!              ├─▶ SwarmConfig ─▶ SwarmPlan ─▶ Swarm
//!   TOML file ─┘                                │
//!                                               │ spawn_rate users/s
//!                          ┌────────────────────┼────────────────────┐
//!                          ▼                    ▼                    ▼
//!                   SimulatedUser        SimulatedUser        SimulatedUser
//!                   (standard)           (power)              (slow)
//!                          │ select task by weight → GET path(s) → wait
//!                          ▼
//!                      HttpSink (reqwest) ──────────────▶ target app
//!                          │
//!                          ▼
//!                      RunTally ─▶ summary (log / JSON)
//!
//!   deadline or Ctrl+C ─▶ Shutdown broadcast ─▶ every user stops
//! ```

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;

use route_swarm::config::{read_config, validate_config, ConfigError, SwarmConfig};
use route_swarm::lifecycle::{signals, Shutdown};
use route_swarm::observability::logging;
use route_swarm::profile;
use route_swarm::swarm::Swarm;

#[derive(Parser, Debug)]
#[command(name = "route-swarm")]
#[command(about = "Weighted, randomized GET traffic against the demo storefront routes", long_about = None)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the target app
    #[arg(long)]
    host: Option<String>,

    /// Total simulated users
    #[arg(short, long)]
    users: Option<usize>,

    /// Users started per second
    #[arg(short = 'r', long)]
    spawn_rate: Option<f64>,

    /// Stop after this many seconds (default: until Ctrl+C)
    #[arg(short = 't', long = "run-time")]
    run_time_secs: Option<u64>,

    /// Seed for reproducible task and path choices
    #[arg(long)]
    seed: Option<u64>,

    /// Only run these profiles (repeatable)
    #[arg(long = "profile")]
    profiles: Vec<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Print the built-in profiles and exit
    #[arg(long)]
    list_profiles: bool,

    /// Print the final tally as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

impl Cli {
    fn apply(&self, config: &mut SwarmConfig) {
        if let Some(host) = &self.host {
            config.target.host = host.clone();
        }
        if let Some(users) = self.users {
            config.run.users = users;
        }
        if let Some(rate) = self.spawn_rate {
            config.run.spawn_rate = rate;
        }
        if self.run_time_secs.is_some() {
            config.run.run_time_secs = self.run_time_secs;
        }
        if self.seed.is_some() {
            config.run.seed = self.seed;
        }
        if !self.profiles.is_empty() {
            config.profiles.enabled = self.profiles.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Human-readable listing of the built-in profiles and their task weights.
fn format_profiles() -> String {
    let mut out = String::new();
    for p in profile::builtin() {
        let _ = writeln!(out, "{} (weight {}, wait {}): {}", p.name, p.weight, p.wait, p.description);
        let total: u32 = p.tasks.iter().map(|t| t.weight).sum();
        for task in p.tasks {
            let paths: Vec<&str> = task.steps.iter().flat_map(|s| s.candidates().iter().copied()).collect();
            let _ = writeln!(
                out,
                "    {:<26} {:>2}/{:<2} {}{}",
                task.name,
                task.weight,
                total,
                paths.join(" "),
                if task.expects_error { "  (expects 4xx)" } else { "" }
            );
        }
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list_profiles {
        print!("{}", format_profiles());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => SwarmConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);

    tracing::info!("route-swarm v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.target.host,
        users = config.run.users,
        spawn_rate = config.run.spawn_rate,
        run_time_secs = ?config.run.run_time_secs,
        seed = ?config.run.seed,
        profiles = ?config.profiles.enabled,
        "Configuration loaded"
    );

    let shutdown = Arc::new(Shutdown::new());
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let swarm = Swarm::from_config(&config, shutdown)?;
    let summary = swarm.run().await?;

    if cli.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
