use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use arena_core::{ArenaConfig, SimulationParams};
use arena_runner::report::{default_run_id, MatchReport};
use arena_runner::{
    build_team, ensure_distinct, fighter, new_director, MatchLoopPlugin, RunnerDirector,
};
use bevy::prelude::{App, MinimalPlugins};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(version, about = "Run arena matches headless and report the result")]
struct Cli {
    #[arg(long, default_value = "demos/arena.toml")]
    config: PathBuf,
    /// Overrides SIMULATION_SEED.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the configured round interval.
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Writes the JSON match report here as well as to stdout.
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(long)]
    id: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One fighter against another.
    Single(SingleArgs),
    /// Two teams of fighters.
    Team(TeamArgs),
    /// List the fighters in the configured roster.
    Roster,
}

#[derive(Args)]
struct SingleArgs {
    #[arg(long)]
    first: u32,
    #[arg(long)]
    second: u32,
}

#[derive(Args)]
struct TeamArgs {
    #[arg(long, value_delimiter = ',', required = true)]
    one: Vec<u32>,
    #[arg(long, value_delimiter = ',', required = true)]
    two: Vec<u32>,
    #[arg(long, default_value = "Team One")]
    one_name: String,
    #[arg(long, default_value = "Team Two")]
    two_name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ArenaConfig::from_path(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    init_tracing(&config);

    if let Some(ms) = cli.interval_ms {
        config.combat.round_interval_ms = ms;
    }
    let seed = cli
        .seed
        .unwrap_or_else(|| SimulationParams::from_env().seed);

    match cli.command {
        Commands::Roster => {
            print_roster(&config);
            Ok(())
        }
        Commands::Single(args) => {
            ensure_distinct(&[args.first, args.second])?;
            let first = fighter(&config, args.first)?;
            let second = fighter(&config, args.second)?;
            let mut director = new_director(config, seed);
            director.start_game(first, second);
            finish(run_match(director), seed, cli.id, cli.report.as_deref())
        }
        Commands::Team(args) => {
            ensure_distinct(args.one.iter().chain(&args.two))?;
            let one = build_team(&config, &args.one_name, &args.one)?;
            let two = build_team(&config, &args.two_name, &args.two)?;
            let mut director = new_director(config, seed);
            director.start_team_match(one, two);
            finish(run_match(director), seed, cli.id, cli.report.as_deref())
        }
    }
}

fn init_tracing(config: &ArenaConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.telemetry.trace_filter.as_deref().unwrap_or("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}

fn run_match(director: RunnerDirector) -> Option<RunnerDirector> {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, MatchLoopPlugin))
        .insert_non_send_resource(director);
    app.finish();
    app.cleanup();

    loop {
        app.update();
        if !app.world().non_send_resource::<RunnerDirector>().is_running() {
            break;
        }
        thread::sleep(FRAME);
    }
    app.world_mut().remove_non_send_resource::<RunnerDirector>()
}

fn finish(
    director: Option<RunnerDirector>,
    seed: u64,
    id: Option<String>,
    path: Option<&Path>,
) -> Result<()> {
    let director = director.context("match loop dropped the director")?;
    let report = MatchReport::new(id.unwrap_or_else(default_run_id), seed, &director);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    println!("{}", report.headline());

    if let Some(path) = path {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn print_roster(config: &ArenaConfig) {
    for f in &config.fighters {
        println!(
            "#{:<3} {:<12} {:>5} HP  str {:>3}  {:?}  {}",
            f.id, f.name, f.health, f.strength, f.class, f.description
        );
    }
}
