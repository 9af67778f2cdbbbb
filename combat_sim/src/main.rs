//! combat_sim - Run combat encounters from roster files

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::config::{default_constants, CombatConstants, RosterConfig};
use combat_core::types::Side;
use combat_sim::simulation::{BatchSummary, EncounterSimulation};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless combat encounter runner
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Run a combat encounter from a roster file and print the combat log")]
struct Args {
    /// Roster file (TOML) with weapons, shields and combatants
    roster: PathBuf,

    /// Engine constants file (TOML); built-in defaults when omitted
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds before the encounter is stopped
    #[arg(long, default_value_t = 600.0)]
    max_time: f64,

    /// Run this many encounters with consecutive seeds and print the tally
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Only print the last N log lines (0 prints everything)
    #[arg(long, default_value_t = 0)]
    tail: usize,

    /// Print a JSON summary instead of the log
    #[arg(long)]
    json: bool,

    /// Enable debug logging of every resolved action
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let constants = match &args.constants {
        Some(path) => CombatConstants::load(path)
            .with_context(|| format!("Failed to load constants from {}", path.display()))?,
        None => default_constants(),
    };

    let roster = RosterConfig::load(&args.roster)
        .with_context(|| format!("Failed to load roster from {}", args.roster.display()))?
        .build_roster()
        .context("Failed to build roster")?;

    let seed = args.seed.unwrap_or_else(rand::random);

    if args.runs > 1 {
        let batch = BatchSummary::run(&roster, &constants, seed, args.runs, args.max_time);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&batch)?);
        } else {
            println!("Runs:          {}", batch.runs);
            println!("Allies won:    {} ({:.1}%)", batch.allies_won, batch.ally_win_rate());
            println!("Enemies won:   {}", batch.enemies_won);
            println!("Failsafe:      {}", batch.failsafe);
            println!("Timed out:     {}", batch.stopped);
            println!("Avg duration:  {:.1}s", batch.avg_duration);
            println!("Avg actions:   {:.1}", batch.avg_actions);
        }
        return Ok(());
    }

    let sim = EncounterSimulation::run(roster, constants, seed, args.max_time);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim)?);
        return Ok(());
    }

    let lines = if args.tail > 0 {
        sim.log.recent(args.tail)
    } else {
        sim.log.iter().collect()
    };
    for event in lines {
        println!("{}", event);
    }

    println!();
    println!("Outcome:   {} (seed {})", sim.outcome, sim.seed);
    println!("Duration:  {:.1}s over {} ticks", sim.duration, sim.ticks);
    println!(
        "Actions:   {} ({} hits, {} misses, {} dodges)",
        sim.stats.actions, sim.stats.hits, sim.stats.misses, sim.stats.dodges
    );
    println!(
        "Rolls:     {} parries, {} shield blocks, {} criticals",
        sim.stats.parries, sim.stats.shield_blocks, sim.stats.criticals
    );
    println!("Damage:    {} total ({:.1}/s)", sim.stats.total_damage, sim.dps());
    for (side, label) in [(Side::Ally, "allies"), (Side::Enemy, "enemies")] {
        let survivors: Vec<String> = sim
            .survivors(side)
            .iter()
            .map(|c| format!("{} ({:.0}/{:.0})", c.name, c.health, c.max_health))
            .collect();
        if survivors.is_empty() {
            println!("Surviving {}: none", label);
        } else {
            println!("Surviving {}: {}", label, survivors.join(", "));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "combat_core=debug,combat_sim=debug"
    } else {
        "combat_core=info,combat_sim=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
