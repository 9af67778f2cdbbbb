//! Encounter simulation utilities

use combat_core::{
    config::CombatConstants,
    events::CombatLog,
    scheduler::{
        CombatEncounter, CompletionReason, EncounterOutcome, EncounterOwner, EncounterStats,
    },
    source::{HealthQueryable, Roster, StatProvider},
    types::{CombatantId, Side},
};
use serde::Serialize;
use tracing::{debug, info};

/// Owner that ends the encounter as soon as the scheduler asks
#[derive(Debug, Default)]
pub struct SimOwner {
    pub completion: Option<CompletionReason>,
    pub deaths: Vec<CombatantId>,
}

impl EncounterOwner for SimOwner {
    fn request_combat_completion(&mut self, reason: CompletionReason) {
        debug!(?reason, "Completion requested");
        self.completion.get_or_insert(reason);
    }

    fn on_combatant_death(&mut self, combatant: &CombatantId) {
        self.deaths.push(combatant.clone());
    }
}

/// Final state of one combatant
#[derive(Debug, Clone, Serialize)]
pub struct CombatantSummary {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub health: f64,
    pub max_health: f64,
}

impl CombatantSummary {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Run a whole encounter from a roster
#[derive(Debug, Serialize)]
pub struct EncounterSimulation {
    pub seed: u64,
    pub outcome: EncounterOutcome,
    pub duration: f64,
    pub ticks: u64,
    pub stats: EncounterStats,
    pub combatants: Vec<CombatantSummary>,
    #[serde(skip)]
    pub log: CombatLog,
}

impl EncounterSimulation {
    /// Simulate the roster's allies against its enemies until one side is
    /// wiped, the failsafe trips or `max_time` seconds pass
    pub fn run(roster: Roster, constants: CombatConstants, seed: u64, max_time: f64) -> Self {
        let allies = roster.ids_on(Side::Ally);
        let enemies = roster.ids_on(Side::Enemy);

        let mut log = CombatLog::new();
        let mut owner = SimOwner::default();
        let mut encounter = CombatEncounter::seeded(roster, constants, seed);
        encounter.register_team(allies, enemies);
        encounter.start(0.0, &mut log);

        let step = encounter.interval();
        let mut ticks = 0;

        while encounter.is_active() {
            if owner.completion.is_some() {
                encounter.stop();
                break;
            }
            if encounter.now() >= max_time {
                info!(max_time, "Time limit reached");
                encounter.stop();
                break;
            }
            ticks += encounter.advance(step, &mut log, &mut owner).len() as u64;
        }

        let outcome = encounter.outcome().unwrap_or(EncounterOutcome::Stopped);
        let stats = encounter.stats().clone();
        let duration = stats.duration(encounter.now());
        let roster = encounter.into_provider();

        let combatants = roster
            .records()
            .iter()
            .map(|r| CombatantSummary {
                id: r.id.clone(),
                name: roster.display_name(&r.id).unwrap_or_else(|_| r.id.to_string()),
                side: r.side,
                health: roster.current_health(&r.id).unwrap_or(0.0),
                max_health: r.max_health,
            })
            .collect();

        EncounterSimulation {
            seed,
            outcome,
            duration,
            ticks,
            stats,
            combatants,
            log,
        }
    }

    /// Damage dealt per second across both sides
    pub fn dps(&self) -> f64 {
        if self.duration > 0.0 {
            self.stats.total_damage as f64 / self.duration
        } else {
            0.0
        }
    }

    pub fn survivors(&self, side: Side) -> Vec<&CombatantSummary> {
        self.combatants
            .iter()
            .filter(|c| c.side == side && c.is_alive())
            .collect()
    }
}

/// Win tally over several seeded runs of the same roster
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub runs: u32,
    pub allies_won: u32,
    pub enemies_won: u32,
    pub failsafe: u32,
    pub stopped: u32,
    pub avg_duration: f64,
    pub avg_actions: f64,
}

impl BatchSummary {
    /// Run `runs` encounters with seeds `seed, seed + 1, ...`
    pub fn run(roster: &Roster, constants: &CombatConstants, seed: u64, runs: u32, max_time: f64) -> Self {
        let mut summary = BatchSummary::default();
        let mut total_duration = 0.0;
        let mut total_actions = 0u64;

        for i in 0..runs {
            let sim = EncounterSimulation::run(
                roster.clone(),
                constants.clone(),
                seed.wrapping_add(u64::from(i)),
                max_time,
            );
            match sim.outcome {
                EncounterOutcome::AlliesWon => summary.allies_won += 1,
                EncounterOutcome::EnemiesWon => summary.enemies_won += 1,
                EncounterOutcome::Failsafe => summary.failsafe += 1,
                EncounterOutcome::Stopped => summary.stopped += 1,
            }
            total_duration += sim.duration;
            total_actions += u64::from(sim.stats.actions);
            summary.runs += 1;
        }

        if summary.runs > 0 {
            summary.avg_duration = total_duration / summary.runs as f64;
            summary.avg_actions = total_actions as f64 / summary.runs as f64;
        }
        summary
    }

    /// Percentage of runs won by the allies
    pub fn ally_win_rate(&self) -> f64 {
        if self.runs > 0 {
            self.allies_won as f64 / self.runs as f64 * 100.0
        } else {
            0.0
        }
    }
}
