//! Scheduler - Tick-driven action loop of a single encounter
//!
//! A [`CombatEncounter`] owns the registry and the action gauges. Each tick it
//! resolves one action for every combatant whose `next_action_time` has
//! passed, allies strictly before enemies and each side in registration
//! order. Nothing is concurrent; time only moves when the caller ticks.

mod encounter;
mod stats;

pub use encounter::CombatEncounter;
pub use stats::EncounterStats;

use crate::combat::CombatResolutionResult;
use crate::source::SourceError;
use crate::types::{CombatantId, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scheduler lifecycle; `Inactive -> Active -> Inactive`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SchedulerState {
    #[default]
    Inactive,
    Active,
}

/// Why the scheduler asks its owner to end the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionReason {
    /// Every combatant of this side is dead
    SideDefeated(Side),
    /// The resolved-action ceiling was reached; the scheduler already stopped
    FailsafeTripped { actions: u32 },
}

/// Whoever owns the encounter and decides when to tear it down
pub trait EncounterOwner {
    /// Called after a tick that left a side wiped out, and once when the
    /// failsafe trips. The owner may `stop()` the encounter afterwards.
    fn request_combat_completion(&mut self, reason: CompletionReason);

    /// Called when an action brings a combatant to zero health
    fn on_combatant_death(&mut self, _combatant: &CombatantId) {}
}

/// Owner that just remembers what it was told
#[derive(Debug, Clone, Default)]
pub struct RecordingOwner {
    pub completions: Vec<CompletionReason>,
    pub deaths: Vec<CombatantId>,
}

impl EncounterOwner for RecordingOwner {
    fn request_combat_completion(&mut self, reason: CompletionReason) {
        self.completions.push(reason);
    }

    fn on_combatant_death(&mut self, combatant: &CombatantId) {
        self.deaths.push(combatant.clone());
    }
}

/// Why a due action was not resolved
///
/// A skipped action keeps its gauge and is retried on the next tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("combatant no longer exists")]
    InvalidCombatant,
    #[error("combatant is dead")]
    Dead,
    #[error("no living target on the opposing side")]
    NoTarget,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Result of one due action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Resolved {
        attacker: CombatantId,
        target: CombatantId,
        result: CombatResolutionResult,
    },
    Skipped {
        combatant: CombatantId,
        reason: SkipReason,
    },
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub now: f64,
    pub outcomes: Vec<ActionOutcome>,
    pub deaths: Vec<CombatantId>,
    /// Side found fully dead after this tick
    pub defeated_side: Option<Side>,
    pub failsafe_tripped: bool,
    /// The scheduler stopped itself during this tick
    pub stopped: bool,
}

impl TickReport {
    pub fn new(now: f64) -> Self {
        TickReport {
            now,
            ..Default::default()
        }
    }

    pub fn resolved(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ActionOutcome::Resolved { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.resolved()
    }
}

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    AlliesWon,
    EnemiesWon,
    /// Stopped by the resolved-action ceiling
    Failsafe,
    /// Stopped from outside before either side was wiped
    Stopped,
}

impl EncounterOutcome {
    /// Outcome when `defeated` has no living combatant left
    pub fn for_defeated(defeated: Side) -> Self {
        match defeated {
            Side::Ally => EncounterOutcome::EnemiesWon,
            Side::Enemy => EncounterOutcome::AlliesWon,
        }
    }
}

impl fmt::Display for EncounterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterOutcome::AlliesWon => f.write_str("allies won"),
            EncounterOutcome::EnemiesWon => f.write_str("enemies won"),
            EncounterOutcome::Failsafe => f.write_str("failsafe stop"),
            EncounterOutcome::Stopped => f.write_str("stopped"),
        }
    }
}
