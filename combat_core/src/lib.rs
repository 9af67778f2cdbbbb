//! combat_core - Real-time combat scheduling and resolution
//!
//! This library provides:
//! - Combat math: attack speed, hit/dodge/parry/shield/critical chances,
//!   base damage, defense and the final damage chain
//! - CombatantRegistry: ally and enemy action records
//! - CombatEncounter: the tick-driven scheduler with its failsafe
//! - Resolution pipeline: target and weapon selection and the roll sequence
//! - Events: structured combat events and a bounded combat log
//!
//! Combatant data is never owned here; it is read and written through the
//! provider traits in [`source`].

pub mod combat;
pub mod config;
pub mod events;
pub mod math;
pub mod prelude;
pub mod registry;
pub mod scheduler;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use combat::{resolve_attack, resolve_attack_with_rng, CombatResolutionResult};
pub use config::{CombatConstants, ConfigError, RosterConfig};
pub use events::{CombatEvent, CombatEventKind, CombatLog, EventSink, NullSink};
pub use math::{AttackProfile, DefenseProfile, EquipmentPenalty};
pub use registry::{CombatantAction, CombatantRegistry};
pub use scheduler::{
    ActionOutcome, CombatEncounter, CompletionReason, EncounterOutcome, EncounterOwner,
    EncounterStats, SchedulerState, SkipReason, TickReport,
};
pub use source::{
    CombatantSource, EquipmentProvider, HealthQueryable, Roster, SourceError, StatProvider,
};
pub use types::{CombatantId, Side, SkillType, WeaponKind};
