//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CombatantId, Side, SkillType, WeaponKind};

// Providers
pub use crate::source::{
    CombatantRecord, CombatantSource, CombatantStats, EquipmentProvider, HealthQueryable,
    Loadout, Roster, ShieldProfile, SourceError, StatProvider, WeaponProfile,
};

// Combat math and resolution
pub use crate::combat::{resolve_attack_with_rng, CombatResolutionResult};
pub use crate::math::{AttackProfile, DefenseProfile, EquipmentPenalty};

// Scheduler
pub use crate::registry::CombatantRegistry;
pub use crate::scheduler::{
    CombatEncounter, CompletionReason, EncounterOutcome, EncounterOwner, RecordingOwner,
    TickReport,
};

// Events
pub use crate::events::{CombatEvent, CombatEventKind, CombatLog, EventSink};

// Config
pub use crate::config::{CombatConstants, RosterConfig};
