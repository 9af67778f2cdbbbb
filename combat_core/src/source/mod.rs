//! Stat and equipment providers - read-only combatant facts consumed by the engine
//!
//! The engine never owns combatant data. Everything it needs is looked up per
//! action through these traits, and any lookup may fail with a [`SourceError`],
//! which the resolution pipeline turns into a skipped action.

mod gear;
mod roster;
mod talents;

pub use gear::{Loadout, ShieldProfile, WeaponProfile};
pub use roster::{CombatantRecord, Roster};
pub use talents::{CombatantStats, DEFAULT_SKILL_LEVEL};

use crate::types::CombatantId;
use thiserror::Error;

/// Failure to look up a fact about a combatant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("unknown combatant: {0}")]
    UnknownCombatant(CombatantId),
    #[error("combatant {0} has no stat state")]
    MissingStats(CombatantId),
    #[error("invalid health value {value} for combatant {id}")]
    InvalidHealth { id: CombatantId, value: f64 },
}

/// Alive/active queries and the health setter
pub trait HealthQueryable {
    /// Whether the id still refers to a combatant
    fn contains(&self, id: &CombatantId) -> bool;

    /// Externally supplied "still on the field" flag
    fn is_active(&self, id: &CombatantId) -> bool;

    fn current_health(&self, id: &CombatantId) -> Result<f64, SourceError>;

    fn max_health(&self, id: &CombatantId) -> Result<f64, SourceError>;

    fn set_current_health(&mut self, id: &CombatantId, value: f64) -> Result<(), SourceError>;

    /// A combatant is alive while its current health is positive
    fn is_alive(&self, id: &CombatantId) -> bool {
        self.current_health(id).map(|hp| hp > 0.0).unwrap_or(false)
    }
}

/// Character stats pre-derived from talents by the stats subsystem
pub trait StatProvider: HealthQueryable {
    fn display_name(&self, id: &CombatantId) -> Result<String, SourceError>;

    fn stats(&self, id: &CombatantId) -> Result<CombatantStats, SourceError>;
}

/// Equipment facts: weapons, armor, shield and carried weight
pub trait EquipmentProvider {
    /// The equipped weapon, or `None` when the main hand is empty
    fn equipped_weapon(&self, id: &CombatantId) -> Result<Option<WeaponProfile>, SourceError>;

    /// Species-intrinsic weapon used when nothing is equipped
    fn natural_weapon(&self, id: &CombatantId) -> Result<Option<WeaponProfile>, SourceError>;

    fn natural_attack_power(&self, id: &CombatantId) -> Result<f64, SourceError>;

    /// Sum of equipped armor defense
    fn armor_defense(&self, id: &CombatantId) -> Result<f64, SourceError>;

    fn shield(&self, id: &CombatantId) -> Result<Option<ShieldProfile>, SourceError>;

    fn total_equipped_weight(&self, id: &CombatantId) -> Result<f64, SourceError>;

    fn carrying_capacity(&self, id: &CombatantId) -> Result<f64, SourceError>;
}

/// Everything an encounter needs from the outside world
pub trait CombatantSource: StatProvider + EquipmentProvider {}

impl<T: StatProvider + EquipmentProvider> CombatantSource for T {}
