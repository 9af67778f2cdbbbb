//! Combat math - Pure formulas turning stats and gear into combat numbers

mod chance;
mod damage;
mod penalty;
mod profile;
mod speed;

pub use chance::{
    critical_chance, dodge_chance, hit_chance, parry_chance, reduce_by_penalty, shield_chance,
};
pub use damage::{
    armed_base_damage, defense_value, final_damage, natural_base_damage, shield_damage_multiplier,
};
pub use penalty::{penalty_percentage, EquipmentPenalty};
pub use profile::{AttackProfile, DefenseProfile};
pub use speed::{action_interval, attack_speed, sanitize_attack_speed};

/// Formula constants
pub mod constants {
    /// Hit chance never drops below this percentage
    pub const MIN_HIT_CHANCE: f64 = 5.0;

    /// Upper bound for shield block chance
    pub const MAX_SHIELD_CHANCE: f64 = 95.0;

    /// Shield skill at which the linear block-chance ramp starts
    pub const SHIELD_SKILL_KNEE: f64 = 5.0;

    /// Melee attack speed floor (actions per second)
    pub const MIN_MELEE_ATTACK_SPEED: f64 = 0.1;

    pub const CRITICAL_MULTIPLIER: f64 = 2.0;

    /// A parried hit keeps 20% of its damage
    pub const PARRY_MULTIPLIER: f64 = 0.2;

    /// A shield block always lets at least 2% through
    pub const MIN_SHIELD_MULTIPLIER: f64 = 0.02;

    pub const SHIELD_REDUCTION_FACTOR: f64 = 0.5;

    /// Armor mitigation: damage * ARMOR_SCALE / (ARMOR_SCALE + defense)
    pub const ARMOR_SCALE: f64 = 100.0;
}
