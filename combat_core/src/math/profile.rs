//! Attack and defense profiles - Every number one action needs, derived up front
//!
//! Profiles are the seam between the stat/equipment lookups and the rolls:
//! the resolution pipeline only ever sees these two structs, so tests can feed
//! it exact percentages without building a combatant.

use super::chance::{critical_chance, dodge_chance, hit_chance, parry_chance, reduce_by_penalty, shield_chance};
use super::damage::{armed_base_damage, defense_value, natural_base_damage};
use super::penalty::EquipmentPenalty;
use super::speed::attack_speed;
use crate::source::{CombatantStats, ShieldProfile, WeaponProfile};
use crate::types::SkillType;
use serde::{Deserialize, Serialize};

/// Attacker-side numbers for one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub weapon_id: String,
    pub weapon_name: String,
    pub hit_chance: f64,
    pub critical_chance: f64,
    pub base_damage: u32,
    /// Raw speed; may still need sanitizing before use as a divisor
    pub attack_speed: f64,
}

impl AttackProfile {
    /// Derive the attacker's numbers for the weapon it is about to use
    ///
    /// Natural and unarmed weapons use the unarmed damage formula; a natural
    /// weapon with its own attack power overrides `natural_attack_power`.
    pub fn derive(stats: &CombatantStats, weapon: &WeaponProfile, natural_attack_power: f64) -> Self {
        let skill = stats.skill_level(weapon.skill);

        let base_damage = if weapon.is_natural() || weapon.is_unarmed() {
            let power = if weapon.attack_power > 0.0 {
                weapon.attack_power
            } else {
                natural_attack_power
            };
            natural_base_damage(power, stats.skill_level(SkillType::Combat), stats.strength)
        } else {
            armed_base_damage(
                weapon.attack_power,
                skill,
                weapon.kind,
                stats.dexterity,
                stats.strength,
            )
        };

        AttackProfile {
            weapon_id: weapon.id.clone(),
            weapon_name: weapon.name.clone(),
            hit_chance: hit_chance(skill, stats.dexterity, weapon.weight, stats.strength),
            critical_chance: critical_chance(stats.dexterity, skill),
            base_damage,
            attack_speed: attack_speed(
                weapon.kind,
                stats.dexterity,
                stats.agility,
                stats.strength,
                skill,
                weapon.weight,
            ),
        }
    }
}

/// Defender-side numbers for one action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DefenseProfile {
    pub dodge_chance: f64,
    pub parry_chance: f64,
    /// Zero without a shield
    pub shield_chance: f64,
    pub defense_value: u32,
    pub shield_defense: f64,
    pub shield_skill: f64,
    pub penalty: EquipmentPenalty,
}

impl DefenseProfile {
    /// Derive the defender's numbers
    ///
    /// With `apply_penalty` the equipment penalty scales dodge and parry down;
    /// otherwise it is only carried along for display.
    pub fn derive(
        stats: &CombatantStats,
        armor_defense: f64,
        shield: Option<&ShieldProfile>,
        penalty: EquipmentPenalty,
        apply_penalty: bool,
    ) -> Self {
        let mut dodge = dodge_chance(stats.agility, stats.skill_level(SkillType::Evasion));
        let mut parry = parry_chance(stats.dexterity, stats.skill_level(SkillType::Parry));

        if apply_penalty {
            dodge = reduce_by_penalty(dodge, penalty.penalty_percentage);
            parry = reduce_by_penalty(parry, penalty.penalty_percentage);
        }

        let (shield_chance, shield_defense, shield_skill) = match shield {
            Some(shield) => {
                let skill = stats.skill_level(SkillType::Shield);
                (shield_chance(skill, stats.dexterity), shield.defense, skill)
            }
            None => (0.0, 0.0, 0.0),
        };

        DefenseProfile {
            dodge_chance: dodge,
            parry_chance: parry,
            shield_chance,
            defense_value: defense_value(armor_defense, stats.toughness),
            shield_defense,
            shield_skill,
            penalty,
        }
    }
}
