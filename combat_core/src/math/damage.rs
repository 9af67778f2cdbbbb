//! Damage formulas - base damage, defense and the final damage chain

use super::constants::{
    ARMOR_SCALE, CRITICAL_MULTIPLIER, MIN_SHIELD_MULTIPLIER, PARRY_MULTIPLIER,
    SHIELD_REDUCTION_FACTOR,
};
use crate::types::WeaponKind;

/// Base damage of unarmed and natural-weapon attacks
///
/// `natural_power + combat_skill*0.8 + str*0.7`, rounded, at least 1.
pub fn natural_base_damage(natural_attack_power: f64, combat_skill: f64, strength: f64) -> u32 {
    let damage = natural_attack_power + combat_skill * 0.8 + strength * 0.7;
    round_at_least_one(damage)
}

/// Base damage of a crafted weapon
///
/// `attack_power * (1 + skill/20)` plus half of dexterity (ranged) or
/// strength (melee), rounded, at least 1.
pub fn armed_base_damage(
    weapon_attack_power: f64,
    weapon_skill: f64,
    kind: WeaponKind,
    dexterity: f64,
    strength: f64,
) -> u32 {
    let weapon_damage = weapon_attack_power * (1.0 + weapon_skill / 20.0);
    let ability_modifier = match kind {
        WeaponKind::Ranged => dexterity * 0.5,
        WeaponKind::Melee => strength * 0.5,
    };
    round_at_least_one(weapon_damage + ability_modifier)
}

/// Armor mitigation input: `armor + toughness*0.3`, rounded, never negative
pub fn defense_value(armor_defense: f64, toughness: f64) -> u32 {
    let value = (armor_defense + toughness * 0.3).round();
    if value.is_finite() && value > 0.0 {
        value as u32
    } else {
        0
    }
}

/// Fraction of damage that passes a shield block
///
/// `max(0.02, 1 / (1 + (shield_defense + shield_skill) * 0.5))`; exactly 1.0
/// when neither the shield nor the skill contribute.
pub fn shield_damage_multiplier(shield_defense: f64, shield_skill: f64) -> f64 {
    if shield_defense == 0.0 && shield_skill == 0.0 {
        return 1.0;
    }
    let blocking = (shield_defense + shield_skill).max(0.0);
    (1.0 / (1.0 + blocking * SHIELD_REDUCTION_FACTOR)).max(MIN_SHIELD_MULTIPLIER)
}

/// Damage dealt by a landed hit
///
/// Multipliers apply in a fixed order: critical (x2), parry (x0.2), shield
/// block, then armor mitigation `100 / (100 + defense)`. A hit always deals
/// at least 1.
pub fn final_damage(
    base_damage: u32,
    defense: u32,
    parried: bool,
    shield_blocked: bool,
    critical: bool,
    shield_defense: f64,
    shield_skill: f64,
) -> u32 {
    let mut damage = base_damage as f64;

    if critical {
        damage *= CRITICAL_MULTIPLIER;
    }

    if parried {
        damage *= PARRY_MULTIPLIER;
    }

    if shield_blocked {
        damage *= shield_damage_multiplier(shield_defense, shield_skill);
    }

    damage = damage * ARMOR_SCALE / (ARMOR_SCALE + defense as f64);

    round_at_least_one(damage)
}

fn round_at_least_one(value: f64) -> u32 {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= 1.0 {
        rounded.min(u32::MAX as f64) as u32
    } else {
        1
    }
}
