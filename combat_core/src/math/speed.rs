//! Attack speed - How often a combatant acts (actions per second)

use super::constants::MIN_MELEE_ATTACK_SPEED;
use crate::types::WeaponKind;

/// Actions per second for a weapon in a combatant's hands
///
/// Ranged: `1 + dex*0.01 + skill*0.03`.
/// Melee: `max(0.1, 2 + agi*0.02 + skill*0.01 - weight / max(1, str*0.3))`.
pub fn attack_speed(
    kind: WeaponKind,
    dexterity: f64,
    agility: f64,
    strength: f64,
    weapon_skill: f64,
    weapon_weight: f64,
) -> f64 {
    match kind {
        WeaponKind::Ranged => 1.0 + dexterity * 0.01 + weapon_skill * 0.03,
        WeaponKind::Melee => {
            let base = 2.0 + agility * 0.02 + weapon_skill * 0.01;
            let weight_penalty = weapon_weight / (strength * 0.3).max(1.0);
            (base - weight_penalty).max(MIN_MELEE_ATTACK_SPEED)
        }
    }
}

/// Replace a non-finite or non-positive speed with `fallback`
pub fn sanitize_attack_speed(speed: f64, fallback: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        fallback
    }
}

/// Seconds between two actions at the given speed
pub fn action_interval(attack_speed: f64) -> f64 {
    1.0 / attack_speed
}
