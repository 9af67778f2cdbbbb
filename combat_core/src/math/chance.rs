//! Probability formulas (all results are percentages)

use super::constants::{MAX_SHIELD_CHANCE, MIN_HIT_CHANCE, SHIELD_SKILL_KNEE};

/// Attacker's chance to land a blow
///
/// `50 + skill*2 + dex*1.5 - weight / max(1, str*0.5)`, floored at 5%.
pub fn hit_chance(weapon_skill: f64, dexterity: f64, weapon_weight: f64, strength: f64) -> f64 {
    let base = 50.0 + weapon_skill * 2.0 + dexterity * 1.5;
    let weight_penalty = weapon_weight / (strength * 0.5).max(1.0);
    (base - weight_penalty).max(MIN_HIT_CHANCE)
}

/// Defender's chance to avoid the attack entirely
pub fn dodge_chance(agility: f64, evasion_skill: f64) -> f64 {
    (10.0 + agility * 2.0 + evasion_skill * 2.0).max(0.0)
}

/// Defender's chance to deflect most of a landed hit
pub fn parry_chance(dexterity: f64, parry_skill: f64) -> f64 {
    (5.0 + dexterity * 1.5 + parry_skill * 3.0).max(0.0)
}

/// Defender's chance to catch a landed hit on a shield
///
/// Skill 0-5 ramps 0% to 30%, then 30% + (skill - 5) * 60/95 so that skill 100
/// reaches 90%. Dexterity adds a small bonus. Clamped to `[0, 95]`.
pub fn shield_chance(shield_skill: f64, dexterity: f64) -> f64 {
    let base = if shield_skill < SHIELD_SKILL_KNEE {
        shield_skill * 6.0
    } else {
        30.0 + (shield_skill - SHIELD_SKILL_KNEE) * (60.0 / 95.0)
    };
    (base + dexterity * 0.3).clamp(0.0, MAX_SHIELD_CHANCE)
}

pub fn critical_chance(dexterity: f64, weapon_skill: f64) -> f64 {
    5.0 + dexterity * 0.5 + weapon_skill * 0.3
}

/// Scale a chance down by an equipment penalty percentage
pub fn reduce_by_penalty(chance: f64, penalty_percentage: f64) -> f64 {
    let penalty = penalty_percentage.clamp(0.0, 100.0) / 100.0;
    (chance - chance * penalty).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hit_chance_default_human() {
        // 50 + 2 + 15 - 0.5 / 5 = 66.9
        let chance = hit_chance(1.0, 10.0, 0.5, 10.0);
        assert!((chance - 66.9).abs() < 1e-9);
    }

    #[test]
    fn test_hit_chance_weak_wielder_floor() {
        // Strength 0 still divides by at least 1
        let chance = hit_chance(0.0, 0.0, 500.0, 0.0);
        assert!((chance - MIN_HIT_CHANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dodge_and_parry() {
        assert!((dodge_chance(10.0, 1.0) - 32.0).abs() < f64::EPSILON);
        assert!((parry_chance(10.0, 1.0) - 23.0).abs() < f64::EPSILON);
        assert!((dodge_chance(-50.0, 0.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shield_chance_ramp() {
        assert!((shield_chance(0.0, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((shield_chance(4.0, 0.0) - 24.0).abs() < f64::EPSILON);
        assert!((shield_chance(5.0, 0.0) - 30.0).abs() < f64::EPSILON);
        assert!((shield_chance(100.0, 0.0) - 90.0).abs() < 1e-9);
        assert!((shield_chance(100.0, 50.0) - MAX_SHIELD_CHANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_critical_chance() {
        // 5 + 5 + 0.3
        assert!((critical_chance(10.0, 1.0) - 10.3).abs() < 1e-9);
    }

    #[test]
    fn test_reduce_by_penalty() {
        assert!((reduce_by_penalty(40.0, 50.0) - 20.0).abs() < f64::EPSILON);
        assert!((reduce_by_penalty(40.0, 0.0) - 40.0).abs() < f64::EPSILON);
        assert!((reduce_by_penalty(40.0, 150.0) - 0.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_chances_respect_bounds(
            skill in 0.0f64..200.0,
            dexterity in 0.0f64..200.0,
            agility in 0.0f64..200.0,
            strength in 0.0f64..200.0,
            weight in 0.0f64..500.0,
        ) {
            prop_assert!(hit_chance(skill, dexterity, weight, strength) >= MIN_HIT_CHANCE);
            prop_assert!(dodge_chance(agility, skill) >= 0.0);
            prop_assert!(parry_chance(dexterity, skill) >= 0.0);
            let shield = shield_chance(skill, dexterity);
            prop_assert!((0.0..=MAX_SHIELD_CHANCE).contains(&shield));
            prop_assert!(critical_chance(dexterity, skill) >= 5.0);
        }
    }
}
