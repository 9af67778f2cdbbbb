//! Attack resolution - Roll an attack profile against a defense profile

use super::result::CombatResolutionResult;
use crate::math::{final_damage, AttackProfile, DefenseProfile};
use rand::Rng;

/// One percentage roll: `uniform(0, 100) < chance`
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() * 100.0 < chance
}

/// Resolve an attack with the thread-local RNG
pub fn resolve_attack(attack: &AttackProfile, defense: &DefenseProfile) -> CombatResolutionResult {
    let mut rng = rand::thread_rng();
    resolve_attack_with_rng(attack, defense, &mut rng)
}

/// Resolve an attack with a provided RNG (for deterministic testing)
///
/// Rolls happen in a fixed order:
/// 1. Dodge; a dodge ends the action
/// 2. Hit; a miss ends the action
/// 3. Parry, shield block and critical, each independent of the others
///
/// Dodged and missed actions deal no damage; a landed one deals at least 1.
pub fn resolve_attack_with_rng(
    attack: &AttackProfile,
    defense: &DefenseProfile,
    rng: &mut impl Rng,
) -> CombatResolutionResult {
    let mut result = CombatResolutionResult {
        hit_chance: attack.hit_chance,
        dodge_chance: defense.dodge_chance,
        parry_chance: defense.parry_chance,
        shield_chance: defense.shield_chance,
        critical_chance: attack.critical_chance,
        base_damage: attack.base_damage,
        ..Default::default()
    };

    if roll_chance(defense.dodge_chance, rng) {
        result.dodged = true;
        return result;
    }

    if !roll_chance(attack.hit_chance, rng) {
        return result;
    }
    result.hit = true;

    result.parried = roll_chance(defense.parry_chance, rng);
    result.shield_blocked = roll_chance(defense.shield_chance, rng);
    result.critical = roll_chance(attack.critical_chance, rng);

    result.final_damage = final_damage(
        attack.base_damage,
        defense.defense_value,
        result.parried,
        result.shield_blocked,
        result.critical,
        defense.shield_defense,
        defense.shield_skill,
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Every roll lands just under 100
    struct AlwaysHigh;

    impl RngCore for AlwaysHigh {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xFF);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn attack(hit: f64, crit: f64, base: u32) -> AttackProfile {
        AttackProfile {
            weapon_id: "iron_sword".to_string(),
            weapon_name: "Iron Sword".to_string(),
            hit_chance: hit,
            critical_chance: crit,
            base_damage: base,
            attack_speed: 1.0,
        }
    }

    #[test]
    fn test_guaranteed_plain_hit() {
        let defense = DefenseProfile::default();
        // Seeded RNG: with zero chances only the 100% hit roll can succeed
        let mut rng = StdRng::seed_from_u64(42);

        let result = resolve_attack_with_rng(&attack(100.0, 0.0, 10), &defense, &mut rng);

        assert!(result.hit);
        assert!(!result.dodged);
        assert!(!result.critical);
        assert!(!result.parried);
        assert!(!result.shield_blocked);
        assert_eq!(result.final_damage, 10);
    }

    #[test]
    fn test_guaranteed_shield_block() {
        let defense = DefenseProfile {
            shield_chance: 100.0,
            shield_defense: 10.0,
            shield_skill: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);

        let result = resolve_attack_with_rng(&attack(100.0, 0.0, 100), &defense, &mut rng);

        assert!(result.shield_blocked);
        assert_eq!(result.final_damage, 17);
    }

    #[test]
    fn test_dodge_short_circuits() {
        let defense = DefenseProfile {
            dodge_chance: 100.0,
            ..Default::default()
        };
        let mut rng = StepRng::new(0, 0);

        let result = resolve_attack_with_rng(&attack(100.0, 100.0, 10), &defense, &mut rng);

        assert!(result.dodged);
        assert!(!result.hit);
        assert_eq!(result.final_damage, 0);
    }

    #[test]
    fn test_forced_miss() {
        let defense = DefenseProfile::default();
        let result = resolve_attack_with_rng(&attack(66.9, 50.0, 10), &defense, &mut AlwaysHigh);

        assert!(!result.hit);
        assert!(!result.dodged);
        assert_eq!(result.final_damage, 0);
    }

    #[test]
    fn test_all_secondary_rolls_together() {
        let defense = DefenseProfile {
            parry_chance: 50.0,
            shield_chance: 50.0,
            ..Default::default()
        };
        // All-zero rolls succeed every check with a positive chance
        let mut rng = StepRng::new(0, 0);

        let result = resolve_attack_with_rng(&attack(50.0, 50.0, 100), &defense, &mut rng);

        assert!(result.parried && result.shield_blocked && result.critical);
        // Zero-chance dodge never triggers
        assert!(!result.dodged);
        // 100 * 2 * 0.2, shield with no defense or skill passes everything
        assert_eq!(result.final_damage, 40);
    }

    #[test]
    fn test_roll_chance_bounds() {
        let mut low = StepRng::new(0, 0);
        assert!(!roll_chance(0.0, &mut low));
        assert!(roll_chance(0.001, &mut low));
        assert!(!roll_chance(99.9, &mut AlwaysHigh));
        assert!(roll_chance(100.0, &mut AlwaysHigh));
    }
}
