//! Weapon, shield and loadout descriptions

use crate::types::{is_natural_weapon_id, is_unarmed_id, SkillType, WeaponKind};
use serde::{Deserialize, Serialize};

/// Weight of bare hands when used as a weapon
pub const UNARMED_WEIGHT: f64 = 0.5;

/// Attack power of an unarmed human
pub const DEFAULT_NATURAL_ATTACK_POWER: f64 = 2.0;

/// Carrying capacity assumed when none is known
pub const DEFAULT_CARRYING_CAPACITY: f64 = 20.0;

/// A weapon as seen by combat math
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Item id; empty means unarmed
    pub id: String,
    pub name: String,
    pub kind: WeaponKind,
    pub skill: SkillType,
    pub weight: f64,
    pub attack_power: f64,
    /// Claws, fangs and other species attacks
    #[serde(default)]
    pub natural: bool,
}

impl WeaponProfile {
    /// Weapon with kind and skill inferred from the item id
    pub fn from_id(id: impl Into<String>, weight: f64, attack_power: f64) -> Self {
        let id = id.into();
        WeaponProfile {
            name: id.clone(),
            kind: WeaponKind::for_weapon_id(&id),
            skill: SkillType::for_weapon_id(&id),
            natural: is_natural_weapon_id(&id),
            id,
            weight,
            attack_power,
        }
    }

    /// Bare hands
    pub fn unarmed() -> Self {
        WeaponProfile {
            id: String::new(),
            name: "Fists".to_string(),
            kind: WeaponKind::Melee,
            skill: SkillType::Combat,
            weight: UNARMED_WEIGHT,
            attack_power: 0.0,
            natural: true,
        }
    }

    /// Species attack such as "wolf_fang"; always melee and trained by Combat
    pub fn natural(id: impl Into<String>, attack_power: f64) -> Self {
        let id = id.into();
        WeaponProfile {
            name: id.clone(),
            id,
            kind: WeaponKind::Melee,
            skill: SkillType::Combat,
            weight: 0.0,
            attack_power,
            natural: true,
        }
    }

    pub fn is_unarmed(&self) -> bool {
        is_unarmed_id(&self.id)
    }

    /// Natural and unarmed attacks share the unarmed damage formula
    pub fn is_natural(&self) -> bool {
        self.natural || is_natural_weapon_id(&self.id)
    }

    pub fn is_ranged(&self) -> bool {
        self.kind == WeaponKind::Ranged
    }
}

/// An equipped shield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldProfile {
    pub id: String,
    pub name: String,
    pub defense: f64,
    #[serde(default)]
    pub weight: f64,
}

impl ShieldProfile {
    pub fn new(id: impl Into<String>, defense: f64, weight: f64) -> Self {
        let id = id.into();
        ShieldProfile {
            name: id.clone(),
            id,
            defense,
            weight,
        }
    }
}

/// Everything a combatant carries into an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    #[serde(default)]
    pub weapon: Option<WeaponProfile>,
    #[serde(default)]
    pub natural_weapon: Option<WeaponProfile>,
    #[serde(default = "default_natural_attack_power")]
    pub natural_attack_power: f64,
    #[serde(default)]
    pub armor_defense: f64,
    #[serde(default)]
    pub shield: Option<ShieldProfile>,
    /// Weight of worn armor and other equipment besides weapon and shield
    #[serde(default)]
    pub armor_weight: f64,
    #[serde(default = "default_carrying_capacity")]
    pub carrying_capacity: f64,
}

fn default_natural_attack_power() -> f64 {
    DEFAULT_NATURAL_ATTACK_POWER
}

fn default_carrying_capacity() -> f64 {
    DEFAULT_CARRYING_CAPACITY
}

impl Default for Loadout {
    fn default() -> Self {
        Loadout {
            weapon: None,
            natural_weapon: None,
            natural_attack_power: DEFAULT_NATURAL_ATTACK_POWER,
            armor_defense: 0.0,
            shield: None,
            armor_weight: 0.0,
            carrying_capacity: DEFAULT_CARRYING_CAPACITY,
        }
    }
}

impl Loadout {
    /// Total weight of equipped weapon, shield and armor
    pub fn total_weight(&self) -> f64 {
        let weapon = self.weapon.as_ref().map(|w| w.weight).unwrap_or(0.0);
        let shield = self.shield.as_ref().map(|s| s.weight).unwrap_or(0.0);
        weapon + shield + self.armor_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_profile() {
        let fists = WeaponProfile::unarmed();
        assert!(fists.is_unarmed());
        assert!(fists.is_natural());
        assert!(!fists.is_ranged());
        assert!((fists.weight - UNARMED_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_id_inference() {
        let bow = WeaponProfile::from_id("long_bow", 1.2, 8.0);
        assert!(bow.is_ranged());
        assert_eq!(bow.skill, SkillType::Archery);
        assert!(!bow.is_natural());

        let fang = WeaponProfile::from_id("wolf_fang", 0.0, 4.0);
        assert!(fang.is_natural());
        assert_eq!(fang.skill, WeaponProfile::natural("wolf_fang", 4.0).skill);
    }

    #[test]
    fn test_total_weight() {
        let loadout = Loadout {
            weapon: Some(WeaponProfile::from_id("iron_sword", 3.0, 10.0)),
            shield: Some(ShieldProfile::new("wooden_shield", 2.0, 2.5)),
            armor_weight: 4.5,
            ..Loadout::default()
        };
        assert!((loadout.total_weight() - 10.0).abs() < f64::EPSILON);
    }
}
