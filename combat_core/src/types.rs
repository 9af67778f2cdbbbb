//! Core types shared across the combat engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a registered combatant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatantId(pub String);

impl CombatantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id never refers to a combatant
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl From<&str> for CombatantId {
    fn from(s: &str) -> Self {
        CombatantId(s.to_string())
    }
}

impl From<String> for CombatantId {
    fn from(s: String) -> Self {
        CombatantId(s)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which collection of the registry a combatant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    /// The side this one attacks
    pub fn opposite(self) -> Side {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Ally => f.write_str("ally"),
            Side::Enemy => f.write_str("enemy"),
        }
    }
}

/// Trained skills consumed by combat math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    /// Unarmed and natural weapon fighting
    Combat,
    OneHandedWeapons,
    TwoHandedWeapons,
    PolearmWeapons,
    Archery,
    Firearms,
    Throwing,
    Evasion,
    Parry,
    Shield,
}

impl SkillType {
    /// Infer the weapon skill trained by a weapon from its item id
    ///
    /// Unarmed and natural attacks are always trained by Combat.
    pub fn for_weapon_id(weapon_id: &str) -> SkillType {
        if is_natural_weapon_id(weapon_id) {
            return SkillType::Combat;
        }

        let id = weapon_id.to_ascii_lowercase();
        if id.contains("sword") || id.contains("axe") || id.contains("mace") {
            SkillType::OneHandedWeapons
        } else if id.contains("two_hand") || id.contains("great") {
            SkillType::TwoHandedWeapons
        } else if id.contains("spear") || id.contains("halberd") {
            SkillType::PolearmWeapons
        } else if id.contains("bow") {
            SkillType::Archery
        } else if id.contains("gun") {
            SkillType::Firearms
        } else if id.contains("throwing") {
            SkillType::Throwing
        } else {
            SkillType::OneHandedWeapons
        }
    }
}

/// Delivery of a weapon; decides which attack speed and damage formula apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[default]
    Melee,
    Ranged,
}

impl WeaponKind {
    /// Infer the weapon kind from its item id
    pub fn for_weapon_id(weapon_id: &str) -> WeaponKind {
        let id = weapon_id.to_ascii_lowercase();
        if id.contains("bow") || id.contains("gun") || id.contains("throwing") {
            WeaponKind::Ranged
        } else {
            WeaponKind::Melee
        }
    }
}

/// Item id used for bare-handed attacks
pub const UNARMED_ID: &str = "unarmed";

/// Empty ids and the explicit "unarmed" id both mean no weapon
pub fn is_unarmed_id(weapon_id: &str) -> bool {
    weapon_id.is_empty() || weapon_id == UNARMED_ID
}

/// Species-intrinsic attacks (claws, fangs, ...) use the unarmed damage formula
pub fn is_natural_weapon_id(weapon_id: &str) -> bool {
    if is_unarmed_id(weapon_id) {
        return true;
    }
    ["_bite", "_claw", "_fang", "_tongue"]
        .iter()
        .any(|suffix| weapon_id.contains(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_skill_inference() {
        assert_eq!(SkillType::for_weapon_id(""), SkillType::Combat);
        assert_eq!(SkillType::for_weapon_id("unarmed"), SkillType::Combat);
        assert_eq!(SkillType::for_weapon_id("wolf_fang"), SkillType::Combat);
        assert_eq!(SkillType::for_weapon_id("axe_beak_bite"), SkillType::Combat);
        assert_eq!(SkillType::for_weapon_id("iron_sword"), SkillType::OneHandedWeapons);
        assert_eq!(SkillType::for_weapon_id("great_hammer"), SkillType::TwoHandedWeapons);
        assert_eq!(SkillType::for_weapon_id("iron_spear"), SkillType::PolearmWeapons);
        assert_eq!(SkillType::for_weapon_id("long_bow"), SkillType::Archery);
        assert_eq!(SkillType::for_weapon_id("flint_gun"), SkillType::Firearms);
        assert_eq!(SkillType::for_weapon_id("throwing_knife"), SkillType::Throwing);
        assert_eq!(SkillType::for_weapon_id("club"), SkillType::OneHandedWeapons);
    }

    #[test]
    fn test_weapon_kind_inference() {
        assert_eq!(WeaponKind::for_weapon_id("short_bow"), WeaponKind::Ranged);
        assert_eq!(WeaponKind::for_weapon_id("throwing_axe"), WeaponKind::Ranged);
        assert_eq!(WeaponKind::for_weapon_id("iron_sword"), WeaponKind::Melee);
    }

    #[test]
    fn test_natural_weapon_ids() {
        assert!(is_natural_weapon_id(""));
        assert!(is_natural_weapon_id("wolf_fang"));
        assert!(is_natural_weapon_id("bear_claw"));
        assert!(!is_natural_weapon_id("iron_sword"));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Ally.opposite(), Side::Enemy);
        assert_eq!(Side::Enemy.opposite(), Side::Ally);
    }

    #[test]
    fn test_combatant_id_validity() {
        assert!(CombatantId::from("hero").is_valid());
        assert!(!CombatantId::from("").is_valid());
        assert!(!CombatantId::from("  ").is_valid());
    }
}
