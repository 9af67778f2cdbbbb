//! Roster files - Weapon and shield catalogs plus the combatants using them

use super::ConfigError;
use crate::source::{
    CombatantRecord, CombatantStats, Loadout, Roster, ShieldProfile, WeaponProfile,
};
use crate::types::{CombatantId, Side, SkillType, WeaponKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Catalog entry for a weapon
///
/// Kind and skill are inferred from the id when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<WeaponKind>,
    #[serde(default)]
    pub skill: Option<SkillType>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub attack_power: f64,
}

impl WeaponConfig {
    pub fn to_profile(&self) -> WeaponProfile {
        let mut profile = WeaponProfile::from_id(self.id.clone(), self.weight, self.attack_power);
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(kind) = self.kind {
            profile.kind = kind;
        }
        if let Some(skill) = self.skill {
            profile.skill = skill;
        }
        profile
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub weight: f64,
}

impl ShieldConfig {
    pub fn to_profile(&self) -> ShieldProfile {
        let mut profile = ShieldProfile::new(self.id.clone(), self.defense, self.weight);
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        profile
    }
}

/// One combatant as written in a roster file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub side: Side,
    /// Maximum health; combatants start at full health
    pub health: f64,
    #[serde(default)]
    pub stats: CombatantStats,
    /// Catalog weapon id
    #[serde(default)]
    pub weapon: Option<String>,
    /// Species attack id, e.g. "wolf_fang"; need not be in the catalog
    #[serde(default)]
    pub natural_weapon: Option<String>,
    #[serde(default = "default_natural_attack_power")]
    pub natural_attack_power: f64,
    #[serde(default)]
    pub armor_defense: f64,
    /// Catalog shield id
    #[serde(default)]
    pub shield: Option<String>,
    /// Armor and other carried weight besides weapon and shield
    #[serde(default)]
    pub armor_weight: f64,
    #[serde(default = "default_carrying_capacity")]
    pub carrying_capacity: f64,
}

fn default_natural_attack_power() -> f64 {
    Loadout::default().natural_attack_power
}

fn default_carrying_capacity() -> f64 {
    Loadout::default().carrying_capacity
}

/// Contents of a roster file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub weapons: Vec<WeaponConfig>,
    #[serde(default)]
    pub shields: Vec<ShieldConfig>,
    #[serde(default)]
    pub combatants: Vec<CombatantConfig>,
}

impl RosterConfig {
    /// Load and validate a roster file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: RosterConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a roster from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let weapon_ids = unique_ids("weapon", self.weapons.iter().map(|w| w.id.as_str()))?;
        let shield_ids = unique_ids("shield", self.shields.iter().map(|s| s.id.as_str()))?;
        unique_ids("combatant", self.combatants.iter().map(|c| c.id.as_str()))?;

        for combatant in &self.combatants {
            if !CombatantId::from(combatant.id.as_str()).is_valid() {
                return Err(ConfigError::ValidationError(
                    "combatant id must not be blank".to_string(),
                ));
            }
            if !(combatant.health.is_finite() && combatant.health > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "combatant '{}' must have positive health, got {}",
                    combatant.id, combatant.health
                )));
            }
            if let Some(weapon) = &combatant.weapon {
                if !weapon_ids.contains(weapon.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "combatant '{}' references unknown weapon '{}'",
                        combatant.id, weapon
                    )));
                }
            }
            if let Some(shield) = &combatant.shield {
                if !shield_ids.contains(shield.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "combatant '{}' references unknown shield '{}'",
                        combatant.id, shield
                    )));
                }
            }
        }

        Ok(())
    }

    /// Resolve catalog references into a provider-ready roster
    pub fn build_roster(&self) -> Result<Roster, ConfigError> {
        self.validate()?;

        let weapons: HashMap<&str, &WeaponConfig> =
            self.weapons.iter().map(|w| (w.id.as_str(), w)).collect();
        let shields: HashMap<&str, &ShieldConfig> =
            self.shields.iter().map(|s| (s.id.as_str(), s)).collect();

        let mut roster = Roster::new();
        for combatant in &self.combatants {
            let weapon = combatant
                .weapon
                .as_deref()
                .and_then(|id| weapons.get(id))
                .map(|w| w.to_profile());

            let natural_weapon = combatant.natural_weapon.as_deref().map(|id| {
                match weapons.get(id) {
                    Some(w) => {
                        let mut profile = w.to_profile();
                        profile.natural = true;
                        if w.skill.is_none() {
                            profile.skill = SkillType::Combat;
                        }
                        profile
                    }
                    None => WeaponProfile::natural(id, 0.0),
                }
            });

            let shield = combatant
                .shield
                .as_deref()
                .and_then(|id| shields.get(id))
                .map(|s| s.to_profile());

            let loadout = Loadout {
                weapon,
                natural_weapon,
                natural_attack_power: combatant.natural_attack_power,
                armor_defense: combatant.armor_defense,
                shield,
                armor_weight: combatant.armor_weight,
                carrying_capacity: combatant.carrying_capacity,
            };

            let name = combatant.name.clone().unwrap_or_else(|| combatant.id.clone());
            let record = CombatantRecord::new(combatant.id.as_str(), name, combatant.side, combatant.health)
                .with_stats(combatant.stats.clone())
                .with_loadout(loadout);
            roster.insert(record);
        }

        Ok(roster)
    }
}

fn unique_ids<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, ConfigError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {} id '{}'",
                what, id
            )));
        }
    }
    Ok(seen)
}
