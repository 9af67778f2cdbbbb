//! CombatantStats - Attributes and skill levels of a combatant

use crate::types::SkillType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Skill level assumed for skills a combatant never trained
pub const DEFAULT_SKILL_LEVEL: f64 = 1.0;

/// Attribute and skill snapshot used by combat math
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    #[serde(default = "default_attribute")]
    pub strength: f64,
    #[serde(default = "default_attribute")]
    pub toughness: f64,
    #[serde(default = "default_attribute")]
    pub dexterity: f64,
    #[serde(default = "default_attribute")]
    pub agility: f64,
    /// Trained skill levels; anything absent counts as [`DEFAULT_SKILL_LEVEL`]
    #[serde(default)]
    pub skills: HashMap<SkillType, f64>,
}

fn default_attribute() -> f64 {
    10.0
}

impl Default for CombatantStats {
    fn default() -> Self {
        CombatantStats {
            strength: default_attribute(),
            toughness: default_attribute(),
            dexterity: default_attribute(),
            agility: default_attribute(),
            skills: HashMap::new(),
        }
    }
}

impl CombatantStats {
    pub fn skill_level(&self, skill: SkillType) -> f64 {
        self.skills.get(&skill).copied().unwrap_or(DEFAULT_SKILL_LEVEL)
    }

    /// Builder-style skill assignment
    pub fn with_skill(mut self, skill: SkillType, level: f64) -> Self {
        self.skills.insert(skill, level);
        self
    }

    pub fn set_skill(&mut self, skill: SkillType, level: f64) {
        self.skills.insert(skill, level);
    }
}
