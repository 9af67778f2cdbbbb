//! CombatResolutionResult - Outcome of one resolved action

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every chance and roll of a single action, discarded after the action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CombatResolutionResult {
    // === Chances (percent) ===
    pub hit_chance: f64,
    pub dodge_chance: f64,
    pub parry_chance: f64,
    pub shield_chance: f64,
    pub critical_chance: f64,

    // === Damage ===
    pub base_damage: u32,
    /// Zero when the action was dodged or missed
    pub final_damage: u32,

    // === Flags ===
    pub dodged: bool,
    pub hit: bool,
    pub parried: bool,
    pub shield_blocked: bool,
    pub critical: bool,
}

/// Coarse classification of a resolved action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollOutcome {
    Dodged,
    Missed,
    Landed,
}

impl CombatResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> RollOutcome {
        if self.dodged {
            RollOutcome::Dodged
        } else if self.hit {
            RollOutcome::Landed
        } else {
            RollOutcome::Missed
        }
    }

    /// Whether the action dealt damage
    pub fn landed(&self) -> bool {
        self.outcome() == RollOutcome::Landed
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        match self.outcome() {
            RollOutcome::Dodged => "Dodged".to_string(),
            RollOutcome::Missed => "Missed".to_string(),
            RollOutcome::Landed => {
                let mut parts = vec![format!("{} damage", self.final_damage)];
                if self.critical {
                    parts.push("critical".to_string());
                }
                if self.parried {
                    parts.push("parried".to_string());
                }
                if self.shield_blocked {
                    parts.push("blocked".to_string());
                }
                parts.join(", ")
            }
        }
    }
}

impl fmt::Display for CombatResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (hit {:.1}%, dodge {:.1}%, parry {:.1}%, shield {:.1}%, crit {:.1}%)",
            self.summary(),
            self.hit_chance,
            self.dodge_chance,
            self.parry_chance,
            self.shield_chance,
            self.critical_chance
        )
    }
}
