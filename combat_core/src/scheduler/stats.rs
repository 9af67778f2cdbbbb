//! Running totals for one encounter

use crate::combat::CombatResolutionResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterStats {
    pub actions: u32,
    pub total_damage: u64,
    pub hits: u32,
    pub misses: u32,
    pub dodges: u32,
    pub parries: u32,
    pub shield_blocks: u32,
    pub criticals: u32,
    pub deaths: u32,
    pub start_time: f64,
    pub end_time: Option<f64>,
}

impl EncounterStats {
    pub fn new(start_time: f64) -> Self {
        EncounterStats {
            start_time,
            ..Default::default()
        }
    }

    /// Count one resolved action
    pub fn record(&mut self, result: &CombatResolutionResult) {
        self.actions += 1;
        if result.dodged {
            self.dodges += 1;
            return;
        }
        if !result.hit {
            self.misses += 1;
            return;
        }

        self.hits += 1;
        self.total_damage += u64::from(result.final_damage);
        if result.parried {
            self.parries += 1;
        }
        if result.shield_blocked {
            self.shield_blocks += 1;
        }
        if result.critical {
            self.criticals += 1;
        }
    }

    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    /// Seconds from start to end, or to `now` while still running
    pub fn duration(&self, now: f64) -> f64 {
        (self.end_time.unwrap_or(now) - self.start_time).max(0.0)
    }

    /// Percentage of actions that landed
    pub fn hit_rate(&self) -> f64 {
        if self.actions > 0 {
            self.hits as f64 / self.actions as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Average damage per landed hit
    pub fn avg_damage(&self) -> f64 {
        if self.hits > 0 {
            self.total_damage as f64 / self.hits as f64
        } else {
            0.0
        }
    }
}
