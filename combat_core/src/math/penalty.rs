//! Equipment weight penalty
//!
//! The penalty percentage is a piecewise-linear function of the ratio between
//! equipped weight and carrying capacity:
//!
//! | ratio | penalty |
//! |-------|---------|
//! | 0.0   | 0%      |
//! | 0.1   | 5%      |
//! | 0.2   | 20%     |
//! | 0.5   | 60%     |
//! | >=0.7 | 90%     |

use crate::source::{EquipmentProvider, SourceError};
use crate::types::CombatantId;
use serde::{Deserialize, Serialize};

const BREAKPOINTS: [(f64, f64); 5] = [(0.0, 0.0), (0.1, 5.0), (0.2, 20.0), (0.5, 60.0), (0.7, 90.0)];

/// Weight penalty breakdown for one combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentPenalty {
    pub total_weight: f64,
    pub carrying_capacity: f64,
    pub weight_ratio: f64,
    /// 0-90
    pub penalty_percentage: f64,
}

impl Default for EquipmentPenalty {
    fn default() -> Self {
        EquipmentPenalty {
            total_weight: 0.0,
            carrying_capacity: crate::source::Loadout::default().carrying_capacity,
            weight_ratio: 0.0,
            penalty_percentage: 0.0,
        }
    }
}

impl EquipmentPenalty {
    /// Penalty for carrying `total_weight` with the given capacity
    ///
    /// A non-positive capacity leaves the ratio at zero.
    pub fn calculate(total_weight: f64, carrying_capacity: f64) -> Self {
        let weight_ratio = if carrying_capacity > 0.0 {
            total_weight / carrying_capacity
        } else {
            0.0
        };

        EquipmentPenalty {
            total_weight,
            carrying_capacity,
            weight_ratio,
            penalty_percentage: penalty_percentage(weight_ratio),
        }
    }

    /// Penalty for a combatant, looked up through its equipment provider
    pub fn for_combatant(
        equipment: &impl EquipmentProvider,
        id: &CombatantId,
    ) -> Result<Self, SourceError> {
        let weight = equipment.total_equipped_weight(id)?;
        let capacity = equipment.carrying_capacity(id)?;
        Ok(Self::calculate(weight, capacity))
    }
}

/// Penalty percentage for a weight ratio
pub fn penalty_percentage(weight_ratio: f64) -> f64 {
    if !weight_ratio.is_finite() || weight_ratio <= 0.0 {
        return 0.0;
    }

    let (last_ratio, last_penalty) = BREAKPOINTS[BREAKPOINTS.len() - 1];
    if weight_ratio >= last_ratio {
        return last_penalty;
    }

    for pair in BREAKPOINTS.windows(2) {
        let (r0, p0) = pair[0];
        let (r1, p1) = pair[1];
        if weight_ratio < r1 {
            return p0 + (weight_ratio - r0) * (p1 - p0) / (r1 - r0);
        }
    }

    last_penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{CombatantRecord, Loadout, Roster, ShieldProfile};
    use crate::types::Side;

    #[test]
    fn test_breakpoints_exact() {
        assert!((penalty_percentage(0.0) - 0.0).abs() < 1e-9);
        assert!((penalty_percentage(0.1) - 5.0).abs() < 1e-9);
        assert!((penalty_percentage(0.2) - 20.0).abs() < 1e-9);
        assert!((penalty_percentage(0.5) - 60.0).abs() < 1e-9);
        assert!((penalty_percentage(0.7) - 90.0).abs() < 1e-9);
        assert!((penalty_percentage(3.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_between_breakpoints() {
        assert!((penalty_percentage(0.05) - 2.5).abs() < 1e-9);
        assert!((penalty_percentage(0.15) - 12.5).abs() < 1e-9);
        assert!((penalty_percentage(0.35) - 40.0).abs() < 1e-9);
        assert!((penalty_percentage(0.6) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = 0.0;
        for step in 0..=100 {
            let penalty = penalty_percentage(step as f64 / 100.0);
            assert!(penalty >= previous);
            previous = penalty;
        }
    }

    #[test]
    fn test_zero_capacity() {
        let penalty = EquipmentPenalty::calculate(10.0, 0.0);
        assert!((penalty.weight_ratio - 0.0).abs() < f64::EPSILON);
        assert!((penalty.penalty_percentage - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_for_combatant() {
        let mut roster = Roster::new();
        let loadout = Loadout {
            shield: Some(ShieldProfile::new("iron_shield", 5.0, 4.0)),
            armor_weight: 6.0,
            carrying_capacity: 20.0,
            ..Loadout::default()
        };
        roster.insert(CombatantRecord::new("knight", "Knight", Side::Ally, 50.0).with_loadout(loadout));

        let penalty = EquipmentPenalty::for_combatant(&roster, &CombatantId::from("knight")).unwrap();
        assert!((penalty.weight_ratio - 0.5).abs() < 1e-9);
        assert!((penalty.penalty_percentage - 60.0).abs() < 1e-9);
    }
}
