//! Combatant registry - Ally and enemy action records

use crate::source::HealthQueryable;
use crate::types::{CombatantId, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Scheduling state of one registered combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantAction {
    pub combatant_id: CombatantId,
    /// Last resolved target
    pub target_id: Option<CombatantId>,
    /// Absolute time at which the combatant may act again
    pub next_action_time: f64,
    /// Actions per second from the last resolved action
    pub attack_speed: f64,
}

impl CombatantAction {
    /// Fresh record, eligible to act immediately
    pub fn new(combatant_id: CombatantId) -> Self {
        CombatantAction {
            combatant_id,
            target_id: None,
            next_action_time: 0.0,
            attack_speed: 0.0,
        }
    }

    pub fn is_ready(&self, now: f64) -> bool {
        self.next_action_time <= now
    }
}

/// Two ordered collections of action records, one per side
///
/// An id appears at most once across both sides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatantRegistry {
    allies: Vec<CombatantAction>,
    enemies: Vec<CombatantAction>,
}

impl CombatantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_ally(&mut self, id: CombatantId) -> bool {
        self.register(id, Side::Ally)
    }

    pub fn register_enemy(&mut self, id: CombatantId) -> bool {
        self.register(id, Side::Enemy)
    }

    /// Add a combatant to `side`; invalid or already registered ids are ignored
    pub fn register(&mut self, id: CombatantId, side: Side) -> bool {
        if !id.is_valid() {
            warn!("Ignoring registration of invalid combatant id {:?}", id.as_str());
            return false;
        }
        if self.contains(&id) {
            debug!(combatant = %id, "Combatant already registered");
            return false;
        }

        debug!(combatant = %id, %side, "Registered combatant");
        self.side_mut(side).push(CombatantAction::new(id));
        true
    }

    /// Remove a combatant from whichever side holds it
    pub fn unregister(&mut self, id: &CombatantId) -> bool {
        for side in [Side::Ally, Side::Enemy] {
            let actions = self.side_mut(side);
            if let Some(index) = actions.iter().position(|a| &a.combatant_id == id) {
                actions.remove(index);
                return true;
            }
        }
        false
    }

    pub fn contains(&self, id: &CombatantId) -> bool {
        self.side_of(id).is_some()
    }

    /// Side holding `id`, if registered
    pub fn side_of(&self, id: &CombatantId) -> Option<Side> {
        if self.allies.iter().any(|a| &a.combatant_id == id) {
            Some(Side::Ally)
        } else if self.enemies.iter().any(|a| &a.combatant_id == id) {
            Some(Side::Enemy)
        } else {
            None
        }
    }

    pub fn find(&self, id: &CombatantId) -> Option<&CombatantAction> {
        self.allies
            .iter()
            .chain(self.enemies.iter())
            .find(|a| &a.combatant_id == id)
    }

    pub fn find_mut(&mut self, id: &CombatantId) -> Option<&mut CombatantAction> {
        self.allies
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|a| &a.combatant_id == id)
    }

    /// Action records of `side`, in registration order
    pub fn side(&self, side: Side) -> &[CombatantAction] {
        match side {
            Side::Ally => &self.allies,
            Side::Enemy => &self.enemies,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<CombatantAction> {
        match side {
            Side::Ally => &mut self.allies,
            Side::Enemy => &mut self.enemies,
        }
    }

    /// Ids on `side` whose current health is positive
    pub fn alive(&self, side: Side, health: &impl HealthQueryable) -> Vec<CombatantId> {
        self.side(side)
            .iter()
            .filter(|a| health.is_alive(&a.combatant_id))
            .map(|a| a.combatant_id.clone())
            .collect()
    }

    /// Whether no combatant on `side` is alive
    pub fn all_dead(&self, side: Side, health: &impl HealthQueryable) -> bool {
        self.alive(side, health).is_empty()
    }

    /// Drop records whose combatant no longer exists or has left the field
    ///
    /// Dead but present combatants stay registered. Returns the number removed.
    pub fn cleanup_invalid(&mut self, health: &impl HealthQueryable) -> usize {
        let before = self.len();
        let keep = |a: &CombatantAction| {
            health.contains(&a.combatant_id) && health.is_active(&a.combatant_id)
        };
        self.allies.retain(keep);
        self.enemies.retain(keep);
        let removed = before - self.len();
        if removed > 0 {
            debug!(removed, "Cleaned up invalid combatants");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.allies.clear();
        self.enemies.clear();
    }

    pub fn len(&self) -> usize {
        self.allies.len() + self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allies.is_empty() && self.enemies.is_empty()
    }
}
