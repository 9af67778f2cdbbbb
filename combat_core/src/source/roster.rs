//! Roster - In-memory combatant table implementing the provider traits

use super::{
    CombatantStats, EquipmentProvider, HealthQueryable, Loadout, ShieldProfile, SourceError,
    StatProvider, WeaponProfile,
};
use crate::types::{CombatantId, Side};
use serde::{Deserialize, Serialize};

/// One combatant's externally owned state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantRecord {
    pub id: CombatantId,
    pub name: String,
    /// Side this combatant fights on when registered as a team
    pub side: Side,
    pub max_health: f64,
    pub current_health: f64,
    /// Cleared when the combatant leaves the field
    pub active: bool,
    /// `None` models a combatant whose stat component is missing
    pub stats: Option<CombatantStats>,
    pub loadout: Loadout,
}

impl CombatantRecord {
    /// Fresh combatant at full health with default stats and no gear
    pub fn new(id: impl Into<CombatantId>, name: impl Into<String>, side: Side, max_health: f64) -> Self {
        CombatantRecord {
            id: id.into(),
            name: name.into(),
            side,
            max_health,
            current_health: max_health,
            active: true,
            stats: Some(CombatantStats::default()),
            loadout: Loadout::default(),
        }
    }

    pub fn with_stats(mut self, stats: CombatantStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }
}

/// Ordered collection of combatant records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    records: Vec<CombatantRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record, keeping the original position on replace
    pub fn insert(&mut self, record: CombatantRecord) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            self.records.push(record);
        }
    }

    pub fn remove(&mut self, id: &CombatantId) -> Option<CombatantRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &CombatantId) -> Option<&CombatantRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &CombatantId) -> Option<&mut CombatantRecord> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    pub fn records(&self) -> &[CombatantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids of every combatant on `side`, in roster order
    pub fn ids_on(&self, side: Side) -> Vec<CombatantId> {
        self.records
            .iter()
            .filter(|r| r.side == side)
            .map(|r| r.id.clone())
            .collect()
    }

    /// Mark a combatant as having left (or rejoined) the field
    pub fn set_active(&mut self, id: &CombatantId, active: bool) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        }
    }

    fn record(&self, id: &CombatantId) -> Result<&CombatantRecord, SourceError> {
        self.get(id)
            .ok_or_else(|| SourceError::UnknownCombatant(id.clone()))
    }

    fn loadout(&self, id: &CombatantId) -> Result<&Loadout, SourceError> {
        self.record(id).map(|r| &r.loadout)
    }
}

impl HealthQueryable for Roster {
    fn contains(&self, id: &CombatantId) -> bool {
        self.get(id).is_some()
    }

    fn is_active(&self, id: &CombatantId) -> bool {
        self.get(id).map(|r| r.active).unwrap_or(false)
    }

    fn current_health(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.record(id).map(|r| r.current_health)
    }

    fn max_health(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.record(id).map(|r| r.max_health)
    }

    fn set_current_health(&mut self, id: &CombatantId, value: f64) -> Result<(), SourceError> {
        if !value.is_finite() {
            return Err(SourceError::InvalidHealth {
                id: id.clone(),
                value,
            });
        }
        let record = self
            .get_mut(id)
            .ok_or_else(|| SourceError::UnknownCombatant(id.clone()))?;
        record.current_health = value.clamp(0.0, record.max_health);
        Ok(())
    }
}

impl StatProvider for Roster {
    fn display_name(&self, id: &CombatantId) -> Result<String, SourceError> {
        self.record(id).map(|r| r.name.clone())
    }

    fn stats(&self, id: &CombatantId) -> Result<CombatantStats, SourceError> {
        self.record(id)?
            .stats
            .clone()
            .ok_or_else(|| SourceError::MissingStats(id.clone()))
    }
}

impl EquipmentProvider for Roster {
    fn equipped_weapon(&self, id: &CombatantId) -> Result<Option<WeaponProfile>, SourceError> {
        self.loadout(id).map(|l| l.weapon.clone())
    }

    fn natural_weapon(&self, id: &CombatantId) -> Result<Option<WeaponProfile>, SourceError> {
        self.loadout(id).map(|l| l.natural_weapon.clone())
    }

    fn natural_attack_power(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.loadout(id).map(|l| l.natural_attack_power)
    }

    fn armor_defense(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.loadout(id).map(|l| l.armor_defense)
    }

    fn shield(&self, id: &CombatantId) -> Result<Option<ShieldProfile>, SourceError> {
        self.loadout(id).map(|l| l.shield.clone())
    }

    fn total_equipped_weight(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.loadout(id).map(|l| l.total_weight())
    }

    fn carrying_capacity(&self, id: &CombatantId) -> Result<f64, SourceError> {
        self.loadout(id).map(|l| l.carrying_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(CombatantRecord::new("hero", "Hero", Side::Ally, 100.0));
        roster.insert(CombatantRecord::new("wolf", "Wolf", Side::Enemy, 40.0));
        roster
    }

    #[test]
    fn test_health_queries() {
        let mut roster = make_roster();
        let wolf = CombatantId::from("wolf");

        assert!(roster.is_alive(&wolf));
        roster.set_current_health(&wolf, 0.0).unwrap();
        assert!(!roster.is_alive(&wolf));
        assert!(roster.contains(&wolf));
    }

    #[test]
    fn test_health_is_clamped() {
        let mut roster = make_roster();
        let hero = CombatantId::from("hero");

        roster.set_current_health(&hero, 250.0).unwrap();
        assert!((roster.current_health(&hero).unwrap() - 100.0).abs() < f64::EPSILON);

        roster.set_current_health(&hero, -5.0).unwrap();
        assert!((roster.current_health(&hero).unwrap() - 0.0).abs() < f64::EPSILON);

        assert!(roster.set_current_health(&hero, f64::NAN).is_err());
    }

    #[test]
    fn test_unknown_combatant() {
        let roster = make_roster();
        let ghost = CombatantId::from("ghost");

        assert!(!roster.contains(&ghost));
        assert!(!roster.is_alive(&ghost));
        assert!(!roster.is_active(&ghost));
        assert_eq!(
            roster.current_health(&ghost),
            Err(SourceError::UnknownCombatant(ghost.clone()))
        );
    }

    #[test]
    fn test_missing_stats() {
        let mut roster = make_roster();
        let hero = CombatantId::from("hero");
        roster.get_mut(&hero).unwrap().stats = None;

        assert_eq!(roster.stats(&hero), Err(SourceError::MissingStats(hero.clone())));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut roster = make_roster();
        roster.insert(CombatantRecord::new("hero", "Renamed", Side::Ally, 80.0));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.records()[0].name, "Renamed");
    }

    #[test]
    fn test_ids_on_side() {
        let roster = make_roster();
        assert_eq!(roster.ids_on(Side::Ally), vec![CombatantId::from("hero")]);
        assert_eq!(roster.ids_on(Side::Enemy), vec![CombatantId::from("wolf")]);
    }
}
