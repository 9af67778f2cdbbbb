//! Combat events - Structured records handed to an event sink

mod log;

pub use log::{CombatLog, DEFAULT_MAX_LOG_ENTRIES};

use crate::combat::CombatResolutionResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad grouping of log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventCategory {
    #[default]
    Combat,
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatEventKind {
    Hit,
    Miss,
    Dodge,
    Parry,
    Critical,
    Death,
    CombatStart,
    CombatEnd,
}

impl CombatEventKind {
    /// Kind reported for a resolved action
    ///
    /// A landed hit reports Critical over Parry over a plain Hit.
    pub fn for_result(result: &CombatResolutionResult) -> Self {
        if result.dodged {
            CombatEventKind::Dodge
        } else if !result.hit {
            CombatEventKind::Miss
        } else if result.critical {
            CombatEventKind::Critical
        } else if result.parried {
            CombatEventKind::Parry
        } else {
            CombatEventKind::Hit
        }
    }
}

/// One structured event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub category: EventCategory,
    pub kind: CombatEventKind,
    /// Encounter time in seconds
    pub timestamp: f64,
    pub attacker: String,
    pub defender: String,
    pub weapon: String,
    pub damage: u32,
    pub critical: bool,
    pub parried: bool,
    pub shield_blocked: bool,
    pub attacker_hp_before: f64,
    pub defender_hp_before: f64,
    pub defender_hp_after: f64,
    /// Free text for summary events
    pub info: String,
}

impl CombatEvent {
    pub fn new(kind: CombatEventKind, timestamp: f64) -> Self {
        CombatEvent {
            category: EventCategory::Combat,
            kind,
            timestamp,
            attacker: String::new(),
            defender: String::new(),
            weapon: String::new(),
            damage: 0,
            critical: false,
            parried: false,
            shield_blocked: false,
            attacker_hp_before: 0.0,
            defender_hp_before: 0.0,
            defender_hp_after: 0.0,
            info: String::new(),
        }
    }

    /// Event describing a resolved action
    pub fn for_action(timestamp: f64, result: &CombatResolutionResult) -> Self {
        let mut event = Self::new(CombatEventKind::for_result(result), timestamp);
        event.damage = result.final_damage;
        event.critical = result.critical;
        event.parried = result.parried;
        event.shield_blocked = result.shield_blocked;
        event
    }

    pub fn with_participants(mut self, attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        self.attacker = attacker.into();
        self.defender = defender.into();
        self
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = weapon.into();
        self
    }

    pub fn with_health(mut self, attacker_before: f64, defender_before: f64, defender_after: f64) -> Self {
        self.attacker_hp_before = attacker_before;
        self.defender_hp_before = defender_before;
        self.defender_hp_after = defender_after;
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}s] ", self.timestamp)?;
        match self.kind {
            CombatEventKind::Hit | CombatEventKind::Critical | CombatEventKind::Parry => {
                write!(
                    f,
                    "{} hits {} with {} for {} damage",
                    self.attacker, self.defender, self.weapon, self.damage
                )?;
                let mut tags = Vec::new();
                if self.critical {
                    tags.push("critical");
                }
                if self.parried {
                    tags.push("parried");
                }
                if self.shield_blocked {
                    tags.push("blocked");
                }
                if !tags.is_empty() {
                    write!(f, " [{}]", tags.join(", "))?;
                }
                write!(
                    f,
                    " ({:.0} -> {:.0} HP)",
                    self.defender_hp_before, self.defender_hp_after
                )
            }
            CombatEventKind::Miss => write!(
                f,
                "{} misses {} with {}",
                self.attacker, self.defender, self.weapon
            ),
            CombatEventKind::Dodge => write!(
                f,
                "{} dodges {}'s {}",
                self.defender, self.attacker, self.weapon
            ),
            CombatEventKind::Death => write!(f, "{} was slain by {}", self.defender, self.attacker),
            CombatEventKind::CombatStart => write!(f, "Combat started: {}", self.info),
            CombatEventKind::CombatEnd => write!(f, "Combat ended: {}", self.info),
        }
    }
}

/// Receiver of combat events
pub trait EventSink {
    fn record(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn record(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: CombatEvent) {
        (**self).record(event);
    }
}

/// Sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: CombatEvent) {}
}
