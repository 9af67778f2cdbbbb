//! CombatLog - Bounded in-memory event store

use super::{CombatEvent, CombatEventKind, EventSink};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

pub const DEFAULT_MAX_LOG_ENTRIES: usize = 1000;

/// Most recent combat events, oldest dropped first once full
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<CombatEvent>,
    max_entries: usize,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_LOG_ENTRIES)
    }
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log keeping at most `max_entries` events (at least one)
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        CombatLog {
            entries: VecDeque::with_capacity(max_entries.min(DEFAULT_MAX_LOG_ENTRIES)),
            max_entries,
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        while self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    /// Last `count` events, oldest first
    pub fn recent(&self, count: usize) -> Vec<&CombatEvent> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).collect()
    }

    pub fn by_kind(&self, kind: CombatEventKind) -> Vec<&CombatEvent> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl EventSink for CombatLog {
    fn record(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

impl fmt::Display for CombatLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.entries {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}
