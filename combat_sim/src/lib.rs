//! combat_sim - Headless encounter runner for combat_core
//!
//! The binary loads a roster file, drives a [`combat_core::CombatEncounter`]
//! with its own fixed-step clock and prints the combat log.

pub mod simulation;
