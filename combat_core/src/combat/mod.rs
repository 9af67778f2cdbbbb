//! Combat resolution - Roll one action and report its outcome

mod resolution;
mod result;
mod targeting;

pub use resolution::{resolve_attack, resolve_attack_with_rng, roll_chance};
pub use result::{CombatResolutionResult, RollOutcome};
pub use targeting::{select_target, select_weapon};
