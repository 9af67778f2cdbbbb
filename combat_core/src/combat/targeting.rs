//! Target and weapon selection for a single action

use crate::source::{EquipmentProvider, SourceError, WeaponProfile};
use crate::types::CombatantId;

/// Pick a target among the living candidates of the opposite side
///
/// Takes the first one in registration order.
pub fn select_target(alive: &[CombatantId]) -> Option<&CombatantId> {
    alive.first()
}

/// Weapon a combatant attacks with: equipped, else natural, else bare hands
pub fn select_weapon(
    equipment: &impl EquipmentProvider,
    id: &CombatantId,
) -> Result<WeaponProfile, SourceError> {
    if let Some(weapon) = equipment.equipped_weapon(id)? {
        return Ok(weapon);
    }
    if let Some(natural) = equipment.natural_weapon(id)? {
        return Ok(natural);
    }
    Ok(WeaponProfile::unarmed())
}
