//! Initiative rolls.

use serde::{Deserialize, Serialize};

use crate::combatant::CombatantId;
use crate::dice::DieRoller;
use crate::rules::{InitiativeMode, Ruleset};

use super::CombatantRegistry;

/// One combatant's initiative roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeResult {
    /// Who rolled.
    pub combatant_id: CombatantId,
    /// Display name at the time of the roll.
    pub name: String,
    /// The raw die value.
    pub roll: u32,
    /// Speed added to the roll.
    pub speed: i32,
    /// Shot count after the roll was applied.
    pub resulting_shot: i32,
}

/// Roll initiative for every combatant and update their shot counts.
///
/// Returns one result per combatant in registry order. An empty registry
/// yields an empty list.
pub fn roll_initiative(
    registry: &mut CombatantRegistry,
    ruleset: &Ruleset,
    roller: &mut impl DieRoller,
) -> Vec<InitiativeResult> {
    let results: Vec<InitiativeResult> = registry
        .iter_mut()
        .map(|combatant| {
            let roll = roller.roll(ruleset.initiative_die);
            let speed = combatant.stats.speed;
            let initiative = i32::try_from(roll)
                .unwrap_or(i32::MAX)
                .saturating_add(speed);
            combatant.current_shots = match ruleset.initiative_mode {
                InitiativeMode::Replace => initiative,
                InitiativeMode::Accumulate => combatant.current_shots.saturating_add(initiative),
            };
            InitiativeResult {
                combatant_id: combatant.id,
                name: combatant.name.clone(),
                roll,
                speed,
                resulting_shot: combatant.current_shots,
            }
        })
        .collect();

    tracing::debug!(
        count = results.len(),
        mode = %ruleset.initiative_mode,
        "rolled initiative"
    );
    results
}
