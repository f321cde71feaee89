//! Action resolution.
//!
//! An attack rolls a swerve, adds it to the attacker's action value and
//! compares the total against the target's defense. The margin of a hit is
//! added to the attacker's damage and the target's toughness is subtracted
//! to give the wounds dealt. Either way, acting costs shots.

use serde::{Deserialize, Serialize};

use crate::combatant::{CombatantId, Condition};
use crate::dice::{DieRoller, swerve};
use crate::error::{MechError, MechResult};
use crate::rules::Ruleset;

use super::CombatantRegistry;

/// The kinds of action a combatant can take on their shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Attack a target.
    Attack,
    /// Raise defense until the next round.
    Defend,
}

impl std::str::FromStr for ActionType {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Ok(Self::Attack),
            "defend" => Ok(Self::Defend),
            _ => Err(MechError::InvalidActionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defend => write!(f, "defend"),
        }
    }
}

/// What happened when an action was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// The kind of action.
    pub action_type: ActionType,
    /// Who acted.
    pub actor_id: CombatantId,
    /// The actor's display name.
    pub actor_name: String,
    /// Who was targeted, if anyone.
    pub target_id: Option<CombatantId>,
    /// The target's display name, if any.
    pub target_name: Option<String>,
    /// A sentence describing the result for display.
    pub narrative: String,
    /// Whether an attack landed. Always false for defend.
    pub hit: bool,
    /// Wounds dealt by a hit.
    pub damage_dealt: Option<i32>,
    /// The swerve rolled for an attack.
    pub swerve: Option<i32>,
    /// The actor's shots after paying for the action.
    pub actor_shots: i32,
}

/// Resolve one action and apply its effects to the registry.
///
/// All ids are checked before anything changes, so a failed call leaves
/// the registry untouched. Combatants who are out of action cannot act. Only the actor and, on a hit, the target are
/// modified.
pub fn resolve_action(
    registry: &mut CombatantRegistry,
    ruleset: &Ruleset,
    actor_id: CombatantId,
    target_id: Option<CombatantId>,
    action: ActionType,
    roller: &mut impl DieRoller,
) -> MechResult<ActionOutcome> {
    let actor = registry
        .get(actor_id)
        .ok_or(MechError::UnknownActor(actor_id))?;
    let actor_name = actor.name.clone();
    if actor.is_out_of_action() {
        return Err(MechError::ActorOutOfAction(actor_name));
    }

    let target_name = match target_id {
        Some(id) => Some(
            registry
                .get(id)
                .ok_or(MechError::UnknownTarget(id))?
                .name
                .clone(),
        ),
        None => None,
    };

    let mut outcome = ActionOutcome {
        action_type: action,
        actor_id,
        actor_name,
        target_id,
        target_name,
        narrative: String::new(),
        hit: false,
        damage_dealt: None,
        swerve: None,
        actor_shots: 0,
    };

    match action {
        ActionType::Attack => {
            let target_id = target_id.ok_or(MechError::MissingTarget)?;
            resolve_attack(registry, ruleset, target_id, roller, &mut outcome)?;
        }
        ActionType::Defend => {
            if let Some(actor) = registry.get_mut(actor_id) {
                actor.wounds.conditions.insert(Condition::Defending);
            }
            outcome.narrative = format!(
                "{} takes a defensive stance (+{} Defense until next round).",
                outcome.actor_name, ruleset.defend_bonus
            );
        }
    }

    let actor = registry
        .get_mut(actor_id)
        .ok_or(MechError::UnknownActor(actor_id))?;
    actor.current_shots = actor.current_shots.saturating_sub(ruleset.action_cost);
    outcome.actor_shots = actor.current_shots;

    tracing::debug!(
        actor = %outcome.actor_name,
        action = %action,
        hit = outcome.hit,
        shots = outcome.actor_shots,
        "resolved action"
    );
    Ok(outcome)
}

fn resolve_attack(
    registry: &mut CombatantRegistry,
    ruleset: &Ruleset,
    target_id: CombatantId,
    roller: &mut impl DieRoller,
    outcome: &mut ActionOutcome,
) -> MechResult<()> {
    let actor = registry
        .get(outcome.actor_id)
        .ok_or(MechError::UnknownActor(outcome.actor_id))?;
    let attack = actor.effective_attack();
    let damage = actor.stats.damage;

    let target = registry
        .get(target_id)
        .ok_or(MechError::UnknownTarget(target_id))?;
    let defense = target.effective_defense(ruleset.defend_bonus);
    let toughness = target.stats.toughness;
    let thresholds = ruleset.wound_thresholds(target.character_type).copied();
    let target_name = target.name.clone();

    let swerve = swerve(roller, ruleset.swerve_die);
    let action_result = attack.saturating_add(swerve);
    outcome.swerve = Some(swerve);

    if action_result < defense {
        outcome.narrative = format!(
            "{} attacks {} and misses ({} vs Defense {}, swerve {:+}).",
            outcome.actor_name, target_name, action_result, defense, swerve
        );
        return Ok(());
    }

    let margin = action_result.saturating_sub(defense);
    let wounds = margin
        .saturating_add(damage)
        .saturating_sub(toughness)
        .max(ruleset.min_damage);

    let target = registry
        .get_mut(target_id)
        .ok_or(MechError::UnknownTarget(target_id))?;
    target.wounds.apply(wounds, thresholds.as_ref());

    outcome.hit = true;
    outcome.damage_dealt = Some(wounds);
    outcome.narrative = format!(
        "{} attacks {} and hits ({} vs Defense {}, swerve {:+}) for {} wound{}.",
        outcome.actor_name,
        target_name,
        action_result,
        defense,
        swerve,
        wounds,
        if wounds == 1 { "" } else { "s" },
    );
    if target.is_out_of_action() {
        outcome
            .narrative
            .push_str(&format!(" {target_name} is out of the fight!"));
    } else if wounds > 0 && target.wounds.impairment > 0 {
        let worst = if target.wounds.impairment >= 2 {
            Condition::SeriouslyWounded
        } else {
            Condition::Impaired
        };
        outcome
            .narrative
            .push_str(&format!(" {target_name} is {worst}."));
    }
    Ok(())
}
