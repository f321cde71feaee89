//! Response payloads for the encounter API.

use cw_mechanics::{ActionOutcome, ActionType, CombatantId, InitiativeResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{AdvanceOutcome, EncounterSession, SessionState};

/// A combatant reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    /// Combatant id.
    pub id: CombatantId,
    /// Display name.
    pub name: String,
}

/// Session status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Fight id.
    pub fight_id: Uuid,
    /// Lifecycle state.
    pub state: SessionState,
    /// Whether turns are being taken.
    pub running: bool,
    /// Current round.
    pub round: u32,
    /// Whose turn it is, if called.
    pub current_actor: Option<ActorRef>,
}

impl StatusPayload {
    /// Build the payload from a session.
    pub fn from_session(session: &EncounterSession) -> Self {
        let status = session.status();
        Self {
            fight_id: status.fight_id,
            state: status.state,
            running: status.running,
            round: status.round,
            current_actor: status
                .current_actor
                .and_then(|id| actor_ref(session, id)),
        }
    }
}

/// One line of an initiative roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativePayload {
    /// Combatant name.
    pub name: String,
    /// Raw die value.
    pub roll: u32,
    /// Speed added.
    pub speed: i32,
    /// Resulting shot.
    pub shot: i32,
}

impl From<&InitiativeResult> for InitiativePayload {
    fn from(r: &InitiativeResult) -> Self {
        Self {
            name: r.name.clone(),
            roll: r.roll,
            speed: r.speed,
            shot: r.resulting_shot,
        }
    }
}

/// The result of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    /// The kind of action.
    pub action_type: ActionType,
    /// Who acted.
    pub actor_name: String,
    /// Who was targeted.
    pub target_name: Option<String>,
    /// Display sentence.
    pub narrative: String,
    /// Whether an attack landed.
    pub hit: bool,
    /// Wounds dealt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
}

impl From<&ActionOutcome> for ActionPayload {
    fn from(o: &ActionOutcome) -> Self {
        Self {
            action_type: o.action_type,
            actor_name: o.actor_name.clone(),
            target_name: o.target_name.clone(),
            narrative: o.narrative.clone(),
            hit: o.hit,
            damage: o.damage_dealt,
        }
    }
}

/// The result of advancing the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancePayload {
    /// What advance found.
    pub outcome: AdvanceOutcome,
    /// Session status afterwards.
    pub status: StatusPayload,
}

fn actor_ref(session: &EncounterSession, id: CombatantId) -> Option<ActorRef> {
    session.registry().get(id).map(|c| ActorRef {
        id,
        name: c.name.clone(),
    })
}
