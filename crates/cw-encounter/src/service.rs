//! The encounter API: authorization, persistence and the session state
//! machine wired together per request.
//!
//! Each call loads the fight's session from the store, applies one
//! operation and saves the result. The service takes `&mut self`, so one
//! service instance is a single writer for the fights it stores.

use cw_mechanics::{ActionType, CombatantId, MechError};
use uuid::Uuid;

use crate::auth::Access;
use crate::config::EncounterConfig;
use crate::error::{EncounterError, EncounterResult};
use crate::payload::{ActionPayload, AdvancePayload, InitiativePayload, StatusPayload};
use crate::roster::{FightRecord, Roster};
use crate::session::EncounterSession;
use crate::store::SessionStore;

/// Runs encounter operations on behalf of users.
#[derive(Debug)]
pub struct EncounterService<S, R> {
    store: S,
    roster: R,
    config: EncounterConfig,
}

impl<S: SessionStore, R: Roster> EncounterService<S, R> {
    /// Create a service. `config` is used for sessions created by `start`.
    pub fn new(store: S, roster: R, config: EncounterConfig) -> Self {
        Self {
            store,
            roster,
            config,
        }
    }

    /// The session store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The roster.
    pub fn roster(&self) -> &R {
        &self.roster
    }

    /// Load a fight's session for inspection.
    pub fn session(&self, fight_id: Uuid, access: &Access) -> EncounterResult<EncounterSession> {
        access.require_view()?;
        self.fight(fight_id)?;
        self.load_or_new(fight_id)
    }

    /// Start the fight's encounter. Starting a running encounter changes
    /// nothing, not even the dice stream.
    pub fn start(&mut self, fight_id: Uuid, access: &Access) -> EncounterResult<StatusPayload> {
        access.require_manage()?;
        let fight = self.fight(fight_id)?;
        let mut session = self.load_or_new(fight_id)?;
        if fight.solo_mode && session.is_running() {
            return Ok(StatusPayload::from_session(&session));
        }
        let roster = self.roster.combatants(&fight);
        let mut roller = session.next_roller();
        session.start(&fight, roster, &mut roller)?;
        self.store.save(&session)?;
        Ok(StatusPayload::from_session(&session))
    }

    /// Roll initiative for a new round.
    pub fn roll_initiative(
        &mut self,
        fight_id: Uuid,
        access: &Access,
    ) -> EncounterResult<Vec<InitiativePayload>> {
        access.require_manage()?;
        let mut session = self.running_session(fight_id)?;
        let mut roller = session.next_roller();
        let results = session.roll_initiative(&mut roller)?;
        self.store.save(&session)?;
        Ok(results.iter().map(InitiativePayload::from).collect())
    }

    /// Resolve an action. `action_type` is parsed case-insensitively.
    pub fn action(
        &mut self,
        fight_id: Uuid,
        action_type: &str,
        actor_id: CombatantId,
        target_id: Option<CombatantId>,
        access: &Access,
    ) -> EncounterResult<ActionPayload> {
        access.require_view()?;
        let action: ActionType = action_type.parse()?;
        let mut session = self.running_session(fight_id)?;
        let actor = session
            .registry()
            .get(actor_id)
            .ok_or(MechError::UnknownActor(actor_id))?;
        access.require_act_as(actor)?;

        let mut roller = session.next_roller();
        let outcome = session.act(action, actor_id, target_id, &mut roller)?;
        self.store.save(&session)?;
        Ok(ActionPayload::from(&outcome))
    }

    /// Call the next turn.
    pub fn advance(&mut self, fight_id: Uuid, access: &Access) -> EncounterResult<AdvancePayload> {
        access.require_manage()?;
        let mut session = self.running_session(fight_id)?;
        let mut roller = session.next_roller();
        let outcome = session.advance(&mut roller)?;
        self.store.save(&session)?;
        Ok(AdvancePayload {
            outcome,
            status: StatusPayload::from_session(&session),
        })
    }

    /// Stop the encounter. Succeeds whatever state the session is in.
    pub fn stop(&mut self, fight_id: Uuid, access: &Access) -> EncounterResult<StatusPayload> {
        access.require_manage()?;
        self.fight(fight_id)?;
        let Some(mut session) = self.store.load(fight_id)? else {
            return Ok(StatusPayload::from_session(&self.new_session(fight_id)));
        };
        session.stop();
        self.store.save(&session)?;
        Ok(StatusPayload::from_session(&session))
    }

    /// Current status.
    pub fn status(&self, fight_id: Uuid, access: &Access) -> EncounterResult<StatusPayload> {
        let session = self.session(fight_id, access)?;
        Ok(StatusPayload::from_session(&session))
    }

    fn fight(&self, fight_id: Uuid) -> EncounterResult<FightRecord> {
        self.roster
            .fight(fight_id)
            .ok_or_else(|| EncounterError::NotApplicable(format!("fight {fight_id} not found")))
    }

    fn new_session(&self, fight_id: Uuid) -> EncounterSession {
        EncounterSession::new(fight_id, self.config.clone())
    }

    fn load_or_new(&self, fight_id: Uuid) -> EncounterResult<EncounterSession> {
        Ok(self
            .store
            .load(fight_id)?
            .unwrap_or_else(|| self.new_session(fight_id)))
    }

    fn running_session(&self, fight_id: Uuid) -> EncounterResult<EncounterSession> {
        self.fight(fight_id)?;
        match self.store.load(fight_id)? {
            Some(session) if session.is_running() => Ok(session),
            _ => Err(EncounterError::NotRunning),
        }
    }
}
