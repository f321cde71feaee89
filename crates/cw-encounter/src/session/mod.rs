//! Encounter session state machine.
//!
//! An [`EncounterSession`] is a plain record keyed by fight id. Every
//! operation takes the session and a dice source explicitly, so the record
//! can be persisted between calls and replayed in tests.
//!
//! ```text
//! NotStarted --start--> Running --stop--> Stopped
//!                          ^                 |
//!                          +-----start-------+
//! ```

pub mod log;

pub use log::{CombatLog, LogEntry, LogKind};

use chrono::{DateTime, Utc};
use cw_mechanics::{
    ActionOutcome, ActionType, Combatant, CombatantId, CombatantRegistry, DieRoller,
    InitiativeResult, MechError, RngRoller, next_actor, resolve_action, roll_initiative,
    turn_order,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{EncounterConfig, RoundEnd};
use crate::error::{EncounterError, EncounterResult};
use crate::roster::FightRecord;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created but not yet started.
    #[default]
    NotStarted,
    /// Turns are being taken.
    Running,
    /// The encounter has ended.
    Stopped,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A read-only snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// The fight this session belongs to.
    pub fight_id: Uuid,
    /// Lifecycle state.
    pub state: SessionState,
    /// Shorthand for `state == Running`.
    pub running: bool,
    /// Current round (0 before start).
    pub round: u32,
    /// The combatant whose turn it is, if one has been called.
    pub current_actor: Option<CombatantId>,
}

/// What `advance` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "actor", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// This combatant acts next.
    Actor(CombatantId),
    /// Nobody can act; an initiative roll is needed.
    RoundOver,
    /// The encounter ended.
    Stopped,
}

/// The state of one fight's turn engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSession {
    fight_id: Uuid,
    state: SessionState,
    registry: CombatantRegistry,
    round: u32,
    current_actor: Option<CombatantId>,
    config: EncounterConfig,
    cursor: u64,
    log: CombatLog,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EncounterSession {
    /// Create a session for a fight.
    pub fn new(fight_id: Uuid, config: EncounterConfig) -> Self {
        let now = Utc::now();
        Self {
            fight_id,
            state: SessionState::NotStarted,
            registry: CombatantRegistry::new(),
            round: 0,
            current_actor: None,
            config,
            cursor: 0,
            log: CombatLog::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The fight id this session is keyed by.
    pub fn fight_id(&self) -> Uuid {
        self.fight_id
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether turns are being taken.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Current round (0 before start).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The combatant whose turn was last called.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.current_actor
    }

    /// The combatants.
    pub fn registry(&self) -> &CombatantRegistry {
        &self.registry
    }

    /// The session configuration.
    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// The combat log.
    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// When the session was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Eligible combatants in the order they would act.
    pub fn turn_order(&self) -> Vec<CombatantId> {
        turn_order(&self.registry, self.config.ruleset.shot_threshold)
    }

    /// A dice source for the next operation, advancing the stored cursor.
    pub fn next_roller(&mut self) -> RngRoller {
        let roller = RngRoller::from_cursor(self.config.seed, self.cursor);
        self.cursor += 1;
        roller
    }

    /// Read-only projection of the session.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            fight_id: self.fight_id,
            state: self.state,
            running: self.is_running(),
            round: self.round,
            current_actor: self.current_actor,
        }
    }

    /// Seed the roster, roll initiative and begin round 1.
    ///
    /// Starting a running session changes nothing. A stopped session is
    /// reseeded from the roster and starts over.
    pub fn start(
        &mut self,
        fight: &FightRecord,
        roster: Vec<Combatant>,
        roller: &mut impl DieRoller,
    ) -> EncounterResult<SessionStatus> {
        if fight.id != self.fight_id {
            return Err(EncounterError::NotApplicable(format!(
                "session belongs to fight {}, not {}",
                self.fight_id, fight.id
            )));
        }
        if !fight.solo_mode {
            tracing::warn!(fight = %fight.id, "refusing to start: fight is not in solo mode");
            return Err(EncounterError::NotApplicable(format!(
                "fight '{}' is not in solo mode",
                fight.name
            )));
        }
        if self.is_running() {
            return Ok(self.status());
        }
        if roster.is_empty() {
            return Err(MechError::EmptyRoster.into());
        }
        self.config.validate()?;

        self.registry = roster.into_iter().collect();
        self.round = 0;
        self.current_actor = None;
        self.state = SessionState::Running;
        self.log.record(
            1,
            LogKind::Started {
                combatants: self.registry.len(),
            },
        );
        self.new_round(roller);

        tracing::info!(
            fight = %self.fight_id,
            combatants = self.registry.len(),
            "encounter started"
        );
        Ok(self.status())
    }

    /// Roll initiative for a new round.
    pub fn roll_initiative(
        &mut self,
        roller: &mut impl DieRoller,
    ) -> EncounterResult<Vec<InitiativeResult>> {
        self.require_running()?;
        Ok(self.new_round(roller))
    }

    /// Call the next combatant's turn.
    ///
    /// When nobody has shots left, the configured [`RoundEnd`] decides
    /// whether a new round is rolled, the session waits, or it stops.
    pub fn advance(&mut self, roller: &mut impl DieRoller) -> EncounterResult<AdvanceOutcome> {
        self.require_running()?;

        if let Some(actor) = self.pick_next() {
            return Ok(AdvanceOutcome::Actor(actor));
        }

        match self.config.round_end {
            RoundEnd::RollInitiative => {
                self.new_round(roller);
                match self.pick_next() {
                    Some(actor) => Ok(AdvanceOutcome::Actor(actor)),
                    None => {
                        self.stop();
                        Ok(AdvanceOutcome::Stopped)
                    }
                }
            }
            RoundEnd::AwaitInitiative => {
                self.current_actor = None;
                self.log.record(self.round, LogKind::RoundOver);
                self.touch();
                Ok(AdvanceOutcome::RoundOver)
            }
            RoundEnd::Stop => {
                self.stop();
                Ok(AdvanceOutcome::Stopped)
            }
        }
    }

    /// Resolve an action for `actor` against an optional `target`.
    pub fn act(
        &mut self,
        action: ActionType,
        actor: CombatantId,
        target: Option<CombatantId>,
        roller: &mut impl DieRoller,
    ) -> EncounterResult<ActionOutcome> {
        self.require_running()?;
        let outcome = resolve_action(
            &mut self.registry,
            &self.config.ruleset,
            actor,
            target,
            action,
            roller,
        )?;
        if self.current_actor == Some(actor) {
            self.current_actor = None;
        }
        self.log.record(
            self.round,
            LogKind::Action {
                outcome: outcome.clone(),
            },
        );
        self.touch();
        Ok(outcome)
    }

    /// End the encounter. Stopping a session that is not running is a no-op.
    pub fn stop(&mut self) -> SessionStatus {
        if self.is_running() {
            self.state = SessionState::Stopped;
            self.current_actor = None;
            self.log.record(self.round, LogKind::Stopped);
            self.touch();
            tracing::info!(fight = %self.fight_id, round = self.round, "encounter stopped");
        }
        self.status()
    }

    fn require_running(&self) -> EncounterResult<()> {
        if self.is_running() {
            Ok(())
        } else {
            tracing::warn!(fight = %self.fight_id, state = %self.state, "session not running");
            Err(EncounterError::NotRunning)
        }
    }

    fn pick_next(&mut self) -> Option<CombatantId> {
        let actor = next_actor(&self.registry, self.config.ruleset.shot_threshold)?;
        if self.current_actor == Some(actor) {
            return Some(actor);
        }
        self.current_actor = Some(actor);
        let actor_name = self
            .registry
            .get(actor)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        self.log.record(
            self.round,
            LogKind::Turn {
                actor_id: actor,
                actor_name,
            },
        );
        self.touch();
        Some(actor)
    }

    fn new_round(&mut self, roller: &mut impl DieRoller) -> Vec<InitiativeResult> {
        self.round += 1;
        self.current_actor = None;
        self.registry.clear_round_conditions();
        let results = roll_initiative(&mut self.registry, &self.config.ruleset, roller);
        self.log.record(
            self.round,
            LogKind::Initiative {
                results: results.clone(),
            },
        );
        self.touch();
        tracing::info!(fight = %self.fight_id, round = self.round, "new round");
        results
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
