//! Error types for the mechanics engine.

use crate::combatant::CombatantId;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The acting combatant is not in the registry.
    #[error("unknown actor: {0}")]
    UnknownActor(CombatantId),

    /// The targeted combatant is not in the registry.
    #[error("unknown target: {0}")]
    UnknownTarget(CombatantId),

    /// An attack was declared without naming a target.
    #[error("attack requires a target")]
    MissingTarget,

    /// The acting combatant has dropped out of the fight.
    #[error("{0} is out of action")]
    ActorOutOfAction(String),

    /// The action kind is not one the resolver knows.
    #[error("invalid action type: {0}")]
    InvalidActionType(String),

    /// The ruleset configuration is malformed.
    #[error("invalid ruleset: {0}")]
    InvalidConfig(String),

    /// An encounter cannot be seeded from an empty roster.
    #[error("roster is empty")]
    EmptyRoster,
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
