//! Error types for encounter sessions.

use cw_mechanics::MechError;
use thiserror::Error;

/// Result type for encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// Errors that can occur while running an encounter.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// The fight is not set up for the turn engine, or does not exist.
    #[error("not applicable: {0}")]
    NotApplicable(String),

    /// The caller lacks the role required for the operation.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// The operation needs a running session.
    #[error("encounter is not running")]
    NotRunning,

    /// A mechanics error (unknown combatant, bad action, bad ruleset).
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// Reading or writing a persisted session failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted session could not be encoded or decoded.
    #[error("session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl EncounterError {
    /// The HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotApplicable(_) => 422,
            Self::NotAuthorized(_) => 403,
            Self::NotRunning => 409,
            Self::Mechanics(err) => match err {
                MechError::UnknownActor(_) | MechError::UnknownTarget(_) => 404,
                MechError::InvalidActionType(_) | MechError::MissingTarget => 400,
                MechError::ActorOutOfAction(_) => 409,
                MechError::EmptyRoster => 422,
                MechError::InvalidConfig(_) => 500,
            },
            Self::Io(_) | Self::Encoding(_) => 500,
        }
    }
}
