//! Encounter sessions for the shot-clock engine.
//!
//! Wraps the mechanics crate in a per-fight session state machine with a
//! combat log, pluggable persistence keyed by fight id, role checks, and a
//! request-shaped service that a web layer can call directly.

pub mod auth;
pub mod config;
pub mod error;
pub mod payload;
pub mod roster;
pub mod service;
pub mod session;
pub mod store;

pub use auth::Access;
pub use config::{EncounterConfig, RoundEnd};
pub use error::{EncounterError, EncounterResult};
pub use payload::{ActionPayload, ActorRef, AdvancePayload, InitiativePayload, StatusPayload};
pub use roster::{FightRecord, Roster, StaticRoster};
pub use service::EncounterService;
pub use session::{
    AdvanceOutcome, CombatLog, EncounterSession, LogEntry, LogKind, SessionState, SessionStatus,
};
pub use store::{JsonFileStore, MemoryStore, SessionStore};
