//! Shot-clock combat mechanics.
//!
//! Provides dice and swappable random sources, typed combatant stat blocks
//! with wound tracking, a combatant registry, and the three pieces of the
//! turn engine: initiative rolls, shot-based turn order, and action
//! resolution. Everything here is synchronous and free of I/O.

pub mod combat;
pub mod combatant;
pub mod dice;
pub mod error;
pub mod rules;

pub use combat::{
    ActionOutcome, ActionType, CombatantRegistry, InitiativeResult, next_actor, resolve_action,
    roll_initiative, turn_order,
};
pub use combatant::{
    CharacterType, Combatant, CombatantId, CombatantKind, Condition, StatBlock, WoundState,
    WoundThresholds,
};
pub use dice::{Die, DieRoller, FixedRolls, RngRoller};
pub use error::{MechError, MechResult};
pub use rules::{InitiativeMode, Ruleset};
