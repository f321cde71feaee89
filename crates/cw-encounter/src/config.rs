//! Configuration for an encounter session.

use cw_mechanics::{MechResult, Ruleset};
use serde::{Deserialize, Serialize};

/// What `advance` does when nobody has shots left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundEnd {
    /// Roll initiative for a new round straight away.
    #[default]
    RollInitiative,
    /// Report the round as over and wait for an explicit initiative roll.
    AwaitInitiative,
    /// End the encounter.
    Stop,
}

impl std::fmt::Display for RoundEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RollInitiative => write!(f, "roll_initiative"),
            Self::AwaitInitiative => write!(f, "await_initiative"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

/// Configuration for an encounter session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// RNG seed for reproducible dice.
    pub seed: u64,
    /// Behavior when a round runs out of shots.
    pub round_end: RoundEnd,
    /// Combat rules.
    pub ruleset: Ruleset,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            round_end: RoundEnd::default(),
            ruleset: Ruleset::default(),
        }
    }
}

impl EncounterConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the end-of-round behavior.
    pub fn with_round_end(mut self, round_end: RoundEnd) -> Self {
        self.round_end = round_end;
        self
    }

    /// Set the ruleset.
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    /// Validate the embedded ruleset.
    pub fn validate(&self) -> MechResult<()> {
        self.ruleset.validate()
    }
}
