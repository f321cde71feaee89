//! Ruleset configuration.
//!
//! A [`Ruleset`] holds every tunable number the engine uses. The default
//! is the Feng Shui shot clock: d6 + Speed initiative, 3 shots per action,
//! and a d6 swerve on attacks. Rulesets can be loaded from TOML, where any
//! missing field falls back to that default.

use serde::{Deserialize, Serialize};

use crate::combatant::{CharacterType, WoundThresholds};
use crate::dice::Die;
use crate::error::{MechError, MechResult};

/// How a new initiative roll combines with a combatant's remaining shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitiativeMode {
    /// The roll becomes the new shot count.
    #[default]
    Replace,
    /// The roll is added to whatever shots are left over.
    Accumulate,
}

impl std::fmt::Display for InitiativeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Accumulate => write!(f, "accumulate"),
        }
    }
}

/// A complete set of combat rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// System name shown in logs.
    pub name: String,
    /// Die rolled for initiative.
    pub initiative_die: Die,
    /// Whether initiative replaces or adds to remaining shots.
    pub initiative_mode: InitiativeMode,
    /// Shots spent by every action.
    pub action_cost: i32,
    /// Combatants need strictly more shots than this to act.
    pub shot_threshold: i32,
    /// Die used for both halves of an attack swerve.
    pub swerve_die: Die,
    /// Defense bonus granted by a defend action until the next round.
    pub defend_bonus: i32,
    /// Floor for wounds dealt by a successful hit.
    pub min_damage: i32,
    /// Thresholds for PCs, allies and featured foes.
    pub standard_wounds: WoundThresholds,
    /// Thresholds for bosses and uber-bosses.
    pub boss_wounds: WoundThresholds,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::feng_shui()
    }
}

impl Ruleset {
    /// The Feng Shui shot clock.
    pub fn feng_shui() -> Self {
        Self {
            name: "feng_shui".to_string(),
            initiative_die: Die::D6,
            initiative_mode: InitiativeMode::Replace,
            action_cost: 3,
            shot_threshold: 0,
            swerve_die: Die::D6,
            defend_bonus: 3,
            min_damage: 0,
            standard_wounds: WoundThresholds::STANDARD,
            boss_wounds: WoundThresholds::BOSS,
        }
    }

    /// Parse and validate a ruleset from TOML.
    pub fn from_toml_str(source: &str) -> MechResult<Self> {
        let ruleset: Self =
            toml::from_str(source).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Check that the numbers make sense together.
    pub fn validate(&self) -> MechResult<()> {
        if self.action_cost <= 0 {
            return Err(MechError::InvalidConfig(format!(
                "action_cost must be positive, got {}",
                self.action_cost
            )));
        }
        if self.min_damage < 0 {
            return Err(MechError::InvalidConfig(format!(
                "min_damage must not be negative, got {}",
                self.min_damage
            )));
        }
        for (label, t) in [
            ("standard_wounds", &self.standard_wounds),
            ("boss_wounds", &self.boss_wounds),
        ] {
            if !t.is_ascending() {
                return Err(MechError::InvalidConfig(format!(
                    "{label} thresholds must be positive and ascending"
                )));
            }
        }
        Ok(())
    }

    /// Set the initiative mode.
    pub fn with_initiative_mode(mut self, mode: InitiativeMode) -> Self {
        self.initiative_mode = mode;
        self
    }

    /// Set the shot cost of an action.
    pub fn with_action_cost(mut self, cost: i32) -> Self {
        self.action_cost = cost;
        self
    }

    /// Set the shot threshold for acting.
    pub fn with_shot_threshold(mut self, threshold: i32) -> Self {
        self.shot_threshold = threshold;
        self
    }

    /// Wound thresholds for a character type. `None` means any wound drops it.
    pub fn wound_thresholds(&self, character_type: CharacterType) -> Option<&WoundThresholds> {
        match character_type {
            CharacterType::Mook => None,
            ty if ty.is_boss() => Some(&self.boss_wounds),
            _ => Some(&self.standard_wounds),
        }
    }
}
