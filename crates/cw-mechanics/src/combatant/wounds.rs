//! Wound tracking and impairment.
//!
//! Wounds only ever accumulate during a fight. Crossing a threshold adds
//! impairment, which lowers attack and defense, and eventually takes the
//! combatant out of action.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A narrative or mechanical tag carried by a combatant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// First impairment threshold crossed (-1).
    Impaired,
    /// Second impairment threshold crossed (-2).
    SeriouslyWounded,
    /// Can no longer act.
    OutOfAction,
    /// Took a defensive action this round.
    Defending,
    /// A free-form narrative tag.
    Custom(String),
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Impaired => write!(f, "Impaired"),
            Self::SeriouslyWounded => write!(f, "Seriously Wounded"),
            Self::OutOfAction => write!(f, "Out of Action"),
            Self::Defending => write!(f, "Defending"),
            Self::Custom(tag) => write!(f, "{tag}"),
        }
    }
}

/// Wound totals at which impairment and incapacitation kick in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoundThresholds {
    /// Wounds at which the combatant becomes Impaired (-1).
    pub impaired: i32,
    /// Wounds at which the combatant becomes Seriously Wounded (-2).
    pub seriously_wounded: i32,
    /// Wounds at which the combatant drops out of the fight.
    pub out_of_action: i32,
}

impl WoundThresholds {
    /// Thresholds for heroes, allies and featured foes.
    pub const STANDARD: Self = Self {
        impaired: 25,
        seriously_wounded: 30,
        out_of_action: 35,
    };

    /// Thresholds for bosses and uber-bosses.
    pub const BOSS: Self = Self {
        impaired: 40,
        seriously_wounded: 45,
        out_of_action: 50,
    };

    /// Whether the thresholds are strictly ascending and positive.
    pub fn is_ascending(&self) -> bool {
        0 < self.impaired
            && self.impaired < self.seriously_wounded
            && self.seriously_wounded < self.out_of_action
    }
}

/// A combatant's accumulated damage and the tags derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoundState {
    /// Total wounds taken this fight.
    pub wounds: i32,
    /// Penalty applied to attack and defense (0, 1 or 2).
    pub impairment: u8,
    /// Derived and narrative tags.
    pub conditions: BTreeSet<Condition>,
}

impl WoundState {
    /// Add wounds and recalculate impairment. Negative amounts are ignored.
    ///
    /// `thresholds` is `None` for mooks, who drop on any wound.
    pub fn apply(&mut self, amount: i32, thresholds: Option<&WoundThresholds>) {
        if amount <= 0 {
            return;
        }
        self.wounds = self.wounds.saturating_add(amount);
        self.recalculate(thresholds);
    }

    /// Whether the combatant can no longer act.
    pub fn is_out_of_action(&self) -> bool {
        self.conditions.contains(&Condition::OutOfAction)
    }

    /// Whether the given condition is present.
    pub fn has(&self, condition: &Condition) -> bool {
        self.conditions.contains(condition)
    }

    fn recalculate(&mut self, thresholds: Option<&WoundThresholds>) {
        let Some(t) = thresholds else {
            if self.wounds > 0 {
                self.conditions.insert(Condition::OutOfAction);
            }
            return;
        };

        self.impairment = if self.wounds >= t.seriously_wounded {
            2
        } else if self.wounds >= t.impaired {
            1
        } else {
            0
        };

        self.conditions.remove(&Condition::Impaired);
        self.conditions.remove(&Condition::SeriouslyWounded);
        match self.impairment {
            1 => {
                self.conditions.insert(Condition::Impaired);
            }
            2 => {
                self.conditions.insert(Condition::SeriouslyWounded);
            }
            _ => {}
        }

        if self.wounds >= t.out_of_action {
            self.conditions.insert(Condition::OutOfAction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_no_impairment() {
        let mut w = WoundState::default();
        w.apply(20, Some(&WoundThresholds::STANDARD));
        assert_eq!(w.wounds, 20);
        assert_eq!(w.impairment, 0);
        assert!(w.conditions.is_empty());
    }

    #[test]
    fn crossing_thresholds() {
        let mut w = WoundState::default();
        let t = WoundThresholds::STANDARD;
        w.apply(25, Some(&t));
        assert_eq!(w.impairment, 1);
        assert!(w.has(&Condition::Impaired));

        w.apply(5, Some(&t));
        assert_eq!(w.impairment, 2);
        assert!(w.has(&Condition::SeriouslyWounded));
        assert!(!w.has(&Condition::Impaired));
        assert!(!w.is_out_of_action());

        w.apply(5, Some(&t));
        assert!(w.is_out_of_action());
    }

    #[test]
    fn boss_thresholds_are_higher() {
        let mut w = WoundState::default();
        w.apply(35, Some(&WoundThresholds::BOSS));
        assert_eq!(w.impairment, 0);
        assert!(!w.is_out_of_action());
    }

    #[test]
    fn mook_drops_on_any_wound() {
        let mut w = WoundState::default();
        w.apply(1, None);
        assert!(w.is_out_of_action());
        assert_eq!(w.impairment, 0);
    }

    #[test]
    fn non_positive_amount_ignored() {
        let mut w = WoundState::default();
        w.apply(0, None);
        w.apply(-4, Some(&WoundThresholds::STANDARD));
        assert_eq!(w, WoundState::default());
    }

    #[test]
    fn narrative_tags_survive_recalculation() {
        let mut w = WoundState::default();
        w.conditions.insert(Condition::Custom("On Fire".to_string()));
        w.apply(26, Some(&WoundThresholds::STANDARD));
        assert!(w.has(&Condition::Custom("On Fire".to_string())));
        assert!(w.has(&Condition::Impaired));
    }

    #[test]
    fn thresholds_ascending() {
        assert!(WoundThresholds::STANDARD.is_ascending());
        assert!(WoundThresholds::BOSS.is_ascending());
        let bad = WoundThresholds {
            impaired: 30,
            seriously_wounded: 25,
            out_of_action: 35,
        };
        assert!(!bad.is_ascending());
    }

    #[test]
    fn condition_display() {
        assert_eq!(Condition::SeriouslyWounded.to_string(), "Seriously Wounded");
        assert_eq!(Condition::Custom("Dazed".to_string()).to_string(), "Dazed");
    }

    #[test]
    fn wounds_saturate() {
        let mut w = WoundState::default();
        w.apply(i32::MAX, Some(&WoundThresholds::STANDARD));
        w.apply(i32::MAX, Some(&WoundThresholds::STANDARD));
        assert_eq!(w.wounds, i32::MAX);
        assert!(w.is_out_of_action());
    }
}
