//! Turn order on the shot clock.
//!
//! Whoever has the most shots left acts next. Ties go to the faster
//! combatant, then to the lower id, so the order is total and stable.

use std::cmp::Ordering;

use crate::combatant::{Combatant, CombatantId};

use super::CombatantRegistry;

/// Pick the next combatant to act, without changing anything.
///
/// Only combatants with more than `threshold` shots who are still in the
/// fight are eligible. Returns `None` when nobody is.
pub fn next_actor(registry: &CombatantRegistry, threshold: i32) -> Option<CombatantId> {
    let actor = registry
        .iter()
        .filter(|c| is_eligible(c, threshold))
        .min_by(|a, b| turn_cmp(a, b))
        .map(|c| c.id);
    if let Some(id) = actor {
        tracing::debug!(actor = %id, "next actor");
    }
    actor
}

/// All eligible combatants in the order they would act.
pub fn turn_order(registry: &CombatantRegistry, threshold: i32) -> Vec<CombatantId> {
    let mut eligible: Vec<&Combatant> = registry
        .iter()
        .filter(|c| is_eligible(c, threshold))
        .collect();
    eligible.sort_by(|a, b| turn_cmp(a, b));
    eligible.into_iter().map(|c| c.id).collect()
}

fn is_eligible(combatant: &Combatant, threshold: i32) -> bool {
    combatant.current_shots > threshold && !combatant.is_out_of_action()
}

// Earlier in the order compares as `Less`.
fn turn_cmp(a: &Combatant, b: &Combatant) -> Ordering {
    b.current_shots
        .cmp(&a.current_shots)
        .then_with(|| b.stats.speed.cmp(&a.stats.speed))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CharacterType, Condition, StatBlock};

    fn combatant(n: u128, speed: i32, shots: i32) -> Combatant {
        Combatant::new(
            CombatantId::from_u128(n),
            format!("c{n}"),
            CharacterType::Pc,
            StatBlock {
                speed,
                ..StatBlock::default()
            },
        )
        .with_shots(shots)
    }

    fn id(n: u128) -> CombatantId {
        CombatantId::from_u128(n)
    }

    #[test]
    fn highest_shots_first() {
        let reg: CombatantRegistry = [combatant(1, 5, 9), combatant(2, 5, 12), combatant(3, 5, 3)]
            .into_iter()
            .collect();
        assert_eq!(next_actor(&reg, 0), Some(id(2)));
        assert_eq!(turn_order(&reg, 0), vec![id(2), id(1), id(3)]);
    }

    #[test]
    fn tie_broken_by_speed_then_id() {
        let reg: CombatantRegistry = [
            combatant(3, 6, 10),
            combatant(2, 8, 10),
            combatant(1, 6, 10),
        ]
        .into_iter()
        .collect();
        assert_eq!(turn_order(&reg, 0), vec![id(2), id(1), id(3)]);
    }

    #[test]
    fn none_when_no_positive_shots() {
        let reg: CombatantRegistry = [combatant(1, 5, 0), combatant(2, 5, -3)]
            .into_iter()
            .collect();
        assert_eq!(next_actor(&reg, 0), None);
        assert!(turn_order(&reg, 0).is_empty());
    }

    #[test]
    fn threshold_is_exclusive() {
        let reg: CombatantRegistry = [combatant(1, 5, 3), combatant(2, 5, 4)]
            .into_iter()
            .collect();
        assert_eq!(next_actor(&reg, 3), Some(id(2)));
        assert_eq!(next_actor(&reg, 4), None);
    }

    #[test]
    fn out_of_action_skipped() {
        let mut top = combatant(1, 5, 20);
        top.wounds.conditions.insert(Condition::OutOfAction);
        let reg: CombatantRegistry = [top, combatant(2, 5, 4)].into_iter().collect();
        assert_eq!(next_actor(&reg, 0), Some(id(2)));
    }

    #[test]
    fn repeated_calls_agree() {
        let reg: CombatantRegistry = [combatant(1, 7, 12), combatant(2, 6, 10)]
            .into_iter()
            .collect();
        let before = reg.clone();
        assert_eq!(next_actor(&reg, 0), next_actor(&reg, 0));
        assert_eq!(reg, before);
    }
}
