//! Fight records and the roster lookup the engine depends on.

use std::collections::HashMap;

use cw_mechanics::{Combatant, CombatantId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The parts of an external fight record the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightRecord {
    /// Fight id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Whether the fight is driven by the turn engine.
    pub solo_mode: bool,
    /// Characters and vehicles taking part.
    pub participant_ids: Vec<CombatantId>,
}

/// Lookup of fights and their participants.
pub trait Roster {
    /// Find a fight by id.
    fn fight(&self, id: Uuid) -> Option<FightRecord>;

    /// Build combatants for a fight's participants, in participant order.
    /// Participants that cannot be found are skipped.
    fn combatants(&self, fight: &FightRecord) -> Vec<Combatant>;
}

/// An in-memory roster.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    fights: HashMap<Uuid, FightRecord>,
    combatants: HashMap<CombatantId, Combatant>,
}

impl StaticRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combatant record.
    pub fn add_combatant(&mut self, combatant: Combatant) {
        self.combatants.insert(combatant.id, combatant);
    }

    /// Register a fight record.
    pub fn add_fight(&mut self, fight: FightRecord) {
        self.fights.insert(fight.id, fight);
    }

    /// Register a fight together with its combatants.
    pub fn with_fight(mut self, fight: FightRecord, combatants: Vec<Combatant>) -> Self {
        for c in combatants {
            self.add_combatant(c);
        }
        self.add_fight(fight);
        self
    }

    /// Look up a combatant record.
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }
}

impl Roster for StaticRoster {
    fn fight(&self, id: Uuid) -> Option<FightRecord> {
        self.fights.get(&id).cloned()
    }

    fn combatants(&self, fight: &FightRecord) -> Vec<Combatant> {
        fight
            .participant_ids
            .iter()
            .filter_map(|id| self.combatants.get(id).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_mechanics::{CharacterType, StatBlock};

    #[test]
    fn combatants_in_participant_order() {
        let a = Combatant::new(CombatantId::from_u128(1), "A", CharacterType::Pc, StatBlock::default());
        let b = Combatant::new(CombatantId::from_u128(2), "B", CharacterType::Mook, StatBlock::default());
        let fight = FightRecord {
            id: Uuid::from_u128(10),
            name: "Docks".to_string(),
            solo_mode: true,
            participant_ids: vec![b.id, CombatantId::from_u128(3), a.id],
        };
        let roster = StaticRoster::new().with_fight(fight.clone(), vec![a, b]);

        assert_eq!(roster.fight(fight.id), Some(fight.clone()));
        assert!(roster.fight(Uuid::from_u128(11)).is_none());
        let names: Vec<String> = roster.combatants(&fight).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
