//! The combatant registry and the turn machinery built on it.
//!
//! [`CombatantRegistry`] is the roster of one encounter. The submodules
//! operate on it: [`initiative`] seeds shot counts, [`turn`] picks who acts
//! next, and [`action`] resolves what they do.

pub mod action;
pub mod initiative;
pub mod turn;

pub use action::{ActionOutcome, ActionType, resolve_action};
pub use initiative::{InitiativeResult, roll_initiative};
pub use turn::{next_actor, turn_order};

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, CombatantId, Condition};

/// The ordered roster of an encounter.
///
/// Insertion order is preserved and is the order used when rendering
/// initiative results. It has no bearing on turn order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantRegistry {
    combatants: Vec<Combatant>,
}

impl CombatantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant. A combatant with the same id is replaced in place.
    pub fn add(&mut self, combatant: Combatant) {
        if let Some(existing) = self.get_mut(combatant.id) {
            *existing = combatant;
        } else {
            self.combatants.push(combatant);
        }
    }

    /// Remove a combatant, returning it if it was present.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.combatants.iter().position(|c| c.id == id)?;
        Some(self.combatants.remove(index))
    }

    /// Look up a combatant by id.
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Look up a combatant by id for mutation.
    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Find a combatant by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Whether a combatant with this id is present.
    pub fn contains(&self, id: CombatantId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over combatants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    /// Iterate mutably over combatants in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    /// Number of combatants.
    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Drop conditions that only last until the end of a round.
    pub fn clear_round_conditions(&mut self) {
        for c in &mut self.combatants {
            c.wounds.conditions.remove(&Condition::Defending);
        }
    }
}

impl FromIterator<Combatant> for CombatantRegistry {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        let mut registry = Self::new();
        for combatant in iter {
            registry.add(combatant);
        }
        registry
    }
}
