//! Combatants: identity, typed stat blocks, and wound state.
//!
//! A combatant is the fight-local view of an external character or vehicle
//! record. The registry owns it for the lifetime of one encounter.

pub mod wounds;

pub use wounds::{Condition, WoundState, WoundThresholds};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a combatant, equal to the id of the record it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    /// Create a random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an id from a fixed number. Useful for reproducible fixtures.
    pub fn from_u128(n: u128) -> Self {
        Self(Uuid::from_u128(n))
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which kind of external record a combatant represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantKind {
    /// A character record.
    #[default]
    Character,
    /// A vehicle record.
    Vehicle,
}

impl std::fmt::Display for CombatantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Vehicle => write!(f, "vehicle"),
        }
    }
}

/// The narrative weight of a combatant, which decides how it takes wounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacterType {
    /// A player character.
    #[default]
    Pc,
    /// A friendly non-player character.
    Ally,
    /// A nameless goon who drops on any wound.
    Mook,
    /// A named opponent.
    FeaturedFoe,
    /// A major villain.
    Boss,
    /// A campaign-level villain.
    UberBoss,
}

impl CharacterType {
    /// Whether this type uses boss-level wound thresholds.
    pub fn is_boss(self) -> bool {
        matches!(self, Self::Boss | Self::UberBoss)
    }

    /// Whether this type is a player character.
    pub fn is_pc(self) -> bool {
        self == Self::Pc
    }
}

impl std::str::FromStr for CharacterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "pc" => Ok(Self::Pc),
            "ally" => Ok(Self::Ally),
            "mook" => Ok(Self::Mook),
            "featuredfoe" => Ok(Self::FeaturedFoe),
            "boss" => Ok(Self::Boss),
            "uberboss" => Ok(Self::UberBoss),
            _ => Err(format!("unknown character type: {s}")),
        }
    }
}

impl std::fmt::Display for CharacterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pc => write!(f, "PC"),
            Self::Ally => write!(f, "Ally"),
            Self::Mook => write!(f, "Mook"),
            Self::FeaturedFoe => write!(f, "Featured Foe"),
            Self::Boss => write!(f, "Boss"),
            Self::UberBoss => write!(f, "Uber-Boss"),
        }
    }
}

impl TryFrom<String> for CharacterType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CharacterType> for String {
    fn from(value: CharacterType) -> Self {
        value.to_string()
    }
}

/// The static numbers a combatant fights with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    /// Action value used for attacks.
    pub attack: i32,
    /// Value an attack must reach to hit.
    pub defense: i32,
    /// Base damage dealt on a hit.
    pub damage: i32,
    /// Subtracted from incoming damage.
    pub toughness: i32,
    /// Added to initiative rolls.
    pub speed: i32,
}

/// A participant in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Identity, shared with the external record.
    pub id: CombatantId,
    /// Which kind of record this is.
    pub kind: CombatantKind,
    /// Display name.
    pub name: String,
    /// Narrative weight.
    pub character_type: CharacterType,
    /// Static stats.
    pub stats: StatBlock,
    /// Remaining shots. May go negative.
    pub current_shots: i32,
    /// Accumulated damage and derived tags.
    pub wounds: WoundState,
    /// The user who controls this combatant, if any.
    pub owner_id: Option<Uuid>,
}

impl Combatant {
    /// Create a character combatant with no shots and no wounds.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        character_type: CharacterType,
        stats: StatBlock,
    ) -> Self {
        Self {
            id,
            kind: CombatantKind::Character,
            name: name.into(),
            character_type,
            stats,
            current_shots: 0,
            wounds: WoundState::default(),
            owner_id: None,
        }
    }

    /// Set the record kind.
    pub fn with_kind(mut self, kind: CombatantKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the controlling user.
    pub fn with_owner(mut self, owner: Uuid) -> Self {
        self.owner_id = Some(owner);
        self
    }

    /// Set the starting shot count.
    pub fn with_shots(mut self, shots: i32) -> Self {
        self.current_shots = shots;
        self
    }

    /// Attack value after impairment.
    pub fn effective_attack(&self) -> i32 {
        self.stats
            .attack
            .saturating_sub(i32::from(self.wounds.impairment))
    }

    /// Defense value after impairment, plus `defend_bonus` while defending.
    pub fn effective_defense(&self, defend_bonus: i32) -> i32 {
        let bonus = if self.wounds.has(&Condition::Defending) {
            defend_bonus
        } else {
            0
        };
        self.stats
            .defense
            .saturating_sub(i32::from(self.wounds.impairment))
            .saturating_add(bonus)
    }

    /// Whether the combatant has dropped out of the fight.
    pub fn is_out_of_action(&self) -> bool {
        self.wounds.is_out_of_action()
    }
}
