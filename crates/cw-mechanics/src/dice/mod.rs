//! Dice types and rolling.
//!
//! Initiative and swerve rolls both go through the [`DieRoller`] trait so
//! that callers can swap a seeded RNG for a fixed sequence in tests.

pub mod roller;

pub use roller::{DieRoller, FixedRolls, RngRoller, swerve};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Largest custom die accepted when parsing.
    pub const MAX_SIDES: u32 = 1000;

    /// Parse a die from a string like "d20", "d6", "d100".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "d4" => Some(Self::D4),
            "d6" => Some(Self::D6),
            "d8" => Some(Self::D8),
            "d10" => Some(Self::D10),
            "d12" => Some(Self::D12),
            "d20" => Some(Self::D20),
            "d100" => Some(Self::D100),
            other => {
                let num = other.strip_prefix('d')?.parse::<u32>().ok()?;
                if (2..=Self::MAX_SIDES).contains(&num) {
                    Some(Self::Custom(num))
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

impl TryFrom<String> for Die {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_tag(&value).ok_or_else(|| format!("not a die: {value}"))
    }
}

impl From<Die> for String {
    fn from(die: Die) -> Self {
        die.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn die_sides() {
        assert_eq!(Die::D4.sides(), 4);
        assert_eq!(Die::D6.sides(), 6);
        assert_eq!(Die::D10.sides(), 10);
        assert_eq!(Die::D100.sides(), 100);
        assert_eq!(Die::Custom(30).sides(), 30);
    }

    #[test]
    fn die_from_str() {
        assert_eq!(Die::from_str_tag("d10"), Some(Die::D10));
        assert_eq!(Die::from_str_tag(" D6 "), Some(Die::D6));
        assert_eq!(Die::from_str_tag("d30"), Some(Die::Custom(30)));
        assert_eq!(Die::from_str_tag("d1"), None);
        assert_eq!(Die::from_str_tag("six"), None);
        assert_eq!(Die::from_str_tag("d1000"), Some(Die::Custom(1000)));
        assert_eq!(Die::from_str_tag("d1001"), None);
        assert_eq!(Die::from_str_tag("d4294967295"), None);
    }

    #[test]
    fn die_display() {
        assert_eq!(Die::D6.to_string(), "d6");
        assert_eq!(Die::Custom(30).to_string(), "d30");
    }

    #[test]
    fn die_serde_as_string() {
        let json = serde_json::to_string(&Die::D10).unwrap();
        assert_eq!(json, "\"d10\"");
        let die: Die = serde_json::from_str("\"d8\"").unwrap();
        assert_eq!(die, Die::D8);
        assert!(serde_json::from_str::<Die>("\"d0\"").is_err());
    }
}
