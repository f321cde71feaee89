//! Random sources for die rolls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Die;

/// Something that can roll a die.
///
/// Implementations must return a value in `1..=die.sides()`.
pub trait DieRoller {
    /// Roll a single die.
    fn roll(&mut self, die: Die) -> u32;
}

impl<R: DieRoller + ?Sized> DieRoller for &mut R {
    fn roll(&mut self, die: Die) -> u32 {
        (**self).roll(die)
    }
}

/// A roller backed by a seeded standard RNG.
#[derive(Debug, Clone)]
pub struct RngRoller {
    rng: StdRng,
}

impl RngRoller {
    /// Create a roller from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a roller for the `cursor`-th operation of a seeded stream.
    ///
    /// Lets a persisted session resume its dice stream in a later process
    /// without storing RNG internals.
    pub fn from_cursor(seed: u64, cursor: u64) -> Self {
        let mixed = seed ^ cursor.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::from_seed(mixed)
    }
}

impl DieRoller for RngRoller {
    fn roll(&mut self, die: Die) -> u32 {
        self.rng.random_range(1..=die.sides().max(1))
    }
}

/// A roller that replays a fixed sequence of values, cycling when exhausted.
///
/// Values are clamped to the die being rolled. An empty sequence always
/// rolls 1.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    values: Vec<u32>,
    next: usize,
}

impl FixedRolls {
    /// Create a roller from a sequence of values.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// Number of rolls made so far.
    pub fn rolls_made(&self) -> usize {
        self.next
    }
}

impl DieRoller for FixedRolls {
    fn roll(&mut self, die: Die) -> u32 {
        let sides = die.sides().max(1);
        let value = if self.values.is_empty() {
            1
        } else {
            self.values[self.next % self.values.len()]
        };
        self.next += 1;
        value.clamp(1, sides)
    }
}

/// Roll a swerve: a positive die minus a negative die.
///
/// The result lies in `-(sides - 1)..=(sides - 1)` and is zero whenever
/// both dice show the same face.
pub fn swerve(roller: &mut impl DieRoller, die: Die) -> i32 {
    let positive = i32::try_from(roller.roll(die)).unwrap_or(i32::MAX);
    let negative = i32::try_from(roller.roll(die)).unwrap_or(i32::MAX);
    positive.saturating_sub(negative)
}
