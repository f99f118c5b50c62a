//! Dice sources injected into every rules operation that rolls.
//!
//! The core never reaches for system randomness. Callers hand in a
//! [`Dice`] implementation: [`SeededDice`] for reproducible games and
//! simulations, [`ScriptedDice`] to replay recorded rolls.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of six-sided dice.
pub trait Dice {
    /// Roll a single six-sided die (1..=6).
    fn d6(&mut self) -> u8;

    /// Roll one die.
    fn roll_1d6(&mut self) -> u8 {
        self.d6()
    }

    /// Roll two dice and sum them (2..=12).
    fn roll_2d6(&mut self) -> u8 {
        self.d6() + self.d6()
    }
}

/// Deterministic dice driven by a seeded ChaCha stream.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Create dice from a seed. Equal seeds produce equal roll sequences.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Dice for SeededDice {
    fn d6(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Dice that replay a fixed script of single-die results.
///
/// A 2d6 roll consumes two entries. Use [`ScriptedDice::from_totals`] to
/// script 2d6 totals directly.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<u8>,
    consumed: usize,
}

impl ScriptedDice {
    /// Create dice that return `faces` in order, one per die.
    ///
    /// # Panics
    ///
    /// Panics if any face is outside 1..=6.
    #[must_use]
    pub fn new(faces: &[u8]) -> Self {
        assert!(
            faces.iter().all(|f| (1..=6).contains(f)),
            "scripted die faces must be 1..=6: {faces:?}"
        );
        Self {
            script: faces.iter().copied().collect(),
            consumed: 0,
        }
    }

    /// Script a sequence of 2d6 totals, each split into two dice.
    ///
    /// # Panics
    ///
    /// Panics if any total is outside 2..=12.
    #[must_use]
    pub fn from_totals(totals: &[u8]) -> Self {
        let mut faces = Vec::with_capacity(totals.len() * 2);
        for &total in totals {
            assert!((2..=12).contains(&total), "2d6 total out of range: {total}");
            let first = total.saturating_sub(6).max(1);
            faces.push(first);
            faces.push(total - first);
        }
        Self::new(&faces)
    }

    /// Append more faces to the end of the script.
    pub fn push(&mut self, faces: &[u8]) {
        self.script.extend(faces.iter().copied());
    }

    /// Number of dice not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of dice rolled so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Dice for ScriptedDice {
    fn d6(&mut self) -> u8 {
        let face = self
            .script
            .pop_front()
            .unwrap_or_else(|| panic!("dice script exhausted after {} rolls", self.consumed));
        self.consumed += 1;
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_dice_in_range() {
        let mut dice = SeededDice::new(7);
        for _ in 0..1000 {
            let roll = dice.roll_2d6();
            assert!((2..=12).contains(&roll));
        }
    }

    #[test]
    fn test_seeded_dice_determinism() {
        let mut a = SeededDice::new(42);
        let mut b = SeededDice::new(42);
        let rolls_a: Vec<u8> = (0..50).map(|_| a.d6()).collect();
        let rolls_b: Vec<u8> = (0..50).map(|_| b.d6()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_scripted_totals() {
        let mut dice = ScriptedDice::from_totals(&[2, 7, 12]);
        assert_eq!(dice.roll_2d6(), 2);
        assert_eq!(dice.roll_2d6(), 7);
        assert_eq!(dice.roll_2d6(), 12);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.consumed(), 6);
    }

    #[test]
    #[should_panic(expected = "dice script exhausted")]
    fn test_scripted_exhaustion_panics() {
        let mut dice = ScriptedDice::new(&[3]);
        dice.d6();
        dice.d6();
    }
}
