//! Armor and internal structure values.

use serde::{Deserialize, Serialize};

/// Armor or internal structure of one location.
///
/// Sentinel states are explicit variants rather than magic negative
/// numbers, so arithmetic can never run through them by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StructureValue {
    /// The location has no such value (aero fuselage armor).
    #[default]
    NotApplicable,
    /// Remaining points.
    Points(u32),
    /// Destroyed this phase; becomes [`StructureValue::Destroyed`] at phase end.
    Doomed,
    /// Destroyed in an earlier phase.
    Destroyed,
}

impl StructureValue {
    /// Remaining points, reading every sentinel as 0.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Points(p) => p,
            Self::NotApplicable | Self::Doomed | Self::Destroyed => 0,
        }
    }

    /// Is this location gone, now or earlier this phase?
    #[must_use]
    pub const fn is_gone(self) -> bool {
        matches!(self, Self::Doomed | Self::Destroyed)
    }

    /// Does the value participate in damage at all?
    #[must_use]
    pub const fn is_applicable(self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Absorb up to `amount` damage. Returns `(absorbed, left_over)`.
    ///
    /// Points that reach 0 stay `Points(0)`; only a location destruction
    /// moves the value to a sentinel.
    pub fn absorb(&mut self, amount: u32) -> (u32, u32) {
        match *self {
            Self::Points(p) => {
                let absorbed = p.min(amount);
                *self = Self::Points(p - absorbed);
                (absorbed, amount - absorbed)
            }
            Self::NotApplicable | Self::Doomed | Self::Destroyed => (0, amount),
        }
    }

    /// Mark destroyed this phase. Non-applicable values stay non-applicable.
    pub fn doom(&mut self) {
        if self.is_applicable() && !matches!(self, Self::Destroyed) {
            *self = Self::Doomed;
        }
    }

    /// Finalize a doomed value.
    pub fn end_phase(&mut self) {
        if matches!(self, Self::Doomed) {
            *self = Self::Destroyed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_partial() {
        let mut armor = StructureValue::Points(5);
        assert_eq!(armor.absorb(3), (3, 0));
        assert_eq!(armor, StructureValue::Points(2));
        assert_eq!(armor.absorb(7), (2, 5));
        assert_eq!(armor, StructureValue::Points(0));
    }

    #[test]
    fn test_sentinels_pass_damage_through() {
        let mut armor = StructureValue::Destroyed;
        assert_eq!(armor.absorb(4), (0, 4));
        let mut na = StructureValue::NotApplicable;
        assert_eq!(na.absorb(4), (0, 4));
        assert_eq!(na.points(), 0);
    }

    #[test]
    fn test_doom_lifecycle() {
        let mut internal = StructureValue::Points(0);
        internal.doom();
        assert_eq!(internal, StructureValue::Doomed);
        assert!(internal.is_gone());
        internal.end_phase();
        assert_eq!(internal, StructureValue::Destroyed);
        internal.doom();
        assert_eq!(internal, StructureValue::Destroyed);
    }

    #[test]
    fn test_doom_keeps_not_applicable() {
        let mut value = StructureValue::NotApplicable;
        value.doom();
        assert_eq!(value, StructureValue::NotApplicable);
    }
}
