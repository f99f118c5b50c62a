//! Partial cover, as seen from the attacker.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::location::{Location, Side};

/// Which parts of the target are behind cover, from the attacker's point of
/// view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cover(u8);

impl Cover {
    /// Upper body (head).
    pub const UPPER: Self = Self(1 << 0);
    /// Attacker's left.
    pub const LEFT: Self = Self(1 << 1);
    /// Attacker's right.
    pub const RIGHT: Self = Self(1 << 2);
    /// Attacker's lower left.
    pub const LOWER_LEFT: Self = Self(1 << 3);
    /// Attacker's lower right.
    pub const LOWER_RIGHT: Self = Self(1 << 4);

    /// No cover.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Check if all flags in `other` are set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of flags.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Is there any cover at all?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flip left and right. A target facing the attacker has its left on
    /// the attacker's right.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        let mut bits = self.0 & Self::UPPER.0;
        if self.contains(Self::LEFT) {
            bits |= Self::RIGHT.0;
        }
        if self.contains(Self::RIGHT) {
            bits |= Self::LEFT.0;
        }
        if self.contains(Self::LOWER_LEFT) {
            bits |= Self::LOWER_RIGHT.0;
        }
        if self.contains(Self::LOWER_RIGHT) {
            bits |= Self::LOWER_LEFT.0;
        }
        Self(bits)
    }

    /// Is the location covered against an attack from `side`?
    #[must_use]
    pub fn covers(self, archetype: Archetype, side: Side, location: Location) -> bool {
        if self.is_empty() || archetype.is_aero() {
            return false;
        }
        // Translate into the target's own left and right.
        let own = if side == Side::Front { self.mirrored() } else { self };
        let left = own.contains(Self::LEFT);
        let right = own.contains(Self::RIGHT);
        let lower_left = own.contains(Self::LOWER_LEFT);
        let lower_right = own.contains(Self::LOWER_RIGHT);

        match location {
            Location::Head => own.contains(Self::UPPER),
            Location::CenterTorso | Location::Torso => left && right,
            Location::Legs => lower_left || lower_right,
            l if l.is_leg() && l.is_left() => left || lower_left,
            l if l.is_leg() && l.is_right() => right || lower_right,
            l if l.is_left() => left,
            l if l.is_right() => right,
            _ => false,
        }
    }
}

impl std::ops::BitOr for Cover {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
