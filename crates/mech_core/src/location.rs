//! Unit locations and attack geometry.
//!
//! Locations form one closed enum shared by every archetype. Each archetype
//! lists the subset it uses, in ordinal order (see
//! [`Archetype::locations`](crate::archetype::Archetype::locations)).

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// A body location on a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    // Mek and proto
    /// Head (cockpit, sensors, life support on a Mek).
    Head,
    /// Center torso.
    CenterTorso,
    /// Left torso.
    LeftTorso,
    /// Right torso.
    RightTorso,
    /// Left arm.
    LeftArm,
    /// Right arm.
    RightArm,
    /// Left leg (biped).
    LeftLeg,
    /// Right leg (biped).
    RightLeg,
    /// Front left leg (quad).
    FrontLeftLeg,
    /// Front right leg (quad).
    FrontRightLeg,
    /// Rear left leg (quad).
    RearLeftLeg,
    /// Rear right leg (quad).
    RearRightLeg,

    // Aerospace
    /// Nose arc.
    Nose,
    /// Left wing arc.
    LeftWing,
    /// Right wing arc.
    RightWing,
    /// Aft arc.
    Aft,
    /// Internal fuselage bay. Carries equipment, never armor.
    Fuselage,

    // ProtoMek
    /// Proto torso.
    Torso,
    /// Proto legs (a single location).
    Legs,
    /// Proto main gun mount.
    MainGun,
}

impl Location {
    /// Is this any kind of leg?
    #[must_use]
    pub const fn is_leg(self) -> bool {
        matches!(
            self,
            Self::LeftLeg
                | Self::RightLeg
                | Self::FrontLeftLeg
                | Self::FrontRightLeg
                | Self::RearLeftLeg
                | Self::RearRightLeg
                | Self::Legs
        )
    }

    /// Is this an arm?
    #[must_use]
    pub const fn is_arm(self) -> bool {
        matches!(self, Self::LeftArm | Self::RightArm)
    }

    /// Is this a Mek torso location?
    #[must_use]
    pub const fn is_torso(self) -> bool {
        matches!(
            self,
            Self::CenterTorso | Self::LeftTorso | Self::RightTorso | Self::Torso
        )
    }

    /// Is this a side torso?
    #[must_use]
    pub const fn is_side_torso(self) -> bool {
        matches!(self, Self::LeftTorso | Self::RightTorso)
    }

    /// Can a 12 on the critical table blow this location off entirely?
    #[must_use]
    pub const fn can_be_blown_off(self) -> bool {
        self.is_leg() || self.is_arm() || matches!(self, Self::Head)
    }

    /// Is this location on the unit's left side?
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(
            self,
            Self::LeftTorso
                | Self::LeftArm
                | Self::LeftLeg
                | Self::FrontLeftLeg
                | Self::RearLeftLeg
                | Self::LeftWing
        )
    }

    /// Is this location on the unit's right side?
    #[must_use]
    pub const fn is_right(self) -> bool {
        matches!(
            self,
            Self::RightTorso
                | Self::RightArm
                | Self::RightLeg
                | Self::FrontRightLeg
                | Self::RearRightLeg
                | Self::RightWing
        )
    }

    /// Short record-sheet abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Head => "HD",
            Self::CenterTorso => "CT",
            Self::LeftTorso => "LT",
            Self::RightTorso => "RT",
            Self::LeftArm => "LA",
            Self::RightArm => "RA",
            Self::LeftLeg => "LL",
            Self::RightLeg => "RL",
            Self::FrontLeftLeg => "FLL",
            Self::FrontRightLeg => "FRL",
            Self::RearLeftLeg => "RLL",
            Self::RearRightLeg => "RRL",
            Self::Nose => "NOS",
            Self::LeftWing => "LWG",
            Self::RightWing => "RWG",
            Self::Aft => "AFT",
            Self::Fuselage => "FSLG",
            Self::Torso => "T",
            Self::Legs => "L",
            Self::MainGun => "MG",
        }
    }
}

/// The side of the target an attack comes in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Side {
    /// Front arc.
    #[default]
    Front,
    /// Left side.
    Left,
    /// Right side.
    Right,
    /// Rear arc.
    Rear,
}

impl Side {
    /// All sides, in table order.
    pub const ALL: [Side; 4] = [Side::Front, Side::Left, Side::Right, Side::Rear];
}

impl TryFrom<u8> for Side {
    type Error = RulesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Front),
            1 => Ok(Self::Left),
            2 => Ok(Self::Right),
            3 => Ok(Self::Rear),
            other => Err(RulesError::InvalidSide(other)),
        }
    }
}

/// Where damage beyond a destroyed location goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transfer {
    /// Excess damage flows into this location.
    To(Location),
    /// The chain ends: destroying this location destroys the unit.
    Destroyed,
    /// The chain ends and excess damage is lost.
    NoTransfer,
}

impl Transfer {
    /// The next location, if the chain continues.
    #[must_use]
    pub const fn location(self) -> Option<Location> {
        match self {
            Self::To(location) => Some(location),
            Self::Destroyed | Self::NoTransfer => None,
        }
    }
}
