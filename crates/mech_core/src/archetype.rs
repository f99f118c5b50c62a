//! Unit archetypes and their rules parameters.
//!
//! An archetype is a closed tag. Everything that differs between unit
//! families (location layout, slot counts, counter caps, engine MP loss)
//! is data hanging off the tag, so every rules function dispatches with an
//! exhaustive `match` instead of a virtual override chain.

use serde::{Deserialize, Serialize};

use crate::counters::SystemCounter;
use crate::location::Location;

/// A unit family with its own location layout and formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Two-legged Mek.
    Biped,
    /// Four-legged Mek.
    Quad,
    /// Aerospace fighter.
    Fighter,
    /// Small craft (shuttles, assault craft).
    SmallCraft,
    /// Large craft (DropShips).
    LargeCraft,
    /// ProtoMek.
    ProtoMek,
}

const BIPED_LOCATIONS: [Location; 8] = [
    Location::Head,
    Location::CenterTorso,
    Location::RightTorso,
    Location::LeftTorso,
    Location::RightArm,
    Location::LeftArm,
    Location::RightLeg,
    Location::LeftLeg,
];

const QUAD_LOCATIONS: [Location; 8] = [
    Location::Head,
    Location::CenterTorso,
    Location::RightTorso,
    Location::LeftTorso,
    Location::FrontRightLeg,
    Location::FrontLeftLeg,
    Location::RearRightLeg,
    Location::RearLeftLeg,
];

const AERO_LOCATIONS: [Location; 5] = [
    Location::Nose,
    Location::RightWing,
    Location::LeftWing,
    Location::Aft,
    Location::Fuselage,
];

const PROTO_LOCATIONS: [Location; 6] = [
    Location::Head,
    Location::Torso,
    Location::RightArm,
    Location::LeftArm,
    Location::Legs,
    Location::MainGun,
];

/// Critical slots per aero arc. Aero equipment uses no slots, so this is
/// only a mounting limit.
const AERO_SLOTS: usize = 25;

impl Archetype {
    /// Every archetype.
    pub const ALL: [Archetype; 6] = [
        Self::Biped,
        Self::Quad,
        Self::Fighter,
        Self::SmallCraft,
        Self::LargeCraft,
        Self::ProtoMek,
    ];

    /// Locations of this archetype in ordinal order.
    #[must_use]
    pub const fn locations(self) -> &'static [Location] {
        match self {
            Self::Biped => &BIPED_LOCATIONS,
            Self::Quad => &QUAD_LOCATIONS,
            Self::Fighter | Self::SmallCraft | Self::LargeCraft => &AERO_LOCATIONS,
            Self::ProtoMek => &PROTO_LOCATIONS,
        }
    }

    /// Ordinal index of a location, if the archetype has it.
    #[must_use]
    pub fn location_index(self, location: Location) -> Option<usize> {
        self.locations().iter().position(|&l| l == location)
    }

    /// Does this archetype have the location?
    #[must_use]
    pub fn has_location(self, location: Location) -> bool {
        self.location_index(location).is_some()
    }

    /// Is this a Mek (biped or quad)?
    #[must_use]
    pub const fn is_mek(self) -> bool {
        matches!(self, Self::Biped | Self::Quad)
    }

    /// Is this an aerospace unit?
    #[must_use]
    pub const fn is_aero(self) -> bool {
        matches!(self, Self::Fighter | Self::SmallCraft | Self::LargeCraft)
    }

    /// Is this a ProtoMek?
    #[must_use]
    pub const fn is_proto(self) -> bool {
        matches!(self, Self::ProtoMek)
    }

    /// Is this a ground unit affected by weather and gravity?
    #[must_use]
    pub const fn is_ground(self) -> bool {
        !self.is_aero()
    }

    /// Number of critical slots in a location.
    #[must_use]
    pub const fn slot_count(self, location: Location) -> usize {
        match self {
            Self::Biped | Self::Quad => match location {
                Location::Head => 6,
                Location::LeftLeg
                | Location::RightLeg
                | Location::FrontLeftLeg
                | Location::FrontRightLeg
                | Location::RearLeftLeg
                | Location::RearRightLeg => 6,
                _ => 12,
            },
            Self::Fighter | Self::SmallCraft | Self::LargeCraft => AERO_SLOTS,
            Self::ProtoMek => match location {
                Location::Head => 2,
                Location::Torso | Location::Legs => 3,
                _ => 1,
            },
        }
    }

    /// Does this location carry rear armor?
    #[must_use]
    pub const fn has_rear_armor(self, location: Location) -> bool {
        self.is_mek()
            && matches!(
                location,
                Location::CenterTorso | Location::LeftTorso | Location::RightTorso
            )
    }

    /// Is this location a leg for movement and fall purposes?
    #[must_use]
    pub const fn is_leg(self, location: Location) -> bool {
        !self.is_aero() && location.is_leg()
    }

    /// Number of legs the archetype stands on.
    #[must_use]
    pub const fn leg_count(self) -> u32 {
        match self {
            Self::Biped => 2,
            Self::Quad => 4,
            Self::ProtoMek => 1,
            Self::Fighter | Self::SmallCraft | Self::LargeCraft => 0,
        }
    }

    /// Thrust lost per engine hit.
    #[must_use]
    pub const fn engine_mp_loss_per_hit(self) -> u32 {
        match self {
            Self::Fighter | Self::SmallCraft => 2,
            Self::LargeCraft => 1,
            Self::Biped | Self::Quad | Self::ProtoMek => 0,
        }
    }

    /// Counter caps for this archetype.
    ///
    /// The gyro cap is the hit count that destroys the gyro.
    #[must_use]
    pub fn counter_caps(self, gyro: GyroType) -> [u8; SystemCounter::COUNT] {
        let mut caps = [0u8; SystemCounter::COUNT];
        let mut set = |counter: SystemCounter, cap: u8| caps[counter.index()] = cap;
        match self {
            Self::Biped | Self::Quad => {
                set(SystemCounter::Engine, 3);
                set(SystemCounter::Gyro, gyro.destruction_threshold());
                set(SystemCounter::Sensors, 2);
                set(SystemCounter::LifeSupport, 2);
                set(SystemCounter::Cockpit, 1);
            }
            Self::Fighter => {
                set(SystemCounter::Engine, 3);
                set(SystemCounter::Sensors, 3);
                set(SystemCounter::Avionics, 3);
                set(SystemCounter::Fcs, 3);
                set(SystemCounter::LeftThruster, 1);
                set(SystemCounter::RightThruster, 1);
                set(SystemCounter::FuelTank, 1);
                set(SystemCounter::LandingGear, 1);
            }
            Self::SmallCraft => {
                set(SystemCounter::Engine, 3);
                set(SystemCounter::Sensors, 3);
                set(SystemCounter::Avionics, 3);
                set(SystemCounter::Fcs, 3);
                set(SystemCounter::LifeSupport, 1);
                set(SystemCounter::LeftThruster, 1);
                set(SystemCounter::RightThruster, 1);
                set(SystemCounter::FuelTank, 1);
                set(SystemCounter::LandingGear, 1);
            }
            Self::LargeCraft => {
                set(SystemCounter::Engine, 6);
                set(SystemCounter::Sensors, 3);
                set(SystemCounter::Avionics, 3);
                set(SystemCounter::Cic, 3);
                set(SystemCounter::LifeSupport, 1);
                set(SystemCounter::LeftThruster, 1);
                set(SystemCounter::RightThruster, 1);
                set(SystemCounter::FuelTank, 1);
                set(SystemCounter::LandingGear, 1);
            }
            Self::ProtoMek => {
                set(SystemCounter::Engine, 1);
                set(SystemCounter::Sensors, 2);
            }
        }
        caps
    }

    /// Display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Biped => "Biped Mek",
            Self::Quad => "Quad Mek",
            Self::Fighter => "Aerospace Fighter",
            Self::SmallCraft => "Small Craft",
            Self::LargeCraft => "Large Craft",
            Self::ProtoMek => "ProtoMek",
        }
    }
}

/// Mek engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EngineType {
    /// Six center-torso slots.
    #[default]
    Standard,
    /// Six center-torso slots, two per side torso.
    Light,
    /// Six center-torso slots, three per side torso.
    Xl,
    /// Three center-torso slots.
    Compact,
}

impl EngineType {
    /// Engine slots in the center torso.
    #[must_use]
    pub const fn center_slots(self) -> usize {
        match self {
            Self::Compact => 3,
            Self::Standard | Self::Light | Self::Xl => 6,
        }
    }

    /// Engine slots in each side torso.
    #[must_use]
    pub const fn side_slots(self) -> usize {
        match self {
            Self::Standard | Self::Compact => 0,
            Self::Light => 2,
            Self::Xl => 3,
        }
    }
}

/// Mek gyro construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GyroType {
    /// Four slots, destroyed by two hits.
    #[default]
    Standard,
    /// Two slots, destroyed by two hits.
    Compact,
    /// Four slots, destroyed by three hits.
    HeavyDuty,
    /// Six slots, destroyed by two hits.
    Xl,
}

impl GyroType {
    /// Center-torso slots the gyro occupies.
    #[must_use]
    pub const fn slots(self) -> usize {
        match self {
            Self::Standard | Self::HeavyDuty => 4,
            Self::Compact => 2,
            Self::Xl => 6,
        }
    }

    /// Hits that destroy the gyro.
    #[must_use]
    pub const fn destruction_threshold(self) -> u8 {
        match self {
            Self::HeavyDuty => 3,
            Self::Standard | Self::Compact | Self::Xl => 2,
        }
    }
}

/// Mek cockpit construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CockpitType {
    /// Head-mounted cockpit with two sensor and two life support slots.
    #[default]
    Standard,
    /// Head-mounted cockpit with a single life support slot.
    Small,
    /// Cockpit in the center torso; head loss does not kill the crew.
    TorsoMounted,
}

/// Aerospace hull shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HullShape {
    /// Winged hull. Can taxi when grounded.
    #[default]
    Aerodyne,
    /// Spheroid hull. Cannot move when grounded.
    Spheroid,
}

/// Standard Mek internal structure by tonnage: (center torso, side torso, arm, leg).
///
/// Tonnage is rounded down to the nearest 5 and clamped to 20..=100.
#[must_use]
pub fn mek_internal_structure(tonnage: u32) -> (u32, u32, u32, u32) {
    let t = (tonnage.clamp(20, 100) / 5) * 5;
    match t {
        20 => (6, 5, 3, 4),
        25 => (8, 6, 4, 6),
        30 => (10, 7, 5, 7),
        35 => (11, 8, 6, 8),
        40 => (12, 10, 6, 10),
        45 => (14, 11, 7, 11),
        50 => (16, 12, 8, 12),
        55 => (18, 13, 9, 13),
        60 => (20, 14, 10, 14),
        65 => (21, 15, 10, 15),
        70 => (22, 15, 11, 15),
        75 => (23, 16, 12, 16),
        80 => (25, 17, 13, 17),
        85 => (27, 18, 14, 18),
        90 => (29, 19, 15, 19),
        95 => (30, 20, 16, 20),
        _ => (31, 21, 17, 21),
    }
}

/// Standard ProtoMek internal structure by tonnage: (head, torso, arm, legs).
#[must_use]
pub fn proto_internal_structure(tonnage: u32) -> (u32, u32, u32, u32) {
    match tonnage.clamp(2, 9) {
        2 => (1, 2, 1, 2),
        3 => (1, 3, 1, 2),
        4 => (1, 4, 1, 3),
        5 => (1, 5, 1, 3),
        6 => (2, 6, 2, 4),
        7 => (2, 7, 2, 4),
        8 => (2, 8, 3, 5),
        _ => (2, 9, 3, 5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lists_are_unique() {
        for archetype in Archetype::ALL {
            let locations = archetype.locations();
            for (i, a) in locations.iter().enumerate() {
                for b in &locations[i + 1..] {
                    assert_ne!(a, b, "{archetype:?} lists {a:?} twice");
                }
            }
        }
    }

    #[test]
    fn test_location_index() {
        assert_eq!(Archetype::Biped.location_index(Location::Head), Some(0));
        assert_eq!(Archetype::Biped.location_index(Location::LeftLeg), Some(7));
        assert_eq!(Archetype::Biped.location_index(Location::Nose), None);
        assert!(Archetype::Fighter.has_location(Location::Fuselage));
    }

    #[test]
    fn test_families() {
        assert!(Archetype::Quad.is_mek());
        assert!(Archetype::LargeCraft.is_aero());
        assert!(Archetype::ProtoMek.is_ground());
        assert!(!Archetype::Fighter.is_ground());
    }

    #[test]
    fn test_gyro_caps() {
        let standard = Archetype::Biped.counter_caps(GyroType::Standard);
        let heavy = Archetype::Biped.counter_caps(GyroType::HeavyDuty);
        assert_eq!(standard[SystemCounter::Gyro.index()], 2);
        assert_eq!(heavy[SystemCounter::Gyro.index()], 3);
    }

    #[test]
    fn test_engine_loss_per_hit() {
        assert_eq!(Archetype::Fighter.engine_mp_loss_per_hit(), 2);
        assert_eq!(Archetype::LargeCraft.engine_mp_loss_per_hit(), 1);
    }

    #[test]
    fn test_center_torso_fits_engine_and_gyro() {
        for engine in [EngineType::Standard, EngineType::Light, EngineType::Xl] {
            for gyro in [GyroType::Standard, GyroType::Compact, GyroType::HeavyDuty, GyroType::Xl] {
                assert!(
                    engine.center_slots() + gyro.slots()
                        <= Archetype::Biped.slot_count(Location::CenterTorso)
                );
            }
        }
    }

    #[test]
    fn test_mek_internal_structure_table() {
        assert_eq!(mek_internal_structure(100), (31, 21, 17, 21));
        assert_eq!(mek_internal_structure(52), (16, 12, 8, 12));
        assert_eq!(mek_internal_structure(5), (6, 5, 3, 4));
    }
}
