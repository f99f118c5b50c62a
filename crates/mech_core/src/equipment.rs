//! Mounted equipment and cached capability flags.
//!
//! The equipment catalog itself lives outside the core. A chassis only
//! needs to know an item's broad kind, where it sits and whether it still
//! works.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Index of a mounted item in its chassis equipment list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EquipmentId(u32);

impl EquipmentId {
    /// Create an ID from a raw index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Index into the equipment list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Broad equipment category relevant to the rules core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// Any weapon.
    Weapon,
    /// A heat sink.
    HeatSink {
        /// Double heat sink (dissipates 2).
        double: bool,
    },
    /// Jump jet (one jump MP each).
    JumpJet,
    /// Myomer Accelerator Signal Circuitry.
    Masc,
    /// Engine supercharger.
    Supercharger,
    /// Myomer booster.
    MyomerBooster,
    /// Triple-strength myomer.
    Tsm,
    /// Partial wing.
    PartialWing,
    /// Radical heat sink system.
    RadicalHeatSink,
    /// Modular armor pod.
    ModularArmor,
    /// Hardened armor.
    HardenedArmor,
    /// Targeting computer.
    TargetingComputer,
    /// Ammunition bin.
    Ammo,
    /// Anything else.
    Other,
}

impl EquipmentKind {
    /// Does this item need to be armed to work (boosters)?
    #[must_use]
    pub const fn is_armable(self) -> bool {
        matches!(self, Self::Masc | Self::Supercharger | Self::MyomerBooster)
    }

    /// Heat dissipated by one working sink of this kind.
    #[must_use]
    pub const fn sink_capacity(self) -> u32 {
        match self {
            Self::HeatSink { double: true } => 2,
            Self::HeatSink { double: false } => 1,
            _ => 0,
        }
    }
}

/// A piece of equipment mounted on a chassis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MountedEquipment {
    /// Index in the chassis equipment list.
    pub id: EquipmentId,
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: EquipmentKind,
    /// Mount location.
    pub location: Location,
    /// Critical slots occupied.
    pub slots: usize,
    /// Destroyed by a critical hit or location loss.
    pub destroyed: bool,
    /// Location breached (underwater); the item does not work.
    pub breached: bool,
    /// Weapon damaged and out of action.
    pub crippled: bool,
    /// Faces the rear arc.
    pub rear_mounted: bool,
    /// Armed (boosters only; always `true` for other kinds).
    pub armed: bool,
}

impl MountedEquipment {
    /// Is the item working?
    #[must_use]
    pub const fn is_working(&self) -> bool {
        !self.destroyed && !self.breached
    }

    /// Is this a weapon that can still fire?
    #[must_use]
    pub const fn is_operable_weapon(&self) -> bool {
        matches!(self.kind, EquipmentKind::Weapon) && self.is_working() && !self.crippled
    }

    /// Is this a weapon?
    #[must_use]
    pub const fn is_weapon(&self) -> bool {
        matches!(self.kind, EquipmentKind::Weapon)
    }

    /// Is this a heat sink?
    #[must_use]
    pub const fn is_heat_sink(&self) -> bool {
        matches!(self.kind, EquipmentKind::HeatSink { .. })
    }

    /// Is this a working booster (or non-booster) that is switched on?
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_working() && self.armed
    }
}

/// Cached flags describing what the mounted equipment can do.
///
/// Recomputed from the equipment list after every mutation, so hot rules
/// paths test a bit instead of scanning equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities(u32);

impl Capabilities {
    /// Working partial wing.
    pub const HAS_PARTIAL_WING: Self = Self(1 << 0);
    /// Working radical heat sink system.
    pub const HAS_RADICAL_HEAT_SINK: Self = Self(1 << 1);
    /// Working, armed MASC.
    pub const HAS_MASC: Self = Self(1 << 2);
    /// Working, armed supercharger.
    pub const HAS_SUPERCHARGER: Self = Self(1 << 3);
    /// Working, armed myomer booster.
    pub const HAS_MYOMER_BOOSTER: Self = Self(1 << 4);
    /// Triple-strength myomer.
    pub const HAS_TSM: Self = Self(1 << 5);
    /// Modular armor mounted.
    pub const HAS_MODULAR_ARMOR: Self = Self(1 << 6);
    /// Hardened armor.
    pub const HAS_HARDENED_ARMOR: Self = Self(1 << 7);
    /// At least one double heat sink.
    pub const HAS_DOUBLE_SINKS: Self = Self(1 << 8);
    /// Working targeting computer.
    pub const HAS_TARGETING_COMPUTER: Self = Self(1 << 9);

    /// No flags set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check if all flags in `other` are set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any flags in `other` are set in `self`.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Union of flags.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The same flags with MASC, supercharger and myomer booster cleared.
    #[must_use]
    pub const fn without_boosters(self) -> Self {
        let boosters = Self::HAS_MASC.0 | Self::HAS_SUPERCHARGER.0 | Self::HAS_MYOMER_BOOSTER.0;
        Self(self.0 & !boosters)
    }

    /// Derive flags from an equipment list.
    #[must_use]
    pub fn from_equipment(equipment: &[MountedEquipment]) -> Self {
        let mut caps = Self::empty();
        for item in equipment {
            let flag = match item.kind {
                EquipmentKind::PartialWing if item.is_working() => Self::HAS_PARTIAL_WING,
                EquipmentKind::RadicalHeatSink if item.is_working() => {
                    Self::HAS_RADICAL_HEAT_SINK
                }
                EquipmentKind::Masc if item.is_active() => Self::HAS_MASC,
                EquipmentKind::Supercharger if item.is_active() => Self::HAS_SUPERCHARGER,
                EquipmentKind::MyomerBooster if item.is_active() => Self::HAS_MYOMER_BOOSTER,
                EquipmentKind::Tsm => Self::HAS_TSM,
                EquipmentKind::ModularArmor if item.is_working() => Self::HAS_MODULAR_ARMOR,
                EquipmentKind::HardenedArmor => Self::HAS_HARDENED_ARMOR,
                EquipmentKind::HeatSink { double: true } => Self::HAS_DOUBLE_SINKS,
                EquipmentKind::TargetingComputer if item.is_working() => {
                    Self::HAS_TARGETING_COMPUTER
                }
                _ => Self::empty(),
            };
            caps = caps.union(flag);
        }
        caps
    }
}

impl std::ops::BitOr for Capabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: EquipmentKind) -> MountedEquipment {
        MountedEquipment {
            id: EquipmentId::new(0),
            name: "test".to_string(),
            kind,
            location: Location::CenterTorso,
            slots: 1,
            destroyed: false,
            breached: false,
            crippled: false,
            rear_mounted: false,
            armed: true,
        }
    }

    #[test]
    fn test_flags_combine() {
        let caps = Capabilities::HAS_MASC | Capabilities::HAS_SUPERCHARGER;
        assert!(caps.contains(Capabilities::HAS_MASC));
        assert!(caps.intersects(Capabilities::HAS_SUPERCHARGER | Capabilities::HAS_TSM));
        assert!(!caps.contains(Capabilities::HAS_TSM));
    }

    #[test]
    fn test_booster_needs_arming() {
        let mut masc = item(EquipmentKind::Masc);
        masc.armed = false;
        let caps = Capabilities::from_equipment(&[masc.clone()]);
        assert!(!caps.contains(Capabilities::HAS_MASC));

        masc.armed = true;
        let caps = Capabilities::from_equipment(&[masc.clone()]);
        assert!(caps.contains(Capabilities::HAS_MASC));

        masc.destroyed = true;
        let caps = Capabilities::from_equipment(&[masc]);
        assert!(!caps.contains(Capabilities::HAS_MASC));
    }

    #[test]
    fn test_double_sinks_flag() {
        let caps = Capabilities::from_equipment(&[
            item(EquipmentKind::HeatSink { double: true }),
            item(EquipmentKind::Weapon),
        ]);
        assert!(caps.contains(Capabilities::HAS_DOUBLE_SINKS));
        assert_eq!(EquipmentKind::HeatSink { double: true }.sink_capacity(), 2);
    }

    #[test]
    fn test_crippled_weapon_inoperable() {
        let mut laser = item(EquipmentKind::Weapon);
        assert!(laser.is_operable_weapon());
        laser.crippled = true;
        assert!(!laser.is_operable_weapon());
        assert!(laser.is_weapon());
    }
}
