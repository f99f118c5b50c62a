//! Critical slots and the systems that occupy them.

use serde::{Deserialize, Serialize};

use crate::counters::SystemCounter;
use crate::equipment::EquipmentId;

/// A Mek actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actuator {
    /// Shoulder.
    Shoulder,
    /// Upper arm.
    UpperArm,
    /// Lower arm.
    LowerArm,
    /// Hand.
    Hand,
    /// Hip.
    Hip,
    /// Upper leg.
    UpperLeg,
    /// Lower leg.
    LowerLeg,
    /// Foot.
    Foot,
}

impl Actuator {
    /// Is this a leg actuator below the hip (costs 1 MP when hit)?
    #[must_use]
    pub const fn is_lower_leg_actuator(self) -> bool {
        matches!(self, Self::UpperLeg | Self::LowerLeg | Self::Foot)
    }

    /// Is this any leg actuator, hip included?
    #[must_use]
    pub const fn is_leg_actuator(self) -> bool {
        matches!(self, Self::Hip | Self::UpperLeg | Self::LowerLeg | Self::Foot)
    }
}

/// A built-in unit system occupying a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    /// Engine.
    Engine,
    /// Gyro.
    Gyro,
    /// Cockpit.
    Cockpit,
    /// Sensors.
    Sensors,
    /// Life support.
    LifeSupport,
    /// Actuator.
    Actuator(Actuator),
    /// Generic ProtoMek location system.
    ProtoSystem,
}

impl SystemKind {
    /// Counter this system feeds when hit, if any.
    #[must_use]
    pub const fn counter(self) -> Option<SystemCounter> {
        match self {
            Self::Engine => Some(SystemCounter::Engine),
            Self::Gyro => Some(SystemCounter::Gyro),
            Self::Cockpit => Some(SystemCounter::Cockpit),
            Self::Sensors => Some(SystemCounter::Sensors),
            Self::LifeSupport => Some(SystemCounter::LifeSupport),
            Self::Actuator(_) | Self::ProtoSystem => None,
        }
    }
}

/// What a critical slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SlotContent {
    /// Nothing.
    #[default]
    Empty,
    /// A built-in system.
    System(SystemKind),
    /// A mounted piece of equipment, by index into the chassis equipment list.
    Equipment(EquipmentId),
}

/// One critical slot.
///
/// `hit`, `destroyed` and `missing` are monotonic: once set, nothing in the
/// core clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CriticalSlot {
    /// Slot content.
    pub content: SlotContent,
    /// Took a critical hit.
    pub hit: bool,
    /// Component in the slot is destroyed.
    pub destroyed: bool,
    /// Slot was blown off with its location.
    pub missing: bool,
    /// Can be repaired between scenarios.
    pub repairable: bool,
    /// Armored component: absorbs the first critical hit.
    pub armored: bool,
}

impl CriticalSlot {
    /// A fresh slot with the given content.
    #[must_use]
    pub const fn new(content: SlotContent) -> Self {
        Self {
            content,
            hit: false,
            destroyed: false,
            missing: false,
            repairable: true,
            armored: false,
        }
    }

    /// An empty slot.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(SlotContent::Empty)
    }

    /// A slot holding a system.
    #[must_use]
    pub const fn system(kind: SystemKind) -> Self {
        Self::new(SlotContent::System(kind))
    }

    /// Is the slot free for mounting?
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, SlotContent::Empty)
    }

    /// Can a critical hit land on this slot?
    #[must_use]
    pub const fn is_hittable(&self) -> bool {
        !self.is_empty() && !self.destroyed && !self.missing
    }

    /// Is this slot still working?
    #[must_use]
    pub const fn is_working(&self) -> bool {
        !self.hit && !self.destroyed && !self.missing
    }

    /// The system in this slot, if any.
    #[must_use]
    pub const fn system_kind(&self) -> Option<SystemKind> {
        match self.content {
            SlotContent::System(kind) => Some(kind),
            SlotContent::Empty | SlotContent::Equipment(_) => None,
        }
    }

    /// The equipment in this slot, if any.
    #[must_use]
    pub const fn equipment(&self) -> Option<EquipmentId> {
        match self.content {
            SlotContent::Equipment(id) => Some(id),
            SlotContent::Empty | SlotContent::System(_) => None,
        }
    }

    /// Apply a critical hit.
    ///
    /// Returns `false` when the armor absorbed it and the component is
    /// unharmed.
    pub fn take_hit(&mut self) -> bool {
        if self.armored {
            self.armored = false;
            return false;
        }
        self.hit = true;
        self.destroyed = true;
        true
    }

    /// Destroy the slot outright (location destroyed).
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Mark the slot as blown off.
    pub fn blow_off(&mut self) {
        self.missing = true;
        self.destroyed = true;
        self.repairable = false;
    }
}
