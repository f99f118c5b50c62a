//! Events produced while applying damage.
//!
//! Damage application never calls back into a game. It returns these events
//! and the caller decides what to do with them (piloting rolls, unit
//! removal, logging).

use serde::{Deserialize, Serialize};

use crate::counters::SystemCounter;
use crate::equipment::EquipmentId;
use crate::hit_table::AeroCrit;
use crate::location::Location;
use crate::slot::SlotContent;

/// Why a fall check is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FallReason {
    /// A leg was destroyed or blown off.
    LegDestroyed,
    /// 20 or more damage in one phase.
    HeavyDamage,
    /// Gyro took a hit.
    GyroHit,
    /// Gyro destroyed.
    GyroDestroyed,
    /// Hip actuator hit.
    HipHit,
    /// Leg actuator (upper, lower, foot) hit.
    LegActuatorHit,
}

/// Why a unit was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestructionCause {
    /// A location at the end of a transfer chain was destroyed.
    LocationDestroyed(Location),
    /// Engine destroyed.
    EngineDestroyed,
    /// Structural integrity reduced to 0.
    StructuralIntegrity,
}

/// Something that happened while damage was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageEvent {
    /// Armor absorbed damage.
    ArmorDamaged {
        /// Location.
        location: Location,
        /// Rear armor.
        rear: bool,
        /// Points absorbed.
        amount: u32,
    },
    /// Internal structure absorbed damage.
    InternalDamaged {
        /// Location.
        location: Location,
        /// Points absorbed.
        amount: u32,
    },
    /// A location was destroyed.
    LocationDestroyed {
        /// Location.
        location: Location,
    },
    /// A limb or head was blown off by a critical roll of 12.
    LocationBlownOff {
        /// Location.
        location: Location,
    },
    /// Excess damage moved on.
    DamageTransferred {
        /// Destroyed location.
        from: Location,
        /// Next location in the chain.
        to: Location,
        /// Damage carried over.
        amount: u32,
    },
    /// A critical slot was hit.
    CriticalHit {
        /// Location.
        location: Location,
        /// Slot index.
        slot: usize,
        /// What the slot held.
        content: SlotContent,
    },
    /// Armored component absorbed a critical hit.
    CriticalAbsorbed {
        /// Location.
        location: Location,
        /// Slot index.
        slot: usize,
    },
    /// A system counter went up.
    SystemHit {
        /// Counter.
        counter: SystemCounter,
        /// New total.
        hits: u8,
    },
    /// Equipment destroyed.
    EquipmentDestroyed {
        /// Equipment.
        id: EquipmentId,
    },
    /// An aerospace critical applied.
    AeroCritical {
        /// Critical effect.
        crit: AeroCrit,
    },
    /// Structural integrity lost.
    StructuralDamage {
        /// Points lost.
        amount: u32,
        /// Points left.
        remaining: u32,
    },
    /// The crew was wounded.
    CrewHit {
        /// Hits taken.
        hits: u8,
        /// New total.
        total: u8,
    },
    /// The crew was killed.
    CrewKilled,
    /// A fall check is required.
    FallCheckRequired {
        /// Reason.
        reason: FallReason,
    },
    /// Damage was lost at the end of a chain that does not transfer.
    DamageLost {
        /// Points lost.
        amount: u32,
    },
    /// The unit was destroyed.
    UnitDestroyed {
        /// Cause.
        cause: DestructionCause,
    },
}

/// Outcome of one damage application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Events in the order they happened.
    pub events: Vec<DamageEvent>,
    /// Total points applied to armor, structure or SI.
    pub applied: u32,
}

impl DamageReport {
    pub(crate) fn push(&mut self, event: DamageEvent) {
        self.events.push(event);
    }

    /// Was the unit destroyed?
    #[must_use]
    pub fn unit_destroyed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, DamageEvent::UnitDestroyed { .. }))
    }

    /// Fall checks requested, in order.
    pub fn fall_checks(&self) -> impl Iterator<Item = FallReason> + '_ {
        self.events.iter().filter_map(|e| match e {
            DamageEvent::FallCheckRequired { reason } => Some(*reason),
            _ => None,
        })
    }

    /// Locations destroyed (including blown off), in order.
    pub fn destroyed_locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.events.iter().filter_map(|e| match e {
            DamageEvent::LocationDestroyed { location } | DamageEvent::LocationBlownOff { location } => {
                Some(*location)
            }
            _ => None,
        })
    }

    /// Number of critical hits that damaged a component.
    #[must_use]
    pub fn critical_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DamageEvent::CriticalHit { .. } | DamageEvent::AeroCritical { .. }))
            .count()
    }

    /// Append another report.
    pub fn merge(&mut self, other: DamageReport) {
        self.applied += other.applied;
        self.events.extend(other.events);
    }
}
