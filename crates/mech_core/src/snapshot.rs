//! Persisted damage state.
//!
//! A [`ChassisSnapshot`] holds everything that changes after construction.
//! Restoring it onto a chassis built from the same data reproduces the
//! damaged unit exactly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chassis::{AeroState, RoundFlags, UnitChassis};
use crate::counters::DamageCounters;
use crate::crew::Crew;
use crate::error::{Result, RulesError};
use crate::location::Location;
use crate::structure::StructureValue;

/// Damage flags of one critical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct SlotSnapshot {
    /// Hit by a critical.
    pub hit: bool,
    /// Destroyed.
    pub destroyed: bool,
    /// Blown off.
    pub missing: bool,
    /// Repairable.
    pub repairable: bool,
    /// Armor still unspent.
    pub armored: bool,
}

/// Damage state of one location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Location.
    pub location: Location,
    /// Front armor.
    pub armor: StructureValue,
    /// Rear armor.
    pub rear_armor: StructureValue,
    /// Internal structure.
    pub internal: StructureValue,
    /// Slot flags in slot order.
    pub slots: Vec<SlotSnapshot>,
}

/// Damage flags of one mounted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct EquipmentSnapshot {
    /// Destroyed.
    pub destroyed: bool,
    /// Breached.
    pub breached: bool,
    /// Crippled (weapons).
    pub crippled: bool,
    /// Armed (boosters).
    pub armed: bool,
}

/// All mutable state of a chassis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChassisSnapshot {
    /// Unit name, for error messages.
    pub name: String,
    /// Locations in chassis order.
    pub locations: Vec<LocationSnapshot>,
    /// Equipment in mount order.
    pub equipment: Vec<EquipmentSnapshot>,
    /// System counters.
    pub counters: DamageCounters,
    /// Crew.
    pub crew: Crew,
    /// Aerospace state (SI, fuel).
    pub aero: Option<AeroState>,
    /// Current heat.
    pub heat: u32,
    /// Cargo carried.
    pub cargo_tons: u32,
    /// Coolant failures.
    pub coolant_failures: u32,
    /// Active sink override.
    pub active_sinks: Option<u32>,
    /// Water depth.
    pub submersion_depth: u32,
    /// LAM air mode.
    pub lam_airborne: bool,
    /// Shut down.
    pub shutdown: bool,
    /// Destroyed.
    pub destroyed: bool,
    /// Round bookkeeping.
    pub round: RoundFlags,
}

impl ChassisSnapshot {
    /// Encode with bincode.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidState`] if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| RulesError::InvalidState(format!("Failed to serialize snapshot: {e}")))
    }

    /// Decode from bincode.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidState`] if the bytes are not a snapshot.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data)
            .map_err(|e| RulesError::InvalidState(format!("Failed to deserialize snapshot: {e}")))
    }
}

impl UnitChassis {
    /// Capture the current damage state.
    #[must_use]
    pub fn snapshot(&self) -> ChassisSnapshot {
        ChassisSnapshot {
            name: self.name.clone(),
            locations: self
                .locations
                .iter()
                .map(|l| LocationSnapshot {
                    location: l.location,
                    armor: l.armor,
                    rear_armor: l.rear_armor,
                    internal: l.internal,
                    slots: l
                        .slots
                        .iter()
                        .map(|s| SlotSnapshot {
                            hit: s.hit,
                            destroyed: s.destroyed,
                            missing: s.missing,
                            repairable: s.repairable,
                            armored: s.armored,
                        })
                        .collect(),
                })
                .collect(),
            equipment: self
                .equipment
                .iter()
                .map(|e| EquipmentSnapshot {
                    destroyed: e.destroyed,
                    breached: e.breached,
                    crippled: e.crippled,
                    armed: e.armed,
                })
                .collect(),
            counters: self.counters,
            crew: self.crew.clone(),
            aero: self.aero,
            heat: self.heat,
            cargo_tons: self.cargo_tons,
            coolant_failures: self.coolant_failures,
            active_sinks: self.active_sinks,
            submersion_depth: self.submersion_depth,
            lam_airborne: self.lam_airborne,
            shutdown: self.shutdown,
            destroyed: self.destroyed,
            round: self.round,
        }
    }

    /// Restore a captured damage state.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidState`] if the snapshot was taken from a chassis
    /// with different locations, slots or equipment. The chassis is left
    /// unchanged in that case.
    pub fn restore(&mut self, snapshot: &ChassisSnapshot) -> Result<()> {
        self.check_shape(snapshot)?;

        for (state, saved) in self.locations.iter_mut().zip(&snapshot.locations) {
            state.armor = saved.armor;
            state.rear_armor = saved.rear_armor;
            state.internal = saved.internal;
            for (slot, flags) in state.slots.iter_mut().zip(&saved.slots) {
                slot.hit = flags.hit;
                slot.destroyed = flags.destroyed;
                slot.missing = flags.missing;
                slot.repairable = flags.repairable;
                slot.armored = flags.armored;
            }
        }
        for (item, saved) in self.equipment.iter_mut().zip(&snapshot.equipment) {
            item.destroyed = saved.destroyed;
            item.breached = saved.breached;
            item.crippled = saved.crippled;
            item.armed = saved.armed;
        }
        self.counters = snapshot.counters;
        self.crew = snapshot.crew.clone();
        self.aero = snapshot.aero;
        self.heat = snapshot.heat;
        self.cargo_tons = snapshot.cargo_tons;
        self.coolant_failures = snapshot.coolant_failures;
        self.active_sinks = snapshot.active_sinks;
        self.submersion_depth = snapshot.submersion_depth;
        self.lam_airborne = snapshot.lam_airborne;
        self.shutdown = snapshot.shutdown;
        self.destroyed = snapshot.destroyed;
        self.round = snapshot.round;
        self.refresh_capabilities();

        debug!("Restored {} from snapshot", self.name);
        Ok(())
    }

    fn check_shape(&self, snapshot: &ChassisSnapshot) -> Result<()> {
        let mismatch = |what: &str| {
            Err(RulesError::InvalidState(format!(
                "Snapshot of {} does not fit {}: {what} differ",
                snapshot.name, self.name
            )))
        };
        if self.locations.len() != snapshot.locations.len() {
            return mismatch("locations");
        }
        for (state, saved) in self.locations.iter().zip(&snapshot.locations) {
            if state.location != saved.location {
                return mismatch("locations");
            }
            if state.slots.len() != saved.slots.len() {
                return mismatch("slots");
            }
        }
        if self.equipment.len() != snapshot.equipment.len() {
            return mismatch("equipment lists");
        }
        if self.aero.is_some() != snapshot.aero.is_some() {
            return mismatch("aerospace blocks");
        }
        Ok(())
    }
}
