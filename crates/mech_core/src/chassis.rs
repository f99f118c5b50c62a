//! The unit chassis: locations, slots, equipment, counters and crew.
//!
//! A [`UnitChassis`] is built once from [`ChassisData`] and then accumulates
//! damage monotonically. Rules code elsewhere in the crate mutates it through
//! `&mut` borrows; queries take `&self`.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archetype::{
    mek_internal_structure, proto_internal_structure, Archetype, CockpitType, EngineType,
    GyroType, HullShape,
};
use crate::counters::{DamageCounters, SystemCounter};
use crate::crew::Crew;
use crate::data::ChassisData;
use crate::equipment::{Capabilities, EquipmentId, EquipmentKind, MountedEquipment};
use crate::error::{Result, RulesError};
use crate::layout::{standard_slots, LayoutOptions};
use crate::location::{Location, Transfer};
use crate::slot::{CriticalSlot, SlotContent, SystemKind};
use crate::structure::StructureValue;

/// Damage state of one location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationState {
    /// Which location this is.
    pub location: Location,
    /// Front armor.
    pub armor: StructureValue,
    /// Rear armor (`NotApplicable` where the location has none).
    pub rear_armor: StructureValue,
    /// Internal structure.
    pub internal: StructureValue,
    /// Front armor at construction.
    pub original_armor: u32,
    /// Rear armor at construction.
    pub original_rear_armor: u32,
    /// Internal structure at construction.
    pub original_internal: u32,
    /// Critical slots.
    pub slots: Vec<CriticalSlot>,
}

impl LocationState {
    fn new(location: Location, armor: StructureValue, rear: StructureValue, internal: StructureValue) -> Self {
        Self {
            location,
            armor,
            rear_armor: rear,
            internal,
            original_armor: armor.points(),
            original_rear_armor: rear.points(),
            original_internal: internal.points(),
            slots: Vec::new(),
        }
    }

    /// Number of empty slots.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    /// Hit (or destroyed) slots holding the given system.
    #[must_use]
    pub fn damaged_system_slots(&self, kind: SystemKind) -> usize {
        self.slots
            .iter()
            .filter(|s| s.system_kind() == Some(kind) && (s.hit || s.destroyed))
            .count()
    }
}

/// Aerospace-only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AeroState {
    /// Hull shape.
    pub hull: HullShape,
    /// Flying (not grounded).
    pub airborne: bool,
    /// Remaining structural integrity.
    pub structural_integrity: u32,
    /// Structural integrity at construction.
    pub original_structural_integrity: u32,
    /// Remaining fuel points.
    pub fuel: u32,
    /// Fuel at construction.
    pub original_fuel: u32,
}

/// Per-round and per-phase bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RoundFlags {
    /// Took any damage this round.
    pub took_damage: bool,
    /// Failed a control roll or maneuver this round.
    pub failed_maneuver: bool,
    /// Damage taken this phase.
    pub damage_this_phase: u32,
    /// Heavy-damage fall check already requested this phase.
    pub heavy_damage_checked: bool,
}

/// A combat unit's rules state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitChassis {
    pub(crate) name: String,
    pub(crate) archetype: Archetype,
    pub(crate) tonnage: u32,
    pub(crate) military: bool,
    pub(crate) engine: EngineType,
    pub(crate) gyro: GyroType,
    pub(crate) cockpit: CockpitType,
    pub(crate) locations: Vec<LocationState>,
    pub(crate) equipment: Vec<MountedEquipment>,
    pub(crate) counters: DamageCounters,
    pub(crate) crew: Crew,
    pub(crate) capabilities: Capabilities,
    pub(crate) walk_mp: u32,
    pub(crate) jump_mp: u32,
    pub(crate) heat: u32,
    pub(crate) cargo_tons: u32,
    pub(crate) coolant_failures: u32,
    pub(crate) active_sinks: Option<u32>,
    pub(crate) submersion_depth: u32,
    pub(crate) aero: Option<AeroState>,
    pub(crate) has_main_gun: bool,
    pub(crate) lam_airborne: bool,
    pub(crate) shutdown: bool,
    pub(crate) destroyed: bool,
    pub(crate) round: RoundFlags,
}

impl UnitChassis {
    /// Build a chassis from its data definition.
    ///
    /// Standard systems are laid out first; equipment is then mounted into
    /// the remaining slots in listed order.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::CapacityExceeded`] when equipment does not fit,
    /// [`RulesError::LocationNotOnChassis`] for locations the archetype does
    /// not have, and [`RulesError::InvalidConfiguration`] for inconsistent
    /// data.
    pub fn from_data(data: &ChassisData) -> Result<Self> {
        let archetype = data.archetype;
        if data.tonnage == 0 {
            return Err(RulesError::InvalidConfiguration(format!(
                "{}: tonnage must be positive",
                data.name
            )));
        }
        if archetype.is_aero() != data.aero.is_some() {
            return Err(RulesError::InvalidConfiguration(format!(
                "{}: aero block must be present exactly for aerospace archetypes",
                data.name
            )));
        }

        let layout = LayoutOptions {
            engine: data.engine,
            gyro: data.gyro,
            cockpit: data.cockpit,
        };
        let has_main_gun = archetype.is_proto() && data.main_gun;

        let mut locations = Vec::with_capacity(archetype.locations().len());
        for &location in archetype.locations() {
            let defaults = default_values(archetype, data.tonnage, location, has_main_gun);
            let (armor, rear, internal) = match data.locations.iter().find(|l| l.location == location) {
                Some(entry) => override_values(archetype, defaults, entry.armor, entry.rear_armor, entry.internal),
                None => defaults,
            };
            let mut state = LocationState::new(location, armor, rear, internal);
            state.slots = standard_slots(archetype, location, layout)?;
            locations.push(state);
        }
        for entry in &data.locations {
            if !archetype.has_location(entry.location) {
                return Err(RulesError::LocationNotOnChassis(entry.location));
            }
        }

        let aero = data.aero.as_ref().map(|a| {
            let si = a
                .structural_integrity
                .unwrap_or_else(|| data.walk_mp.max(data.tonnage.div_ceil(10)));
            AeroState {
                hull: a.hull,
                airborne: a.airborne,
                structural_integrity: si,
                original_structural_integrity: si,
                fuel: a.fuel,
                original_fuel: a.fuel,
            }
        });

        let mut chassis = Self {
            name: data.name.clone(),
            archetype,
            tonnage: data.tonnage,
            military: data.military,
            engine: data.engine,
            gyro: data.gyro,
            cockpit: data.cockpit,
            locations,
            equipment: Vec::with_capacity(data.equipment.len()),
            counters: DamageCounters::with_caps(archetype.counter_caps(data.gyro)),
            crew: Crew {
                edge: data.crew.edge,
                edge_triggers: data.crew.edge_triggers,
                ..Crew::default()
            },
            capabilities: Capabilities::empty(),
            walk_mp: data.walk_mp,
            jump_mp: data.jump_mp,
            heat: 0,
            cargo_tons: 0,
            coolant_failures: 0,
            active_sinks: None,
            submersion_depth: 0,
            aero,
            has_main_gun,
            lam_airborne: false,
            shutdown: false,
            destroyed: false,
            round: RoundFlags::default(),
        };

        for item in &data.equipment {
            let id = chassis.mount_equipment(&item.name, item.kind, item.location, item.slots, item.rear_mounted)?;
            if item.armored {
                for slot in chassis.slots_of_mut(id) {
                    slot.armored = true;
                }
            }
            if !item.armed {
                chassis.set_equipment_armed(id, false)?;
            }
        }

        debug!(
            "Built {} ({}, {}t, {} items)",
            chassis.name,
            archetype.display_name(),
            chassis.tonnage,
            chassis.equipment.len()
        );
        Ok(chassis)
    }

    // ========================================
    // Identity
    // ========================================

    /// Unit name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archetype.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Weight in tons.
    #[must_use]
    pub const fn tonnage(&self) -> u32 {
        self.tonnage
    }

    /// Is this a military unit (weapon damage counts toward severity)?
    #[must_use]
    pub const fn is_military(&self) -> bool {
        self.military
    }

    /// Engine type.
    #[must_use]
    pub const fn engine_type(&self) -> EngineType {
        self.engine
    }

    /// Gyro type.
    #[must_use]
    pub const fn gyro_type(&self) -> GyroType {
        self.gyro
    }

    /// Cockpit type.
    #[must_use]
    pub const fn cockpit_type(&self) -> CockpitType {
        self.cockpit
    }

    /// Does this ProtoMek mount a main gun?
    #[must_use]
    pub const fn has_main_gun(&self) -> bool {
        self.has_main_gun
    }

    // ========================================
    // Locations
    // ========================================

    /// All locations in ordinal order.
    #[must_use]
    pub fn locations(&self) -> &[LocationState] {
        &self.locations
    }

    /// State of one location.
    #[must_use]
    pub fn location(&self, location: Location) -> Option<&LocationState> {
        self.archetype
            .location_index(location)
            .map(|i| &self.locations[i])
    }

    pub(crate) fn location_mut(&mut self, location: Location) -> Option<&mut LocationState> {
        self.archetype
            .location_index(location)
            .map(|i| &mut self.locations[i])
    }

    /// Current armor points (0 for destroyed or missing locations).
    #[must_use]
    pub fn armor(&self, location: Location, rear: bool) -> u32 {
        self.armor_value(location, rear).points()
    }

    /// Armor as a structure value.
    #[must_use]
    pub fn armor_value(&self, location: Location, rear: bool) -> StructureValue {
        self.location(location).map_or(StructureValue::NotApplicable, |l| {
            if rear {
                l.rear_armor
            } else {
                l.armor
            }
        })
    }

    /// Armor points at construction.
    #[must_use]
    pub fn original_armor(&self, location: Location, rear: bool) -> u32 {
        self.location(location).map_or(0, |l| {
            if rear {
                l.original_rear_armor
            } else {
                l.original_armor
            }
        })
    }

    /// Current internal structure points.
    #[must_use]
    pub fn internal(&self, location: Location) -> u32 {
        self.internal_value(location).points()
    }

    /// Internal structure as a structure value.
    #[must_use]
    pub fn internal_value(&self, location: Location) -> StructureValue {
        self.location(location)
            .map_or(StructureValue::NotApplicable, |l| l.internal)
    }

    /// Internal structure at construction.
    #[must_use]
    pub fn original_internal(&self, location: Location) -> u32 {
        self.location(location).map_or(0, |l| l.original_internal)
    }

    /// Does the location carry rear armor?
    #[must_use]
    pub fn has_rear_armor(&self, location: Location) -> bool {
        self.armor_value(location, true).is_applicable()
    }

    /// Is the location destroyed, doomed, blown off or absent?
    #[must_use]
    pub fn is_location_bad(&self, location: Location) -> bool {
        match self.location(location) {
            None => true,
            Some(state) => {
                state.internal.is_gone()
                    || (!self.archetype.is_aero() && !state.internal.is_applicable())
            }
        }
    }

    /// Where damage beyond this location goes.
    #[must_use]
    pub fn transfer_location(&self, location: Location) -> Transfer {
        match self.archetype {
            Archetype::Biped | Archetype::Quad => match location {
                Location::Head => {
                    if self.cockpit == CockpitType::TorsoMounted {
                        Transfer::NoTransfer
                    } else {
                        Transfer::Destroyed
                    }
                }
                Location::CenterTorso => Transfer::Destroyed,
                Location::LeftTorso | Location::RightTorso => Transfer::To(Location::CenterTorso),
                l if l.is_left() => Transfer::To(Location::LeftTorso),
                l if l.is_right() => Transfer::To(Location::RightTorso),
                _ => Transfer::Destroyed,
            },
            Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => Transfer::Destroyed,
            Archetype::ProtoMek => match location {
                Location::Torso => Transfer::Destroyed,
                _ => Transfer::To(Location::Torso),
            },
        }
    }

    /// Location destroyed together with this one.
    #[must_use]
    pub fn dependent_location(&self, location: Location) -> Option<Location> {
        match (self.archetype, location) {
            (Archetype::Biped, Location::LeftTorso) => Some(Location::LeftArm),
            (Archetype::Biped, Location::RightTorso) => Some(Location::RightArm),
            _ => None,
        }
    }

    // ========================================
    // Equipment
    // ========================================

    /// Mount equipment into free slots of a location.
    ///
    /// # Errors
    ///
    /// [`RulesError::LocationNotOnChassis`] or
    /// [`RulesError::CapacityExceeded`] when the slots are not free.
    pub fn mount_equipment(
        &mut self,
        name: &str,
        kind: EquipmentKind,
        location: Location,
        slots: usize,
        rear_mounted: bool,
    ) -> Result<EquipmentId> {
        let id = EquipmentId::new(self.equipment.len() as u32);
        let slotless = self.archetype.is_proto();
        let state = self
            .location_mut(location)
            .ok_or(RulesError::LocationNotOnChassis(location))?;
        // ProtoMek slots are all system slots; equipment rides alongside them.
        if !slotless {
            let available = state.free_slots();
            if available < slots {
                return Err(RulesError::CapacityExceeded {
                    location,
                    required: slots,
                    available,
                });
            }
            for slot in state.slots.iter_mut().filter(|s| s.is_empty()).take(slots) {
                *slot = CriticalSlot::new(SlotContent::Equipment(id));
            }
        }
        self.equipment.push(MountedEquipment {
            id,
            name: name.to_string(),
            kind,
            location,
            slots,
            destroyed: false,
            breached: false,
            crippled: false,
            rear_mounted,
            armed: true,
        });
        self.refresh_capabilities();
        Ok(id)
    }

    /// All mounted equipment.
    #[must_use]
    pub fn equipment(&self) -> &[MountedEquipment] {
        &self.equipment
    }

    /// One piece of equipment.
    pub fn equipment_by_id(&self, id: EquipmentId) -> Result<&MountedEquipment> {
        self.equipment
            .get(id.index())
            .ok_or(RulesError::EquipmentNotFound(id.as_u32()))
    }

    fn equipment_mut(&mut self, id: EquipmentId) -> Result<&mut MountedEquipment> {
        self.equipment
            .get_mut(id.index())
            .ok_or(RulesError::EquipmentNotFound(id.as_u32()))
    }

    fn slots_of_mut(&mut self, id: EquipmentId) -> impl Iterator<Item = &mut CriticalSlot> + '_ {
        self.locations
            .iter_mut()
            .flat_map(|l| l.slots.iter_mut())
            .filter(move |s| s.equipment() == Some(id))
    }

    /// Destroy a piece of equipment and every slot it occupies.
    pub fn destroy_equipment(&mut self, id: EquipmentId) -> Result<()> {
        self.equipment_mut(id)?.destroyed = true;
        for slot in self.slots_of_mut(id) {
            slot.destroy();
        }
        self.refresh_capabilities();
        Ok(())
    }

    /// Mark a weapon crippled (or working again).
    pub fn set_weapon_crippled(&mut self, id: EquipmentId, crippled: bool) -> Result<()> {
        let item = self.equipment_mut(id)?;
        if !item.is_weapon() {
            return Err(RulesError::InvalidConfiguration(format!(
                "{} is not a weapon",
                item.name
            )));
        }
        item.crippled = crippled;
        Ok(())
    }

    /// Arm or disarm a booster.
    pub fn set_equipment_armed(&mut self, id: EquipmentId, armed: bool) -> Result<()> {
        self.equipment_mut(id)?.armed = armed;
        self.refresh_capabilities();
        Ok(())
    }

    /// Mark equipment breached (a flooded location).
    pub fn set_equipment_breached(&mut self, id: EquipmentId) -> Result<()> {
        self.equipment_mut(id)?.breached = true;
        self.refresh_capabilities();
        Ok(())
    }

    /// Cached capability flags.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn refresh_capabilities(&mut self) {
        self.capabilities = Capabilities::from_equipment(&self.equipment);
    }

    /// Working jump jets.
    #[must_use]
    pub fn working_jump_jets(&self) -> u32 {
        self.equipment
            .iter()
            .filter(|e| e.kind == EquipmentKind::JumpJet && e.is_working())
            .count() as u32
    }

    /// Does the chassis mount any jump jets?
    #[must_use]
    pub fn has_jump_jets(&self) -> bool {
        self.equipment.iter().any(|e| e.kind == EquipmentKind::JumpJet)
    }

    // ========================================
    // Systems and crew
    // ========================================

    /// System damage counters.
    #[must_use]
    pub const fn counters(&self) -> &DamageCounters {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut DamageCounters {
        &mut self.counters
    }

    /// Crew state.
    #[must_use]
    pub const fn crew(&self) -> &Crew {
        &self.crew
    }

    /// Mutable crew state.
    pub fn crew_mut(&mut self) -> &mut Crew {
        &mut self.crew
    }

    /// Re-derive slot-backed counters from slot flags (Mek only).
    pub(crate) fn recount_slot_systems(&mut self) {
        if !self.archetype.is_mek() {
            return;
        }
        for kind in [
            SystemKind::Engine,
            SystemKind::Gyro,
            SystemKind::Sensors,
            SystemKind::LifeSupport,
            SystemKind::Cockpit,
        ] {
            let damaged: usize = self
                .locations
                .iter()
                .map(|l| l.damaged_system_slots(kind))
                .sum();
            if let Some(counter) = kind.counter() {
                let current = self.counters.get(counter);
                self.counters
                    .set(counter, current.max(u8::try_from(damaged).unwrap_or(u8::MAX)));
            }
        }
    }

    /// Hit slots of a given system in one location.
    #[must_use]
    pub fn hits_to_system(&self, kind: SystemKind, location: Location) -> usize {
        self.location(location)
            .map_or(0, |l| l.damaged_system_slots(kind))
    }

    /// Is the engine destroyed?
    #[must_use]
    pub fn is_engine_destroyed(&self) -> bool {
        self.counters.is_maxed(SystemCounter::Engine)
    }

    /// Is the unit immobile (a valid target for aimed shots)?
    #[must_use]
    pub fn is_immobile(&self) -> bool {
        self.shutdown
            || self.destroyed
            || !self.crew.is_active()
            || (self.archetype.is_mek() && self.is_engine_destroyed())
    }

    /// Is the unit destroyed?
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    /// Is the unit shut down?
    #[must_use]
    pub const fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Shut the unit down or start it up.
    pub fn set_shutdown(&mut self, shutdown: bool) {
        self.shutdown = shutdown;
    }

    // ========================================
    // Movement and heat inputs
    // ========================================

    /// Walk MP (safe thrust for aero) at construction.
    #[must_use]
    pub const fn original_walk_mp(&self) -> u32 {
        self.walk_mp
    }

    /// Jump MP at construction.
    #[must_use]
    pub const fn original_jump_mp(&self) -> u32 {
        self.jump_mp
    }

    /// Current heat level.
    #[must_use]
    pub const fn heat(&self) -> u32 {
        self.heat
    }

    /// Set the heat level.
    pub fn set_heat(&mut self, heat: u32) {
        self.heat = heat;
    }

    /// Cargo carried, in tons.
    #[must_use]
    pub const fn cargo_tons(&self) -> u32 {
        self.cargo_tons
    }

    /// Set carried cargo.
    pub fn set_cargo_tons(&mut self, tons: u32) {
        self.cargo_tons = tons;
    }

    /// Coolant system failures.
    #[must_use]
    pub const fn coolant_failures(&self) -> u32 {
        self.coolant_failures
    }

    /// Record one coolant system failure.
    pub fn add_coolant_failure(&mut self) {
        self.coolant_failures += 1;
    }

    /// Active heat sink override (`None` means every sink is on).
    #[must_use]
    pub const fn active_sinks(&self) -> Option<u32> {
        self.active_sinks
    }

    /// Limit how many heat sinks are switched on.
    pub fn set_active_sinks(&mut self, active: Option<u32>) {
        self.active_sinks = active;
    }

    /// Water depth the unit stands in.
    #[must_use]
    pub const fn submersion_depth(&self) -> u32 {
        self.submersion_depth
    }

    /// Set the water depth the unit stands in.
    pub fn set_submersion(&mut self, depth: u32) {
        self.submersion_depth = depth;
    }

    /// Is the location under water?
    #[must_use]
    pub fn is_submerged(&self, location: Location) -> bool {
        match self.submersion_depth {
            0 => false,
            1 => self.archetype.is_leg(location),
            _ => true,
        }
    }

    /// Aerospace state, if this is an aero unit.
    #[must_use]
    pub const fn aero(&self) -> Option<&AeroState> {
        self.aero.as_ref()
    }

    pub(crate) fn aero_mut(&mut self) -> Option<&mut AeroState> {
        self.aero.as_mut()
    }

    /// Is the unit flying? Aero units report their own flag, Meks their
    /// LAM conversion.
    #[must_use]
    pub fn is_airborne(&self) -> bool {
        self.aero.map_or(self.lam_airborne, |a| a.airborne)
    }

    /// Take off or land. For Meks this is the LAM airborne conversion.
    pub fn set_airborne(&mut self, airborne: bool) {
        match self.aero.as_mut() {
            Some(aero) => aero.airborne = airborne,
            None => self.lam_airborne = airborne,
        }
    }

    /// Is this a LAM converted to an airborne mode?
    #[must_use]
    pub const fn is_lam_airborne(&self) -> bool {
        self.lam_airborne
    }

    // ========================================
    // Round lifecycle
    // ========================================

    /// Round bookkeeping.
    #[must_use]
    pub const fn round_flags(&self) -> &RoundFlags {
        &self.round
    }

    pub(crate) fn round_flags_mut(&mut self) -> &mut RoundFlags {
        &mut self.round
    }

    /// Record a failed maneuver this round.
    pub fn record_failed_maneuver(&mut self) {
        self.round.failed_maneuver = true;
    }

    /// Finalize the phase: doomed locations become destroyed.
    pub fn end_phase(&mut self) {
        for state in &mut self.locations {
            state.armor.end_phase();
            state.rear_armor.end_phase();
            state.internal.end_phase();
        }
        self.round.damage_this_phase = 0;
        self.round.heavy_damage_checked = false;
    }

    /// Start a new round.
    pub fn new_round(&mut self) {
        self.end_phase();
        self.round = RoundFlags::default();
    }

    /// Hash of the full damage state.
    ///
    /// Two chassis with identical state produce identical hashes, which is
    /// what the determinism harness compares.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.name.hash(&mut hasher);
        self.archetype.hash(&mut hasher);
        self.tonnage.hash(&mut hasher);

        for state in &self.locations {
            state.hash(&mut hasher);
        }
        for item in &self.equipment {
            item.id.hash(&mut hasher);
            item.destroyed.hash(&mut hasher);
            item.breached.hash(&mut hasher);
            item.crippled.hash(&mut hasher);
            item.armed.hash(&mut hasher);
        }

        self.counters.hash(&mut hasher);
        self.crew.hash(&mut hasher);
        self.capabilities.hash(&mut hasher);
        self.heat.hash(&mut hasher);
        self.cargo_tons.hash(&mut hasher);
        self.coolant_failures.hash(&mut hasher);
        self.active_sinks.hash(&mut hasher);
        self.submersion_depth.hash(&mut hasher);
        self.aero.hash(&mut hasher);
        self.lam_airborne.hash(&mut hasher);
        self.shutdown.hash(&mut hasher);
        self.destroyed.hash(&mut hasher);
        self.round.hash(&mut hasher);

        hasher.finish()
    }
}

type LocationValues = (StructureValue, StructureValue, StructureValue);

fn default_values(archetype: Archetype, tonnage: u32, location: Location, has_main_gun: bool) -> LocationValues {
    use StructureValue::{NotApplicable, Points};
    let rear = if archetype.has_rear_armor(location) {
        Points(0)
    } else {
        NotApplicable
    };
    match archetype {
        Archetype::Biped | Archetype::Quad => {
            let (center, side, arm, leg) = mek_internal_structure(tonnage);
            let internal = match location {
                Location::Head => 3,
                Location::CenterTorso => center,
                Location::LeftTorso | Location::RightTorso => side,
                Location::LeftArm | Location::RightArm => arm,
                _ => leg,
            };
            (Points(0), rear, Points(internal))
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => match location {
            Location::Fuselage => (NotApplicable, NotApplicable, NotApplicable),
            _ => (Points(0), NotApplicable, NotApplicable),
        },
        Archetype::ProtoMek => {
            let (head, torso, arm, legs) = proto_internal_structure(tonnage);
            let internal = match location {
                Location::Head => head,
                Location::Torso => torso,
                Location::LeftArm | Location::RightArm => arm,
                Location::Legs => legs,
                _ if has_main_gun => 1,
                _ => return (NotApplicable, NotApplicable, NotApplicable),
            };
            (Points(0), NotApplicable, Points(internal))
        }
    }
}

fn override_values(
    archetype: Archetype,
    defaults: LocationValues,
    armor: u32,
    rear_armor: u32,
    internal: Option<u32>,
) -> LocationValues {
    let (default_armor, default_rear, default_internal) = defaults;
    let armor = if default_armor.is_applicable() {
        StructureValue::Points(armor)
    } else {
        default_armor
    };
    let rear = if default_rear.is_applicable() {
        StructureValue::Points(rear_armor)
    } else {
        default_rear
    };
    let internal = match internal {
        Some(points) if !archetype.is_aero() && default_internal.is_applicable() => {
            StructureValue::Points(points)
        }
        _ => default_internal,
    };
    (armor, rear, internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AeroData, EquipmentData, LocationData};

    fn biped() -> UnitChassis {
        let mut data = ChassisData::new("Test Biped", Archetype::Biped, 50);
        data.walk_mp = 5;
        data.locations = vec![LocationData::new(Location::CenterTorso, 20).with_rear(6)];
        data.equipment = vec![EquipmentData::new("Medium Laser", EquipmentKind::Weapon, Location::RightArm, 1)];
        UnitChassis::from_data(&data).unwrap()
    }

    #[test]
    fn test_from_data_defaults() {
        let chassis = biped();
        assert_eq!(chassis.internal(Location::CenterTorso), 16);
        assert_eq!(chassis.internal(Location::Head), 3);
        assert_eq!(chassis.armor(Location::CenterTorso, false), 20);
        assert_eq!(chassis.armor(Location::CenterTorso, true), 6);
        assert_eq!(chassis.armor(Location::LeftArm, false), 0);
        assert!(chassis.has_rear_armor(Location::LeftTorso));
        assert!(!chassis.has_rear_armor(Location::LeftArm));
        assert_eq!(chassis.counters().cap(SystemCounter::Engine), 3);
    }

    #[test]
    fn test_mount_marks_slots() {
        let chassis = biped();
        let arm = chassis.location(Location::RightArm).unwrap();
        assert_eq!(arm.slots[4].equipment(), Some(EquipmentId::new(0)));
        assert_eq!(arm.free_slots(), 7);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut chassis = biped();
        let result = chassis.mount_equipment("Big Gun", EquipmentKind::Weapon, Location::Head, 2, false);
        assert!(matches!(
            result,
            Err(RulesError::CapacityExceeded {
                location: Location::Head,
                required: 2,
                available: 1
            })
        ));
    }

    #[test]
    fn test_proto_equipment_is_slotless() {
        let data = ChassisData::new("Proto", Archetype::ProtoMek, 5);
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        chassis
            .mount_equipment("ER Medium Laser", EquipmentKind::Weapon, Location::RightArm, 1, false)
            .unwrap();
        let arm = chassis.location(Location::RightArm).unwrap();
        assert!(arm.slots.iter().all(|s| s.system_kind() == Some(SystemKind::ProtoSystem)));
        assert_eq!(chassis.equipment().len(), 1);
    }

    #[test]
    fn test_transfer_chains_biped() {
        let chassis = biped();
        assert_eq!(chassis.transfer_location(Location::LeftArm), Transfer::To(Location::LeftTorso));
        assert_eq!(chassis.transfer_location(Location::RightLeg), Transfer::To(Location::RightTorso));
        assert_eq!(chassis.transfer_location(Location::LeftTorso), Transfer::To(Location::CenterTorso));
        assert_eq!(chassis.transfer_location(Location::CenterTorso), Transfer::Destroyed);
        assert_eq!(chassis.transfer_location(Location::Head), Transfer::Destroyed);
        assert_eq!(chassis.dependent_location(Location::RightTorso), Some(Location::RightArm));
    }

    #[test]
    fn test_torso_mounted_cockpit_head_does_not_transfer() {
        let mut data = ChassisData::new("TM", Archetype::Biped, 50);
        data.cockpit = CockpitType::TorsoMounted;
        let chassis = UnitChassis::from_data(&data).unwrap();
        assert_eq!(chassis.transfer_location(Location::Head), Transfer::NoTransfer);
    }

    #[test]
    fn test_aero_requires_aero_block() {
        let data = ChassisData::new("Bad Fighter", Archetype::Fighter, 50);
        assert!(matches!(
            UnitChassis::from_data(&data),
            Err(RulesError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_aero_fuselage_not_applicable() {
        let mut data = ChassisData::new("Fighter", Archetype::Fighter, 50);
        data.walk_mp = 6;
        data.aero = Some(AeroData::default());
        let chassis = UnitChassis::from_data(&data).unwrap();
        assert_eq!(chassis.armor_value(Location::Fuselage, false), StructureValue::NotApplicable);
        assert_eq!(chassis.internal_value(Location::Fuselage), StructureValue::NotApplicable);
        assert_eq!(chassis.aero().unwrap().structural_integrity, 6);
        assert!(!chassis.is_location_bad(Location::Nose));
    }

    #[test]
    fn test_location_not_on_chassis() {
        let mut data = ChassisData::new("Bad", Archetype::Biped, 50);
        data.locations = vec![LocationData::new(Location::Nose, 10)];
        assert!(matches!(
            UnitChassis::from_data(&data),
            Err(RulesError::LocationNotOnChassis(Location::Nose))
        ));
    }

    #[test]
    fn test_destroy_equipment_refreshes_capabilities() {
        let mut data = ChassisData::new("Masc", Archetype::Biped, 50);
        data.equipment = vec![EquipmentData::new("MASC", EquipmentKind::Masc, Location::LeftTorso, 2)];
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        assert!(chassis.capabilities().contains(Capabilities::HAS_MASC));
        chassis.destroy_equipment(EquipmentId::new(0)).unwrap();
        assert!(!chassis.capabilities().contains(Capabilities::HAS_MASC));
        let torso = chassis.location(Location::LeftTorso).unwrap();
        assert!(torso.slots[0].destroyed && torso.slots[1].destroyed);
        assert!(chassis.destroy_equipment(EquipmentId::new(7)).is_err());
    }

    #[test]
    fn test_end_phase_finalizes_doomed() {
        let mut chassis = biped();
        chassis.location_mut(Location::LeftArm).unwrap().internal.doom();
        assert!(chassis.is_location_bad(Location::LeftArm));
        chassis.end_phase();
        assert_eq!(chassis.internal_value(Location::LeftArm), StructureValue::Destroyed);
    }

    #[test]
    fn test_state_hash_tracks_damage() {
        let a = biped();
        let mut b = biped();
        assert_eq!(a.state_hash(), b.state_hash());
        b.set_heat(4);
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn test_state_hash_tracks_movement_and_heat_state() {
        let base = biped().state_hash();
        let changes: [fn(&mut UnitChassis); 6] = [
            |c| c.set_cargo_tons(5),
            |c| c.add_coolant_failure(),
            |c| c.set_active_sinks(Some(3)),
            |c| c.set_submersion(1),
            |c| c.set_airborne(true),
            |c| c.set_shutdown(true),
        ];
        for (i, change) in changes.iter().enumerate() {
            let mut chassis = biped();
            change(&mut chassis);
            assert_ne!(chassis.state_hash(), base, "change {i} not hashed");
        }
    }

    #[test]
    fn test_submersion() {
        let mut chassis = biped();
        chassis.set_submersion(1);
        assert!(chassis.is_submerged(Location::LeftLeg));
        assert!(!chassis.is_submerged(Location::CenterTorso));
        chassis.set_submersion(2);
        assert!(chassis.is_submerged(Location::Head));
    }
}
