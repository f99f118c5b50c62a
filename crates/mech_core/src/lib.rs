//! # Mech Core
//!
//! Rules core for combat units in a turn-based tabletop wargame.
//!
//! Given a unit's configuration and the damage it has taken, this crate
//! answers four questions:
//! - where does an incoming attack land ([`resolver`], [`hit_table`])
//! - what does the damage break ([`damage`], [`critical`])
//! - how far can the unit move and how much heat can it shed
//!   ([`movement`], [`heat`])
//! - how badly hurt is it ([`severity`])
//!
//! The crate is pure and synchronous:
//! - No IO
//! - No system randomness (dice are injected through [`dice::Dice`])
//! - No floating-point math (uses fixed-point)
//!
//! ## Crate Structure
//!
//! - [`chassis`] - Unit state: locations, slots, equipment, counters, crew
//! - [`data`] - RON chassis definitions
//! - [`context`] - Game options and planetary conditions
//! - [`events`] - Damage events returned to the caller
//! - [`snapshot`] - Persisted damage state
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod archetype;
pub mod chassis;
pub mod context;
pub mod counters;
pub mod cover;
pub mod crew;
pub mod critical;
pub mod damage;
pub mod data;
pub mod dice;
pub mod equipment;
pub mod error;
pub mod events;
pub mod heat;
pub mod hit_table;
pub mod layout;
pub mod location;
pub mod math;
pub mod movement;
pub mod resolver;
pub mod severity;
pub mod slot;
pub mod snapshot;
pub mod structure;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::archetype::{Archetype, CockpitType, EngineType, GyroType, HullShape};
    pub use crate::chassis::{AeroState, LocationState, UnitChassis};
    pub use crate::context::{
        Atmosphere, GameOptions, MpSettings, PlanetaryConditions, RulesContext, Weather, Wind,
    };
    pub use crate::counters::{DamageCounters, SystemCounter};
    pub use crate::cover::Cover;
    pub use crate::damage::apply_damage;
    pub use crate::data::{AeroData, ChassisData, CrewData, EquipmentData, LocationData};
    pub use crate::dice::{Dice, ScriptedDice, SeededDice};
    pub use crate::equipment::{Capabilities, EquipmentId, EquipmentKind, MountedEquipment};
    pub use crate::error::{Result, RulesError};
    pub use crate::events::{DamageEvent, DamageReport, DestructionCause, FallReason};
    pub use crate::heat::compute_heat_capacity;
    pub use crate::hit_table::{AeroCrit, HitTable};
    pub use crate::location::{Location, Side, Transfer};
    pub use crate::math::Fixed;
    pub use crate::movement::{compute_mp, MpKind};
    pub use crate::resolver::{resolve, resolve_with_edge, AimedShot, AimingMode, HitData, HitEffect, HitRequest};
    pub use crate::severity::{
        damage_level, is_crippled, is_heavily_damaged, is_lightly_damaged, is_moderately_damaged,
        DamageLevel,
    };
    pub use crate::snapshot::ChassisSnapshot;
    pub use crate::structure::StructureValue;
}
