//! Movement points.
//!
//! MP is derived on demand from the original walk and jump values, the
//! damage the unit carries and the battlefield. Steps run in a fixed order:
//! damage, weather, load, equipment taxes, the run formula, environment
//! bonuses, grounded halving and finally gravity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archetype::{Archetype, HullShape};
use crate::chassis::UnitChassis;
use crate::context::{MpSettings, RulesContext};
use crate::counters::SystemCounter;
use crate::equipment::Capabilities;
use crate::location::Location;
use crate::math::{div_round_half_down, mul_ceil, Fixed};
use crate::slot::{Actuator, SystemKind};

/// Heat points per MP of heat penalty.
pub const HEAT_PER_MP: u32 = 5;

/// Heat at which triple-strength myomer kicks in.
pub const TSM_ACTIVE_HEAT: u32 = 9;

/// Kind of movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MpKind {
    /// Walking (safe thrust for aerospace units).
    Walk,
    /// Running (max thrust).
    Run,
    /// Sprinting; falls back to running without the sprint option.
    Sprint,
    /// Jumping.
    Jump,
}

impl MpKind {
    /// All kinds.
    pub const ALL: [Self; 4] = [Self::Walk, Self::Run, Self::Sprint, Self::Jump];
}

fn run_factor() -> Fixed {
    Fixed::from_num(3) / Fixed::from_num(2)
}

fn boosted_factor() -> Fixed {
    Fixed::from_num(5) / Fixed::from_num(2)
}

/// Movement points of one kind.
#[must_use]
pub fn compute_mp(chassis: &UnitChassis, kind: MpKind, ctx: &RulesContext, settings: &MpSettings) -> u32 {
    if chassis.is_destroyed() || chassis.is_shutdown() {
        return 0;
    }
    let archetype = chassis.archetype();
    let mp = match kind {
        MpKind::Jump => jump_mp(chassis, ctx, settings),
        _ if archetype.is_aero() => aero_mp(chassis, kind, settings),
        _ => ground_mp(chassis, kind, ctx, settings),
    };
    let mp = apply_gravity(archetype, mp, ctx, settings);
    debug!("{} {:?} MP: {}", chassis.name(), kind, mp);
    mp
}

/// Walk MP after damage, weather, load and taxes.
fn ground_walk(chassis: &UnitChassis, ctx: &RulesContext, settings: &MpSettings) -> u32 {
    let archetype = chassis.archetype();
    let caps = chassis.capabilities();
    let mut mp = match archetype {
        Archetype::Biped | Archetype::Quad => mek_damaged_walk(chassis, settings),
        _ => proto_damaged_walk(chassis),
    };

    if !settings.ignore_weather {
        mp = mp.saturating_add_signed(ctx.conditions.movement_modifier());
    }
    if archetype.is_mek() && !settings.ignore_cargo {
        mp = mp.saturating_sub(cargo_penalty(chassis));
    }
    if caps.contains(Capabilities::HAS_MODULAR_ARMOR) && !settings.ignore_modular_armor {
        mp = mp.saturating_sub(1);
    }
    mp
}

fn ground_mp(chassis: &UnitChassis, kind: MpKind, ctx: &RulesContext, settings: &MpSettings) -> u32 {
    let walk = ground_walk(chassis, ctx, settings);
    let caps = if settings.ignore_boosters {
        chassis.capabilities().without_boosters()
    } else {
        chassis.capabilities()
    };
    let masc = caps.contains(Capabilities::HAS_MASC);
    let supercharger = caps.contains(Capabilities::HAS_SUPERCHARGER);
    let myomer = caps.contains(Capabilities::HAS_MYOMER_BOOSTER);

    let sprint = kind == MpKind::Sprint && ctx.options.tacops_sprint && !has_leg_damage(chassis);
    let mp = match kind {
        MpKind::Walk | MpKind::Jump => return walk,
        _ if sprint => {
            if masc && supercharger {
                walk * 3
            } else if masc || supercharger {
                mul_ceil(walk, boosted_factor())
            } else {
                walk * 2
            }
        }
        _ => {
            if masc && supercharger {
                mul_ceil(walk, boosted_factor())
            } else if masc || supercharger || myomer {
                walk * 2
            } else {
                mul_ceil(walk, run_factor())
            }
        }
    };

    if caps.contains(Capabilities::HAS_HARDENED_ARMOR) && !settings.ignore_modular_armor {
        mp.saturating_sub(1)
    } else {
        mp
    }
}

fn leg_locations(chassis: &UnitChassis) -> impl Iterator<Item = Location> + '_ {
    let archetype = chassis.archetype();
    archetype
        .locations()
        .iter()
        .copied()
        .filter(move |&l| archetype.is_leg(l))
}

fn destroyed_legs(chassis: &UnitChassis) -> usize {
    leg_locations(chassis)
        .filter(|&l| chassis.is_location_bad(l))
        .count()
}

fn actuator_hits(chassis: &UnitChassis, lower: bool) -> usize {
    leg_locations(chassis)
        .filter(|&l| !chassis.is_location_bad(l))
        .map(|l| {
            chassis
                .location(l)
                .map_or(0, |state| {
                    state
                        .slots
                        .iter()
                        .filter(|s| !s.is_working())
                        .filter_map(|s| match s.system_kind() {
                            Some(SystemKind::Actuator(a)) => Some(a),
                            _ => None,
                        })
                        .filter(|a| {
                            if lower {
                                a.is_lower_leg_actuator()
                            } else {
                                *a == Actuator::Hip
                            }
                        })
                        .count()
                })
        })
        .sum()
}

/// Is a hip hit or a leg gone? Sprinting is then impossible.
fn has_leg_damage(chassis: &UnitChassis) -> bool {
    destroyed_legs(chassis) > 0 || actuator_hits(chassis, false) > 0
}

fn mek_damaged_walk(chassis: &UnitChassis, settings: &MpSettings) -> u32 {
    if chassis.is_engine_destroyed() {
        return 0;
    }
    let mut mp = chassis.original_walk_mp();
    let legs_lost = destroyed_legs(chassis);
    let hips = actuator_hits(chassis, false);
    let actuators = u32::try_from(actuator_hits(chassis, true)).unwrap_or(u32::MAX);

    if chassis.archetype() == Archetype::Biped {
        match legs_lost {
            0 => {}
            1 => return 1,
            _ => return 0,
        }
        mp = match hips {
            0 => mp,
            1 => mp.div_ceil(2),
            _ => 0,
        };
        mp = mp.saturating_sub(actuators);
    } else {
        match legs_lost {
            0 => {}
            1 => mp = mp.saturating_sub(1),
            2 => return 1,
            _ => return 0,
        }
        for _ in 0..hips {
            mp = mp.div_ceil(2);
        }
        mp = mp.saturating_sub(actuators);
    }

    if !settings.ignore_heat {
        mp = mp.saturating_sub(chassis.heat() / HEAT_PER_MP);
        if chassis.capabilities().contains(Capabilities::HAS_TSM) && chassis.heat() >= TSM_ACTIVE_HEAT {
            mp += 2;
        }
    }
    mp
}

fn proto_damaged_walk(chassis: &UnitChassis) -> u32 {
    if chassis.is_location_bad(Location::Legs) || chassis.is_engine_destroyed() {
        return 0;
    }
    let mp = chassis.original_walk_mp();
    match chassis.hits_to_system(SystemKind::ProtoSystem, Location::Legs) {
        0 => mp,
        1 => mp.saturating_sub(1),
        2 => mp / 2,
        _ => 0,
    }
}

/// Cargo penalty for Meks: nothing without cargo, else one MP plus one per
/// tenth of the unit's tonnage carried.
#[must_use]
pub fn cargo_penalty(chassis: &UnitChassis) -> u32 {
    let cargo = chassis.cargo_tons();
    if cargo == 0 || chassis.tonnage() == 0 {
        return 0;
    }
    1 + cargo * 10 / chassis.tonnage()
}

// ========================================
// Aerospace
// ========================================

fn aero_mp(chassis: &UnitChassis, kind: MpKind, settings: &MpSettings) -> u32 {
    let counters = chassis.counters();
    let out_of_fuel = chassis.aero().is_some_and(|a| a.fuel == 0);
    if counters.is_maxed(SystemCounter::Engine) || out_of_fuel {
        return 0;
    }
    let loss = u32::from(counters.get(SystemCounter::Engine)) * chassis.archetype().engine_mp_loss_per_hit();
    let thrusters = u32::from(counters.get(SystemCounter::LeftThruster))
        + u32::from(counters.get(SystemCounter::RightThruster));
    let safe = chassis
        .original_walk_mp()
        .saturating_sub(loss)
        .saturating_sub(thrusters);

    let mp = match kind {
        MpKind::Walk | MpKind::Jump => safe,
        MpKind::Run | MpKind::Sprint => mul_ceil(safe, run_factor()),
    };

    match chassis.aero() {
        Some(aero) if !aero.airborne && !settings.ignore_grounded => match aero.hull {
            HullShape::Aerodyne => mp / 2,
            HullShape::Spheroid => 0,
        },
        _ => mp,
    }
}

// ========================================
// Jumping
// ========================================

fn jump_mp(chassis: &UnitChassis, ctx: &RulesContext, settings: &MpSettings) -> u32 {
    let caps = chassis.capabilities();
    let mut mp = match chassis.archetype() {
        Archetype::Biped | Archetype::Quad => {
            if chassis.is_engine_destroyed() {
                return 0;
            }
            let mut mp = if chassis.has_jump_jets() {
                chassis.original_jump_mp().min(chassis.working_jump_jets())
            } else {
                chassis.original_jump_mp()
            };
            if mp > 0 && caps.contains(Capabilities::HAS_PARTIAL_WING) {
                mp += ctx.conditions.atmosphere.partial_wing_jump_bonus(chassis.tonnage());
            }
            mp
        }
        Archetype::ProtoMek => {
            let mp = chassis.original_jump_mp();
            match chassis.hits_to_system(SystemKind::ProtoSystem, Location::Torso) {
                0 => mp,
                1 => mp / 2,
                _ => 0,
            }
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => 0,
    };
    if caps.contains(Capabilities::HAS_MODULAR_ARMOR) && !settings.ignore_modular_armor {
        mp = mp.saturating_sub(1);
    }
    mp
}

fn apply_gravity(archetype: Archetype, mp: u32, ctx: &RulesContext, settings: &MpSettings) -> u32 {
    if settings.ignore_gravity || !archetype.is_ground() || !ctx.conditions.has_nonstandard_gravity() {
        return mp;
    }
    // An exact half rounds down.
    div_round_half_down(mp * 100, ctx.conditions.gravity_percent)
}
