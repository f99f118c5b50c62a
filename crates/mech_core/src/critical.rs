//! Critical hits for every archetype family.
//!
//! Meks roll on the critical table and pick slots with the block/slot dice.
//! Aerospace units apply the potential critical recorded by the hit table.
//! ProtoMeks mark location systems in order.

use tracing::debug;

use crate::chassis::UnitChassis;
use crate::counters::{DamageCounters, SystemCounter};
use crate::damage::destroy_location;
use crate::dice::Dice;
use crate::equipment::EquipmentId;
use crate::events::{DamageEvent, DamageReport, DestructionCause, FallReason};
use crate::hit_table::AeroCrit;
use crate::location::Location;
use crate::slot::{SlotContent, SystemKind};

/// Minimum 2d6 roll for an aerospace or ProtoMek critical.
pub const CRITICAL_CHECK_TARGET: u8 = 8;

/// Bound on slot re-rolls before falling back to the first hittable slot.
const MAX_SLOT_REROLLS: u32 = 100;

/// Result of a roll on the Mek critical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriticalCount {
    /// No critical hit.
    None,
    /// This many slots are hit.
    Hits(u8),
    /// The limb or head is blown off (three hits on a torso).
    BlowOff,
}

/// Read the Mek critical table.
#[must_use]
pub const fn determine_critical_count(roll: u8) -> CriticalCount {
    match roll {
        0..=7 => CriticalCount::None,
        8 | 9 => CriticalCount::Hits(1),
        10 | 11 => CriticalCount::Hits(2),
        _ => CriticalCount::BlowOff,
    }
}

/// Report counter increases and their consequences.
///
/// `before` is a copy of the counters taken before the change.
pub(crate) fn settle_systems(chassis: &mut UnitChassis, before: &DamageCounters, report: &mut DamageReport) {
    let after = *chassis.counters();
    for counter in SystemCounter::ALL {
        let (old, new) = (before.get(counter), after.get(counter));
        if new <= old {
            continue;
        }
        report.push(DamageEvent::SystemHit { counter, hits: new });
        if !chassis.archetype().is_mek() {
            continue;
        }
        match counter {
            SystemCounter::Gyro => {
                let reason = if after.is_maxed(counter) {
                    FallReason::GyroDestroyed
                } else {
                    FallReason::GyroHit
                };
                report.push(DamageEvent::FallCheckRequired { reason });
            }
            SystemCounter::Cockpit if after.is_maxed(counter) && !chassis.crew().dead => {
                chassis.crew_mut().kill();
                report.push(DamageEvent::CrewKilled);
            }
            SystemCounter::Engine if after.is_maxed(counter) && !chassis.is_destroyed() => {
                chassis.mark_destroyed();
                report.push(DamageEvent::UnitDestroyed {
                    cause: DestructionCause::EngineDestroyed,
                });
            }
            _ => {}
        }
    }
}

fn destroy_item(chassis: &mut UnitChassis, id: EquipmentId, report: &mut DamageReport) {
    let already = chassis.equipment_by_id(id).map_or(true, |e| e.destroyed);
    if !already && chassis.destroy_equipment(id).is_ok() {
        report.push(DamageEvent::EquipmentDestroyed { id });
    }
}

fn roll_slot(len: usize, dice: &mut dyn Dice) -> usize {
    if len > 6 {
        let block = if dice.roll_1d6() <= 3 { 0 } else { 6 };
        block + usize::from(dice.roll_1d6() - 1)
    } else {
        usize::from(dice.roll_1d6() - 1)
    }
}

/// Pick a hittable slot in a location with the block and slot dice.
fn select_slot(chassis: &UnitChassis, location: Location, dice: &mut dyn Dice) -> Option<usize> {
    let slots = &chassis.location(location)?.slots;
    if !slots.iter().any(|s| s.is_hittable()) {
        return None;
    }
    for _ in 0..MAX_SLOT_REROLLS {
        let index = roll_slot(slots.len(), dice);
        if slots.get(index).is_some_and(|s| s.is_hittable()) {
            return Some(index);
        }
    }
    slots.iter().position(|s| s.is_hittable())
}

/// Apply one critical hit to a Mek location, transferring along the chain
/// when nothing there can take it.
pub fn apply_mek_critical(
    chassis: &mut UnitChassis,
    location: Location,
    dice: &mut dyn Dice,
    report: &mut DamageReport,
) {
    let mut target = location;
    let mut steps = 0;
    let index = loop {
        if !chassis.is_location_bad(target) {
            if let Some(index) = select_slot(chassis, target, dice) {
                break index;
            }
        }
        steps += 1;
        match chassis.transfer_location(target).location() {
            Some(next) if steps <= chassis.locations().len() => {
                debug!("No critical slot left in {:?}; transferring to {:?}", target, next);
                target = next;
            }
            _ => return,
        }
    };

    let before = *chassis.counters();
    let Some(state) = chassis.location_mut(target) else {
        return;
    };
    let slot = &mut state.slots[index];
    let content = slot.content;
    if !slot.take_hit() {
        report.push(DamageEvent::CriticalAbsorbed { location: target, slot: index });
        return;
    }
    report.push(DamageEvent::CriticalHit {
        location: target,
        slot: index,
        content,
    });
    debug!("Critical hit on {:?} slot {}: {:?}", target, index, content);

    match content {
        SlotContent::System(SystemKind::Actuator(actuator)) if chassis.archetype().is_leg(target) => {
            let reason = if actuator.is_lower_leg_actuator() {
                FallReason::LegActuatorHit
            } else {
                FallReason::HipHit
            };
            report.push(DamageEvent::FallCheckRequired { reason });
        }
        SlotContent::System(_) => {
            chassis.recount_slot_systems();
            settle_systems(chassis, &before, report);
        }
        SlotContent::Equipment(id) => destroy_item(chassis, id, report),
        SlotContent::Empty => {}
    }
}

/// Roll on the Mek critical table for a location and apply the result.
pub fn roll_mek_criticals(
    chassis: &mut UnitChassis,
    location: Location,
    dice: &mut dyn Dice,
    report: &mut DamageReport,
) {
    if chassis.is_location_bad(location) {
        return;
    }
    let roll = dice.roll_2d6();
    let count = determine_critical_count(roll);
    debug!("Critical roll for {:?}: {} -> {:?}", location, roll, count);
    let hits = match count {
        CriticalCount::None => return,
        CriticalCount::Hits(n) => n,
        CriticalCount::BlowOff if location.can_be_blown_off() => {
            destroy_location(chassis, location, true, report);
            return;
        }
        CriticalCount::BlowOff => 3,
    };
    for _ in 0..hits {
        apply_mek_critical(chassis, location, dice, report);
    }
}

/// Apply an aerospace critical effect to the unit.
pub fn apply_aero_critical(
    chassis: &mut UnitChassis,
    crit: AeroCrit,
    arc: Location,
    report: &mut DamageReport,
) {
    if crit == AeroCrit::None {
        return;
    }
    report.push(DamageEvent::AeroCritical { crit });
    debug!("{} suffers aerospace critical {:?}", chassis.name(), crit);

    let counter = match crit {
        AeroCrit::None => return,
        AeroCrit::Crew => {
            wound_crew(chassis, 1, report);
            return;
        }
        AeroCrit::Weapon => {
            let weapon = chassis
                .equipment()
                .iter()
                .find(|e| e.location == arc && e.is_operable_weapon())
                .map(|e| e.id);
            if let Some(id) = weapon {
                destroy_item(chassis, id, report);
            }
            return;
        }
        AeroCrit::HeatSink => {
            let sink = chassis
                .equipment()
                .iter()
                .find(|e| e.is_heat_sink() && e.is_working())
                .map(|e| e.id);
            if let Some(id) = sink {
                destroy_item(chassis, id, report);
            }
            return;
        }
        AeroCrit::FuelTank => {
            // Only the hit that breaches the tank spills fuel.
            if !chassis.counters().is_maxed(SystemCounter::FuelTank) {
                if let Some(aero) = chassis.aero_mut() {
                    aero.fuel /= 2;
                }
            }
            SystemCounter::FuelTank
        }
        AeroCrit::Sensors => SystemCounter::Sensors,
        AeroCrit::Avionics => SystemCounter::Avionics,
        AeroCrit::Fcs => SystemCounter::Fcs,
        AeroCrit::Cic => SystemCounter::Cic,
        AeroCrit::Engine => SystemCounter::Engine,
        AeroCrit::LandingGear => SystemCounter::LandingGear,
        AeroCrit::LeftThruster => SystemCounter::LeftThruster,
        AeroCrit::RightThruster => SystemCounter::RightThruster,
        AeroCrit::LifeSupport => SystemCounter::LifeSupport,
    };
    let before = *chassis.counters();
    chassis.counters_mut().increment(counter);
    settle_systems(chassis, &before, report);
}

/// Mark the next working system slot in a ProtoMek location.
pub fn apply_proto_critical(chassis: &mut UnitChassis, location: Location, report: &mut DamageReport) {
    let Some(state) = chassis.location_mut(location) else {
        return;
    };
    let Some(index) = state
        .slots
        .iter()
        .position(|s| s.system_kind() == Some(SystemKind::ProtoSystem) && s.is_working())
    else {
        return;
    };
    state.slots[index].take_hit();
    let content = state.slots[index].content;
    let hits = state.damaged_system_slots(SystemKind::ProtoSystem);
    report.push(DamageEvent::CriticalHit {
        location,
        slot: index,
        content,
    });

    let before = *chassis.counters();
    match location {
        Location::Head => {
            chassis.counters_mut().increment(SystemCounter::Sensors);
        }
        Location::Torso if hits >= 3 => {
            chassis.counters_mut().increment(SystemCounter::Engine);
        }
        Location::LeftArm | Location::RightArm | Location::MainGun => {
            let weapon = chassis
                .equipment()
                .iter()
                .find(|e| e.location == location && e.is_operable_weapon())
                .map(|e| e.id);
            if let Some(id) = weapon {
                destroy_item(chassis, id, report);
            }
        }
        _ => {}
    }
    settle_systems(chassis, &before, report);
    if chassis.counters().is_maxed(SystemCounter::Engine) && !chassis.is_destroyed() {
        chassis.mark_destroyed();
        report.push(DamageEvent::UnitDestroyed {
            cause: DestructionCause::EngineDestroyed,
        });
    }
}

/// Wound the crew and report it.
pub(crate) fn wound_crew(chassis: &mut UnitChassis, hits: u8, report: &mut DamageReport) {
    let was_dead = chassis.crew().dead;
    chassis.crew_mut().hit(hits);
    let total = chassis.crew().hits;
    report.push(DamageEvent::CrewHit { hits, total });
    if chassis.crew().dead && !was_dead {
        report.push(DamageEvent::CrewKilled);
    }
}

/// Count ProtoMek location criticals (hit system slots).
#[must_use]
pub fn proto_location_crits(chassis: &UnitChassis, location: Location) -> usize {
    chassis.hits_to_system(SystemKind::ProtoSystem, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::{Archetype, EngineType};
    use crate::data::{AeroData, ChassisData, EquipmentData};
    use crate::dice::ScriptedDice;
    use crate::equipment::EquipmentKind;

    fn biped(engine: EngineType) -> UnitChassis {
        let mut data = ChassisData::new("Crit Test", Archetype::Biped, 50);
        data.engine = engine;
        data.equipment = vec![
            EquipmentData::new("Large Laser", EquipmentKind::Weapon, Location::RightArm, 2),
            EquipmentData::new("Heat Sink", EquipmentKind::HeatSink { double: false }, Location::LeftTorso, 1),
        ];
        UnitChassis::from_data(&data).unwrap()
    }

    #[test]
    fn test_critical_table() {
        assert_eq!(determine_critical_count(2), CriticalCount::None);
        assert_eq!(determine_critical_count(7), CriticalCount::None);
        assert_eq!(determine_critical_count(8), CriticalCount::Hits(1));
        assert_eq!(determine_critical_count(9), CriticalCount::Hits(1));
        assert_eq!(determine_critical_count(10), CriticalCount::Hits(2));
        assert_eq!(determine_critical_count(11), CriticalCount::Hits(2));
        assert_eq!(determine_critical_count(12), CriticalCount::BlowOff);
    }

    #[test]
    fn test_engine_crit_counts() {
        let mut chassis = biped(EngineType::Standard);
        let mut report = DamageReport::default();
        // Block 1-3 (upper six), slot 1 -> engine.
        let mut dice = ScriptedDice::new(&[2, 1]);
        apply_mek_critical(&mut chassis, Location::CenterTorso, &mut dice, &mut report);
        assert_eq!(chassis.counters().get(SystemCounter::Engine), 1);
        assert!(report.events.contains(&DamageEvent::SystemHit {
            counter: SystemCounter::Engine,
            hits: 1
        }));
    }

    #[test]
    fn test_empty_slot_rerolls() {
        let mut chassis = biped(EngineType::Standard);
        let mut report = DamageReport::default();
        // Lower block slot 5 (index 10) is empty: reroll, then upper block slot 4 -> gyro.
        let mut dice = ScriptedDice::new(&[5, 5, 1, 4]);
        apply_mek_critical(&mut chassis, Location::CenterTorso, &mut dice, &mut report);
        assert_eq!(chassis.counters().get(SystemCounter::Gyro), 1);
        assert!(report.fall_checks().any(|r| r == FallReason::GyroHit));
    }

    #[test]
    fn test_equipment_crit_destroys_item() {
        let mut chassis = biped(EngineType::Standard);
        let mut report = DamageReport::default();
        // Upper block, slot 5 -> index 4, first laser slot.
        let mut dice = ScriptedDice::new(&[1, 5]);
        apply_mek_critical(&mut chassis, Location::RightArm, &mut dice, &mut report);
        assert!(chassis.equipment()[0].destroyed);
        let arm = chassis.location(Location::RightArm).unwrap();
        assert!(arm.slots[4].destroyed && arm.slots[5].destroyed);
    }

    #[test]
    fn test_crit_transfers_when_location_empty() {
        let mut data = ChassisData::new("Empty", Archetype::Biped, 50);
        data.engine = EngineType::Standard;
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut report = DamageReport::default();
        // Left torso has nothing to hit: the critical moves to the center torso.
        let mut dice = ScriptedDice::new(&[1, 1]);
        apply_mek_critical(&mut chassis, Location::LeftTorso, &mut dice, &mut report);
        assert_eq!(chassis.counters().get(SystemCounter::Engine), 1);
    }

    #[test]
    fn test_blow_off_arm() {
        let mut chassis = biped(EngineType::Standard);
        let mut report = DamageReport::default();
        let mut dice = ScriptedDice::from_totals(&[12]);
        roll_mek_criticals(&mut chassis, Location::RightArm, &mut dice, &mut report);
        assert!(chassis.is_location_bad(Location::RightArm));
        assert!(chassis.location(Location::RightArm).unwrap().slots.iter().all(|s| s.missing));
        assert!(chassis.equipment()[0].destroyed);
        assert_eq!(
            report.destroyed_locations().collect::<Vec<_>>(),
            vec![Location::RightArm]
        );
    }

    #[test]
    fn test_cockpit_crit_kills_crew() {
        let mut chassis = biped(EngineType::Standard);
        let mut report = DamageReport::default();
        // Head has six slots: roll 3 -> cockpit.
        let mut dice = ScriptedDice::new(&[3]);
        apply_mek_critical(&mut chassis, Location::Head, &mut dice, &mut report);
        assert!(chassis.crew().dead);
        assert!(report.events.contains(&DamageEvent::CrewKilled));
    }

    #[test]
    fn test_armored_slot_absorbs() {
        let mut data = ChassisData::new("Armored", Archetype::Biped, 50);
        let mut laser = EquipmentData::new("Laser", EquipmentKind::Weapon, Location::RightArm, 1);
        laser.armored = true;
        data.equipment = vec![laser];
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut report = DamageReport::default();
        let mut dice = ScriptedDice::new(&[1, 5]);
        apply_mek_critical(&mut chassis, Location::RightArm, &mut dice, &mut report);
        assert!(!chassis.equipment()[0].destroyed);
        assert!(matches!(report.events[0], DamageEvent::CriticalAbsorbed { .. }));
    }

    #[test]
    fn test_aero_fuel_tank_halves_fuel() {
        let mut data = ChassisData::new("Fighter", Archetype::Fighter, 50);
        data.aero = Some(AeroData {
            fuel: 300,
            ..AeroData::default()
        });
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut report = DamageReport::default();
        apply_aero_critical(&mut chassis, AeroCrit::FuelTank, Location::Aft, &mut report);
        assert_eq!(chassis.aero().unwrap().fuel, 150);
        assert_eq!(chassis.counters().get(SystemCounter::FuelTank), 1);
        apply_aero_critical(&mut chassis, AeroCrit::FuelTank, Location::Aft, &mut report);
        assert_eq!(chassis.counters().get(SystemCounter::FuelTank), 1);
        assert_eq!(chassis.aero().unwrap().fuel, 150);
    }

    #[test]
    fn test_aero_engine_crits_cap() {
        let mut data = ChassisData::new("Fighter", Archetype::Fighter, 50);
        data.aero = Some(AeroData::default());
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut report = DamageReport::default();
        for _ in 0..5 {
            apply_aero_critical(&mut chassis, AeroCrit::Engine, Location::Aft, &mut report);
        }
        assert_eq!(chassis.counters().get(SystemCounter::Engine), 3);
        assert!(!chassis.is_destroyed());
    }

    #[test]
    fn test_proto_leg_crits_in_order() {
        let data = ChassisData::new("Proto", Archetype::ProtoMek, 5);
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut report = DamageReport::default();
        for expected in 1..=3 {
            apply_proto_critical(&mut chassis, Location::Legs, &mut report);
            assert_eq!(proto_location_crits(&chassis, Location::Legs), expected);
        }
        apply_proto_critical(&mut chassis, Location::Legs, &mut report);
        assert_eq!(proto_location_crits(&chassis, Location::Legs), 3);
    }
}
