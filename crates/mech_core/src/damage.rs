//! Damage application.
//!
//! Armor absorbs first, then internal structure (or structural integrity for
//! aerospace units). Destroyed locations pass their excess along the
//! transfer chain. Everything that happens is recorded in a
//! [`DamageReport`].

use tracing::{debug, info};

use crate::chassis::UnitChassis;
use crate::context::RulesContext;
use crate::critical::{
    apply_aero_critical, apply_proto_critical, roll_mek_criticals, settle_systems, wound_crew,
    CRITICAL_CHECK_TARGET,
};
use crate::dice::Dice;
use crate::events::{DamageEvent, DamageReport, DestructionCause, FallReason};
use crate::location::{Location, Transfer};
use crate::resolver::HitData;

/// Damage in one phase that forces a fall check.
pub const HEAVY_DAMAGE_THRESHOLD: u32 = 20;

/// Apply `amount` points of damage from a resolved hit.
pub fn apply_damage(
    chassis: &mut UnitChassis,
    hit: &HitData,
    amount: u32,
    ctx: &RulesContext,
    dice: &mut dyn Dice,
) -> DamageReport {
    let mut report = DamageReport::default();
    if chassis.is_destroyed() || amount == 0 {
        return report;
    }
    debug!(
        "{} takes {} damage at {:?}{}",
        chassis.name(),
        amount,
        hit.location,
        if hit.rear { " (rear)" } else { "" }
    );

    let archetype = chassis.archetype();
    if archetype.is_aero() {
        apply_aero_damage(chassis, hit, amount, ctx, dice, &mut report);
    } else {
        apply_ground_damage(chassis, hit, amount, dice, &mut report);
    }

    let flags = chassis.round_flags_mut();
    flags.took_damage = true;
    flags.damage_this_phase += report.applied;
    let heavy = archetype.is_mek()
        && flags.damage_this_phase >= HEAVY_DAMAGE_THRESHOLD
        && !flags.heavy_damage_checked;
    if heavy {
        flags.heavy_damage_checked = true;
        report.push(DamageEvent::FallCheckRequired {
            reason: FallReason::HeavyDamage,
        });
    }

    #[cfg(feature = "debug-validation")]
    for counter in crate::counters::SystemCounter::ALL {
        let counters = chassis.counters();
        assert!(
            counters.get(counter) <= counters.cap(counter),
            "{counter:?} exceeds its cap on {}",
            chassis.name()
        );
    }
    report
}

// ========================================
// Meks and ProtoMeks
// ========================================

fn apply_ground_damage(
    chassis: &mut UnitChassis,
    hit: &HitData,
    amount: u32,
    dice: &mut dyn Dice,
    report: &mut DamageReport,
) {
    let is_mek = chassis.archetype().is_mek();
    if is_mek && hit.location == Location::Head && !chassis.is_location_bad(Location::Head) {
        wound_crew(chassis, 1, report);
    }

    let mut location = hit.location;
    let mut rear = hit.rear;
    let mut remaining = amount;
    let mut damaged_internals: Vec<Location> = Vec::new();
    let max_steps = chassis.locations().len() + 1;

    for _ in 0..max_steps {
        if remaining == 0 {
            break;
        }
        if chassis.is_location_bad(location) {
            match chassis.transfer_location(location) {
                Transfer::To(next) => {
                    rear = rear && chassis.has_rear_armor(next);
                    location = next;
                    continue;
                }
                Transfer::Destroyed | Transfer::NoTransfer => {
                    report.push(DamageEvent::DamageLost { amount: remaining });
                    break;
                }
            }
        }

        let Some(state) = chassis.location_mut(location) else {
            break;
        };
        let use_rear = rear && state.rear_armor.is_applicable();
        let armor = if use_rear {
            &mut state.rear_armor
        } else {
            &mut state.armor
        };
        let (absorbed, left) = armor.absorb(remaining);
        if absorbed > 0 {
            report.applied += absorbed;
            report.push(DamageEvent::ArmorDamaged {
                location,
                rear: use_rear,
                amount: absorbed,
            });
        }
        remaining = left;
        if remaining == 0 {
            break;
        }

        let (absorbed, left) = state.internal.absorb(remaining);
        let internal_gone = state.internal.points() == 0;
        if absorbed > 0 {
            report.applied += absorbed;
            report.push(DamageEvent::InternalDamaged {
                location,
                amount: absorbed,
            });
            if !damaged_internals.contains(&location) {
                damaged_internals.push(location);
            }
        }
        remaining = left;
        if !internal_gone {
            break;
        }

        destroy_location(chassis, location, false, report);
        if remaining == 0 {
            break;
        }
        if chassis.is_destroyed() {
            report.push(DamageEvent::DamageLost { amount: remaining });
            break;
        }
        match chassis.transfer_location(location) {
            Transfer::To(next) => {
                report.push(DamageEvent::DamageTransferred {
                    from: location,
                    to: next,
                    amount: remaining,
                });
                rear = rear && chassis.has_rear_armor(next);
                location = next;
            }
            Transfer::Destroyed | Transfer::NoTransfer => {
                report.push(DamageEvent::DamageLost { amount: remaining });
                break;
            }
        }
    }

    if chassis.is_destroyed() {
        return;
    }

    // A critical-effect hit checks the struck location even behind intact armor.
    if hit.forces_critical() && !damaged_internals.contains(&hit.location) {
        damaged_internals.insert(0, hit.location);
    }
    for location in damaged_internals {
        if chassis.is_location_bad(location) || chassis.is_destroyed() {
            continue;
        }
        if is_mek {
            roll_mek_criticals(chassis, location, dice, report);
        } else if dice.roll_2d6() >= CRITICAL_CHECK_TARGET {
            apply_proto_critical(chassis, location, report);
        }
    }
}

/// Destroy a location (or blow it off) with everything in it.
pub(crate) fn destroy_location(
    chassis: &mut UnitChassis,
    location: Location,
    blown_off: bool,
    report: &mut DamageReport,
) {
    let before = *chassis.counters();
    let Some(state) = chassis.location_mut(location) else {
        return;
    };
    state.armor.doom();
    state.rear_armor.doom();
    state.internal.doom();
    let mut items = Vec::new();
    for slot in &mut state.slots {
        if blown_off {
            slot.blow_off();
        } else {
            slot.destroy();
        }
        if let Some(id) = slot.equipment() {
            if !items.contains(&id) {
                items.push(id);
            }
        }
    }
    // Equipment with no slots of its own (aero arcs, protos) lives in the location too.
    for item in chassis.equipment() {
        if item.location == location && !items.contains(&item.id) {
            items.push(item.id);
        }
    }

    if blown_off {
        info!("{}: {:?} blown off", chassis.name(), location);
        report.push(DamageEvent::LocationBlownOff { location });
    } else {
        info!("{}: {:?} destroyed", chassis.name(), location);
        report.push(DamageEvent::LocationDestroyed { location });
    }

    for id in items {
        let destroyed = chassis.equipment_by_id(id).map_or(true, |e| e.destroyed);
        if !destroyed && chassis.destroy_equipment(id).is_ok() {
            report.push(DamageEvent::EquipmentDestroyed { id });
        }
    }

    chassis.recount_slot_systems();
    settle_systems(chassis, &before, report);

    if chassis.archetype().is_leg(location) {
        report.push(DamageEvent::FallCheckRequired {
            reason: FallReason::LegDestroyed,
        });
    }

    if chassis.transfer_location(location) == Transfer::Destroyed && !chassis.is_destroyed() {
        chassis.mark_destroyed();
        info!("{} destroyed: lost {:?}", chassis.name(), location);
        report.push(DamageEvent::UnitDestroyed {
            cause: DestructionCause::LocationDestroyed(location),
        });
    }

    if let Some(dependent) = chassis.dependent_location(location) {
        if !chassis.is_location_bad(dependent) {
            destroy_location(chassis, dependent, false, report);
        }
    }
}

// ========================================
// Aerospace
// ========================================

fn apply_aero_damage(
    chassis: &mut UnitChassis,
    hit: &HitData,
    amount: u32,
    ctx: &RulesContext,
    dice: &mut dyn Dice,
    report: &mut DamageReport,
) {
    let arc = hit.location;
    let threshold = damage_threshold(chassis, arc, ctx.options.variable_damage_threshold);

    let mut remaining = amount;
    if let Some(state) = chassis.location_mut(arc) {
        let (absorbed, left) = state.armor.absorb(remaining);
        if absorbed > 0 {
            report.applied += absorbed;
            report.push(DamageEvent::ArmorDamaged {
                location: arc,
                rear: false,
                amount: absorbed,
            });
        }
        remaining = left;
    }

    if remaining > 0 {
        let name = chassis.name().to_string();
        if let Some(aero) = chassis.aero_mut() {
            let lost = remaining.min(aero.structural_integrity);
            aero.structural_integrity -= lost;
            report.applied += lost;
            report.push(DamageEvent::StructuralDamage {
                amount: lost,
                remaining: aero.structural_integrity,
            });
            if lost < remaining {
                report.push(DamageEvent::DamageLost {
                    amount: remaining - lost,
                });
            }
            if aero.structural_integrity == 0 {
                info!("{} destroyed: structural integrity gone", name);
                chassis.mark_destroyed();
                report.push(DamageEvent::UnitDestroyed {
                    cause: DestructionCause::StructuralIntegrity,
                });
                return;
            }
        }
    }

    if hit.forces_critical() || amount >= threshold {
        let roll = dice.roll_2d6();
        debug!(
            "Critical check for {:?}: rolled {} against {}",
            arc, roll, CRITICAL_CHECK_TARGET
        );
        if roll >= CRITICAL_CHECK_TARGET {
            apply_aero_critical(chassis, hit.potential_crit, arc, report);
        }
    }
}

/// Damage an aerospace arc must take in one hit to force a critical check.
///
/// One tenth of the arc's armor, rounded up: original armor, or current
/// armor with `variable` set.
#[must_use]
pub fn damage_threshold(chassis: &UnitChassis, arc: Location, variable: bool) -> u32 {
    let armor = if variable {
        chassis.armor(arc, false)
    } else {
        chassis.original_armor(arc, false)
    };
    armor.div_ceil(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::{Archetype, CockpitType, EngineType};
    use crate::context::{GameOptions, PlanetaryConditions};
    use crate::counters::SystemCounter;
    use crate::data::{AeroData, ChassisData, EquipmentData, LocationData};
    use crate::dice::ScriptedDice;
    use crate::equipment::EquipmentKind;
    use crate::hit_table::AeroCrit;
    use crate::resolver::HitEffect;
    use crate::structure::StructureValue;

    fn biped() -> UnitChassis {
        let mut data = ChassisData::new("Damage Test", Archetype::Biped, 50);
        data.walk_mp = 5;
        data.locations = vec![
            LocationData::new(Location::Head, 9),
            LocationData::new(Location::CenterTorso, 20).with_rear(6),
            LocationData::new(Location::LeftTorso, 12).with_rear(4),
            LocationData::new(Location::RightTorso, 12).with_rear(4),
            LocationData::new(Location::LeftArm, 8),
            LocationData::new(Location::RightArm, 8),
            LocationData::new(Location::LeftLeg, 10),
            LocationData::new(Location::RightLeg, 10),
        ];
        data.equipment = vec![EquipmentData::new("Medium Laser", EquipmentKind::Weapon, Location::LeftArm, 1)];
        UnitChassis::from_data(&data).unwrap()
    }

    fn apply(chassis: &mut UnitChassis, hit: &HitData, amount: u32, dice: &mut ScriptedDice) -> DamageReport {
        let options = GameOptions::default();
        let conditions = PlanetaryConditions::default();
        let ctx = RulesContext::new(&options, &conditions);
        apply_damage(chassis, hit, amount, &ctx, dice)
    }

    #[test]
    fn test_armor_absorbs_first() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::LeftArm), 5, &mut dice);
        assert_eq!(chassis.armor(Location::LeftArm, false), 3);
        assert_eq!(chassis.internal(Location::LeftArm), 8);
        assert_eq!(report.applied, 5);
    }

    #[test]
    fn test_rear_armor_used_for_rear_hits() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        apply(&mut chassis, &HitData::at(Location::CenterTorso).from_rear(), 4, &mut dice);
        assert_eq!(chassis.armor(Location::CenterTorso, true), 2);
        assert_eq!(chassis.armor(Location::CenterTorso, false), 20);
    }

    #[test]
    fn test_internal_damage_rolls_criticals() {
        let mut chassis = biped();
        // 2d6 = 7: no critical.
        let mut dice = ScriptedDice::from_totals(&[7]);
        let report = apply(&mut chassis, &HitData::at(Location::LeftLeg), 12, &mut dice);
        assert_eq!(chassis.internal(Location::LeftLeg), 10);
        assert_eq!(report.critical_hits(), 0);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_destroyed_arm_transfers_to_torso() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        // 8 armor + 8 internal, 4 left over for the left torso armor.
        let report = apply(&mut chassis, &HitData::at(Location::LeftArm), 20, &mut dice);
        assert!(chassis.is_location_bad(Location::LeftArm));
        assert_eq!(chassis.armor_value(Location::LeftArm, false), StructureValue::Doomed);
        assert_eq!(chassis.armor(Location::LeftTorso, false), 8);
        assert!(chassis.equipment()[0].destroyed);
        assert!(report.events.contains(&DamageEvent::DamageTransferred {
            from: Location::LeftArm,
            to: Location::LeftTorso,
            amount: 4
        }));
        assert!(report.fall_checks().any(|r| r == FallReason::HeavyDamage));
    }

    #[test]
    fn test_side_torso_takes_arm_with_it() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        let (_, side, _, _) = crate::archetype::mek_internal_structure(50);
        let report = apply(&mut chassis, &HitData::at(Location::LeftTorso), 12 + side, &mut dice);
        let lost: Vec<_> = report.destroyed_locations().collect();
        assert_eq!(lost, vec![Location::LeftTorso, Location::LeftArm]);
        assert!(!report.unit_destroyed());
    }

    #[test]
    fn test_xl_side_torso_loss_destroys_engine() {
        let mut data = ChassisData::new("XL", Archetype::Biped, 50);
        data.engine = EngineType::Xl;
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::RightTorso), 200, &mut dice);
        assert!(report.unit_destroyed());
        assert!(chassis.is_engine_destroyed());
        assert!(chassis.is_destroyed());
    }

    #[test]
    fn test_center_torso_loss_destroys_unit() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::CenterTorso), 100, &mut dice);
        assert!(report.events.contains(&DamageEvent::UnitDestroyed {
            cause: DestructionCause::LocationDestroyed(Location::CenterTorso)
        }));
        assert!(report.events.iter().any(|e| matches!(e, DamageEvent::DamageLost { .. })));
    }

    #[test]
    fn test_leg_loss_requires_fall_check() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::RightLeg), 22, &mut dice);
        assert!(report.fall_checks().any(|r| r == FallReason::LegDestroyed));
    }

    #[test]
    fn test_head_hit_wounds_crew() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        apply(&mut chassis, &HitData::at(Location::Head), 2, &mut dice);
        assert_eq!(chassis.crew().hits, 1);
    }

    #[test]
    fn test_torso_mounted_cockpit_head_loss_is_survivable() {
        let mut data = ChassisData::new("TM", Archetype::Biped, 50);
        data.cockpit = CockpitType::TorsoMounted;
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::Head), 40, &mut dice);
        assert!(chassis.is_location_bad(Location::Head));
        assert!(!report.unit_destroyed());
        assert!(!chassis.is_destroyed());
    }

    #[test]
    fn test_critical_effect_rolls_behind_armor() {
        let mut chassis = biped();
        // 2d6 = 8 -> one critical; upper block slot 1 -> shoulder.
        let mut dice = ScriptedDice::new(&[4, 4, 1, 1]);
        let hit = HitData::at(Location::RightArm).with_effect(HitEffect::Critical);
        let report = apply(&mut chassis, &hit, 2, &mut dice);
        assert_eq!(report.critical_hits(), 1);
    }

    #[test]
    fn test_heavy_damage_once_per_phase() {
        let mut chassis = biped();
        let mut dice = ScriptedDice::new(&[]);
        let first = apply(&mut chassis, &HitData::at(Location::CenterTorso), 12, &mut dice);
        let second = apply(&mut chassis, &HitData::at(Location::CenterTorso), 8, &mut dice);
        let third = apply(&mut chassis, &HitData::at(Location::LeftTorso), 5, &mut dice);
        assert_eq!(first.fall_checks().count(), 0);
        assert_eq!(second.fall_checks().count(), 1);
        assert_eq!(third.fall_checks().count(), 0);
        chassis.end_phase();
        let fourth = apply(&mut chassis, &HitData::at(Location::RightTorso), 12, &mut dice);
        assert_eq!(fourth.fall_checks().count(), 0);
    }

    fn fighter() -> UnitChassis {
        let mut data = ChassisData::new("Fighter", Archetype::Fighter, 50);
        data.walk_mp = 6;
        data.aero = Some(AeroData {
            structural_integrity: Some(6),
            ..AeroData::default()
        });
        data.locations = vec![
            LocationData::new(Location::Nose, 30),
            LocationData::new(Location::LeftWing, 20),
            LocationData::new(Location::RightWing, 20),
            LocationData::new(Location::Aft, 15),
        ];
        UnitChassis::from_data(&data).unwrap()
    }

    #[test]
    fn test_aero_overflow_reduces_si() {
        let mut chassis = fighter();
        // Threshold is 2: damage 18 checks; roll 7 -> no critical.
        let mut dice = ScriptedDice::from_totals(&[7]);
        let report = apply(&mut chassis, &HitData::at(Location::Aft), 18, &mut dice);
        assert_eq!(chassis.aero().unwrap().structural_integrity, 3);
        assert_eq!(report.critical_hits(), 0);
        assert!(!chassis.is_destroyed());
    }

    #[test]
    fn test_aero_si_zero_destroys() {
        let mut chassis = fighter();
        let mut dice = ScriptedDice::new(&[]);
        let report = apply(&mut chassis, &HitData::at(Location::Aft), 30, &mut dice);
        assert!(report.events.contains(&DamageEvent::UnitDestroyed {
            cause: DestructionCause::StructuralIntegrity
        }));
    }

    #[test]
    fn test_aero_threshold_crit() {
        let mut chassis = fighter();
        let mut dice = ScriptedDice::from_totals(&[9]);
        let hit = HitData::at(Location::Nose).with_potential_crit(AeroCrit::Avionics);
        let report = apply(&mut chassis, &hit, 3, &mut dice);
        assert_eq!(chassis.counters().get(SystemCounter::Avionics), 1);
        assert_eq!(report.critical_hits(), 1);

        // Below threshold: no roll at all.
        let mut dice = ScriptedDice::new(&[]);
        apply(&mut chassis, &hit, 2, &mut dice);
        assert_eq!(chassis.counters().get(SystemCounter::Avionics), 1);
    }

    #[test]
    fn test_variable_threshold_uses_current_armor() {
        let mut chassis = fighter();
        chassis.location_mut(Location::Nose).unwrap().armor = StructureValue::Points(9);
        assert_eq!(damage_threshold(&chassis, Location::Nose, false), 3);
        assert_eq!(damage_threshold(&chassis, Location::Nose, true), 1);
    }

    #[test]
    fn test_proto_crit_marks_system() {
        let mut data = ChassisData::new("Proto", Archetype::ProtoMek, 5);
        data.locations = vec![LocationData::new(Location::Legs, 2)];
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        let mut dice = ScriptedDice::from_totals(&[8]);
        let report = apply(&mut chassis, &HitData::at(Location::Legs), 3, &mut dice);
        assert_eq!(report.critical_hits(), 1);
        assert_eq!(crate::critical::proto_location_crits(&chassis, Location::Legs), 1);
    }

    #[test]
    fn test_proto_legs_transfer_to_torso() {
        let data = ChassisData::new("Proto", Archetype::ProtoMek, 5);
        let mut chassis = UnitChassis::from_data(&data).unwrap();
        // No armor anywhere. The destroyed legs skip their critical check, and
        // the torso's check (the only roll) misses on a 2.
        let mut dice = ScriptedDice::from_totals(&[2]);
        let legs = chassis.internal(Location::Legs) + chassis.armor(Location::Legs, false);
        let report = apply(&mut chassis, &HitData::at(Location::Legs), legs + 1, &mut dice);
        assert!(report.fall_checks().any(|r| r == FallReason::LegDestroyed));
        assert!(report.events.contains(&DamageEvent::DamageTransferred {
            from: Location::Legs,
            to: Location::Torso,
            amount: 1
        }));
        assert_eq!(chassis.internal(Location::Torso) + 1, chassis.original_internal(Location::Torso));
        assert_eq!(report.critical_hits(), 0);
    }
}
