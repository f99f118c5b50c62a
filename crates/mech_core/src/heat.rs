//! Heat dissipation capacity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chassis::UnitChassis;
use crate::context::RulesContext;
use crate::equipment::{Capabilities, MountedEquipment};
use crate::math::{mul_ceil, percent};

/// Most extra dissipation water can give.
pub const MAX_WATER_BONUS: u32 = 6;

/// Percentage of active sinks a radical heat sink system adds.
pub const RADICAL_BONUS_PERCENT: u32 = 40;

/// Components of a unit's heat capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HeatBreakdown {
    /// Number of sinks counted.
    pub active_sinks: u32,
    /// Dissipation of those sinks.
    pub sinks: u32,
    /// Partial wing (or LAM air mode) bonus.
    pub wing_bonus: u32,
    /// Lost to coolant system failures.
    pub coolant_penalty: u32,
    /// Radical heat sink system bonus.
    pub radical_bonus: u32,
    /// Bonus from sinks under water.
    pub water_bonus: u32,
}

impl HeatBreakdown {
    /// Total capacity, never below zero.
    #[must_use]
    pub const fn total(&self) -> u32 {
        (self.sinks + self.wing_bonus + self.radical_bonus + self.water_bonus)
            .saturating_sub(self.coolant_penalty)
    }
}

/// Heat sinks in effect, honoring the active-sink override.
fn active_sinks(chassis: &UnitChassis) -> impl Iterator<Item = &MountedEquipment> + '_ {
    let limit = chassis.active_sinks().map_or(usize::MAX, |n| n as usize);
    chassis
        .equipment()
        .iter()
        .filter(|e| e.is_heat_sink() && e.is_working())
        .take(limit)
}

/// Break a unit's heat capacity into its parts.
#[must_use]
pub fn heat_breakdown(
    chassis: &UnitChassis,
    ctx: &RulesContext,
    include_radical: bool,
    include_water: bool,
) -> HeatBreakdown {
    let caps = chassis.capabilities();
    let mut breakdown = HeatBreakdown::default();

    for sink in active_sinks(chassis) {
        let capacity = sink.kind.sink_capacity();
        breakdown.active_sinks += 1;
        breakdown.sinks += capacity;
        if include_water && chassis.is_submerged(sink.location) {
            breakdown.water_bonus += capacity;
        }
    }
    breakdown.water_bonus = breakdown.water_bonus.min(MAX_WATER_BONUS);

    if caps.contains(Capabilities::HAS_PARTIAL_WING) || chassis.is_lam_airborne() {
        breakdown.wing_bonus = ctx.conditions.atmosphere.partial_wing_heat_bonus();
    }

    let per_failure = if caps.contains(Capabilities::HAS_DOUBLE_SINKS) { 2 } else { 1 };
    breakdown.coolant_penalty = chassis.coolant_failures() * per_failure;

    if include_radical && caps.contains(Capabilities::HAS_RADICAL_HEAT_SINK) {
        breakdown.radical_bonus = mul_ceil(breakdown.active_sinks, percent(RADICAL_BONUS_PERCENT));
    }
    breakdown
}

/// Heat a unit can dissipate per turn.
#[must_use]
pub fn compute_heat_capacity(
    chassis: &UnitChassis,
    ctx: &RulesContext,
    include_radical: bool,
    include_water: bool,
) -> u32 {
    let breakdown = heat_breakdown(chassis, ctx, include_radical, include_water);
    debug!("{} heat capacity: {:?}", chassis.name(), breakdown);
    breakdown.total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Archetype;
    use crate::context::{Atmosphere, GameOptions, PlanetaryConditions};
    use crate::data::{ChassisData, EquipmentData};
    use crate::equipment::EquipmentKind;
    use crate::location::Location;

    fn sink(double: bool, location: Location) -> EquipmentData {
        EquipmentData::new("Heat Sink", EquipmentKind::HeatSink { double }, location, 1)
    }

    fn unit(equipment: Vec<EquipmentData>) -> UnitChassis {
        let mut data = ChassisData::new("Sinks", Archetype::Biped, 50);
        data.equipment = equipment;
        UnitChassis::from_data(&data).unwrap()
    }

    fn capacity(chassis: &UnitChassis) -> u32 {
        capacity_in(chassis, &PlanetaryConditions::default(), true, true)
    }

    fn capacity_in(chassis: &UnitChassis, conditions: &PlanetaryConditions, radical: bool, water: bool) -> u32 {
        let options = GameOptions::default();
        compute_heat_capacity(chassis, &RulesContext::new(&options, conditions), radical, water)
    }

    #[test]
    fn test_single_and_double_sinks() {
        let chassis = unit(vec![sink(false, Location::LeftTorso), sink(false, Location::RightTorso)]);
        assert_eq!(capacity(&chassis), 2);
        let chassis = unit(vec![sink(true, Location::LeftTorso), sink(true, Location::RightTorso)]);
        assert_eq!(capacity(&chassis), 4);
    }

    #[test]
    fn test_destroyed_and_breached_sinks_do_not_count() {
        let mut chassis = unit(vec![
            sink(false, Location::LeftTorso),
            sink(false, Location::RightTorso),
            sink(false, Location::CenterTorso),
        ]);
        let ids: Vec<_> = chassis.equipment().iter().map(|e| e.id).collect();
        chassis.destroy_equipment(ids[0]).unwrap();
        chassis.set_equipment_breached(ids[1]).unwrap();
        assert_eq!(capacity(&chassis), 1);
    }

    #[test]
    fn test_active_sink_override() {
        let mut chassis = unit((0..4).map(|_| sink(false, Location::LeftTorso)).collect());
        chassis.set_active_sinks(Some(2));
        assert_eq!(capacity(&chassis), 2);
        chassis.set_active_sinks(None);
        assert_eq!(capacity(&chassis), 4);
    }

    #[test]
    fn test_partial_wing_by_atmosphere() {
        let wing = EquipmentData::new("Partial Wing", EquipmentKind::PartialWing, Location::LeftTorso, 3);
        let chassis = unit(vec![wing, sink(false, Location::RightTorso)]);
        let expected = [
            (Atmosphere::Vacuum, 1),
            (Atmosphere::Trace, 2),
            (Atmosphere::Thin, 3),
            (Atmosphere::Standard, 4),
            (Atmosphere::VeryHigh, 4),
        ];
        for (atmosphere, want) in expected {
            let conditions = PlanetaryConditions {
                atmosphere,
                ..PlanetaryConditions::default()
            };
            assert_eq!(capacity_in(&chassis, &conditions, true, true), want, "{atmosphere:?}");
        }
    }

    #[test]
    fn test_lam_air_mode_bonus() {
        let mut chassis = unit(vec![sink(false, Location::RightTorso)]);
        chassis.set_airborne(true);
        assert_eq!(capacity(&chassis), 4);
    }

    #[test]
    fn test_coolant_failures() {
        let mut chassis = unit(vec![sink(true, Location::LeftTorso), sink(true, Location::RightTorso)]);
        chassis.add_coolant_failure();
        assert_eq!(capacity(&chassis), 2);
        chassis.add_coolant_failure();
        chassis.add_coolant_failure();
        assert_eq!(capacity(&chassis), 0);
    }

    #[test]
    fn test_radical_bonus() {
        let mut equipment: Vec<_> = (0..5).map(|_| sink(false, Location::LeftTorso)).collect();
        equipment.push(EquipmentData::new("RHS", EquipmentKind::RadicalHeatSink, Location::RightTorso, 1));
        let chassis = unit(equipment);
        // ceil(5 * 0.4) = 2
        assert_eq!(capacity(&chassis), 7);
        assert_eq!(capacity_in(&chassis, &PlanetaryConditions::default(), false, true), 5);
    }

    #[test]
    fn test_water_bonus() {
        let mut equipment: Vec<_> = [Location::LeftLeg, Location::LeftLeg, Location::RightLeg, Location::RightLeg]
            .into_iter()
            .map(|l| sink(true, l))
            .collect();
        equipment.push(sink(true, Location::CenterTorso));
        let mut chassis = unit(equipment);
        chassis.set_submersion(1);
        // Legs only at depth 1: 8, capped to 6.
        assert_eq!(capacity(&chassis), 16);
        assert_eq!(capacity_in(&chassis, &PlanetaryConditions::default(), true, false), 10);

        let mut chassis = unit(vec![sink(false, Location::CenterTorso), sink(false, Location::LeftLeg)]);
        chassis.set_submersion(1);
        assert_eq!(capacity(&chassis), 3);
        chassis.set_submersion(2);
        assert_eq!(capacity(&chassis), 4);
    }
}
