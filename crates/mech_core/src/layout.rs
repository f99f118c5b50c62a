//! Standard system slot layouts.
//!
//! Engines, gyros, cockpits, sensors, life support and actuators are placed
//! automatically for each archetype. Equipment from chassis data is mounted
//! into whatever slots remain empty.

use crate::archetype::{Archetype, CockpitType, EngineType, GyroType};
use crate::error::{Result, RulesError};
use crate::location::Location;
use crate::slot::{Actuator, CriticalSlot, SystemKind};

/// Construction choices that affect the slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Engine type.
    pub engine: EngineType,
    /// Gyro type.
    pub gyro: GyroType,
    /// Cockpit type.
    pub cockpit: CockpitType,
}

fn place(
    slots: &mut [CriticalSlot],
    start: usize,
    kind: SystemKind,
    count: usize,
    location: Location,
) -> Result<usize> {
    let end = start + count;
    if end > slots.len() {
        return Err(RulesError::CapacityExceeded {
            location,
            required: count,
            available: slots.len().saturating_sub(start),
        });
    }
    for slot in &mut slots[start..end] {
        *slot = CriticalSlot::system(kind);
    }
    Ok(end)
}

fn head_slots(slots: &mut [CriticalSlot], cockpit: CockpitType) {
    use SystemKind::{Cockpit, LifeSupport, Sensors};
    let layout: &[Option<SystemKind>] = match cockpit {
        CockpitType::Standard => &[
            Some(LifeSupport),
            Some(Sensors),
            Some(Cockpit),
            None,
            Some(Sensors),
            Some(LifeSupport),
        ],
        CockpitType::Small => &[Some(LifeSupport), Some(Sensors), Some(Cockpit), Some(Sensors)],
        CockpitType::TorsoMounted => &[Some(Sensors), Some(Sensors)],
    };
    for (slot, kind) in slots.iter_mut().zip(layout) {
        if let Some(kind) = kind {
            *slot = CriticalSlot::system(*kind);
        }
    }
}

fn mek_slots(
    archetype: Archetype,
    location: Location,
    options: LayoutOptions,
) -> Result<Vec<CriticalSlot>> {
    let count = archetype.slot_count(location);
    let mut slots = vec![CriticalSlot::empty(); count];
    match location {
        Location::Head => head_slots(&mut slots, options.cockpit),
        Location::CenterTorso => {
            let center = options.engine.center_slots();
            let first = center.min(3);
            let mut next = place(&mut slots, 0, SystemKind::Engine, first, location)?;
            next = place(&mut slots, next, SystemKind::Gyro, options.gyro.slots(), location)?;
            next = place(&mut slots, next, SystemKind::Engine, center - first, location)?;
            if options.cockpit == CockpitType::TorsoMounted {
                place(&mut slots, next, SystemKind::Cockpit, 1, location)?;
            }
        }
        Location::LeftTorso | Location::RightTorso => {
            let side = options.engine.side_slots();
            let next = place(&mut slots, 0, SystemKind::Engine, side, location)?;
            if options.cockpit == CockpitType::TorsoMounted {
                place(&mut slots, next, SystemKind::LifeSupport, 1, location)?;
            }
        }
        Location::LeftArm | Location::RightArm => {
            let arm = [Actuator::Shoulder, Actuator::UpperArm, Actuator::LowerArm, Actuator::Hand];
            for (slot, actuator) in slots.iter_mut().zip(arm) {
                *slot = CriticalSlot::system(SystemKind::Actuator(actuator));
            }
        }
        _ if location.is_leg() => {
            let leg = [Actuator::Hip, Actuator::UpperLeg, Actuator::LowerLeg, Actuator::Foot];
            for (slot, actuator) in slots.iter_mut().zip(leg) {
                *slot = CriticalSlot::system(SystemKind::Actuator(actuator));
            }
        }
        _ => return Err(RulesError::LocationNotOnChassis(location)),
    }
    Ok(slots)
}

/// Build the standard slot list for one location.
pub fn standard_slots(
    archetype: Archetype,
    location: Location,
    options: LayoutOptions,
) -> Result<Vec<CriticalSlot>> {
    if !archetype.has_location(location) {
        return Err(RulesError::LocationNotOnChassis(location));
    }
    match archetype {
        Archetype::Biped | Archetype::Quad => mek_slots(archetype, location, options),
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
            Ok(vec![CriticalSlot::empty(); archetype.slot_count(location)])
        }
        Archetype::ProtoMek => Ok(vec![
            CriticalSlot::system(SystemKind::ProtoSystem);
            archetype.slot_count(location)
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(slots: &[CriticalSlot]) -> Vec<Option<SystemKind>> {
        slots.iter().map(CriticalSlot::system_kind).collect()
    }

    #[test]
    fn test_standard_center_torso() {
        let slots = standard_slots(Archetype::Biped, Location::CenterTorso, LayoutOptions::default()).unwrap();
        let engines = slots.iter().filter(|s| s.system_kind() == Some(SystemKind::Engine)).count();
        let gyros = slots.iter().filter(|s| s.system_kind() == Some(SystemKind::Gyro)).count();
        assert_eq!(slots.len(), 12);
        assert_eq!(engines, 6);
        assert_eq!(gyros, 4);
        assert_eq!(slots[3].system_kind(), Some(SystemKind::Gyro));
        assert!(slots[10].is_empty());
    }

    #[test]
    fn test_head_layout() {
        let slots = standard_slots(Archetype::Biped, Location::Head, LayoutOptions::default()).unwrap();
        assert_eq!(
            kinds(&slots),
            vec![
                Some(SystemKind::LifeSupport),
                Some(SystemKind::Sensors),
                Some(SystemKind::Cockpit),
                None,
                Some(SystemKind::Sensors),
                Some(SystemKind::LifeSupport),
            ]
        );
    }

    #[test]
    fn test_xl_engine_side_torsos() {
        let options = LayoutOptions {
            engine: EngineType::Xl,
            ..LayoutOptions::default()
        };
        let slots = standard_slots(Archetype::Biped, Location::LeftTorso, options).unwrap();
        let engines = slots.iter().filter(|s| s.system_kind() == Some(SystemKind::Engine)).count();
        assert_eq!(engines, 3);
    }

    #[test]
    fn test_torso_mounted_cockpit_with_xl_gyro_overflows() {
        let options = LayoutOptions {
            gyro: GyroType::Xl,
            cockpit: CockpitType::TorsoMounted,
            ..LayoutOptions::default()
        };
        let result = standard_slots(Archetype::Biped, Location::CenterTorso, options);
        assert!(matches!(result, Err(RulesError::CapacityExceeded { .. })));
    }

    #[test]
    fn test_leg_actuators() {
        let slots = standard_slots(Archetype::Quad, Location::FrontLeftLeg, LayoutOptions::default()).unwrap();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].system_kind(), Some(SystemKind::Actuator(Actuator::Hip)));
        assert_eq!(slots[3].system_kind(), Some(SystemKind::Actuator(Actuator::Foot)));
    }

    #[test]
    fn test_wrong_location() {
        let result = standard_slots(Archetype::Biped, Location::Nose, LayoutOptions::default());
        assert!(matches!(result, Err(RulesError::LocationNotOnChassis(Location::Nose))));
    }

    #[test]
    fn test_aero_and_proto() {
        let nose = standard_slots(Archetype::Fighter, Location::Nose, LayoutOptions::default()).unwrap();
        assert_eq!(nose.len(), 25);
        assert!(nose.iter().all(CriticalSlot::is_empty));
        let torso = standard_slots(Archetype::ProtoMek, Location::Torso, LayoutOptions::default()).unwrap();
        assert_eq!(torso.len(), 3);
        assert!(torso.iter().all(|s| s.system_kind() == Some(SystemKind::ProtoSystem)));
    }
}
