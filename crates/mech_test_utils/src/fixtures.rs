//! Test fixtures and helpers.
//!
//! Standard chassis for every archetype and battlefield setups for
//! consistent testing.

use mech_core::critical::{apply_aero_critical, apply_mek_critical, apply_proto_critical};
use mech_core::prelude::*;

// ============================================================================
// Chassis definitions
// ============================================================================

fn weapon(name: &str, location: Location, slots: usize) -> EquipmentData {
    EquipmentData::new(name, EquipmentKind::Weapon, location, slots)
}

fn sinks(count: usize, location: Location) -> impl Iterator<Item = EquipmentData> {
    (0..count).map(move |_| {
        EquipmentData::new("Heat Sink", EquipmentKind::HeatSink { double: false }, location, 1)
    })
}

/// A 50-ton biped: AC/20 in the right torso, lasers in the arms and head,
/// ten single heat sinks. Walks 4.
#[must_use]
pub fn biped_data() -> ChassisData {
    let mut data = ChassisData::new("Hunchback HBK-4G", Archetype::Biped, 50);
    data.walk_mp = 4;
    data.locations = vec![
        LocationData::new(Location::Head, 9),
        LocationData::new(Location::CenterTorso, 26).with_rear(5),
        LocationData::new(Location::RightTorso, 20).with_rear(4),
        LocationData::new(Location::LeftTorso, 20).with_rear(4),
        LocationData::new(Location::RightArm, 16),
        LocationData::new(Location::LeftArm, 16),
        LocationData::new(Location::RightLeg, 20),
        LocationData::new(Location::LeftLeg, 20),
    ];
    data.equipment = vec![
        weapon("AC/20", Location::RightTorso, 10),
        EquipmentData::new("AC/20 Ammo", EquipmentKind::Ammo, Location::RightTorso, 2),
        weapon("Medium Laser", Location::RightArm, 1),
        weapon("Medium Laser", Location::LeftArm, 1),
        weapon("Small Laser", Location::Head, 1),
    ];
    data.equipment.extend(sinks(4, Location::LeftTorso));
    data.equipment.extend(sinks(2, Location::CenterTorso));
    data.equipment.extend(sinks(2, Location::LeftLeg));
    data.equipment.extend(sinks(2, Location::RightLeg));
    data
}

/// A 55-ton quad with a PPC and jump jets. Walks 5, jumps 3.
#[must_use]
pub fn quad_data() -> ChassisData {
    let mut data = ChassisData::new("Scorpion SCP-1N", Archetype::Quad, 55);
    data.walk_mp = 5;
    data.jump_mp = 3;
    data.locations = vec![
        LocationData::new(Location::Head, 9),
        LocationData::new(Location::CenterTorso, 22).with_rear(6),
        LocationData::new(Location::RightTorso, 16).with_rear(4),
        LocationData::new(Location::LeftTorso, 16).with_rear(4),
        LocationData::new(Location::FrontRightLeg, 16),
        LocationData::new(Location::FrontLeftLeg, 16),
        LocationData::new(Location::RearRightLeg, 16),
        LocationData::new(Location::RearLeftLeg, 16),
    ];
    data.equipment = vec![
        weapon("PPC", Location::RightTorso, 3),
        weapon("Machine Gun", Location::CenterTorso, 1),
        EquipmentData::new("Jump Jet", EquipmentKind::JumpJet, Location::RearLeftLeg, 1),
        EquipmentData::new("Jump Jet", EquipmentKind::JumpJet, Location::RearRightLeg, 1),
        EquipmentData::new("Jump Jet", EquipmentKind::JumpJet, Location::CenterTorso, 1),
    ];
    data.equipment.extend(sinks(6, Location::LeftTorso));
    data.equipment.extend(sinks(4, Location::RightTorso));
    data
}

/// A 25-ton aerodyne fighter. Safe thrust 7.
#[must_use]
pub fn fighter_data() -> ChassisData {
    let mut data = ChassisData::new("Sabre SB-27", Archetype::Fighter, 25);
    data.walk_mp = 7;
    data.aero = Some(AeroData::default());
    data.locations = vec![
        LocationData::new(Location::Nose, 12),
        LocationData::new(Location::RightWing, 10),
        LocationData::new(Location::LeftWing, 10),
        LocationData::new(Location::Aft, 8),
    ];
    data.equipment = vec![
        weapon("Medium Laser", Location::Nose, 1),
        weapon("Medium Laser", Location::RightWing, 1),
        weapon("Medium Laser", Location::LeftWing, 1),
    ];
    data.equipment.extend(sinks(10, Location::Fuselage));
    data
}

/// A 200-ton aerodyne small craft. Safe thrust 4.
#[must_use]
pub fn small_craft_data() -> ChassisData {
    let mut data = ChassisData::new("Arrow Assault Craft", Archetype::SmallCraft, 200);
    data.walk_mp = 4;
    data.aero = Some(AeroData {
        fuel: 600,
        ..AeroData::default()
    });
    data.locations = vec![
        LocationData::new(Location::Nose, 60),
        LocationData::new(Location::RightWing, 50),
        LocationData::new(Location::LeftWing, 50),
        LocationData::new(Location::Aft, 40),
    ];
    data.equipment = vec![
        weapon("Large Laser", Location::Nose, 2),
        weapon("LRM-10", Location::RightWing, 2),
        weapon("LRM-10", Location::LeftWing, 2),
    ];
    data.equipment.extend(sinks(12, Location::Fuselage));
    data
}

/// A 3500-ton spheroid DropShip. Safe thrust 3.
#[must_use]
pub fn large_craft_data() -> ChassisData {
    let mut data = ChassisData::new("Union DropShip", Archetype::LargeCraft, 3500);
    data.walk_mp = 3;
    data.aero = Some(AeroData {
        hull: HullShape::Spheroid,
        airborne: true,
        structural_integrity: Some(9),
        fuel: 1000,
    });
    data.locations = vec![
        LocationData::new(Location::Nose, 120),
        LocationData::new(Location::RightWing, 100),
        LocationData::new(Location::LeftWing, 100),
        LocationData::new(Location::Aft, 80),
    ];
    data.equipment = vec![
        weapon("PPC", Location::Nose, 3),
        weapon("AC/5", Location::RightWing, 4),
        weapon("AC/5", Location::LeftWing, 4),
        weapon("Large Laser", Location::Aft, 2),
    ];
    data.equipment.extend(sinks(20, Location::Fuselage));
    data
}

/// A 5-ton ProtoMek with a main gun. Walks 5, jumps 5.
#[must_use]
pub fn proto_data() -> ChassisData {
    let mut data = ChassisData::new("Roc", Archetype::ProtoMek, 5);
    data.walk_mp = 5;
    data.jump_mp = 5;
    data.main_gun = true;
    data.locations = vec![
        LocationData::new(Location::Head, 2),
        LocationData::new(Location::Torso, 8),
        LocationData::new(Location::RightArm, 3),
        LocationData::new(Location::LeftArm, 3),
        LocationData::new(Location::Legs, 6),
        LocationData::new(Location::MainGun, 3),
    ];
    data.equipment = vec![
        weapon("ER Small Laser", Location::RightArm, 1),
        weapon("ER Small Laser", Location::LeftArm, 1),
        weapon("Plasma Rifle", Location::MainGun, 1),
    ];
    data
}

/// Standard definition for an archetype.
#[must_use]
pub fn standard_data(archetype: Archetype) -> ChassisData {
    match archetype {
        Archetype::Biped => biped_data(),
        Archetype::Quad => quad_data(),
        Archetype::Fighter => fighter_data(),
        Archetype::SmallCraft => small_craft_data(),
        Archetype::LargeCraft => large_craft_data(),
        Archetype::ProtoMek => proto_data(),
    }
}

// ============================================================================
// Built chassis
// ============================================================================

/// Build a chassis from a definition.
///
/// # Panics
///
/// Panics if the definition is invalid.
#[must_use]
pub fn build(data: &ChassisData) -> UnitChassis {
    UnitChassis::from_data(data).unwrap_or_else(|e| panic!("fixture {} is invalid: {e}", data.name))
}

/// The standard 50-ton biped.
#[must_use]
pub fn biped() -> UnitChassis {
    build(&biped_data())
}

/// The standard fighter.
#[must_use]
pub fn fighter() -> UnitChassis {
    build(&fighter_data())
}

/// The standard ProtoMek.
#[must_use]
pub fn proto() -> UnitChassis {
    build(&proto_data())
}

/// Standard chassis for an archetype.
#[must_use]
pub fn standard(archetype: Archetype) -> UnitChassis {
    build(&standard_data(archetype))
}

/// One standard chassis per archetype.
#[must_use]
pub fn all_standard() -> Vec<UnitChassis> {
    Archetype::ALL.iter().map(|&a| standard(a)).collect()
}

// ============================================================================
// Damage helpers
// ============================================================================

/// Put `hits` engine criticals on a unit.
///
/// Meks take them in the center torso engine slots and aerospace units as
/// engine criticals. A ProtoMek engine hit is three torso criticals. Hits
/// past the unit's cap are dropped.
pub fn hit_engine(chassis: &mut UnitChassis, hits: u8) {
    let mut report = DamageReport::default();
    for _ in 0..hits {
        if chassis.counters().is_maxed(SystemCounter::Engine) {
            break;
        }
        match chassis.archetype() {
            Archetype::Biped | Archetype::Quad => {
                // Block 1, slots 1..=3 of the center torso hold the front
                // engine slots; earlier hits took the lower ones.
                let next = chassis.counters().get(SystemCounter::Engine) + 1;
                let mut dice = ScriptedDice::new(&[1, next]);
                apply_mek_critical(chassis, Location::CenterTorso, &mut dice, &mut report);
            }
            Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
                apply_aero_critical(chassis, AeroCrit::Engine, Location::Nose, &mut report);
            }
            Archetype::ProtoMek => {
                // The third torso critical takes the engine.
                for _ in 0..3 {
                    apply_proto_critical(chassis, Location::Torso, &mut report);
                }
            }
        }
    }
}

/// Strip armor with direct hits until no more than `percent` of the total
/// remains.
///
/// Damage goes to one location at a time, head last, and never reaches
/// internal structure.
///
/// # Panics
///
/// Panics for aerospace units, whose heavy hits roll for criticals.
pub fn strip_armor_to(chassis: &mut UnitChassis, percent: u32) {
    assert!(
        !chassis.archetype().is_aero(),
        "strip_armor_to only handles ground units"
    );
    let field = Battlefield::new();
    let total: u32 = chassis
        .locations()
        .iter()
        .map(|l| chassis.original_armor(l.location, false) + chassis.original_armor(l.location, true))
        .sum();
    let keep = total * percent / 100;
    let mut remaining = total;
    let mut dice = ScriptedDice::default();

    let mut targets: Vec<(Location, bool)> = chassis
        .locations()
        .iter()
        .flat_map(|l| [(l.location, false), (l.location, true)])
        .collect();
    targets.sort_by_key(|&(location, _)| location == Location::Head);
    for (location, rear) in targets {
        if remaining <= keep {
            break;
        }
        let amount = chassis.armor(location, rear).min(remaining - keep);
        if amount == 0 {
            continue;
        }
        let mut hit = HitData::at(location);
        if rear {
            hit = hit.from_rear();
        }
        apply_damage(chassis, &hit, amount, &field.ctx(), &mut dice);
        remaining -= amount;
    }
    chassis.end_phase();
}

// ============================================================================
// Battlefield
// ============================================================================

/// Game options and planetary conditions for one test.
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    /// Game options.
    pub options: GameOptions,
    /// Planetary conditions.
    pub conditions: PlanetaryConditions,
}

impl Battlefield {
    /// Default options under standard conditions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn on a named option.
    ///
    /// # Panics
    ///
    /// Panics on an unknown option name.
    #[must_use]
    pub fn with_option(mut self, name: &str) -> Self {
        self.options
            .set(name, true)
            .unwrap_or_else(|e| panic!("bad fixture option: {e}"));
        self
    }

    /// Set gravity in hundredths of a g.
    #[must_use]
    pub fn with_gravity(mut self, percent: u32) -> Self {
        self.conditions.gravity_percent = percent;
        self
    }

    /// Set the atmosphere.
    #[must_use]
    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.conditions.atmosphere = atmosphere;
        self
    }

    /// Set the weather.
    #[must_use]
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.conditions.weather = weather;
        self
    }

    /// Borrow as a rules context.
    #[must_use]
    pub fn ctx(&self) -> RulesContext<'_> {
        RulesContext::new(&self.options, &self.conditions)
    }
}
