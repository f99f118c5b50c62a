//! How badly hurt is a unit?
//!
//! Three threshold predicates (light, moderate, heavy) and a separate
//! crippled check. Each predicate reads only its own thresholds; the tables
//! are set so that heavy implies moderate implies light.
//! [`damage_level`] reports the highest step that applies.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::chassis::UnitChassis;
use crate::counters::SystemCounter;
use crate::location::Location;
use crate::math::{percent, ratio, Fixed};
use crate::slot::SystemKind;

/// Coarse damage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum DamageLevel {
    /// Undamaged or scratched.
    #[default]
    None,
    /// Lightly damaged.
    Light,
    /// Moderately damaged.
    Moderate,
    /// Heavily damaged.
    Heavy,
    /// Crippled.
    Crippled,
}

impl DamageLevel {
    /// Lowercase label for reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
            Self::Crippled => "crippled",
        }
    }
}

/// Raw numbers the thresholds are checked against.
#[derive(Debug, Clone, Copy)]
struct Condition {
    armor: Fixed,
    internal: Fixed,
    crew_hits: u8,
    weapons: Fixed,
    all_weapons_out: bool,
}

impl Condition {
    fn of(chassis: &UnitChassis) -> Self {
        let (armor, original_armor) = chassis.locations().iter().fold((0, 0), |(cur, orig), l| {
            (
                cur + l.armor.points() + l.rear_armor.points(),
                orig + l.original_armor + l.original_rear_armor,
            )
        });
        let internal = match chassis.aero() {
            Some(aero) => ratio(aero.structural_integrity, aero.original_structural_integrity),
            None => {
                let (cur, orig) = chassis
                    .locations()
                    .iter()
                    .fold((0, 0), |(cur, orig), l| (cur + l.internal.points(), orig + l.original_internal));
                ratio(cur, orig)
            }
        };

        let (mut weapons, mut inoperable) = (0u32, 0u32);
        if chassis.is_military() {
            for item in chassis.equipment().iter().filter(|e| e.is_weapon()) {
                weapons += 1;
                if !item.is_operable_weapon() {
                    inoperable += 1;
                }
            }
        }

        Self {
            armor: ratio(armor, original_armor),
            internal,
            crew_hits: chassis.crew().hits,
            weapons: if weapons == 0 { Fixed::ZERO } else { ratio(inoperable, weapons) },
            all_weapons_out: weapons > 0 && inoperable == weapons,
        }
    }

    fn at_most(value: Fixed, pct: u32) -> bool {
        value <= percent(pct)
    }

    fn at_least(value: Fixed, pct: u32) -> bool {
        value >= percent(pct)
    }

    /// The armor/internal/crew/weapon part of a threshold.
    fn common(&self, armor: u32, internal: u32, crew: u8, weapons: u32) -> bool {
        Self::at_most(self.armor, armor)
            || Self::at_most(self.internal, internal)
            || self.crew_hits >= crew
            || (self.weapons > Fixed::ZERO && Self::at_least(self.weapons, weapons))
    }
}

fn hits(chassis: &UnitChassis, counter: SystemCounter) -> u8 {
    chassis.counters().get(counter)
}

fn proto_crits(chassis: &UnitChassis, location: Location) -> usize {
    chassis.hits_to_system(SystemKind::ProtoSystem, location)
}

fn crew_out(chassis: &UnitChassis) -> bool {
    let crew = chassis.crew();
    crew.ejected || crew.dead || crew.unconscious || crew.hits >= 4
}

fn aero_computer_hits(chassis: &UnitChassis) -> u8 {
    [
        SystemCounter::Avionics,
        SystemCounter::Fcs,
        SystemCounter::Cic,
        SystemCounter::Sensors,
    ]
    .into_iter()
    .map(|c| hits(chassis, c))
    .max()
    .unwrap_or(0)
}

fn light(chassis: &UnitChassis, c: &Condition) -> bool {
    match chassis.archetype() {
        Archetype::Biped | Archetype::Quad => {
            c.common(75, 90, 1, 25)
                || [
                    SystemCounter::Engine,
                    SystemCounter::Gyro,
                    SystemCounter::Sensors,
                    SystemCounter::LifeSupport,
                ]
                .into_iter()
                .any(|counter| hits(chassis, counter) > 0)
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
            c.common(90, 90, 1, 25) || chassis.counters().total() > 0
        }
        Archetype::ProtoMek => {
            c.common(75, 90, 1, 25)
                || hits(chassis, SystemCounter::Sensors) > 0
                || chassis
                    .archetype()
                    .locations()
                    .iter()
                    .any(|&l| proto_crits(chassis, l) > 0)
        }
    }
}

fn moderate(chassis: &UnitChassis, c: &Condition) -> bool {
    match chassis.archetype() {
        Archetype::Biped | Archetype::Quad => {
            c.common(50, 75, 2, 50)
                || hits(chassis, SystemCounter::Engine) >= 1
                || hits(chassis, SystemCounter::Gyro) >= 1
                || hits(chassis, SystemCounter::Sensors) >= 1
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
            c.common(67, 75, 2, 50)
                || hits(chassis, SystemCounter::Engine) >= 1
                || aero_computer_hits(chassis) >= 2
                || hits(chassis, SystemCounter::FuelTank) >= 1
        }
        Archetype::ProtoMek => {
            c.common(50, 75, 2, 50)
                || proto_crits(chassis, Location::Legs) >= 1
                || hits(chassis, SystemCounter::Sensors) >= 1
        }
    }
}

fn heavy(chassis: &UnitChassis, c: &Condition) -> bool {
    match chassis.archetype() {
        Archetype::Biped | Archetype::Quad => {
            c.common(25, 67, 3, 75)
                || (hits(chassis, SystemCounter::Engine) >= 1 && hits(chassis, SystemCounter::Gyro) >= 1)
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
            c.common(33, 50, 3, 75)
                || hits(chassis, SystemCounter::Engine) >= 2
                || aero_computer_hits(chassis) >= 3
        }
        Archetype::ProtoMek => {
            c.common(25, 50, 3, 75)
                || proto_crits(chassis, Location::Legs) >= 2
                || hits(chassis, SystemCounter::Sensors) >= 2
        }
    }
}

fn crippled(chassis: &UnitChassis, c: &Condition) -> bool {
    if crew_out(chassis) || c.all_weapons_out {
        return true;
    }
    let counters = chassis.counters();
    match chassis.archetype() {
        archetype @ (Archetype::Biped | Archetype::Quad) => {
            let legs_lost = archetype
                .locations()
                .iter()
                .filter(|&&l| archetype.is_leg(l) && chassis.is_location_bad(l))
                .count();
            let legs_crippled = if archetype == Archetype::Biped {
                legs_lost >= 1
            } else {
                legs_lost >= 2
            };
            hits(chassis, SystemCounter::LifeSupport) >= 1
                || hits(chassis, SystemCounter::Engine) >= 2
                || counters.is_maxed(SystemCounter::Gyro)
                || hits(chassis, SystemCounter::Sensors) >= 2
                || chassis.is_location_bad(Location::LeftTorso)
                || chassis.is_location_bad(Location::RightTorso)
                || legs_crippled
        }
        Archetype::Fighter | Archetype::SmallCraft | Archetype::LargeCraft => {
            let out_of_fuel = chassis.aero().is_some_and(|a| a.fuel == 0);
            let fire_control = hits(chassis, SystemCounter::Fcs).max(hits(chassis, SystemCounter::Cic));
            counters.is_maxed(SystemCounter::Engine)
                || hits(chassis, SystemCounter::LifeSupport) >= 1
                || out_of_fuel
                || Condition::at_most(c.internal, 33)
                || (hits(chassis, SystemCounter::Avionics) >= 3 && fire_control >= 3)
        }
        Archetype::ProtoMek => {
            chassis.is_location_bad(Location::Legs)
                || proto_crits(chassis, Location::Legs) >= 3
                || proto_crits(chassis, Location::Torso) >= 2
        }
    }
}

/// Is the unit heavily damaged?
#[must_use]
pub fn is_heavily_damaged(chassis: &UnitChassis) -> bool {
    heavy(chassis, &Condition::of(chassis))
}

/// Is the unit moderately damaged?
#[must_use]
pub fn is_moderately_damaged(chassis: &UnitChassis) -> bool {
    moderate(chassis, &Condition::of(chassis))
}

/// Is the unit lightly damaged?
#[must_use]
pub fn is_lightly_damaged(chassis: &UnitChassis) -> bool {
    light(chassis, &Condition::of(chassis))
}

/// Is the unit crippled?
#[must_use]
pub fn is_crippled(chassis: &UnitChassis) -> bool {
    crippled(chassis, &Condition::of(chassis))
}

/// Highest damage level that applies.
#[must_use]
pub fn damage_level(chassis: &UnitChassis) -> DamageLevel {
    let c = Condition::of(chassis);
    if crippled(chassis, &c) {
        DamageLevel::Crippled
    } else if heavy(chassis, &c) {
        DamageLevel::Heavy
    } else if moderate(chassis, &c) {
        DamageLevel::Moderate
    } else if light(chassis, &c) {
        DamageLevel::Light
    } else {
        DamageLevel::None
    }
}
