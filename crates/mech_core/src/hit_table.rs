//! Hit-location tables.
//!
//! One [`LocationTable`] implementation per archetype family maps a table,
//! an attack side and a dice roll to a [`TableEntry`]. The generic resolver
//! in [`crate::resolver`] does everything else.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::error::RulesError;
use crate::location::{Location, Side};

/// Which hit table an attack uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HitTable {
    /// Standard 2d6 table.
    #[default]
    Normal,
    /// Punch table (1d6).
    Punch,
    /// Kick table (1d6).
    Kick,
    /// Swarm attack by battle armor (2d6, hits roll criticals).
    Swarm,
    /// Swarm attack by conventional infantry (2d6, no critical effect).
    SwarmConventional,
    /// Attack from above (1d6).
    Above,
    /// Attack from below (1d6).
    Below,
}

impl HitTable {
    /// Every table.
    pub const ALL: [HitTable; 7] = [
        Self::Normal,
        Self::Punch,
        Self::Kick,
        Self::Swarm,
        Self::SwarmConventional,
        Self::Above,
        Self::Below,
    ];

    /// Is this rolled on a single die?
    #[must_use]
    pub const fn uses_single_die(self) -> bool {
        matches!(self, Self::Punch | Self::Kick | Self::Above | Self::Below)
    }

    /// Lowest and highest possible roll.
    #[must_use]
    pub const fn roll_range(self) -> (u8, u8) {
        if self.uses_single_die() {
            (1, 6)
        } else {
            (2, 12)
        }
    }

    /// Is this a swarm table?
    #[must_use]
    pub const fn is_swarm(self) -> bool {
        matches!(self, Self::Swarm | Self::SwarmConventional)
    }
}

impl TryFrom<u8> for HitTable {
    type Error = RulesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(RulesError::InvalidTable(value))
    }
}

/// Critical effect an aerospace hit may cause if the critical check passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AeroCrit {
    /// No critical effect.
    #[default]
    None,
    /// Crew hit.
    Crew,
    /// Weapon in the arc destroyed.
    Weapon,
    /// Sensor hit.
    Sensors,
    /// Avionics hit.
    Avionics,
    /// Fire control system hit.
    Fcs,
    /// Combat information center hit (large craft).
    Cic,
    /// Engine hit.
    Engine,
    /// Fuel tank hit.
    FuelTank,
    /// Landing gear hit.
    LandingGear,
    /// Left thruster hit.
    LeftThruster,
    /// Right thruster hit.
    RightThruster,
    /// Heat sink destroyed.
    HeatSink,
    /// Life support hit.
    LifeSupport,
}

/// One resolved table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Location struck.
    pub location: Location,
    /// Strikes rear armor.
    pub rear: bool,
    /// Aerospace potential critical.
    pub potential_crit: AeroCrit,
    /// Possible through-armor critical.
    pub tac: bool,
}

impl Entry {
    /// A plain hit on a location.
    #[must_use]
    pub const fn at(location: Location) -> Self {
        Self {
            location,
            rear: false,
            potential_crit: AeroCrit::None,
            tac: false,
        }
    }

    const fn rear(location: Location) -> Self {
        Self {
            rear: true,
            ..Self::at(location)
        }
    }

    const fn tac(location: Location) -> Self {
        Self {
            tac: true,
            ..Self::at(location)
        }
    }

    const fn crit(location: Location, potential_crit: AeroCrit) -> Self {
        Self {
            potential_crit,
            ..Self::at(location)
        }
    }
}

/// A table cell: one location, or a tie broken by a second 1d6
/// (1-3 picks the first candidate, 4-6 the second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableEntry {
    /// A single location.
    Single(Entry),
    /// Two candidates.
    Tie(Entry, Entry),
}

/// Per-archetype hit tables.
pub trait LocationTable: Sync {
    /// The table actually rolled. Tables the archetype does not define fall
    /// back to its normal table.
    fn effective_table(&self, table: HitTable) -> HitTable;

    /// Look up a roll. `table` must be an effective table.
    fn entry(&self, table: HitTable, side: Side, roll: u8) -> TableEntry;
}

/// Location tables for an archetype.
#[must_use]
pub fn table_for(archetype: Archetype) -> &'static dyn LocationTable {
    static BIPED: BipedTable = BipedTable;
    static QUAD: QuadTable = QuadTable;
    static AERO: AeroTable = AeroTable { large_craft: false };
    static LARGE_CRAFT: AeroTable = AeroTable { large_craft: true };
    static PROTO: ProtoTable = ProtoTable;
    match archetype {
        Archetype::Biped => &BIPED,
        Archetype::Quad => &QUAD,
        Archetype::Fighter | Archetype::SmallCraft => &AERO,
        Archetype::LargeCraft => &LARGE_CRAFT,
        Archetype::ProtoMek => &PROTO,
    }
}

/// Fallback for a roll the dice cannot produce. Debug builds fail instead.
fn off_table<T>(roll: u8, fallback: T) -> T {
    if cfg!(debug_assertions) {
        panic!("roll {roll} is off the hit table");
    }
    fallback
}

fn single(entry: Entry) -> TableEntry {
    TableEntry::Single(entry)
}

// ========================================
// Biped
// ========================================

/// Biped Mek tables.
#[derive(Debug, Clone, Copy)]
pub struct BipedTable;

impl BipedTable {
    fn normal(side: Side, roll: u8) -> Entry {
        use Location::{
            CenterTorso as CT, Head, LeftArm as LA, LeftLeg as LL, LeftTorso as LT,
            RightArm as RA, RightLeg as RL, RightTorso as RT,
        };
        match side {
            Side::Front | Side::Rear => match roll {
                2 => Entry::tac(CT),
                3 | 4 => Entry::at(RA),
                5 => Entry::at(RL),
                6 => Entry::at(RT),
                7 => Entry::at(CT),
                8 => Entry::at(LT),
                9 => Entry::at(LL),
                10 | 11 => Entry::at(LA),
                12 => Entry::at(Head),
                _ => off_table(roll, Entry::at(Head)),
            },
            Side::Left => match roll {
                2 => Entry::tac(LT),
                3 | 6 => Entry::at(LL),
                4 | 5 => Entry::at(LA),
                7 => Entry::at(LT),
                8 => Entry::at(CT),
                9 => Entry::at(RT),
                10 => Entry::at(RA),
                11 => Entry::at(RL),
                12 => Entry::at(Head),
                _ => off_table(roll, Entry::at(Head)),
            },
            Side::Right => match roll {
                2 => Entry::tac(RT),
                3 | 6 => Entry::at(RL),
                4 | 5 => Entry::at(RA),
                7 => Entry::at(RT),
                8 => Entry::at(CT),
                9 => Entry::at(LT),
                10 => Entry::at(LA),
                11 => Entry::at(LL),
                12 => Entry::at(Head),
                _ => off_table(roll, Entry::at(Head)),
            },
        }
    }

    fn punch(side: Side, roll: u8) -> Entry {
        use Location::{CenterTorso, Head, LeftArm, LeftTorso, RightArm, RightTorso};
        let location = match side {
            Side::Front | Side::Rear => match roll {
                1 => LeftArm,
                2 => LeftTorso,
                3 => CenterTorso,
                4 => RightTorso,
                5 => RightArm,
                6 => Head,
                _ => off_table(roll, Head),
            },
            Side::Left => match roll {
                1 | 2 => LeftTorso,
                3 => CenterTorso,
                4 | 5 => LeftArm,
                6 => Head,
                _ => off_table(roll, Head),
            },
            Side::Right => match roll {
                1 | 2 => RightTorso,
                3 => CenterTorso,
                4 | 5 => RightArm,
                6 => Head,
                _ => off_table(roll, Head),
            },
        };
        Entry::at(location)
    }

    fn kick(side: Side, roll: u8) -> Entry {
        let location = match side {
            Side::Front | Side::Rear => match roll {
                1..=3 => Location::RightLeg,
                4..=6 => Location::LeftLeg,
                _ => off_table(roll, Location::LeftLeg),
            },
            Side::Left => Location::LeftLeg,
            Side::Right => Location::RightLeg,
        };
        Entry::at(location)
    }

    fn above(roll: u8) -> TableEntry {
        match roll {
            1 => single(Entry::at(Location::LeftArm)),
            2 => single(Entry::at(Location::LeftTorso)),
            3 | 4 => TableEntry::Tie(Entry::at(Location::CenterTorso), Entry::at(Location::Head)),
            5 => single(Entry::at(Location::RightTorso)),
            6 => single(Entry::at(Location::RightArm)),
            _ => off_table(roll, single(Entry::at(Location::RightArm))),
        }
    }

    fn below(roll: u8) -> TableEntry {
        match roll {
            1 | 2 => single(Entry::at(Location::LeftLeg)),
            3 => TableEntry::Tie(Entry::at(Location::LeftLeg), Entry::at(Location::LeftTorso)),
            4 => TableEntry::Tie(Entry::at(Location::RightLeg), Entry::at(Location::RightTorso)),
            5 | 6 => single(Entry::at(Location::RightLeg)),
            _ => off_table(roll, single(Entry::at(Location::RightLeg))),
        }
    }

    fn swarm(roll: u8) -> Entry {
        use Location::{CenterTorso, Head, LeftArm, LeftTorso, RightArm, RightTorso};
        match roll {
            3 => Entry::rear(CenterTorso),
            4 => Entry::rear(RightTorso),
            5 => Entry::at(RightTorso),
            6 => Entry::at(RightArm),
            7 => Entry::at(CenterTorso),
            8 => Entry::at(LeftArm),
            9 => Entry::at(LeftTorso),
            10 => Entry::rear(LeftTorso),
            11 => Entry::rear(CenterTorso),
            2 | 12 => Entry::at(Head),
            _ => off_table(roll, Entry::at(Head)),
        }
    }
}

impl LocationTable for BipedTable {
    fn effective_table(&self, table: HitTable) -> HitTable {
        table
    }

    fn entry(&self, table: HitTable, side: Side, roll: u8) -> TableEntry {
        match table {
            HitTable::Normal => single(Self::normal(side, roll)),
            HitTable::Punch => single(Self::punch(side, roll)),
            HitTable::Kick => single(Self::kick(side, roll)),
            HitTable::Swarm | HitTable::SwarmConventional => single(Self::swarm(roll)),
            HitTable::Above => Self::above(roll),
            HitTable::Below => Self::below(roll),
        }
    }
}

// ========================================
// Quad
// ========================================

/// Quad Mek tables: the biped tables with limbs mapped to legs.
#[derive(Debug, Clone, Copy)]
pub struct QuadTable;

impl QuadTable {
    fn map_limb(side: Side, location: Location) -> Location {
        let rear = side == Side::Rear;
        match location {
            Location::LeftArm if rear => Location::RearLeftLeg,
            Location::RightArm if rear => Location::RearRightLeg,
            Location::LeftLeg if rear => Location::FrontLeftLeg,
            Location::RightLeg if rear => Location::FrontRightLeg,
            Location::LeftArm => Location::FrontLeftLeg,
            Location::RightArm => Location::FrontRightLeg,
            Location::LeftLeg => Location::RearLeftLeg,
            Location::RightLeg => Location::RearRightLeg,
            other => other,
        }
    }

    fn map(side: Side, entry: TableEntry) -> TableEntry {
        let remap = |e: Entry| Entry {
            location: Self::map_limb(side, e.location),
            ..e
        };
        match entry {
            TableEntry::Single(e) => TableEntry::Single(remap(e)),
            TableEntry::Tie(a, b) => TableEntry::Tie(remap(a), remap(b)),
        }
    }

    fn kick(side: Side, roll: u8) -> Entry {
        let low = match roll {
            1..=3 => true,
            4..=6 => false,
            _ => off_table(roll, false),
        };
        let location = match (side, low) {
            (Side::Front, true) => Location::FrontRightLeg,
            (Side::Front, false) => Location::FrontLeftLeg,
            (Side::Rear, true) => Location::RearRightLeg,
            (Side::Rear, false) => Location::RearLeftLeg,
            (Side::Left, true) => Location::FrontLeftLeg,
            (Side::Left, false) => Location::RearLeftLeg,
            (Side::Right, true) => Location::FrontRightLeg,
            (Side::Right, false) => Location::RearRightLeg,
        };
        Entry::at(location)
    }
}

impl LocationTable for QuadTable {
    fn effective_table(&self, table: HitTable) -> HitTable {
        table
    }

    fn entry(&self, table: HitTable, side: Side, roll: u8) -> TableEntry {
        match table {
            HitTable::Kick => single(Self::kick(side, roll)),
            _ => Self::map(side, BipedTable.entry(table, side, roll)),
        }
    }
}

// ========================================
// Aerospace
// ========================================

/// Aerospace tables. Large craft read fire control hits as CIC hits.
#[derive(Debug, Clone, Copy)]
pub struct AeroTable {
    /// Use CIC instead of FCS.
    pub large_craft: bool,
}

impl AeroTable {
    fn normal(side: Side, roll: u8) -> Entry {
        use AeroCrit as C;
        use Location::{Aft, LeftWing as LW, Nose, RightWing as RW};
        match side {
            Side::Front => match roll {
                2 => Entry::crit(Nose, C::Crew),
                3 => Entry::crit(Nose, C::Weapon),
                4 => Entry::crit(RW, C::Sensors),
                5 => Entry::crit(RW, C::None),
                6 => Entry::crit(Nose, C::Avionics),
                7 => Entry::crit(Nose, C::None),
                8 => Entry::crit(Nose, C::Fcs),
                9 => Entry::crit(LW, C::None),
                10 => Entry::crit(LW, C::Sensors),
                11 => Entry::crit(Nose, C::Weapon),
                12 => Entry {
                    tac: true,
                    ..Entry::crit(Nose, C::Crew)
                },
                _ => off_table(roll, Entry::crit(Nose, C::None)),
            },
            Side::Left => match roll {
                2 => Entry::crit(Nose, C::Crew),
                3 | 8 => Entry::crit(LW, C::Weapon),
                4 => Entry::crit(LW, C::LandingGear),
                5 => Entry::crit(LW, C::Avionics),
                6 | 7 => Entry::crit(LW, C::None),
                9 => Entry::crit(LW, C::LeftThruster),
                11 => Entry::crit(LW, C::FuelTank),
                10 | 12 => Entry::crit(Aft, C::Engine),
                _ => off_table(roll, Entry::crit(LW, C::None)),
            },
            Side::Right => match roll {
                2 => Entry::crit(Nose, C::Crew),
                3 | 8 => Entry::crit(RW, C::Weapon),
                4 => Entry::crit(RW, C::LandingGear),
                5 => Entry::crit(RW, C::Avionics),
                6 | 7 => Entry::crit(RW, C::None),
                9 => Entry::crit(RW, C::RightThruster),
                11 => Entry::crit(RW, C::FuelTank),
                10 | 12 => Entry::crit(Aft, C::Engine),
                _ => off_table(roll, Entry::crit(RW, C::None)),
            },
            Side::Rear => match roll {
                2 | 6 => Entry::crit(Aft, C::Engine),
                3 => Entry::crit(Aft, C::Weapon),
                4 => Entry::crit(RW, C::RightThruster),
                5 => Entry::crit(RW, C::FuelTank),
                7 => Entry::crit(Aft, C::None),
                8 => Entry::crit(Aft, C::FuelTank),
                9 => Entry::crit(LW, C::LeftThruster),
                10 => Entry::crit(LW, C::None),
                11 => Entry::crit(Aft, C::HeatSink),
                12 => Entry {
                    tac: true,
                    ..Entry::crit(Aft, C::Engine)
                },
                _ => off_table(roll, Entry::crit(Aft, C::None)),
            },
        }
    }

    fn above_below(roll: u8) -> TableEntry {
        match roll {
            1 | 2 => single(Entry::at(Location::Nose)),
            3..=5 => TableEntry::Tie(Entry::at(Location::LeftWing), Entry::at(Location::RightWing)),
            6 => single(Entry::at(Location::Aft)),
            _ => off_table(roll, single(Entry::at(Location::Aft))),
        }
    }
}

impl LocationTable for AeroTable {
    fn effective_table(&self, table: HitTable) -> HitTable {
        match table {
            HitTable::Above | HitTable::Below => table,
            _ => HitTable::Normal,
        }
    }

    fn entry(&self, table: HitTable, side: Side, roll: u8) -> TableEntry {
        match table {
            HitTable::Above | HitTable::Below => Self::above_below(roll),
            _ => {
                let mut entry = Self::normal(side, roll);
                if self.large_craft && entry.potential_crit == AeroCrit::Fcs {
                    entry.potential_crit = AeroCrit::Cic;
                }
                single(entry)
            }
        }
    }
}

// ========================================
// ProtoMek
// ========================================

/// ProtoMek tables. No through-armor criticals, no rear armor.
#[derive(Debug, Clone, Copy)]
pub struct ProtoTable;

impl ProtoTable {
    fn normal(side: Side, roll: u8) -> Location {
        use Location::{Head, LeftArm as LA, Legs, MainGun, RightArm as RA, Torso};
        match side {
            Side::Front | Side::Rear => match roll {
                2 => MainGun,
                3 | 5 => LA,
                4 | 6 | 8 | 10 => Legs,
                7 => Torso,
                9 | 11 => RA,
                12 => Head,
                _ => off_table(roll, Head),
            },
            Side::Left => match roll {
                2 => MainGun,
                3 | 6 | 10 => Legs,
                4 | 5 | 11 => LA,
                7 | 8 => Torso,
                9 => RA,
                12 => Head,
                _ => off_table(roll, Head),
            },
            Side::Right => match roll {
                2 => MainGun,
                3 | 6 | 10 => Legs,
                4 | 5 | 11 => RA,
                7 | 8 => Torso,
                9 => LA,
                12 => Head,
                _ => off_table(roll, Head),
            },
        }
    }

    fn punch(roll: u8) -> Location {
        match roll {
            1 => Location::LeftArm,
            2 | 3 => Location::Torso,
            4 => Location::RightArm,
            5 => Location::MainGun,
            6 => Location::Head,
            _ => off_table(roll, Location::Head),
        }
    }

    fn below(roll: u8) -> TableEntry {
        match roll {
            1..=4 => single(Entry::at(Location::Legs)),
            5 => TableEntry::Tie(Entry::at(Location::LeftArm), Entry::at(Location::RightArm)),
            6 => single(Entry::at(Location::Torso)),
            _ => off_table(roll, single(Entry::at(Location::Torso))),
        }
    }
}

impl LocationTable for ProtoTable {
    fn effective_table(&self, table: HitTable) -> HitTable {
        match table {
            HitTable::Swarm | HitTable::SwarmConventional => HitTable::Normal,
            other => other,
        }
    }

    fn entry(&self, table: HitTable, side: Side, roll: u8) -> TableEntry {
        match table {
            HitTable::Punch | HitTable::Above => single(Entry::at(Self::punch(roll))),
            HitTable::Kick => single(Entry::at(Location::Legs)),
            HitTable::Below => Self::below(roll),
            _ => single(Entry::at(Self::normal(side, roll))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(archetype: Archetype, table: HitTable, side: Side, roll: u8) -> Location {
        match table_for(archetype).entry(table, side, roll) {
            TableEntry::Single(e) => e.location,
            TableEntry::Tie(a, _) => a.location,
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the hit table")]
    fn test_off_table_roll_fails() {
        let _ = table_for(Archetype::Biped).entry(HitTable::Normal, Side::Front, 13);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the hit table")]
    fn test_zero_on_single_die_table_fails() {
        let _ = table_for(Archetype::ProtoMek).entry(HitTable::Punch, Side::Front, 0);
    }

    #[test]
    fn test_table_from_raw() {
        assert_eq!(HitTable::try_from(0).unwrap(), HitTable::Normal);
        assert_eq!(HitTable::try_from(6).unwrap(), HitTable::Below);
        assert!(matches!(HitTable::try_from(7), Err(RulesError::InvalidTable(7))));
    }

    #[test]
    fn test_biped_front_column() {
        let expected = [
            (2, Location::CenterTorso),
            (3, Location::RightArm),
            (5, Location::RightLeg),
            (8, Location::LeftTorso),
            (10, Location::LeftArm),
            (12, Location::Head),
        ];
        for (roll, loc) in expected {
            assert_eq!(location(Archetype::Biped, HitTable::Normal, Side::Front, roll), loc);
        }
    }

    #[test]
    fn test_biped_tac_only_on_two() {
        for side in Side::ALL {
            for roll in 2..=12 {
                let TableEntry::Single(entry) = BipedTable.entry(HitTable::Normal, side, roll) else {
                    panic!("normal table has no ties");
                };
                assert_eq!(entry.tac, roll == 2, "{side:?} {roll}");
            }
        }
    }

    #[test]
    fn test_swarm_rear_flags() {
        let TableEntry::Single(entry) = BipedTable.entry(HitTable::Swarm, Side::Left, 10) else {
            panic!("swarm table has no ties");
        };
        assert_eq!(entry.location, Location::LeftTorso);
        assert!(entry.rear);
    }

    #[test]
    fn test_quad_mapping() {
        assert_eq!(
            location(Archetype::Quad, HitTable::Normal, Side::Front, 10),
            Location::FrontLeftLeg
        );
        assert_eq!(
            location(Archetype::Quad, HitTable::Normal, Side::Rear, 10),
            Location::RearLeftLeg
        );
        assert_eq!(
            location(Archetype::Quad, HitTable::Normal, Side::Rear, 9),
            Location::FrontLeftLeg
        );
        assert_eq!(
            location(Archetype::Quad, HitTable::Kick, Side::Left, 5),
            Location::RearLeftLeg
        );
    }

    #[test]
    fn test_aero_large_craft_cic() {
        let TableEntry::Single(entry) = table_for(Archetype::LargeCraft).entry(HitTable::Normal, Side::Front, 8) else {
            panic!("normal table has no ties");
        };
        assert_eq!(entry.potential_crit, AeroCrit::Cic);
        let TableEntry::Single(entry) = table_for(Archetype::Fighter).entry(HitTable::Normal, Side::Front, 8) else {
            panic!("normal table has no ties");
        };
        assert_eq!(entry.potential_crit, AeroCrit::Fcs);
    }

    #[test]
    fn test_aero_tac_on_twelve_front_and_rear() {
        let table = table_for(Archetype::Fighter);
        for side in Side::ALL {
            let TableEntry::Single(entry) = table.entry(HitTable::Normal, side, 12) else {
                panic!("normal table has no ties");
            };
            assert_eq!(entry.tac, matches!(side, Side::Front | Side::Rear));
        }
    }

    #[test]
    fn test_fallback_to_normal() {
        assert_eq!(table_for(Archetype::Fighter).effective_table(HitTable::Punch), HitTable::Normal);
        assert_eq!(table_for(Archetype::ProtoMek).effective_table(HitTable::Swarm), HitTable::Normal);
        assert_eq!(table_for(Archetype::Biped).effective_table(HitTable::Kick), HitTable::Kick);
    }

    #[test]
    fn test_proto_mirrors() {
        assert_eq!(location(Archetype::ProtoMek, HitTable::Normal, Side::Left, 11), Location::LeftArm);
        assert_eq!(location(Archetype::ProtoMek, HitTable::Normal, Side::Right, 11), Location::RightArm);
        assert_eq!(location(Archetype::ProtoMek, HitTable::Kick, Side::Front, 1), Location::Legs);
    }

    #[test]
    fn test_every_roll_lands_on_a_chassis_location() {
        for archetype in Archetype::ALL {
            let tables = table_for(archetype);
            for table in HitTable::ALL {
                let effective = tables.effective_table(table);
                let (low, high) = effective.roll_range();
                for side in Side::ALL {
                    for roll in low..=high {
                        let candidates = match tables.entry(effective, side, roll) {
                            TableEntry::Single(e) => vec![e],
                            TableEntry::Tie(a, b) => vec![a, b],
                        };
                        for e in candidates {
                            assert!(
                                archetype.has_location(e.location),
                                "{archetype:?} {table:?} {side:?} {roll} -> {:?}",
                                e.location
                            );
                        }
                    }
                }
            }
        }
    }
}
