//! Chassis definitions loaded from RON.

use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, CockpitType, EngineType, GyroType, HullShape};
use crate::crew::EdgeTriggers;
use crate::equipment::EquipmentKind;
use crate::error::{Result, RulesError};
use crate::location::Location;

fn default_true() -> bool {
    true
}

fn default_slots() -> usize {
    1
}

/// Armor and structure for one location.
///
/// Locations missing from a chassis definition get zero armor and the
/// standard internal structure for the tonnage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationData {
    /// Location.
    pub location: Location,
    /// Front armor points.
    pub armor: u32,
    /// Rear armor points (torsos only).
    #[serde(default)]
    pub rear_armor: u32,
    /// Internal structure override. `None` uses the standard value.
    #[serde(default)]
    pub internal: Option<u32>,
}

impl LocationData {
    /// Front armor only.
    #[must_use]
    pub fn new(location: Location, armor: u32) -> Self {
        Self {
            location,
            armor,
            rear_armor: 0,
            internal: None,
        }
    }

    /// Add rear armor.
    #[must_use]
    pub fn with_rear(mut self, rear_armor: u32) -> Self {
        self.rear_armor = rear_armor;
        self
    }

    /// Override internal structure.
    #[must_use]
    pub fn with_internal(mut self, internal: u32) -> Self {
        self.internal = Some(internal);
        self
    }
}

/// One mounted item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EquipmentData {
    /// Display name.
    pub name: String,
    /// Category.
    pub kind: EquipmentKind,
    /// Mount location.
    pub location: Location,
    /// Critical slots occupied.
    #[serde(default = "default_slots")]
    pub slots: usize,
    /// Faces the rear arc.
    #[serde(default)]
    pub rear_mounted: bool,
    /// Armored component.
    #[serde(default)]
    pub armored: bool,
    /// Starts armed (boosters).
    #[serde(default = "default_true")]
    pub armed: bool,
}

impl EquipmentData {
    /// A plain front-facing item.
    #[must_use]
    pub fn new(name: &str, kind: EquipmentKind, location: Location, slots: usize) -> Self {
        Self {
            name: name.to_string(),
            kind,
            location,
            slots,
            rear_mounted: false,
            armored: false,
            armed: true,
        }
    }
}

/// Aerospace-specific construction data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AeroData {
    /// Hull shape.
    #[serde(default)]
    pub hull: HullShape,
    /// Starts in flight.
    #[serde(default = "default_true")]
    pub airborne: bool,
    /// Structural integrity. `None` uses the larger of safe thrust and
    /// tonnage / 10.
    #[serde(default)]
    pub structural_integrity: Option<u32>,
    /// Fuel points.
    pub fuel: u32,
}

impl Default for AeroData {
    fn default() -> Self {
        Self {
            hull: HullShape::Aerodyne,
            airborne: true,
            structural_integrity: None,
            fuel: 400,
        }
    }
}

/// Crew configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CrewData {
    /// Edge points.
    #[serde(default)]
    pub edge: u8,
    /// Which events may spend Edge.
    #[serde(default)]
    pub edge_triggers: EdgeTriggers,
}

/// Data-driven chassis definition.
///
/// # Example RON
///
/// ```ron
/// ChassisData(
///     name: "Hunchback HBK-4G",
///     archetype: Biped,
///     tonnage: 50,
///     walk_mp: 4,
///     jump_mp: 0,
///     locations: [
///         (location: Head, armor: 9),
///         (location: CenterTorso, armor: 26, rear_armor: 5),
///     ],
///     equipment: [
///         (name: "AC/20", kind: Weapon, location: RightTorso, slots: 10),
///         (name: "Heat Sink", kind: HeatSink(double: false), location: LeftLeg),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChassisData {
    /// Unit name.
    pub name: String,
    /// Archetype.
    pub archetype: Archetype,
    /// Weight in tons.
    pub tonnage: u32,
    /// Military unit.
    #[serde(default = "default_true")]
    pub military: bool,
    /// Walk MP, or safe thrust for aerospace units.
    #[serde(default)]
    pub walk_mp: u32,
    /// Jump MP.
    #[serde(default)]
    pub jump_mp: u32,
    /// Engine type (Mek).
    #[serde(default)]
    pub engine: EngineType,
    /// Gyro type (Mek).
    #[serde(default)]
    pub gyro: GyroType,
    /// Cockpit type (Mek).
    #[serde(default)]
    pub cockpit: CockpitType,
    /// Aerospace data; required for aerospace archetypes.
    #[serde(default)]
    pub aero: Option<AeroData>,
    /// ProtoMek main gun mount.
    #[serde(default)]
    pub main_gun: bool,
    /// Per-location armor and structure.
    #[serde(default)]
    pub locations: Vec<LocationData>,
    /// Mounted equipment, in mounting order.
    #[serde(default)]
    pub equipment: Vec<EquipmentData>,
    /// Crew.
    #[serde(default)]
    pub crew: CrewData,
}

impl ChassisData {
    /// A bare chassis with no armor or equipment.
    #[must_use]
    pub fn new(name: &str, archetype: Archetype, tonnage: u32) -> Self {
        Self {
            name: name.to_string(),
            archetype,
            tonnage,
            military: true,
            walk_mp: 0,
            jump_mp: 0,
            engine: EngineType::default(),
            gyro: GyroType::default(),
            cockpit: CockpitType::default(),
            aero: None,
            main_gun: false,
            locations: Vec::new(),
            equipment: Vec::new(),
            crew: CrewData::default(),
        }
    }

    /// Parse a chassis definition from RON.
    ///
    /// `path` is only used to label errors.
    pub fn from_ron(source: &str, path: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| RulesError::DataParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize to pretty RON.
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| RulesError::InvalidState(format!("Failed to write chassis data: {e}")))
    }

    /// Total armor points listed in the definition.
    #[must_use]
    pub fn total_armor(&self) -> u32 {
        self.locations.iter().map(|l| l.armor + l.rear_armor).sum()
    }
}
