//! Game options, planetary conditions and the context passed to every rule.
//!
//! Rules functions never reach back into a game object. Callers borrow the
//! options and conditions into a [`RulesContext`] and hand it in.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Optional rules toggled per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct GameOptions {
    /// Disable through-armor criticals.
    pub no_tac: bool,
    /// Re-roll through-armor criticals until they land on an uncovered location.
    pub floating_crit: bool,
    /// Aero damage threshold follows current armor instead of original armor.
    pub variable_damage_threshold: bool,
    /// Allow crews to spend Edge.
    pub edge: bool,
    /// Enable sprinting.
    pub tacops_sprint: bool,
}

impl GameOptions {
    /// Names accepted by [`GameOptions::get`] and [`GameOptions::set`].
    pub const NAMES: [&'static str; 5] = [
        "no_tac",
        "floating_crit",
        "variable_damage_threshold",
        "edge",
        "tacops_sprint",
    ];

    fn flag_mut(&mut self, name: &str) -> Result<&mut bool> {
        match name {
            "no_tac" => Ok(&mut self.no_tac),
            "floating_crit" => Ok(&mut self.floating_crit),
            "variable_damage_threshold" => Ok(&mut self.variable_damage_threshold),
            "edge" => Ok(&mut self.edge),
            "tacops_sprint" => Ok(&mut self.tacops_sprint),
            other => Err(RulesError::UnknownOption(other.to_string())),
        }
    }

    /// Read an option by name.
    pub fn get(&self, name: &str) -> Result<bool> {
        let mut copy = *self;
        copy.flag_mut(name).map(|flag| *flag)
    }

    /// Set an option by name.
    pub fn set(&mut self, name: &str, value: bool) -> Result<()> {
        *self.flag_mut(name)? = value;
        Ok(())
    }

    /// Load options from a RON string.
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| RulesError::DataParseError {
            path: "<options>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Atmospheric density class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Atmosphere {
    /// No atmosphere.
    Vacuum,
    /// Trace atmosphere.
    Trace,
    /// Thin atmosphere.
    Thin,
    /// Standard atmosphere.
    #[default]
    Standard,
    /// High pressure.
    High,
    /// Very high pressure.
    VeryHigh,
}

impl Atmosphere {
    /// Heat dissipation bonus from a working partial wing.
    #[must_use]
    pub const fn partial_wing_heat_bonus(self) -> u32 {
        match self {
            Self::Vacuum => 0,
            Self::Trace => 1,
            Self::Thin => 2,
            Self::Standard | Self::High | Self::VeryHigh => 3,
        }
    }

    /// Jump MP bonus from a working partial wing.
    #[must_use]
    pub const fn partial_wing_jump_bonus(self, tonnage: u32) -> u32 {
        let light = tonnage <= 55;
        match self {
            Self::Vacuum | Self::Trace => 0,
            Self::Thin => light as u32,
            Self::Standard | Self::High | Self::VeryHigh => 1 + light as u32,
        }
    }
}

/// Precipitation and visibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    /// Clear skies.
    #[default]
    Clear,
    /// Light rain.
    LightRain,
    /// Moderate rain.
    ModerateRain,
    /// Heavy rain.
    HeavyRain,
    /// Torrential downpour.
    Downpour,
    /// Light snow.
    LightSnow,
    /// Moderate snow.
    ModerateSnow,
    /// Heavy snow.
    HeavySnow,
    /// Sleet.
    Sleet,
    /// Ice storm.
    IceStorm,
    /// Blizzard.
    Blizzard,
}

impl Weather {
    /// Ground MP modifier.
    #[must_use]
    pub const fn movement_modifier(self) -> i32 {
        match self {
            Self::HeavySnow | Self::IceStorm | Self::Blizzard | Self::Downpour => -1,
            _ => 0,
        }
    }
}

/// Wind strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Wind {
    /// Calm.
    #[default]
    Calm,
    /// Light gale.
    LightGale,
    /// Moderate gale.
    ModerateGale,
    /// Strong gale.
    StrongGale,
    /// Storm.
    Storm,
    /// Tornado.
    Tornado,
}

impl Wind {
    /// Ground MP modifier.
    #[must_use]
    pub const fn movement_modifier(self) -> i32 {
        match self {
            Self::Storm => -1,
            Self::Tornado => -2,
            _ => 0,
        }
    }
}

/// Environment of the battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetaryConditions {
    /// Atmospheric density.
    pub atmosphere: Atmosphere,
    /// Weather.
    pub weather: Weather,
    /// Wind.
    pub wind: Wind,
    /// Gravity in hundredths of a standard g.
    pub gravity_percent: u32,
}

impl Default for PlanetaryConditions {
    fn default() -> Self {
        Self {
            atmosphere: Atmosphere::Standard,
            weather: Weather::Clear,
            wind: Wind::Calm,
            gravity_percent: 100,
        }
    }
}

impl PlanetaryConditions {
    /// Is gravity anything but standard?
    #[must_use]
    pub const fn has_nonstandard_gravity(&self) -> bool {
        self.gravity_percent != 100 && self.gravity_percent != 0
    }

    /// Combined weather and wind modifier to ground MP.
    #[must_use]
    pub const fn movement_modifier(&self) -> i32 {
        self.weather.movement_modifier() + self.wind.movement_modifier()
    }

    /// Load conditions from a RON string.
    pub fn from_ron(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| RulesError::DataParseError {
            path: "<conditions>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Suppression flags for "clean" MP queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MpSettings {
    /// Ignore the heat penalty.
    pub ignore_heat: bool,
    /// Ignore cargo load.
    pub ignore_cargo: bool,
    /// Ignore weather and wind.
    pub ignore_weather: bool,
    /// Ignore gravity.
    pub ignore_gravity: bool,
    /// Ignore modular and hardened armor taxes.
    pub ignore_modular_armor: bool,
    /// Ignore MASC, supercharger and myomer booster.
    pub ignore_boosters: bool,
    /// Ignore the grounded halving for aerospace units.
    pub ignore_grounded: bool,
}

impl MpSettings {
    /// Every penalty and bonus applies.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            ignore_heat: false,
            ignore_cargo: false,
            ignore_weather: false,
            ignore_gravity: false,
            ignore_modular_armor: false,
            ignore_boosters: false,
            ignore_grounded: false,
        }
    }

    /// Base MP without environment: no heat, weather, gravity or cargo.
    #[must_use]
    pub const fn base() -> Self {
        Self {
            ignore_heat: true,
            ignore_cargo: true,
            ignore_weather: true,
            ignore_gravity: true,
            ..Self::standard()
        }
    }
}

/// Options and conditions borrowed for one rules call.
#[derive(Debug, Clone, Copy)]
pub struct RulesContext<'a> {
    /// Game options.
    pub options: &'a GameOptions,
    /// Planetary conditions.
    pub conditions: &'a PlanetaryConditions,
}

impl<'a> RulesContext<'a> {
    /// Borrow options and conditions.
    #[must_use]
    pub const fn new(options: &'a GameOptions, conditions: &'a PlanetaryConditions) -> Self {
        Self {
            options,
            conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_options() {
        let mut options = GameOptions::default();
        assert!(!options.get("edge").unwrap());
        options.set("edge", true).unwrap();
        assert!(options.edge);
        for name in GameOptions::NAMES {
            assert!(options.get(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_unknown_option() {
        let mut options = GameOptions::default();
        assert!(matches!(
            options.set("double_blind", true),
            Err(RulesError::UnknownOption(name)) if name == "double_blind"
        ));
        assert!(options.get("nope").is_err());
    }

    #[test]
    fn test_options_from_ron() {
        let options = GameOptions::from_ron("(no_tac: true, edge: true)").unwrap();
        assert!(options.no_tac);
        assert!(options.edge);
        assert!(!options.floating_crit);
    }

    #[test]
    fn test_conditions_from_ron() {
        let conditions =
            PlanetaryConditions::from_ron("(atmosphere: Thin, gravity_percent: 50)").unwrap();
        assert_eq!(conditions.atmosphere, Atmosphere::Thin);
        assert_eq!(conditions.gravity_percent, 50);
        assert_eq!(conditions.weather, Weather::Clear);
    }

    #[test]
    fn test_partial_wing_jump_bonus() {
        assert_eq!(Atmosphere::Thin.partial_wing_jump_bonus(55), 1);
        assert_eq!(Atmosphere::Thin.partial_wing_jump_bonus(60), 0);
        assert_eq!(Atmosphere::Standard.partial_wing_jump_bonus(40), 2);
        assert_eq!(Atmosphere::VeryHigh.partial_wing_jump_bonus(80), 1);
        assert_eq!(Atmosphere::Trace.partial_wing_jump_bonus(20), 0);
    }

    #[test]
    fn test_movement_modifier() {
        let conditions = PlanetaryConditions {
            weather: Weather::Blizzard,
            wind: Wind::Storm,
            ..PlanetaryConditions::default()
        };
        assert_eq!(conditions.movement_modifier(), -2);
    }
}
