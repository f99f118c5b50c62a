//! Loading game options and planetary conditions for tool runs.

use std::fs;
use std::path::Path;

use mech_core::context::{GameOptions, PlanetaryConditions};
use mech_core::data::ChassisData;

use crate::error::{Result, ToolError};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ToolError::Io(path.display().to_string(), e.to_string()))
}

/// Read one chassis definition.
///
/// # Errors
///
/// [`ToolError::Io`] if the file cannot be read, [`ToolError::Rules`] if
/// it is not valid chassis RON.
pub fn read_chassis(path: &Path) -> Result<ChassisData> {
    let content = read(path)?;
    Ok(ChassisData::from_ron(&content, &path.display().to_string())?)
}

/// Options and conditions for one tool run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Game options.
    pub options: GameOptions,
    /// Planetary conditions.
    pub conditions: PlanetaryConditions,
}

impl RunConfig {
    /// Load from optional RON files; missing paths keep the defaults.
    ///
    /// `enable` turns on named options after the file is applied.
    ///
    /// # Errors
    ///
    /// Fails if a file cannot be read or parsed, or an option name is
    /// unknown.
    pub fn load(options: Option<&Path>, conditions: Option<&Path>, enable: &[String]) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = options {
            config.options = GameOptions::from_ron(&read(path)?)?;
        }
        if let Some(path) = conditions {
            config.conditions = PlanetaryConditions::from_ron(&read(path)?)?;
        }
        for name in enable {
            config.options.set(name, true)?;
        }
        Ok(config)
    }
}
