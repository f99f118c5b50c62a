//! Chassis data validation.
//!
//! Loads every RON chassis definition in a directory, builds each one
//! with the rules core and checks armor against construction limits.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mech_core::chassis::UnitChassis;
use mech_core::data::ChassisData;
use mech_core::location::Location;
use tracing::{debug, info, warn};

use crate::config::read_chassis;
use crate::error::{Result, ToolError};

/// Most armor a Mek head can carry.
pub const MAX_HEAD_ARMOR: u32 = 9;

/// Registry of loaded chassis definitions, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ChassisRegistry {
    chassis: BTreeMap<String, ChassisData>,
}

impl ChassisRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and build one chassis definition.
    ///
    /// Returns the chassis name.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, the chassis cannot be
    /// built, or a chassis with the same name is already loaded.
    pub fn load_from_file(&mut self, path: &Path) -> Result<String> {
        let data = read_chassis(path)?;
        UnitChassis::from_data(&data)?;

        if self.chassis.contains_key(&data.name) {
            return Err(ToolError::DuplicateName {
                name: data.name,
                path: path.display().to_string(),
            });
        }
        let name = data.name.clone();
        debug!("Loaded {} from {:?}", name, path);
        self.chassis.insert(name.clone(), data);
        Ok(name)
    }

    /// Load all chassis from a directory, skipping files that fail.
    ///
    /// # Errors
    ///
    /// Fails only if the directory itself cannot be read.
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<Vec<String>> {
        let mut loaded = Vec::new();
        for path in ron_files(dir)? {
            match self.load_from_file(&path) {
                Ok(name) => loaded.push(name),
                Err(e) => {
                    warn!("Failed to load chassis from {:?}: {}", path, e);
                }
            }
        }
        Ok(loaded)
    }

    /// Get a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ChassisData> {
        self.chassis.get(name)
    }

    /// Loaded names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chassis.keys().map(String::as_str)
    }

    /// Number of loaded definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chassis.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chassis.is_empty()
    }
}

/// `.ron` files in a directory, sorted by path.
fn ron_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ToolError::DirectoryNotFound(dir.display().to_string()));
    }
    let io = |e: std::io::Error| ToolError::Io(dir.display().to_string(), e.to_string());

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.extension().is_some_and(|e| e == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Armor limit warnings for a built chassis.
///
/// Mek locations may carry at most twice their internal structure in
/// armor (front plus rear), and the head at most nine points.
#[must_use]
pub fn armor_warnings(chassis: &UnitChassis) -> Vec<String> {
    if !chassis.archetype().is_mek() {
        return Vec::new();
    }
    chassis
        .locations()
        .iter()
        .filter_map(|state| {
            let location = state.location;
            let armor = chassis.original_armor(location, false) + chassis.original_armor(location, true);
            let limit = if location == Location::Head {
                MAX_HEAD_ARMOR
            } else {
                chassis.original_internal(location) * 2
            };
            (armor > limit).then(|| {
                format!(
                    "{}: {} armor {} exceeds limit {}",
                    chassis.name(),
                    location.abbreviation(),
                    armor,
                    limit
                )
            })
        })
        .collect()
}

/// Outcome of validating a directory.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Files checked.
    pub checked: usize,
    /// `(path, error)` for each file that failed.
    pub failures: Vec<(String, String)>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Did every file pass?
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn failures into an error.
    ///
    /// # Errors
    ///
    /// [`ToolError::ValidationFailed`] if any file failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(ToolError::ValidationFailed {
                failed: self.failures.len(),
                checked: self.checked,
            })
        }
    }
}

/// Validate all RON chassis files in a directory.
///
/// `path` may be the chassis directory itself or a data root with a
/// `chassis/` subdirectory.
///
/// # Errors
///
/// Returns an error if the directory cannot be read. Individual file
/// failures are collected in the report.
pub fn validate_data_directory(path: &Path) -> Result<ValidationReport> {
    let nested = path.join("chassis");
    let dir = if nested.is_dir() { nested.as_path() } else { path };

    let mut registry = ChassisRegistry::new();
    let mut report = ValidationReport::default();
    for file in ron_files(dir)? {
        report.checked += 1;
        match registry.load_from_file(&file) {
            Ok(name) => {
                if let Some(data) = registry.get(&name) {
                    let chassis = UnitChassis::from_data(data)?;
                    report.warnings.extend(armor_warnings(&chassis));
                }
            }
            Err(e) => {
                warn!("{}: {}", file.display(), e);
                report.failures.push((file.display().to_string(), e.to_string()));
            }
        }
    }
    info!(
        "Checked {} chassis files: {} failed, {} warnings",
        report.checked,
        report.failures.len(),
        report.warnings.len()
    );
    Ok(report)
}
