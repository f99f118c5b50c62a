//! Error types for the rules core.
//!
//! Ordinary rules branching (a hit that causes no critical, a transfer that
//! ends the chain) is expressed through return values, never through these
//! errors. Errors cover construction-time capacity violations, malformed
//! data and raw values crossing into the core from outside.

use thiserror::Error;

use crate::location::Location;

/// Result type alias using [`RulesError`].
pub type Result<T> = std::result::Result<T, RulesError>;

/// Top-level error type for the rules core.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Not enough free critical slots to mount a piece of equipment.
    #[error("Not enough critical slots in {location:?}: need {required}, have {available}")]
    CapacityExceeded {
        /// Location the equipment was mounted into.
        location: Location,
        /// Slots the equipment needs.
        required: usize,
        /// Free slots left in the location.
        available: usize,
    },

    /// The location does not exist on this chassis archetype.
    #[error("Location {0:?} is not part of this chassis")]
    LocationNotOnChassis(Location),

    /// A chassis definition is internally inconsistent.
    #[error("Invalid chassis configuration: {0}")]
    InvalidConfiguration(String),

    /// A named game option does not exist.
    #[error("Unknown game option: {0}")]
    UnknownOption(String),

    /// Raw value does not name a hit table.
    #[error("Invalid hit table: {0}")]
    InvalidTable(u8),

    /// Raw value does not name an attack side.
    #[error("Invalid attack side: {0}")]
    InvalidSide(u8),

    /// Equipment identifier does not exist on the chassis.
    #[error("Equipment not found: {0}")]
    EquipmentNotFound(u32),

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path to the file that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid or unserializable state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
