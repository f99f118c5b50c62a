//! Data structures for chassis definitions.
//!
//! This module contains pure data structures deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! Directory loading is handled by `mech_tools`.

mod chassis_data;

pub use chassis_data::{AeroData, ChassisData, CrewData, EquipmentData, LocationData};
