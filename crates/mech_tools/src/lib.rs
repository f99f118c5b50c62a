//! # Mech Development Tools
//!
//! Command-line tools for development:
//! - Chassis data validation
//! - Unit reports (MP, heat capacity, damage level)
//! - Seeded damage simulations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod error;
pub mod report;
pub mod simulate;
pub mod validate;
