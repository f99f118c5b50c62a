//! Error types for the development tools.

use mech_core::error::RulesError;
use thiserror::Error;

/// Result type alias using [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file or directory could not be read.
    #[error("IO error on {0}: {1}")]
    Io(String, String),

    /// The data directory does not exist.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// Two files define a chassis with the same name.
    #[error("Duplicate chassis '{name}' in {path}")]
    DuplicateName {
        /// Chassis name.
        name: String,
        /// File defining the second copy.
        path: String,
    },

    /// Some chassis files failed validation.
    #[error("{failed} of {checked} chassis files failed validation")]
    ValidationFailed {
        /// Files that failed.
        failed: usize,
        /// Files checked.
        checked: usize,
    },

    /// A report could not be rendered.
    #[error("Failed to render report: {0}")]
    Render(String),

    /// The rules core rejected the data.
    #[error(transparent)]
    Rules(#[from] RulesError),
}
