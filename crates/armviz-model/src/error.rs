//! Error types for the joint model.

use thiserror::Error;

/// Errors that can occur while building or driving a joint chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The chain definition is structurally invalid (inverted limits,
    /// missing root, branching, cycles, duplicate names, ...).
    #[error("malformed model: {reason}")]
    Malformed {
        /// What was wrong with the definition.
        reason: String,
    },

    /// A joint name that is not part of the chain.
    #[error("unknown joint: {0}")]
    UnknownJoint(String),
}

impl ModelError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Result type for joint model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
