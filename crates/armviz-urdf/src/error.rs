//! Error types for robot description import.

use armviz_model::ModelError;
use thiserror::Error;

/// Errors that can occur while importing a robot description.
#[derive(Error, Debug)]
pub enum UrdfError {
    /// Reading the file failed.
    #[error("failed to read robot description: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML or does not match the schema.
    #[error("invalid robot description XML: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// The document parsed but describes something unusable.
    #[error("malformed robot description: {0}")]
    Malformed(String),

    /// A joint type other than revolute or continuous.
    #[error("joint `{joint}` has unsupported type `{kind}`")]
    UnsupportedJointType {
        /// Joint name.
        joint: String,
        /// The `type` attribute as written.
        kind: String,
    },

    /// The resulting chain failed model validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for robot description import.
pub type Result<T> = std::result::Result<T, UrdfError>;
