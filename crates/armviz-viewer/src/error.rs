//! Error types for the viewer.

use armviz_model::ModelError;
use armviz_urdf::UrdfError;
use thiserror::Error;

/// Errors that can occur while loading a model into the viewer.
///
/// The viewer never returns these to its caller; a failed load is logged
/// and replaced by a placeholder visual.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading the model file failed.
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),

    /// The robot description could not be imported.
    #[error(transparent)]
    Urdf(#[from] UrdfError),

    /// The JSON chain definition could not be parsed.
    #[error("invalid chain definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition parsed but is not a valid chain.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A drawing surface failed to present a frame.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("surface error: {0}")]
pub struct SurfaceError(pub String);

/// Errors from loading viewer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this config.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}
