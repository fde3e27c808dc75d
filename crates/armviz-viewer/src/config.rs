//! Viewer configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! frame_rate = 30.0
//! link_radius = 0.02
//!
//! [camera]
//! distance = 2.0
//! elevation_deg = 20.0
//!
//! [lighting]
//! direction = [-1.0, -1.0, -2.0]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_FRAME_RATE: f64 = 60.0;
/// Fastest loop the viewer will run; above this the period rounds towards
/// zero, which the interval timer rejects.
const MAX_FRAME_RATE: f64 = 1000.0;
const MIN_FRAME_RATE: f64 = 0.01;

/// Top-level viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Frames per second of the render loop.
    pub frame_rate: f64,
    /// Radius of the primitive cylinders drawn for links.
    pub link_radius: f64,
    /// Initial camera placement.
    pub camera: CameraConfig,
    /// Scene lighting.
    pub lighting: LightingConfig,
    /// Visual shown when the model cannot be loaded.
    pub placeholder: PlaceholderConfig,
}

/// Initial orbit camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Point the camera orbits around.
    pub target: [f64; 3],
    /// Distance from the target.
    pub distance: f64,
    /// Angle around the vertical axis, in degrees.
    pub azimuth_deg: f64,
    /// Angle above the horizontal plane, in degrees.
    pub elevation_deg: f64,
    /// Vertical field of view, in degrees.
    pub fov_deg: f64,
}

/// Ambient plus one directional light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient intensity.
    pub ambient: f64,
    /// Direction the directional light shines in.
    pub direction: [f64; 3],
    /// Directional intensity.
    pub intensity: f64,
}

/// Placeholder visual settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Edge length of the placeholder cube.
    pub size: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            link_radius: 0.025,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.0, 0.3],
            distance: 1.5,
            azimuth_deg: 45.0,
            elevation_deg: 25.0,
            fov_deg: 50.0,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            direction: [-0.5, -0.5, -1.0],
            intensity: 0.8,
        }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self { size: 0.2 }
    }
}

impl ViewerConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Reject values the render loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("frame_rate", self.frame_rate),
            ("link_radius", self.link_radius),
            ("camera.distance", self.camera.distance),
            ("camera.fov_deg", self.camera.fov_deg),
            ("placeholder.size", self.placeholder.size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&self.frame_rate) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be between {MIN_FRAME_RATE} and {MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        let [x, y, z] = self.lighting.direction;
        let len2 = x * x + y * y + z * z;
        if len2 == 0.0 || !len2.is_finite() {
            return Err(ConfigError::Invalid(
                "lighting.direction must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Time between frames.
    ///
    /// The rate is clamped to the supported range; a non-finite or
    /// non-positive rate falls back to the default.
    pub fn frame_period(&self) -> Duration {
        let rate = if self.frame_rate.is_finite() && self.frame_rate > 0.0 {
            self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
        } else {
            DEFAULT_FRAME_RATE
        };
        Duration::from_secs_f64(1.0 / rate)
    }
}
