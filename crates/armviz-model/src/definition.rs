//! Serializable chain definitions.
//!
//! A [`ChainDefinition`] is the raw input to [`JointChain::initialize`]:
//! joints may be listed in any order and reference their parent by index.
//! Nothing here is validated; validation happens when the chain is built.
//!
//! [`JointChain::initialize`]: crate::JointChain::initialize

use std::f64::consts::{FRAC_PI_2, PI};

use armviz_math::Axis;
use serde::{Deserialize, Serialize};

/// Rotational joint type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointKind {
    /// Bounded rotation; limits are required.
    #[default]
    Revolute,
    /// Nominally unbounded rotation. Without explicit limits the joint is
    /// clamped to `[-π, π]`; the angle is never wrapped.
    Continuous,
}

impl std::fmt::Display for JointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JointKind::Revolute => f.write_str("revolute"),
            JointKind::Continuous => f.write_str("continuous"),
        }
    }
}

/// One joint as written in a model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointDefinition {
    /// Unique joint name.
    pub name: String,
    /// Joint type.
    #[serde(default)]
    pub kind: JointKind,
    /// Rotation axis in the joint frame.
    pub axis: Axis,
    /// Lower limit in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper limit in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Offset from the parent joint frame.
    #[serde(default)]
    pub offset: [f64; 3],
    /// Index of the parent joint in the definition list (`None` for the root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// Starting angle in radians (defaults to 0, clamped into the limits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<f64>,
}

impl JointDefinition {
    /// A revolute joint with the given limits.
    pub fn revolute(name: impl Into<String>, axis: Axis, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: JointKind::Revolute,
            axis,
            min: Some(min),
            max: Some(max),
            offset: [0.0; 3],
            parent: None,
            initial: None,
        }
    }

    /// A continuous joint with the default `[-π, π]` range.
    pub fn continuous(name: impl Into<String>, axis: Axis) -> Self {
        Self {
            kind: JointKind::Continuous,
            min: None,
            max: None,
            ..Self::revolute(name, axis, 0.0, 0.0)
        }
    }

    /// Set the parent-relative offset.
    pub fn with_offset(mut self, x: f64, y: f64, z: f64) -> Self {
        self.offset = [x, y, z];
        self
    }

    /// Set the parent index.
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set explicit limits.
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the starting angle.
    pub fn with_initial(mut self, angle: f64) -> Self {
        self.initial = Some(angle);
        self
    }
}

/// A complete kinematic chain description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainDefinition {
    /// Optional model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Joint descriptions.
    pub joints: Vec<JointDefinition>,
}

impl ChainDefinition {
    /// The 4-joint reference arm: base → shoulder → elbow → wrist.
    pub fn reference_arm() -> Self {
        Self {
            name: Some("reference_arm".into()),
            joints: vec![
                JointDefinition::continuous("base_joint", Axis::Z).with_limits(-PI, PI),
                JointDefinition::revolute("shoulder_joint", Axis::Y, -FRAC_PI_2, FRAC_PI_2)
                    .with_offset(0.0, 0.0, 0.1)
                    .with_parent(0),
                JointDefinition::revolute("elbow_joint", Axis::Y, -2.35, 2.35)
                    .with_offset(0.0, 0.0, 0.3)
                    .with_parent(1),
                JointDefinition::continuous("wrist_joint", Axis::Z)
                    .with_limits(-PI, PI)
                    .with_offset(0.0, 0.0, 0.25)
                    .with_parent(2),
            ],
        }
    }

    /// Parse a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the definition to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
