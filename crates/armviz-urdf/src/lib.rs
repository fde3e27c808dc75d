#![warn(missing_docs)]

//! Robot description (URDF) import for armviz.
//!
//! Reads the subset of URDF that describes a serial arm of rotational
//! joints and turns it into a [`ChainDefinition`]. Joint order is taken from
//! the parent/child link structure, not from document order.
//!
//! Supported per joint: `type` of `revolute` or `continuous`,
//! `<parent link>`, `<child link>`, `<origin xyz>` (with zero `rpy`),
//! `<axis xyz>` along +X, +Y or +Z, and `<limit lower upper>`.
//!
//! ```
//! let xml = r#"
//! <robot name="pendulum">
//!   <link name="base"/>
//!   <link name="arm"/>
//!   <joint name="pivot" type="revolute">
//!     <parent link="base"/>
//!     <child link="arm"/>
//!     <axis xyz="0 1 0"/>
//!     <limit lower="-1.0" upper="1.0"/>
//!   </joint>
//! </robot>"#;
//! let chain = armviz_urdf::load_chain(xml).unwrap();
//! assert_eq!(chain.len(), 1);
//! ```

mod error;
mod schema;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use armviz_math::{Tolerance, Vec3};
use armviz_model::{Axis, ChainDefinition, JointChain, JointDefinition, JointKind};
use tracing::debug;

pub use error::{Result, UrdfError};

use schema::{JointXml, RobotXml};

/// Parse a robot description into an unvalidated chain definition.
///
/// Link references are resolved into parent indices; path-shape checks
/// (single root, no branching, no cycles) are left to
/// [`JointChain::initialize`].
pub fn parse_urdf(xml: &str) -> Result<ChainDefinition> {
    let robot: RobotXml = quick_xml::de::from_str(xml)?;
    if robot.joints.is_empty() {
        return Err(UrdfError::Malformed("robot has no joints".into()));
    }

    let declared: HashSet<&str> = robot.links.iter().map(|l| l.name.as_str()).collect();
    let mut by_child: HashMap<&str, usize> = HashMap::with_capacity(robot.joints.len());
    for (i, joint) in robot.joints.iter().enumerate() {
        for link in [&joint.parent.link, &joint.child.link] {
            if !declared.is_empty() && !declared.contains(link.as_str()) {
                return Err(UrdfError::Malformed(format!(
                    "joint `{}` references undeclared link `{}`",
                    joint.name, link
                )));
            }
        }
        if by_child.insert(joint.child.link.as_str(), i).is_some() {
            return Err(UrdfError::Malformed(format!(
                "link `{}` is the child of more than one joint",
                joint.child.link
            )));
        }
    }

    let joints = robot
        .joints
        .iter()
        .map(|joint| {
            let parent = by_child.get(joint.parent.link.as_str()).copied();
            joint_definition(joint, parent)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        robot = robot.name.as_deref().unwrap_or("unnamed"),
        joints = joints.len(),
        "parsed robot description"
    );

    Ok(ChainDefinition {
        name: robot.name,
        joints,
    })
}

/// Parse and validate a robot description into a joint chain.
pub fn load_chain(xml: &str) -> Result<JointChain> {
    Ok(JointChain::initialize(parse_urdf(xml)?)?)
}

/// Read a robot description file into a chain definition.
pub fn read_urdf_file(path: impl AsRef<Path>) -> Result<ChainDefinition> {
    let xml = std::fs::read_to_string(path)?;
    parse_urdf(&xml)
}

fn joint_definition(joint: &JointXml, parent: Option<usize>) -> Result<JointDefinition> {
    let kind = match joint.kind.as_str() {
        "revolute" => JointKind::Revolute,
        "continuous" => JointKind::Continuous,
        other => {
            return Err(UrdfError::UnsupportedJointType {
                joint: joint.name.clone(),
                kind: other.to_string(),
            })
        }
    };

    let origin = joint.origin.as_ref();
    let offset = match origin.and_then(|o| o.xyz.as_deref()) {
        Some(xyz) => parse_triple(&joint.name, "origin xyz", xyz)?,
        None => [0.0; 3],
    };
    if let Some(rpy) = origin.and_then(|o| o.rpy.as_deref()) {
        if parse_triple(&joint.name, "origin rpy", rpy)? != [0.0; 3] {
            return Err(UrdfError::Malformed(format!(
                "joint `{}` has a rotated origin; only translated origins are supported",
                joint.name
            )));
        }
    }

    // URDF's default axis is +X.
    let axis = match &joint.axis {
        Some(a) => {
            let [x, y, z] = parse_triple(&joint.name, "axis xyz", &a.xyz)?;
            Axis::from_vector(&Vec3::new(x, y, z), &Tolerance::DEFAULT).ok_or_else(|| {
                UrdfError::Malformed(format!(
                    "joint `{}` axis ({x} {y} {z}) is not +X, +Y or +Z",
                    joint.name
                ))
            })?
        }
        None => Axis::X,
    };

    let (min, max) = match (kind, &joint.limit) {
        (JointKind::Revolute, Some(limit)) => {
            (Some(limit.lower.unwrap_or(0.0)), Some(limit.upper.unwrap_or(0.0)))
        }
        (JointKind::Revolute, None) => {
            return Err(UrdfError::Malformed(format!(
                "revolute joint `{}` has no <limit>",
                joint.name
            )))
        }
        // A <limit> with only effort/velocity leaves the half-turn default.
        (JointKind::Continuous, Some(limit)) => (limit.lower, limit.upper),
        (JointKind::Continuous, None) => (None, None),
    };

    Ok(JointDefinition {
        name: joint.name.clone(),
        kind,
        axis,
        min,
        max,
        offset,
        parent,
        initial: None,
    })
}

fn parse_triple(joint: &str, what: &str, text: &str) -> Result<[f64; 3]> {
    let values = text
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| UrdfError::Malformed(format!("joint `{joint}` {what} `{text}`: {e}")))?;
    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(UrdfError::Malformed(format!(
            "joint `{joint}` {what} `{text}` must have three components"
        ))),
    }
}
