#![warn(missing_docs)]

//! Forward kinematics for armviz joint chains.
//!
//! Turns the current joint angles of a [`JointChain`] into one rigid
//! transform per joint. Every call is a pure read of the chain: nothing is
//! cached between frames and no angle is ever written.
//!
//! Each joint's local transform is `translate(offset) * rotate(axis, angle)`
//! and its world transform is `parent_world * local`. The order matters:
//! a joint's own rotation never moves its own origin, only its children.

use armviz_math::{Point3, Transform};
use armviz_model::{Joint, JointChain};
use serde::{Deserialize, Serialize};

/// Pose of one joint frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTransform {
    /// Joint name.
    pub joint: String,
    /// Position in chain order.
    pub index: usize,
    /// Transform relative to the parent frame.
    pub local: Transform,
    /// Transform relative to the chain base.
    pub world: Transform,
}

impl LinkTransform {
    /// World-space origin of this joint frame.
    pub fn origin(&self) -> Point3 {
        self.world.apply_point(&Point3::origin())
    }

    /// Flattened world pose for serialization.
    pub fn pose(&self) -> Pose {
        let t = self.world.translation_vector();
        Pose {
            joint: self.joint.clone(),
            translation: [t.x, t.y, t.z],
            rotation: self.world.quaternion_wxyz(),
        }
    }
}

/// Serializable world pose: translation and `[w, x, y, z]` rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Joint name.
    pub joint: String,
    /// World translation.
    pub translation: [f64; 3],
    /// World rotation quaternion, scalar first.
    pub rotation: [f64; 4],
}

/// Local transform of a joint at its current angle.
pub fn local_transform(joint: &Joint) -> Transform {
    local_transform_at(joint, joint.angle())
}

fn local_transform_at(joint: &Joint, angle: f64) -> Transform {
    Transform::from_offset(&joint.offset()).then(&Transform::rotation_about(joint.axis(), angle))
}

/// One transform per joint, in chain order, relative to the chain base.
pub fn compute_transforms(chain: &JointChain) -> Vec<LinkTransform> {
    compute_transforms_with_base(chain, &Transform::identity())
}

/// Like [`compute_transforms`], with the root placed at `base`.
pub fn compute_transforms_with_base(chain: &JointChain, base: &Transform) -> Vec<LinkTransform> {
    compose(chain, base, |joint| joint.angle())
}

/// Transforms with every angle at 0, without touching the chain.
pub fn rest_pose(chain: &JointChain) -> Vec<LinkTransform> {
    compose(chain, &Transform::identity(), |_| 0.0)
}

/// World transform of the last joint in the chain.
pub fn end_effector(chain: &JointChain) -> Transform {
    compute_transforms(chain)
        .last()
        .map(|link| link.world)
        .unwrap_or_default()
}

/// World-space origins of every joint, in chain order.
pub fn joint_positions(chain: &JointChain) -> Vec<Point3> {
    compute_transforms(chain)
        .iter()
        .map(LinkTransform::origin)
        .collect()
}

fn compose(chain: &JointChain, base: &Transform, angle: impl Fn(&Joint) -> f64) -> Vec<LinkTransform> {
    let mut out: Vec<LinkTransform> = Vec::with_capacity(chain.len());
    for (index, joint) in chain.joints().iter().enumerate() {
        let local = local_transform_at(joint, angle(joint));
        // Chain order puts every parent before its child.
        let parent_world = joint.parent().map_or(*base, |p| out[p].world);
        out.push(LinkTransform {
            joint: joint.name().to_string(),
            index,
            local,
            world: parent_world.then(&local),
        });
    }
    out
}
