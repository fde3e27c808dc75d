//! A single rotational joint.

use armviz_math::{Axis, Vec3};

use crate::definition::JointKind;

/// A rotational degree of freedom in the chain.
///
/// Everything except the angle is fixed once the chain is built. The angle
/// only changes through [`JointChain::set_angle`], which keeps it inside
/// `[min, max]`.
///
/// [`JointChain::set_angle`]: crate::JointChain::set_angle
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub(crate) name: String,
    pub(crate) kind: JointKind,
    pub(crate) axis: Axis,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) offset: Vec3,
    pub(crate) parent: Option<usize>,
    pub(crate) angle: f64,
    pub(crate) rest_angle: f64,
}

impl Joint {
    /// Joint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Joint type.
    pub fn kind(&self) -> JointKind {
        self.kind
    }

    /// Rotation axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Lower limit (radians).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper limit (radians).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Offset from the parent joint frame.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Position of the parent in chain order, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Current angle (radians).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Angle the joint started with and returns to on reset.
    pub fn rest_angle(&self) -> f64 {
        self.rest_angle
    }

    /// Clamp a value into this joint's limits.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Store a new angle, clamped. NaN leaves the angle unchanged.
    pub(crate) fn store(&mut self, value: f64) -> f64 {
        if !value.is_nan() {
            self.angle = self.clamp(value);
        }
        self.angle
    }
}
