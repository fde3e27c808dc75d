#![warn(missing_docs)]

//! Math types for armviz joint chains.
//!
//! Thin wrappers around nalgebra providing the types a kinematic chain
//! needs: points, vectors, principal rotation axes, rigid transforms,
//! and tolerance constants.

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// One of the three principal rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The +X axis.
    #[serde(alias = "x")]
    X,
    /// The +Y axis.
    #[serde(alias = "y")]
    Y,
    /// The +Z axis.
    #[serde(alias = "z")]
    Z,
}

impl Axis {
    /// Unit direction of this axis.
    pub fn unit(self) -> Dir3 {
        match self {
            Axis::X => Vec3::x_axis(),
            Axis::Y => Vec3::y_axis(),
            Axis::Z => Vec3::z_axis(),
        }
    }

    /// Match a direction vector against the principal axes.
    ///
    /// The vector is normalized first; only the positive principal
    /// directions are recognized.
    pub fn from_vector(v: &Vec3, tol: &Tolerance) -> Option<Axis> {
        let n = v.norm();
        if n < tol.linear {
            return None;
        }
        let d = v / n;
        [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .find(|axis| (d - axis.unit().into_inner()).norm() < tol.linear)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(s)
    }
}

/// A rigid transform: rotation followed by translation.
///
/// Composition follows matrix order, so `a.then(&b)` maps a point through
/// `b` first and then through `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying isometry.
    pub isometry: Isometry3<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            isometry: Isometry3::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::from_offset(&Vec3::new(dx, dy, dz))
    }

    /// Translation by an offset vector.
    pub fn from_offset(offset: &Vec3) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::from(*offset), UnitQuaternion::identity()),
        }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        Self::rotation_about(Axis::X, angle)
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        Self::rotation_about(Axis::Y, angle)
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        Self::rotation_about(Axis::Z, angle)
    }

    /// Rotation about a principal axis by `angle` radians.
    pub fn rotation_about(axis: Axis, angle: f64) -> Self {
        Self::rotation_about_axis(&axis.unit(), angle)
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// The angle is used as given; no wrapping into `[-π, π]` happens here.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        Self::from_rotation(UnitQuaternion::from_axis_angle(axis, angle))
    }

    /// Pure rotation.
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            isometry: Isometry3::from_parts(Translation3::identity(), rotation),
        }
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            isometry: self.isometry * other.isometry,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.isometry.transform_point(p)
    }

    /// Transform a direction vector (rotation only).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.isometry.transform_vector(v)
    }

    /// Inverse of this transform. Rigid transforms are always invertible.
    pub fn inverse(&self) -> Self {
        Self {
            isometry: self.isometry.inverse(),
        }
    }

    /// The translation part.
    pub fn translation_vector(&self) -> Vec3 {
        self.isometry.translation.vector
    }

    /// The rotation part.
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.isometry.rotation
    }

    /// Rotation as `[w, x, y, z]` quaternion components.
    pub fn quaternion_wxyz(&self) -> [f64; 4] {
        let q = self.isometry.rotation.quaternion();
        [q.w, q.i, q.j, q.k]
    }

    /// Check whether two transforms agree within tolerance.
    pub fn approx_eq(&self, other: &Transform, tol: &Tolerance) -> bool {
        (self.translation_vector() - other.translation_vector()).norm() < tol.linear
            && self.rotation().angle_to(&other.rotation()) < tol.angular
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for pose comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance (model units, conventionally metres).
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default kinematic tolerances (1e-9 linear, 1e-6 rad angular).
    ///
    /// The angular bound is looser because quaternion angles go through
    /// `acos`, which loses precision near the identity.
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-6,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
