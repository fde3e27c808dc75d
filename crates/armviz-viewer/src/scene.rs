//! Scene composition: camera, lights and per-frame visuals.

use std::f64::consts::PI;

use armviz_kinematics::compute_transforms;
use armviz_math::{Dir3, Point3, Transform, Vec3};
use armviz_model::JointChain;
use nalgebra::{Isometry3, UnitQuaternion};

use crate::config::{CameraConfig, LightingConfig, ViewerConfig};

/// Elevation is kept just short of the poles so the up vector stays valid.
const MAX_ELEVATION: f64 = 89.0 * PI / 180.0;
const MIN_DISTANCE: f64 = 1e-3;

/// Camera orbiting a target point, Z up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Point3,
    /// Distance from the target.
    pub distance: f64,
    /// Angle around +Z from +X, radians.
    pub azimuth: f64,
    /// Angle above the XY plane, radians.
    pub elevation: f64,
    /// Vertical field of view, radians.
    pub fov: f64,
}

impl OrbitCamera {
    /// Camera placed per config.
    pub fn from_config(config: &CameraConfig) -> Self {
        let [x, y, z] = config.target;
        Self {
            target: Point3::new(x, y, z),
            distance: config.distance.max(MIN_DISTANCE),
            azimuth: config.azimuth_deg.to_radians(),
            elevation: config
                .elevation_deg
                .to_radians()
                .clamp(-MAX_ELEVATION, MAX_ELEVATION),
            fov: config.fov_deg.to_radians(),
        }
    }

    /// Rotate around the target. Elevation is clamped to ±89°.
    pub fn orbit(&mut self, d_azimuth: f64, d_elevation: f64) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Scale the distance to the target.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).max(MIN_DISTANCE);
        }
    }

    /// Camera position.
    pub fn eye(&self) -> Point3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + Vec3::new(ce * ca, ce * sa, se) * self.distance
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Transform {
        Transform {
            isometry: Isometry3::look_at_rh(&self.eye(), &self.target, &Vec3::z()),
        }
    }
}

/// Ambient light plus one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Ambient intensity.
    pub ambient: f64,
    /// Direction the light travels in.
    pub direction: Dir3,
    /// Directional intensity.
    pub intensity: f64,
}

impl Lighting {
    /// Lighting per config.
    pub fn from_config(config: &LightingConfig) -> Self {
        let [x, y, z] = config.direction;
        Self {
            ambient: config.ambient,
            direction: Dir3::new_normalize(Vec3::new(x, y, z)),
            intensity: config.intensity,
        }
    }
}

/// Placeholder geometry. Real meshes are decoration layered on the same
/// transforms and are not needed to pose the arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Cylinder along local +Z, centred on its pose.
    Cylinder {
        /// Radius.
        radius: f64,
        /// Length along +Z.
        length: f64,
    },
    /// Sphere centred on its pose.
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Box centred on its pose.
    Cuboid {
        /// Half edge lengths.
        half_extents: [f64; 3],
    },
}

/// One drawable piece of the arm.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkVisual {
    /// Joint whose frame the visual hangs from.
    pub joint: String,
    /// World pose of the primitive.
    pub pose: Transform,
    /// Geometry to draw.
    pub primitive: Primitive,
}

/// What a frame shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameContent {
    /// The model is still loading.
    Loading,
    /// The model failed to load.
    Placeholder {
        /// Why loading failed.
        reason: String,
        /// Stand-in geometry at the origin.
        primitive: Primitive,
    },
    /// The posed arm.
    Arm(Vec<LinkVisual>),
}

/// Everything a surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame counter since mount.
    pub index: u64,
    /// Camera for this frame.
    pub camera: OrbitCamera,
    /// Lights for this frame.
    pub lighting: Lighting,
    /// Scene content.
    pub content: FrameContent,
}

/// Placeholder cube for failed loads.
pub fn placeholder_primitive(config: &ViewerConfig) -> Primitive {
    let h = config.placeholder.size / 2.0;
    Primitive::Cuboid {
        half_extents: [h; 3],
    }
}

/// Primitive visuals for the chain at its current angles.
///
/// Each joint gets a cylinder reaching to the next joint's origin; the last
/// joint (or one with a zero-length link) gets a sphere.
pub fn arm_visuals(chain: &JointChain, link_radius: f64) -> Vec<LinkVisual> {
    let transforms = compute_transforms(chain);
    let joints = chain.joints();
    transforms
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let reach = joints.get(i + 1).map(|next| next.offset());
            match reach {
                Some(offset) if offset.norm() > 1e-12 => {
                    let length = offset.norm();
                    let align = UnitQuaternion::rotation_between(&Vec3::z(), &offset)
                        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vec3::x_axis(), PI));
                    let pose = link
                        .world
                        .then(&Transform::from_rotation(align))
                        .then(&Transform::translation(0.0, 0.0, length / 2.0));
                    LinkVisual {
                        joint: link.joint.clone(),
                        pose,
                        primitive: Primitive::Cylinder {
                            radius: link_radius,
                            length,
                        },
                    }
                }
                _ => LinkVisual {
                    joint: link.joint.clone(),
                    pose: link.world,
                    primitive: Primitive::Sphere {
                        radius: link_radius * 1.5,
                    },
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use armviz_model::{Axis, ChainDefinition, JointDefinition};
    use std::f64::consts::FRAC_PI_2;

    fn reference() -> JointChain {
        JointChain::initialize(ChainDefinition::reference_arm()).unwrap()
    }

    fn center(v: &LinkVisual) -> Point3 {
        v.pose.apply_point(&Point3::origin())
    }

    #[test]
    fn test_rest_pose_visuals() {
        let visuals = arm_visuals(&reference(), 0.02);
        assert_eq!(visuals.len(), 4);
        let lengths: Vec<_> = visuals
            .iter()
            .filter_map(|v| match v.primitive {
                Primitive::Cylinder { length, .. } => Some(length),
                _ => None,
            })
            .collect();
        assert_eq!(lengths.len(), 3);
        assert_relative_eq!(lengths[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(lengths[1], 0.3, epsilon = 1e-12);
        assert_relative_eq!(lengths[2], 0.25, epsilon = 1e-12);
        assert!(matches!(visuals[3].primitive, Primitive::Sphere { .. }));

        let upper_arm = center(&visuals[1]);
        assert_relative_eq!(upper_arm.z, 0.25, epsilon = 1e-12);
        assert_relative_eq!(center(&visuals[3]).z, 0.65, epsilon = 1e-12);
    }

    #[test]
    fn test_visuals_follow_joint_angles() {
        let mut chain = reference();
        chain.set_angle("shoulder_joint", FRAC_PI_2).unwrap();
        let visuals = arm_visuals(&chain, 0.02);
        // Upper arm now lies along +X from the shoulder.
        let upper_arm = center(&visuals[1]);
        assert_relative_eq!(upper_arm.x, 0.15, epsilon = 1e-12);
        assert_relative_eq!(upper_arm.z, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_sideways_link() {
        let def = ChainDefinition {
            name: None,
            joints: vec![
                JointDefinition::revolute("a", Axis::Z, -1.0, 1.0),
                JointDefinition::revolute("b", Axis::Z, -1.0, 1.0)
                    .with_offset(0.0, -0.4, 0.0)
                    .with_parent(0),
            ],
        };
        let chain = JointChain::initialize(def).unwrap();
        let visuals = arm_visuals(&chain, 0.01);
        let mid = center(&visuals[0]);
        assert_relative_eq!(mid.y, -0.2, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orbit_camera() {
        let mut camera = OrbitCamera::from_config(&CameraConfig {
            target: [0.0, 0.0, 0.0],
            distance: 2.0,
            azimuth_deg: 0.0,
            elevation_deg: 0.0,
            fov_deg: 50.0,
        });
        let eye = camera.eye();
        assert_relative_eq!(eye.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-12);

        camera.orbit(FRAC_PI_2, 10.0);
        assert_relative_eq!(camera.elevation, MAX_ELEVATION, epsilon = 1e-12);
        camera.zoom(0.5);
        assert_relative_eq!(camera.distance, 1.0, epsilon = 1e-12);
        camera.zoom(-3.0);
        assert_relative_eq!(camera.distance, 1.0, epsilon = 1e-12);

        // The target sits straight ahead of the camera (-Z in view space).
        let in_view = camera.view().apply_point(&camera.target);
        assert_relative_eq!(in_view.z, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lighting_normalized() {
        let lighting = Lighting::from_config(&LightingConfig {
            ambient: 0.2,
            direction: [0.0, 0.0, -5.0],
            intensity: 1.0,
        });
        assert_relative_eq!(lighting.direction.z, -1.0, epsilon = 1e-12);
    }
}
