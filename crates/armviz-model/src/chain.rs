//! The kinematic chain and its angle state.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::rc::Rc;

use armviz_math::Vec3;
use tracing::debug;

use crate::definition::{ChainDefinition, JointDefinition, JointKind};
use crate::error::{ModelError, Result};
use crate::joint::Joint;

/// A chain shared between its single writer (the control panel) and its
/// per-frame reader (the renderer). Single-threaded by construction.
pub type SharedChain = Rc<RefCell<JointChain>>;

/// An ordered root-to-leaf path of rotational joints.
#[derive(Debug, Clone, PartialEq)]
pub struct JointChain {
    name: Option<String>,
    joints: Vec<Joint>,
    index: HashMap<String, usize>,
}

impl JointChain {
    /// Validate a definition and build the chain in root-to-leaf order.
    ///
    /// Fails with [`ModelError::Malformed`] on inverted or missing limits,
    /// duplicate names, or any structure other than a single path with
    /// exactly one root. No partial chain is returned on failure.
    pub fn initialize(definition: ChainDefinition) -> Result<Self> {
        let ChainDefinition { name, joints: defs } = definition;
        if defs.is_empty() {
            return Err(ModelError::malformed("chain has no joints"));
        }

        let mut seen = HashSet::with_capacity(defs.len());
        let mut limits = Vec::with_capacity(defs.len());
        for def in &defs {
            if def.name.is_empty() {
                return Err(ModelError::malformed("joint with empty name"));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(ModelError::malformed(format!(
                    "duplicate joint name `{}`",
                    def.name
                )));
            }
            limits.push(resolve_limits(def)?);
            if def.offset.iter().any(|c| !c.is_finite()) {
                return Err(ModelError::malformed(format!(
                    "joint `{}` has a non-finite offset",
                    def.name
                )));
            }
            if def.initial.is_some_and(|a| !a.is_finite()) {
                return Err(ModelError::malformed(format!(
                    "joint `{}` has a non-finite initial angle",
                    def.name
                )));
            }
        }

        let order = path_order(&defs)?;

        let mut joints = Vec::with_capacity(order.len());
        let mut index = HashMap::with_capacity(order.len());
        for (position, &i) in order.iter().enumerate() {
            let def = &defs[i];
            let (min, max) = limits[i];
            let rest = def.initial.unwrap_or(0.0).clamp(min, max);
            index.insert(def.name.clone(), position);
            joints.push(Joint {
                name: def.name.clone(),
                kind: def.kind,
                axis: def.axis,
                min,
                max,
                offset: Vec3::new(def.offset[0], def.offset[1], def.offset[2]),
                parent: position.checked_sub(1),
                angle: rest,
                rest_angle: rest,
            });
        }

        debug!(
            name = name.as_deref().unwrap_or("unnamed"),
            joints = joints.len(),
            "initialized joint chain"
        );

        Ok(Self {
            name,
            joints,
            index,
        })
    }

    /// Wrap the chain for sharing between the control panel and renderer.
    pub fn into_shared(self) -> SharedChain {
        Rc::new(RefCell::new(self))
    }

    /// Model name, if the definition had one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Joints in chain order.
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Number of joints.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Always false for an initialized chain.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Joint names in chain order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|j| j.name())
    }

    /// Look up a joint by name.
    pub fn joint(&self, name: &str) -> Result<&Joint> {
        self.position(name).map(|i| &self.joints[i])
    }

    /// Position of a joint in chain order.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownJoint(name.to_string()))
    }

    /// Current angle of a joint (radians).
    pub fn get_angle(&self, name: &str) -> Result<f64> {
        self.joint(name).map(Joint::angle)
    }

    /// Set a joint angle, clamping it into the joint's limits.
    ///
    /// Returns the value actually stored. Out-of-range input is clamped
    /// silently; NaN is ignored and the current angle is kept.
    pub fn set_angle(&mut self, name: &str, value: f64) -> Result<f64> {
        let i = self.position(name)?;
        let joint = &mut self.joints[i];
        let stored = joint.store(value);
        if !value.is_nan() && stored != value {
            debug!(joint = name, requested = value, stored, "joint angle clamped");
        }
        Ok(stored)
    }

    /// Set several angles at once. Stops at the first unknown joint;
    /// earlier updates stay applied.
    pub fn set_angles<'a>(&mut self, angles: impl IntoIterator<Item = (&'a str, f64)>) -> Result<()> {
        for (name, value) in angles {
            self.set_angle(name, value)?;
        }
        Ok(())
    }

    /// Current angles in chain order.
    pub fn angles(&self) -> Vec<f64> {
        self.joints.iter().map(Joint::angle).collect()
    }

    /// Return every joint to its rest angle.
    pub fn reset(&mut self) {
        for joint in &mut self.joints {
            joint.angle = joint.rest_angle;
        }
    }
}

fn resolve_limits(def: &JointDefinition) -> Result<(f64, f64)> {
    let (min, max) = match (def.kind, def.min, def.max) {
        (_, Some(min), Some(max)) => (min, max),
        (JointKind::Continuous, None, None) => (-PI, PI),
        (kind, _, _) => {
            return Err(ModelError::malformed(format!(
                "{kind} joint `{}` needs both lower and upper limits",
                def.name
            )))
        }
    };
    if !min.is_finite() || !max.is_finite() {
        return Err(ModelError::malformed(format!(
            "joint `{}` has non-finite limits",
            def.name
        )));
    }
    if min > max {
        return Err(ModelError::malformed(format!(
            "joint `{}` has inverted limits: min {min} > max {max}",
            def.name
        )));
    }
    Ok((min, max))
}

/// Order definition indices root-to-leaf, rejecting anything but a path.
fn path_order(defs: &[JointDefinition]) -> Result<Vec<usize>> {
    let n = defs.len();
    let mut roots = Vec::new();
    let mut child: Vec<Option<usize>> = vec![None; n];

    for (i, def) in defs.iter().enumerate() {
        match def.parent {
            None => roots.push(i),
            Some(p) if p >= n => {
                return Err(ModelError::malformed(format!(
                    "joint `{}` references parent index {p}, but the chain has {n} joints",
                    def.name
                )))
            }
            Some(p) if p == i => {
                return Err(ModelError::malformed(format!(
                    "joint `{}` is its own parent",
                    def.name
                )))
            }
            Some(p) => {
                if let Some(existing) = child[p] {
                    return Err(ModelError::malformed(format!(
                        "joint `{}` has two children (`{}` and `{}`); the chain must be a single path",
                        defs[p].name, defs[existing].name, def.name
                    )));
                }
                child[p] = Some(i);
            }
        }
    }

    let root = match roots.as_slice() {
        [root] => *root,
        [] => return Err(ModelError::malformed("chain has no root joint")),
        _ => {
            let names: Vec<_> = roots.iter().map(|&i| defs[i].name.as_str()).collect();
            return Err(ModelError::malformed(format!(
                "chain has multiple roots: {}",
                names.join(", ")
            )));
        }
    };

    let mut order = Vec::with_capacity(n);
    let mut cursor = Some(root);
    while let Some(i) = cursor {
        order.push(i);
        cursor = child[i];
    }

    // With one root and at most one child each, anything not reached from
    // the root sits on a cycle.
    if order.len() != n {
        return Err(ModelError::malformed(
            "chain contains a cycle (some joints are unreachable from the root)",
        ));
    }
    Ok(order)
}
