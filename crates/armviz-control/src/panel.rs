//! Slider panel bound to a shared joint chain.

use armviz_model::{ModelError, SharedChain};
use serde::Serialize;
use tracing::debug;

use crate::observer::{FnObserver, JointObserver, ObserverId};

/// Convert a slider value in degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert a joint angle in radians to degrees for display.
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// One slider, bound to one joint.
///
/// The range comes from the joint limits when the panel is built and never
/// changes afterwards; only `value_deg` follows the joint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    /// Joint this slider drives.
    pub joint: String,
    /// Lower bound in degrees.
    pub min_deg: f64,
    /// Upper bound in degrees.
    pub max_deg: f64,
    /// Current readout in degrees.
    pub value_deg: f64,
}

/// Pointer state of the panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No slider is held.
    #[default]
    Idle,
    /// A slider is being dragged.
    Dragging {
        /// Joint of the held slider.
        joint: String,
    },
}

/// Maps slider input to joint-angle updates and fans them out to observers.
pub struct JointControlPanel {
    chain: SharedChain,
    sliders: Vec<Slider>,
    observers: Vec<(ObserverId, Box<dyn JointObserver>)>,
    next_observer: u64,
    drag: DragState,
}

impl JointControlPanel {
    /// Build one slider per joint from the chain's limits and angles.
    pub fn new(chain: SharedChain) -> Self {
        let sliders = chain
            .borrow()
            .joints()
            .iter()
            .map(|joint| Slider {
                joint: joint.name().to_string(),
                min_deg: radians_to_degrees(joint.min()),
                max_deg: radians_to_degrees(joint.max()),
                value_deg: radians_to_degrees(joint.angle()),
            })
            .collect();
        Self {
            chain,
            sliders,
            observers: Vec::new(),
            next_observer: 0,
            drag: DragState::Idle,
        }
    }

    /// The chain this panel writes to.
    pub fn chain(&self) -> &SharedChain {
        &self.chain
    }

    /// Sliders in chain order.
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Slider for a joint.
    pub fn slider(&self, joint: &str) -> Option<&Slider> {
        self.sliders.iter().find(|s| s.joint == joint)
    }

    /// Handle a slider `input` event.
    ///
    /// Converts to radians, stores the clamped angle, updates the readout
    /// and notifies observers with the committed radians. Returns the
    /// committed value. An unknown joint changes nothing and notifies no one.
    pub fn on_slider_change(&mut self, joint: &str, degrees: f64) -> Result<f64, ModelError> {
        self.commit(joint, degrees_to_radians(degrees))
    }

    /// Set a joint directly in radians, with the same clamping and
    /// notification as slider input.
    pub fn set_radians(&mut self, joint: &str, radians: f64) -> Result<f64, ModelError> {
        self.commit(joint, radians)
    }

    /// Return every joint to its rest angle, notifying observers per joint.
    pub fn reset(&mut self) {
        let angles: Vec<(String, f64)> = {
            let mut chain = self.chain.borrow_mut();
            chain.reset();
            chain
                .joints()
                .iter()
                .map(|j| (j.name().to_string(), j.angle()))
                .collect()
        };
        for (joint, radians) in angles {
            self.refresh_readout(&joint, radians);
            self.notify(&joint, radians);
        }
    }

    fn commit(&mut self, joint: &str, radians: f64) -> Result<f64, ModelError> {
        // The borrow ends before observers run so they can read the chain.
        let stored = self.chain.borrow_mut().set_angle(joint, radians)?;
        debug!(joint, radians = stored, "joint changed");
        self.refresh_readout(joint, stored);
        self.notify(joint, stored);
        Ok(stored)
    }

    fn refresh_readout(&mut self, joint: &str, radians: f64) {
        if let Some(slider) = self.sliders.iter_mut().find(|s| s.joint == joint) {
            slider.value_deg = radians_to_degrees(radians);
        }
    }

    fn notify(&mut self, joint: &str, radians: f64) {
        for (_, observer) in &mut self.observers {
            observer.joint_changed(joint, radians);
        }
    }

    /// Register an observer for committed joint changes.
    pub fn subscribe(&mut self, observer: impl JointObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Register a closure for committed joint changes.
    pub fn subscribe_fn(&mut self, f: impl FnMut(&str, f64) + 'static) -> ObserverId {
        self.subscribe(FnObserver(f))
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// A slider was grabbed.
    pub fn begin_drag(&mut self, joint: &str) -> Result<(), ModelError> {
        self.chain.borrow().position(joint)?;
        self.drag = DragState::Dragging {
            joint: joint.to_string(),
        };
        Ok(())
    }

    /// The held slider was released.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Current pointer state.
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }
}

impl std::fmt::Debug for JointControlPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JointControlPanel")
            .field("sliders", &self.sliders)
            .field("observers", &self.observers.len())
            .field("drag", &self.drag)
            .finish()
    }
}
