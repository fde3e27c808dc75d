//! Joint-to-snippet lookup shown next to the sliders.

use std::collections::BTreeMap;

use crate::observer::JointObserver;
use crate::panel::radians_to_degrees;

/// Maps joints to display snippets and tracks which joint is being edited.
///
/// Templates may contain `{angle}` (radians) and `{degrees}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct CodeSync {
    snippets: BTreeMap<String, String>,
    active: Option<(String, f64)>,
}

impl CodeSync {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the snippet for a joint.
    pub fn with_snippet(mut self, joint: impl Into<String>, template: impl Into<String>) -> Self {
        self.snippets.insert(joint.into(), template.into());
        self
    }

    /// Snippets for the reference arm.
    pub fn reference_arm() -> Self {
        Self::new()
            .with_snippet(
                "base_joint",
                "# Rotate the whole arm about the vertical axis\narm.set_joint(\"base_joint\", {angle})  # {degrees}°",
            )
            .with_snippet(
                "shoulder_joint",
                "# Pitch the upper arm\narm.set_joint(\"shoulder_joint\", {angle})  # {degrees}°",
            )
            .with_snippet(
                "elbow_joint",
                "# Bend the forearm\narm.set_joint(\"elbow_joint\", {angle})  # {degrees}°",
            )
            .with_snippet(
                "wrist_joint",
                "# Roll the end effector\narm.set_joint(\"wrist_joint\", {angle})  # {degrees}°",
            )
    }

    /// Raw template for a joint.
    pub fn snippet(&self, joint: &str) -> Option<&str> {
        self.snippets.get(joint).map(String::as_str)
    }

    /// Template for a joint with the placeholders filled in.
    pub fn render(&self, joint: &str, radians: f64) -> Option<String> {
        self.snippet(joint).map(|t| {
            t.replace("{angle}", &format!("{radians:.4}"))
                .replace("{degrees}", &format!("{:.1}", radians_to_degrees(radians)))
        })
    }

    /// Joint most recently changed, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_ref().map(|(joint, _)| joint.as_str())
    }

    /// Rendered snippet for the joint most recently changed.
    pub fn active_snippet(&self) -> Option<String> {
        let (joint, radians) = self.active.as_ref()?;
        self.render(joint, *radians)
    }
}

impl JointObserver for CodeSync {
    fn joint_changed(&mut self, joint: &str, radians: f64) {
        self.active = Some((joint.to_string(), radians));
    }
}
