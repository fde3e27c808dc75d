#![warn(missing_docs)]

//! Slider control panel for armviz joint chains.
//!
//! The [`JointControlPanel`] is the only writer of a [`SharedChain`]: it
//! turns slider input in degrees into clamped joint angles in radians and
//! tells every subscribed [`JointObserver`] about the committed value.
//! [`CodeSync`] is one such observer, mapping the joint being edited to a
//! code snippet.
//!
//! [`SharedChain`]: armviz_model::SharedChain

mod code_sync;
mod observer;
mod panel;

pub use code_sync::CodeSync;
pub use observer::{JointObserver, ObserverId};
pub use panel::{degrees_to_radians, radians_to_degrees, DragState, JointControlPanel, Slider};
