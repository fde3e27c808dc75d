#![warn(missing_docs)]

//! Joint chain model for armviz robot arms.
//!
//! A [`JointChain`] is the single source of truth for the arm's pose: an
//! ordered path of rotational joints, each with fixed limits, a fixed
//! parent-relative offset, and a current angle that is always kept inside
//! its limits.
//!
//! # Example
//!
//! ```
//! use armviz_model::{ChainDefinition, JointChain};
//!
//! let mut chain = JointChain::initialize(ChainDefinition::reference_arm()).unwrap();
//!
//! // Out-of-range input is clamped, not rejected.
//! let stored = chain.set_angle("elbow_joint", 3.0).unwrap();
//! assert_eq!(stored, 2.35);
//! ```

mod chain;
mod definition;
mod error;
mod joint;

pub use chain::{JointChain, SharedChain};
pub use definition::{ChainDefinition, JointDefinition, JointKind};
pub use error::{ModelError, Result};
pub use joint::Joint;

pub use armviz_math::Axis;
