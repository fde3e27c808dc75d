#![warn(missing_docs)]

//! Interactive viewer for armviz joint chains.
//!
//! [`Viewer::mount`] loads a model in the background, then draws the posed
//! arm onto a [`Surface`] at a fixed frame rate while slider input flows
//! through a [`JointControlPanel`](armviz_control::JointControlPanel) into
//! the shared chain. A model that fails to load is replaced by a
//! placeholder; the loop keeps running either way.
//!
//! Everything runs on the current thread, inside a tokio `LocalSet`:
//!
//! ```no_run
//! use armviz_viewer::{Frame, ModelSource, Surface, SurfaceError, Viewer, ViewerConfig};
//!
//! struct Headless;
//!
//! impl Surface for Headless {
//!     fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
//!         println!("frame {}", frame.index);
//!         Ok(())
//!     }
//!     fn release(&mut self) {}
//! }
//!
//! # async fn run() {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let viewer = Viewer::mount_source(Headless, ViewerConfig::default(), ModelSource::Reference);
//!         tokio::time::sleep(std::time::Duration::from_millis(100)).await;
//!         viewer.slider_input("elbow_joint", 45.0);
//!         viewer.unmount();
//!     })
//!     .await;
//! # }
//! ```

mod config;
mod error;
mod scene;
mod source;
mod surface;
mod viewer;

pub use config::{CameraConfig, LightingConfig, PlaceholderConfig, ViewerConfig};
pub use error::{ConfigError, LoadError, SurfaceError};
pub use scene::{
    arm_visuals, placeholder_primitive, Frame, FrameContent, Lighting, LinkVisual, OrbitCamera,
    Primitive,
};
pub use source::ModelSource;
pub use surface::Surface;
pub use viewer::{Viewer, ViewerHandle, ViewerStatus};
