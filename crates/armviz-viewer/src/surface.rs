//! Drawing surfaces.

use tracing::debug;

use crate::error::SurfaceError;
use crate::scene::Frame;

/// A render target the viewer draws frames onto.
///
/// The viewer acquires the surface on mount and calls [`release`] exactly
/// once, on unmount or when the viewer is dropped.
///
/// [`release`]: Surface::release
pub trait Surface {
    /// Present one frame.
    fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError>;

    /// Free any drawing resources. No `draw` follows.
    fn release(&mut self);
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        (**self).draw(frame)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Owns a surface and releases it exactly once, at the latest on drop.
pub(crate) struct SurfaceGuard {
    surface: Option<Box<dyn Surface>>,
}

impl SurfaceGuard {
    pub(crate) fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Draw if the surface is still held.
    pub(crate) fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        match &mut self.surface {
            Some(surface) => surface.draw(frame),
            None => Err(SurfaceError("surface already released".into())),
        }
    }

    pub(crate) fn release(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.release();
            debug!("surface released");
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        self.surface.is_none()
    }
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        self.release();
    }
}
