//! Joint-change observers.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives every committed joint change as `(joint name, radians)`.
///
/// Observers run synchronously inside the slider event, after the chain
/// has been updated and released, so they may read the chain.
pub trait JointObserver {
    /// Called once per committed change.
    fn joint_changed(&mut self, joint: &str, radians: f64);
}

impl<T: JointObserver + ?Sized> JointObserver for Rc<RefCell<T>> {
    fn joint_changed(&mut self, joint: &str, radians: f64) {
        self.borrow_mut().joint_changed(joint, radians);
    }
}

impl<T: JointObserver + ?Sized> JointObserver for Box<T> {
    fn joint_changed(&mut self, joint: &str, radians: f64) {
        (**self).joint_changed(joint, radians);
    }
}

/// Adapts a closure into an observer.
pub(crate) struct FnObserver<F>(pub(crate) F);

impl<F: FnMut(&str, f64)> JointObserver for FnObserver<F> {
    fn joint_changed(&mut self, joint: &str, radians: f64) {
        (self.0)(joint, radians)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);
