//! Viewer lifecycle: mount, render loop, load, unmount.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use armviz_control::{JointControlPanel, JointObserver, Slider};
use armviz_kinematics::{compute_transforms, LinkTransform};
use armviz_model::{ChainDefinition, JointChain, SharedChain};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::LoadError;
use crate::scene::{
    arm_visuals, placeholder_primitive, Frame, FrameContent, Lighting, OrbitCamera, Primitive,
};
use crate::source::ModelSource;
use crate::surface::{Surface, SurfaceGuard};

/// Where the viewer is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerStatus {
    /// Waiting for the model definition.
    Loading,
    /// Model loaded; sliders are live.
    Ready,
    /// Loading failed; a placeholder is drawn instead.
    Placeholder {
        /// Why loading failed.
        reason: String,
    },
    /// Stopped. Nothing is drawn and late loads are ignored.
    Unmounted,
}

struct ViewerState {
    status: ViewerStatus,
    chain: Option<SharedChain>,
    panel: Option<Rc<RefCell<JointControlPanel>>>,
    pending_observers: Vec<Box<dyn JointObserver>>,
    camera: OrbitCamera,
    lighting: Lighting,
    placeholder: Primitive,
    link_radius: f64,
    surface: SurfaceGuard,
    frame_index: u64,
    frames_drawn: u64,
}

impl ViewerState {
    fn new(surface: Box<dyn Surface>, config: &ViewerConfig) -> Self {
        Self {
            status: ViewerStatus::Loading,
            chain: None,
            panel: None,
            pending_observers: Vec::new(),
            camera: OrbitCamera::from_config(&config.camera),
            lighting: Lighting::from_config(&config.lighting),
            placeholder: placeholder_primitive(config),
            link_radius: config.link_radius,
            surface: SurfaceGuard::new(surface),
            frame_index: 0,
            frames_drawn: 0,
        }
    }

    /// Apply the outcome of the load task.
    fn finish_load(&mut self, result: Result<ChainDefinition, LoadError>) {
        if self.status == ViewerStatus::Unmounted {
            debug!("model load finished after unmount; ignoring");
            return;
        }
        match result.and_then(|def| Ok(JointChain::initialize(def)?)) {
            Ok(chain) => {
                info!(
                    model = chain.name().unwrap_or("unnamed"),
                    joints = chain.len(),
                    "model loaded"
                );
                let chain = chain.into_shared();
                let mut panel = JointControlPanel::new(Rc::clone(&chain));
                for observer in self.pending_observers.drain(..) {
                    panel.subscribe(observer);
                }
                self.chain = Some(chain);
                self.panel = Some(Rc::new(RefCell::new(panel)));
                self.status = ViewerStatus::Ready;
            }
            Err(e) => {
                warn!(error = %e, "model failed to load; showing placeholder");
                self.pending_observers.clear();
                self.status = ViewerStatus::Placeholder {
                    reason: e.to_string(),
                };
            }
        }
    }

    /// Draw one frame. Returns false once the viewer is unmounted.
    fn render_frame(&mut self) -> bool {
        let content = match &self.status {
            ViewerStatus::Unmounted => return false,
            ViewerStatus::Loading => FrameContent::Loading,
            ViewerStatus::Placeholder { reason } => FrameContent::Placeholder {
                reason: reason.clone(),
                primitive: self.placeholder,
            },
            ViewerStatus::Ready => match &self.chain {
                Some(chain) => FrameContent::Arm(arm_visuals(&chain.borrow(), self.link_radius)),
                None => FrameContent::Loading,
            },
        };
        let frame = Frame {
            index: self.frame_index,
            camera: self.camera,
            lighting: self.lighting,
            content,
        };
        self.frame_index += 1;
        match self.surface.draw(&frame) {
            Ok(()) => self.frames_drawn += 1,
            Err(e) => warn!(error = %e, frame = frame.index, "failed to draw frame"),
        }
        true
    }

    fn shutdown(&mut self) -> bool {
        if self.status == ViewerStatus::Unmounted {
            return false;
        }
        self.status = ViewerStatus::Unmounted;
        self.chain = None;
        self.panel = None;
        self.pending_observers.clear();
        self.surface.release();
        true
    }
}

/// Composition root: wires model loading, the control panel, the renderer
/// and a drawing surface into a per-frame loop.
pub struct Viewer;

impl Viewer {
    /// Start the viewer on `surface`, loading the model with `loader`.
    ///
    /// Must be called from within a tokio [`LocalSet`]: the render loop and
    /// the load run as local tasks on the current thread. A failed load is
    /// logged and shown as a placeholder; it never reaches the caller.
    /// An invalid config is logged too; the frame rate then falls back as
    /// described on [`ViewerConfig::frame_period`].
    ///
    /// [`LocalSet`]: tokio::task::LocalSet
    pub fn mount<S, F>(surface: S, config: ViewerConfig, loader: F) -> ViewerHandle
    where
        S: Surface + 'static,
        F: Future<Output = Result<ChainDefinition, LoadError>> + 'static,
    {
        if let Err(e) = config.validate() {
            warn!(error = %e, "invalid viewer config");
        }
        let state = Rc::new(RefCell::new(ViewerState::new(Box::new(surface), &config)));

        let load_task = tokio::task::spawn_local({
            let state = Rc::clone(&state);
            async move {
                let result = loader.await;
                state.borrow_mut().finish_load(result);
            }
        });
        let frame_task = tokio::task::spawn_local(frame_loop(Rc::clone(&state), config.frame_period()));

        info!(frame_rate = config.frame_rate, "viewer mounted");
        ViewerHandle {
            state,
            load_task,
            frame_task,
        }
    }

    /// [`mount`](Viewer::mount) with a [`ModelSource`].
    pub fn mount_source<S>(surface: S, config: ViewerConfig, source: ModelSource) -> ViewerHandle
    where
        S: Surface + 'static,
    {
        Self::mount(surface, config, source.load())
    }

    /// Stop the viewer and release its surface.
    pub fn unmount(handle: ViewerHandle) {
        handle.unmount();
    }
}

async fn frame_loop(state: Rc<RefCell<ViewerState>>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        if !state.borrow_mut().render_frame() {
            break;
        }
    }
}

/// A mounted viewer. Dropping the handle unmounts it.
pub struct ViewerHandle {
    state: Rc<RefCell<ViewerState>>,
    load_task: JoinHandle<()>,
    frame_task: JoinHandle<()>,
}

impl ViewerHandle {
    /// Current lifecycle state.
    pub fn status(&self) -> ViewerStatus {
        self.state.borrow().status.clone()
    }

    /// True until the model has loaded or failed.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().status == ViewerStatus::Loading
    }

    /// Frames successfully presented so far.
    pub fn frames_drawn(&self) -> u64 {
        self.state.borrow().frames_drawn
    }

    /// Cloned out so the state borrow ends before the panel runs observers.
    fn panel(&self) -> Option<Rc<RefCell<JointControlPanel>>> {
        self.state.borrow().panel.clone()
    }

    fn chain(&self) -> Option<SharedChain> {
        self.state.borrow().chain.clone()
    }

    /// Forward slider input (degrees) to the control panel.
    ///
    /// Returns the committed angle in radians. Input before the model is
    /// ready, or for a joint the model does not have, is ignored. So is
    /// input sent from inside an observer while a change is being
    /// delivered.
    pub fn slider_input(&self, joint: &str, degrees: f64) -> Option<f64> {
        let Some(panel) = self.panel() else {
            debug!(joint, "slider input while no model is loaded; ignoring");
            return None;
        };
        let Ok(mut panel) = panel.try_borrow_mut() else {
            debug!(joint, "slider input during observer notification; ignoring");
            return None;
        };
        match panel.on_slider_change(joint, degrees) {
            Ok(radians) => Some(radians),
            Err(e) => {
                debug!(error = %e, "ignoring slider input");
                None
            }
        }
    }

    /// Return every joint to its rest angle.
    pub fn reset_pose(&self) {
        let Some(panel) = self.panel() else {
            return;
        };
        let Ok(mut panel) = panel.try_borrow_mut() else {
            debug!("reset during observer notification; ignoring");
            return;
        };
        panel.reset();
    }

    /// Subscribe to committed joint changes. Observers registered before
    /// the model loads are attached once it does.
    ///
    /// Observers may read the handle (status, angles, transforms) while
    /// they run.
    pub fn subscribe(&self, observer: impl JointObserver + 'static) {
        let (panel, loading) = {
            let state = self.state.borrow();
            (state.panel.clone(), state.status == ViewerStatus::Loading)
        };
        let Some(panel) = panel else {
            if loading {
                self.state.borrow_mut().pending_observers.push(Box::new(observer));
            } else {
                debug!("subscribe after load failure or unmount; ignoring");
            }
            return;
        };
        let Ok(mut panel) = panel.try_borrow_mut() else {
            debug!("subscribe during observer notification; ignoring");
            return;
        };
        panel.subscribe(observer);
    }

    /// Slider descriptors, empty until the model is ready.
    pub fn sliders(&self) -> Vec<Slider> {
        let Some(panel) = self.panel() else {
            return Vec::new();
        };
        let sliders = panel
            .try_borrow()
            .map(|p| p.sliders().to_vec())
            .unwrap_or_default();
        sliders
    }

    /// Current joint angles by name, in chain order.
    pub fn angles(&self) -> Option<Vec<(String, f64)>> {
        let chain = self.chain()?;
        let chain = chain.borrow();
        let angles = chain
            .joints()
            .iter()
            .map(|j| (j.name().to_string(), j.angle()))
            .collect();
        Some(angles)
    }

    /// Current joint transforms.
    pub fn transforms(&self) -> Option<Vec<LinkTransform>> {
        let chain = self.chain()?;
        let transforms = compute_transforms(&chain.borrow());
        Some(transforms)
    }

    /// Current camera.
    pub fn camera(&self) -> OrbitCamera {
        self.state.borrow().camera
    }

    /// Orbit the camera (radians).
    pub fn orbit(&self, d_azimuth: f64, d_elevation: f64) {
        self.state.borrow_mut().camera.orbit(d_azimuth, d_elevation);
    }

    /// Zoom the camera by a distance factor.
    pub fn zoom(&self, factor: f64) {
        self.state.borrow_mut().camera.zoom(factor);
    }

    /// Stop the render loop, cancel any in-flight load and release the
    /// surface.
    pub fn unmount(self) {
        // Drop does the work.
    }

    fn shutdown(&mut self) {
        let stopped = self.state.borrow_mut().shutdown();
        self.load_task.abort();
        self.frame_task.abort();
        if stopped {
            info!("viewer unmounted");
        }
    }
}

impl Drop for ViewerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ViewerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ViewerHandle")
            .field("status", &state.status)
            .field("frames_drawn", &state.frames_drawn)
            .field("surface_released", &state.surface.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use approx::assert_relative_eq;
    use armviz_control::CodeSync;
    use armviz_model::{Axis, JointDefinition};
    use std::cell::Cell;
    use std::f64::consts::FRAC_PI_2;
    use tokio::task::LocalSet;
    use tokio::time::sleep;

    #[derive(Clone, Default)]
    struct Recording {
        frames: Rc<RefCell<Vec<Frame>>>,
        releases: Rc<Cell<u32>>,
        fail_every: Option<u64>,
        attempts: Rc<Cell<u64>>,
    }

    impl Surface for Recording {
        fn draw(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
            let n = self.attempts.get() + 1;
            self.attempts.set(n);
            if self.fail_every.is_some_and(|k| n % k == 0) {
                return Err(SurfaceError("lost context".into()));
            }
            self.frames.borrow_mut().push(frame.clone());
            Ok(())
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    impl Recording {
        fn last(&self) -> Frame {
            self.frames.borrow().last().cloned().unwrap()
        }

        fn count(&self) -> usize {
            self.frames.borrow().len()
        }
    }

    fn config(frame_rate: f64) -> ViewerConfig {
        ViewerConfig {
            frame_rate,
            ..ViewerConfig::default()
        }
    }

    fn arm(frame: &Frame) -> &[crate::scene::LinkVisual] {
        match &frame.content {
            FrameContent::Arm(visuals) => visuals,
            other => panic!("expected arm content, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loads_reference_and_draws_arm() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let handle = Viewer::mount_source(surface.clone(), config(60.0), ModelSource::Reference);
                assert!(handle.is_loading());

                sleep(Duration::from_millis(100)).await;
                assert_eq!(handle.status(), ViewerStatus::Ready);
                assert_eq!(arm(&surface.last()).len(), 4);
                assert_eq!(handle.sliders().len(), 4);
                assert!(handle.frames_drawn() > 0);

                let indices: Vec<u64> = surface.frames.borrow().iter().map(|f| f.index).collect();
                assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slider_visible_on_next_frame() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let cfg = config(50.0);
                let period = cfg.frame_period();
                let handle = Viewer::mount_source(surface.clone(), cfg, ModelSource::Reference);
                sleep(period + period / 2).await;

                let before = arm(&surface.last())[1].pose;
                let committed = handle.slider_input("shoulder_joint", 90.0).unwrap();
                assert_relative_eq!(committed, FRAC_PI_2, epsilon = 1e-12);

                let drawn = surface.count();
                sleep(period + period / 2).await;
                assert!(surface.count() > drawn);
                let after = arm(&surface.frames.borrow()[drawn])[1].pose;
                assert_ne!(before, after);
                let center = after.apply_point(&armviz_math::Point3::origin());
                assert_relative_eq!(center.x, 0.15, epsilon = 1e-12);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_clamping_through_viewer() {
        LocalSet::new()
            .run_until(async {
                let handle = Viewer::mount_source(Recording::default(), config(60.0), ModelSource::Reference);
                sleep(Duration::from_millis(50)).await;
                let elbow = handle.slider_input("elbow_joint", 3.0_f64.to_degrees()).unwrap();
                assert_eq!(elbow, 2.35);
                let angles = handle.angles().unwrap();
                assert_eq!(angles[2], ("elbow_joint".to_string(), 2.35));
                assert_eq!(handle.slider_input("gripper_joint", 10.0), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_model_shows_placeholder() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let def = ChainDefinition {
                    name: None,
                    joints: vec![JointDefinition::revolute("j", Axis::Z, 1.0, -1.0)],
                };
                let handle = Viewer::mount_source(surface.clone(), config(30.0), ModelSource::Definition(def));
                sleep(Duration::from_millis(200)).await;

                match handle.status() {
                    ViewerStatus::Placeholder { reason } => assert!(reason.contains("inverted")),
                    other => panic!("expected placeholder, got {other:?}"),
                }
                assert!(matches!(surface.last().content, FrameContent::Placeholder { .. }));
                assert_eq!(handle.slider_input("j", 0.0), None);
                assert!(handle.sliders().is_empty());
                assert!(handle.transforms().is_none());

                // The loop keeps running after the failure.
                let drawn = surface.count();
                sleep(Duration::from_millis(200)).await;
                assert!(surface.count() > drawn);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_description_shows_placeholder() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let handle = Viewer::mount_source(
                    surface.clone(),
                    config(30.0),
                    ModelSource::UrdfString("<robot><joint".into()),
                );
                sleep(Duration::from_millis(100)).await;
                assert!(matches!(handle.status(), ViewerStatus::Placeholder { .. }));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_mid_load() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let completed = Rc::new(Cell::new(false));
                let loader = {
                    let completed = Rc::clone(&completed);
                    async move {
                        sleep(Duration::from_secs(1)).await;
                        completed.set(true);
                        Ok(ChainDefinition::reference_arm())
                    }
                };
                let handle = Viewer::mount(surface.clone(), config(60.0), loader);
                sleep(Duration::from_millis(100)).await;
                assert!(handle.is_loading());
                assert!(surface
                    .frames
                    .borrow()
                    .iter()
                    .all(|f| f.content == FrameContent::Loading));

                Viewer::unmount(handle);
                let drawn = surface.count();
                assert_eq!(surface.releases.get(), 1);

                sleep(Duration::from_secs(5)).await;
                assert_eq!(surface.count(), drawn);
                assert!(!completed.get());
                assert_eq!(surface.releases.get(), 1);
            })
            .await;
    }

    #[test]
    fn test_late_load_after_unmount_is_noop() {
        let surface = Recording::default();
        let mut state = ViewerState::new(Box::new(surface.clone()), &ViewerConfig::default());
        assert!(state.shutdown());
        state.finish_load(Ok(ChainDefinition::reference_arm()));
        assert_eq!(state.status, ViewerStatus::Unmounted);
        assert!(state.panel.is_none());
        assert!(!state.render_frame());
        assert_eq!(surface.count(), 0);
        assert!(!state.shutdown());
        drop(state);
        assert_eq!(surface.releases.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_once() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                {
                    let _handle = Viewer::mount_source(surface.clone(), config(60.0), ModelSource::Reference);
                    sleep(Duration::from_millis(50)).await;
                }
                let drawn = surface.count();
                sleep(Duration::from_millis(500)).await;
                assert_eq!(surface.count(), drawn);
                assert_eq!(surface.releases.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_subscribed_before_load() {
        LocalSet::new()
            .run_until(async {
                let handle = Viewer::mount_source(Recording::default(), config(60.0), ModelSource::Reference);
                let sync = Rc::new(RefCell::new(CodeSync::reference_arm()));
                handle.subscribe(Rc::clone(&sync));
                sleep(Duration::from_millis(50)).await;

                handle.slider_input("elbow_joint", 45.0).unwrap();
                assert_eq!(sync.borrow().active(), Some("elbow_joint"));
                assert!(sync.borrow().active_snippet().unwrap().contains("0.7854"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_rate() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let _handle = Viewer::mount_source(surface.clone(), config(10.0), ModelSource::Reference);
                sleep(Duration::from_millis(995)).await;
                assert_eq!(surface.count(), 10);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_errors_do_not_stop_loop() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording {
                    fail_every: Some(2),
                    ..Recording::default()
                };
                let handle = Viewer::mount_source(surface.clone(), config(10.0), ModelSource::Reference);
                sleep(Duration::from_millis(995)).await;
                assert_eq!(surface.attempts.get(), 10);
                assert_eq!(handle.frames_drawn(), 5);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_camera_controls_reach_frames() {
        LocalSet::new()
            .run_until(async {
                let surface = Recording::default();
                let cfg = config(20.0);
                let period = cfg.frame_period();
                let handle = Viewer::mount_source(surface.clone(), cfg, ModelSource::Reference);
                let start = handle.camera();
                handle.orbit(0.5, 0.0);
                handle.zoom(2.0);
                sleep(period + period / 2).await;
                let camera = surface.last().camera;
                assert_relative_eq!(camera.azimuth, start.azimuth + 0.5, epsilon = 1e-12);
                assert_relative_eq!(camera.distance, start.distance * 2.0, epsilon = 1e-12);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_pose() {
        LocalSet::new()
            .run_until(async {
                let handle = Viewer::mount_source(Recording::default(), config(60.0), ModelSource::Reference);
                sleep(Duration::from_millis(50)).await;
                handle.slider_input("base_joint", 30.0).unwrap();
                handle.reset_pose();
                let transforms = handle.transforms().unwrap();
                assert!(transforms[0].world.rotation().angle() < 1e-12);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_after_load_and_after_failure() {
        LocalSet::new()
            .run_until(async {
                let handle = Viewer::mount_source(Recording::default(), config(60.0), ModelSource::Reference);
                sleep(Duration::from_millis(50)).await;
                let sync = Rc::new(RefCell::new(CodeSync::reference_arm()));
                handle.subscribe(Rc::clone(&sync));
                handle.slider_input("wrist_joint", 90.0).unwrap();
                assert_eq!(sync.borrow().active(), Some("wrist_joint"));

                let failed = Viewer::mount_source(
                    Recording::default(),
                    config(60.0),
                    ModelSource::UrdfString("<robot><joint".into()),
                );
                sleep(Duration::from_millis(50)).await;
                let late = Rc::new(RefCell::new(CodeSync::reference_arm()));
                failed.subscribe(Rc::clone(&late));
                assert_eq!(failed.slider_input("wrist_joint", 90.0), None);
                assert_eq!(late.borrow().active(), None);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unusable_frame_rate_falls_back() {
        LocalSet::new()
            .run_until(async {
                for frame_rate in [0.0, -10.0, f64::NAN] {
                    let surface = Recording::default();
                    let handle = Viewer::mount_source(surface.clone(), config(frame_rate), ModelSource::Reference);
                    sleep(Duration::from_millis(105)).await;
                    // Default 60 fps: ticks at 0, 16.6, ..., 100 ms.
                    assert_eq!(surface.count(), 7);
                    assert_eq!(handle.status(), ViewerStatus::Ready);
                }
            })
            .await;
    }

    /// Reads the handle back from inside a change notification.
    struct ReadBack {
        handle: std::rc::Weak<ViewerHandle>,
        seen: Rc<RefCell<Vec<(Option<Vec<(String, f64)>>, Option<f64>)>>>,
    }

    impl JointObserver for ReadBack {
        fn joint_changed(&mut self, _joint: &str, _radians: f64) {
            if let Some(handle) = self.handle.upgrade() {
                let angles = handle.angles();
                let nested = handle.slider_input("base_joint", 10.0);
                assert!(handle.transforms().is_some());
                assert_eq!(handle.sliders().len(), 0);
                self.seen.borrow_mut().push((angles, nested));
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_can_read_handle() {
        LocalSet::new()
            .run_until(async {
                let handle = Rc::new(Viewer::mount_source(
                    Recording::default(),
                    config(60.0),
                    ModelSource::Reference,
                ));
                sleep(Duration::from_millis(50)).await;
                let seen = Rc::new(RefCell::new(Vec::new()));
                handle.subscribe(ReadBack {
                    handle: Rc::downgrade(&handle),
                    seen: Rc::clone(&seen),
                });

                let committed = handle.slider_input("elbow_joint", 45.0).unwrap();
                let seen = seen.borrow();
                assert_eq!(seen.len(), 1);
                let (angles, nested) = &seen[0];
                assert_eq!(
                    angles.as_ref().unwrap()[2],
                    ("elbow_joint".to_string(), committed)
                );
                assert_eq!(*nested, None);
                assert_eq!(handle.angles().unwrap()[0].1, 0.0);
                assert_eq!(handle.sliders().len(), 4);
            })
            .await;
    }
}
