use orrery_engine::{
    DelayTrigger, InputEvent, InputQueue, OrreryResult, PoseBuffer, Scenario, SceneConfig,
    SceneModel,
};

/// Generic scene runner that wires up the frame loop.
///
/// Each concrete scene (e.g., `solar-system`) creates a `thread_local!`
/// SceneRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SceneRunner<S: Scenario> {
    scenario: S,
    scene: Option<SceneModel>,
    input: InputQueue,
    poses: PoseBuffer,
    /// Fires at most once per frame interval; frames in between are skipped.
    frame_cap: DelayTrigger,
    config: SceneConfig,
    /// Wall-clock time the runner was created, for loading-time accounting.
    created_at: f64,
}

impl<S: Scenario> SceneRunner<S> {
    pub fn new(scenario: S, now: f64) -> Self {
        let config = scenario.config();
        let frame_cap = DelayTrigger::new(config.frame_interval())
            .with_ratio_ceiling(config.overage_ceiling);
        Self {
            scenario,
            scene: None,
            input: InputQueue::new(),
            poses: PoseBuffer::new(),
            frame_cap,
            config,
            created_at: now,
        }
    }

    /// Resolve the scene. A configuration error is logged and returned; the
    /// runner then stays uninitialized and every tick is a no-op.
    pub fn init(&mut self, now: f64) -> OrreryResult<()> {
        self.config = self.scenario.config();
        let table = self.scenario.table();
        let mut scene = match SceneModel::new(&table, self.config.clone()) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("scene configuration rejected: {err}");
                return Err(err);
            }
        };
        let loading = (now - self.created_at).max(0.0);
        scene.start(now, loading);
        self.scenario.init(&mut scene);
        self.poses.rebuild(&scene);
        log::info!(
            "scene ready: {} bodies, loading took {loading:.2}s",
            scene.len()
        );
        self.scene = Some(scene);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at wall-clock `now`. Returns false when the frame was
    /// skipped by the frame cap (or the runner is not initialized).
    pub fn tick(&mut self, now: f64) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        if !self.frame_cap.toggle(now, false) {
            return false;
        }

        self.scenario.update(scene, &self.input, now);
        scene.update(now);

        // Drain input after update
        self.input.drain();

        self.poses.rebuild(scene);
        true
    }

    pub fn scene(&self) -> Option<&SceneModel> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut SceneModel> {
        self.scene.as_mut()
    }

    pub fn scenario(&self) -> &S {
        &self.scenario
    }

    /// Overage of the last processed frame relative to the frame interval.
    pub fn frame_ratio(&self) -> f64 {
        self.frame_cap.overage_ratio()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn poses_ptr(&self) -> *const f32 {
        self.poses.poses_ptr()
    }

    pub fn pose_count(&self) -> u32 {
        self.poses.pose_count()
    }

    pub fn poses(&self) -> &PoseBuffer {
        &self.poses
    }

    // ---- Clock accessors ----

    pub fn play_time(&self, now: f64) -> f64 {
        self.scene.as_ref().map_or(0.0, |s| s.play_time(now))
    }

    pub fn is_paused(&self) -> bool {
        self.scene.as_ref().is_some_and(|s| s.is_paused())
    }
}
