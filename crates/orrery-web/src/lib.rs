pub mod runner;

pub use runner::SceneRunner;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, input handlers, pose accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod scene;
/// use scene::MyScene;
///
/// orrery_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$scene_type`: The scenario struct type that implements `orrery_engine::Scenario`
/// - `$scene_name`: A string literal used in the initialization log message
///
/// All time arguments are wall-clock seconds from the host's monotonic clock
/// (e.g. `performance.now() / 1000`).
#[macro_export]
macro_rules! export_scene {
    ($scene_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$scene_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$scene_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Create the runner. Call once, as early as possible, so loading time
        /// can be excluded from play time.
        #[wasm_bindgen]
        pub fn scene_create(now: f64) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let scenario = <$scene_type>::new();
            let runner = $crate::SceneRunner::new(scenario, now);
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        /// Resolve the scene. Throws on a configuration error, so the host
        /// never enters its frame loop with broken geometry.
        #[wasm_bindgen]
        pub fn scene_init(now: f64) -> Result<(), JsValue> {
            let result = with_runner(|r| r.init(now))
                .ok_or_else(|| JsValue::from_str("scene_create() was not called"))?;
            result.map_err(|err| JsValue::from_str(&err.to_string()))?;
            log::info!("{}: initialized", $scene_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn scene_tick(now: f64) -> bool {
            with_runner(|r| r.tick(now)).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn scene_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn scene_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn scene_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_poses_ptr() -> *const f32 {
            with_runner(|r| r.poses_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_pose_count() -> u32 {
            with_runner(|r| r.pose_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_pose_floats() -> u32 {
            BodyPose::FLOATS as u32
        }

        #[wasm_bindgen]
        pub fn get_play_time(now: f64) -> f64 {
            with_runner(|r| r.play_time(now)).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn is_paused() -> bool {
            with_runner(|r| r.is_paused()).unwrap_or(false)
        }
    };
}
