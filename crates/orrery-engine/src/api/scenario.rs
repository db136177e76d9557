use crate::config::{SceneConfig, SceneTable};
use crate::core::scene::SceneModel;
use crate::input::queue::InputQueue;

/// The contract every concrete scene fulfills.
///
/// The runner resolves [`Scenario::table`] once, then calls
/// [`Scenario::update`] on every processed frame before the scene animates.
pub trait Scenario {
    /// Return scene tuning. Called once before the table is resolved.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// The dependency-ordered body table.
    fn table(&self) -> SceneTable;

    /// Optional setup after the scene is resolved (initial placement etc.).
    fn init(&mut self, _scene: &mut SceneModel) {}

    /// Translate input into scene actions (pause, tuning). `now` is wall-clock seconds.
    fn update(&mut self, scene: &mut SceneModel, input: &InputQueue, now: f64);
}
