pub mod api;
pub mod core;
pub mod components;
pub mod config;
pub mod orbit;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::error::{OrreryError, OrreryResult};
pub use api::scenario::Scenario;
pub use api::types::{BodyId, Motion};
pub use components::body::Body;
pub use config::{AssetRefs, BodyRow, PhysicalConstants, SceneConfig, SceneTable};
pub use config::resolver::{resolve, Resolved};
pub use crate::core::rng::Rng;
pub use crate::core::scene::SceneModel;
pub use crate::core::time::PlayClock;
pub use crate::core::trigger::DelayTrigger;
pub use orbit::{wrap_degrees, Advanced, OrbitStepper};
pub use renderer::pose::{BodyPose, PoseBuffer};
pub use input::queue::{InputEvent, InputQueue};
