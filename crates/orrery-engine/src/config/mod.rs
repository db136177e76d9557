pub mod resolver;
pub mod settings;
pub mod table;

pub use resolver::{resolve, Resolved};
pub use settings::SceneConfig;
pub use table::{AssetRefs, BodyRow, PhysicalConstants, SceneTable};
