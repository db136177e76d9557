use serde::{Deserialize, Serialize};

/// Reference data for one kind of celestial body. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Human-readable name (e.g., "earth").
    pub name: String,
    /// Mean radius (km). Only ratios between bodies matter.
    pub radius: f64,
    /// Orbital period in days of the reference body.
    pub orbital_period: f64,
    /// Spins per orbit, measured in the body's own days.
    #[serde(default = "default_local_period")]
    pub local_orbital_period: f64,
    #[serde(default)]
    pub ascending_node_deg: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub axial_tilt_deg: f64,
    /// Spin angle relative to the orbit angle when placement is not randomized.
    #[serde(default)]
    pub default_spin_deg: f64,
}

/// Model and texture indices, consumed only by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRefs {
    #[serde(default)]
    pub model: u32,
    #[serde(default)]
    pub texture: u32,
}

/// One row of the body table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRow {
    #[serde(default)]
    pub name: String,
    /// Runs its own orbit stepper. Non-animated bodies with a parent follow it.
    pub animated: bool,
    #[serde(default = "default_one")]
    pub scale_modifier: f64,
    /// Spacing added between this body's orbit and the previous one.
    #[serde(default)]
    pub margin: f64,
    /// Major over minor axis of the orbit ellipse.
    #[serde(default = "default_one")]
    pub oval_ratio: f64,
    #[serde(default)]
    pub randomize_spin: bool,
    /// Index of the parent row. Must be smaller than this row's index.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Index into [`SceneTable::constants`].
    pub constant: usize,
    #[serde(default)]
    pub assets: AssetRefs,
}

impl BodyRow {
    /// Animated row orbiting `parent`.
    pub fn orbiting(parent: usize, constant: usize) -> Self {
        Self {
            name: String::new(),
            animated: true,
            scale_modifier: 1.0,
            margin: 0.0,
            oval_ratio: 1.0,
            randomize_spin: false,
            parent: Some(parent),
            constant,
            assets: AssetRefs::default(),
        }
    }

    /// Static row with no parent (a star at the origin).
    pub fn root(constant: usize) -> Self {
        Self {
            animated: false,
            parent: None,
            ..Self::orbiting(0, constant)
        }
    }

    /// Non-animated row that copies `parent`'s position every frame.
    pub fn follower(parent: usize, constant: usize) -> Self {
        Self {
            animated: false,
            ..Self::orbiting(parent, constant)
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_scale_modifier(mut self, modifier: f64) -> Self {
        self.scale_modifier = modifier;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_oval_ratio(mut self, ratio: f64) -> Self {
        self.oval_ratio = ratio;
        self
    }

    pub fn with_random_spin(mut self) -> Self {
        self.randomize_spin = true;
        self
    }

    pub fn with_assets(mut self, model: u32, texture: u32) -> Self {
        self.assets = AssetRefs { model, texture };
        self
    }
}

/// Flat, dependency-ordered description of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTable {
    /// Row index of the body every scale and delay is measured against.
    pub reference_body: usize,
    pub constants: Vec<PhysicalConstants>,
    /// Rows listed ancestors-first.
    pub bodies: Vec<BodyRow>,
}

fn default_one() -> f64 {
    1.0
}

fn default_local_period() -> f64 {
    1.0
}

impl SceneTable {
    /// Parse a table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_table() {
        let json = r#"{
            "reference_body": 1,
            "constants": [
                { "name": "sun", "radius": 696340.0, "orbital_period": 1.0 },
                { "name": "earth", "radius": 6371.0, "orbital_period": 365.256, "local_orbital_period": 366.256 }
            ],
            "bodies": [
                { "animated": false, "constant": 0, "scale_modifier": 0.03 },
                { "animated": true, "constant": 1, "parent": 0, "margin": 2.0, "oval_ratio": 1.5 }
            ]
        }"#;
        let table = SceneTable::from_json(json).unwrap();
        assert_eq!(table.bodies.len(), 2);
        assert_eq!(table.bodies[0].parent, None);
        assert_eq!(table.bodies[1].parent, Some(0));
        assert_eq!(table.bodies[1].scale_modifier, 1.0);
        assert_eq!(table.constants[0].local_orbital_period, 1.0);
        assert_eq!(table.bodies[1].assets, AssetRefs::default());
    }

    #[test]
    fn builders_set_motion_kind() {
        let star = BodyRow::root(0);
        assert!(!star.animated);
        assert_eq!(star.parent, None);

        let ring = BodyRow::follower(3, 2).with_assets(1, 7);
        assert!(!ring.animated);
        assert_eq!(ring.parent, Some(3));
        assert_eq!(ring.assets.texture, 7);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let json = r#"{ "reference_body": 0, "constants": [], "bodies": [ { "animated": true } ] }"#;
        assert!(SceneTable::from_json(json).is_err());
    }
}
