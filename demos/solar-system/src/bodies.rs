/// Solar system data: physical constants and the body table.
///
/// Radii are in kilometres, periods in Earth days. `local_orbital_period`
/// is the number of spins per orbit (sidereal days per year).
/// Rendered sizes are exaggerated; the sun and the gas giants are shrunk
/// with scale modifiers so the inner planets stay readable.

use orrery_engine::{BodyRow, PhysicalConstants, SceneTable};

/// Constant indices.
pub const SUN: usize = 0;
pub const MERCURY: usize = 1;
pub const VENUS: usize = 2;
pub const EARTH: usize = 3;
pub const MOON: usize = 4;
pub const MARS: usize = 5;
pub const JUPITER: usize = 6;
pub const SATURN: usize = 7;
pub const URANUS: usize = 8;
pub const NEPTUNE: usize = 9;
pub const PLUTO: usize = 10;

/// Row indices in [`solar_table`]. Rows differ from constants once the
/// moon and the ring followers are interleaved.
pub mod row {
    pub const SUN: usize = 0;
    pub const MERCURY: usize = 1;
    pub const VENUS: usize = 2;
    pub const EARTH: usize = 3;
    pub const MOON: usize = 4;
    pub const MARS: usize = 5;
    pub const JUPITER: usize = 6;
    pub const SATURN: usize = 7;
    pub const SATURN_RINGS: usize = 8;
    pub const URANUS: usize = 9;
    pub const URANUS_RINGS: usize = 10;
    pub const NEPTUNE: usize = 11;
    pub const PLUTO: usize = 12;
    pub const COUNT: usize = 13;
}

/// Model slots the host renderer loads.
pub const MODEL_SPHERE: u32 = 0;
pub const MODEL_RING: u32 = 1;

/// Scale modifier applied to the sun so the inner orbits fit.
pub const SUN_SCALE_MODIFIER: f64 = 0.03;
const GIANT_SCALE_MODIFIER: f64 = 0.4;

struct Row {
    name: &'static str,
    radius: f64,
    orbital_period: f64,
    local_orbital_period: f64,
    ascending_node_deg: f64,
    inclination_deg: f64,
    axial_tilt_deg: f64,
}

#[rustfmt::skip]
const CONSTANTS: [Row; 11] = [
    Row { name: "Sun",     radius: 696_340.0, orbital_period: 1.0,       local_orbital_period: 1.0,       ascending_node_deg: 0.0,    inclination_deg: 0.0,   axial_tilt_deg: 7.25 },
    Row { name: "Mercury", radius: 2_439.7,   orbital_period: 87.969,    local_orbital_period: 1.5,       ascending_node_deg: 48.33,  inclination_deg: 7.005, axial_tilt_deg: 0.034 },
    Row { name: "Venus",   radius: 6_051.8,   orbital_period: 224.701,   local_orbital_period: 0.9246,    ascending_node_deg: 76.68,  inclination_deg: 3.39,  axial_tilt_deg: 177.36 },
    Row { name: "Earth",   radius: 6_371.0,   orbital_period: 365.256,   local_orbital_period: 366.256,   ascending_node_deg: 348.74, inclination_deg: 0.0,   axial_tilt_deg: 23.44 },
    Row { name: "Moon",    radius: 1_737.4,   orbital_period: 27.321661, local_orbital_period: 1.0,       ascending_node_deg: 125.08, inclination_deg: 5.145, axial_tilt_deg: 6.68 },
    Row { name: "Mars",    radius: 3_389.5,   orbital_period: 686.98,    local_orbital_period: 669.6,     ascending_node_deg: 49.56,  inclination_deg: 1.85,  axial_tilt_deg: 25.19 },
    Row { name: "Jupiter", radius: 69_911.0,  orbital_period: 4_332.59,  local_orbital_period: 10_476.8,  ascending_node_deg: 100.46, inclination_deg: 1.303, axial_tilt_deg: 3.13 },
    Row { name: "Saturn",  radius: 58_232.0,  orbital_period: 10_759.22, local_orbital_period: 24_232.0,  ascending_node_deg: 113.67, inclination_deg: 2.485, axial_tilt_deg: 26.73 },
    Row { name: "Uranus",  radius: 25_362.0,  orbital_period: 30_688.5,  local_orbital_period: 42_742.0,  ascending_node_deg: 74.01,  inclination_deg: 0.773, axial_tilt_deg: 97.77 },
    Row { name: "Neptune", radius: 24_622.0,  orbital_period: 60_182.0,  local_orbital_period: 89_690.0,  ascending_node_deg: 131.78, inclination_deg: 1.77,  axial_tilt_deg: 28.32 },
    Row { name: "Pluto",   radius: 1_188.3,   orbital_period: 90_560.0,  local_orbital_period: 14_178.0,  ascending_node_deg: 110.30, inclination_deg: 17.16, axial_tilt_deg: 122.53 },
];

pub fn physical_constants() -> Vec<PhysicalConstants> {
    CONSTANTS
        .iter()
        .map(|r| PhysicalConstants {
            name: r.name.to_string(),
            radius: r.radius,
            orbital_period: r.orbital_period,
            local_orbital_period: r.local_orbital_period,
            ascending_node_deg: r.ascending_node_deg,
            inclination_deg: r.inclination_deg,
            axial_tilt_deg: r.axial_tilt_deg,
            // Keeps the near side of the moon facing its parent.
            default_spin_deg: if r.name == "Moon" { 180.0 } else { 0.0 },
        })
        .collect()
}

fn planet(constant: usize, margin: f64) -> BodyRow {
    BodyRow::orbiting(row::SUN, constant)
        .named(CONSTANTS[constant].name)
        .with_margin(margin)
        .with_random_spin()
        .with_assets(MODEL_SPHERE, constant as u32)
}

/// Dependency-ordered body table with Earth as the reference body.
pub fn solar_table() -> SceneTable {
    let bodies = vec![
        BodyRow::root(SUN)
            .named("Sun")
            .with_scale_modifier(SUN_SCALE_MODIFIER)
            .with_assets(MODEL_SPHERE, SUN as u32),
        planet(MERCURY, 2.0),
        planet(VENUS, 1.5),
        planet(EARTH, 1.5).with_oval_ratio(1.02),
        BodyRow::orbiting(row::EARTH, MOON)
            .named("Moon")
            .with_margin(1.0)
            .with_assets(MODEL_SPHERE, MOON as u32),
        planet(MARS, 2.0).with_oval_ratio(1.09),
        planet(JUPITER, 3.0).with_scale_modifier(GIANT_SCALE_MODIFIER),
        planet(SATURN, 3.0).with_scale_modifier(GIANT_SCALE_MODIFIER),
        BodyRow::follower(row::SATURN, SATURN)
            .named("Saturn rings")
            .with_scale_modifier(GIANT_SCALE_MODIFIER)
            .with_assets(MODEL_RING, SATURN as u32),
        planet(URANUS, 2.0).with_scale_modifier(GIANT_SCALE_MODIFIER),
        BodyRow::follower(row::URANUS, URANUS)
            .named("Uranus rings")
            .with_scale_modifier(GIANT_SCALE_MODIFIER)
            .with_assets(MODEL_RING, URANUS as u32),
        planet(NEPTUNE, 2.0).with_scale_modifier(GIANT_SCALE_MODIFIER),
        planet(PLUTO, 2.0).with_oval_ratio(1.25),
    ];

    SceneTable {
        reference_body: row::EARTH,
        constants: physical_constants(),
        bodies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{BodyId, SceneConfig, SceneModel};

    fn scene() -> SceneModel {
        SceneModel::new(&solar_table(), SceneConfig::default()).unwrap()
    }

    #[test]
    fn table_resolves() {
        let scene = scene();
        assert_eq!(scene.len(), row::COUNT);
        assert_eq!(scene.find_by_name("Pluto").unwrap().id, BodyId(row::PLUTO));
    }

    #[test]
    fn moon_orbits_earth() {
        let scene = scene();
        let moon = scene.body(BodyId(row::MOON)).unwrap();
        assert_eq!(moon.parent, Some(BodyId(row::EARTH)));
        assert!(moon.is_animated());
    }

    #[test]
    fn rings_follow_their_planet() {
        let mut scene = scene();
        scene.randomize_orbit_angles();
        for (ring, planet) in [(row::SATURN_RINGS, row::SATURN), (row::URANUS_RINGS, row::URANUS)] {
            let body = scene.body(BodyId(ring)).unwrap();
            assert!(body.is_follower());
            assert_eq!(
                scene.position(BodyId(ring)),
                scene.position(BodyId(planet))
            );
        }
    }

    #[test]
    fn planets_are_packed_outward() {
        let scene = scene();
        let planets = [
            row::MERCURY,
            row::VENUS,
            row::EARTH,
            row::MARS,
            row::JUPITER,
            row::SATURN,
            row::URANUS,
            row::NEPTUNE,
            row::PLUTO,
        ];
        let radii: Vec<f64> = planets
            .iter()
            .map(|&i| scene.orbit_radius(BodyId(i)).unwrap())
            .collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]), "{radii:?}");
    }

    #[test]
    fn earth_runs_at_reference_delay() {
        let scene = scene();
        let earth = scene.body(BodyId(row::EARTH)).unwrap();
        assert!((earth.orbital_delay - scene.reference_delay()).abs() < 1e-9);
    }
}
