use glam::{DQuat, DVec3};

use crate::api::types::{BodyId, Motion};
use crate::config::table::AssetRefs;

/// Resolved state of one body.
///
/// Built once by the resolver; afterwards only the position, rotation and
/// tuned angles change.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub parent: Option<BodyId>,
    /// Index into the scene's physical-constant list.
    pub constant: usize,
    pub motion: Motion,

    pub scale: f64,
    pub scale_modifier: f64,
    pub margin: f64,
    pub oval_ratio: f64,
    pub randomize_spin: bool,
    pub orbit_radius: f64,
    /// Seconds of play time per orbit; zero for bodies without a stepper.
    pub orbital_delay: f64,

    pub ascending_node_deg: f64,
    pub axial_tilt_deg: f64,
    pub inclination_deg: f64,
    pub default_spin_deg: f64,

    /// Offset from the parent, as produced by the stepper.
    pub local_position: DVec3,
    /// Parent world position plus local offset.
    pub position: DVec3,
    pub rotation_deg: f64,

    /// Sum of ascending nodes over every ancestor (excluding this body).
    pub ancestor_ascending_node_sum: f64,
    /// Sum of inclinations over every ancestor plus this body's own.
    pub ancestor_inclination_sum: f64,

    pub assets: AssetRefs,
}

impl Body {
    pub fn is_animated(&self) -> bool {
        matches!(self.motion, Motion::Animated(_))
    }

    pub fn is_follower(&self) -> bool {
        self.motion == Motion::Follower
    }

    /// Rendered sphere radius for a model of the given unit radius.
    pub fn rendered_radius(&self, unit_sphere_radius: f64) -> f64 {
        self.scale * unit_sphere_radius
    }

    /// Orientation of this body's orbital plane: yaw by the ascending node
    /// (inherited plus own), then tilt by the accumulated inclination.
    pub fn orbit_plane(&self) -> DQuat {
        let node = (self.ancestor_ascending_node_sum + self.ascending_node_deg).to_radians();
        let tilt = self.ancestor_inclination_sum.to_radians();
        DQuat::from_rotation_y(node) * DQuat::from_rotation_x(tilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body {
            id: BodyId(1),
            name: "earth".into(),
            parent: Some(BodyId(0)),
            constant: 1,
            motion: Motion::Animated(0),
            scale: 1.5,
            scale_modifier: 1.0,
            margin: 0.0,
            oval_ratio: 1.0,
            randomize_spin: false,
            orbit_radius: 10.0,
            orbital_delay: 480.0,
            ascending_node_deg: 0.0,
            axial_tilt_deg: 23.4,
            inclination_deg: 0.0,
            default_spin_deg: 0.0,
            local_position: DVec3::ZERO,
            position: DVec3::ZERO,
            rotation_deg: 0.0,
            ancestor_ascending_node_sum: 0.0,
            ancestor_inclination_sum: 0.0,
            assets: AssetRefs::default(),
        }
    }

    #[test]
    fn rendered_radius_scales_unit_sphere() {
        assert_eq!(body().rendered_radius(2.0), 3.0);
    }

    #[test]
    fn flat_plane_is_identity() {
        let q = body().orbit_plane();
        let v = q * DVec3::new(0.0, 0.0, 5.0);
        assert!((v - DVec3::new(0.0, 0.0, 5.0)).length() < 1e-9);
    }

    #[test]
    fn inclination_lifts_orbit_out_of_plane() {
        let mut b = body();
        b.ancestor_inclination_sum = 90.0;
        let v = b.orbit_plane() * DVec3::new(0.0, 0.0, 1.0);
        assert!(v.y.abs() > 0.99, "{v:?}");
    }
}
