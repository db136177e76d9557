//! Turns a flat body table into resolved bodies and their steppers.
//!
//! One forward pass in table order. Every parent is resolved before its
//! children, so scale, orbit packing and ancestor sums can read the parent's
//! finished values directly.

use glam::DVec3;

use crate::api::error::{check_delay, OrreryError, OrreryResult};
use crate::api::types::{BodyId, Motion};
use crate::components::body::Body;
use crate::orbit::OrbitStepper;
use super::settings::SceneConfig;
use super::table::SceneTable;

/// Output of [`resolve`]: one body per table row, one stepper per animated row.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub bodies: Vec<Body>,
    pub steppers: Vec<OrbitStepper>,
}

/// Check the dependency order and every cross-table index before any
/// geometry is computed.
pub fn validate(table: &SceneTable) -> OrreryResult<()> {
    let count = table.bodies.len();
    if table.reference_body >= count {
        return Err(OrreryError::UnknownReferenceBody {
            index: table.reference_body,
            count,
        });
    }

    for (index, row) in table.bodies.iter().enumerate() {
        if let Some(parent) = row.parent {
            if parent >= index {
                return Err(OrreryError::ForwardParent { body: index, parent });
            }
        }
        if row.constant >= table.constants.len() {
            return Err(OrreryError::UnknownConstant {
                body: index,
                constant: row.constant,
                available: table.constants.len(),
            });
        }
    }

    let reference = &table.constants[table.bodies[table.reference_body].constant];
    if !(reference.radius > 0.0) {
        return Err(OrreryError::InvalidReference(format!(
            "'{}' has non-positive radius {}",
            reference.name, reference.radius
        )));
    }
    if !(reference.orbital_period > 0.0) {
        return Err(OrreryError::InvalidReference(format!(
            "'{}' has non-positive orbital period {}",
            reference.name, reference.orbital_period
        )));
    }
    Ok(())
}

/// Revolution delay of a body, proportional to its physical period.
pub fn scaled_delay(reference_delay: f64, body_period: f64, reference_period: f64) -> f64 {
    reference_delay * (body_period / reference_period)
}

/// Recompute both ancestor sums for every body in a single forward pass.
/// Requires parents to precede children.
pub fn accumulate_ancestor_angles(bodies: &mut [Body]) {
    for i in 0..bodies.len() {
        let (node_sum, incl_sum) = match bodies[i].parent {
            Some(p) => {
                let parent = &bodies[p.index()];
                (
                    parent.ancestor_ascending_node_sum + parent.ascending_node_deg,
                    parent.ancestor_inclination_sum + bodies[i].inclination_deg,
                )
            }
            None => (0.0, bodies[i].inclination_deg),
        };
        bodies[i].ancestor_ascending_node_sum = node_sum;
        bodies[i].ancestor_inclination_sum = incl_sum;
    }
}

/// Resolve every row of `table`. Configuration errors are returned before
/// any body is built.
pub fn resolve(table: &SceneTable, config: &SceneConfig) -> OrreryResult<Resolved> {
    validate(table)?;
    check_delay(config.reference_delay)?;

    let unit = config.unit_sphere_radius;
    let reference = &table.constants[table.bodies[table.reference_body].constant];
    let count = table.bodies.len();

    let mut bodies: Vec<Body> = Vec::with_capacity(count);
    let mut steppers = Vec::new();
    // last packed child of each parent
    let mut last_child: Vec<Option<usize>> = vec![None; count];

    for (index, row) in table.bodies.iter().enumerate() {
        let constants = &table.constants[row.constant];

        let scale = if index == table.reference_body {
            config.reference_scale
        } else {
            constants.radius / reference.radius * config.reference_scale * row.scale_modifier
        };

        let orbit_radius = match (row.animated, row.parent) {
            (true, Some(parent)) => {
                let own = scale * unit;
                let spacing = row.margin * config.distance_scale;
                let radius = match last_child[parent] {
                    None => bodies[parent].rendered_radius(unit) + own + spacing,
                    Some(prev) => {
                        let prev = &bodies[prev];
                        prev.orbit_radius + prev.rendered_radius(unit) + own + spacing
                    }
                };
                last_child[parent] = Some(index);
                radius
            }
            _ => 0.0,
        };

        let parent_position = row
            .parent
            .map(|p| bodies[p].position)
            .unwrap_or(DVec3::ZERO);

        let (motion, orbital_delay, local_position, rotation_deg) = if row.animated {
            let delay = scaled_delay(
                config.reference_delay,
                constants.orbital_period,
                reference.orbital_period,
            );
            let stepper = OrbitStepper::new(delay, constants.local_orbital_period)?
                .with_shape(orbit_radius, row.oval_ratio, constants.inclination_deg)
                .with_angles(constants.default_spin_deg, 0.0);
            let local = stepper.position();
            let spin = stepper.spin_angle();
            steppers.push(stepper);
            (Motion::Animated(steppers.len() - 1), delay, local, spin)
        } else if row.parent.is_some() {
            (Motion::Follower, 0.0, DVec3::ZERO, constants.default_spin_deg)
        } else {
            (Motion::Static, 0.0, DVec3::ZERO, constants.default_spin_deg)
        };

        let body = Body {
            id: BodyId(index),
            name: if row.name.is_empty() {
                constants.name.clone()
            } else {
                row.name.clone()
            },
            parent: row.parent.map(BodyId),
            constant: row.constant,
            motion,
            scale,
            scale_modifier: row.scale_modifier,
            margin: row.margin,
            oval_ratio: row.oval_ratio,
            randomize_spin: row.randomize_spin,
            orbit_radius,
            orbital_delay,
            ascending_node_deg: constants.ascending_node_deg,
            axial_tilt_deg: constants.axial_tilt_deg,
            inclination_deg: constants.inclination_deg,
            default_spin_deg: constants.default_spin_deg,
            local_position,
            position: parent_position + local_position,
            rotation_deg,
            ancestor_ascending_node_sum: 0.0,
            ancestor_inclination_sum: 0.0,
            assets: row.assets,
        };
        log::debug!(
            "resolved {} '{}': scale {:.4}, orbit {:.3}, delay {:.2}s, {:?}",
            body.id,
            body.name,
            body.scale,
            body.orbit_radius,
            body.orbital_delay,
            body.motion
        );
        bodies.push(body);
    }

    accumulate_ancestor_angles(&mut bodies);

    log::info!(
        "scene resolved: {} bodies, {} animated, reference '{}'",
        bodies.len(),
        steppers.len(),
        reference.name
    );
    Ok(Resolved { bodies, steppers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{constants, sun_earth_moon};
    use crate::config::table::BodyRow;

    #[test]
    fn resolves_sun_earth_moon() {
        let config = SceneConfig::default();
        let resolved = resolve(&sun_earth_moon(), &config).unwrap();
        assert_eq!(resolved.bodies.len(), 3);
        assert_eq!(resolved.steppers.len(), 2);
        assert_eq!(resolved.bodies[0].motion, Motion::Static);
        assert_eq!(resolved.bodies[1].motion, Motion::Animated(0));
        assert_eq!(resolved.bodies[2].motion, Motion::Animated(1));
        assert_eq!(resolved.bodies[2].parent, Some(BodyId(1)));
    }

    #[test]
    fn reference_scale_is_master_input() {
        let mut config = SceneConfig::default();
        config.reference_scale = 2.0;
        let resolved = resolve(&sun_earth_moon(), &config).unwrap();
        let earth = &resolved.bodies[1];
        let moon = &resolved.bodies[2];
        assert_eq!(earth.scale, 2.0);
        assert!((moon.scale - 1737.4 / 6371.0 * 2.0).abs() < 1e-12);
        // sun row carries a 0.03 modifier
        assert!((resolved.bodies[0].scale - 696340.0 / 6371.0 * 2.0 * 0.03).abs() < 1e-9);
    }

    #[test]
    fn siblings_pack_outward() {
        let mut table = sun_earth_moon();
        // second planet around the sun, after the moon row
        table.bodies.push(BodyRow::orbiting(0, 3).with_margin(4.0));
        let mut config = SceneConfig::default();
        config.distance_scale = 1.5;
        let resolved = resolve(&table, &config).unwrap();
        let unit = config.unit_sphere_radius;

        let sun = &resolved.bodies[0];
        let earth = &resolved.bodies[1];
        let mars = &resolved.bodies[3];

        let first = sun.rendered_radius(unit) + earth.rendered_radius(unit) + 2.0 * 1.5;
        assert!((earth.orbit_radius - first).abs() < 1e-9);

        let expected = earth.orbit_radius
            + earth.rendered_radius(unit)
            + mars.rendered_radius(unit)
            + 4.0 * 1.5;
        assert!((mars.orbit_radius - expected).abs() < 1e-9);
        assert!(mars.orbit_radius > earth.orbit_radius);
    }

    #[test]
    fn moon_packs_against_its_own_parent() {
        let config = SceneConfig::default();
        let resolved = resolve(&sun_earth_moon(), &config).unwrap();
        let earth = &resolved.bodies[1];
        let moon = &resolved.bodies[2];
        let expected = earth.rendered_radius(2.0) + moon.rendered_radius(2.0) + 1.0;
        assert!((moon.orbit_radius - expected).abs() < 1e-9);
    }

    #[test]
    fn delay_scales_with_period() {
        let mut table = sun_earth_moon();
        let mut doubled = constants("double", 3000.0, 365.256 * 2.0);
        doubled.local_orbital_period = 10.0;
        table.constants.push(doubled);
        let idx = table.constants.len() - 1;
        table.bodies.push(BodyRow::orbiting(0, idx));

        let mut config = SceneConfig::default();
        config.reference_delay = 600.0;
        let resolved = resolve(&table, &config).unwrap();
        assert!((resolved.bodies[1].orbital_delay - 600.0).abs() < 1e-9);
        assert!((resolved.bodies[3].orbital_delay - 1200.0).abs() < 1e-9);
        assert!((resolved.steppers[2].orbital_delay() - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn reference_body_delay_is_exact() {
        for delay in [120.0, 480.0, 0.1] {
            assert_eq!(scaled_delay(delay, 365.256, 365.256), delay);
            assert_eq!(scaled_delay(delay, 27.321661, 27.321661), delay);
        }
    }

    #[test]
    fn inclination_accumulates_down_the_chain() {
        let resolved = resolve(&sun_earth_moon(), &SceneConfig::default()).unwrap();
        let moon = &resolved.bodies[2];
        assert!((moon.ancestor_inclination_sum - 5.0).abs() < 1e-12);
        // moon inherits earth's and the sun's nodes, not its own
        assert!((moon.ancestor_ascending_node_sum - (0.0 + 348.74)).abs() < 1e-9);
        assert_eq!(resolved.bodies[1].ancestor_ascending_node_sum, 0.0);
    }

    #[test]
    fn forward_parent_is_fatal() {
        let mut table = sun_earth_moon();
        table.bodies[1].parent = Some(2);
        let err = resolve(&table, &SceneConfig::default()).unwrap_err();
        assert!(matches!(err, OrreryError::ForwardParent { body: 1, parent: 2 }));
        assert!(err.is_configuration());
    }

    #[test]
    fn self_parent_is_fatal() {
        let mut table = sun_earth_moon();
        table.bodies[2].parent = Some(2);
        assert!(matches!(
            validate(&table),
            Err(OrreryError::ForwardParent { body: 2, parent: 2 })
        ));
    }

    #[test]
    fn unknown_constant_is_fatal() {
        let mut table = sun_earth_moon();
        table.constants.truncate(2);
        assert!(matches!(
            resolve(&table, &SceneConfig::default()),
            Err(OrreryError::UnknownConstant { body: 2, constant: 2, available: 2 })
        ));
    }

    #[test]
    fn unknown_reference_is_fatal() {
        let mut table = sun_earth_moon();
        table.reference_body = 9;
        assert!(matches!(
            validate(&table),
            Err(OrreryError::UnknownReferenceBody { index: 9, count: 3 })
        ));
    }

    #[test]
    fn zero_period_reference_is_rejected() {
        let mut table = sun_earth_moon();
        table.constants[1].orbital_period = 0.0;
        assert!(matches!(
            validate(&table),
            Err(OrreryError::InvalidReference(_))
        ));
    }

    #[test]
    fn followers_do_not_take_an_orbit_slot() {
        let mut table = sun_earth_moon();
        // ring on earth listed before the moon
        table.bodies.insert(2, BodyRow::follower(1, 1).named("ring"));
        let resolved = resolve(&table, &SceneConfig::default()).unwrap();
        let ring = &resolved.bodies[2];
        let earth = &resolved.bodies[1];
        let moon = &resolved.bodies[3];
        assert!(ring.is_follower());
        assert_eq!(ring.orbit_radius, 0.0);
        assert_eq!(ring.position, earth.position);
        let expected = earth.rendered_radius(2.0) + moon.rendered_radius(2.0) + 1.0;
        assert!((moon.orbit_radius - expected).abs() < 1e-9);
    }
}
