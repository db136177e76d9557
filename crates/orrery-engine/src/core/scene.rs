use glam::{DQuat, DVec3};

use crate::api::error::{check_delay, OrreryError, OrreryResult};
use crate::api::types::{BodyId, Motion};
use crate::components::body::Body;
use crate::config::resolver::{accumulate_ancestor_angles, resolve, scaled_delay};
use crate::config::{PhysicalConstants, SceneConfig, SceneTable};
use crate::orbit::{wrap_degrees, OrbitStepper};
use super::rng::Rng;
use super::time::PlayClock;

/// Owns every body, stepper and the play clock of one scene.
///
/// Bodies are stored in table order, which is also update order: a parent is
/// always placed before any of its children reads its position.
pub struct SceneModel {
    bodies: Vec<Body>,
    steppers: Vec<OrbitStepper>,
    constants: Vec<PhysicalConstants>,
    reference_body: usize,
    config: SceneConfig,
    clock: PlayClock,
    rng: Rng,
}

impl SceneModel {
    /// Resolve `table` and build the scene. Fails on any configuration error.
    pub fn new(table: &SceneTable, config: SceneConfig) -> OrreryResult<Self> {
        let resolved = resolve(table, &config)?;
        Ok(Self {
            bodies: resolved.bodies,
            steppers: resolved.steppers,
            constants: table.constants.clone(),
            reference_body: table.reference_body,
            clock: PlayClock::new(config.pause_debounce),
            rng: Rng::new(config.seed),
            config,
        })
    }

    /// Prepare the clock for the first frame: loading time is excluded from
    /// play time and the scene optionally starts paused.
    /// Steppers are anchored at the current play time, so the first frame
    /// does not depend on the host clock's epoch.
    pub fn start(&mut self, now: f64, loading_seconds: f64) {
        self.clock.add_elapsed_seconds(loading_seconds);
        if self.config.start_paused {
            self.clock.force_pause(now);
        }
        let play_time = self.clock.play_time(now);
        for stepper in &mut self.steppers {
            stepper.anchor(play_time);
        }
    }

    /// Advance every animated body to the play time at `now` and place all
    /// bodies. Returns false when the clock is paused (nothing moves).
    pub fn update(&mut self, now: f64) -> bool {
        if !self.clock.can_update_animation() {
            return false;
        }
        let play_time = self.clock.play_time(now);
        let resumed = self.clock.take_resumed();
        let force = self.clock.just_started() || resumed;

        for i in 0..self.bodies.len() {
            if let Motion::Animated(s) = self.bodies[i].motion {
                self.steppers[s].advance(
                    play_time,
                    self.config.spin_precision,
                    self.config.orbit_precision,
                    force,
                );
            }
            self.place(i);
        }

        self.clock.set_just_started(false);
        true
    }

    /// Copy stepper output into body `i`, relative to its (already placed) parent.
    fn place(&mut self, i: usize) {
        let parent_position = self.bodies[i]
            .parent
            .map(|p| self.bodies[p.index()].position)
            .unwrap_or(DVec3::ZERO);

        match self.bodies[i].motion {
            Motion::Animated(s) => {
                let stepper = &self.steppers[s];
                let body = &mut self.bodies[i];
                body.local_position = stepper.position();
                body.position = parent_position + body.local_position;
                body.rotation_deg = stepper.spin_angle();
            }
            // rotation stays the follower's own
            Motion::Follower => self.bodies[i].position = parent_position,
            Motion::Static => {}
        }
    }

    fn place_all(&mut self) {
        for i in 0..self.bodies.len() {
            self.place(i);
        }
    }

    // -- Per-body queries --

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn position(&self, id: BodyId) -> Option<DVec3> {
        self.body(id).map(|b| b.position)
    }

    pub fn local_position(&self, id: BodyId) -> Option<DVec3> {
        self.body(id).map(|b| b.local_position)
    }

    pub fn rotation_deg(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.rotation_deg)
    }

    pub fn ancestor_ascending_node_sum(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.ancestor_ascending_node_sum)
    }

    pub fn ancestor_inclination_sum(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.ancestor_inclination_sum)
    }

    pub fn scale(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.scale)
    }

    pub fn orbit_radius(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.orbit_radius)
    }

    /// Rotation from the local orbit frame into world space.
    pub fn orbit_plane(&self, id: BodyId) -> Option<DQuat> {
        self.body(id).map(Body::orbit_plane)
    }

    /// The stepper driving `id`, if the body is animated.
    pub fn stepper(&self, id: BodyId) -> Option<&OrbitStepper> {
        match self.body(id)?.motion {
            Motion::Animated(s) => self.steppers.get(s),
            _ => None,
        }
    }

    pub fn stepper_mut(&mut self, id: BodyId) -> Option<&mut OrbitStepper> {
        match self.bodies.get(id.index())?.motion {
            Motion::Animated(s) => self.steppers.get_mut(s),
            _ => None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // -- Clock --

    pub fn pause_toggle_requested(&mut self, now: f64) -> bool {
        self.clock.pause_toggle_requested(now)
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn play_time(&self, now: f64) -> f64 {
        self.clock.play_time(now)
    }

    pub fn can_update_animation(&self) -> bool {
        self.clock.can_update_animation()
    }

    pub fn add_elapsed_seconds(&mut self, seconds: f64) {
        self.clock.add_elapsed_seconds(seconds);
    }

    pub fn clock(&self) -> &PlayClock {
        &self.clock
    }

    // -- Tuning --

    pub fn reference_delay(&self) -> f64 {
        self.config.reference_delay
    }

    /// Re-derive every animated body's delay from a new reference delay.
    /// If the value or any derived delay is invalid, nothing changes.
    pub fn set_reference_delay(&mut self, seconds: f64) -> OrreryResult<()> {
        let delays = match self.derive_delays(seconds) {
            Ok(delays) => delays,
            Err(err) => {
                log::warn!("rejected reference delay {seconds}: {err}");
                return Err(err);
            }
        };
        for (i, s, delay) in delays {
            self.steppers[s].set_orbital_delay(delay)?;
            self.bodies[i].orbital_delay = delay;
        }
        self.config.reference_delay = seconds;
        log::debug!("reference delay set to {seconds:.2}s");
        Ok(())
    }

    /// (body index, stepper index, delay) for every animated body, all checked.
    fn derive_delays(&self, seconds: f64) -> OrreryResult<Vec<(usize, usize, f64)>> {
        check_delay(seconds)?;
        let reference_period =
            self.constants[self.bodies[self.reference_body].constant].orbital_period;
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, body)| match body.motion {
                Motion::Animated(s) => Some((i, s, body.constant)),
                _ => None,
            })
            .map(|(i, s, constant)| {
                let delay = scaled_delay(
                    seconds,
                    self.constants[constant].orbital_period,
                    reference_period,
                );
                Ok((i, s, check_delay(delay)?))
            })
            .collect()
    }

    /// Give every animated body a uniformly random orbit angle. Spin is random
    /// too when the row asked for it, otherwise it keeps its default offset
    /// from the orbit angle.
    pub fn randomize_orbit_angles(&mut self) {
        for body in &self.bodies {
            if let Motion::Animated(s) = body.motion {
                let orbit = self.rng.next_degrees();
                let spin = if body.randomize_spin {
                    self.rng.next_degrees()
                } else {
                    wrap_degrees(body.default_spin_deg + orbit)
                };
                let stepper = &mut self.steppers[s];
                stepper.set_orbit_angle(orbit);
                stepper.set_spin_angle(spin);
            }
        }
        self.place_all();
    }

    /// Change a body's own inclination; every descendant's accumulated
    /// inclination follows.
    pub fn set_inclination(&mut self, id: BodyId, degrees: f64) -> OrreryResult<()> {
        let body = self
            .bodies
            .get_mut(id.index())
            .ok_or(OrreryError::UnknownBody(id.index()))?;
        body.inclination_deg = degrees;
        if let Motion::Animated(s) = body.motion {
            self.steppers[s].set_orbit_tilt(degrees);
        }
        accumulate_ancestor_angles(&mut self.bodies);
        self.place_all();
        Ok(())
    }

    pub fn set_ascending_node(&mut self, id: BodyId, degrees: f64) -> OrreryResult<()> {
        let body = self
            .bodies
            .get_mut(id.index())
            .ok_or(OrreryError::UnknownBody(id.index()))?;
        body.ascending_node_deg = degrees;
        accumulate_ancestor_angles(&mut self.bodies);
        Ok(())
    }
}
