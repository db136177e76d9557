//! Quantized spin/orbit animator for one body.
//!
//! Angles advance in discrete steps rather than continuously: a step only
//! happens once the elapsed play time exceeds the time needed to move
//! `10^-precision` degrees. Smoothness (precision) is therefore independent
//! of speed (orbital delay and local period).

use glam::DVec3;

use crate::api::error::{check_delay, check_period, OrreryResult};
use super::wrap_degrees;

/// Precisions above this would make the step unit vanish in f64.
pub const MAX_PRECISION: u32 = 9;

/// Which angles moved during one [`OrbitStepper::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advanced {
    pub spin: bool,
    pub orbit: bool,
}

#[derive(Debug, Clone)]
pub struct OrbitStepper {
    /// Seconds of play time for one full 360° orbit.
    orbital_delay: f64,
    /// Spins per full orbit (the body's own days per year).
    local_period: f64,

    delay_per_orbit_degree: f64,
    delay_per_local_day: f64,
    delay_per_spin_degree: f64,

    spin_deg: f64,
    last_spin_step: f64,
    orbit_deg: f64,
    last_orbit_step: f64,

    oval_ratio: f64,
    orbit_radius: f64,
    orbit_tilt_deg: f64,
    position: DVec3,
}

impl OrbitStepper {
    pub fn new(orbital_delay: f64, local_period: f64) -> OrreryResult<Self> {
        let mut stepper = Self {
            orbital_delay: check_delay(orbital_delay)?,
            local_period: check_period(local_period)?,
            delay_per_orbit_degree: 0.0,
            delay_per_local_day: 0.0,
            delay_per_spin_degree: 0.0,
            spin_deg: 0.0,
            last_spin_step: 0.0,
            orbit_deg: 0.0,
            last_orbit_step: 0.0,
            oval_ratio: 1.0,
            orbit_radius: 1.0,
            orbit_tilt_deg: 0.0,
            position: DVec3::ZERO,
        };
        stepper.init_delays();
        stepper.recompute_position();
        Ok(stepper)
    }

    pub fn with_shape(mut self, orbit_radius: f64, oval_ratio: f64, orbit_tilt_deg: f64) -> Self {
        self.orbit_radius = orbit_radius;
        self.oval_ratio = oval_ratio;
        self.orbit_tilt_deg = orbit_tilt_deg;
        self.recompute_position();
        self
    }

    pub fn with_angles(mut self, spin_deg: f64, orbit_deg: f64) -> Self {
        self.spin_deg = wrap_degrees(spin_deg);
        self.orbit_deg = wrap_degrees(orbit_deg);
        self.recompute_position();
        self
    }

    /// Treat `play_time` as the moment both angles were last stepped, so the
    /// next step only covers time elapsed since then.
    pub fn anchor(&mut self, play_time: f64) {
        self.last_spin_step = play_time;
        self.last_orbit_step = play_time;
    }

    fn init_delays(&mut self) {
        self.delay_per_orbit_degree = self.orbital_delay / 360.0;
        self.delay_per_local_day = self.orbital_delay / self.local_period;
        self.delay_per_spin_degree = self.delay_per_local_day / 360.0;
    }

    /// Step spin and orbit toward `now` (play-time seconds). `force` steps
    /// both regardless of the elapsed threshold.
    pub fn advance(
        &mut self,
        now: f64,
        spin_precision: u32,
        orbit_precision: u32,
        force: bool,
    ) -> Advanced {
        let spin = step_angle(
            now,
            &mut self.last_spin_step,
            self.delay_per_spin_degree,
            spin_precision,
            &mut self.spin_deg,
            force,
        );
        let orbit = step_angle(
            now,
            &mut self.last_orbit_step,
            self.delay_per_orbit_degree,
            orbit_precision,
            &mut self.orbit_deg,
            force,
        );
        if orbit {
            self.recompute_position();
        }
        Advanced { spin, orbit }
    }

    fn recompute_position(&mut self) {
        let angle = self.orbit_deg.to_radians();
        let x = angle.sin() * self.orbit_radius * self.oval_ratio;
        let y = self.orbit_tilt_deg.to_radians().tan() * x;
        let z = angle.cos() * self.orbit_radius;
        self.position = DVec3::new(x, y, z);
    }

    /// Body-local offset from the orbit's own origin.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin_deg
    }

    pub fn set_spin_angle(&mut self, degrees: f64) {
        self.spin_deg = wrap_degrees(degrees);
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_deg
    }

    pub fn set_orbit_angle(&mut self, degrees: f64) {
        self.orbit_deg = wrap_degrees(degrees);
        self.recompute_position();
    }

    pub fn orbital_delay(&self) -> f64 {
        self.orbital_delay
    }

    /// Rejects non-positive or non-finite delays; the previous delay is kept.
    pub fn set_orbital_delay(&mut self, seconds: f64) -> OrreryResult<()> {
        self.orbital_delay = check_delay(seconds)?;
        self.init_delays();
        Ok(())
    }

    pub fn local_period(&self) -> f64 {
        self.local_period
    }

    pub fn set_local_period(&mut self, period: f64) -> OrreryResult<()> {
        self.local_period = check_period(period)?;
        self.init_delays();
        Ok(())
    }

    pub fn delay_per_orbit_degree(&self) -> f64 {
        self.delay_per_orbit_degree
    }

    pub fn delay_per_spin_degree(&self) -> f64 {
        self.delay_per_spin_degree
    }

    pub fn oval_ratio(&self) -> f64 {
        self.oval_ratio
    }

    pub fn set_oval_ratio(&mut self, ratio: f64) {
        self.oval_ratio = ratio;
        self.recompute_position();
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn set_orbit_radius(&mut self, radius: f64) {
        self.orbit_radius = radius;
        self.recompute_position();
    }

    pub fn orbit_tilt(&self) -> f64 {
        self.orbit_tilt_deg
    }

    pub fn set_orbit_tilt(&mut self, degrees: f64) {
        self.orbit_tilt_deg = degrees;
        self.recompute_position();
    }
}

/// Shared stepping rule for spin and orbit.
///
/// Sub-threshold time is not lost: `last` stays put, so it accumulates until
/// the next call crosses the threshold.
fn step_angle(
    now: f64,
    last: &mut f64,
    seconds_per_degree: f64,
    precision: u32,
    angle: &mut f64,
    force: bool,
) -> bool {
    let unit = 10f64.powi(-(precision.min(MAX_PRECISION) as i32));
    let step_seconds = unit * seconds_per_degree;
    let elapsed = now - *last;
    if elapsed > step_seconds || force {
        *angle = wrap_degrees(*angle + (elapsed / step_seconds) * unit);
        *last = now;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn rejects_bad_delay_and_period() {
        assert!(OrbitStepper::new(0.0, 1.0).is_err());
        assert!(OrbitStepper::new(60.0, -1.0).is_err());

        let mut s = OrbitStepper::new(60.0, 1.0).unwrap();
        assert!(s.set_orbital_delay(-5.0).is_err());
        assert_eq!(s.orbital_delay(), 60.0);
        assert!(s.set_local_period(f64::NAN).is_err());
        assert_eq!(s.local_period(), 1.0);
    }

    #[test]
    fn derived_delays_follow_setters() {
        let mut s = OrbitStepper::new(360.0, 10.0).unwrap();
        assert!((s.delay_per_orbit_degree() - 1.0).abs() < 1e-12);
        assert!((s.delay_per_spin_degree() - 0.1).abs() < 1e-12);

        s.set_orbital_delay(720.0).unwrap();
        assert!((s.delay_per_orbit_degree() - 2.0).abs() < 1e-12);
        s.set_local_period(20.0).unwrap();
        assert!((s.delay_per_spin_degree() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn below_threshold_accumulates() {
        // 360s orbit: 1s per degree, precision 0 → 1s step
        let mut s = OrbitStepper::new(360.0, 1.0).unwrap();
        assert!(!s.advance(0.6, 0, 0, false).orbit);
        assert_eq!(s.orbit_angle(), 0.0);
        // 1.2s since the last step, not 0.6s
        assert!(s.advance(1.2, 0, 0, false).orbit);
        assert!((s.orbit_angle() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn force_steps_immediately() {
        let mut s = OrbitStepper::new(360.0, 1.0).unwrap();
        let moved = s.advance(0.5, 0, 0, true);
        assert!(moved.orbit && moved.spin);
        assert!((s.orbit_angle() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn full_revolution_closes() {
        let mut s = OrbitStepper::new(60.0, 1.0).unwrap().with_angles(0.0, 37.0);
        let start = s.orbit_angle();
        for i in 1..=120 {
            s.advance(i as f64 * 0.5, 2, 2, false);
        }
        assert!(
            angle_distance(s.orbit_angle(), start) < 1e-6,
            "ended at {}",
            s.orbit_angle()
        );
    }

    #[test]
    fn angles_stay_in_range() {
        let mut s = OrbitStepper::new(3.0, 7.0).unwrap();
        let mut now = 0.0;
        for i in 0..10_000 {
            now += 0.001 + (i % 13) as f64 * 0.0137;
            s.advance(now, 3, 1, i % 97 == 0);
            assert!((0.0..360.0).contains(&s.orbit_angle()));
            assert!((0.0..360.0).contains(&s.spin_angle()));
        }
    }

    #[test]
    fn position_traces_oval() {
        let mut s = OrbitStepper::new(360.0, 1.0)
            .unwrap()
            .with_shape(10.0, 1.5, 0.0);
        // angle 0 → on +z axis
        assert!((s.position() - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-9);
        s.set_orbit_angle(90.0);
        assert!((s.position().x - 15.0).abs() < 1e-9);
        assert!(s.position().z.abs() < 1e-9);
    }

    #[test]
    fn tilt_lifts_y_by_x() {
        let mut s = OrbitStepper::new(360.0, 1.0)
            .unwrap()
            .with_shape(4.0, 1.0, 45.0);
        s.set_orbit_angle(90.0);
        let p = s.position();
        assert!((p.y - p.x).abs() < 1e-9);
    }

    #[test]
    fn position_only_changes_on_orbit_step() {
        let mut s = OrbitStepper::new(360.0, 1000.0)
            .unwrap()
            .with_shape(5.0, 1.0, 0.0);
        let before = s.position();
        // spin threshold is tiny, orbit threshold is 1s at precision 0
        let moved = s.advance(0.5, 2, 0, false);
        assert!(moved.spin);
        assert!(!moved.orbit);
        assert_eq!(s.position(), before);
    }
}
