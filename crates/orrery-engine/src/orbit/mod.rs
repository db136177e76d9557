pub mod stepper;

pub use stepper::{Advanced, OrbitStepper, MAX_PRECISION};

/// Wrap an angle into [0, 360).
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
