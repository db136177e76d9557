//! Error types for scene setup and live tuning.

use thiserror::Error;

pub type OrreryResult<T> = Result<T, OrreryError>;

#[derive(Error, Debug)]
pub enum OrreryError {
    /// A body names a parent that is not listed before it.
    #[error("body {body} references parent {parent}, which is not defined before it")]
    ForwardParent { body: usize, parent: usize },

    #[error("body {body} references physical constant {constant}, but only {available} are defined")]
    UnknownConstant {
        body: usize,
        constant: usize,
        available: usize,
    },

    #[error("reference body {index} is out of range ({count} bodies)")]
    UnknownReferenceBody { index: usize, count: usize },

    #[error("invalid reference body: {0}")]
    InvalidReference(String),

    #[error("orbital delay must be positive and finite, got {0}")]
    NonPositiveDelay(f64),

    #[error("orbital period must be positive and finite, got {0}")]
    NonPositivePeriod(f64),

    #[error("no body with index {0}")]
    UnknownBody(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrreryError {
    /// Errors that must stop the scene before the frame loop starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            OrreryError::ForwardParent { .. }
                | OrreryError::UnknownConstant { .. }
                | OrreryError::UnknownReferenceBody { .. }
                | OrreryError::InvalidReference(_)
                | OrreryError::Json(_)
        )
    }
}

/// Reject delays that would produce an infinite or NaN step rate.
pub fn check_delay(seconds: f64) -> OrreryResult<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(OrreryError::NonPositiveDelay(seconds))
    }
}

pub fn check_period(period: f64) -> OrreryResult<f64> {
    if period.is_finite() && period > 0.0 {
        Ok(period)
    } else {
        Err(OrreryError::NonPositivePeriod(period))
    }
}
