use thiserror::Error;

use crate::geom::Rect;

/// Errors raised while validating an environment configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("{name} rectangle {rect} has an inverted axis")]
    EmptyRect { name: &'static str, rect: Rect },

    #[error("{name} rectangle {rect} has a bound that is not finite")]
    NonFiniteRect { name: &'static str, rect: Rect },

    #[error("friction must be positive, got {0}")]
    NonPositiveFriction(f64),

    #[error("force bounds [{min}, {max}] are inverted or not finite")]
    InvalidForceBounds { min: f64, max: f64 },

    #[error("start range for {axis} [{low}, {high}] is inverted or not finite")]
    InvalidStartRange {
        axis: &'static str,
        low: f64,
        high: f64,
    },

    #[error("start range for {axis} [{low}, {high}] leaves the region")]
    StartOutsideRegion {
        axis: &'static str,
        low: f64,
        high: f64,
    },
}
