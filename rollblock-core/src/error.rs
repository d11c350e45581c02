/// Errors reported to callers of the rolling block API
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RollError {
    #[error("half extent along {axis} must be finite and positive, got {value}")]
    InvalidExtent { axis: char, value: f64 },
    #[error("roll speed must be finite and positive, got {0}")]
    InvalidRollSpeed(f64),
    /// The block only accepts a new base position while idle.
    #[error("cannot reposition the block while a roll is in progress")]
    RollInProgress,
}
