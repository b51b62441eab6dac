use thiserror::Error;

/// Errors raised while building or querying a [`PitchGrid`](crate::sim::PitchGrid)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PitchError {
    #[error("Invalid pitch dimensions: {width}x{height} cells")]
    InvalidDimension { height: i64, width: i64 },

    #[error("Invalid discretisation factor: {0}")]
    InvalidDiscretisation(f64),

    #[error("Cell ({x}, {y}) is outside the pitch")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Invalid paddle tilt: {0} (expected -3..=3, non-zero)")]
    InvalidPaddleTilt(i8),

    #[error("Paddle at column {column}, rows {top}..={bottom} does not fit the open pitch")]
    PaddleOutOfBounds { column: i32, top: i32, bottom: i32 },
}

impl PitchError {
    /// Whether the simulation can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PitchError::OutOfBounds { .. })
    }
}

/// Errors raised by the ball simulator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("No serve velocity with a horizontal component after {attempts} samples")]
    DegenerateVelocitySample { attempts: u32 },
}

/// Errors raised while loading [`Settings`](crate::Settings)
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_out_of_bounds_is_recoverable() {
        assert!(PitchError::OutOfBounds { x: -1, y: 0 }.is_recoverable());
        assert!(!PitchError::InvalidDimension { height: 0, width: 10 }.is_recoverable());
        assert!(!PitchError::InvalidPaddleTilt(4).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = PitchError::InvalidDimension { height: 0, width: 12 };
        assert_eq!(err.to_string(), "Invalid pitch dimensions: 12x0 cells");

        let err = SimError::DegenerateVelocitySample { attempts: 1000 };
        assert!(err.to_string().contains("1000"));
    }
}
