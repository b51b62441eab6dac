//! Sing Pong - a grid-discretised Pong ball simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pitch grid, ball reflection, match driver)
//! - `settings`: Data-driven pitch and ball configuration
//! - `error`: Typed errors for grid construction, sampling and config loading

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{PitchError, SettingsError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Physical size of one grid cell (screen units per cell)
    pub const DISCRETISATION: f64 = 10.0;

    /// Ball radius in physical units (rendering + wall margin sizing)
    pub const BALL_RADIUS: u32 = 50;
    /// Net ball speed in grid cells per timestep
    pub const BALL_SPEED: i32 = 5;

    /// Inclusive upper bound for the serve direction samples
    pub const SERVE_SAMPLE_RANGE: u32 = 1000;
    /// Resample cap before falling back to a flat serve
    pub const MAX_SERVE_SAMPLES: u32 = 1000;

    /// Horizontal reference component for angled paddle normals
    pub const PADDLE_HORIZONTAL_COMPONENT: f64 = 5.0;
    /// Largest paddle tilt magnitude
    pub const MAX_PADDLE_TILT: i8 = 3;

    /// Largest pitch accepted, in cells
    pub const MAX_PITCH_CELLS: usize = 1 << 26;
}
