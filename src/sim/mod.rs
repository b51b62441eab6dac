//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Immutable pitch between rebuilds
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod pitch;
pub mod state;
pub mod surface;
pub mod tick;

pub use ball::{BallSimulator, BallState};
pub use collision::{reflect, reflect_velocity, truncate_toward_zero};
pub use pitch::PitchGrid;
pub use state::{GameEvent, GamePhase, MatchState, Score, Side};
pub use surface::{PaddleTilt, SurfaceCell};
pub use tick::{TickInput, classify_exit, tick};
