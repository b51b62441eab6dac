//! Ball kinematics on the pitch grid
//!
//! Fixed timestep Euler integration with grid-snapped reflection: each step
//! reflects the velocity off whatever surface the ball currently sits on, then
//! moves the ball by the new velocity.

use glam::{DVec2, IVec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{reflect_velocity, truncate_toward_zero};
use super::pitch::PitchGrid;
use crate::error::SimError;
use crate::settings::Settings;

/// Position and velocity, both in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BallState {
    pub position: IVec2,
    /// Cells per timestep
    pub velocity: IVec2,
}

/// Sole owner and mutator of the ball state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSimulator {
    state: BallState,
    /// Radius in physical units, for rendering only
    radius: u32,
    speed: i32,
    sample_range: u32,
    max_samples: u32,
}

impl BallSimulator {
    /// Create a simulator and serve from the centre spot
    pub fn new(grid: &PitchGrid, settings: &Settings, rng: &mut impl Rng) -> Self {
        let mut sim = Self::from_state(BallState::default(), settings);
        sim.reset(grid, rng);
        sim
    }

    /// Create a simulator with a given state (no serve)
    pub fn from_state(state: BallState, settings: &Settings) -> Self {
        Self {
            state,
            radius: settings.ball_radius,
            speed: settings.ball_speed,
            sample_range: settings.serve_sample_range.max(1),
            max_samples: settings.max_serve_samples,
        }
    }

    #[inline]
    pub fn state(&self) -> BallState {
        self.state
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        self.state.position
    }

    #[inline]
    pub fn velocity(&self) -> IVec2 {
        self.state.velocity
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Place the ball on the centre spot with a fresh random serve
    pub fn reset(&mut self, grid: &PitchGrid, rng: &mut impl Rng) {
        let velocity = self.sample_serve_velocity(rng).unwrap_or_else(|err| {
            let fallback = self.fallback_velocity();
            log::warn!("{}; serving flat at {:?}", err, fallback);
            fallback
        });
        self.state = BallState {
            position: grid.centre_spot(),
            velocity,
        };
        log::debug!("Ball reset to {:?}", self.state);
    }

    /// Draw a serve velocity of roughly `speed` with a non-zero horizontal
    /// component, resampling up to `max_samples` times.
    pub fn sample_serve_velocity(&self, rng: &mut impl Rng) -> Result<IVec2, SimError> {
        for attempt in 1..=self.max_samples {
            let direction = DVec2::new(
                f64::from(rng.random_range(1..=self.sample_range)),
                f64::from(rng.random_range(1..=self.sample_range)),
            );
            let velocity =
                truncate_toward_zero(direction.normalize_or_zero() * f64::from(self.speed));
            if velocity.x != 0 {
                return Ok(velocity);
            }
            log::debug!(
                "Serve sample {} has no horizontal component ({:?}), resampling",
                attempt,
                direction
            );
        }
        Err(SimError::DegenerateVelocitySample {
            attempts: self.max_samples,
        })
    }

    /// Flat serve used once sampling gives up
    pub fn fallback_velocity(&self) -> IVec2 {
        IVec2::new(self.speed.max(1), 0)
    }

    /// Advance one timestep: reflect off the current cell, then integrate.
    pub fn step(&mut self, grid: &PitchGrid) -> BallState {
        let BallState { position, velocity } = self.state;
        let normal = grid.reflection_normal(position.x, position.y);
        let velocity = reflect_velocity(velocity, normal);
        self.state = BallState {
            position: position + velocity,
            velocity,
        };
        self.state
    }
}
