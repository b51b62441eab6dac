//! Match state around the ball simulator
//!
//! The simulator never decides when a round ends. This state owns the current
//! pitch, the ball and the score, and the tick driver reads the ball position
//! after each step to detect goals.

use glam::{DVec2, IVec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{BallSimulator, BallState};
use super::pitch::PitchGrid;
use crate::error::PitchError;
use crate::settings::Settings;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No valid pitch yet (e.g. zero-sized surface on first layout)
    AwaitingGeometry,
    /// Ball in flight
    Playing,
    Paused,
    /// A goal ended the round; waiting for the next serve
    RoundOver,
    /// The ball escaped through a wall
    Fault,
}

/// A player, named by the pitch edge they defend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, scorer: Side) {
        match scorer {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Events reported to the caller after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left through the opponent's edge
    Goal { scorer: Side },
    /// Ball left through the top or bottom; should not happen with correct
    /// reflection
    WallBreach { position: IVec2 },
}

/// Complete match state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) grid: Option<PitchGrid>,
    pub(crate) ball: BallSimulator,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Create a match waiting for its first pitch geometry
    pub fn new(settings: Settings) -> Self {
        Self {
            ball: BallSimulator::from_state(BallState::default(), &settings),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            phase: GamePhase::AwaitingGeometry,
            score: Score::default(),
            time_ticks: 0,
            grid: None,
        }
    }

    /// Create a match on a prebuilt pitch and serve the first ball
    pub fn with_grid(settings: Settings, grid: PitchGrid) -> Self {
        let mut state = Self::new(settings);
        state.grid = Some(grid);
        state.start_round();
        state
    }

    pub fn grid(&self) -> Option<&PitchGrid> {
        self.grid.as_ref()
    }

    pub fn ball(&self) -> &BallSimulator {
        &self.ball
    }

    /// Build a new pitch for changed screen geometry and swap it in.
    ///
    /// Must be called between ticks. A fresh round starts on the new pitch.
    /// On invalid geometry the old pitch is dropped and the match waits for
    /// the next rebuild.
    pub fn rebuild_grid(
        &mut self,
        physical_height: f64,
        physical_width: f64,
    ) -> Result<(), PitchError> {
        match PitchGrid::new(
            physical_height,
            physical_width,
            self.settings.discretisation,
            self.settings.wall_margin_cells(),
        ) {
            Ok(grid) => {
                self.grid = Some(grid);
                self.start_round();
                Ok(())
            }
            Err(err) => {
                log::warn!("Cannot build pitch: {}; waiting for valid geometry", err);
                self.grid = None;
                self.phase = GamePhase::AwaitingGeometry;
                Err(err)
            }
        }
    }

    /// Swap in a prebuilt pitch (e.g. one with paddles) keeping the ball where
    /// it is. Returns the previous pitch.
    pub fn replace_grid(&mut self, grid: PitchGrid) -> Option<PitchGrid> {
        let previous = self.grid.replace(grid);
        if self.phase == GamePhase::AwaitingGeometry {
            self.start_round();
        }
        previous
    }

    /// Re-centre the ball with a new serve. Returns false without a pitch.
    pub fn start_round(&mut self) -> bool {
        let Some(grid) = self.grid.as_ref() else {
            return false;
        };
        self.ball.reset(grid, &mut self.rng);
        self.phase = GamePhase::Playing;
        log::info!(
            "Round started at {:?} with velocity {:?}",
            self.ball.position(),
            self.ball.velocity()
        );
        true
    }

    /// Ball centre in physical units plus its radius, for rendering
    pub fn ball_pixel_position(&self) -> Option<(DVec2, u32)> {
        let grid = self.grid.as_ref()?;
        Some((grid.to_pixels(self.ball.position()), self.ball.radius()))
    }
}
