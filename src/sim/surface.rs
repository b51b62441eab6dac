//! Surface types occupying pitch grid cells
//!
//! Every cell tag maps to exactly one (pre-normalisation) normal. Open surface
//! maps to the zero vector so free flight never reflects.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PADDLE_TILT, PADDLE_HORIZONTAL_COMPONENT};
use crate::error::PitchError;

/// Vertical component of an angled paddle normal, relative to a horizontal
/// component of [`PADDLE_HORIZONTAL_COMPONENT`].
///
/// Always in `-3..=3` and never zero (a flat paddle cell is `PaddleMiddle`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct PaddleTilt(i8);

impl PaddleTilt {
    pub fn new(tilt: i8) -> Result<Self, PitchError> {
        if tilt == 0 || tilt.abs() > MAX_PADDLE_TILT {
            return Err(PitchError::InvalidPaddleTilt(tilt));
        }
        Ok(Self(tilt))
    }

    #[inline]
    pub fn get(self) -> i8 {
        self.0
    }

    /// Every valid tilt, steepest downward first
    pub fn all() -> impl Iterator<Item = PaddleTilt> {
        (-MAX_PADDLE_TILT..=MAX_PADDLE_TILT)
            .filter(|&t| t != 0)
            .map(PaddleTilt)
    }
}

impl TryFrom<i8> for PaddleTilt {
    type Error = PitchError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PaddleTilt> for i8 {
    fn from(tilt: PaddleTilt) -> Self {
        tilt.0
    }
}

/// What occupies a single pitch cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceCell {
    /// Plain playing surface, no reflection
    #[default]
    Open,
    TopWall,
    BottomWall,
    /// Flat paddle face, pure horizontal reflection
    PaddleMiddle,
    /// Angled paddle face
    PaddleAngled(PaddleTilt),
}

impl SurfaceCell {
    /// Normal before normalisation
    pub fn raw_normal(&self) -> DVec2 {
        match self {
            SurfaceCell::Open => DVec2::ZERO,
            // Sign is convention only: the reflection is symmetric under n -> -n
            SurfaceCell::TopWall => DVec2::new(0.0, -1.0),
            SurfaceCell::BottomWall => DVec2::new(0.0, 1.0),
            SurfaceCell::PaddleMiddle => DVec2::new(1.0, 0.0),
            SurfaceCell::PaddleAngled(tilt) => {
                DVec2::new(PADDLE_HORIZONTAL_COMPONENT, f64::from(tilt.get()))
            }
        }
    }

    /// Unit normal used for reflection (zero for open surface)
    pub fn normal(&self) -> DVec2 {
        self.raw_normal().normalize_or_zero()
    }

    /// Whether the ball reflects off this cell
    #[inline]
    pub fn reflects(&self) -> bool {
        !matches!(self, SurfaceCell::Open)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, SurfaceCell::TopWall | SurfaceCell::BottomWall)
    }

    pub fn is_paddle(&self) -> bool {
        matches!(self, SurfaceCell::PaddleMiddle | SurfaceCell::PaddleAngled(_))
    }
}
