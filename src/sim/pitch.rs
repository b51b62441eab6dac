//! Discretised pitch grid
//!
//! The pitch is a `width x height` grid of [`SurfaceCell`]s. Row 0 is the top
//! of the pitch (screen convention, y grows downward) and holds the top wall;
//! the last row holds the bottom wall. Left and right edges stay open: leaving
//! through them is a goal, detected by the match driver.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::state::Side;
use super::surface::{PaddleTilt, SurfaceCell};
use crate::consts::{MAX_PADDLE_TILT, MAX_PITCH_CELLS};
use crate::error::PitchError;

/// Immutable surface grid (paddles are added by building a new grid)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchGrid {
    width: i32,
    height: i32,
    /// Physical units per cell
    discretisation: f64,
    /// Extra wall rows beyond the outermost one
    wall_margin: u32,
    /// Row-major, `cells[y * width + x]`
    cells: Vec<SurfaceCell>,
}

impl PitchGrid {
    /// Build a pitch from physical screen dimensions.
    ///
    /// Rows `0..=wall_margin` become `TopWall` and rows
    /// `height-1-wall_margin..=height-1` become `BottomWall`. On a pitch too
    /// short to hold both bands the bottom wall wins where they overlap.
    pub fn new(
        physical_height: f64,
        physical_width: f64,
        discretisation: f64,
        wall_margin: u32,
    ) -> Result<Self, PitchError> {
        if !discretisation.is_finite() || discretisation <= 0.0 {
            return Err(PitchError::InvalidDiscretisation(discretisation));
        }

        let width = cells_along(physical_width, discretisation);
        let height = cells_along(physical_height, discretisation);
        if width <= 0 || height <= 0 || width > i32::MAX as i64 || height > i32::MAX as i64 {
            return Err(PitchError::InvalidDimension { height, width });
        }
        let invalid = PitchError::InvalidDimension { height, width };
        let (width, height) = (width as i32, height as i32);

        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len <= MAX_PITCH_CELLS)
            .ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, SurfaceCell::Open);
        let margin = wall_margin.min(height as u32 - 1) as i32;
        for y in 0..=margin {
            let row = y as usize * width as usize;
            cells[row..row + width as usize].fill(SurfaceCell::TopWall);
        }
        for y in (height - 1 - margin)..height {
            let row = y as usize * width as usize;
            cells[row..row + width as usize].fill(SurfaceCell::BottomWall);
        }

        if height <= 2 * (margin + 1) {
            log::warn!(
                "Pitch {}x{} has no open rows with wall margin {}",
                width,
                height,
                wall_margin
            );
        }
        log::info!(
            "Built pitch {}x{} cells (discretisation {}, wall margin {})",
            width,
            height,
            discretisation,
            wall_margin
        );

        Ok(Self {
            width,
            height,
            discretisation,
            wall_margin,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn discretisation(&self) -> f64 {
        self.discretisation
    }

    #[inline]
    pub fn wall_margin(&self) -> u32 {
        self.wall_margin
    }

    /// Centre of the pitch, using floor division
    pub fn centre_spot(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Whether `(x, y)` lies inside `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, PitchError> {
        if !self.contains(x, y) {
            return Err(PitchError::OutOfBounds { x, y });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Surface type at grid cell `(x, y)`
    pub fn classify(&self, x: i32, y: i32) -> Result<SurfaceCell, PitchError> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Unit normal of the surface at `(x, y)`.
    ///
    /// Positions outside the grid are treated as open surface: a fast ball
    /// can overshoot the wall band for a tick, and that must not abort the
    /// step.
    pub fn reflection_normal(&self, x: i32, y: i32) -> DVec2 {
        match self.classify(x, y) {
            Ok(cell) => cell.normal(),
            Err(err) => {
                log::debug!("{}; treating as open surface", err);
                DVec2::ZERO
            }
        }
    }

    /// Range of rows not covered by either wall band
    pub fn open_rows(&self) -> std::ops::Range<i32> {
        let margin = self.wall_margin.min(self.height as u32 - 1) as i32;
        let top = margin + 1;
        let bottom = (self.height - 1 - margin).max(top);
        top..bottom
    }

    /// New grid with a vertical paddle at `column`, spanning
    /// `centre_row - half_length..=centre_row + half_length`.
    ///
    /// The centre cell is flat; the rest are split into three tilt bands that
    /// steepen toward the paddle ends, so hits near an end deflect the ball
    /// further away from the centre. `facing` is the side the paddle defends.
    pub fn with_paddle(
        &self,
        column: i32,
        centre_row: i32,
        half_length: u32,
        facing: Side,
    ) -> Result<Self, PitchError> {
        let out_of_bounds = |top, bottom| PitchError::PaddleOutOfBounds { column, top, bottom };
        let half = i32::try_from(half_length)
            .map_err(|_| out_of_bounds(i32::MIN, i32::MAX))?;
        let top = centre_row
            .checked_sub(half)
            .ok_or_else(|| out_of_bounds(i32::MIN, centre_row.saturating_add(half)))?;
        let bottom = centre_row
            .checked_add(half)
            .ok_or_else(|| out_of_bounds(top, i32::MAX))?;
        let open = self.open_rows();
        if !(0..self.width).contains(&column) || top < open.start || bottom >= open.end {
            return Err(out_of_bounds(top, bottom));
        }

        let mut grid = self.clone();
        for y in top..=bottom {
            let i = grid.index(column, y)?;
            grid.cells[i] = paddle_cell(y - centre_row, half, facing)?;
        }
        log::debug!(
            "Placed {:?} paddle at column {}, rows {}..={}",
            facing,
            column,
            top,
            bottom
        );
        Ok(grid)
    }

    /// Physical coordinates of a grid position
    pub fn to_pixels(&self, position: IVec2) -> DVec2 {
        position.as_dvec2() * self.discretisation
    }
}

fn cells_along(physical: f64, discretisation: f64) -> i64 {
    let cells = (physical / discretisation).floor();
    if cells.is_finite() { cells as i64 } else { 0 }
}

/// Cell for a paddle row `offset` rows from the centre (negative = above)
fn paddle_cell(offset: i32, half_length: i32, facing: Side) -> Result<SurfaceCell, PitchError> {
    if offset == 0 {
        return Ok(SurfaceCell::PaddleMiddle);
    }
    let max = i64::from(MAX_PADDLE_TILT);
    let (offset_abs, half) = (i64::from(offset).abs(), i64::from(half_length));
    let band = ((offset_abs * max + half - 1) / half).clamp(1, max) as i32;
    // Left paddle faces +x: a normal (5, -t) for rows above the centre turns
    // the ball upward. The right paddle faces -x, which flips the tilt sign.
    let sign = match facing {
        Side::Left => offset.signum(),
        Side::Right => -offset.signum(),
    };
    PaddleTilt::new((sign * band) as i8).map(SurfaceCell::PaddleAngled)
}
