//! # Corridor Carving
//!
//! L-shaped corridors between two points. A corridor runs along one axis to
//! the corner and then along the other; which axis goes first is a coin flip
//! made fresh for every corridor.

use crate::{DelveError, DelveResult, Grid, Position};
use rand::Rng;

/// Which leg of an L-shaped corridor is carved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorShape {
    /// Along the start row, then down/up the end column
    HorizontalFirst,
    /// Along the start column, then across the end row
    VerticalFirst,
}

impl CorridorShape {
    /// Picks a shape uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::HorizontalFirst
        } else {
            Self::VerticalFirst
        }
    }

    /// The cell where the two legs meet.
    pub fn corner(self, start: Position, end: Position) -> Position {
        match self {
            Self::HorizontalFirst => Position::new(end.x, start.y),
            Self::VerticalFirst => Position::new(start.x, end.y),
        }
    }
}

/// Carves an L-shaped corridor between two points with a randomly chosen
/// shape, returning the shape used.
///
/// Both endpoints must lie inside the grid. The corridor never leaves the
/// bounding box of its endpoints, so nothing is written when either endpoint
/// is out of bounds.
pub fn carve_tunnel<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    start: Position,
    end: Position,
) -> DelveResult<CorridorShape> {
    let shape = CorridorShape::random(rng);
    carve_l_corridor(grid, start, end, shape)?;
    Ok(shape)
}

/// Carves an L-shaped corridor of the given shape. Both endpoints and every
/// cell in between become floor.
pub fn carve_l_corridor(
    grid: &mut Grid,
    start: Position,
    end: Position,
    shape: CorridorShape,
) -> DelveResult<()> {
    for pos in [start, end] {
        if !grid.is_valid_position(pos) {
            return Err(DelveError::OutOfBounds { x: pos.x, y: pos.y });
        }
    }

    match shape {
        CorridorShape::HorizontalFirst => {
            carve_row(grid, start.y, start.x, end.x)?;
            carve_column(grid, end.x, start.y, end.y)?;
        }
        CorridorShape::VerticalFirst => {
            carve_column(grid, start.x, start.y, end.y)?;
            carve_row(grid, end.y, start.x, end.x)?;
        }
    }

    Ok(())
}

fn carve_row(grid: &mut Grid, y: i32, x1: i32, x2: i32) -> DelveResult<()> {
    for x in x1.min(x2)..=x1.max(x2) {
        grid.carve(Position::new(x, y))?;
    }
    Ok(())
}

fn carve_column(grid: &mut Grid, x: i32, y1: i32, y2: i32) -> DelveResult<()> {
    for y in y1.min(y2)..=y1.max(y2) {
        grid.carve(Position::new(x, y))?;
    }
    Ok(())
}
