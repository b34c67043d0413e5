//! # Connectivity
//!
//! Flood fill over floor cells, moving in the four cardinal directions.

use crate::{Cell, Grid, Position};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Returns every floor cell reachable from `start`, including `start`.
///
/// Empty when `start` is not a floor cell.
pub fn flood_fill(grid: &Grid, start: Position) -> HashSet<Position> {
    if grid.get(start) != Some(Cell::Floor) {
        return HashSet::new();
    }

    bfs_reach(start, |&pos| floor_neighbours(grid, pos)).collect()
}

/// Checks whether a floor path joins two positions.
///
/// # Examples
///
/// ```
/// use delve::{carve_l_corridor, utils, CorridorShape, Grid, Position};
///
/// let mut grid = Grid::new(10, 10);
/// let (a, b) = (Position::new(1, 1), Position::new(7, 6));
/// assert!(!utils::is_connected(&grid, a, b));
///
/// carve_l_corridor(&mut grid, a, b, CorridorShape::VerticalFirst).unwrap();
/// assert!(utils::is_connected(&grid, a, b));
/// ```
pub fn is_connected(grid: &Grid, from: Position, to: Position) -> bool {
    if grid.get(from) != Some(Cell::Floor) || grid.get(to) != Some(Cell::Floor) {
        return false;
    }

    bfs_reach(from, |&pos| floor_neighbours(grid, pos)).any(|pos| pos == to)
}

/// Number of separate floor regions in the grid.
pub fn count_regions(grid: &Grid) -> usize {
    let mut seen = HashSet::new();
    let mut regions = 0;

    for pos in grid.floor_positions() {
        if seen.contains(&pos) {
            continue;
        }
        seen.extend(flood_fill(grid, pos));
        regions += 1;
    }

    regions
}

fn floor_neighbours(grid: &Grid, pos: Position) -> Vec<Position> {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(|&next| grid.get(next) == Some(Cell::Floor))
        .collect()
}
