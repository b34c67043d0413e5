//! # Grid
//!
//! Fixed-size wall/floor cell array. Every generated dungeon starts as a grid
//! of solid wall that rooms and corridors are carved out of.

use crate::{DelveError, DelveResult, Position};

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Solid rock
    #[default]
    Wall,
    /// Open, carved space
    Floor,
}

impl Cell {
    /// Character used for this cell in rendered text.
    pub const fn to_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
        }
    }

    /// Inverse of [`Cell::to_char`].
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Floor),
            _ => None,
        }
    }

    pub const fn is_floor(self) -> bool {
        matches!(self, Self::Floor)
    }
}

/// A `width × height` array of cells.
///
/// The dimensions are fixed at construction. Reads outside the grid return
/// `None` and writes outside it fail with [`DelveError::OutOfBounds`], so no
/// carve can ever touch memory past the map edge.
///
/// # Examples
///
/// ```
/// use delve::{Cell, Grid, Position};
///
/// let mut grid = Grid::new(10, 5);
/// assert_eq!(grid.get(Position::new(3, 2)), Some(Cell::Wall));
///
/// grid.carve(Position::new(3, 2)).unwrap();
/// assert_eq!(grid.get(Position::new(3, 2)), Some(Cell::Floor));
/// assert!(grid.carve(Position::new(10, 0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates a grid filled entirely with walls.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Wall; width as usize]; height as usize],
        }
    }

    /// Builds a grid from rows of cells. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> DelveResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(index) = rows.iter().position(|row| row.len() != width) {
            return Err(DelveError::InvalidMap(format!(
                "row {} has {} cells, expected {}",
                index,
                rows[index].len(),
                width
            )));
        }

        let width = u32::try_from(width)
            .map_err(|_| DelveError::InvalidMap("grid is too wide".to_string()))?;
        let height = u32::try_from(rows.len())
            .map_err(|_| DelveError::InvalidMap("grid is too tall".to_string()))?;

        Ok(Self {
            width,
            height,
            cells: rows,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Gets the cell at a position, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some(self.cells[pos.y as usize][pos.x as usize])
    }

    /// Sets the cell at a position.
    pub fn set(&mut self, pos: Position, cell: Cell) -> DelveResult<()> {
        if !self.is_valid_position(pos) {
            return Err(DelveError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.cells[pos.y as usize][pos.x as usize] = cell;
        Ok(())
    }

    /// Turns the cell at a position into floor.
    pub fn carve(&mut self, pos: Position) -> DelveResult<()> {
        self.set(pos, Cell::Floor)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Counts the cells of the given kind.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    /// All floor positions in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_floor() {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }

        positions
    }

    /// Checks that the outermost rows and columns are all wall.
    pub fn border_is_solid(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        let top_bottom = (0..w).all(|x| {
            self.get(Position::new(x, 0)) == Some(Cell::Wall)
                && self.get(Position::new(x, h - 1)) == Some(Cell::Wall)
        });
        let left_right = (0..h).all(|y| {
            self.get(Position::new(0, y)) == Some(Cell::Wall)
                && self.get(Position::new(w - 1, y)) == Some(Cell::Wall)
        });
        top_bottom && left_right
    }
}
