//! # ASCII Maps
//!
//! Conversion between a [`Grid`] and its text form.

use crate::{Cell, DelveError, DelveResult, Grid};
use std::fmt;
use std::str::FromStr;

/// Renders a grid as text, one line per row joined by `\n`.
///
/// There is no trailing newline.
///
/// # Examples
///
/// ```
/// use delve::{render, Grid, Position};
///
/// let mut grid = Grid::new(4, 3);
/// grid.carve(Position::new(1, 1)).unwrap();
/// grid.carve(Position::new(2, 1)).unwrap();
/// assert_eq!(render(&grid), "####\n#..#\n####");
/// ```
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);

    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|cell| cell.to_char()));
    }

    out
}

/// Reads a grid back from text produced by [`render`].
///
/// A single trailing newline and `\r\n` line endings are accepted. Empty
/// input, empty rows, rows of differing length and characters other than
/// `#` and `.` are rejected.
pub fn parse(text: &str) -> DelveResult<Grid> {
    let mut rows = Vec::new();

    for (y, line) in text.lines().enumerate() {
        if line.is_empty() {
            return Err(DelveError::InvalidMap(format!("row {} is empty", y)));
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(x, c)| {
                Cell::from_char(c).ok_or_else(|| {
                    DelveError::InvalidMap(format!("unexpected {:?} at column {}, row {}", c, x, y))
                })
            })
            .collect::<DelveResult<Vec<_>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DelveError::InvalidMap("map is empty".to_string()));
    }

    Grid::from_rows(rows)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl FromStr for Grid {
    type Err = DelveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
