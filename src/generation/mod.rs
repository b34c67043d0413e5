//! # Generation Module
//!
//! Room geometry, the rejection-sampling placement engine and the corridor
//! carver.
//!
//! A run samples random rectangles, keeps the ones that do not overlap any
//! room already placed, and links every newly accepted room to the one before
//! it with an L-shaped corridor. The configuration decides how many rooms to
//! aim for and caps the number of attempts so generation always terminates.

pub mod corridor;
pub mod dungeon;

pub use corridor::*;
pub use dungeon::*;

use crate::config::{
    BORDER_MARGIN, DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH, DEFAULT_MAX_ROOMS,
    DEFAULT_MAX_TRIES, DEFAULT_ROOM_MAX, DEFAULT_ROOM_MIN,
};
use crate::{DelveError, DelveResult, Grid, Position};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for dungeon generation.
///
/// Missing fields fall back to the defaults when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Number of rooms to aim for (best effort)
    pub max_rooms: u32,
    /// Smallest room side, inclusive
    pub room_min: u32,
    /// Largest room side, inclusive
    pub room_max: u32,
    /// Hard cap on sampling attempts
    pub max_tries: u32,
    /// Random seed for reproducible generation; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Creates a configuration for the given grid size with default room
    /// parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(80, 45);
    /// assert_eq!(config.max_rooms, 30);
    /// assert_eq!((config.room_min, config.room_max), (5, 12));
    /// assert_eq!(config.max_tries, 1000);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_rooms: DEFAULT_MAX_ROOMS,
            room_min: DEFAULT_ROOM_MIN,
            room_max: DEFAULT_ROOM_MAX,
            max_tries: DEFAULT_MAX_TRIES,
            seed: None,
        }
    }

    /// The classic 80×45 layout with up to 20 rooms of side 4 to 10.
    pub fn classic() -> Self {
        Self {
            max_rooms: 20,
            room_min: 4,
            room_max: 10,
            ..Self::new(DEFAULT_DUNGEON_WIDTH, DEFAULT_DUNGEON_HEIGHT)
        }
    }

    /// Creates a small, seeded configuration for testing.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 40,
            height: 20,
            max_rooms: 6,
            room_min: 3,
            room_max: 6,
            max_tries: 200,
            seed: Some(seed),
        }
    }

    /// Returns this configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every sampling range the placement engine uses is
    /// non-empty.
    ///
    /// Room origins are drawn from `[1, width - w - 1)`, so the largest room
    /// must leave at least one valid column and row: `room_max < width - 2`
    /// and `room_max < height - 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let mut config = GenerationConfig::new(20, 10);
    /// config.room_min = 3;
    /// config.room_max = 7;
    /// assert!(config.validate().is_ok());
    ///
    /// config.room_max = 8;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> DelveResult<()> {
        let invalid =
            |msg: String| -> DelveResult<()> { Err(DelveError::InvalidConfiguration(msg)) };

        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return invalid(format!(
                "grid dimensions {}x{} exceed the coordinate range",
                self.width, self.height
            ));
        }
        if self.room_min == 0 {
            return invalid("room_min must be at least 1".to_string());
        }
        if self.room_min > self.room_max {
            return invalid(format!(
                "room_min ({}) is greater than room_max ({})",
                self.room_min, self.room_max
            ));
        }

        let margins = 2 * BORDER_MARGIN as u32;
        if self.room_max.saturating_add(margins) >= self.width {
            return invalid(format!(
                "room_max ({}) leaves no room origin inside a grid {} cells wide",
                self.room_max, self.width
            ));
        }
        if self.room_max.saturating_add(margins) >= self.height {
            return invalid(format!(
                "room_max ({}) leaves no room origin inside a grid {} cells tall",
                self.room_max, self.height
            ));
        }

        Ok(())
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> DelveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DelveResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DUNGEON_WIDTH, DEFAULT_DUNGEON_HEIGHT)
    }
}

/// An axis-aligned rectangular room.
///
/// Rooms are plain values: once sampled they are never resized or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    /// Index in the placement order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room in cells
    pub width: u32,
    /// Height of the room in cells
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.width, 10);
    /// assert_eq!(room.height, 8);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// First column past the right edge.
    pub fn right(&self) -> i32 {
        self.top_left.x + self.width as i32
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.height as i32
    }

    /// Gets the center position of the room, rounding toward the top-left.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(0, Position::new(2, 3), 5, 4);
    /// assert_eq!(room.center(), Position::new(4, 5));
    /// ```
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in cells.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.right()
            && pos.y < self.bottom()
    }

    /// Checks if this room overlaps another.
    ///
    /// Rooms that only share a boundary line do not intersect, so rooms may
    /// sit flush against each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let a = Room::new(0, Position::new(0, 0), 4, 4);
    /// let flush = Room::new(1, Position::new(4, 0), 4, 4);
    /// let overlapping = Room::new(2, Position::new(3, 3), 4, 4);
    /// assert!(!a.intersects(&flush));
    /// assert!(a.intersects(&overlapping));
    /// ```
    pub fn intersects(&self, other: &Room) -> bool {
        !(self.right() <= other.top_left.x
            || other.right() <= self.top_left.x
            || self.bottom() <= other.top_left.y
            || other.bottom() <= self.top_left.y)
    }

    /// Gets all positions within this room in row-major order.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top_left.y..self.bottom() {
            for x in self.top_left.x..self.right() {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Checks that the room keeps the wall margin on every side of a grid.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.top_left.x >= BORDER_MARGIN
            && self.top_left.y >= BORDER_MARGIN
            && self.right() <= width as i32 - BORDER_MARGIN
            && self.bottom() <= height as i32 - BORDER_MARGIN
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates a dungeon and returns only its grid.
///
/// The accepted rooms are dropped; use [`PlacementEngine`] or
/// [`RoomCorridorGenerator`] to keep them.
pub fn generate<R: Rng + ?Sized>(config: &GenerationConfig, rng: &mut R) -> DelveResult<Grid> {
    Ok(PlacementEngine::new(config)?.run(rng)?.into_grid())
}
