//! # Delve
//!
//! Random dungeon maps built from rectangular rooms and L-shaped corridors,
//! rendered as plain text.
//!
//! ## Architecture Overview
//!
//! Generation is a single one-way pipeline:
//!
//! - **Map**: the fixed-size [`Grid`] of wall and floor cells
//! - **Generation**: [`Room`] geometry, the rejection-sampling [`PlacementEngine`]
//!   and the corridor carver
//! - **Rendering**: conversion between a [`Grid`] and its `#`/`.` text form
//! - **Utilities**: seeded random sources and flood-fill connectivity queries
//!
//! All randomness is passed in explicitly, so a seeded [`rand::rngs::StdRng`]
//! reproduces a dungeon exactly.
//!
//! ```
//! use delve::{generate, render, GenerationConfig};
//!
//! let config = GenerationConfig::for_testing(7);
//! let mut rng = delve::utils::create_rng(&config);
//! let grid = generate(&config, &mut rng).unwrap();
//! let text = render(&grid);
//! assert_eq!(text.lines().count(), config.height as usize);
//! ```

pub mod generation;
pub mod map;
pub mod rendering;
pub mod utils;

pub use generation::*;
pub use map::*;
pub use rendering::*;

/// Core error type for the Delve generator.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters cannot produce a valid sampling range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A carve touched a cell outside the grid
    #[error("Position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// Text could not be read back into a grid
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// A generated dungeon failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generation parameters.
pub mod config {
    /// Default dungeon width in cells
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 80;

    /// Default dungeon height in cells
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 45;

    /// Default number of rooms to aim for
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default smallest room side
    pub const DEFAULT_ROOM_MIN: u32 = 5;

    /// Default largest room side
    pub const DEFAULT_ROOM_MAX: u32 = 12;

    /// Default cap on sampling attempts
    pub const DEFAULT_MAX_TRIES: u32 = 1000;

    /// Cells of solid wall kept between a room and the map edge
    pub const BORDER_MARGIN: i32 = 1;
}
