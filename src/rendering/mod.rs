//! # Rendering Module
//!
//! Plain-text rendering of generated maps: one line per row, `#` for wall and
//! `.` for floor.

pub mod ascii;

pub use ascii::*;
