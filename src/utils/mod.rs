//! # Utilities Module
//!
//! Random source construction and flood-fill connectivity queries over a
//! generated grid.

pub mod connectivity;
pub mod rng;

pub use connectivity::*;
pub use rng::*;
