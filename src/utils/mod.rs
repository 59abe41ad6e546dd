//! # Utilities Module
//!
//! Utility functions for step mathematics, pathfinding and text layout.

pub mod math;
pub mod pathfinding;
pub mod text;

pub use self::math::*;
pub use self::pathfinding::*;
pub use self::text::*;
