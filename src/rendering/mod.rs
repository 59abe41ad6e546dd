//! # Rendering Module
//!
//! The macroquad render collaborator: draws what the session reports and
//! nothing else.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
