//! Sega format families.
//!
//! - Sega Saturn (disc images)

mod publishers;
pub mod saturn;

pub use saturn::SaturnParser;
