//! Image loading and derived-image operations.
//!
//! [`load`] turns a PNG byte source into a [`RasterImage`]; the derived
//! operations (`duplicate`, `to_argb32`, `squared`) always allocate a new
//! image and never modify their input.

pub mod loader;
pub mod raster;
mod thumbnail;

pub use loader::{PNG_MAGIC, load, load_bytes};
pub use raster::{PixelFormat, RasterImage};
pub use thumbnail::thumbnail;
