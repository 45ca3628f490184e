//! Nintendo format families.
//!
//! - amiibo (NTAG215 figurine dumps)

pub mod amiibo;

pub use amiibo::AmiiboParser;
