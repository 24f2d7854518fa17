//! Error types shared across the crate

pub mod error;

pub use error::{GeoError, GeoResult, ParseError};
