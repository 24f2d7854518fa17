//! Core types and constants for the latency globe

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
