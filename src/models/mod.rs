//! Domain models

pub mod asset;

pub use asset::*;
