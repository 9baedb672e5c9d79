//! Database repository layer

pub mod asset_repo;

pub use asset_repo::*;
