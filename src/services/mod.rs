//! Business logic services layer

pub mod inventory;

pub use inventory::{ChangeFeedHandle, InventoryService};
