//! Storage layer - record encoding and slot I/O.
//!
//! This module handles persistent storage:
//! - [`Record`] - Fixed-width record codec
//! - [`SlotStore`] - Header and slot file access
//! - [`StoreStats`] - I/O counters

mod record;
mod slot_store;
mod stats;

pub use record::Record;
pub use slot_store::SlotStore;
pub use stats::{StatsSnapshot, StoreStats};
