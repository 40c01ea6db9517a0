//! Common types and utilities shared across avldb.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Format constants and runtime configuration
//! - Error types
//! - Slot identifiers

pub mod config;
pub mod error;
mod slot_id;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use slot_id::SlotId;
