//! avldb - a disk-resident AVL index over fixed-size records.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             avldb                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Drivers (loader, avldb binary, benches)        │   │
//! │  │   use only search / insert / delete / range_query        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Index Layer (index/)                     │   │
//! │  │     AvlIndex: descent, rotations, rebalance, verify      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Storage Layer (storage/)                  │   │
//! │  │        SlotStore (header + slots) + Record codec         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tree nodes live in numbered slots of one flat file; a child link is a
//! slot index and `-1` means "none". The index never holds the tree in
//! memory: every step of every operation reads or writes a slot.
//!
//! # Modules
//! - [`common`] - Shared primitives (SlotId, Error, config)
//! - [`storage`] - Record encoding and slot file I/O
//! - [`index`] - The AVL tree
//! - [`loader`] - Bulk loading from delimited text
//!
//! # Quick Start
//! ```no_run
//! use avldb::{AvlIndex, Record};
//!
//! let mut index = AvlIndex::open("sales.dat").unwrap();
//! for key in [10, 20, 30] {
//!     index.insert(Record::new(key, "Choclo", 40, 4.2, "2025-12-28")).unwrap();
//! }
//!
//! // Ascending insertion still yields a height-1 tree
//! assert_eq!(index.height().unwrap(), 1);
//! ```

pub mod common;
pub mod index;
pub mod loader;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{HEADER_SIZE, RECORD_SIZE};
pub use common::{Error, IndexConfig, Result, SlotId};

pub use index::AvlIndex;
pub use loader::LoadSummary;
pub use storage::{Record, SlotStore, StatsSnapshot, StoreStats};
