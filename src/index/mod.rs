//! Index layer - the disk-resident AVL tree.
//!
//! - [`AvlIndex`] - Search, insert, delete, range query and traversal
//! - `verify` - Invariant checks over the persisted tree

mod avl;
mod verify;

pub use avl::AvlIndex;
