//! Configuration for avldb.
//!
//! The constants here pin down the on-disk format; [`IndexConfig`] holds the
//! runtime knobs an [`AvlIndex`](crate::AvlIndex) is opened with.

/// Size of the file header in bytes (one `i32` root slot index).
pub const HEADER_SIZE: usize = 4;

/// Width of the fixed `name` text field.
pub const NAME_LEN: usize = 30;

/// Width of the fixed `date` text field.
pub const DATE_LEN: usize = 10;

/// Size of one encoded record (one slot) in bytes.
///
/// # Layout
/// The fields keep the natural 4-byte alignment of the integer fields, so
/// the two text fields are each followed by 2 bytes of padding:
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     key (i32)
/// 4       30    name
/// 34      2     padding
/// 36      4     quantity (i32)
/// 40      4     unit_price (f32)
/// 44      10    date
/// 54      2     padding
/// 56      4     right slot (i32)
/// 60      4     left slot (i32)
/// 64      4     height (i32)
/// ```
pub const RECORD_SIZE: usize = 68;

/// Header value of a tree with no root.
///
/// Slot 0 is a legitimate root, so the empty tree needs its own value.
pub const EMPTY_ROOT: i32 = -1;

/// Default ceiling on recursion depth during tree walks.
///
/// An AVL tree of 2^31 nodes is at most ~45 levels deep, so hitting this
/// means the file holds a cycle or a badly unbalanced chain.
pub const DEFAULT_MAX_DEPTH: usize = 96;

/// Runtime options for an index.
///
/// # Example
/// ```
/// use avldb::IndexConfig;
///
/// let config = IndexConfig::default().sync_writes(false);
/// assert!(!config.sync_writes);
/// assert_eq!(config.max_depth, avldb::common::config::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Call `fsync()` after every header or slot write.
    pub sync_writes: bool,
    /// Maximum recursion depth before a walk fails with `DepthExceeded`.
    pub max_depth: usize,
}

impl IndexConfig {
    /// Set whether writes are synced to disk before returning.
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    /// Set the recursion depth ceiling.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            sync_writes: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
