//! AVL Index - a self-balancing search tree living entirely in slots.
//!
//! The [`AvlIndex`] provides:
//! - Point lookup and bounded range queries
//! - Insertion and deletion with AVL rebalancing
//! - Sorted and insertion-order traversal
//!
//! No node is cached: every comparison, height read and link update goes
//! through the [`SlotStore`], and every changed node is written back before
//! the operation returns.

use std::cmp::Ordering;
use std::path::Path;

use log::debug;

use crate::common::{Error, IndexConfig, Result, SlotId};
use crate::storage::{Record, SlotStore, StoreStats};

/// A disk-resident AVL tree over [`Record`]s keyed by `i32`.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                      AvlIndex                        │
/// │   search / insert / delete / range_query / traverse  │
/// │                         │                            │
/// │                         ▼                            │
/// │  ┌────────────────────────────────────────────────┐  │
/// │  │ SlotStore: header (root slot) + slot 0..N      │  │
/// │  │ left/right links are slot indices, -1 = none   │  │
/// │  └────────────────────────────────────────────────┘  │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// A node keeps its slot for life. Rotations rewrite the *contents* of the
/// affected slots (links and heights) and, when the subtree root was the
/// tree root, the header.
///
/// # Consistency
/// Operations span several independent file writes with no journal. If a
/// process dies mid-rotation or mid-delete, the header, a parent link and a
/// child can disagree. [`verify`](Self::verify) detects the resulting
/// damage but nothing repairs it.
///
/// # Usage
/// ```no_run
/// use avldb::{AvlIndex, Record};
///
/// let mut index = AvlIndex::open("sales.dat")?;
/// index.insert(Record::new(5, "Arroz", 50, 5.2, "2025-12-29"))?;
///
/// let hit = index.get(5)?;
/// assert_eq!(hit.map(|r| r.quantity), Some(50));
///
/// let keys: Vec<i32> = index.range_query(0, 10)?.iter().map(|r| r.key).collect();
/// assert_eq!(keys, vec![5]);
/// # Ok::<(), avldb::Error>(())
/// ```
#[derive(Debug)]
pub struct AvlIndex {
    pub(super) store: SlotStore,
    config: IndexConfig,
}

impl AvlIndex {
    /// Create a new, empty index file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = IndexConfig::default();
        let store = SlotStore::create(path, &config)?;
        Ok(Self { store, config })
    }

    /// Open an index file with the default configuration, creating it if
    /// it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, IndexConfig::default())
    }

    /// Open an index file, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns `Error::CorruptFile` if an existing file doesn't match the
    /// header + slots layout.
    pub fn open_with<P: AsRef<Path>>(path: P, config: IndexConfig) -> Result<Self> {
        let store = SlotStore::open_or_create(path, &config)?;
        Ok(Self { store, config })
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Find the slot holding `key`.
    ///
    /// Returns `Ok(None)` once the descent follows a null link.
    pub fn search(&self, key: i32) -> Result<Option<SlotId>> {
        let mut slot = self.store.read_header()?;
        let mut depth = 0;

        while slot.is_valid() {
            self.check_depth(depth)?;
            let node = self.node(slot)?;
            slot = match key.cmp(&node.key) {
                Ordering::Equal => return Ok(Some(slot)),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            depth += 1;
        }

        Ok(None)
    }

    /// Fetch the record stored under `key`.
    pub fn get(&self, key: i32) -> Result<Option<Record>> {
        match self.search(key)? {
            Some(slot) => self.node(slot).map(Some),
            None => Ok(None),
        }
    }

    /// All records with `low <= key <= high`, in ascending key order.
    ///
    /// Subtrees that cannot hold a key in range are never read. An inverted
    /// range (`low > high`) yields nothing.
    pub fn range_query(&self, low: i32, high: i32) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        if low > high {
            return Ok(out);
        }

        let root = self.store.read_header()?;
        self.collect_range(root, low, high, 0, &mut out)?;
        Ok(out)
    }

    /// Every record in ascending key order.
    pub fn traverse_sorted(&self) -> Result<Vec<Record>> {
        self.range_query(i32::MIN, i32::MAX)
    }

    /// Every live record in slot (append) order.
    ///
    /// This is a sequential scan of the file that ignores tree links; it
    /// stops at the first slot past the end and skips deleted slots.
    pub fn traverse_insertion_order(&self) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        let mut slot = SlotId::new(0);

        while let Some(record) = self.store.read_slot(slot)? {
            if !record.is_tombstone() {
                out.push(record);
            }
            slot = SlotId::new(slot.0 + 1);
        }

        Ok(out)
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert a record, rebalancing every ancestor of the new leaf.
    ///
    /// The record's links and height are ignored; it is stored as a fresh
    /// leaf in a newly appended slot.
    ///
    /// # Errors
    /// Returns `Error::DuplicateKey` without touching the file if the key
    /// is already present.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        let key = record.key;
        if self.search(key)?.is_some() {
            debug!("insert rejected: key {} already present", key);
            return Err(Error::DuplicateKey(key));
        }

        let leaf = Record {
            right: SlotId::NIL,
            left: SlotId::NIL,
            height: 0,
            ..record
        };

        let root = self.store.read_header()?;
        let new_root = self.insert_at(root, leaf, 0)?;
        if new_root != root {
            self.set_root(root, new_root)?;
        }
        Ok(())
    }

    /// Delete the record stored under `key` and return its payload.
    ///
    /// A node with two children takes over its in-order successor's
    /// payload and the successor's slot is retired instead. Either way
    /// exactly one slot becomes a tombstone, and every ancestor of the
    /// physically removed node is rebalanced.
    ///
    /// # Errors
    /// Returns `Error::KeyNotFound` without touching the file if the key is
    /// absent.
    pub fn delete(&mut self, key: i32) -> Result<Record> {
        let removed = match self.search(key)? {
            Some(slot) => self.node(slot)?,
            None => return Err(Error::KeyNotFound(key)),
        };

        let root = self.store.read_header()?;
        let new_root = self.delete_at(root, key, 0)?;
        if new_root != root {
            self.set_root(root, new_root)?;
        }

        Ok(Record::new(
            removed.key,
            removed.name,
            removed.quantity,
            removed.unit_price,
            removed.date,
        ))
    }

    // ========================================================================
    // Public API: Info
    // ========================================================================

    /// Slot of the current root, or [`SlotId::NIL`] for an empty tree.
    pub fn root(&self) -> Result<SlotId> {
        self.store.read_header()
    }

    /// Height of the whole tree: -1 when empty, 0 for a single node.
    pub fn height(&self) -> Result<i32> {
        let root = self.store.read_header()?;
        self.height_of(root)
    }

    /// Number of records reachable from the root.
    pub fn len(&self) -> Result<usize> {
        let root = self.store.read_header()?;
        self.count_at(root, 0)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.store.read_header()?.is_valid())
    }

    /// Number of physical slots, deleted ones included.
    pub fn slot_count(&self) -> Result<u32> {
        self.store.slot_count()
    }

    /// I/O counters of the underlying store.
    pub fn stats(&self) -> &StoreStats {
        self.store.stats()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // ========================================================================
    // Internal: Node access
    // ========================================================================

    /// Read a node that a link points at.
    ///
    /// A link to a missing or deleted slot means the file is damaged.
    pub(super) fn node(&self, slot: SlotId) -> Result<Record> {
        match self.store.read_slot(slot)? {
            Some(record) if !record.is_tombstone() => Ok(record),
            Some(_) => Err(Error::corrupt_record(slot.0, "link points at a deleted slot")),
            None => Err(Error::corrupt_record(slot.0, "link points past the end of the file")),
        }
    }

    /// Height of the subtree at `slot`; -1 for a null link.
    fn height_of(&self, slot: SlotId) -> Result<i32> {
        if !slot.is_valid() {
            return Ok(-1);
        }
        Ok(self.node(slot)?.height)
    }

    fn balance_of(&self, node: &Record) -> Result<i32> {
        Ok(self.height_of(node.left)? - self.height_of(node.right)?)
    }

    pub(super) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    fn set_root(&self, old: SlotId, new: SlotId) -> Result<()> {
        debug!("root {} -> {}", old, new);
        self.store.write_header(new)
    }

    // ========================================================================
    // Internal: Rebalancing
    // ========================================================================

    /// Recompute `node`'s height, rotate if it is out of balance, and
    /// persist. Returns the slot now rooting this subtree.
    fn rebalance(&self, slot: SlotId, mut node: Record) -> Result<SlotId> {
        let left_height = self.height_of(node.left)?;
        let right_height = self.height_of(node.right)?;
        node.height = 1 + left_height.max(right_height);
        let balance = left_height - right_height;

        if balance > 1 {
            let left = self.node(node.left)?;
            if self.balance_of(&left)? < 0 {
                debug!("left-right rotation at {} (key {})", slot, node.key);
                node.left = self.rotate_left(node.left, left)?;
            } else {
                debug!("right rotation at {} (key {})", slot, node.key);
            }
            return self.rotate_right(slot, node);
        }

        if balance < -1 {
            let right = self.node(node.right)?;
            if self.balance_of(&right)? > 0 {
                debug!("right-left rotation at {} (key {})", slot, node.key);
                node.right = self.rotate_right(node.right, right)?;
            } else {
                debug!("left rotation at {} (key {})", slot, node.key);
            }
            return self.rotate_left(slot, node);
        }

        self.store.write_slot(slot, &node)?;
        Ok(slot)
    }

    /// Rotate `y` right around its left child `x`; returns `x`'s slot.
    ///
    /// ```text
    ///       y            x
    ///      / \          / \
    ///     x   C  ==>   A   y
    ///    / \              / \
    ///   A   B            B   C
    /// ```
    fn rotate_right(&self, y_slot: SlotId, mut y: Record) -> Result<SlotId> {
        let x_slot = y.left;
        let mut x = self.node(x_slot)?;

        y.left = x.right;
        x.right = y_slot;

        y.height = 1 + self.height_of(y.left)?.max(self.height_of(y.right)?);
        self.store.write_slot(y_slot, &y)?;

        x.height = 1 + self.height_of(x.left)?.max(y.height);
        self.store.write_slot(x_slot, &x)?;

        Ok(x_slot)
    }

    /// Mirror of [`rotate_right`](Self::rotate_right); returns `y`'s slot.
    fn rotate_left(&self, x_slot: SlotId, mut x: Record) -> Result<SlotId> {
        let y_slot = x.right;
        let mut y = self.node(y_slot)?;

        x.right = y.left;
        y.left = x_slot;

        x.height = 1 + self.height_of(x.left)?.max(self.height_of(x.right)?);
        self.store.write_slot(x_slot, &x)?;

        y.height = 1 + x.height.max(self.height_of(y.right)?);
        self.store.write_slot(y_slot, &y)?;

        Ok(y_slot)
    }

    // ========================================================================
    // Internal: Recursive insert/delete
    // ========================================================================

    /// Insert `record` below `slot`, returning the subtree's new root.
    fn insert_at(&self, slot: SlotId, record: Record, depth: usize) -> Result<SlotId> {
        if !slot.is_valid() {
            return self.store.append_slot(&record);
        }
        self.check_depth(depth)?;

        let mut node = self.node(slot)?;
        match record.key.cmp(&node.key) {
            Ordering::Less => node.left = self.insert_at(node.left, record, depth + 1)?,
            Ordering::Greater => node.right = self.insert_at(node.right, record, depth + 1)?,
            Ordering::Equal => return Err(Error::DuplicateKey(record.key)),
        }

        self.rebalance(slot, node)
    }

    /// Remove `key` from the subtree at `slot`, returning its new root.
    fn delete_at(&self, slot: SlotId, key: i32, depth: usize) -> Result<SlotId> {
        if !slot.is_valid() {
            return Err(Error::KeyNotFound(key));
        }
        self.check_depth(depth)?;

        let mut node = self.node(slot)?;
        match key.cmp(&node.key) {
            Ordering::Less => {
                node.left = self.delete_at(node.left, key, depth + 1)?;
                return self.rebalance(slot, node);
            }
            Ordering::Greater => {
                node.right = self.delete_at(node.right, key, depth + 1)?;
                return self.rebalance(slot, node);
            }
            Ordering::Equal => {}
        }

        if node.left.is_valid() && node.right.is_valid() {
            let successor = self.leftmost(node.right, depth + 1)?;
            debug!(
                "delete key {} at {}: taking payload of successor key {}",
                key, slot, successor.key
            );
            node.copy_payload_from(&successor);
            node.right = self.delete_at(node.right, successor.key, depth + 1)?;
            return self.rebalance(slot, node);
        }

        // Zero or one child: splice the child (or nothing) into the parent.
        let child = if node.left.is_valid() {
            node.left
        } else {
            node.right
        };
        debug!("delete key {} at {}, replaced by {}", key, slot, child);
        self.store.write_slot(slot, &Record::tombstone())?;
        Ok(child)
    }

    /// The smallest-keyed node in the subtree at `slot`.
    fn leftmost(&self, mut slot: SlotId, mut depth: usize) -> Result<Record> {
        loop {
            self.check_depth(depth)?;
            let node = self.node(slot)?;
            if !node.left.is_valid() {
                return Ok(node);
            }
            slot = node.left;
            depth += 1;
        }
    }

    // ========================================================================
    // Internal: Traversal
    // ========================================================================

    fn collect_range(
        &self,
        slot: SlotId,
        low: i32,
        high: i32,
        depth: usize,
        out: &mut Vec<Record>,
    ) -> Result<()> {
        if !slot.is_valid() {
            return Ok(());
        }
        self.check_depth(depth)?;

        let node = self.node(slot)?;
        let (key, right) = (node.key, node.right);

        if low < key {
            self.collect_range(node.left, low, high, depth + 1, out)?;
        }
        if low <= key && key <= high {
            out.push(node);
        }
        if high > key {
            self.collect_range(right, low, high, depth + 1, out)?;
        }
        Ok(())
    }

    fn count_at(&self, slot: SlotId, depth: usize) -> Result<usize> {
        if !slot.is_valid() {
            return Ok(0);
        }
        self.check_depth(depth)?;

        let node = self.node(slot)?;
        Ok(1 + self.count_at(node.left, depth + 1)? + self.count_at(node.right, depth + 1)?)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn create_index() -> (AvlIndex, TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.dat");
        let config = IndexConfig::default().sync_writes(false);
        (AvlIndex::open_with(&path, config).unwrap(), dir)
    }

    fn sale(key: i32) -> Record {
        Record::new(key, format!("item-{}", key), key * 10, 1.25, "2025-12-25")
    }

    fn insert_all(index: &mut AvlIndex, keys: &[i32]) {
        for &key in keys {
            index.insert(sale(key)).unwrap();
        }
    }

    fn sorted_keys(index: &AvlIndex) -> Vec<i32> {
        index.traverse_sorted().unwrap().iter().map(|r| r.key).collect()
    }

    #[test]
    fn test_empty_index() {
        let (index, _dir) = create_index();

        assert_eq!(index.root().unwrap(), SlotId::NIL);
        assert_eq!(index.height().unwrap(), -1);
        assert_eq!(index.len().unwrap(), 0);
        assert!(index.is_empty().unwrap());
        assert_eq!(index.search(1).unwrap(), None);
        assert!(index.traverse_sorted().unwrap().is_empty());
    }

    #[test]
    fn test_first_insert_becomes_root_at_slot_zero() {
        let (mut index, _dir) = create_index();
        index.insert(sale(42)).unwrap();

        assert_eq!(index.root().unwrap(), SlotId::new(0));
        assert_eq!(index.height().unwrap(), 0);
        assert_eq!(index.search(42).unwrap(), Some(SlotId::new(0)));
    }

    #[test]
    fn test_balanced_insert_no_rotation() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(index.height().unwrap(), 2);
        assert_eq!(sorted_keys(&index), vec![1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(index.root().unwrap(), SlotId::new(0));
    }

    #[test]
    fn test_ascending_insert_rotates_left() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[10, 20, 30]);

        assert_eq!(index.height().unwrap(), 1);
        // 20 went into slot 1 and is now the root
        assert_eq!(index.root().unwrap(), SlotId::new(1));

        let root = index.get(20).unwrap().unwrap();
        assert_eq!(root.left, SlotId::new(0));
        assert_eq!(root.right, SlotId::new(2));
    }

    #[test]
    fn test_descending_insert_rotates_right() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[30, 20, 10]);

        assert_eq!(index.height().unwrap(), 1);
        assert_eq!(index.root().unwrap(), SlotId::new(1));
    }

    #[test]
    fn test_left_right_double_rotation() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[30, 10, 20]);

        assert_eq!(index.height().unwrap(), 1);
        assert_eq!(index.root().unwrap(), SlotId::new(2));
        assert_eq!(sorted_keys(&index), vec![10, 20, 30]);
    }

    #[test]
    fn test_right_left_double_rotation() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[10, 30, 20]);

        assert_eq!(index.height().unwrap(), 1);
        assert_eq!(index.root().unwrap(), SlotId::new(2));
        assert_eq!(sorted_keys(&index), vec![10, 20, 30]);
    }

    #[test]
    fn test_rotation_below_root_keeps_header() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[50, 20, 80, 90, 100]);

        // 80 -> 90 -> 100 rotates under the root
        assert_eq!(index.root().unwrap(), SlotId::new(0));
        let root = index.get(50).unwrap().unwrap();
        assert_eq!(index.node(root.right).unwrap().key, 90);
        assert_eq!(index.height().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[2, 1, 3]);
        let slots_before = index.slot_count().unwrap();

        let err = index.insert(Record::new(2, "other", 1, 1.0, "")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(2)));
        assert!(!err.is_fatal());

        assert_eq!(index.slot_count().unwrap(), slots_before);
        assert_eq!(index.len().unwrap(), 3);
        assert_eq!(index.get(2).unwrap().unwrap().name, "item-2");
    }

    #[test]
    fn test_insert_ignores_incoming_links() {
        let (mut index, _dir) = create_index();
        let mut record = sale(1);
        record.left = SlotId::new(12);
        record.height = 7;
        index.insert(record).unwrap();

        let stored = index.get(1).unwrap().unwrap();
        assert!(stored.is_leaf());
        assert_eq!(stored.height, 0);
    }

    #[test]
    fn test_delete_leaf() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[2, 1, 3]);

        let removed = index.delete(3).unwrap();
        assert_eq!(removed.key, 3);
        assert_eq!(removed.name, "item-3");

        assert_eq!(index.search(3).unwrap(), None);
        assert_eq!(sorted_keys(&index), vec![1, 2]);
        assert!(index.store.read_slot(SlotId::new(2)).unwrap().unwrap().is_tombstone());
    }

    #[test]
    fn test_delete_one_child() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[2, 1, 3, 4]);

        index.delete(3).unwrap();
        assert_eq!(sorted_keys(&index), vec![1, 2, 4]);
        assert_eq!(index.get(2).unwrap().unwrap().right, SlotId::new(3));
    }

    #[test]
    fn test_delete_two_children_takes_successor() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[1, 2, 3, 4, 5, 6, 7]);
        let root_slot = index.search(4).unwrap().unwrap();

        index.delete(4).unwrap();

        assert_eq!(sorted_keys(&index), vec![1, 2, 3, 5, 6, 7]);
        // the root slot now carries the successor's payload
        assert_eq!(index.root().unwrap(), root_slot);
        let root = index.node(root_slot).unwrap();
        assert_eq!(root.key, 5);
        assert_eq!(root.name, "item-5");
        index.verify().unwrap();
    }

    #[test]
    fn test_delete_root_only_node() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[9]);

        index.delete(9).unwrap();

        assert_eq!(index.root().unwrap(), SlotId::NIL);
        assert!(index.is_empty().unwrap());
        assert_eq!(index.slot_count().unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_key() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[1, 2]);
        let before = index.stats().snapshot();

        let err = index.delete(99).unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(99)));

        let after = index.stats().snapshot();
        assert_eq!(after.slots_written, before.slots_written);
        assert_eq!(after.header_writes, before.header_writes);
    }

    #[test]
    fn test_delete_rebalances_root() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[2, 1, 3, 4]);

        // removing 1 leaves 2 -> 3 -> 4 right-heavy at the root
        index.delete(1).unwrap();

        assert_eq!(index.height().unwrap(), 1);
        assert_eq!(index.node(index.root().unwrap()).unwrap().key, 3);
        index.verify().unwrap();
    }

    #[test]
    fn test_deleted_slots_are_not_reused() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[1, 2, 3]);
        index.delete(3).unwrap();

        index.insert(sale(10)).unwrap();

        assert_eq!(index.search(10).unwrap(), Some(SlotId::new(3)));
        assert_eq!(index.slot_count().unwrap(), 4);
    }

    #[test]
    fn test_range_query_bounds() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[5, 3, 8, 1, 4, 7, 9]);

        let keys = |lo, hi| -> Vec<i32> {
            index.range_query(lo, hi).unwrap().iter().map(|r| r.key).collect()
        };

        assert_eq!(keys(3, 7), vec![3, 4, 5, 7]);
        assert_eq!(keys(6, 6), Vec::<i32>::new());
        assert_eq!(keys(9, 100), vec![9]);
        assert_eq!(keys(-10, 0), Vec::<i32>::new());
        assert_eq!(keys(7, 3), Vec::<i32>::new());
    }

    #[test]
    fn test_range_query_prunes_subtrees() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &(1..=31).collect::<Vec<_>>());

        index.stats().reset();
        let hits = index.range_query(1, 1).unwrap();
        assert_eq!(hits.len(), 1);

        // one root-to-leaf path at most, plus the header
        let reads = index.stats().snapshot().slots_read;
        assert!(reads <= 6, "read {} slots for a single-key range", reads);
    }

    #[test]
    fn test_insertion_order_skips_tombstones() {
        let (mut index, _dir) = create_index();
        insert_all(&mut index, &[10, 20, 30, 5]);
        index.delete(20).unwrap();

        let keys: Vec<i32> = index
            .traverse_insertion_order()
            .unwrap()
            .iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec![10, 30, 5]);
    }

    #[test]
    fn test_depth_guard() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.dat");
        let config = IndexConfig::default().sync_writes(false).max_depth(1);
        let mut index = AvlIndex::open_with(&path, config).unwrap();

        // building reaches depth 1 at most; finding 4 needs depth 2
        for key in [2, 1, 3, 4] {
            index.insert(sale(key)).unwrap();
        }

        match index.search(4) {
            Err(Error::DepthExceeded { limit: 1 }) => {}
            other => panic!("Expected DepthExceeded, got {:?}", other),
        }
    }
}
