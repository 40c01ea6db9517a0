//! Slot store I/O statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// I/O counters kept by a [`SlotStore`](crate::storage::SlotStore).
///
/// Reads happen through `&self`, so the counters are atomics updated with
/// `Ordering::Relaxed`; only the totals matter, not their interleaving.
///
/// # Example
/// ```
/// use avldb::StoreStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = StoreStats::new();
/// stats.slots_read.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().slots_read, 1);
/// ```
#[derive(Debug)]
pub struct StoreStats {
    /// Number of slots decoded from disk.
    pub slots_read: AtomicU64,

    /// Number of in-place slot overwrites.
    pub slots_written: AtomicU64,

    /// Number of slots appended at the end of the file.
    pub slots_appended: AtomicU64,

    /// Number of header reads.
    pub header_reads: AtomicU64,

    /// Number of header writes.
    pub header_writes: AtomicU64,
}

impl StoreStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            slots_read: AtomicU64::new(0),
            slots_written: AtomicU64::new(0),
            slots_appended: AtomicU64::new(0),
            header_reads: AtomicU64::new(0),
            header_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            slots_read: self.slots_read.load(Ordering::Relaxed),
            slots_written: self.slots_written.load(Ordering::Relaxed),
            slots_appended: self.slots_appended.load(Ordering::Relaxed),
            header_reads: self.header_reads.load(Ordering::Relaxed),
            header_writes: self.header_writes.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.slots_read.store(0, Ordering::Relaxed);
        self.slots_written.store(0, Ordering::Relaxed);
        self.slots_appended.store(0, Ordering::Relaxed);
        self.header_reads.store(0, Ordering::Relaxed);
        self.header_writes.store(0, Ordering::Relaxed);
    }
}

impl Default for StoreStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub slots_read: u64,
    pub slots_written: u64,
    pub slots_appended: u64,
    pub header_reads: u64,
    pub header_writes: u64,
}

impl StatsSnapshot {
    /// Total number of file accesses of any kind.
    pub fn total_io(&self) -> u64 {
        self.slots_read
            + self.slots_written
            + self.slots_appended
            + self.header_reads
            + self.header_writes
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ reads: {}, writes: {}, appends: {}, header r/w: {}/{} }}",
            self.slots_read,
            self.slots_written,
            self.slots_appended,
            self.header_reads,
            self.header_writes
        )
    }
}
