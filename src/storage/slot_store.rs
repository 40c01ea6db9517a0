//! Slot Store - low-level file I/O for fixed-size record slots.
//!
//! The [`SlotStore`] handles all direct file operations:
//! - Reading and writing the root header
//! - Reading, appending and overwriting slots
//! - Creating and validating the backing file

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::trace;

use crate::common::config::{EMPTY_ROOT, HEADER_SIZE, RECORD_SIZE};
use crate::common::{Error, IndexConfig, Result, SlotId};
use crate::storage::record::Record;
use crate::storage::stats::StoreStats;

/// Manages slot I/O for a single backing file.
///
/// # File Layout
/// A 4-byte root header followed by fixed-size slots laid out sequentially:
/// ```text
/// ┌────────┬─────────┬─────────┬─────────┬─────────┐
/// │ root   │ Slot 0  │ Slot 1  │  ...    │ Slot N  │
/// │ (i32)  │ (68 B)  │ (68 B)  │         │ (68 B)  │
/// └────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset: 0    4        72       ...    4 + N×68
/// ```
///
/// Slot N is located at file offset `HEADER_SIZE + N × RECORD_SIZE`.
/// Slots are only ever appended; deleted records stay behind as tombstones.
///
/// # File Handles
/// No handle is held between calls. Every operation opens the file, seeks,
/// reads or writes, and closes it again, so each call stands on its own.
///
/// # Durability
/// With `sync_writes` enabled (the default) every write is followed by
/// `fsync()` before returning.
#[derive(Debug)]
pub struct SlotStore {
    path: PathBuf,
    sync_writes: bool,
    stats: StoreStats,
}

impl SlotStore {
    /// Create a new backing file holding an empty tree.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P, config: &IndexConfig) -> Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path.as_ref())?;
        file.write_all(&EMPTY_ROOT.to_le_bytes())?;
        if config.sync_writes {
            file.sync_all()?;
        }

        Ok(Self::with_path(path, config))
    }

    /// Open an existing backing file.
    ///
    /// A zero-length file is initialized with an empty-tree header.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, or `Error::CorruptFile`
    /// if its length doesn't fit the header + whole-slots layout.
    pub fn open<P: AsRef<Path>>(path: P, config: &IndexConfig) -> Result<Self> {
        let store = Self::with_path(path, config);
        let len = store.file()?.metadata()?.len();

        if len == 0 {
            store.write_header(SlotId::NIL)?;
        } else if len < HEADER_SIZE as u64 {
            return Err(Error::CorruptFile(format!(
                "file is {} bytes, shorter than the {}-byte header",
                len, HEADER_SIZE
            )));
        } else if (len - HEADER_SIZE as u64) % RECORD_SIZE as u64 != 0 {
            return Err(Error::CorruptFile(format!(
                "{} bytes after the header is not a whole number of {}-byte slots",
                len - HEADER_SIZE as u64,
                RECORD_SIZE
            )));
        }

        // Validates the header value.
        store.read_header()?;
        Ok(store)
    }

    /// Open an existing backing file, or create it if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P, config: &IndexConfig) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path, config)
        } else {
            Self::create(path, config)
        }
    }

    fn with_path<P: AsRef<Path>>(path: P, config: &IndexConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sync_writes: config.sync_writes,
            stats: StoreStats::new(),
        }
    }

    fn file(&self) -> Result<File> {
        Ok(OpenOptions::new().read(true).write(true).open(&self.path)?)
    }

    fn finish_write(&self, file: &File) -> Result<()> {
        if self.sync_writes {
            file.sync_all()?; // fsync for durability
        }
        Ok(())
    }

    #[inline]
    fn offset_of(slot: SlotId) -> u64 {
        HEADER_SIZE as u64 + slot.index() * RECORD_SIZE as u64
    }

    // ========================================================================
    // Header
    // ========================================================================

    /// Read the root slot from the header.
    ///
    /// # Errors
    /// Returns `Error::CorruptFile` if the stored value is below -1.
    pub fn read_header(&self) -> Result<SlotId> {
        let mut file = self.file()?;
        let mut buf = [0u8; HEADER_SIZE];
        file.read_exact(&mut buf)?;
        StoreStats::bump(&self.stats.header_reads);

        let root = i32::from_le_bytes(buf);
        if root < EMPTY_ROOT {
            return Err(Error::CorruptFile(format!("invalid root slot {} in header", root)));
        }
        Ok(SlotId(root))
    }

    /// Persist a new root slot. [`SlotId::NIL`] marks the tree empty.
    pub fn write_header(&self, root: SlotId) -> Result<()> {
        let mut file = self.file()?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&root.0.to_le_bytes())?;
        self.finish_write(&file)?;
        StoreStats::bump(&self.stats.header_writes);

        trace!("header <- {}", root);
        Ok(())
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Read the record at `slot`.
    ///
    /// Returns `Ok(None)` when `slot` is negative or past the end of the file.
    ///
    /// # Errors
    /// Returns `Error::CorruptRecord` if the file ends partway through the
    /// slot or its bytes fail to decode.
    pub fn read_slot(&self, slot: SlotId) -> Result<Option<Record>> {
        if !slot.is_valid() {
            return Ok(None);
        }

        let mut file = self.file()?;
        let len = file.metadata()?.len();
        let offset = Self::offset_of(slot);
        if offset >= len {
            return Ok(None);
        }
        if offset + RECORD_SIZE as u64 > len {
            return Err(Error::corrupt_record(slot.0, "slot truncated by end of file"));
        }

        file.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; RECORD_SIZE];
        file.read_exact(&mut buf)?;
        StoreStats::bump(&self.stats.slots_read);

        trace!("read {}", slot);
        Record::decode(slot, &buf).map(Some)
    }

    /// Append a record at the end of the file and return its new slot.
    ///
    /// Slot indices are handed out in strictly increasing order and never
    /// reused.
    pub fn append_slot(&self, record: &Record) -> Result<SlotId> {
        let mut file = self.file()?;
        let end = file.seek(SeekFrom::End(0))?;

        let body = end.checked_sub(HEADER_SIZE as u64).ok_or_else(|| {
            Error::CorruptFile("file is shorter than its header".to_string())
        })?;
        if body % RECORD_SIZE as u64 != 0 {
            return Err(Error::CorruptFile(format!(
                "file body of {} bytes ends mid-slot",
                body
            )));
        }
        let index = i32::try_from(body / RECORD_SIZE as u64)
            .map_err(|_| Error::CorruptFile("slot index space exhausted".to_string()))?;

        file.write_all(&record.encode())?;
        self.finish_write(&file)?;
        StoreStats::bump(&self.stats.slots_appended);

        let slot = SlotId::new(index);
        trace!("append {} (key {})", slot, record.key);
        Ok(slot)
    }

    /// Overwrite the record at `slot` in place.
    ///
    /// `slot` must have been returned by [`append_slot`](Self::append_slot).
    ///
    /// # Errors
    /// Returns `Error::SlotOutOfRange` if `slot` is negative or past the end
    /// of the file.
    pub fn write_slot(&self, slot: SlotId, record: &Record) -> Result<()> {
        if !slot.is_valid() {
            return Err(Error::SlotOutOfRange(slot.0));
        }

        let mut file = self.file()?;
        let offset = Self::offset_of(slot);
        if offset + RECORD_SIZE as u64 > file.metadata()?.len() {
            return Err(Error::SlotOutOfRange(slot.0));
        }

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&record.encode())?;
        self.finish_write(&file)?;
        StoreStats::bump(&self.stats.slots_written);

        trace!("write {} (key {})", slot, record.key);
        Ok(())
    }

    /// Number of slots in the file, tombstones included.
    pub fn slot_count(&self) -> Result<u32> {
        let len = self.file_size()?;
        Ok((len.saturating_sub(HEADER_SIZE as u64) / RECORD_SIZE as u64) as u32)
    }

    /// Total size of the backing file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    /// Path of the backing file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// I/O counters for this store.
    #[inline]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }
}
