//! Error types for avldb.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in avldb.
///
/// Errors fall into two classes (see [`Error::is_fatal`]):
/// - Rejections (`DuplicateKey`, `KeyNotFound`): the file is untouched and
///   the caller may carry on.
/// - Failures: the backing file could not be accessed or no longer matches
///   the format. An index that returns one of these mid-operation may have
///   left the header, a parent link and a child mutually inconsistent;
///   there is no rollback.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Insert of a key that is already in the tree. Nothing was written.
    #[error("Key {0} already exists")]
    DuplicateKey(i32),

    /// Delete of a key that is not in the tree. Nothing was written.
    #[error("Key {0} not found")]
    KeyNotFound(i32),

    /// A slot index past the end of the file was written to.
    #[error("Slot {0} is out of range")]
    SlotOutOfRange(i32),

    /// A slot's bytes or links do not decode to a valid record.
    #[error("Corrupt record at slot {slot}: {reason}")]
    CorruptRecord { slot: i32, reason: String },

    /// The file header or extent does not match the layout.
    #[error("Corrupt file: {0}")]
    CorruptFile(String),

    /// A tree walk recursed deeper than the configured limit.
    ///
    /// This indicates a cycle or a broken balance invariant in the file.
    #[error("Tree depth exceeded limit of {limit}")]
    DepthExceeded { limit: usize },

    /// `verify()` found a node breaking ordering, balance or height rules.
    #[error("Invariant violated at slot {slot}: {reason}")]
    InvariantViolation { slot: i32, reason: String },
}

impl Error {
    /// Whether the error means the index can no longer be trusted.
    ///
    /// `DuplicateKey` and `KeyNotFound` are ordinary outcomes and return
    /// `false`; everything else returns `true`.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::DuplicateKey(_) | Error::KeyNotFound(_))
    }

    pub(crate) fn corrupt_record(slot: i32, reason: impl Into<String>) -> Self {
        Error::CorruptRecord {
            slot,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateKey(42);
        assert_eq!(format!("{}", err), "Key 42 already exists");

        let err = Error::KeyNotFound(7);
        assert_eq!(format!("{}", err), "Key 7 not found");

        let err = Error::corrupt_record(3, "short read");
        assert_eq!(format!("{}", err), "Corrupt record at slot 3: short read");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_is_fatal() {
        assert!(!Error::DuplicateKey(1).is_fatal());
        assert!(!Error::KeyNotFound(1).is_fatal());
        assert!(Error::DepthExceeded { limit: 4 }.is_fatal());
        assert!(Error::CorruptFile("bad header".into()).is_fatal());
    }
}
