//! Bulk loading from delimited text.
//!
//! The input has a header row followed by one record per line with the
//! columns `key, name, quantity, price, date`. Rows are inserted one at a
//! time, in file order, through [`AvlIndex::insert`]; the loader knows
//! nothing about slots.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use log::{info, warn};

use crate::common::{Error, Result};
use crate::index::AvlIndex;
use crate::storage::Record;

/// Number of columns every data row must have.
const COLUMNS: usize = 5;

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Rows inserted.
    pub inserted: usize,
    /// Rows skipped because their key was already present.
    pub duplicates: usize,
    /// Rows skipped because they could not be parsed.
    pub malformed: usize,
}

/// Load a comma-separated file into `index`.
pub fn load_csv_file<P: AsRef<Path>>(index: &mut AvlIndex, path: P) -> Result<LoadSummary> {
    load_delimited_file(index, path, b',')
}

/// Load a file delimited by `delimiter` into `index`, logging a summary.
pub fn load_delimited_file<P: AsRef<Path>>(
    index: &mut AvlIndex,
    path: P,
    delimiter: u8,
) -> Result<LoadSummary> {
    let file = File::open(path.as_ref())?;
    let summary = load_delimited(index, file, delimiter)?;
    info!(
        "loaded {}: {} inserted, {} duplicates, {} malformed",
        path.as_ref().display(),
        summary.inserted,
        summary.duplicates,
        summary.malformed
    );
    Ok(summary)
}

/// Load delimited rows from `reader` into `index`.
///
/// The first row is a header and is skipped; blank lines are ignored.
/// Fields may be double-quoted, so a quoted field can hold the delimiter.
/// Duplicate keys and unparseable rows (including rows with other than
/// five fields) are logged and counted, not returned as errors.
///
/// # Errors
/// Read failures and fatal index errors stop the load and are returned.
pub fn load_delimited<R: Read>(
    index: &mut AvlIndex,
    reader: R,
    delimiter: u8,
) -> Result<LoadSummary> {
    let mut rows = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut summary = LoadSummary::default();

    for row in rows.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                match e.into_kind() {
                    ErrorKind::Io(io) => return Err(io.into()),
                    kind => {
                        warn!("line {}: skipped, unreadable row: {:?}", line, kind);
                        summary.malformed += 1;
                        continue;
                    }
                }
            }
        };
        let line = row.position().map_or(0, |p| p.line());

        let record = match parse_row(&row) {
            Ok(record) => record,
            Err(reason) => {
                warn!("line {}: skipped, {}", line, reason);
                summary.malformed += 1;
                continue;
            }
        };

        match index.insert(record) {
            Ok(()) => summary.inserted += 1,
            Err(Error::DuplicateKey(key)) => {
                warn!("line {}: skipped, duplicate key {}", line, key);
                summary.duplicates += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

fn parse_row(row: &StringRecord) -> std::result::Result<Record, String> {
    if row.len() != COLUMNS {
        return Err(format!("expected {} columns, found {}", COLUMNS, row.len()));
    }

    let key = row[0]
        .parse::<i32>()
        .map_err(|e| format!("bad key {:?}: {}", &row[0], e))?;
    let quantity = row[2]
        .parse::<i32>()
        .map_err(|e| format!("bad quantity {:?}: {}", &row[2], e))?;
    let price = row[3]
        .parse::<f32>()
        .map_err(|e| format!("bad price {:?}: {}", &row[3], e))?;

    Ok(Record::new(key, &row[1], quantity, price, &row[4]))
}
