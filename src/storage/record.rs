//! Record - one tree node as stored in a slot.
//!
//! A [`Record`] carries the user payload (key, name, quantity, unit price,
//! date) plus the structural fields the AVL index threads through it
//! (child links and subtree height). It encodes to exactly
//! [`RECORD_SIZE`] bytes; see [`config`](crate::common::config) for the
//! byte layout.

use crate::common::config::{DATE_LEN, NAME_LEN, RECORD_SIZE};
use crate::common::{Error, Result, SlotId};

/// A fixed-size record, the payload of one slot.
///
/// # Example
/// ```
/// use avldb::Record;
///
/// let record = Record::new(7, "Papas", 10, 1.25, "2025-12-25");
/// let bytes = record.encode();
/// let decoded = Record::decode(avldb::SlotId::new(0), &bytes).unwrap();
/// assert_eq!(decoded, record);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique ordering key.
    pub key: i32,
    /// Item name, at most [`NAME_LEN`] bytes once encoded.
    pub name: String,
    pub quantity: i32,
    pub unit_price: f32,
    /// Date text, at most [`DATE_LEN`] bytes once encoded.
    pub date: String,
    /// Right child slot, or [`SlotId::NIL`].
    pub right: SlotId,
    /// Left child slot, or [`SlotId::NIL`].
    pub left: SlotId,
    /// Height of the subtree rooted here. Leaf = 0; -1 marks a tombstone.
    pub height: i32,
}

impl Record {
    pub const OFFSET_KEY: usize = 0;
    pub const OFFSET_NAME: usize = 4;
    pub const OFFSET_QUANTITY: usize = 36;
    pub const OFFSET_UNIT_PRICE: usize = 40;
    pub const OFFSET_DATE: usize = 44;
    pub const OFFSET_RIGHT: usize = 56;
    pub const OFFSET_LEFT: usize = 60;
    pub const OFFSET_HEIGHT: usize = 64;

    /// Create a detached leaf record (no children, height 0).
    ///
    /// Text longer than its field is kept as given here and truncated on
    /// [`encode`](Self::encode).
    pub fn new(
        key: i32,
        name: impl Into<String>,
        quantity: i32,
        unit_price: f32,
        date: impl Into<String>,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            quantity,
            unit_price,
            date: date.into(),
            right: SlotId::NIL,
            left: SlotId::NIL,
            height: 0,
        }
    }

    /// The record written over a deleted slot.
    pub fn tombstone() -> Self {
        Self {
            key: 0,
            name: String::new(),
            quantity: 0,
            unit_price: 0.0,
            date: String::new(),
            right: SlotId::NIL,
            left: SlotId::NIL,
            height: -1,
        }
    }

    /// Whether this slot held a record that has since been deleted.
    ///
    /// Live nodes always have height >= 0.
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.height < 0
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.left.is_valid() && !self.right.is_valid()
    }

    /// Copy the payload of `other` into `self`, keeping links and height.
    ///
    /// Used when a two-child node takes over its in-order successor's data.
    pub fn copy_payload_from(&mut self, other: &Record) {
        self.key = other.key;
        self.name.clone_from(&other.name);
        self.quantity = other.quantity;
        self.unit_price = other.unit_price;
        self.date.clone_from(&other.date);
    }

    /// Serialize into a fixed-size buffer.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        write_i32(&mut buf, Self::OFFSET_KEY, self.key);
        write_text(&mut buf[Self::OFFSET_NAME..Self::OFFSET_NAME + NAME_LEN], &self.name);
        write_i32(&mut buf, Self::OFFSET_QUANTITY, self.quantity);
        buf[Self::OFFSET_UNIT_PRICE..Self::OFFSET_UNIT_PRICE + 4]
            .copy_from_slice(&self.unit_price.to_le_bytes());
        write_text(&mut buf[Self::OFFSET_DATE..Self::OFFSET_DATE + DATE_LEN], &self.date);
        write_i32(&mut buf, Self::OFFSET_RIGHT, self.right.0);
        write_i32(&mut buf, Self::OFFSET_LEFT, self.left.0);
        write_i32(&mut buf, Self::OFFSET_HEIGHT, self.height);
        buf
    }

    /// Deserialize the bytes read from `slot`.
    ///
    /// # Errors
    /// Returns `Error::CorruptRecord` if `data` is not exactly
    /// [`RECORD_SIZE`] bytes, a text field is not UTF-8, or a link or
    /// height is below -1.
    pub fn decode(slot: SlotId, data: &[u8]) -> Result<Self> {
        if data.len() != RECORD_SIZE {
            return Err(Error::corrupt_record(
                slot.0,
                format!("expected {} bytes, got {}", RECORD_SIZE, data.len()),
            ));
        }

        let name = read_text(slot, &data[Self::OFFSET_NAME..Self::OFFSET_NAME + NAME_LEN], "name")?;
        let date = read_text(slot, &data[Self::OFFSET_DATE..Self::OFFSET_DATE + DATE_LEN], "date")?;

        let record = Self {
            key: read_i32(data, Self::OFFSET_KEY),
            name,
            quantity: read_i32(data, Self::OFFSET_QUANTITY),
            unit_price: f32::from_le_bytes([
                data[Self::OFFSET_UNIT_PRICE],
                data[Self::OFFSET_UNIT_PRICE + 1],
                data[Self::OFFSET_UNIT_PRICE + 2],
                data[Self::OFFSET_UNIT_PRICE + 3],
            ]),
            date,
            right: SlotId(read_i32(data, Self::OFFSET_RIGHT)),
            left: SlotId(read_i32(data, Self::OFFSET_LEFT)),
            height: read_i32(data, Self::OFFSET_HEIGHT),
        };

        if record.left.0 < -1 || record.right.0 < -1 {
            return Err(Error::corrupt_record(slot.0, "child link below -1"));
        }
        if record.height < -1 {
            return Err(Error::corrupt_record(slot.0, "height below -1"));
        }
        Ok(record)
    }
}

fn write_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn read_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Copy as much of `text` as fits into `field`, never splitting a char.
/// The remainder of `field` stays zeroed.
fn write_text(field: &mut [u8], text: &str) {
    let mut end = text.len().min(field.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
}

fn read_text(slot: SlotId, field: &[u8], what: &str) -> Result<String> {
    let end = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    std::str::from_utf8(&field[..end])
        .map(str::to_owned)
        .map_err(|_| Error::corrupt_record(slot.0, format!("{} is not valid UTF-8", what)))
}

// ============================================================================
// TESTS
// ============================================================================
