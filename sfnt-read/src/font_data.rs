//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use types::{FieldType, FieldValue, Fixed, FixedSize, LongDateTime, Offset16, Scalar, Tag};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Every read is bounds checked; a read
/// that would run past the end of the slice fails with
/// [`ReadError::TruncatedData`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for reading fields sequentially.
///
/// The cursor starts at some absolute position in a [`FontData`] (usually the
/// start of a table or record) and tracks how far it has moved from there, so
/// that callers can compare the bytes consumed against a declared record size.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    start: usize,
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of this data in the data it was sliced from.
    pub fn total_pos(&self) -> u32 {
        self.total_pos
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };

        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    /// Read a scalar at `offset`.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::TruncatedData)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::TruncatedData)
    }

    /// Return the bytes in `range`, if they are all in bounds.
    pub fn read_bytes(&self, range: Range<usize>) -> Result<&'a [u8], ReadError> {
        self.bytes.get(range).ok_or(ReadError::TruncatedData)
    }

    /// Ensure that `len` bytes are available starting at `offset`.
    pub fn check_range(&self, offset: usize, len: usize) -> Result<(), ReadError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(()),
            _ => Err(ReadError::TruncatedData),
        }
    }

    /// A cursor positioned at the start of this data.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor_at(0)
    }

    /// A cursor positioned at `pos`.
    ///
    /// The cursor's relative offset is measured from `pos`.
    pub fn cursor_at(&self, pos: usize) -> Cursor<'a> {
        Cursor {
            start: pos,
            pos,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    /// Read one field of the given kind.
    pub fn read_field(&mut self, field_type: FieldType) -> Result<FieldValue, ReadError> {
        Ok(match field_type {
            FieldType::Byte => FieldValue::Byte(self.read()?),
            FieldType::Char => FieldValue::Char(self.read()?),
            FieldType::UShort => FieldValue::UShort(self.read()?),
            FieldType::Short => FieldValue::Short(self.read()?),
            FieldType::ULong => FieldValue::ULong(self.read()?),
            FieldType::Long => FieldValue::Long(self.read()?),
            FieldType::Fixed => FieldValue::Fixed(self.read::<Fixed>()?),
            FieldType::Tag => FieldValue::Tag(self.read::<Tag>()?),
            FieldType::Offset16 => FieldValue::Offset16(self.read::<Offset16>()?),
            FieldType::LongDateTime => FieldValue::LongDateTime(self.read::<LongDateTime>()?),
        })
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let end = self.pos.checked_add(len).ok_or(ReadError::TruncatedData)?;
        let temp = self.data.read_bytes(self.pos..end);
        self.pos = end;
        temp
    }

    /// Skip over `n` items of type `T`.
    pub fn skip<T: FixedSize>(&mut self, n: usize) {
        self.advance_by(n.saturating_mul(T::RAW_BYTE_LEN));
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// The number of bytes consumed since the cursor was created.
    pub fn relative_offset(&self) -> usize {
        self.pos - self.start
    }

    /// The absolute position of the cursor in the underlying data.
    pub fn position(&self) -> usize {
        self.pos
    }

    // used when handling fields with an implicit length, which must be at the
    // end of a table.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}
