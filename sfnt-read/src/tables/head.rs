//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{Fixed, LongDateTime, Tag};

use crate::{FontData, ReadError};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

pub const VERSION: u32 = 0x0001_0000;

/// The value of the `magicNumber` field.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The offset of the `checksumAdjustment` field from the start of the table.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// The size of the table, in bytes.
pub const TABLE_LEN: usize = 54;

/// The font header table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Head {
    pub font_revision: Fixed,
    pub checksum_adjustment: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl Default for Head {
    fn default() -> Self {
        Head {
            font_revision: Fixed::ONE,
            checksum_adjustment: 0,
            flags: 0,
            units_per_em: 1000,
            created: LongDateTime::default(),
            modified: LongDateTime::default(),
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            mac_style: 0,
            lowest_rec_ppem: 3,
            font_direction_hint: 2,
            index_to_loc_format: 0,
            glyph_data_format: 0,
        }
    }
}

/// Parse a `head` table beginning at `start`.
pub fn parse_head_table(data: FontData, start: usize) -> Result<Head, ReadError> {
    data.check_range(start, TABLE_LEN)?;
    let mut cursor = data.cursor_at(start);
    let version: u32 = cursor.read()?;
    if version != VERSION {
        return Err(ReadError::UnsupportedVersion { tag: TAG, version });
    }
    let font_revision = cursor.read()?;
    let checksum_adjustment = cursor.read()?;
    let magic_number: u32 = cursor.read()?;
    if magic_number != MAGIC_NUMBER {
        return Err(ReadError::MalformedData("head magic number is incorrect"));
    }
    Ok(Head {
        font_revision,
        checksum_adjustment,
        flags: cursor.read()?,
        units_per_em: cursor.read()?,
        created: cursor.read()?,
        modified: cursor.read()?,
        x_min: cursor.read()?,
        y_min: cursor.read()?,
        x_max: cursor.read()?,
        y_max: cursor.read()?,
        mac_style: cursor.read()?,
        lowest_rec_ppem: cursor.read()?,
        font_direction_hint: cursor.read()?,
        index_to_loc_format: cursor.read()?,
        glyph_data_format: cursor.read()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn head_bytes(magic: u32) -> BeBuffer {
        BeBuffer::new()
            .push(VERSION)
            .push(Fixed::from_f64(2.5))
            .push(0xDEADBEEFu32)
            .push(magic)
            .push(0b11u16)
            .push(2048u16)
            .push(LongDateTime::new(3_600_000_000))
            .push(LongDateTime::new(3_700_000_000))
            .extend([-100i16, -250, 1200, 900])
            .extend([1u16, 8])
            .extend([2i16, 1, 0])
    }

    #[test]
    fn parse() {
        let buf = head_bytes(MAGIC_NUMBER);
        assert_eq!(buf.len(), TABLE_LEN);
        let head = parse_head_table(buf.font_data(), 0).unwrap();
        assert_eq!(head.font_revision, Fixed::from_f64(2.5));
        assert_eq!(head.checksum_adjustment, 0xDEADBEEF);
        assert_eq!(head.units_per_em, 2048);
        assert_eq!(head.modified.as_secs(), 3_700_000_000);
        assert_eq!((head.x_min, head.y_max), (-100, 900));
        assert_eq!(head.index_to_loc_format, 1);
    }

    #[test]
    fn bad_magic() {
        let buf = head_bytes(0x5F0F3CF4);
        assert!(matches!(
            parse_head_table(buf.font_data(), 0),
            Err(ReadError::MalformedData(_))
        ));
    }
}
