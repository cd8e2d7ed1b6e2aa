//! The [table directory] of sfnt and WOFF 1.0 files
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use types::{Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TT_SFNT_VERSION, WOFF_SIGNATURE};

use crate::{FontData, ReadError};

const SFNT_HEADER_LEN: usize = 12;
const SFNT_RECORD_LEN: usize = 16;
const WOFF_HEADER_LEN: usize = 44;
const WOFF_RECORD_LEN: usize = 20;

/// The location of one table in a font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableEntry {
    pub tag: Tag,
    pub checksum: u32,
    /// Offset of the (possibly compressed) table data from the start of the file.
    pub offset: u32,
    /// Length of the table once decompressed.
    pub length: u32,
    /// `true` if the stored bytes must be decompressed before use.
    pub compression: bool,
    /// Length of the table as stored in the file.
    ///
    /// Equal to `length` for uncompressed tables.
    pub compressed_length: u32,
}

impl TableEntry {
    /// The byte range of the stored table data in the file.
    pub fn stored_range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start.saturating_add(self.compressed_length as usize)
    }
}

/// The kind of glyph outlines stored in a font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutlinesFormat {
    /// `glyf` outlines; sfnt version `0x00010000` or `true`.
    #[default]
    TrueType,
    /// `CFF ` outlines; sfnt version `OTTO`.
    Cff,
}

impl OutlinesFormat {
    fn from_sfnt_version(version: u32) -> Option<Self> {
        match version {
            TT_SFNT_VERSION | TRUE_SFNT_VERSION => Some(OutlinesFormat::TrueType),
            CFF_SFNT_VERSION => Some(OutlinesFormat::Cff),
            _ => None,
        }
    }

    /// The sfnt version written for fonts with this outline format.
    pub fn sfnt_version(self) -> u32 {
        match self {
            OutlinesFormat::TrueType => TT_SFNT_VERSION,
            OutlinesFormat::Cff => CFF_SFNT_VERSION,
        }
    }
}

/// The container a font was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flavor {
    Sfnt,
    Woff,
}

/// A font file whose table directory has been read and validated.
#[derive(Clone, Debug)]
pub struct FontFileData<'a> {
    pub data: FontData<'a>,
    /// The directory entries, in the order they appear in the file.
    pub table_entries: Vec<TableEntry>,
    pub outlines_format: OutlinesFormat,
    pub flavor: Flavor,
}

impl FontFileData<'_> {
    /// The entry for the table with this tag, if any.
    pub fn entry(&self, tag: Tag) -> Option<&TableEntry> {
        self.table_entries.iter().find(|entry| entry.tag == tag)
    }
}

/// Read the header and table directory of a font file.
///
/// Every directory entry is checked to lie within the file, so callers can
/// slice table data without further bounds checks on the directory itself.
pub fn get_font_file_data(bytes: &[u8]) -> Result<FontFileData<'_>, ReadError> {
    let data = FontData::new(bytes);
    let signature: u32 = data.read_at(0)?;
    let (flavor, outlines_format, table_entries) = if signature == WOFF_SIGNATURE {
        let sfnt_flavor: u32 = data.read_at(4)?;
        let outlines_format = OutlinesFormat::from_sfnt_version(sfnt_flavor)
            .ok_or(ReadError::UnsupportedFormat(sfnt_flavor))?;
        (Flavor::Woff, outlines_format, read_woff_entries(data)?)
    } else {
        let outlines_format = OutlinesFormat::from_sfnt_version(signature)
            .ok_or(ReadError::UnsupportedFormat(signature))?;
        (Flavor::Sfnt, outlines_format, read_sfnt_entries(data)?)
    };

    for entry in &table_entries {
        let range = entry.stored_range();
        data.check_range(range.start, range.len())?;
    }

    Ok(FontFileData {
        data,
        table_entries,
        outlines_format,
        flavor,
    })
}

fn read_sfnt_entries(data: FontData) -> Result<Vec<TableEntry>, ReadError> {
    let num_tables: u16 = data.read_at(4)?;
    let num_tables = num_tables as usize;
    data.check_range(SFNT_HEADER_LEN, num_tables * SFNT_RECORD_LEN)?;

    let mut cursor = data.cursor_at(SFNT_HEADER_LEN);
    let mut entries = Vec::with_capacity(num_tables);
    for _ in 0..num_tables {
        let tag = cursor.read()?;
        let checksum = cursor.read()?;
        let offset = cursor.read()?;
        let length = cursor.read()?;
        entries.push(TableEntry {
            tag,
            checksum,
            offset,
            length,
            compression: false,
            compressed_length: length,
        });
    }
    Ok(entries)
}

fn read_woff_entries(data: FontData) -> Result<Vec<TableEntry>, ReadError> {
    let num_tables: u16 = data.read_at(12)?;
    let num_tables = num_tables as usize;
    data.check_range(WOFF_HEADER_LEN, num_tables * WOFF_RECORD_LEN)?;

    let mut cursor = data.cursor_at(WOFF_HEADER_LEN);
    let mut entries = Vec::with_capacity(num_tables);
    for _ in 0..num_tables {
        let tag = cursor.read()?;
        let offset = cursor.read()?;
        let compressed_length: u32 = cursor.read()?;
        let length: u32 = cursor.read()?;
        let checksum = cursor.read()?;
        if compressed_length > length {
            return Err(ReadError::MalformedData(
                "WOFF table stored larger than its original length",
            ));
        }
        entries.push(TableEntry {
            tag,
            checksum,
            offset,
            length,
            compression: compressed_length < length,
            compressed_length,
        });
    }
    Ok(entries)
}

/// Compute the checksum of a table, as stored in the table directory.
///
/// This is the wrapping sum of the table read as big-endian `u32`s, with the
/// final word zero-padded.
pub fn compute_checksum(table: &[u8]) -> u32 {
    let mut chunks = table.chunks_exact(4);
    let mut sum = chunks.by_ref().fold(0u32, |sum, chunk| {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        sum.wrapping_add(word)
    });
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut last = [0u8; 4];
        last[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;

    fn sfnt_with_tables(version: u32, tables: &[(&[u8; 4], &[u8])]) -> BeBuffer {
        let mut buf = BeBuffer::new()
            .push(version)
            .push(tables.len() as u16)
            .extend([0u16; 3]);
        let mut offset = SFNT_HEADER_LEN + tables.len() * SFNT_RECORD_LEN;
        for (tag, bytes) in tables {
            buf = buf
                .push(Tag::new(tag))
                .push(compute_checksum(bytes))
                .push(offset as u32)
                .push(bytes.len() as u32);
            offset += bytes.len();
        }
        for (_, bytes) in tables {
            buf = buf.extend_bytes(bytes);
        }
        buf
    }

    #[test]
    fn reads_entries_in_directory_order() {
        let buf = sfnt_with_tables(TT_SFNT_VERSION, &[(b"name", &[1, 2]), (b"fvar", &[3, 4, 5])]);
        let font = get_font_file_data(&buf).unwrap();
        assert_eq!(font.flavor, Flavor::Sfnt);
        assert_eq!(font.outlines_format, OutlinesFormat::TrueType);
        let tags = font
            .table_entries
            .iter()
            .map(|entry| entry.tag)
            .collect::<Vec<_>>();
        assert_eq!(tags, [Tag::new(b"name"), Tag::new(b"fvar")]);
        let fvar = font.entry(Tag::new(b"fvar")).unwrap();
        assert_eq!(fvar.offset, 44 + 2);
        assert_eq!(fvar.length, 3);
        assert!(!fvar.compression);
        assert_eq!(fvar.compressed_length, 3);
    }

    #[test]
    fn outline_formats() {
        let otto = sfnt_with_tables(CFF_SFNT_VERSION, &[]);
        assert_eq!(
            get_font_file_data(&otto).unwrap().outlines_format,
            OutlinesFormat::Cff
        );
        let apple = sfnt_with_tables(TRUE_SFNT_VERSION, &[]);
        assert_eq!(
            get_font_file_data(&apple).unwrap().outlines_format,
            OutlinesFormat::TrueType
        );
    }

    #[test]
    fn bad_signature() {
        for signature in [0x774F4632u32, 0x74746366, 0xDEADBEEF] {
            let buf = sfnt_with_tables(signature, &[]);
            assert_eq!(
                get_font_file_data(&buf).unwrap_err(),
                ReadError::UnsupportedFormat(signature)
            );
        }
    }

    #[test]
    fn entry_past_end_of_file() {
        let buf = BeBuffer::new()
            .push(TT_SFNT_VERSION)
            .push(1u16)
            .extend([0u16; 3])
            .push(Tag::new(b"fvar"))
            .push(0u32)
            .push(28u32)
            .push(10u32)
            .extend([0u8; 4]);
        assert_eq!(
            get_font_file_data(&buf).unwrap_err(),
            ReadError::TruncatedData
        );
    }

    #[test]
    fn table_count_exceeds_data() {
        let buf = BeBuffer::new()
            .push(TT_SFNT_VERSION)
            .push(0xFFFFu16)
            .extend([0u16; 3]);
        assert_eq!(
            get_font_file_data(&buf).unwrap_err(),
            ReadError::TruncatedData
        );
    }

    #[test]
    fn woff_entries() {
        let buf = BeBuffer::new()
            .push(WOFF_SIGNATURE)
            .push(CFF_SFNT_VERSION)
            .push(0u32) // length
            .push(2u16)
            .push(0u16)
            .extend([0u32; 1])
            .extend([0u16; 2])
            .extend([0u32; 5])
            // compressed
            .push(Tag::new(b"name"))
            .push(84u32)
            .push(4u32)
            .push(12u32)
            .push(0xAAAAu32)
            // stored
            .push(Tag::new(b"fvar"))
            .push(88u32)
            .push(4u32)
            .push(4u32)
            .push(0xBBBBu32)
            .extend([0u8; 8]);
        let font = get_font_file_data(&buf).unwrap();
        assert_eq!(font.flavor, Flavor::Woff);
        assert_eq!(font.outlines_format, OutlinesFormat::Cff);
        let name = font.table_entries[0];
        assert!(name.compression);
        assert_eq!((name.length, name.compressed_length), (12, 4));
        assert_eq!(name.checksum, 0xAAAA);
        let fvar = font.table_entries[1];
        assert!(!fvar.compression);
        assert_eq!(fvar.stored_range(), 88..92);
    }

    #[test]
    fn checksum_pads_final_word() {
        assert_eq!(compute_checksum(&[]), 0);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0xFF]), 0xFF00_0001);
        assert_eq!(
            compute_checksum(&[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 2]),
            1,
            "sum wraps"
        );
    }
}
