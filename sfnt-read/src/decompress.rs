//! Access to table bytes, decompressing where needed

use std::borrow::Cow;

use crate::{table_directory::TableEntry, FontData, ReadError};

/// The bytes backing one table.
///
/// For stored tables this borrows the whole file and `offset` is the table's
/// position in it. Decompressed tables own their bytes and start at `offset` 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBytes<'a> {
    pub data: Cow<'a, [u8]>,
    pub offset: usize,
}

impl<'a> TableBytes<'a> {
    /// The data to hand to a table parser, alongside [`TableBytes::offset`].
    pub fn font_data(&self) -> FontData<'_> {
        FontData::new(&self.data)
    }

    /// Just the bytes of the table itself.
    pub fn table_slice(&self, length: usize) -> Result<&[u8], ReadError> {
        let end = self
            .offset
            .checked_add(length)
            .ok_or(ReadError::TruncatedData)?;
        self.data.get(self.offset..end).ok_or(ReadError::TruncatedData)
    }

    /// Consume these bytes, keeping only the table itself.
    pub fn into_table(self, length: usize) -> Result<Cow<'a, [u8]>, ReadError> {
        let end = self
            .offset
            .checked_add(length)
            .ok_or(ReadError::TruncatedData)?;
        match self.data {
            Cow::Borrowed(bytes) => bytes
                .get(self.offset..end)
                .map(Cow::Borrowed)
                .ok_or(ReadError::TruncatedData),
            Cow::Owned(mut bytes) => {
                if end > bytes.len() {
                    return Err(ReadError::TruncatedData);
                }
                bytes.truncate(end);
                bytes.drain(..self.offset);
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

/// A service that decompresses tables stored compressed in a font file.
pub trait TableDecompressor {
    /// Decompress the table described by `entry`.
    ///
    /// Only called for entries whose `compression` flag is set.
    fn uncompress_table<'a>(
        &self,
        data: FontData<'a>,
        entry: &TableEntry,
    ) -> Result<TableBytes<'a>, ReadError>;
}

/// Resolve the bytes of a table, delegating to `decompressor` when the table is
/// stored compressed.
pub fn uncompress_table<'a>(
    data: FontData<'a>,
    entry: &TableEntry,
    decompressor: &dyn TableDecompressor,
) -> Result<TableBytes<'a>, ReadError> {
    if entry.compression {
        decompressor.uncompress_table(data, entry)
    } else {
        Ok(TableBytes {
            data: Cow::Borrowed(data.as_bytes()),
            offset: entry.offset as usize,
        })
    }
}

/// A decompressor that refuses every table.
///
/// Used when no decompression backend is compiled in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecompressor;

impl TableDecompressor for NoDecompressor {
    fn uncompress_table<'a>(
        &self,
        _data: FontData<'a>,
        entry: &TableEntry,
    ) -> Result<TableBytes<'a>, ReadError> {
        Err(ReadError::Decompression(entry.tag))
    }
}

/// The zlib decompressor used by WOFF 1.0.
#[cfg(feature = "woff")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ZlibDecompressor;

#[cfg(feature = "woff")]
impl TableDecompressor for ZlibDecompressor {
    fn uncompress_table<'a>(
        &self,
        data: FontData<'a>,
        entry: &TableEntry,
    ) -> Result<TableBytes<'a>, ReadError> {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let compressed = data.read_bytes(entry.stored_range())?;
        let expected_len = entry.length as usize;
        // one byte of slack so that overlong output is detected without
        // inflating an unbounded amount
        let mut decoder = ZlibDecoder::new(compressed).take(entry.length as u64 + 1);
        let mut buffer = Vec::new();
        decoder
            .read_to_end(&mut buffer)
            .map_err(|_| ReadError::Decompression(entry.tag))?;
        if buffer.len() != expected_len {
            log::debug!(
                "{} decompressed to {} bytes, expected {expected_len}",
                entry.tag,
                buffer.len()
            );
            return Err(ReadError::Decompression(entry.tag));
        }
        Ok(TableBytes {
            data: Cow::Owned(buffer),
            offset: 0,
        })
    }
}

/// The decompressor used when none is supplied.
pub fn default_decompressor() -> &'static dyn TableDecompressor {
    #[cfg(feature = "woff")]
    {
        static DEFAULT: ZlibDecompressor = ZlibDecompressor;
        &DEFAULT
    }
    #[cfg(not(feature = "woff"))]
    {
        static DEFAULT: NoDecompressor = NoDecompressor;
        &DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Tag;

    fn entry(compression: bool, offset: u32, length: u32, compressed_length: u32) -> TableEntry {
        TableEntry {
            tag: Tag::new(b"test"),
            checksum: 0,
            offset,
            length,
            compression,
            compressed_length,
        }
    }

    #[test]
    fn stored_tables_pass_through() {
        let bytes = [0u8, 1, 2, 3, 4, 5];
        let data = FontData::new(&bytes);
        let table = uncompress_table(data, &entry(false, 2, 3, 3), &NoDecompressor).unwrap();
        assert!(matches!(table.data, Cow::Borrowed(_)));
        assert_eq!(table.offset, 2);
        assert_eq!(table.table_slice(3).unwrap(), &[2, 3, 4]);
        assert_eq!(table.clone().into_table(3).unwrap().as_ref(), &[2, 3, 4]);
        assert_eq!(table.into_table(5), Err(ReadError::TruncatedData));
    }

    #[test]
    fn stored_tables_borrow_the_file() {
        let bytes = [9u8, 8, 7, 6];
        let table = {
            let data = FontData::new(&bytes);
            let stored = uncompress_table(data, &entry(false, 1, 2, 2), &NoDecompressor).unwrap();
            stored.into_table(2).unwrap()
        };
        match table {
            Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, &bytes[1..3])),
            Cow::Owned(_) => panic!("stored table was copied"),
        }
    }

    #[test]
    fn missing_backend_fails() {
        let bytes = [0u8; 8];
        let data = FontData::new(&bytes);
        assert_eq!(
            uncompress_table(data, &entry(true, 0, 16, 8), &NoDecompressor),
            Err(ReadError::Decompression(Tag::new(b"test")))
        );
    }

    #[cfg(feature = "woff")]
    fn zlib(bytes: &[u8]) -> Vec<u8> {
        use flate2::{write::ZlibEncoder, Compression};
        use std::io::Write;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[cfg(feature = "woff")]
    #[test]
    fn inflates_zlib_tables() {
        let original = [7u8; 64];
        let mut file = vec![0xAA; 4];
        let compressed = zlib(&original);
        file.extend_from_slice(&compressed);
        let data = FontData::new(&file);
        let entry = entry(true, 4, 64, compressed.len() as u32);
        let table = uncompress_table(data, &entry, &ZlibDecompressor).unwrap();
        assert_eq!(table.offset, 0);
        assert_eq!(table.table_slice(64).unwrap(), &original);
    }

    #[cfg(feature = "woff")]
    #[test]
    fn length_mismatch_is_an_error() {
        let compressed = zlib(&[1u8; 32]);
        let data = FontData::new(&compressed);
        for length in [31, 33] {
            let entry = entry(true, 0, length, compressed.len() as u32);
            assert_eq!(
                uncompress_table(data, &entry, &ZlibDecompressor),
                Err(ReadError::Decompression(Tag::new(b"test")))
            );
        }
    }
}
