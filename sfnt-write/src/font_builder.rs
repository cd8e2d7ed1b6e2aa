//!  A builder for top-level font objects

use std::collections::BTreeMap;
use std::{borrow::Cow, fmt::Display};

use read::{
    compute_checksum,
    tables::head::{self, CHECKSUM_ADJUSTMENT_OFFSET},
    FontRef, OutlinesFormat, TableProvider,
};
use types::Tag;

use crate::{
    field_list::FieldList,
    util::{round4, SearchRange},
    validate::ValidationReport,
    write::{FontWrite, TableWriter},
};

const HEADER_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// The whole-font checksum plus `checkSumAdjustment` equals this.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

/// Build a font from some set of tables.
///
/// Tables are written in tag order, each padded to four bytes.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder<'a> {
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
    outlines_format: OutlinesFormat,
}

/// An error returned when attempting to add a table to the builder.
///
/// This wraps a validation error, adding the tag of the table where it was
/// encountered.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BuilderError {
    /// The tag of the table where the error occurred
    pub tag: Tag,
    /// The underlying error
    pub inner: ValidationReport,
}

struct TableRecord {
    tag: Tag,
    checksum: u32,
    offset: u32,
    length: u32,
}

struct TableDirectory {
    sfnt_version: u32,
    search: SearchRange,
    records: Vec<TableRecord>,
}

impl FontWrite for TableRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.tag.write_into(writer);
        self.checksum.write_into(writer);
        self.offset.write_into(writer);
        self.length.write_into(writer);
    }
}

impl FontWrite for TableDirectory {
    fn write_into(&self, writer: &mut TableWriter) {
        self.sfnt_version.write_into(writer);
        (self.records.len() as u16).write_into(writer);
        self.search.search_range.write_into(writer);
        self.search.entry_selector.write_into(writer);
        self.search.range_shift.write_into(writer);
        self.records.write_into(writer);
    }
}

impl<'a> FontBuilder<'a> {
    /// Create a new builder to compile a binary font
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the builder.
    ///
    /// The table is validated and encoded; on failure nothing is added.
    pub fn add_table(&mut self, table: &FieldList) -> Result<&mut Self, BuilderError> {
        let tag = table.tag();
        let bytes = crate::dump_table(table).map_err(|inner| BuilderError { tag, inner })?;
        Ok(self.add_raw(tag, bytes))
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Copy each table from the source font if it does not already exist
    pub fn copy_missing_tables(&mut self, font: &FontRef<'a>) -> &mut Self {
        for entry in font.table_entries() {
            let tag = entry.tag;
            if self.tables.contains_key(&tag) {
                continue;
            }
            match font.table_data(tag) {
                Some(Ok(data)) => {
                    self.add_raw(tag, data);
                }
                Some(Err(e)) => log::warn!("not copying '{tag}': {e}"),
                None => (),
            }
        }
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Set the outline format, which determines the sfnt version written.
    pub fn set_outlines_format(&mut self, format: OutlinesFormat) -> &mut Self {
        self.outlines_format = format;
        self
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// Table checksums are computed with the `head` table's
    /// `checkSumAdjustment` zeroed, and the adjustment is then set so that
    /// the whole file sums to `0xB1B0AFBA`.
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&mut self) -> Vec<u8> {
        assert!(self.tables.len() <= u16::MAX as usize);
        if let Some(head) = self.tables.get_mut(&head::TAG) {
            if let Some(adjustment) = head
                .to_mut()
                .get_mut(CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4)
            {
                adjustment.fill(0);
            } else {
                log::warn!("'head' is too short to hold checkSumAdjustment");
            }
        }

        let mut position = HEADER_LEN + self.tables.len() * TABLE_RECORD_LEN;
        let mut head_offset = None;
        let records = self
            .tables
            .iter()
            .map(|(tag, data)| {
                let offset = position;
                if *tag == head::TAG && data.len() >= CHECKSUM_ADJUSTMENT_OFFSET + 4 {
                    head_offset = Some(offset);
                }
                position += round4(data.len());
                TableRecord {
                    tag: *tag,
                    checksum: compute_checksum(data),
                    offset: offset as u32,
                    length: data.len() as u32,
                }
            })
            .collect::<Vec<_>>();

        let directory = TableDirectory {
            sfnt_version: self.outlines_format.sfnt_version(),
            search: SearchRange::compute(records.len(), TABLE_RECORD_LEN),
            records,
        };

        let mut writer = TableWriter::default();
        directory.write_into(&mut writer);
        for table in self.tables.values() {
            writer.write_slice(table);
            let padding = [0u8; 4];
            writer.write_slice(&padding[..round4(table.len()) - table.len()]);
        }
        let mut data = writer.into_data();

        if let Some(head_offset) = head_offset {
            let start = head_offset + CHECKSUM_ADJUSTMENT_OFFSET;
            let adjustment = CHECKSUM_MAGIC.wrapping_sub(compute_checksum(&data));
            log::debug!("checkSumAdjustment {adjustment:#010X}");
            data[start..start + 4].copy_from_slice(&adjustment.to_be_bytes());
        }
        data
    }
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to build '{}' table: '{}'", self.tag, self.inner)
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use read::Flavor;

    #[test]
    fn sets_binary_search_assists() {
        // Based on Roboto's num tables
        let data = b"doesn't matter".to_vec();
        let mut builder = FontBuilder::default();
        (0..0x16u32).for_each(|i| {
            builder.add_raw(Tag::from_be_bytes(i.to_ne_bytes()), &data);
        });
        let bytes = builder.build();
        assert_eq!(&bytes[4..12], &[0, 22, 1, 0, 0, 4, 0, 96]);
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.table_entries().len(), 22);
        assert_eq!(font.flavor(), Flavor::Sfnt);
    }

    #[test]
    fn survives_no_tables() {
        let bytes = FontBuilder::default().build();
        assert_eq!(bytes, [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn tables_are_sorted_and_padded() {
        let mut builder = FontBuilder::new();
        builder
            .add_raw(Tag::new(b"zzzz"), vec![1u8; 5])
            .add_raw(Tag::new(b"aaaa"), vec![2u8; 3])
            .set_outlines_format(OutlinesFormat::Cff);
        assert!(builder.contains(Tag::new(b"aaaa")));
        let bytes = builder.build();
        assert_eq!(&bytes[..4], b"OTTO");
        assert_eq!(bytes.len(), HEADER_LEN + 2 * TABLE_RECORD_LEN + 4 + 8);

        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.outlines_format(), OutlinesFormat::Cff);
        let entries = font.table_entries();
        assert_eq!(entries[0].tag, Tag::new(b"aaaa"));
        assert_eq!(entries[0].offset, 44);
        assert_eq!(entries[0].length, 3);
        assert_eq!(entries[1].offset, 48);
        assert_eq!(entries[1].checksum, compute_checksum(&[1u8; 5]));
        assert_eq!(
            font.table_data(Tag::new(b"zzzz")).unwrap().unwrap().as_ref(),
            &[1u8; 5]
        );
    }

    #[test]
    fn invalid_tables_are_not_added() {
        let mut table = FieldList::new(Tag::new(b"test"));
        table.push("a", 1u16).push("a", 2u16);
        let mut builder = FontBuilder::new();
        let err = builder.add_table(&table).unwrap_err();
        assert_eq!(err.tag, Tag::new(b"test"));
        assert!(err.to_string().starts_with("failed to build 'test' table"));
        assert!(!builder.contains(Tag::new(b"test")));
    }
}
