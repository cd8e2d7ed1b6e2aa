//! Reading sfnt font files
//!
//! This crate reads the table directory of sfnt (TrueType and OpenType) and
//! WOFF 1.0 files, and parses a handful of tables into owned models: `name`
//! (with `ltag`), `fvar`, `head`, `OS/2` and `post`. Every read is bounds
//! checked; malformed input produces a [`ReadError`] rather than a panic.
//!
//! The tables parsed here are the ones needed to describe the variation axes
//! and named instances of a font, along with their display names. For writing
//! tables, see the `sfnt-write` crate.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use sfnt_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let fvar = font.fvar().expect("missing 'fvar' table");
//! for axis in &fvar.axes {
//!     println!("{} {:?}", axis.tag, axis.name.get("en"));
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod decompress;
mod font_data;
mod read;
pub mod table_directory;
mod table_provider;
pub mod tables;

#[cfg(test)]
mod test_helpers;

use std::borrow::Cow;

pub use decompress::{TableBytes, TableDecompressor};
pub use font_data::{Cursor, FontData};
pub use read::ReadError;
pub use table_directory::{
    compute_checksum, get_font_file_data, Flavor, FontFileData, OutlinesFormat, TableEntry,
};
pub use table_provider::TableProvider;

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;

use types::Tag;

/// Reference to an in-memory font.
///
/// This is a read-only font; its tables are decoded on request through
/// the [`TableProvider`] trait.
#[derive(Clone)]
pub struct FontRef<'a> {
    file: FontFileData<'a>,
    decompressor: &'a dyn TableDecompressor,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// Compressed WOFF tables are inflated with the default decompressor,
    /// which needs the `woff` feature.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::with_decompressor(data, decompress::default_decompressor())
    }

    /// Creates a font that decompresses tables with `decompressor`.
    pub fn with_decompressor(
        data: &'a [u8],
        decompressor: &'a dyn TableDecompressor,
    ) -> Result<Self, ReadError> {
        Ok(FontRef {
            file: get_font_file_data(data)?,
            decompressor,
        })
    }

    /// The table directory, in file order.
    pub fn table_entries(&self) -> &[TableEntry] {
        &self.file.table_entries
    }

    pub fn outlines_format(&self) -> OutlinesFormat {
        self.file.outlines_format
    }

    pub fn flavor(&self) -> Flavor {
        self.file.flavor
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn table_data(&self, tag: Tag) -> Option<Result<Cow<'a, [u8]>, ReadError>> {
        let entry = self.file.entry(tag)?;
        Some(
            decompress::uncompress_table(self.file.data, entry, self.decompressor)
                .and_then(|bytes| bytes.into_table(entry.length as usize)),
        )
    }
}

impl std::fmt::Debug for FontRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRef")
            .field("table_entries", &self.file.table_entries)
            .field("outlines_format", &self.file.outlines_format)
            .field("flavor", &self.file.flavor)
            .finish_non_exhaustive()
    }
}
