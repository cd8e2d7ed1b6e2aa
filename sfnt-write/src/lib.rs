//! Writing sfnt font files
//!
//! Tables are built as a [`FieldList`]: an ordered list of named, typed
//! fields whose encoding is simply each field in turn. The `make_*_table`
//! functions in [`tables`] build field lists from the models in the
//! `sfnt-read` crate, and [`FontBuilder`] assembles encoded tables into a
//! font file with a table directory and checksums.
//!
//! # Example
//!
//! ```
//! use sfnt_write::{
//!     read::tables::name::{NameId, NameTable, Platform},
//!     tables::name::make_name_table,
//!     FontBuilder,
//! };
//!
//! let mut names = NameTable::new();
//! names.insert(Platform::Windows, NameId::FAMILY_NAME, "en", "Example Sans");
//! let name = make_name_table(&names).unwrap();
//! let font_bytes = FontBuilder::new().add_table(&name).unwrap().build();
//! assert_eq!(&font_bytes[..4], &[0, 1, 0, 0]);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod field_list;
mod font_builder;
pub mod tables;
pub mod util;
pub mod validate;
mod write;

#[cfg(test)]
#[path = "tests/font.rs"]
mod font_tests;

pub use field_list::{Field, FieldList};
pub use font_builder::{BuilderError, FontBuilder};
pub use write::{dump_table, FontWrite, TableWriter};

/// Public re-export of the sfnt-read crate.
pub extern crate sfnt_read as read;

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;
