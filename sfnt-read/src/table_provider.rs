//! a trait for things that can serve font tables

use std::borrow::Cow;

use types::Tag;

use crate::{
    tables::{
        fvar::{self, VariationTable},
        head::{self, Head},
        ltag::{self, Ltag},
        name::{self, NameTable},
        os2::{self, Os2},
        post::{self, Post},
    },
    FontData, ReadError,
};

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    /// The bytes of the table with this tag, decompressed if necessary.
    ///
    /// Returns `None` if the font has no such table.
    fn table_data(&self, tag: Tag) -> Option<Result<Cow<'a, [u8]>, ReadError>>;

    fn expect_table_data(&self, tag: Tag) -> Result<Cow<'a, [u8]>, ReadError> {
        self.table_data(tag)
            .unwrap_or(Err(ReadError::TableIsMissing(tag)))
    }

    fn head(&self) -> Result<Head, ReadError> {
        let data = self.expect_table_data(head::TAG)?;
        head::parse_head_table(FontData::new(&data), 0)
    }

    fn ltag(&self) -> Result<Ltag, ReadError> {
        let data = self.expect_table_data(ltag::TAG)?;
        ltag::parse_ltag_table(FontData::new(&data), 0)
    }

    /// The decoded `name` table, using the `ltag` table if the font has one.
    fn name(&self) -> Result<NameTable, ReadError> {
        let ltag = match self.table_data(ltag::TAG) {
            Some(data) => Some(ltag::parse_ltag_table(FontData::new(&data?), 0)?),
            None => None,
        };
        let data = self.expect_table_data(name::TAG)?;
        name::parse_name_table(FontData::new(&data), 0, ltag.as_ref())
    }

    /// The `fvar` table, with names resolved against the `name` table.
    ///
    /// A font without a `name` table still parses; its names are empty.
    fn fvar(&self) -> Result<VariationTable, ReadError> {
        let names = match self.name() {
            Err(ReadError::TableIsMissing(_)) => NameTable::new(),
            names => names?,
        };
        let data = self.expect_table_data(fvar::TAG)?;
        fvar::parse_fvar_table(FontData::new(&data), 0, &names)
    }

    fn os2(&self) -> Result<Os2, ReadError> {
        let data = self.expect_table_data(os2::TAG)?;
        os2::parse_os2_table(FontData::new(&data), 0)
    }

    fn post(&self) -> Result<Post, ReadError> {
        let data = self.expect_table_data(post::TAG)?;
        post::parse_post_table(FontData::new(&data), 0)
    }
}
