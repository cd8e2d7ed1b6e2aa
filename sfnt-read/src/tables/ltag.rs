//! The [language tag](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6ltag.html) table.

use types::Tag;

use crate::{FontData, ReadError};

/// 'ltag'
pub const TAG: Tag = Tag::new(b"ltag");

/// The language tags of a font, indexed by their position in the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ltag {
    // tags that are not valid utf-8 keep their slot so later indices stay put
    tags: Vec<Option<String>>,
}

impl Ltag {
    /// Create a table from a list of tags.
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        Ltag {
            tags: tags.into_iter().map(Some).collect(),
        }
    }

    /// The tag at `index`, if present and readable.
    pub fn get(&self, index: u32) -> Option<&str> {
        self.tags.get(index as usize)?.as_deref()
    }

    /// Returns an iterator yielding the index and string value of each
    /// tag in the table.
    pub fn tag_indices(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tags
            .iter()
            .enumerate()
            .filter_map(|(index, tag)| Some((index as u32, tag.as_deref()?)))
    }

    /// Returns the index of the given language tag.
    pub fn index_for_tag(&self, tag: &str) -> Option<u32> {
        self.tag_indices().find(|x| x.1 == tag).map(|x| x.0)
    }
}

/// Parse an `ltag` table beginning at `start`.
pub fn parse_ltag_table(data: FontData, start: usize) -> Result<Ltag, ReadError> {
    let mut cursor = data.cursor_at(start);
    let version: u32 = cursor.read()?;
    if version != 1 {
        return Err(ReadError::UnsupportedVersion { tag: TAG, version });
    }
    cursor.skip::<u32>(1); // flags
    let num_tags: u32 = cursor.read()?;
    let records_len = (num_tags as usize)
        .checked_mul(4)
        .ok_or(ReadError::TruncatedData)?;
    data.check_range(cursor.position(), records_len)?;

    let mut tags = Vec::with_capacity(num_tags as usize);
    for _ in 0..num_tags {
        let offset: u16 = cursor.read()?;
        let length: u16 = cursor.read()?;
        // These are u16 so can't overflow even in 32-bit
        let range_start = start + offset as usize;
        let bytes = data.read_bytes(range_start..range_start + length as usize)?;
        let tag = std::str::from_utf8(bytes).ok().map(str::to_owned);
        if tag.is_none() {
            log::debug!("skipping ltag entry at offset {offset} that is not utf-8");
        }
        tags.push(tag);
    }
    Ok(Ltag { tags })
}
