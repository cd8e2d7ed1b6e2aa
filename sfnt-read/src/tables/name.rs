//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table
//!
//! Names are decoded into a [`NameTable`]: for each platform, a map from name
//! id to the strings for that id keyed by locale. Resolving a name for display
//! merges the platforms, see [`NameTable::name_by_id`].

use std::collections::BTreeMap;

pub use types::NameId;
use types::Tag;

use super::language::{self, FIRST_LANG_TAG_ID, UNDETERMINED_LOCALE};
use super::ltag::Ltag;
use crate::{FontData, ReadError};

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

/// The strings for one name id, keyed by locale.
pub type LocalizedName = BTreeMap<String, String>;

/// A name table platform.
///
/// The declaration order is the precedence used when merging names from
/// several platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    Unicode,
    Macintosh,
    /// Platform 2, the deprecated ISO platform.
    Reserved,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Unicode,
        Platform::Macintosh,
        Platform::Reserved,
        Platform::Windows,
    ];

    pub fn new(platform_id: u16) -> Option<Self> {
        match platform_id {
            0 => Some(Platform::Unicode),
            1 => Some(Platform::Macintosh),
            2 => Some(Platform::Reserved),
            3 => Some(Platform::Windows),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Platform::Unicode => 0,
            Platform::Macintosh => 1,
            Platform::Reserved => 2,
            Platform::Windows => 3,
        }
    }
}

/// Decoded name strings, grouped by platform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameTable {
    platforms: BTreeMap<Platform, BTreeMap<NameId, LocalizedName>>,
}

impl NameTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// `true` if the table holds no strings at all.
    pub fn is_empty(&self) -> bool {
        self.platforms
            .values()
            .all(|names| names.values().all(|name| name.is_empty()))
    }

    /// Set the string for `id` in `locale` on `platform`, replacing any
    /// existing string.
    pub fn insert(
        &mut self,
        platform: Platform,
        id: NameId,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.platforms
            .entry(platform)
            .or_default()
            .entry(id)
            .or_default()
            .insert(locale.into(), value.into());
    }

    /// The strings recorded for `id` on one platform.
    pub fn get(&self, platform: Platform, id: NameId) -> Option<&LocalizedName> {
        self.platforms.get(&platform)?.get(&id)
    }

    /// All names on one platform.
    pub fn platform(&self, platform: Platform) -> Option<&BTreeMap<NameId, LocalizedName>> {
        self.platforms.get(&platform)
    }

    /// Iterate over every (platform, id, strings) triple, in platform order.
    pub fn iter(&self) -> impl Iterator<Item = (Platform, NameId, &LocalizedName)> {
        self.platforms.iter().flat_map(|(platform, names)| {
            names
                .iter()
                .map(move |(id, localized)| (*platform, *id, localized))
        })
    }

    /// Resolve a name for display.
    ///
    /// `id` is tried first, then each of `preferred` in order. The first id
    /// with any string on any platform wins: its strings from every platform
    /// are merged into a single map, with platforms consulted in [`Platform`]
    /// order and the first platform to supply a locale keeping it.
    ///
    /// Returns an empty map if none of the ids have strings.
    pub fn name_by_id(&self, id: NameId, preferred: &[NameId]) -> LocalizedName {
        for candidate in std::iter::once(id).chain(preferred.iter().copied()) {
            let mut merged = LocalizedName::new();
            for names in self.platforms.values() {
                let Some(localized) = names.get(&candidate) else {
                    continue;
                };
                for (locale, value) in localized {
                    merged
                        .entry(locale.clone())
                        .or_insert_with(|| value.clone());
                }
            }
            if !merged.is_empty() {
                return merged;
            }
        }
        LocalizedName::new()
    }

    /// Find a font-specific id whose strings on some platform equal `name`.
    ///
    /// Ids in the reserved range are never returned.
    pub fn find_name_id(&self, name: &LocalizedName) -> Option<NameId> {
        self.platforms
            .values()
            .filter_map(|names| {
                names
                    .range(NameId::FIRST_FONT_SPECIFIC_NAME_ID..)
                    .find_map(|(id, localized)| (localized == name).then_some(*id))
            })
            .min()
    }

    /// The smallest font-specific id not used on any platform.
    pub fn next_free_name_id(&self) -> Option<NameId> {
        (NameId::FIRST_FONT_SPECIFIC_NAME_ID.to_u16()..=0x7FFF)
            .map(NameId::new)
            .find(|id| !self.platforms.values().any(|names| names.contains_key(id)))
    }

    /// Add `name` on `platform`, returning its id.
    ///
    /// An existing font-specific id with identical strings is reused, as long
    /// as `platform` holds nothing else under that id; otherwise the next free
    /// id is allocated. Returns `None` if the font-specific range is exhausted.
    pub fn add_name(&mut self, platform: Platform, name: LocalizedName) -> Option<NameId> {
        let target = self.platforms.get(&platform);
        let reusable = self
            .platforms
            .values()
            .flat_map(|names| names.range(NameId::FIRST_FONT_SPECIFIC_NAME_ID..))
            .filter(|(_, localized)| **localized == name)
            .map(|(id, _)| *id)
            .filter(|id| {
                target
                    .and_then(|names| names.get(id))
                    .map_or(true, |held| *held == name)
            })
            .min();
        let id = match reusable {
            Some(id) => id,
            None => self.next_free_name_id()?,
        };
        self.platforms
            .entry(platform)
            .or_default()
            .entry(id)
            .or_insert(name);
        Some(id)
    }
}

/// Parse a `name` table beginning at `start`.
///
/// `ltag` supplies the language tags referenced by Unicode-platform records.
/// Records whose platform, encoding or language cannot be interpreted are
/// skipped.
pub fn parse_name_table(
    data: FontData,
    start: usize,
    ltag: Option<&Ltag>,
) -> Result<NameTable, ReadError> {
    let mut cursor = data.cursor_at(start);
    let format: u16 = cursor.read()?;
    if format > 1 {
        return Err(ReadError::UnsupportedVersion {
            tag: TAG,
            version: format as u32,
        });
    }
    let count: u16 = cursor.read()?;
    let storage_offset: u16 = cursor.read()?;
    let storage_start = start + storage_offset as usize;
    data.check_range(cursor.position(), count as usize * NAME_RECORD_LEN)?;

    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(NameRecord {
            platform_id: cursor.read()?,
            encoding_id: cursor.read()?,
            language_id: cursor.read()?,
            name_id: cursor.read()?,
            length: cursor.read()?,
            string_offset: cursor.read()?,
        });
    }

    let mut lang_tags = Vec::new();
    if format == 1 {
        let lang_tag_count: u16 = cursor.read()?;
        data.check_range(cursor.position(), lang_tag_count as usize * 4)?;
        lang_tags.reserve(lang_tag_count as usize);
        for _ in 0..lang_tag_count {
            let length: u16 = cursor.read()?;
            let offset: u16 = cursor.read()?;
            let bytes = string_bytes(data, storage_start, offset, length)?;
            lang_tags.push(decode(bytes, Encoding::Utf16Be));
        }
    }

    let mut table = NameTable::new();
    for record in records {
        let Some(platform) = Platform::new(record.platform_id) else {
            log::debug!("skipping name record on platform {}", record.platform_id);
            continue;
        };
        let encoding = Encoding::new(record.platform_id, record.encoding_id);
        if encoding == Encoding::Unknown {
            log::debug!(
                "skipping name record with platform {} encoding {}",
                record.platform_id,
                record.encoding_id
            );
            continue;
        }
        let Some(locale) = record.locale(platform, &lang_tags, ltag) else {
            log::debug!(
                "skipping name record with platform {} language {}",
                record.platform_id,
                record.language_id
            );
            continue;
        };
        let bytes = string_bytes(data, storage_start, record.string_offset, record.length)?;
        // keep the first string seen for a locale
        table
            .platforms
            .entry(platform)
            .or_default()
            .entry(record.name_id)
            .or_default()
            .entry(locale)
            .or_insert_with(|| decode(bytes, encoding));
    }
    Ok(table)
}

const NAME_RECORD_LEN: usize = 12;

struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: NameId,
    length: u16,
    string_offset: u16,
}

impl NameRecord {
    fn locale(
        &self,
        platform: Platform,
        lang_tags: &[String],
        ltag: Option<&Ltag>,
    ) -> Option<String> {
        let id = self.language_id;
        if platform == Platform::Unicode && id == 0xFFFF {
            return Some(UNDETERMINED_LOCALE.to_owned());
        }
        if id >= FIRST_LANG_TAG_ID {
            return lang_tags.get((id - FIRST_LANG_TAG_ID) as usize).cloned();
        }
        let locale = match platform {
            Platform::Unicode => ltag?.get(id as u32)?,
            Platform::Macintosh => language::mac_locale(id)?,
            Platform::Windows => language::windows_locale(id)?,
            Platform::Reserved => return None,
        };
        Some(locale.to_owned())
    }
}

fn string_bytes<'a>(
    data: FontData<'a>,
    storage_start: usize,
    offset: u16,
    length: u16,
) -> Result<&'a [u8], ReadError> {
    let start = storage_start + offset as usize;
    data.read_bytes(start..start + length as usize)
}

fn decode(bytes: &[u8], encoding: Encoding) -> String {
    CharIter {
        data: bytes,
        encoding,
        pos: 0,
    }
    .collect()
}

/// An iterator over the chars of a name record.
#[derive(Clone)]
pub struct CharIter<'a> {
    data: &'a [u8],
    encoding: Encoding,
    pos: usize,
}

impl<'a> CharIter<'a> {
    pub fn new(data: &'a [u8], encoding: Encoding) -> Self {
        CharIter {
            data,
            encoding,
            pos: 0,
        }
    }

    fn bump_u16(&mut self) -> Option<u16> {
        let bytes = self.data.get(self.pos..self.pos + 2)?;
        self.pos += 2;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn bump_u8(&mut self) -> Option<u8> {
        let result = self.data.get(self.pos)?;
        self.pos += 1;
        Some(*result)
    }
}

impl Iterator for CharIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rep = std::char::REPLACEMENT_CHARACTER;
        let raw_c = match self.encoding {
            Encoding::Utf16Be => {
                let c1 = self.bump_u16()? as u32;
                if (0xD800..0xDC00).contains(&c1) {
                    let Some(c2) = self.bump_u16() else {
                        return Some(rep);
                    };
                    if !(0xDC00..0xE000).contains(&c2) {
                        // unpaired high surrogate; don't swallow the next unit
                        self.pos -= 2;
                        return Some(rep);
                    }
                    ((c1 & 0x3FF) << 10) + (c2 as u32 & 0x3FF) + 0x10000
                } else {
                    c1
                }
            }
            Encoding::MacRoman => {
                let c = self.bump_u8()?;
                MacRomanMapping.decode(c) as u32
            }
            Encoding::Unknown => return None,
        };
        Some(std::char::from_u32(raw_c).unwrap_or(rep))
    }
}

/// The encoding used by the name table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf16Be,
    MacRoman,
    Unknown,
}

impl Encoding {
    /// Determine the coding from the platform and encoding id.
    pub fn new(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (0, _) => Encoding::Utf16Be,
            (1, 0) => Encoding::MacRoman,
            (3, 0) => Encoding::Utf16Be,
            (3, 1) => Encoding::Utf16Be,
            (3, 10) => Encoding::Utf16Be,
            _ => Encoding::Unknown,
        }
    }
}

/// A helper for encoding and decoding Mac OS Roman encoded strings.
pub struct MacRomanMapping;

impl MacRomanMapping {
    const START_REMAP: u8 = 128;
    /// Convert from a mac-roman encoded byte to a `char`
    pub fn decode(self, raw: u8) -> char {
        if raw < Self::START_REMAP {
            raw as char
        } else {
            let idx = raw - Self::START_REMAP;
            char::from_u32(MAC_ROMAN_DECODE[idx as usize] as u32)
                .unwrap_or(std::char::REPLACEMENT_CHARACTER)
        }
    }

    /// convert from a char to a mac-roman encoded byte, if the char is in the mac-roman charset.
    pub fn encode(self, c: char) -> Option<u8> {
        let raw_c = c as u32;
        let raw_c: u16 = raw_c.try_into().ok()?;
        if raw_c < Self::START_REMAP as u16 {
            Some(raw_c as u8)
        } else {
            match MAC_ROMAN_ENCODE.binary_search_by_key(&raw_c, |(unic, _)| *unic) {
                Ok(idx) => Some(MAC_ROMAN_ENCODE[idx].1),
                Err(_) => None,
            }
        }
    }
}

/// a lookup table for the Mac Roman encoding. this matches the values 128..=255
/// to specific unicode values.
#[rustfmt::skip]
static MAC_ROMAN_DECODE: [u16; 128] = [
    196, 197, 199, 201, 209, 214, 220, 225, 224, 226, 228, 227, 229, 231, 233,
    232, 234, 235, 237, 236, 238, 239, 241, 243, 242, 244, 246, 245, 250, 249,
    251, 252, 8224, 176, 162, 163, 167, 8226, 182, 223, 174, 169, 8482, 180,
    168, 8800, 198, 216, 8734, 177, 8804, 8805, 165, 181, 8706, 8721, 8719,
    960, 8747, 170, 186, 937, 230, 248, 191, 161, 172, 8730, 402, 8776, 8710,
    171, 187, 8230, 160, 192, 195, 213, 338, 339, 8211, 8212, 8220, 8221, 8216,
    8217, 247, 9674, 255, 376, 8260, 8364, 8249, 8250, 64257, 64258, 8225, 183,
    8218, 8222, 8240, 194, 202, 193, 203, 200, 205, 206, 207, 204, 211, 212,
    63743, 210, 218, 219, 217, 305, 710, 732, 175, 728, 729, 730, 184, 733,
    731, 711,
];

/// A lookup pairing (sorted) unicode values to Mac Roman values
#[rustfmt::skip]
static MAC_ROMAN_ENCODE: [(u16, u8); 128] = [
    (160, 202), (161, 193), (162, 162), (163, 163),
    (165, 180), (167, 164), (168, 172), (169, 169),
    (170, 187), (171, 199), (172, 194), (174, 168),
    (175, 248), (176, 161), (177, 177), (180, 171),
    (181, 181), (182, 166), (183, 225), (184, 252),
    (186, 188), (187, 200), (191, 192), (192, 203),
    (193, 231), (194, 229), (195, 204), (196, 128),
    (197, 129), (198, 174), (199, 130), (200, 233),
    (201, 131), (202, 230), (203, 232), (204, 237),
    (205, 234), (206, 235), (207, 236), (209, 132),
    (210, 241), (211, 238), (212, 239), (213, 205),
    (214, 133), (216, 175), (217, 244), (218, 242),
    (219, 243), (220, 134), (223, 167), (224, 136),
    (225, 135), (226, 137), (227, 139), (228, 138),
    (229, 140), (230, 190), (231, 141), (232, 143),
    (233, 142), (234, 144), (235, 145), (236, 147),
    (237, 146), (238, 148), (239, 149), (241, 150),
    (242, 152), (243, 151), (244, 153), (245, 155),
    (246, 154), (247, 214), (248, 191), (249, 157),
    (250, 156), (251, 158), (252, 159), (255, 216),
    (305, 245), (338, 206), (339, 207), (376, 217),
    (402, 196), (710, 246), (711, 255), (728, 249),
    (729, 250), (730, 251), (731, 254), (732, 247),
    (733, 253), (937, 189), (960, 185), (8211, 208),
    (8212, 209), (8216, 212), (8217, 213), (8218, 226),
    (8220, 210), (8221, 211), (8222, 227), (8224, 160),
    (8225, 224), (8226, 165), (8230, 201), (8240, 228),
    (8249, 220), (8250, 221), (8260, 218), (8364, 219),
    (8482, 170), (8706, 182), (8710, 198), (8719, 184),
    (8721, 183), (8730, 195), (8734, 176), (8747, 186),
    (8776, 197), (8800, 173), (8804, 178), (8805, 179),
    (9674, 215), (63743, 240), (64257, 222), (64258, 223),
];
