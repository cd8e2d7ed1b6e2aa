//! The [name](https://learn.microsoft.com/en-us/typography/opentype/spec/name) table

use std::collections::HashMap;

use read::tables::{
    language::{self, FIRST_LANG_TAG_ID, UNDETERMINED_LOCALE},
    name::{MacRomanMapping, NameTable, Platform, TAG},
};
use types::{FixedSize, NameId, Offset16};

use crate::{
    field_list::FieldList,
    validate::{Validate, ValidationCtx, ValidationReport},
};

const UNICODE_FULL_REPERTOIRE_ENCODING: u16 = 4;
const UNICODE_DEFAULT_LANGUAGE: u16 = 0xFFFF;
const MAC_ROMAN_ENCODING: u16 = 0;
const WINDOWS_BMP_ENCODING: u16 = 1;
const WINDOWS_FULL_REPERTOIRE_ENCODING: u16 = 10;

const HEADER_LEN: usize = 6;
const NAME_RECORD_LEN: usize = 12;
const LANG_TAG_RECORD_LEN: usize = 4;

/// Build the fields of a `name` table.
///
/// Strings that cannot be written on their platform are dropped with a
/// warning: Macintosh strings outside MacRoman or in a language without a
/// Macintosh code, and anything on the reserved platform. Locales without a
/// platform language id are written as language-tag records, which makes
/// the table format 1.
pub fn make_name_table(names: &NameTable) -> Result<FieldList, ValidationReport> {
    let compiled = CompiledName::new(names);
    compiled.validate()?;
    Ok(compiled.into_fields())
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: NameId,
    string: Vec<u8>,
}

/// A name table after encoding, ready to be laid out.
#[derive(Debug, Default)]
struct CompiledName {
    records: Vec<NameRecord>,
    lang_tags: Vec<String>,
}

impl CompiledName {
    fn new(names: &NameTable) -> Self {
        let mut compiled = CompiledName::default();
        for (platform, name_id, localized) in names.iter() {
            for (locale, string) in localized {
                if let Some(record) = compiled.encode(platform, name_id, locale, string) {
                    compiled.records.push(record);
                }
            }
        }
        compiled.records.sort();
        compiled
    }

    fn encode(
        &mut self,
        platform: Platform,
        name_id: NameId,
        locale: &str,
        string: &str,
    ) -> Option<NameRecord> {
        let (encoding_id, language_id, string) = match platform {
            Platform::Unicode => {
                let language_id = if locale == UNDETERMINED_LOCALE {
                    UNICODE_DEFAULT_LANGUAGE
                } else {
                    self.lang_tag_id(locale)
                };
                (UNICODE_FULL_REPERTOIRE_ENCODING, language_id, utf16_be(string))
            }
            Platform::Macintosh => {
                let Some(language_id) = language::mac_language_id(locale) else {
                    log::warn!("dropping name {name_id}: no Macintosh language for '{locale}'");
                    return None;
                };
                let Some(string) = mac_roman(string) else {
                    log::warn!("dropping name {name_id} ({locale}): not representable in MacRoman");
                    return None;
                };
                (MAC_ROMAN_ENCODING, language_id, string)
            }
            Platform::Windows => {
                let encoding_id = if string.chars().any(|c| c.len_utf16() > 1) {
                    WINDOWS_FULL_REPERTOIRE_ENCODING
                } else {
                    WINDOWS_BMP_ENCODING
                };
                let language_id = language::windows_language_id(locale)
                    .unwrap_or_else(|| self.lang_tag_id(locale));
                (encoding_id, language_id, utf16_be(string))
            }
            Platform::Reserved => {
                log::warn!("dropping name {name_id} ({locale}): reserved platform");
                return None;
            }
        };
        Some(NameRecord {
            platform_id: platform.to_u16(),
            encoding_id,
            language_id,
            name_id,
            string,
        })
    }

    /// The language id referencing the lang-tag record for `locale`.
    fn lang_tag_id(&mut self, locale: &str) -> u16 {
        let idx = match self.lang_tags.iter().position(|tag| tag == locale) {
            Some(idx) => idx,
            None => {
                self.lang_tags.push(locale.to_owned());
                self.lang_tags.len() - 1
            }
        };
        // overflow is reported by validation
        FIRST_LANG_TAG_ID.saturating_add(idx.try_into().unwrap_or(u16::MAX))
    }

    fn format(&self) -> u16 {
        u16::from(!self.lang_tags.is_empty())
    }

    fn storage_offset(&self) -> usize {
        let mut len = HEADER_LEN + self.records.len() * NAME_RECORD_LEN;
        if self.format() == 1 {
            len += u16::RAW_BYTE_LEN + self.lang_tags.len() * LANG_TAG_RECORD_LEN;
        }
        len
    }

    /// Lay out the string storage, returning the storage and the
    /// (offset, length) of each record followed by each lang tag.
    fn storage(&self) -> (Vec<u8>, Vec<(usize, usize)>) {
        let mut storage = Vec::new();
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        let strings = self
            .records
            .iter()
            .map(|record| record.string.clone())
            .chain(self.lang_tags.iter().map(|tag| utf16_be(tag)));
        let mut positions = Vec::new();
        for string in strings {
            let len = string.len();
            let offset = match seen.get(&string) {
                Some(offset) => *offset,
                None => {
                    let offset = storage.len();
                    storage.extend_from_slice(&string);
                    seen.insert(string, offset);
                    offset
                }
            };
            positions.push((offset, len));
        }
        (storage, positions)
    }

    fn into_fields(self) -> FieldList {
        let (storage, positions) = self.storage();
        let mut positions = positions.into_iter();
        let mut name = FieldList::new(TAG);
        name.push("format", self.format())
            .push("count", self.records.len() as u16)
            .push("stringOffset", Offset16::new(self.storage_offset() as u16));
        for (i, record) in self.records.iter().enumerate() {
            let (offset, len) = positions.next().unwrap_or_default();
            name.push(format!("platformID_{i}"), record.platform_id)
                .push(format!("encodingID_{i}"), record.encoding_id)
                .push(format!("languageID_{i}"), record.language_id)
                .push(format!("nameID_{i}"), record.name_id)
                .push(format!("length_{i}"), len as u16)
                .push(format!("offset_{i}"), Offset16::new(offset as u16));
        }
        if self.format() == 1 {
            name.push("langTagCount", self.lang_tags.len() as u16);
            for k in 0..self.lang_tags.len() {
                let (offset, len) = positions.next().unwrap_or_default();
                name.push(format!("langTagLength_{k}"), len as u16)
                    .push(format!("langTagOffset_{k}"), Offset16::new(offset as u16));
            }
        }
        name.push("storage", storage);
        name
    }
}

impl Validate for CompiledName {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("name", |ctx| {
            if self.records.len() > u16::MAX as usize {
                ctx.report(format!("too many name records ({})", self.records.len()));
            }
            if self.lang_tags.len() > (u16::MAX - FIRST_LANG_TAG_ID) as usize + 1 {
                ctx.report(format!("too many language tags ({})", self.lang_tags.len()));
            }
            if self.storage_offset() > u16::MAX as usize {
                ctx.report("name records do not fit before the 16-bit storage offset");
            }
            let (_, positions) = self.storage();
            ctx.in_field("storage", |ctx| {
                ctx.in_array(positions, |ctx, (offset, len)| {
                    if offset > u16::MAX as usize || len > u16::MAX as usize {
                        ctx.report(format!(
                            "string of {len} bytes at {offset} is beyond the 16-bit storage range"
                        ));
                    }
                })
            });
        })
    }
}

fn utf16_be(string: &str) -> Vec<u8> {
    string.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn mac_roman(string: &str) -> Option<Vec<u8>> {
    string.chars().map(|c| MacRomanMapping.encode(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use read::{
        tables::{
            ltag::Ltag,
            name::{parse_name_table, LocalizedName},
        },
        FontData,
    };
    use types::FieldValue;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn compile_and_parse(names: &NameTable, ltag: Option<&Ltag>) -> (FieldList, NameTable) {
        let fields = make_name_table(names).unwrap();
        let bytes = fields.to_bytes();
        assert_eq!(bytes.len(), fields.size());
        let parsed = parse_name_table(FontData::new(&bytes), 0, ltag).unwrap();
        (fields, parsed)
    }

    #[test]
    fn windows_english() {
        let mut names = NameTable::new();
        for (id, value) in [(257, "Weight"), (258, "Width"), (259, "Regular"), (260, "Condensed")] {
            names.insert(Platform::Windows, NameId::new(id), "en", value);
        }
        let fields = make_name_table(&names).unwrap();
        assert_eq!(fields.to_bytes(), sfnt_test_data::name::WINDOWS_ENGLISH);
    }

    #[test]
    fn records_are_sorted() {
        let mut names = NameTable::new();
        names.insert(Platform::Windows, NameId::new(2), "en", "Regular");
        names.insert(Platform::Macintosh, NameId::new(2), "en", "Regular");
        names.insert(Platform::Windows, NameId::new(1), "ja", "ファミリー");
        names.insert(Platform::Windows, NameId::new(1), "en", "Family");
        let (fields, parsed) = compile_and_parse(&names, None);
        let key = |i: usize| {
            [
                format!("platformID_{i}"),
                format!("languageID_{i}"),
                format!("nameID_{i}"),
            ]
            .map(|name| fields.get(&name).and_then(FieldValue::to_u32).unwrap())
        };
        assert_eq!(key(0), [1, 0, 2]);
        assert_eq!(key(1), [3, 0x0409, 1]);
        assert_eq!(key(2), [3, 0x0409, 2]);
        assert_eq!(key(3), [3, 0x0411, 1]);
        assert_eq!(parsed, names);
    }

    #[test]
    fn identical_strings_share_storage() {
        let mut names = NameTable::new();
        names.insert(Platform::Windows, NameId::new(1), "en", "Same");
        names.insert(Platform::Windows, NameId::new(16), "en", "Same");
        names.insert(Platform::Macintosh, NameId::new(1), "en", "Same");
        let fields = make_name_table(&names).unwrap();
        // one UTF-16 copy and one MacRoman copy
        assert_eq!(
            fields.get("storage"),
            Some(&FieldValue::Literal(b"Same\0S\0a\0m\0e".to_vec()))
        );
        assert_eq!(fields.get("offset_1"), fields.get("offset_2"));
    }

    #[test]
    fn surrogates_use_full_repertoire_encoding() {
        let mut names = NameTable::new();
        names.insert(Platform::Windows, NameId::new(256), "en", "😀 smile");
        let (fields, parsed) = compile_and_parse(&names, None);
        assert_eq!(fields.get("encodingID_0"), Some(&FieldValue::UShort(10)));
        assert_eq!(fields.get("length_0"), Some(&FieldValue::UShort(16)));
        assert_eq!(parsed, names);
    }

    #[test]
    fn unknown_locales_use_lang_tags() {
        let mut names = NameTable::new();
        names.insert(Platform::Windows, NameId::new(256), "tlh", "Qapla'");
        names.insert(Platform::Unicode, NameId::new(256), "und", "Success");
        names.insert(Platform::Unicode, NameId::new(256), "tlh", "Qapla'");
        let (fields, parsed) = compile_and_parse(&names, None);
        assert_eq!(fields.get("format"), Some(&FieldValue::UShort(1)));
        assert_eq!(fields.get("langTagCount"), Some(&FieldValue::UShort(1)));
        // unicode records come first
        assert_eq!(fields.get("languageID_0"), Some(&FieldValue::UShort(0x8000)));
        assert_eq!(fields.get("languageID_1"), Some(&FieldValue::UShort(0xFFFF)));
        assert_eq!(fields.get("languageID_2"), Some(&FieldValue::UShort(0x8000)));
        assert_eq!(parsed, names);
    }

    #[test]
    fn unwritable_names_are_dropped() {
        init();
        let mut names = NameTable::new();
        names.insert(Platform::Macintosh, NameId::new(257), "en", "Weight");
        names.insert(Platform::Macintosh, NameId::new(257), "ja", "ウエイト");
        names.insert(Platform::Macintosh, NameId::new(258), "tlh", "Qapla'");
        names.insert(Platform::Reserved, NameId::new(259), "en", "Regular");
        let (fields, parsed) = compile_and_parse(&names, None);
        assert_eq!(fields.get("count"), Some(&FieldValue::UShort(1)));
        let expected: LocalizedName = [("en".to_string(), "Weight".to_string())].into();
        assert_eq!(parsed.name_by_id(NameId::new(257), &[]), expected);
        assert!(parsed.name_by_id(NameId::new(259), &[]).is_empty());
    }

    #[test]
    fn empty_table() {
        let fields = make_name_table(&NameTable::new()).unwrap();
        assert_eq!(fields.to_bytes(), [0, 0, 0, 0, 0, 6]);
    }

    #[test]
    fn storage_overflow() {
        let mut names = NameTable::new();
        let long = "x".repeat(20_000);
        for id in 256..260 {
            // distinct strings so nothing is shared
            names.insert(Platform::Windows, NameId::new(id), "en", format!("{id}{long}"));
        }
        let report = make_name_table(&names).unwrap_err();
        assert!(report.to_string().contains("16-bit storage range"), "{report}");
    }
}
