//! The [Font Variations](https://docs.microsoft.com/en-us/typography/opentype/spec/fvar) table

use indexmap::IndexMap;
use types::{Fixed, FixedSize, NameId, Offset16, Tag};

use super::name::{LocalizedName, NameTable};
use crate::{FontData, ReadError};

/// 'fvar'
pub const TAG: Tag = Tag::new(b"fvar");

/// The only table version we read or write.
pub const VERSION: u32 = 0x0001_0000;

/// The size of an axis record, in bytes.
pub const AXIS_RECORD_SIZE: u16 = 20;

/// The number of size fields following the `countSizePairs` field.
pub const COUNT_SIZE_PAIRS: u16 = 2;

/// The bit in the axis flags marking an axis that should not be exposed in
/// user interfaces.
pub const HIDDEN_AXIS: u16 = 0x0001;

/// The name id used to mark an instance with no PostScript name.
pub const NO_POSTSCRIPT_NAME_ID: u16 = 0xFFFF;

const INSTANCE_NAME_FALLBACKS: [NameId; 2] =
    [NameId::SUBFAMILY_NAME, NameId::TYPOGRAPHIC_SUBFAMILY_NAME];
const POSTSCRIPT_NAME_FALLBACKS: [NameId; 1] = [NameId::POSTSCRIPT_NAME];

/// A font's variation axes and named instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariationTable {
    pub axes: Vec<VariationAxis>,
    pub instances: Vec<VariationInstance>,
}

/// A variation axis.
///
/// `min_value <= default_value <= max_value` is expected but not enforced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariationAxis {
    pub tag: Tag,
    pub min_value: Fixed,
    pub default_value: Fixed,
    pub max_value: Fixed,
    pub is_hidden: bool,
    pub axis_name_id: NameId,
    /// The display name of the axis, resolved from the name table.
    pub name: LocalizedName,
}

/// A named instance: a position in the design space with a style name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariationInstance {
    pub subfamily_name_id: NameId,
    /// The display name of the instance, resolved from the name table.
    pub name: LocalizedName,
    /// One coordinate per axis, keyed by axis tag, in axis order.
    ///
    /// Axes sharing a tag share a single coordinate.
    pub coordinates: IndexMap<Tag, Fixed>,
    pub post_script_name_id: Option<NameId>,
    pub post_script_name: Option<LocalizedName>,
}

/// The size of an instance record with no PostScript name id.
pub fn instance_record_base_size(axis_count: usize) -> usize {
    u16::RAW_BYTE_LEN * 2 + axis_count * Fixed::RAW_BYTE_LEN
}

/// Parse an `fvar` table beginning at `start`.
///
/// Axis and instance names are resolved against `names`.
pub fn parse_fvar_table(
    data: FontData,
    start: usize,
    names: &NameTable,
) -> Result<VariationTable, ReadError> {
    let mut cursor = data.cursor_at(start);
    let version: u32 = cursor.read()?;
    if version != VERSION {
        return Err(ReadError::UnsupportedVersion { tag: TAG, version });
    }
    let offset_to_data: Offset16 = cursor.read()?;
    let count_size_pairs: u16 = cursor.read()?;
    if count_size_pairs != COUNT_SIZE_PAIRS {
        log::debug!("fvar countSizePairs is {count_size_pairs}, expected {COUNT_SIZE_PAIRS}");
    }
    let axis_count = cursor.read::<u16>()? as usize;
    let axis_size = cursor.read::<u16>()? as usize;
    let instance_count = cursor.read::<u16>()? as usize;
    let instance_size = cursor.read::<u16>()? as usize;

    if axis_size < AXIS_RECORD_SIZE as usize {
        return Err(ReadError::MalformedData("fvar axis records are too small"));
    }
    if instance_size < instance_record_base_size(axis_count) {
        return Err(ReadError::MalformedData(
            "fvar instance records are too small for their coordinates",
        ));
    }

    let axes_start = start
        .checked_add(usize::from(offset_to_data))
        .ok_or(ReadError::TruncatedData)?;
    let axes_len = axis_count
        .checked_mul(axis_size)
        .ok_or(ReadError::TruncatedData)?;
    let instances_len = instance_count
        .checked_mul(instance_size)
        .ok_or(ReadError::TruncatedData)?;
    let instances_start = axes_start
        .checked_add(axes_len)
        .ok_or(ReadError::TruncatedData)?;
    data.check_range(
        axes_start,
        axes_len
            .checked_add(instances_len)
            .ok_or(ReadError::TruncatedData)?,
    )?;

    let axes = (0..axis_count)
        .map(|i| parse_axis(data, axes_start + i * axis_size, names))
        .collect::<Result<Vec<_>, _>>()?;
    let instances = (0..instance_count)
        .map(|j| {
            let instance_start = instances_start + j * instance_size;
            parse_instance(data, instance_start, &axes, names, instance_size)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VariationTable { axes, instances })
}

fn parse_axis(data: FontData, start: usize, names: &NameTable) -> Result<VariationAxis, ReadError> {
    let mut cursor = data.cursor_at(start);
    let tag = cursor.read()?;
    let min_value = cursor.read()?;
    let default_value = cursor.read()?;
    let max_value = cursor.read()?;
    let flags: u16 = cursor.read()?;
    let axis_name_id = cursor.read()?;
    Ok(VariationAxis {
        tag,
        min_value,
        default_value,
        max_value,
        is_hidden: flags & HIDDEN_AXIS != 0,
        axis_name_id,
        name: names.name_by_id(axis_name_id, &[]),
    })
}

fn parse_instance(
    data: FontData,
    start: usize,
    axes: &[VariationAxis],
    names: &NameTable,
    instance_size: usize,
) -> Result<VariationInstance, ReadError> {
    let mut cursor = data.cursor_at(start);
    let subfamily_name_id = cursor.read()?;
    cursor.skip::<u16>(1); // flags; none are defined
    let mut coordinates = IndexMap::with_capacity(axes.len());
    for axis in axes {
        // a repeated tag keeps its first position and its last value
        if let Some(previous) = coordinates.insert(axis.tag, cursor.read()?) {
            log::warn!(
                "axis '{}' appears more than once; dropping coordinate {previous}",
                axis.tag
            );
        }
    }

    // the PostScript name id is present only if the declared record size
    // leaves room for it
    let mut post_script_name_id = None;
    if instance_size.saturating_sub(cursor.relative_offset()) >= NameId::RAW_BYTE_LEN {
        let id: NameId = cursor.read()?;
        post_script_name_id = (id.to_u16() != NO_POSTSCRIPT_NAME_ID).then_some(id);
    }

    Ok(VariationInstance {
        subfamily_name_id,
        name: names.name_by_id(subfamily_name_id, &INSTANCE_NAME_FALLBACKS),
        coordinates,
        post_script_name_id,
        post_script_name: post_script_name_id
            .map(|id| names.name_by_id(id, &POSTSCRIPT_NAME_FALLBACKS)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::name::Platform;
    use crate::test_helpers::BeBuffer;
    use pretty_assertions::assert_eq;

    fn localized(pairs: &[(&str, &str)]) -> LocalizedName {
        pairs
            .iter()
            .map(|(locale, value)| (locale.to_string(), value.to_string()))
            .collect()
    }

    fn test_names() -> NameTable {
        let mut names = NameTable::new();
        for (id, en, ja) in [
            (257, "Weight", "ウエイト"),
            (258, "Width", "幅"),
            (259, "Regular", "レギュラー"),
            (260, "Condensed", "コンデンス"),
        ] {
            names.insert(Platform::Macintosh, NameId::new(id), "en", en);
            names.insert(Platform::Macintosh, NameId::new(id), "ja", ja);
        }
        names
    }

    fn expected_table() -> VariationTable {
        let axis = |tag, min: i32, default: i32, max: i32, id, en, ja| VariationAxis {
            tag: Tag::new(tag),
            min_value: Fixed::from_i32(min),
            default_value: Fixed::from_i32(default),
            max_value: Fixed::from_i32(max),
            is_hidden: false,
            axis_name_id: NameId::new(id),
            name: localized(&[("en", en), ("ja", ja)]),
        };
        let instance = |id, en, ja, wdth: i32| VariationInstance {
            subfamily_name_id: NameId::new(id),
            name: localized(&[("en", en), ("ja", ja)]),
            coordinates: [
                (Tag::new(b"wght"), Fixed::from_i32(300)),
                (Tag::new(b"wdth"), Fixed::from_i32(wdth)),
            ]
            .into_iter()
            .collect(),
            post_script_name_id: None,
            post_script_name: None,
        };
        VariationTable {
            axes: vec![
                axis(b"wght", 100, 400, 900, 257, "Weight", "ウエイト"),
                axis(b"wdth", 50, 100, 200, 258, "Width", "幅"),
            ],
            instances: vec![
                instance(259, "Regular", "レギュラー", 100),
                instance(260, "Condensed", "コンデンス", 75),
            ],
        }
    }

    #[test]
    fn parse_simple() {
        let data = FontData::new(sfnt_test_data::fvar::SIMPLE);
        let table = parse_fvar_table(data, 0, &test_names()).unwrap();
        assert_eq!(table, expected_table());
    }

    #[test]
    fn parse_at_offset() {
        let mut bytes = vec![0xAB; 7];
        bytes.extend_from_slice(sfnt_test_data::fvar::SIMPLE);
        let table = parse_fvar_table(FontData::new(&bytes), 7, &test_names()).unwrap();
        assert_eq!(table, expected_table());
    }

    #[test]
    fn hidden_flag() {
        let data = FontData::new(sfnt_test_data::fvar::HIDDEN_WDTH);
        let table = parse_fvar_table(data, 0, &test_names()).unwrap();
        assert!(!table.axes[0].is_hidden);
        assert!(table.axes[1].is_hidden);
    }

    #[test]
    fn hidden_ignores_other_flag_bits() {
        let buf = BeBuffer::new()
            .push(VERSION)
            .extend([16u16, 2, 1, 20, 0, 8])
            .push(Tag::new(b"opsz"))
            .extend([Fixed::from_i32(8), Fixed::from_i32(12), Fixed::from_i32(72)])
            .push(0xFFFEu16)
            .push(256u16);
        let table = parse_fvar_table(buf.font_data(), 0, &NameTable::new()).unwrap();
        assert!(!table.axes[0].is_hidden);
        assert!(table.axes[0].name.is_empty());
    }

    #[test]
    fn names_without_name_table() {
        let data = FontData::new(sfnt_test_data::fvar::SIMPLE);
        let table = parse_fvar_table(data, 0, &NameTable::new()).unwrap();
        assert!(table.axes.iter().all(|axis| axis.name.is_empty()));
        assert!(table.instances.iter().all(|inst| inst.name.is_empty()));
    }

    #[test]
    fn post_script_names() {
        let mut names = test_names();
        names.insert(Platform::Windows, NameId::SUBFAMILY_NAME, "en", "Regular");
        names.insert(Platform::Windows, NameId::POSTSCRIPT_NAME, "en", "VARTestVF-Regular");
        let data = FontData::new(sfnt_test_data::fvar::POSTSCRIPT_NAMES);
        let table = parse_fvar_table(data, 0, &names).unwrap();

        let first = &table.instances[0];
        assert_eq!(first.subfamily_name_id, NameId::SUBFAMILY_NAME);
        assert_eq!(first.name, localized(&[("en", "Regular")]));
        assert_eq!(first.post_script_name_id, Some(NameId::POSTSCRIPT_NAME));
        assert_eq!(
            first.post_script_name,
            Some(localized(&[("en", "VARTestVF-Regular")]))
        );
        // 0xFFFF means no PostScript name
        let second = &table.instances[1];
        assert_eq!(second.post_script_name_id, None);
        assert_eq!(second.post_script_name, None);
    }

    #[test]
    fn single_padding_byte_is_not_a_name_id() {
        // instanceSize = 4 + 4 + 1
        let buf = BeBuffer::new()
            .push(VERSION)
            .extend([16u16, 2, 1, 20, 1, 9])
            .push(Tag::new(b"wght"))
            .extend([Fixed::from_i32(100), Fixed::from_i32(400), Fixed::from_i32(900)])
            .extend([0u16, 257])
            .extend([259u16, 0])
            .push(Fixed::from_i32(300))
            .push(0u8);
        let table = parse_fvar_table(buf.font_data(), 0, &NameTable::new()).unwrap();
        assert_eq!(table.instances[0].post_script_name_id, None);
    }

    #[test]
    fn unsupported_version() {
        let mut bytes = sfnt_test_data::fvar::SIMPLE.to_vec();
        bytes[1] = 2;
        assert_eq!(
            parse_fvar_table(FontData::new(&bytes), 0, &NameTable::new()),
            Err(ReadError::UnsupportedVersion {
                tag: TAG,
                version: 0x0002_0000
            })
        );
    }

    #[test]
    fn truncated() {
        let bytes = sfnt_test_data::fvar::SIMPLE;
        let data = FontData::new(&bytes[..bytes.len() - 1]);
        assert_eq!(
            parse_fvar_table(data, 0, &NameTable::new()),
            Err(ReadError::TruncatedData)
        );
    }

    #[test]
    fn hostile_counts_fail_before_allocating() {
        let buf = BeBuffer::new()
            .push(VERSION)
            .extend([16u16, 2, 100, 20, 0xFFFF, 0xFFFF]);
        assert_eq!(
            parse_fvar_table(buf.font_data(), 0, &NameTable::new()),
            Err(ReadError::TruncatedData)
        );
    }

    #[test]
    fn repeated_axis_tags_share_a_coordinate() {
        let mut bytes = sfnt_test_data::fvar::SIMPLE.to_vec();
        bytes[36..40].copy_from_slice(b"wght");
        let table = parse_fvar_table(FontData::new(&bytes), 0, &NameTable::new()).unwrap();
        assert_eq!(table.axes[1].tag, Tag::new(b"wght"));
        let coordinates = &table.instances[1].coordinates;
        assert_eq!(coordinates.len(), 1);
        assert_eq!(coordinates[&Tag::new(b"wght")], Fixed::from_i32(75));
    }

    #[test]
    fn malformed_sizes() {
        let small_axes = BeBuffer::new()
            .push(VERSION)
            .extend([16u16, 2, 1, 16, 0, 8]);
        assert!(matches!(
            parse_fvar_table(small_axes.font_data(), 0, &NameTable::new()),
            Err(ReadError::MalformedData(_))
        ));
        let small_instances = BeBuffer::new()
            .push(VERSION)
            .extend([16u16, 2, 2, 20, 1, 8]);
        assert!(matches!(
            parse_fvar_table(small_instances.font_data(), 0, &NameTable::new()),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let table = expected_table();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains(r#""wght""#), "{json}");
        let back: VariationTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
