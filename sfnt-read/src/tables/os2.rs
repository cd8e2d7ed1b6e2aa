//! The [OS/2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::Tag;

use crate::{FontData, ReadError};

/// 'OS/2'
pub const TAG: Tag = Tag::new(b"OS/2");

/// The highest version whose layout we know.
pub const MAX_KNOWN_VERSION: u16 = 5;

/// The size of the table for a given version.
pub fn table_len(version: u16) -> usize {
    match version.min(MAX_KNOWN_VERSION) {
        0 => 78,
        1 => 86,
        2..=4 => 96,
        _ => 100,
    }
}

/// OS/2 and Windows metrics.
///
/// Fields introduced after version 0 are `None` when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Os2 {
    pub version: u16,
    pub x_avg_char_width: i16,
    pub us_weight_class: u16,
    pub us_width_class: u16,
    pub fs_type: u16,
    pub y_subscript_x_size: i16,
    pub y_subscript_y_size: i16,
    pub y_subscript_x_offset: i16,
    pub y_subscript_y_offset: i16,
    pub y_superscript_x_size: i16,
    pub y_superscript_y_size: i16,
    pub y_superscript_x_offset: i16,
    pub y_superscript_y_offset: i16,
    pub y_strikeout_size: i16,
    pub y_strikeout_position: i16,
    pub s_family_class: i16,
    pub panose: [u8; 10],
    pub ul_unicode_range: [u32; 4],
    pub ach_vend_id: Tag,
    pub fs_selection: u16,
    pub us_first_char_index: u16,
    pub us_last_char_index: u16,
    pub s_typo_ascender: i16,
    pub s_typo_descender: i16,
    pub s_typo_line_gap: i16,
    pub us_win_ascent: u16,
    pub us_win_descent: u16,
    /// Version 1 and later.
    pub ul_code_page_range: Option<[u32; 2]>,
    /// Version 2 and later.
    pub sx_height: Option<i16>,
    pub s_cap_height: Option<i16>,
    pub us_default_char: Option<u16>,
    pub us_break_char: Option<u16>,
    pub us_max_context: Option<u16>,
    /// Version 5 and later.
    pub us_lower_optical_point_size: Option<u16>,
    pub us_upper_optical_point_size: Option<u16>,
}

/// Parse an `OS/2` table beginning at `start`.
///
/// Versions above 5 are read with the version 5 layout.
pub fn parse_os2_table(data: FontData, start: usize) -> Result<Os2, ReadError> {
    let version: u16 = data.read_at(start)?;
    data.check_range(start, table_len(version))?;
    let mut cursor = data.cursor_at(start + 2);
    let mut table = Os2 {
        version,
        x_avg_char_width: cursor.read()?,
        us_weight_class: cursor.read()?,
        us_width_class: cursor.read()?,
        fs_type: cursor.read()?,
        y_subscript_x_size: cursor.read()?,
        y_subscript_y_size: cursor.read()?,
        y_subscript_x_offset: cursor.read()?,
        y_subscript_y_offset: cursor.read()?,
        y_superscript_x_size: cursor.read()?,
        y_superscript_y_size: cursor.read()?,
        y_superscript_x_offset: cursor.read()?,
        y_superscript_y_offset: cursor.read()?,
        y_strikeout_size: cursor.read()?,
        y_strikeout_position: cursor.read()?,
        s_family_class: cursor.read()?,
        ..Default::default()
    };
    for byte in table.panose.iter_mut() {
        *byte = cursor.read()?;
    }
    for range in table.ul_unicode_range.iter_mut() {
        *range = cursor.read()?;
    }
    table.ach_vend_id = cursor.read()?;
    table.fs_selection = cursor.read()?;
    table.us_first_char_index = cursor.read()?;
    table.us_last_char_index = cursor.read()?;
    table.s_typo_ascender = cursor.read()?;
    table.s_typo_descender = cursor.read()?;
    table.s_typo_line_gap = cursor.read()?;
    table.us_win_ascent = cursor.read()?;
    table.us_win_descent = cursor.read()?;

    if version >= 1 {
        table.ul_code_page_range = Some([cursor.read()?, cursor.read()?]);
    }
    if version >= 2 {
        table.sx_height = Some(cursor.read()?);
        table.s_cap_height = Some(cursor.read()?);
        table.us_default_char = Some(cursor.read()?);
        table.us_break_char = Some(cursor.read()?);
        table.us_max_context = Some(cursor.read()?);
    }
    if version >= 5 {
        table.us_lower_optical_point_size = Some(cursor.read()?);
        table.us_upper_optical_point_size = Some(cursor.read()?);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;
    use rstest::rstest;

    fn os2_bytes(version: u16) -> BeBuffer {
        let mut buf = BeBuffer::new()
            .push(version)
            .push(500i16)
            .extend([700u16, 5, 0])
            .extend([650i16, 600, 0, 75, 650, 600, 0, 350, 50, 300, 0])
            .extend([2u8, 0, 5, 3, 0, 0, 0, 0, 0, 0])
            .extend([1u32, 0, 0, 0])
            .push(Tag::new(b"NONE"))
            .extend([0x40u16, 0x20, 0xFFFF])
            .extend([800i16, -200, 0])
            .extend([1000u16, 250]);
        if version >= 1 {
            buf = buf.extend([1u32, 0]);
        }
        if version >= 2 {
            buf = buf.extend([480i16, 700]).extend([0u16, 32, 3]);
        }
        if version >= 5 {
            buf = buf.extend([0u16, 0xFFFE]);
        }
        buf
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    fn versioned_fields(#[case] version: u16) {
        let buf = os2_bytes(version);
        assert_eq!(buf.len(), table_len(version));
        let os2 = parse_os2_table(buf.font_data(), 0).unwrap();
        assert_eq!(os2.version, version);
        assert_eq!(os2.us_weight_class, 700);
        assert_eq!(os2.panose[2], 5);
        assert_eq!(os2.ach_vend_id, Tag::new(b"NONE"));
        assert_eq!(os2.us_win_descent, 250);
        assert_eq!(os2.ul_code_page_range.is_some(), version >= 1);
        assert_eq!(os2.sx_height, (version >= 2).then_some(480));
        assert_eq!(os2.us_max_context, (version >= 2).then_some(3));
        assert_eq!(
            os2.us_upper_optical_point_size,
            (version >= 5).then_some(0xFFFE)
        );
    }

    #[test]
    fn future_versions_read_as_five() {
        let mut bytes = os2_bytes(5).to_vec();
        bytes[1] = 6;
        let os2 = parse_os2_table(FontData::new(&bytes), 0).unwrap();
        assert_eq!(os2.version, 6);
        assert_eq!(os2.us_lower_optical_point_size, Some(0));
    }

    #[test]
    fn truncated() {
        let buf = os2_bytes(1);
        let data = FontData::new(&buf[..80]);
        assert_eq!(parse_os2_table(data, 0), Err(ReadError::TruncatedData));
    }
}
