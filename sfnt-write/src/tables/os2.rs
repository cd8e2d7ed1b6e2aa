//! The [OS/2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use read::tables::os2::{Os2, MAX_KNOWN_VERSION, TAG};
use types::FieldValue;

use crate::{
    field_list::FieldList,
    validate::{Validate, ValidationCtx, ValidationReport},
};

/// Build the fields of an `OS/2` table.
///
/// The fields written are exactly those of `os2.version`; versions above 5
/// use the version 5 layout. A versioned field that is present when the
/// version cannot hold it, or absent when the version requires it, fails
/// validation.
pub fn make_os2_table(os2: &Os2) -> Result<FieldList, ValidationReport> {
    os2.validate()?;
    let mut table = FieldList::new(TAG);
    table
        .push("version", os2.version)
        .push("xAvgCharWidth", os2.x_avg_char_width)
        .push("usWeightClass", os2.us_weight_class)
        .push("usWidthClass", os2.us_width_class)
        .push("fsType", os2.fs_type)
        .push("ySubscriptXSize", os2.y_subscript_x_size)
        .push("ySubscriptYSize", os2.y_subscript_y_size)
        .push("ySubscriptXOffset", os2.y_subscript_x_offset)
        .push("ySubscriptYOffset", os2.y_subscript_y_offset)
        .push("ySuperscriptXSize", os2.y_superscript_x_size)
        .push("ySuperscriptYSize", os2.y_superscript_y_size)
        .push("ySuperscriptXOffset", os2.y_superscript_x_offset)
        .push("ySuperscriptYOffset", os2.y_superscript_y_offset)
        .push("yStrikeoutSize", os2.y_strikeout_size)
        .push("yStrikeoutPosition", os2.y_strikeout_position)
        .push("sFamilyClass", os2.s_family_class)
        .push("panose", os2.panose.to_vec());
    for (i, range) in os2.ul_unicode_range.iter().enumerate() {
        table.push(format!("ulUnicodeRange{}", i + 1), *range);
    }
    table
        .push("achVendID", os2.ach_vend_id)
        .push("fsSelection", os2.fs_selection)
        .push("usFirstCharIndex", os2.us_first_char_index)
        .push("usLastCharIndex", os2.us_last_char_index)
        .push("sTypoAscender", os2.s_typo_ascender)
        .push("sTypoDescender", os2.s_typo_descender)
        .push("sTypoLineGap", os2.s_typo_line_gap)
        .push("usWinAscent", os2.us_win_ascent)
        .push("usWinDescent", os2.us_win_descent);

    // validation guarantees these are present for the versions that use them
    if let Some([range1, range2]) = os2.ul_code_page_range {
        table
            .push("ulCodePageRange1", range1)
            .push("ulCodePageRange2", range2);
    }
    let later_fields = [
        ("sxHeight", os2.sx_height.map(FieldValue::from)),
        ("sCapHeight", os2.s_cap_height.map(FieldValue::from)),
        ("usDefaultChar", os2.us_default_char.map(FieldValue::from)),
        ("usBreakChar", os2.us_break_char.map(FieldValue::from)),
        ("usMaxContext", os2.us_max_context.map(FieldValue::from)),
        (
            "usLowerOpticalPointSize",
            os2.us_lower_optical_point_size.map(FieldValue::from),
        ),
        (
            "usUpperOpticalPointSize",
            os2.us_upper_optical_point_size.map(FieldValue::from),
        ),
    ];
    for (name, value) in later_fields {
        if let Some(value) = value {
            table.push(name, value);
        }
    }
    Ok(table)
}

impl Validate for Os2 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        let version = self.version.min(MAX_KNOWN_VERSION);
        ctx.in_table("OS/2", |ctx| {
            let mut check = |name: &'static str, present: bool, since: u16| {
                ctx.in_field(name, |ctx| match (present, version >= since) {
                    (true, false) => ctx.report(format!(
                        "field is not allowed in version {} (added in version {since})",
                        self.version
                    )),
                    (false, true) => ctx.report(format!(
                        "field is required by version {}",
                        self.version
                    )),
                    _ => (),
                })
            };
            check("ul_code_page_range", self.ul_code_page_range.is_some(), 1);
            check("sx_height", self.sx_height.is_some(), 2);
            check("s_cap_height", self.s_cap_height.is_some(), 2);
            check("us_default_char", self.us_default_char.is_some(), 2);
            check("us_break_char", self.us_break_char.is_some(), 2);
            check("us_max_context", self.us_max_context.is_some(), 2);
            check(
                "us_lower_optical_point_size",
                self.us_lower_optical_point_size.is_some(),
                5,
            );
            check(
                "us_upper_optical_point_size",
                self.us_upper_optical_point_size.is_some(),
                5,
            );
        })
    }
}
