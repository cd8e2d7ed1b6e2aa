//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use read::tables::head::{Head, MAGIC_NUMBER, TAG, VERSION};

use crate::field_list::FieldList;

/// Build the fields of a `head` table.
///
/// `checkSumAdjustment` is written as given; [`FontBuilder`] overwrites it
/// once the whole font is known.
///
/// [`FontBuilder`]: crate::FontBuilder
pub fn make_head_table(head: &Head) -> FieldList {
    let mut table = FieldList::new(TAG);
    table
        .push("version", VERSION)
        .push("fontRevision", head.font_revision)
        .push("checkSumAdjustment", head.checksum_adjustment)
        .push("magicNumber", MAGIC_NUMBER)
        .push("flags", head.flags)
        .push("unitsPerEm", head.units_per_em)
        .push("created", head.created)
        .push("modified", head.modified)
        .push("xMin", head.x_min)
        .push("yMin", head.y_min)
        .push("xMax", head.x_max)
        .push("yMax", head.y_max)
        .push("macStyle", head.mac_style)
        .push("lowestRecPPEM", head.lowest_rec_ppem)
        .push("fontDirectionHint", head.font_direction_hint)
        .push("indexToLocFormat", head.index_to_loc_format)
        .push("glyphDataFormat", head.glyph_data_format);
    table
}
