//! The [post](https://docs.microsoft.com/en-us/typography/opentype/spec/post) table

use read::tables::post::{Post, TAG, VERSION_3_0};

use crate::field_list::FieldList;

/// Build the fields of a version 3.0 `post` table.
///
/// Glyph names are not written; a table read with names comes back
/// without them.
pub fn make_post_table(post: &Post) -> FieldList {
    if !post.glyph_names.is_empty() {
        log::debug!("dropping {} post glyph names", post.glyph_names.len());
    }
    let mut table = FieldList::new(TAG);
    table
        .push("version", VERSION_3_0)
        .push("italicAngle", post.italic_angle)
        .push("underlinePosition", post.underline_position)
        .push("underlineThickness", post.underline_thickness)
        .push("isFixedPitch", post.is_fixed_pitch)
        .push("minMemType42", post.min_mem_type42)
        .push("maxMemType42", post.max_mem_type42)
        .push("minMemType1", post.min_mem_type1)
        .push("maxMemType1", post.max_mem_type1);
    table
}
