//! the [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post#header) table

use types::{Fixed, Tag};

use crate::{font_data::Cursor, FontData, ReadError};

/// 'post'
pub const TAG: Tag = Tag::new(b"post");

pub const VERSION_1_0: u32 = 0x0001_0000;
pub const VERSION_2_0: u32 = 0x0002_0000;
pub const VERSION_2_5: u32 = 0x0002_5000;
pub const VERSION_3_0: u32 = 0x0003_0000;

/// The size of the fields shared by every version.
pub const HEADER_LEN: usize = 32;

/// PostScript information, with any glyph names resolved to strings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Post {
    pub version: u32,
    pub italic_angle: Fixed,
    pub underline_position: i16,
    pub underline_thickness: i16,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    /// Names indexed by glyph id; empty for version 3.0.
    pub glyph_names: Vec<String>,
}

impl Default for Post {
    fn default() -> Self {
        Post {
            version: VERSION_3_0,
            italic_angle: Fixed::ZERO,
            underline_position: 0,
            underline_thickness: 0,
            is_fixed_pitch: 0,
            min_mem_type42: 0,
            max_mem_type42: 0,
            min_mem_type1: 0,
            max_mem_type1: 0,
            glyph_names: Vec::new(),
        }
    }
}

impl Post {
    pub fn glyph_name(&self, glyph_id: u16) -> Option<&str> {
        self.glyph_names.get(glyph_id as usize).map(String::as_str)
    }
}

/// Parse a `post` table beginning at `start`.
pub fn parse_post_table(data: FontData, start: usize) -> Result<Post, ReadError> {
    data.check_range(start, HEADER_LEN)?;
    let mut cursor = data.cursor_at(start);
    let mut table = Post {
        version: cursor.read()?,
        italic_angle: cursor.read()?,
        underline_position: cursor.read()?,
        underline_thickness: cursor.read()?,
        is_fixed_pitch: cursor.read()?,
        min_mem_type42: cursor.read()?,
        max_mem_type42: cursor.read()?,
        min_mem_type1: cursor.read()?,
        max_mem_type1: cursor.read()?,
        glyph_names: Vec::new(),
    };
    table.glyph_names = match table.version {
        VERSION_1_0 => DEFAULT_GLYPH_NAMES.iter().map(|s| s.to_string()).collect(),
        VERSION_2_0 => read_v2_names(&mut cursor)?,
        VERSION_2_5 => read_v2_5_names(&mut cursor)?,
        VERSION_3_0 => Vec::new(),
        version => return Err(ReadError::UnsupportedVersion { tag: TAG, version }),
    };
    Ok(table)
}

fn read_v2_names(cursor: &mut Cursor) -> Result<Vec<String>, ReadError> {
    let num_glyphs: u16 = cursor.read()?;
    let indices = (0..num_glyphs)
        .map(|_| cursor.read::<u16>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut pool = Vec::new();
    while cursor.remaining_bytes() > 0 {
        let len: u8 = cursor.read()?;
        let bytes = cursor.read_bytes(len as usize)?;
        if !bytes.is_ascii() {
            return Err(ReadError::MalformedData("post glyph names must be ascii"));
        }
        pool.push(String::from_utf8_lossy(bytes).into_owned());
    }

    indices
        .into_iter()
        .map(|idx| {
            let idx = idx as usize;
            match DEFAULT_GLYPH_NAMES.get(idx) {
                Some(name) => Ok(name.to_string()),
                None => pool
                    .get(idx - DEFAULT_GLYPH_NAMES.len())
                    .cloned()
                    .ok_or(ReadError::MalformedData("post glyph name index out of range")),
            }
        })
        .collect()
}

fn read_v2_5_names(cursor: &mut Cursor) -> Result<Vec<String>, ReadError> {
    let num_glyphs: u16 = cursor.read()?;
    (0..num_glyphs)
        .map(|gid| {
            let offset: i8 = cursor.read()?;
            (gid as i32 + offset as i32)
                .try_into()
                .ok()
                .and_then(|idx: usize| DEFAULT_GLYPH_NAMES.get(idx))
                .map(|name| name.to_string())
                .ok_or(ReadError::MalformedData("post glyph name offset out of range"))
        })
        .collect()
}

/// The 258 glyph names defined for Macintosh TrueType fonts
#[rustfmt::skip]
pub static DEFAULT_GLYPH_NAMES: [&str; 258] = [
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl", "numbersign", "dollar",
    "percent", "ampersand", "quotesingle", "parenleft", "parenright", "asterisk", "plus", "comma",
    "hyphen", "period", "slash", "zero", "one", "two", "three", "four", "five", "six", "seven",
    "eight", "nine", "colon", "semicolon", "less", "equal", "greater", "question", "at", "A", "B",
    "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U",
    "V", "W", "X", "Y", "Z", "bracketleft", "backslash", "bracketright", "asciicircum",
    "underscore", "grave", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n",
    "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "braceleft", "bar", "braceright",
    "asciitilde", "Adieresis", "Aring", "Ccedilla", "Eacute", "Ntilde", "Odieresis", "Udieresis",
    "aacute", "agrave", "acircumflex", "adieresis", "atilde", "aring", "ccedilla", "eacute",
    "egrave", "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex", "idieresis", "ntilde",
    "oacute", "ograve", "ocircumflex", "odieresis", "otilde", "uacute", "ugrave", "ucircumflex",
    "udieresis", "dagger", "degree", "cent", "sterling", "section", "bullet", "paragraph",
    "germandbls", "registered", "copyright", "trademark", "acute", "dieresis", "notequal", "AE",
    "Oslash", "infinity", "plusminus", "lessequal", "greaterequal", "yen", "mu", "partialdiff",
    "summation", "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega", "ae",
    "oslash", "questiondown", "exclamdown", "logicalnot", "radical", "florin", "approxequal",
    "Delta", "guillemotleft", "guillemotright", "ellipsis", "nonbreakingspace", "Agrave", "Atilde",
    "Otilde", "OE", "oe", "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft",
    "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis", "fraction", "currency",
    "guilsinglleft", "guilsinglright", "fi", "fl", "daggerdbl", "periodcentered", "quotesinglbase",
    "quotedblbase", "perthousand", "Acircumflex", "Ecircumflex", "Aacute", "Edieresis", "Egrave",
    "Iacute", "Icircumflex", "Idieresis", "Igrave", "Oacute", "Ocircumflex", "apple", "Ograve",
    "Uacute", "Ucircumflex", "Ugrave", "dotlessi", "circumflex", "tilde", "macron", "breve",
    "dotaccent", "ring", "cedilla", "hungarumlaut", "ogonek", "caron", "Lslash", "lslash",
    "Scaron", "scaron", "Zcaron", "zcaron", "brokenbar", "Eth", "eth", "Yacute", "yacute", "Thorn",
    "thorn", "minus", "multiply", "onesuperior", "twosuperior", "threesuperior", "onehalf",
    "onequarter", "threequarters", "franc", "Gbreve", "gbreve", "Idotaccent", "Scedilla",
    "scedilla", "Cacute", "cacute", "Ccaron", "ccaron", "dcroat",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::BeBuffer;
    use sfnt_test_data::post as test_data;

    #[test]
    fn version_two() {
        let table = parse_post_table(test_data::SIMPLE.into(), 0).unwrap();
        assert_eq!(table.version, VERSION_2_0);
        assert_eq!(table.underline_position, -75);
        assert_eq!(table.glyph_names.len(), 10);
        assert_eq!(table.glyph_name(1), Some(".notdef"));
        assert_eq!(table.glyph_name(2), Some("space"));
        assert_eq!(table.glyph_name(7), Some("hello"));
        assert_eq!(table.glyph_name(8), Some("hi"));
        assert_eq!(table.glyph_name(9), Some("hola"));
        assert_eq!(table.glyph_name(10), None);
    }

    fn header(version: u32) -> BeBuffer {
        BeBuffer::new()
            .push(version)
            .push(Fixed::from_i32(-12))
            .extend([-100i16, 50])
            .extend([1u32, 0, 0, 0, 0])
    }

    #[test]
    fn version_one_and_three() {
        let v1 = parse_post_table(header(VERSION_1_0).font_data(), 0).unwrap();
        assert_eq!(v1.glyph_names.len(), 258);
        assert_eq!(v1.glyph_name(257), Some("dcroat"));
        assert_eq!(v1.italic_angle, Fixed::from_i32(-12));
        assert_eq!(v1.is_fixed_pitch, 1);

        let v3 = parse_post_table(header(VERSION_3_0).font_data(), 0).unwrap();
        assert!(v3.glyph_names.is_empty());
        assert_eq!(v3.underline_thickness, 50);
    }

    #[test]
    fn version_two_point_five() {
        let buf = header(VERSION_2_5).push(3u16).extend([0i8, 2, -1]);
        let table = parse_post_table(buf.font_data(), 0).unwrap();
        assert_eq!(table.glyph_names, [".notdef", "space", ".null"]);

        let buf = header(VERSION_2_5).push(1u16).push(-1i8);
        assert!(matches!(
            parse_post_table(buf.font_data(), 0),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn bad_name_index() {
        let buf = header(VERSION_2_0)
            .push(1u16)
            .push(259u16)
            .push(1u8)
            .extend_bytes(b"a");
        assert!(matches!(
            parse_post_table(buf.font_data(), 0),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn unknown_version() {
        let buf = header(0x0004_0000);
        assert_eq!(
            parse_post_table(buf.font_data(), 0),
            Err(ReadError::UnsupportedVersion {
                tag: TAG,
                version: 0x0004_0000
            })
        );
    }
}
