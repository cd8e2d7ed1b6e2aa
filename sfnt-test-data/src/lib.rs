//! test data shared between the sfnt crates.

pub mod fvar {
    /// Two axes (wght, wdth) and two named instances, with the axis and
    /// instance names at ids 257 through 260.
    #[rustfmt::skip]
    pub static SIMPLE: &[u8] = &[
        0x00, 0x01, 0x00, 0x00, // version 1.0
        0x00, 0x10,             // offsetToData 16
        0x00, 0x02,             // countSizePairs 2
        0x00, 0x02,             // axisCount 2
        0x00, 0x14,             // axisSize 20
        0x00, 0x02,             // instanceCount 2
        0x00, 0x0C,             // instanceSize 12
        // axis 0
        0x77, 0x67, 0x68, 0x74, // 'wght'
        0x00, 0x64, 0x00, 0x00, // minValue 100
        0x01, 0x90, 0x00, 0x00, // defaultValue 400
        0x03, 0x84, 0x00, 0x00, // maxValue 900
        0x00, 0x00,             // flags
        0x01, 0x01,             // axisNameID 257
        // axis 1
        0x77, 0x64, 0x74, 0x68, // 'wdth'
        0x00, 0x32, 0x00, 0x00, // minValue 50
        0x00, 0x64, 0x00, 0x00, // defaultValue 100
        0x00, 0xC8, 0x00, 0x00, // maxValue 200
        0x00, 0x00,             // flags
        0x01, 0x02,             // axisNameID 258
        // instance 0
        0x01, 0x03,             // subfamilyNameID 259
        0x00, 0x00,             // flags
        0x01, 0x2C, 0x00, 0x00, // wght 300
        0x00, 0x64, 0x00, 0x00, // wdth 100
        // instance 1
        0x01, 0x04,             // subfamilyNameID 260
        0x00, 0x00,             // flags
        0x01, 0x2C, 0x00, 0x00, // wght 300
        0x00, 0x4B, 0x00, 0x00, // wdth 75
    ];

    /// [`SIMPLE`], with the wdth axis hidden.
    #[rustfmt::skip]
    pub static HIDDEN_WDTH: &[u8] = &[
        0x00, 0x01, 0x00, 0x00,
        0x00, 0x10,
        0x00, 0x02,
        0x00, 0x02,
        0x00, 0x14,
        0x00, 0x02,
        0x00, 0x0C,
        0x77, 0x67, 0x68, 0x74,
        0x00, 0x64, 0x00, 0x00,
        0x01, 0x90, 0x00, 0x00,
        0x03, 0x84, 0x00, 0x00,
        0x00, 0x00,
        0x01, 0x01,
        0x77, 0x64, 0x74, 0x68,
        0x00, 0x32, 0x00, 0x00,
        0x00, 0x64, 0x00, 0x00,
        0x00, 0xC8, 0x00, 0x00,
        0x00, 0x01,             // flags: HIDDEN_AXIS
        0x01, 0x02,
        0x01, 0x03,
        0x00, 0x00,
        0x01, 0x2C, 0x00, 0x00,
        0x00, 0x64, 0x00, 0x00,
        0x01, 0x04,
        0x00, 0x00,
        0x01, 0x2C, 0x00, 0x00,
        0x00, 0x4B, 0x00, 0x00,
    ];

    /// One axis and two instances with 10-byte records; only the first
    /// instance has a PostScript name.
    #[rustfmt::skip]
    pub static POSTSCRIPT_NAMES: &[u8] = &[
        0x00, 0x01, 0x00, 0x00, // version 1.0
        0x00, 0x10,             // offsetToData 16
        0x00, 0x02,             // countSizePairs 2
        0x00, 0x01,             // axisCount 1
        0x00, 0x14,             // axisSize 20
        0x00, 0x02,             // instanceCount 2
        0x00, 0x0A,             // instanceSize 10
        0x77, 0x67, 0x68, 0x74, // 'wght'
        0x00, 0x64, 0x00, 0x00, // minValue 100
        0x01, 0x90, 0x00, 0x00, // defaultValue 400
        0x03, 0x84, 0x00, 0x00, // maxValue 900
        0x00, 0x00,             // flags
        0x01, 0x01,             // axisNameID 257
        0x00, 0x02,             // subfamilyNameID 2
        0x00, 0x00,             // flags
        0x01, 0x90, 0x00, 0x00, // wght 400
        0x00, 0x06,             // postScriptNameID 6
        0x01, 0x03,             // subfamilyNameID 259
        0x00, 0x00,             // flags
        0x02, 0xBC, 0x00, 0x00, // wght 700
        0xFF, 0xFF,             // no postScriptNameID
    ];
}

pub mod name {
    /// Windows English names for ids 257 through 260.
    #[rustfmt::skip]
    pub static WINDOWS_ENGLISH: &[u8] = &[
        0x00, 0x00, // format 0
        0x00, 0x04, // count 4
        0x00, 0x36, // stringOffset 54
        0x00, 0x03, 0x00, 0x01, 0x04, 0x09, 0x01, 0x01, 0x00, 0x0C, 0x00, 0x00, // 3, 1, 0x0409, 257, len 12, offset 0
        0x00, 0x03, 0x00, 0x01, 0x04, 0x09, 0x01, 0x02, 0x00, 0x0A, 0x00, 0x0C, // 3, 1, 0x0409, 258, len 10, offset 12
        0x00, 0x03, 0x00, 0x01, 0x04, 0x09, 0x01, 0x03, 0x00, 0x0E, 0x00, 0x16, // 3, 1, 0x0409, 259, len 14, offset 22
        0x00, 0x03, 0x00, 0x01, 0x04, 0x09, 0x01, 0x04, 0x00, 0x12, 0x00, 0x24, // 3, 1, 0x0409, 260, len 18, offset 36
        0x00, 0x57, 0x00, 0x65, 0x00, 0x69, 0x00, 0x67, 0x00, 0x68, 0x00, 0x74, // Weight
        0x00, 0x57, 0x00, 0x69, 0x00, 0x64, 0x00, 0x74, 0x00, 0x68, // Width
        0x00, 0x52, 0x00, 0x65, 0x00, 0x67, 0x00, 0x75, 0x00, 0x6C, 0x00, 0x61, 0x00, 0x72, // Regular
        0x00, 0x43, 0x00, 0x6F, 0x00, 0x6E, 0x00, 0x64, 0x00, 0x65, 0x00, 0x6E, 0x00, 0x73, 0x00, 0x65, 0x00, 0x64, // Condensed
    ];
}

pub mod post {
    #[rustfmt::skip]
    pub static SIMPLE: &[u8] = &[
        0x00, 0x02, 0x00, 0x00, // version 2.0
        0x00, 0x00, 0x00, 0x00, // italic angle
        0xFF, 0xB5,             // underlinePosition -75
        0x00, 0x32,             // underlineThickness 50
        0x00, 0x00, 0x00, 0x00, // fixedpitch
        0x00, 0x00, 0x00, 0x00, // min/max mem:
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x0A,             // numGlyphs 10
                                // glyph name index:
        0x00, 0x00,             // glyph 0 -> name 0
        0x00, 0x00,             // glyph 1 -> name 0
        0x00, 0x03,             // glyph 2 -> name 3 ('space')
        0x00, 0x04,             // glyph 3 -> name 4 ('exclam')
        0x00, 0x06,
        0x00, 0x07,
        0x00, 0x08,
        0x01, 0x02,             // glyph 7 -> name 258, the first custom name
        0x01, 0x03,             // glyph 8 -> name 259
        0x01, 0x04,             // glyph 9 -> name 260
        0x05, 0x68, 0x65, 0x6C, 0x6C, 0x6F, // 5, h e l l o
        0x02, 0x68, 0x69,                   // 2, h i
        0x04, 0x68, 0x6F, 0x6C, 0x61,       // 4, h o l a
    ];
}
