//! Four-byte table and axis identifiers

use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A table or axis tag: four bytes, conventionally printable ASCII.
///
/// Tags read from a font are not validated, since real fonts carry invalid
/// ones; [`Tag::new_checked`] and [`FromStr`] do validate. See the
/// [OpenType data types](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#data-types).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Create a tag from one to four printable ASCII bytes.
    ///
    /// Short input is padded with trailing spaces. The first byte may not be
    /// a space, and nothing but spaces may follow a space.
    pub fn new_checked(src: &[u8]) -> Result<Self, InvalidTag> {
        if src.is_empty() || src.len() > 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        let mut raw = [b' '; 4];
        let mut seen_space = false;
        for (pos, &byte) in src.iter().enumerate() {
            match byte {
                b' ' if pos == 0 => return Err(InvalidTag::InvalidByte { pos, byte }),
                b' ' => seen_space = true,
                0x21..=0x7E if seen_space => return Err(InvalidTag::ByteAfterSpace { pos }),
                0x21..=0x7E => (),
                _ => return Err(InvalidTag::InvalidByte { pos, byte }),
            }
            raw[pos] = byte;
        }
        Ok(Tag(raw))
    }

    pub const fn from_u32(src: u32) -> Self {
        Self(src.to_be_bytes())
    }

    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

/// Why a string or byte slice is not a valid tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// Tags are one to four bytes long.
    InvalidLength(usize),
    /// A byte outside `0x20..=0x7E`, or a leading space.
    InvalidByte { pos: usize, byte: u8 },
    /// A non-space byte after a space.
    ByteAfterSpace { pos: usize },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::new_checked(src.as_bytes())
    }
}

impl crate::raw::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Tag(raw)
    }
}

impl std::error::Error for InvalidTag {}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "tag must be 1 to 4 bytes, not {len}"),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "invalid tag byte 0x{byte:02X} at {pos}")
            }
            InvalidTag::ByteAfterSpace { pos } => {
                write!(f, "tag has a non-space byte after a space at {pos}")
            }
        }
    }
}

// unprintable bytes are shown as hex so that directory dumps stay readable
impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|&byte| match byte {
            0x20..=0x7E => write!(f, "{}", byte as char),
            _ => write!(f, "{{0x{byte:02X}}}"),
        })
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

/// Four spaces.
impl Default for Tag {
    fn default() -> Self {
        Tag([b' '; 4])
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
