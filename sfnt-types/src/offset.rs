//! Offsets to data within a table

/// A 16-bit offset, relative to the start of the table that contains it.
///
/// Unlike the offsets in the table directory, this is never relative to the
/// start of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Offset16(u16);

impl Offset16 {
    /// Create a new offset.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// A null offset.
    pub const fn null() -> Self {
        Self(0)
    }

    /// Return the raw offset value.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Returns this offset as a `usize`, or `None` if it is `0`.
    pub fn non_null(self) -> Option<usize> {
        match self.0 {
            0 => None,
            other => Some(other as usize),
        }
    }

    /// Return the memory representation of this offset in big-endian byte order.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<Offset16> for usize {
    fn from(src: Offset16) -> usize {
        src.0 as usize
    }
}

impl std::fmt::Display for Offset16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

crate::raw::newtype_scalar!(Offset16, [u8; 2]);
