//! Field kinds and values used to describe table layouts

use crate::{Fixed, FixedSize, LongDateTime, NameId, Offset16, Tag};

/// The on-disk kind of a single table field.
///
/// Every kind has a fixed width; see [`FieldType::byte_len`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// 8-bit unsigned integer.
    Byte,
    /// 8-bit signed integer.
    Char,
    /// 16-bit unsigned integer.
    UShort,
    /// 16-bit signed integer.
    Short,
    /// 32-bit unsigned integer.
    ULong,
    /// 32-bit signed integer.
    Long,
    /// 32-bit signed 16.16 fixed point number.
    Fixed,
    /// Four raw bytes, conventionally printable ASCII.
    Tag,
    /// 16-bit offset from the start of the containing table.
    Offset16,
    /// 64-bit signed number of seconds since 1904-01-01.
    LongDateTime,
}

impl FieldType {
    /// The encoded width of a field of this kind, in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Char => u8::RAW_BYTE_LEN,
            FieldType::UShort | FieldType::Short => u16::RAW_BYTE_LEN,
            FieldType::Offset16 => Offset16::RAW_BYTE_LEN,
            FieldType::ULong | FieldType::Long => u32::RAW_BYTE_LEN,
            FieldType::Fixed => Fixed::RAW_BYTE_LEN,
            FieldType::Tag => Tag::RAW_BYTE_LEN,
            FieldType::LongDateTime => LongDateTime::RAW_BYTE_LEN,
        }
    }
}

/// A typed field value.
///
/// The variant determines both the width and the encoding of the value.
/// [`FieldValue::Literal`] carries an opaque run of bytes, such as string
/// storage, that has no scalar kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    Byte(u8),
    Char(i8),
    UShort(u16),
    Short(i16),
    ULong(u32),
    Long(i32),
    Fixed(Fixed),
    Tag(Tag),
    Offset16(Offset16),
    LongDateTime(LongDateTime),
    Literal(Vec<u8>),
}

impl FieldValue {
    /// The kind of this value, or `None` for a literal byte run.
    pub fn field_type(&self) -> Option<FieldType> {
        Some(match self {
            FieldValue::Byte(_) => FieldType::Byte,
            FieldValue::Char(_) => FieldType::Char,
            FieldValue::UShort(_) => FieldType::UShort,
            FieldValue::Short(_) => FieldType::Short,
            FieldValue::ULong(_) => FieldType::ULong,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::Fixed(_) => FieldType::Fixed,
            FieldValue::Tag(_) => FieldType::Tag,
            FieldValue::Offset16(_) => FieldType::Offset16,
            FieldValue::LongDateTime(_) => FieldType::LongDateTime,
            FieldValue::Literal(_) => return None,
        })
    }

    /// The encoded width of this value, in bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            FieldValue::Literal(bytes) => bytes.len(),
            other => other.field_type().map(FieldType::byte_len).unwrap_or_default(),
        }
    }

    /// Returns the value as a `u32`, if it is an unsigned integer or offset.
    ///
    /// Convenient for reading back counts and sizes from a built table.
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            FieldValue::Byte(v) => Some(*v as u32),
            FieldValue::UShort(v) => Some(*v as u32),
            FieldValue::ULong(v) => Some(*v),
            FieldValue::Offset16(v) => Some(v.to_u16() as u32),
            _ => None,
        }
    }
}

macro_rules! field_value_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for FieldValue {
            fn from(src: $ty) -> FieldValue {
                FieldValue::$variant(src)
            }
        }
    };
}

field_value_from!(u8, Byte);
field_value_from!(i8, Char);
field_value_from!(u16, UShort);
field_value_from!(i16, Short);
field_value_from!(u32, ULong);
field_value_from!(i32, Long);
field_value_from!(Fixed, Fixed);
field_value_from!(Tag, Tag);
field_value_from!(Offset16, Offset16);
field_value_from!(LongDateTime, LongDateTime);
field_value_from!(Vec<u8>, Literal);

// name ids are plain u16 fields on disk
impl From<NameId> for FieldValue {
    fn from(src: NameId) -> FieldValue {
        FieldValue::UShort(src.to_u16())
    }
}
