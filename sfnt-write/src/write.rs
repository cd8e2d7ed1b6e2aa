use types::{FieldValue, Fixed, LongDateTime, NameId, Offset16, Tag};

use crate::validate::{Validate, ValidationReport};

/// A type that that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// A buffer that accumulates the big-endian bytes of one table.
#[derive(Debug, Default)]
pub struct TableWriter {
    data: Vec<u8>,
}

/// Attempt to serialize a table.
///
/// If the table is malformed, this will return an Err([`ValidationReport`]),
/// otherwise it will return the bytes encoding the table.
pub fn dump_table<T: FontWrite + Validate>(table: &T) -> Result<Vec<u8>, ValidationReport> {
    table.validate()?;
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    Ok(writer.into_data())
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(i64);
write_be_bytes!(Fixed);
write_be_bytes!(LongDateTime);
write_be_bytes!(Tag);
write_be_bytes!(NameId);
write_be_bytes!(Offset16);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl FontWrite for FieldValue {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            FieldValue::Byte(v) => v.write_into(writer),
            FieldValue::Char(v) => v.write_into(writer),
            FieldValue::UShort(v) => v.write_into(writer),
            FieldValue::Short(v) => v.write_into(writer),
            FieldValue::ULong(v) => v.write_into(writer),
            FieldValue::Long(v) => v.write_into(writer),
            FieldValue::Fixed(v) => v.write_into(writer),
            FieldValue::Tag(v) => v.write_into(writer),
            FieldValue::Offset16(v) => v.write_into(writer),
            FieldValue::LongDateTime(v) => v.write_into(writer),
            FieldValue::Literal(bytes) => writer.write_slice(bytes),
        }
    }
}
