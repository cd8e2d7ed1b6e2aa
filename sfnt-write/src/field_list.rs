//! Tables as ordered lists of named, typed fields

use std::collections::HashSet;

use read::{FontData, ReadError};
use types::{FieldType, FieldValue, Tag};

use crate::{
    validate::{Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// One named field of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// The name of the field, unique within its table.
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The kind of this field, or `None` for a literal byte run.
    pub fn field_type(&self) -> Option<FieldType> {
        self.value.field_type()
    }

    pub fn byte_len(&self) -> usize {
        self.value.byte_len()
    }
}

/// A table described by the fields it contains, in on-disk order.
///
/// The table is written by encoding each field in turn, so the order of the
/// list is the order of the bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldList {
    tag: Tag,
    fields: Vec<Field>,
}

impl FieldList {
    /// Create an empty table with this tag.
    pub fn new(tag: Tag) -> Self {
        FieldList {
            tag,
            fields: Vec::new(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Append one field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.fields.push(Field::new(name, value));
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The value of the field with this name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Replace the value of an existing field, returning the old value.
    ///
    /// Returns `None`, leaving the table unchanged, if there is no field
    /// with this name.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Option<FieldValue> {
        let field = self.fields.iter_mut().find(|field| field.name == name)?;
        Some(std::mem::replace(&mut field.value, value.into()))
    }

    /// The encoded size of the table, in bytes.
    ///
    /// This is computed from the field kinds without encoding anything.
    pub fn size(&self) -> usize {
        self.fields.iter().map(Field::byte_len).sum()
    }

    /// Encode the table.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = TableWriter::default();
        self.write_into(&mut writer);
        writer.into_data()
    }

    /// Replace every value with one decoded from `data` at `start`.
    ///
    /// Fields are read in order, each with the kind of its current value;
    /// a literal reads as many bytes as it currently holds. On error the
    /// table is left unchanged.
    pub fn read_from(&mut self, data: FontData, start: usize) -> Result<(), ReadError> {
        let mut cursor = data.cursor_at(start);
        let values = self
            .fields
            .iter()
            .map(|field| match &field.value {
                FieldValue::Literal(bytes) => cursor
                    .read_bytes(bytes.len())
                    .map(|bytes| FieldValue::Literal(bytes.to_vec())),
                value => match value.field_type() {
                    Some(field_type) => cursor.read_field(field_type),
                    None => Ok(value.clone()),
                },
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = value;
        }
        Ok(())
    }
}

impl Extend<Field> for FieldList {
    fn extend<T: IntoIterator<Item = Field>>(&mut self, iter: T) {
        self.fields.extend(iter)
    }
}

impl FontWrite for FieldList {
    fn write_into(&self, writer: &mut TableWriter) {
        for field in &self.fields {
            field.value.write_into(writer);
        }
    }
}

impl Validate for FieldList {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("FieldList", |ctx| {
            let mut seen = HashSet::new();
            ctx.in_field("fields", |ctx| {
                ctx.in_array(&self.fields, |ctx, field| {
                    if !seen.insert(field.name.as_str()) {
                        ctx.report(format!(
                            "duplicate field name '{}' in '{}'",
                            field.name, self.tag
                        ));
                    }
                })
            })
        })
    }
}
