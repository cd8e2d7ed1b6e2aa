//! The [fvar](https://learn.microsoft.com/en-us/typography/opentype/spec/fvar) table

use read::tables::{
    fvar::{
        instance_record_base_size, VariationTable, AXIS_RECORD_SIZE, COUNT_SIZE_PAIRS,
        HIDDEN_AXIS, NO_POSTSCRIPT_NAME_ID, TAG, VERSION,
    },
    name::NameTable,
};
use types::{FixedSize, NameId, Offset16};

use crate::{
    field_list::FieldList,
    validate::{Validate, ValidationCtx, ValidationReport},
};

/// Build the fields of an `fvar` table.
///
/// `names` is only consulted to warn about axis names that will not resolve;
/// the name ids in `table` are written as given.
pub fn make_fvar_table(
    table: &VariationTable,
    names: &NameTable,
) -> Result<FieldList, ValidationReport> {
    table.validate()?;
    check_axis_names(table, names);

    // every record must have the same size, so if any instance has a
    // PostScript name they all get the field
    let has_post_script_names = table
        .instances
        .iter()
        .any(|instance| instance.post_script_name_id.is_some());
    let mut instance_size = instance_record_base_size(table.axes.len());
    if has_post_script_names {
        instance_size += NameId::RAW_BYTE_LEN;
    }

    let mut fvar = FieldList::new(TAG);
    fvar.push("version", VERSION)
        .push("offsetToData", Offset16::null())
        .push("countSizePairs", COUNT_SIZE_PAIRS)
        .push("axisCount", table.axes.len() as u16)
        .push("axisSize", AXIS_RECORD_SIZE)
        .push("instanceCount", table.instances.len() as u16)
        .push("instanceSize", instance_size as u16);
    let header_len = fvar.size() as u16;
    fvar.set("offsetToData", Offset16::new(header_len));

    for (i, axis) in table.axes.iter().enumerate() {
        let flags = if axis.is_hidden { HIDDEN_AXIS } else { 0 };
        fvar.push(format!("axisTag_{i}"), axis.tag)
            .push(format!("minValue_{i}"), axis.min_value)
            .push(format!("defaultValue_{i}"), axis.default_value)
            .push(format!("maxValue_{i}"), axis.max_value)
            .push(format!("axisFlags_{i}"), flags)
            .push(format!("axisNameID_{i}"), axis.axis_name_id);
    }

    for (j, instance) in table.instances.iter().enumerate() {
        fvar.push(format!("subfamilyNameID_{j}"), instance.subfamily_name_id)
            .push(format!("instanceFlags_{j}"), 0u16);
        // axes that share a tag share a coordinate
        for (i, axis) in table.axes.iter().enumerate() {
            // validation guarantees a coordinate for every axis
            let coordinate = instance
                .coordinates
                .get(&axis.tag)
                .copied()
                .unwrap_or_default();
            fvar.push(format!("coordinate_{j}_{i}"), coordinate);
        }
        if has_post_script_names {
            let id = instance
                .post_script_name_id
                .unwrap_or(NameId::new(NO_POSTSCRIPT_NAME_ID));
            fvar.push(format!("postScriptNameID_{j}"), id);
        }
    }
    Ok(fvar)
}

fn check_axis_names(table: &VariationTable, names: &NameTable) {
    for axis in &table.axes {
        if axis.axis_name_id.is_reserved() {
            log::warn!(
                "axis '{}' uses reserved name id {}",
                axis.tag,
                axis.axis_name_id
            );
        } else if names.name_by_id(axis.axis_name_id, &[]).is_empty() {
            log::warn!(
                "axis '{}' name id {} is not in the name table",
                axis.tag,
                axis.axis_name_id
            );
        }
    }
}

impl Validate for VariationTable {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("fvar", |ctx| {
            ctx.in_field("axes", |ctx| {
                if self.axes.len() > u16::MAX as usize {
                    ctx.report(format!("too many axes ({})", self.axes.len()));
                }
            });

            let mut instance_size = instance_record_base_size(self.axes.len());
            if self
                .instances
                .iter()
                .any(|instance| instance.post_script_name_id.is_some())
            {
                instance_size += NameId::RAW_BYTE_LEN;
            }
            if instance_size > u16::MAX as usize {
                ctx.report(format!(
                    "instance records of {instance_size} bytes do not fit in instanceSize"
                ));
            }

            ctx.in_field("instances", |ctx| {
                if self.instances.len() > u16::MAX as usize {
                    ctx.report(format!("too many instances ({})", self.instances.len()));
                }
                ctx.in_array(&self.instances, |ctx, instance| {
                    ctx.in_field("coordinates", |ctx| {
                        for axis in &self.axes {
                            if !instance.coordinates.contains_key(&axis.tag) {
                                ctx.report(format!("no coordinate for axis '{}'", axis.tag));
                            }
                        }
                        for tag in instance.coordinates.keys() {
                            if !self.axes.iter().any(|axis| axis.tag == *tag) {
                                ctx.report(format!("coordinate for unknown axis '{tag}'"));
                            }
                        }
                    });
                    ctx.in_field("post_script_name_id", |ctx| {
                        if instance.post_script_name_id == Some(NameId::new(NO_POSTSCRIPT_NAME_ID))
                        {
                            ctx.report("0xFFFF is reserved; use None for a missing PostScript name");
                        }
                    });
                });
            });
        })
    }
}

#[cfg(test)]
#[path = "../tests/fvar.rs"]
mod tests;
