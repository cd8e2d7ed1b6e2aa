use super::*;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use read::{
    tables::{
        fvar::{parse_fvar_table, VariationAxis, VariationInstance},
        name::{LocalizedName, Platform},
    },
    FontData,
};
use sfnt_test_data::fvar as test_data;
use types::{Fixed, Tag};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn coordinates(values: &[(&[u8; 4], Fixed)]) -> IndexMap<Tag, Fixed> {
    values
        .iter()
        .map(|(tag, value)| (Tag::new(tag), *value))
        .collect()
}

fn axis(tag: &[u8; 4], min: i32, default: i32, max: i32, name_id: u16) -> VariationAxis {
    VariationAxis {
        tag: Tag::new(tag),
        min_value: Fixed::from_i32(min),
        default_value: Fixed::from_i32(default),
        max_value: Fixed::from_i32(max),
        is_hidden: false,
        axis_name_id: NameId::new(name_id),
        name: LocalizedName::new(),
    }
}

fn instance(name_id: u16, wght: i32, wdth: i32) -> VariationInstance {
    VariationInstance {
        subfamily_name_id: NameId::new(name_id),
        name: LocalizedName::new(),
        coordinates: coordinates(&[
            (b"wght", Fixed::from_i32(wght)),
            (b"wdth", Fixed::from_i32(wdth)),
        ]),
        post_script_name_id: None,
        post_script_name: None,
    }
}

fn wght_wdth_table() -> VariationTable {
    VariationTable {
        axes: vec![axis(b"wght", 100, 400, 900, 257), axis(b"wdth", 50, 100, 200, 258)],
        instances: vec![instance(259, 300, 100), instance(260, 300, 75)],
    }
}

fn font_names() -> NameTable {
    let mut names = NameTable::new();
    names.insert(Platform::Macintosh, NameId::new(111), "en", "Name #111");
    for (id, en, ja) in [(256, "Ligatures", "リガチャ"), (257, "Weight", "ウエイト")] {
        names.insert(Platform::Macintosh, NameId::new(id), "en", en);
        names.insert(Platform::Macintosh, NameId::new(id), "ja", ja);
    }
    names
}

#[test]
fn builds_reference_table() {
    init();
    let fvar = make_fvar_table(&wght_wdth_table(), &font_names()).unwrap();
    let bytes = fvar.to_bytes();
    assert_eq!(bytes, test_data::SIMPLE);
    assert_eq!(fvar.size(), bytes.len());
    assert_eq!(fvar.get("offsetToData"), Some(&Offset16::new(16).into()));
    assert_eq!(fvar.get("instanceSize").and_then(|v| v.to_u32()), Some(12));
}

#[test]
fn round_trip_hidden_axis() {
    let table = parse_fvar_table(
        FontData::new(test_data::HIDDEN_WDTH),
        0,
        &NameTable::new(),
    )
    .unwrap();
    assert!(table.axes[1].is_hidden);
    let fvar = make_fvar_table(&table, &NameTable::new()).unwrap();
    assert_eq!(fvar.get("axisFlags_1"), Some(&1u16.into()));
    assert_eq!(fvar.to_bytes(), test_data::HIDDEN_WDTH);
}

#[test]
fn round_trip_post_script_names() {
    let table = parse_fvar_table(
        FontData::new(test_data::POSTSCRIPT_NAMES),
        0,
        &NameTable::new(),
    )
    .unwrap();
    let fvar = make_fvar_table(&table, &NameTable::new()).unwrap();
    assert_eq!(fvar.to_bytes(), test_data::POSTSCRIPT_NAMES);
}

#[test]
fn one_post_script_name_widens_every_record() {
    let mut table = wght_wdth_table();
    table.instances[0].post_script_name_id = Some(NameId::new(300));
    table.instances[0].post_script_name = Some(LocalizedName::new());

    let fvar = make_fvar_table(&table, &NameTable::new()).unwrap();
    // 4 + 2 * 4 + 2
    assert_eq!(fvar.get("instanceSize").and_then(|v| v.to_u32()), Some(14));
    assert_eq!(fvar.get("postScriptNameID_0"), Some(&300u16.into()));
    assert_eq!(fvar.get("postScriptNameID_1"), Some(&0xFFFFu16.into()));

    let bytes = fvar.to_bytes();
    assert_eq!(bytes.len(), 16 + 2 * 20 + 2 * 14);
    let loaded = parse_fvar_table(FontData::new(&bytes), 0, &NameTable::new()).unwrap();
    assert_eq!(loaded, table);
}

#[test]
fn fractional_values_round_trip() {
    let mut table = wght_wdth_table();
    table.axes[1].default_value = Fixed::from_f64(100.5);
    table.instances[1].coordinates[&Tag::new(b"wdth")] = Fixed::from_f64(87.25);
    let bytes = make_fvar_table(&table, &NameTable::new()).unwrap().to_bytes();
    let loaded = parse_fvar_table(FontData::new(&bytes), 0, &NameTable::new()).unwrap();
    assert_eq!(loaded.axes[1].default_value.to_f64(), 100.5);
    assert_eq!(loaded, table);
}

#[test]
fn coordinate_order_follows_axes() {
    let mut table = wght_wdth_table();
    table.instances[0].coordinates = coordinates(&[
        (b"wdth", Fixed::from_i32(100)),
        (b"wght", Fixed::from_i32(300)),
    ]);
    let bytes = make_fvar_table(&table, &NameTable::new()).unwrap().to_bytes();
    assert_eq!(bytes, test_data::SIMPLE);
}

#[test]
fn no_axes_or_instances() {
    let fvar = make_fvar_table(&VariationTable::default(), &NameTable::new()).unwrap();
    assert_eq!(fvar.size(), 16);
    assert_eq!(fvar.get("instanceSize").and_then(|v| v.to_u32()), Some(4));
}

#[test]
fn validation() {
    let mut table = wght_wdth_table();
    table.instances[0].coordinates.shift_remove(&Tag::new(b"wdth"));
    table.instances[1]
        .coordinates
        .insert(Tag::new(b"opsz"), Fixed::from_i32(12));
    table.instances[1].post_script_name_id = Some(NameId::new(0xFFFF));

    let report = make_fvar_table(&table, &NameTable::new()).unwrap_err();
    let messages = report.messages().collect::<Vec<_>>();
    assert_eq!(report.len(), 3, "{report}");
    assert!(messages.contains(&"no coordinate for axis 'wdth'"));
    assert!(messages.contains(&"coordinate for unknown axis 'opsz'"));
    assert!(report.to_string().contains("fvar.instances[1].post_script_name_id"));
}

#[test]
fn reserved_axis_names_are_still_written() {
    init();
    let mut table = wght_wdth_table();
    table.axes[0].axis_name_id = NameId::new(2);
    let fvar = make_fvar_table(&table, &font_names()).unwrap();
    assert_eq!(fvar.get("axisNameID_0"), Some(&2u16.into()));
}

#[test]
fn repeated_axis_tags_round_trip() {
    let mut bytes = test_data::SIMPLE.to_vec();
    bytes[36..40].copy_from_slice(b"wght");
    let table = parse_fvar_table(FontData::new(&bytes), 0, &NameTable::new()).unwrap();

    let fvar = make_fvar_table(&table, &NameTable::new()).unwrap();
    assert_eq!(fvar.get("axisTag_1"), Some(&Tag::new(b"wght").into()));
    assert_eq!(fvar.get("coordinate_1_0"), Some(&Fixed::from_i32(75).into()));
    assert_eq!(fvar.get("coordinate_1_1"), Some(&Fixed::from_i32(75).into()));

    // the repeated tag's single coordinate is written for both axes
    let rebuilt = fvar.to_bytes();
    assert_eq!(rebuilt.len(), bytes.len());
    let reparsed = parse_fvar_table(FontData::new(&rebuilt), 0, &NameTable::new()).unwrap();
    assert_eq!(reparsed, table);
}
