use exif_decode::exif::{
    CollectionBuilder, Decoder, Endian, IfdKind, RawPropertyRecord, TagCollection, TagKey,
    TagRegistry, TypeTag, decode, parse_records,
};

fn exif(id: u16) -> TagKey {
    TagKey::new(IfdKind::Exif, id)
}

fn gps(id: u16) -> TagKey {
    TagKey::new(IfdKind::Gps, id)
}

fn rational_le(n: u32, d: u32) -> Vec<u8> {
    let mut out = n.to_le_bytes().to_vec();
    out.extend_from_slice(&d.to_le_bytes());
    out
}

fn srational_le(n: i32, d: i32) -> Vec<u8> {
    let mut out = n.to_le_bytes().to_vec();
    out.extend_from_slice(&d.to_le_bytes());
    out
}

fn camera_records() -> Vec<RawPropertyRecord> {
    vec![
        RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"NIKON\0".to_vec()),
        RawPropertyRecord::new(0x829A, TypeTag::Rational, rational_le(1, 500)),
        RawPropertyRecord::new(0x8827, TypeTag::Short, vec![200, 0]),
        RawPropertyRecord::new(0x9201, TypeTag::SRational, srational_le(897, 100)),
        RawPropertyRecord::new(0xA300, TypeTag::Undefined, vec![3]),
        RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"N\0".to_vec()).in_ifd(IfdKind::Gps),
    ]
}

// ── build ────────────────────────────────────────────────────────────

#[test]
fn collection_size_matches_registry() {
    let registry = TagRegistry::standard();
    assert_eq!(TagCollection::build(&[]).len(), registry.len());
    assert_eq!(TagCollection::build(&camera_records()).len(), registry.len());
}

#[test]
fn empty_input_yields_empty_values() {
    let tags = TagCollection::build(&[]);
    assert!(tags.iter().all(|t| t.value.is_empty()));
    assert_eq!(tags.present().count(), 0);
}

#[test]
fn collection_follows_registry_order() {
    let tags = TagCollection::build(&camera_records());
    let keys: Vec<_> = tags.iter().map(|t| t.key()).collect();
    let expected: Vec<_> = TagRegistry::standard().iter().map(|d| d.key()).collect();
    assert_eq!(keys, expected);
}

#[test]
fn camera_values() {
    let tags = TagCollection::build(&camera_records());
    assert_eq!(tags.value(TagKey::new(IfdKind::Image, 0x010F)), Some("NIKON"));
    assert_eq!(tags.value(exif(0x829A)), Some("1/500 sec"));
    assert_eq!(tags.value(exif(0x8827)), Some("ISO-200"));
    assert_eq!(tags.value(exif(0x9201)), Some("1/501.46"));
    assert_eq!(tags.value(exif(0xA300)), Some("DSC"));
    assert_eq!(tags.value(gps(0x0001)), Some("North latitude"));
}

#[test]
fn build_is_deterministic() {
    let records = camera_records();
    let first = TagCollection::build(&records);
    let second = TagCollection::build(&records);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn truncated_payload_only_empties_its_tag() {
    let mut records = camera_records();
    records.push(RawPropertyRecord::new(0x829D, TypeTag::Rational, vec![1, 0, 0]));

    let tags = TagCollection::build(&records);
    assert_eq!(tags.get(exif(0x829D)).unwrap().value, "");
    assert_eq!(tags.value(exif(0x829D)), None);
    assert_eq!(tags.value(exif(0x8827)), Some("ISO-200"));
    assert_eq!(tags.present().count(), 6);
}

#[test]
fn first_non_empty_match_wins() {
    let records = vec![
        RawPropertyRecord::new(0x010F, TypeTag::Ascii, vec![0]),
        RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Canon\0".to_vec()),
        RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Sony\0".to_vec()),
    ];
    let tags = TagCollection::build(&records);
    assert_eq!(tags.value(TagKey::new(IfdKind::Image, 0x010F)), Some("Canon"));
}

#[test]
fn ifd_hint_keeps_colliding_ids_apart() {
    // 0x0001 is InteroperabilityIndex and GPSLatitudeRef
    let records = vec![
        RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"R98\0".to_vec()).in_ifd(IfdKind::Interop),
        RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"S\0".to_vec()).in_ifd(IfdKind::Gps),
    ];
    let tags = TagCollection::build(&records);
    assert_eq!(tags.value(TagKey::new(IfdKind::Interop, 0x0001)), Some("R98"));
    assert_eq!(tags.value(gps(0x0001)), Some("South latitude"));
}

#[test]
fn big_endian_builder() {
    let records = vec![RawPropertyRecord::new(0x8827, TypeTag::Short, vec![0, 100])];
    let tags = CollectionBuilder::new(TagRegistry::standard(), Decoder::new(Endian::Big))
        .build(&records);
    assert_eq!(tags.value(exif(0x8827)), Some("ISO-100"));
}

#[test]
fn bare_id_lookup_prefers_gps() {
    let records = vec![RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"S\0".to_vec())];
    let tags = TagCollection::build(&records);
    let tag = tags.get_by_id(0x0001).unwrap();
    assert_eq!(tag.key(), gps(0x0001));
    assert_eq!(tag.value, "South latitude");
}

// ── decode ───────────────────────────────────────────────────────────

#[test]
fn decode_examples() {
    assert_eq!(decode(0x0000, TypeTag::Byte, &[1, 2, 0, 0]).unwrap(), "Version 1.2");
    assert_eq!(decode(0x0001, TypeTag::Ascii, b"X\0").unwrap(), "reserved");
    assert_eq!(decode(0xA300, TypeTag::Undefined, &[0]).unwrap(), "reserved");
}

#[test]
fn decode_coded_phrases() {
    let time = [(14u32, 1u32), (3, 1), (9, 1)]
        .iter()
        .flat_map(|&(n, d)| rational_le(n, d))
        .collect::<Vec<_>>();
    assert_eq!(decode(0x0007, TypeTag::Rational, &time).unwrap(), "14° 3' 9\"");
    assert_eq!(decode(0x9208, TypeTag::Short, &[5, 0]).unwrap(), "other light source");
    assert_eq!(decode(0x0213, TypeTag::Short, &[6, 0]).unwrap(), "co-sited");
    assert_eq!(decode(0xA217, TypeTag::Short, &[6, 0]).unwrap(), " reserved");
    assert_eq!(decode(0x0005, TypeTag::Byte, &[2]).unwrap(), "2");
    assert_eq!(decode(0x0019, TypeTag::Ascii, b"M\0").unwrap(), "Miles per hour");
    assert_eq!(decode(0x0102, TypeTag::Short, &[8, 0, 8, 0, 8, 0]).unwrap(), "8");
}

#[test]
fn decode_truncated_is_an_error() {
    assert!(decode(0x829A, TypeTag::Rational, &[1, 0, 0, 0]).is_err());
    assert!(decode(0x8827, TypeTag::Short, &[]).is_err());
}

// ── dumps ────────────────────────────────────────────────────────────

#[test]
fn dump_to_collection_with_gps() {
    let json = r#"{
        "byte_order": "little",
        "records": [
            {"id": 1, "type": 2, "ifd": "gps", "bytes": "5300"},
            {"id": 2, "type": 5, "ifd": "gps", "bytes": [
                33,0,0,0, 1,0,0,0,  30,0,0,0, 1,0,0,0,  0,0,0,0, 1,0,0,0
            ]},
            {"id": 3, "type": 2, "ifd": "gps", "bytes": "5700"},
            {"id": 4, "type": 5, "ifd": "gps", "bytes": [
                70,0,0,0, 1,0,0,0,  15,0,0,0, 1,0,0,0,  0,0,0,0, 1,0,0,0
            ]}
        ]
    }"#;
    let set = parse_records(json).unwrap();
    let decoder = Decoder::new(set.byte_order.unwrap_or_default());
    let tags = CollectionBuilder::new(TagRegistry::standard(), decoder).build(&set.records);

    let coords = tags.gps_coordinates().unwrap();
    assert_eq!(coords.latitude, -33.5);
    assert_eq!(coords.longitude, -70.25);
}
