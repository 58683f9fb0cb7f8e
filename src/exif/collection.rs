//! Registry-driven assembly of decoded tags.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::decoder::Decoder;
use super::record::RawPropertyRecord;
use super::registry::{IfdKind, TagDescriptor, TagKey, TagRegistry};

/// A registry entry paired with its decoded value (empty when absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTag {
    #[serde(flatten)]
    pub descriptor: TagDescriptor,
    pub value: String,
}

impl DecodedTag {
    pub fn new(descriptor: TagDescriptor, value: impl Into<String>) -> Self {
        Self {
            descriptor,
            value: value.into(),
        }
    }

    pub fn key(&self) -> TagKey {
        self.descriptor.key()
    }

    pub fn id(&self) -> u16 {
        self.descriptor.id
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn description(&self) -> &'static str {
        self.descriptor.description
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

impl fmt::Display for DecodedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) = {}",
            self.descriptor.description, self.descriptor.name, self.value
        )
    }
}

/// Signed decimal coordinates derived from the GPS tags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoords {
    pub latitude: f64,
    pub longitude: f64,
}

/// One [`DecodedTag`] per registry entry, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagCollection {
    tags: Vec<DecodedTag>,
    #[serde(skip)]
    index: HashMap<TagKey, usize>,
}

impl TagCollection {
    /// Decode `records` against the standard registry with little-endian
    /// payloads.
    pub fn build(records: &[RawPropertyRecord]) -> Self {
        CollectionBuilder::new(TagRegistry::standard(), Decoder::default()).build(records)
    }

    fn push(&mut self, tag: DecodedTag) {
        self.index.insert(tag.key(), self.tags.len());
        self.tags.push(tag);
    }

    pub fn get(&self, key: TagKey) -> Option<&DecodedTag> {
        self.index.get(&key).map(|&pos| &self.tags[pos])
    }

    /// Tag for a bare id. Colliding ids resolve like
    /// [`TagRegistry::resolve`]: the last-registered entry wins.
    pub fn get_by_id(&self, id: u16) -> Option<&DecodedTag> {
        self.tags.iter().rev().find(|t| t.id() == id)
    }

    /// Value for `key`, `None` when the tag is unknown or empty.
    pub fn value(&self, key: TagKey) -> Option<&str> {
        self.get(key)
            .filter(|t| t.has_value())
            .map(|t| t.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedTag> {
        self.tags.iter()
    }

    /// Tags that received a value.
    pub fn present(&self) -> impl Iterator<Item = &DecodedTag> {
        self.tags.iter().filter(|t| t.has_value())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Latitude/longitude in signed decimal degrees, south and west negative.
    ///
    /// Only available when both coordinates decoded to decimal degrees.
    pub fn gps_coordinates(&self) -> Option<GpsCoords> {
        let latitude = self.signed_coordinate(0x0002, 0x0001, "South latitude")?;
        let longitude = self.signed_coordinate(0x0004, 0x0003, "West longitude")?;
        Some(GpsCoords {
            latitude,
            longitude,
        })
    }

    fn signed_coordinate(&self, value_id: u16, ref_id: u16, negative: &str) -> Option<f64> {
        let value: f64 = self
            .value(TagKey::new(IfdKind::Gps, value_id))?
            .parse()
            .ok()?;
        match self.value(TagKey::new(IfdKind::Gps, ref_id)) {
            Some(r) if r == negative => Some(-value),
            _ => Some(value),
        }
    }
}

impl<'a> IntoIterator for &'a TagCollection {
    type Item = &'a DecodedTag;
    type IntoIter = std::slice::Iter<'a, DecodedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl IntoIterator for TagCollection {
    type Item = DecodedTag;
    type IntoIter = std::vec::IntoIter<DecodedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

/// Walks a registry and fills each entry from the matching records.
#[derive(Debug, Clone, Copy)]
pub struct CollectionBuilder<'r> {
    registry: &'r TagRegistry,
    decoder: Decoder,
}

impl<'r> CollectionBuilder<'r> {
    pub fn new(registry: &'r TagRegistry, decoder: Decoder) -> Self {
        Self { registry, decoder }
    }

    /// Build the collection. Never fails: a tag whose records are missing or
    /// undecodable is kept with an empty value.
    pub fn build(&self, records: &[RawPropertyRecord]) -> TagCollection {
        let mut collection = TagCollection {
            tags: Vec::with_capacity(self.registry.len()),
            index: HashMap::with_capacity(self.registry.len()),
        };

        for desc in self.registry {
            let value = self.value_for(desc, records);
            collection.push(DecodedTag::new(*desc, value));
        }

        log::debug!(
            "Decoded {} of {} tags from {} records",
            collection.present().count(),
            collection.len(),
            records.len()
        );
        collection
    }

    /// First non-empty decoding among the records matching `desc`.
    fn value_for(&self, desc: &TagDescriptor, records: &[RawPropertyRecord]) -> String {
        for record in records.iter().filter(|r| r.matches(desc.ifd, desc.id)) {
            match self.decoder.decode_record(desc.key(), record) {
                Ok(value) if !value.is_empty() => return value,
                Ok(_) => {}
                Err(e) => log::debug!("{} ({}): {e}", desc.name, desc.key()),
            }
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::record::{Endian, TypeTag};

    fn rat(pairs: &[(u32, u32)]) -> Vec<u8> {
        pairs
            .iter()
            .flat_map(|&(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
            .collect()
    }

    fn exif(id: u16) -> TagKey {
        TagKey::new(IfdKind::Exif, id)
    }

    fn gps(id: u16) -> TagKey {
        TagKey::new(IfdKind::Gps, id)
    }

    // ── size invariant ───────────────────────────────────────────────

    #[test]
    fn empty_input_fills_every_tag_with_empty_value() {
        let c = TagCollection::build(&[]);
        assert_eq!(c.len(), TagRegistry::standard().len());
        assert!(c.iter().all(|t| t.value.is_empty()));
        assert_eq!(c.present().count(), 0);
    }

    #[test]
    fn unknown_records_do_not_add_entries() {
        let records = vec![
            RawPropertyRecord::new(0xBEEF, TypeTag::Short, vec![1, 0]),
            RawPropertyRecord::new(0xCAFE, TypeTag::Ascii, b"x\0".to_vec()),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.len(), TagRegistry::standard().len());
        assert_eq!(c.present().count(), 0);
    }

    #[test]
    fn order_follows_registry() {
        let c = TagCollection::build(&[]);
        let keys: Vec<TagKey> = c.iter().map(|t| t.key()).collect();
        let expected: Vec<TagKey> = TagRegistry::standard().iter().map(|d| d.key()).collect();
        assert_eq!(keys, expected);
    }

    // ── matching ─────────────────────────────────────────────────────

    #[test]
    fn decodes_matching_records() {
        let records = vec![
            RawPropertyRecord::new(0x829A, TypeTag::Rational, rat(&[(1, 500)])),
            RawPropertyRecord::new(0x8827, TypeTag::Short, vec![200, 0]),
            RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Canon\0".to_vec()),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.value(exif(0x829A)), Some("1/500 sec"));
        assert_eq!(c.value(exif(0x8827)), Some("ISO-200"));
        assert_eq!(c.get_by_id(0x010F).unwrap().value, "Canon");
        assert_eq!(c.present().count(), 3);
    }

    #[test]
    fn first_non_empty_match_wins() {
        let records = vec![
            RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"\0".to_vec()),
            RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Nikon\0".to_vec()),
            RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Canon\0".to_vec()),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.get_by_id(0x010F).unwrap().value, "Nikon");
    }

    #[test]
    fn failed_record_does_not_hide_later_match() {
        let records = vec![
            RawPropertyRecord::new(0x829A, TypeTag::Rational, vec![1, 0]),
            RawPropertyRecord::new(0x829A, TypeTag::Rational, rat(&[(1, 60)])),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.value(exif(0x829A)), Some("1/60 sec"));
    }

    #[test]
    fn truncated_payload_only_empties_its_tag() {
        let records = vec![
            RawPropertyRecord::new(0x829A, TypeTag::Rational, vec![1, 0, 0]),
            RawPropertyRecord::new(0x8827, TypeTag::Short, vec![100, 0]),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.get(exif(0x829A)).unwrap().value, "");
        assert_eq!(c.value(exif(0x8827)), Some("ISO-100"));
        assert_eq!(c.len(), TagRegistry::standard().len());
    }

    #[test]
    fn bare_id_matches_every_namespace() {
        let records = vec![RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"R98\0".to_vec())];
        let c = TagCollection::build(&records);
        assert_eq!(c.value(TagKey::new(IfdKind::Interop, 0x0001)), Some("R98"));
        assert_eq!(c.value(gps(0x0001)), Some("reserved"));
    }

    #[test]
    fn get_by_id_agrees_with_registry_resolution() {
        let c = TagCollection::build(&[]);
        assert_eq!(c.get_by_id(0x0001).unwrap().name(), "GPSLatitudeRef");
        assert_eq!(
            c.get_by_id(0x0001).map(|t| t.key()),
            TagRegistry::standard().resolve(0x0001).map(|d| d.key())
        );
        assert_eq!(c.get_by_id(0x010F).unwrap().name(), "Make");
        assert!(c.get_by_id(0xBEEF).is_none());
    }

    #[test]
    fn namespace_hint_scopes_the_match() {
        let records = vec![
            RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"R98\0".to_vec()).in_ifd(IfdKind::Interop),
            RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"N\0".to_vec()).in_ifd(IfdKind::Gps),
        ];
        let c = TagCollection::build(&records);
        assert_eq!(c.value(TagKey::new(IfdKind::Interop, 0x0001)), Some("R98"));
        assert_eq!(c.value(gps(0x0001)), Some("North latitude"));
    }

    #[test]
    fn builder_uses_decoder_byte_order() {
        let records = vec![RawPropertyRecord::new(0x8827, TypeTag::Short, vec![0, 200])];
        let c = CollectionBuilder::new(TagRegistry::standard(), Decoder::new(Endian::Big)).build(&records);
        assert_eq!(c.value(exif(0x8827)), Some("ISO-200"));
    }

    #[test]
    fn custom_registry() {
        let registry = TagRegistry::new([TagDescriptor::new(IfdKind::Exif, 0x8827, "ISO", "Speed")]);
        let records = vec![RawPropertyRecord::new(0x8827, TypeTag::Short, vec![50, 0])];
        let c = CollectionBuilder::new(&registry, Decoder::default()).build(&records);
        assert_eq!(c.len(), 1);
        assert_eq!(c.iter().next().unwrap().to_string(), "Speed (ISO) = ISO-50");
    }

    #[test]
    fn build_is_deterministic() {
        let records = vec![
            RawPropertyRecord::new(0x829A, TypeTag::Rational, rat(&[(1, 500)])),
            RawPropertyRecord::new(0x0002, TypeTag::Rational, rat(&[(48, 1), (30, 1), (0, 1)])),
        ];
        assert_eq!(TagCollection::build(&records), TagCollection::build(&records));
    }

    // ── rendering ────────────────────────────────────────────────────

    #[test]
    fn display_format() {
        let c = TagCollection::build(&[RawPropertyRecord::new(0x829A, TypeTag::Rational, rat(&[(1, 500)]))]);
        let tag = c.get(exif(0x829A)).unwrap();
        assert_eq!(tag.to_string(), "Exposure time (ExposureTime) = 1/500 sec");
    }

    #[test]
    fn serializes_as_flat_list() {
        let c = TagCollection::build(&[RawPropertyRecord::new(0x8827, TypeTag::Short, vec![200, 0])]);
        let json = serde_json::to_value(&c).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), c.len());
        let iso = arr.iter().find(|t| t["name"] == "ISOSpeedRatings").unwrap();
        assert_eq!(iso["ifd"], "exif");
        assert_eq!(iso["id"], 0x8827);
        assert_eq!(iso["value"], "ISO-200");
    }

    // ── gps_coordinates ──────────────────────────────────────────────

    #[test]
    fn gps_coordinates_signed_by_reference() {
        let records = vec![
            RawPropertyRecord::new(0x0001, TypeTag::Ascii, b"S\0".to_vec()),
            RawPropertyRecord::new(0x0002, TypeTag::Rational, rat(&[(33, 1), (30, 1), (0, 1)])),
            RawPropertyRecord::new(0x0003, TypeTag::Ascii, b"W\0".to_vec()),
            RawPropertyRecord::new(0x0004, TypeTag::Rational, rat(&[(70, 1), (15, 1), (0, 1)])),
        ];
        let coords = TagCollection::build(&records).gps_coordinates().unwrap();
        assert_eq!(coords.latitude, -33.5);
        assert_eq!(coords.longitude, -70.25);
    }

    #[test]
    fn gps_coordinates_default_to_positive() {
        let records = vec![
            RawPropertyRecord::new(0x0002, TypeTag::Rational, rat(&[(48, 1), (30, 1), (0, 1)])),
            RawPropertyRecord::new(0x0004, TypeTag::Rational, rat(&[(2, 1), (15, 1), (0, 1)])),
        ];
        let coords = TagCollection::build(&records).gps_coordinates().unwrap();
        assert_eq!(coords, GpsCoords { latitude: 48.5, longitude: 2.25 });
    }

    #[test]
    fn gps_coordinates_need_both_axes() {
        let records = vec![RawPropertyRecord::new(0x0002, TypeTag::Rational, rat(&[(48, 1), (30, 1), (0, 1)]))];
        assert!(TagCollection::build(&records).gps_coordinates().is_none());
    }
}
