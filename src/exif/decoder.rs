//! Turns a typed property payload into display text.
//!
//! Dispatch is two-level: the declared [`TypeTag`] picks a decode function,
//! which then asks a per-type rule table whether the [`TagKey`] has a
//! specialised format. Keys without a rule get the type's default rendering.

use std::f64::consts::SQRT_2;

use super::error::Result;
use super::rational::round_to;
use super::record::{Endian, Payload, RawPropertyRecord, TypeTag, trim_nul};
use super::registry::{IfdKind, TagKey, TagRegistry};
use super::tables::{self, CodeTable};

/// Stateless payload decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    endian: Endian,
}

impl Decoder {
    pub fn new(endian: Endian) -> Self {
        Self { endian }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Decode `bytes`, declared as `kind`, as the value of tag `key`.
    pub fn decode(&self, key: TagKey, kind: TypeTag, bytes: &[u8]) -> Result<String> {
        let payload = Payload::new(bytes, self.endian, kind);
        match kind {
            TypeTag::Byte => decode_byte(key, &payload),
            TypeTag::Ascii => Ok(decode_ascii(key, &payload)),
            TypeTag::Short => decode_short(key, &payload),
            TypeTag::Long => Ok(payload.first_u32()?.to_string()),
            TypeTag::Rational => decode_rational(key, &payload),
            TypeTag::Undefined => decode_undefined(key, &payload),
            TypeTag::SLong => Ok(payload.first_i32()?.to_string()),
            TypeTag::SRational => decode_srational(key, &payload),
        }
    }

    /// Decode against a bare tag id, resolved through the standard registry
    /// (for colliding ids the GPS namespace wins). Unknown ids decode with
    /// the type defaults.
    pub fn decode_id(&self, id: u16, kind: TypeTag, bytes: &[u8]) -> Result<String> {
        let key = TagRegistry::standard()
            .resolve(id)
            .map(|d| d.key())
            .unwrap_or(TagKey::new(IfdKind::Image, id));
        self.decode(key, kind, bytes)
    }

    pub fn decode_record(&self, key: TagKey, record: &RawPropertyRecord) -> Result<String> {
        self.decode(key, record.kind, &record.bytes)
    }
}

/// Decode with little-endian payloads and bare-id resolution.
pub fn decode(id: u16, kind: TypeTag, bytes: &[u8]) -> Result<String> {
    Decoder::default().decode_id(id, kind, bytes)
}

// ── BYTE ─────────────────────────────────────────────────────────────

fn decode_byte(key: TagKey, p: &Payload<'_>) -> Result<String> {
    let bytes = p.bytes();
    if bytes.len() == 4 {
        return Ok(format!("Version {}.{}", bytes[0], bytes[1]));
    }

    let value = p.first_byte()?;
    Ok(match (key.ifd, key.id) {
        // GPSAltitudeRef; other codes stay numeric
        (IfdKind::Gps, 0x0005) if value == 0 => "Sea level".to_string(),
        _ => value.to_string(),
    })
}

// ── ASCII ────────────────────────────────────────────────────────────

fn ascii_table(key: TagKey) -> Option<&'static CodeTable<&'static str>> {
    if key.ifd != IfdKind::Gps {
        return None;
    }
    match key.id {
        0x0001 | 0x0013 => Some(&tables::LATITUDE_REF),
        0x0003 | 0x0015 => Some(&tables::LONGITUDE_REF),
        0x0009 => Some(&tables::GPS_STATUS),
        0x000A => Some(&tables::GPS_MEASURE_MODE),
        0x000C | 0x0019 => Some(&tables::SPEED_UNIT),
        0x000E | 0x0010 | 0x0017 => Some(&tables::DIRECTION_REF),
        _ => None,
    }
}

fn decode_ascii(key: TagKey, p: &Payload<'_>) -> String {
    let text = p.text();
    match ascii_table(key) {
        Some(table) => table.lookup_text(&text).to_string(),
        None => text,
    }
}

// ── SHORT ────────────────────────────────────────────────────────────

enum ShortRule {
    Table(&'static CodeTable<u16>),
    Format(fn(u16) -> String),
}

fn short_rule(key: TagKey) -> Option<ShortRule> {
    use IfdKind::{Exif, Gps, Image};
    use ShortRule::{Format, Table};

    let rule = match (key.ifd, key.id) {
        (Image, 0x0103) => Table(&tables::COMPRESSION),
        (Image, 0x0106) => Table(&tables::PHOTOMETRIC_INTERPRETATION),
        (Image, 0x0112) => Table(&tables::ORIENTATION),
        (Image, 0x011C) => Table(&tables::PLANAR_CONFIGURATION),
        (Image, 0x0128) => Table(&tables::RESOLUTION_UNIT),
        (Image, 0x0213) => Table(&tables::YCBCR_POSITIONING),
        (Exif, 0x8822) => Table(&tables::EXPOSURE_PROGRAM),
        (Exif, 0x8827) => Format(|v| format!("ISO-{v}")),
        (Exif, 0x9207) => Table(&tables::METERING_MODE),
        (Exif, 0x9208) => Table(&tables::LIGHT_SOURCE),
        (Exif, 0x9209) => Table(&tables::FLASH),
        (Exif, 0xA001) => Table(&tables::COLOR_SPACE),
        (Exif, 0xA210) => Table(&tables::RESOLUTION_UNIT),
        (Exif, 0xA217) => Table(&tables::SENSING_METHOD),
        (Exif, 0xA401) => Table(&tables::CUSTOM_RENDERED),
        (Exif, 0xA402) => Table(&tables::EXPOSURE_MODE),
        (Exif, 0xA403) => Table(&tables::WHITE_BALANCE),
        (Exif, 0xA405) => Format(|v| format!("{v} mm")),
        (Exif, 0xA406) => Table(&tables::SCENE_CAPTURE_TYPE),
        (Exif, 0xA407) => Table(&tables::GAIN_CONTROL),
        (Exif, 0xA408) => Table(&tables::CONTRAST),
        (Exif, 0xA409) => Table(&tables::SATURATION),
        (Exif, 0xA40A) => Table(&tables::SHARPNESS),
        (Exif, 0xA40C) => Table(&tables::SUBJECT_DISTANCE_RANGE),
        (Gps, 0x001E) => Table(&tables::GPS_DIFFERENTIAL),
        _ => return None,
    };
    Some(rule)
}

fn decode_short(key: TagKey, p: &Payload<'_>) -> Result<String> {
    let value = p.first_u16()?;
    Ok(match short_rule(key) {
        Some(ShortRule::Table(table)) => table.lookup(value).to_string(),
        Some(ShortRule::Format(format)) => format(value),
        None => value.to_string(),
    })
}

// ── RATIONAL ─────────────────────────────────────────────────────────

enum RationalRule {
    /// Needs the quotient; a zero denominator falls back to the ratio text
    Scalar(fn(f64) -> String),
    ExposureTime,
    DigitalZoom,
    DecimalDegrees,
    DegreesMinutesSeconds,
}

fn aperture(apex: f64) -> String {
    format!("F/{}", round_to(SQRT_2.powf(apex), 2))
}

fn rational_rule(key: TagKey) -> Option<RationalRule> {
    use IfdKind::{Exif, Gps, Image};
    use RationalRule::*;

    let rule = match (key.ifd, key.id) {
        (Image, 0x011A | 0x011B) => Scalar(|v| v.to_string()),
        (Exif, 0x829A) => ExposureTime,
        (Exif, 0x829D) => Scalar(|v| format!("F/{v}")),
        (Exif, 0x9202 | 0x9205) => Scalar(aperture),
        (Exif, 0x920A) => Scalar(|v| format!("{v} mm")),
        (Exif, 0xA404) => DigitalZoom,
        (Gps, 0x0002 | 0x0004) => DecimalDegrees,
        (Gps, 0x0006) => Scalar(|v| format!("{v} meters")),
        (Gps, 0x000B | 0x000D | 0x000F | 0x0011 | 0x0018 | 0x001A) => Scalar(|v| v.to_string()),
        (Gps, 0x0007 | 0x0014 | 0x0016) => DegreesMinutesSeconds,
        _ => return None,
    };
    Some(rule)
}

fn decode_rational(key: TagKey, p: &Payload<'_>) -> Result<String> {
    let Some(rule) = rational_rule(key) else {
        return Ok(p.rational()?.to_string());
    };

    match rule {
        RationalRule::Scalar(format) => {
            let r = p.rational()?;
            Ok(match r.checked_f64() {
                Ok(v) => format(v),
                Err(_) => r.to_string(),
            })
        }
        RationalRule::ExposureTime => Ok(format!("{} sec", p.rational()?)),
        RationalRule::DigitalZoom => {
            let r = p.rational()?;
            if r.numerator == 0 {
                return Ok("none".to_string());
            }
            Ok(match r.checked_f64() {
                Ok(v) => v.to_string(),
                Err(_) => r.to_string(),
            })
        }
        RationalRule::DecimalDegrees => {
            let g = p.gps_triple()?;
            Ok(match g.to_decimal_degrees() {
                Ok(v) => v.to_string(),
                Err(_) => g.to_string(),
            })
        }
        RationalRule::DegreesMinutesSeconds => Ok(p.gps_triple()?.to_string()),
    }
}

// ── SRATIONAL ────────────────────────────────────────────────────────

fn srational_rule(key: TagKey) -> Option<fn(f64) -> String> {
    if key.ifd != IfdKind::Exif {
        return None;
    }
    match key.id {
        // ShutterSpeedValue (APEX)
        0x9201 => Some(|v| format!("1/{}", round_to(2f64.powf(v), 2))),
        // BrightnessValue
        0x9203 => Some(|v| round_to(v, 4).to_string()),
        // ExposureBiasValue
        0x9204 => Some(|v| format!("{} eV", round_to(v, 2))),
        _ => None,
    }
}

fn decode_srational(key: TagKey, p: &Payload<'_>) -> Result<String> {
    let r = p.rational()?;
    let Some(format) = srational_rule(key) else {
        return Ok(r.to_string());
    };

    Ok(match r.checked_f64() {
        Ok(v) => format(v),
        Err(_) => r.to_string(),
    })
}

// ── UNDEFINED ────────────────────────────────────────────────────────

enum UndefinedRule {
    Table(&'static CodeTable<u8>),
    Text,
    Comment,
    Components,
    Flashpix,
}

fn undefined_rule(key: TagKey) -> Option<UndefinedRule> {
    use IfdKind::{Exif, Gps, Interop};
    use UndefinedRule::*;

    let rule = match (key.ifd, key.id) {
        (Exif, 0x9000) => Text,
        (Exif, 0x9101) => Components,
        (Exif, 0x927C) => Text,
        (Exif, 0x9286) => Comment,
        (Exif, 0xA000) => Flashpix,
        (Exif, 0xA300) => Table(&tables::FILE_SOURCE),
        (Exif, 0xA301) => Table(&tables::SCENE_TYPE),
        (Gps, 0x001B | 0x001C) => Comment,
        (Interop, 0x0002) => Text,
        _ => return None,
    };
    Some(rule)
}

fn decode_undefined(key: TagKey, p: &Payload<'_>) -> Result<String> {
    let Some(rule) = undefined_rule(key) else {
        return Ok("-".to_string());
    };

    Ok(match rule {
        UndefinedRule::Table(table) => table.lookup(p.first_byte()?).to_string(),
        UndefinedRule::Text => p.text(),
        UndefinedRule::Comment => comment_text(p),
        UndefinedRule::Components => p
            .bytes()
            .iter()
            .map(|&b| tables::COMPONENTS.get(b as usize).copied().unwrap_or("?"))
            .collect(),
        UndefinedRule::Flashpix => tables::FLASHPIX_VERSION.lookup_text(&p.text()).to_string(),
    })
}

/// Text fields led by an 8-byte character code (UserComment, GPS
/// processing method, GPS area information).
fn comment_text(p: &Payload<'_>) -> String {
    let bytes = p.bytes();
    if bytes.len() < 8 {
        return p.text();
    }

    let (code, body) = bytes.split_at(8);
    match code {
        b"ASCII\0\0\0" | b"JIS\0\0\0\0\0" | [0, 0, 0, 0, 0, 0, 0, 0] => {
            trim_nul(&String::from_utf8_lossy(body)).to_string()
        }
        b"UNICODE\0" => {
            let endian = p.endian();
            let units: Vec<u16> = body.chunks_exact(2).map(|c| endian.read_u16(c)).collect();
            trim_nul(&String::from_utf16_lossy(&units)).to_string()
        }
        _ => p.text(),
    }
}
