use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::error::{DecodeError, Result};
use super::rational::{GpsRational, Rational};
use super::registry::IfdKind;

/// TIFF field types a property record may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum TypeTag {
    /// 8-bit unsigned integer
    Byte,
    /// NUL-terminated 7-bit text
    Ascii,
    /// 16-bit unsigned integer
    Short,
    /// 32-bit unsigned integer
    Long,
    /// Two LONGs: numerator, denominator
    Rational,
    /// Opaque bytes, meaning depends on the tag
    Undefined,
    /// 32-bit signed integer
    SLong,
    /// Two SLONGs: numerator, denominator
    SRational,
}

impl TypeTag {
    /// The TIFF type code (1, 2, 3, 4, 5, 7, 9, 10).
    pub fn code(self) -> u16 {
        match self {
            Self::Byte => 1,
            Self::Ascii => 2,
            Self::Short => 3,
            Self::Long => 4,
            Self::Rational => 5,
            Self::Undefined => 7,
            Self::SLong => 9,
            Self::SRational => 10,
        }
    }

    /// Size in bytes of one value of this type.
    pub fn unit_size(self) -> usize {
        match self {
            Self::Byte | Self::Ascii | Self::Undefined => 1,
            Self::Short => 2,
            Self::Long | Self::SLong => 4,
            Self::Rational | Self::SRational => 8,
        }
    }
}

impl TryFrom<u16> for TypeTag {
    type Error = DecodeError;

    fn try_from(code: u16) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ascii),
            3 => Ok(Self::Short),
            4 => Ok(Self::Long),
            5 => Ok(Self::Rational),
            7 => Ok(Self::Undefined),
            9 => Ok(Self::SLong),
            10 => Ok(Self::SRational),
            other => Err(DecodeError::UnknownType(other)),
        }
    }
}

impl From<TypeTag> for u16 {
    fn from(tag: TypeTag) -> Self {
        tag.code()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "BYTE",
            Self::Ascii => "ASCII",
            Self::Short => "SHORT",
            Self::Long => "LONG",
            Self::Rational => "RATIONAL",
            Self::Undefined => "UNDEFINED",
            Self::SLong => "SLONG",
            Self::SRational => "SRATIONAL",
        };
        f.write_str(name)
    }
}

/// Byte order of multi-byte values inside a payload.
///
/// Records handed over by the host imaging API are little-endian; records
/// copied straight out of a Motorola-order (`MM`) TIFF stream are big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    // callers guarantee `buf` holds enough bytes
    pub(crate) fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Self::Little => LittleEndian::read_u16(buf),
            Self::Big => BigEndian::read_u16(buf),
        }
    }

    pub(crate) fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Self::Little => LittleEndian::read_u32(buf),
            Self::Big => BigEndian::read_u32(buf),
        }
    }

    pub(crate) fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Self::Little => LittleEndian::read_i32(buf),
            Self::Big => BigEndian::read_i32(buf),
        }
    }
}

/// One raw tag entry as supplied by whatever extracted it from the image.
///
/// `ifd` is an optional namespace hint. Without it a record matches every
/// registry entry sharing its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPropertyRecord {
    pub id: u16,
    #[serde(rename = "type")]
    pub kind: TypeTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifd: Option<IfdKind>,
    #[serde(deserialize_with = "deserialize_bytes")]
    pub bytes: Vec<u8>,
}

impl RawPropertyRecord {
    pub fn new(id: u16, kind: TypeTag, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            kind,
            ifd: None,
            bytes: bytes.into(),
        }
    }

    /// Attach a namespace hint.
    pub fn in_ifd(mut self, ifd: IfdKind) -> Self {
        self.ifd = Some(ifd);
        self
    }

    /// Whether this record may supply the value for `(ifd, id)`.
    pub fn matches(&self, ifd: IfdKind, id: u16) -> bool {
        self.id == id && self.ifd.is_none_or(|hint| hint == ifd)
    }
}

/// Accept either an integer array or a hex string.
fn deserialize_bytes<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bytes {
        List(Vec<u8>),
        Hex(String),
    }

    match Bytes::deserialize(deserializer)? {
        Bytes::List(v) => Ok(v),
        Bytes::Hex(s) => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            hex::decode(compact).map_err(serde::de::Error::custom)
        }
    }
}

/// Typed view over a record payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Payload<'a> {
    bytes: &'a [u8],
    endian: Endian,
    kind: TypeTag,
}

impl<'a> Payload<'a> {
    pub(crate) fn new(bytes: &'a [u8], endian: Endian, kind: TypeTag) -> Self {
        Self {
            bytes,
            endian,
            kind,
        }
    }

    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub(crate) fn endian(&self) -> Endian {
        self.endian
    }

    pub(crate) fn require(&self, needed: usize) -> Result<()> {
        if self.bytes.len() < needed {
            return Err(DecodeError::Truncated {
                kind: self.kind,
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn first_byte(&self) -> Result<u8> {
        self.require(1)?;
        Ok(self.bytes[0])
    }

    pub(crate) fn first_u16(&self) -> Result<u16> {
        self.require(2)?;
        Ok(self.endian.read_u16(self.bytes))
    }

    pub(crate) fn first_u32(&self) -> Result<u32> {
        self.require(4)?;
        Ok(self.endian.read_u32(self.bytes))
    }

    pub(crate) fn first_i32(&self) -> Result<i32> {
        self.require(4)?;
        Ok(self.endian.read_i32(self.bytes))
    }

    fn signed(&self) -> bool {
        self.kind == TypeTag::SRational
    }

    pub(crate) fn rational(&self) -> Result<Rational> {
        self.require(8)?;
        Rational::from_bytes(self.bytes, self.endian, self.signed())
    }

    pub(crate) fn gps_triple(&self) -> Result<GpsRational> {
        self.require(24)?;
        GpsRational::from_bytes(self.bytes, self.endian, self.signed())
    }

    /// Payload as text with leading and trailing NULs removed.
    pub(crate) fn text(&self) -> String {
        trim_nul(&String::from_utf8_lossy(self.bytes)).to_string()
    }
}

pub(crate) fn trim_nul(s: &str) -> &str {
    s.trim_matches('\0')
}
