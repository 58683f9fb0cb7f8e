//! The table of known tags, scoped by IFD.
//!
//! GPS and Interoperability tag ids are small integers that collide with each
//! other (`0x0001` is both `GPSLatitudeRef` and `InteroperabilityIndex`), so
//! every descriptor carries the IFD it belongs to and is keyed by
//! [`TagKey`] rather than the bare id.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The IFD a tag lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IfdKind {
    /// IFD0, the primary image directory
    Image,
    /// Exif private sub-IFD
    Exif,
    /// Interoperability sub-IFD
    Interop,
    /// GPS sub-IFD
    Gps,
}

impl IfdKind {
    /// Heading used when listing tags by section.
    pub fn title(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Exif => "Exif",
            Self::Interop => "Interoperability",
            Self::Gps => "GPS",
        }
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Namespace-qualified tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagKey {
    pub ifd: IfdKind,
    pub id: u16,
}

impl TagKey {
    pub const fn new(ifd: IfdKind, id: u16) -> Self {
        Self { ifd, id }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{:04X}", self.ifd, self.id)
    }
}

/// A known tag: where it lives, what it is called, what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagDescriptor {
    pub ifd: IfdKind,
    pub id: u16,
    pub name: &'static str,
    pub description: &'static str,
}

impl TagDescriptor {
    pub const fn new(
        ifd: IfdKind,
        id: u16,
        name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            ifd,
            id,
            name,
            description,
        }
    }

    pub fn key(&self) -> TagKey {
        TagKey::new(self.ifd, self.id)
    }
}

/// Ordered, immutable set of tag descriptors.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    entries: Vec<TagDescriptor>,
    index: HashMap<TagKey, usize>,
}

static STANDARD: Lazy<TagRegistry> = Lazy::new(|| {
    let registry = TagRegistry::new(standard_descriptors());
    log::debug!("Standard tag registry loaded with {} tags", registry.len());
    registry
});

impl TagRegistry {
    /// Build a registry in iteration order. A repeated key replaces the
    /// earlier descriptor in place.
    pub fn new(descriptors: impl IntoIterator<Item = TagDescriptor>) -> Self {
        let mut registry = Self::default();
        for desc in descriptors {
            match registry.index.get(&desc.key()) {
                Some(&pos) => registry.entries[pos] = desc,
                None => {
                    registry.index.insert(desc.key(), registry.entries.len());
                    registry.entries.push(desc);
                }
            }
        }
        registry
    }

    /// The process-wide table of IFD0, Exif, Interoperability and GPS tags.
    pub fn standard() -> &'static TagRegistry {
        &STANDARD
    }

    pub fn lookup(&self, key: TagKey) -> Option<&TagDescriptor> {
        self.index.get(&key).map(|&pos| &self.entries[pos])
    }

    /// Resolve a bare id the way a single integer-keyed table would: the
    /// last-registered descriptor with that id wins.
    pub fn resolve(&self, id: u16) -> Option<&TagDescriptor> {
        self.entries.iter().rev().find(|d| d.id == id)
    }

    pub fn entries(&self) -> &[TagDescriptor] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagRegistry {
    type Item = &'a TagDescriptor;
    type IntoIter = std::slice::Iter<'a, TagDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// (id, name, description)
type Row = (u16, &'static str, &'static str);

const IMAGE_TAGS: &[Row] = &[
    (0x00FE, "NewSubfileType", "Subfile type"),
    (0x0100, "ImageWidth", "Image width"),
    (0x0101, "ImageLength", "Image height"),
    (0x0102, "BitsPerSample", "Number of bits per component"),
    (0x0103, "Compression", "Compression scheme"),
    (0x0106, "PhotometricInterpretation", "Pixel composition"),
    (0x010E, "ImageDescription", "Image title"),
    (0x010F, "Make", "Image input equipment manufacturer"),
    (0x0110, "Model", "Image input equipment model"),
    (0x0111, "StripOffsets", "Image data location"),
    (0x0112, "Orientation", "Orientation of image"),
    (0x0115, "SamplesPerPixel", "Number of components"),
    (0x0116, "RowsPerStrip", "Number of rows per strip"),
    (0x0117, "StripByteCounts", "Bytes per compressed strip"),
    (0x011A, "XResolution", "Image resolution in width direction"),
    (0x011B, "YResolution", "Image resolution in height direction"),
    (0x011C, "PlanarConfiguration", "Image data arrangement"),
    (0x0128, "ResolutionUnit", "Unit of X and Y resolution"),
    (0x012D, "TransferFunction", "Transfer function"),
    (0x0131, "Software", "Software used"),
    (0x0132, "DateTime", "File change date and time"),
    (0x013B, "Artist", "Person who created the image"),
    (0x013E, "WhitePoint", "White point chromaticity"),
    (0x013F, "PrimaryChromaticities", "Chromaticities of primaries"),
    (0x0201, "JPEGInterchangeFormat", "Offset to JPEG SOI"),
    (0x0202, "JPEGInterchangeFormatLength", "Bytes of JPEG data"),
    (0x0211, "YCbCrCoefficients", "Color space transformation matrix coefficients"),
    (0x0212, "YCbCrSubSampling", "Subsampling ratio of Y to C"),
    (0x0213, "YCbCrPositioning", "Y and C positioning"),
    (0x0214, "ReferenceBlackWhite", "Pair of black and white reference values"),
    (0x8298, "Copyright", "Copyright holder"),
    (0x8769, "ExifIFDPointer", "Exif IFD pointer"),
    (0x8825, "GPSInfoIFDPointer", "GPS information IFD pointer"),
];

const EXIF_TAGS: &[Row] = &[
    (0x829A, "ExposureTime", "Exposure time"),
    (0x829D, "FNumber", "F number"),
    (0x8822, "ExposureProgram", "Exposure program"),
    (0x8824, "SpectralSensitivity", "Spectral sensitivity"),
    (0x8827, "ISOSpeedRatings", "ISO speed rating"),
    (0x8828, "OECF", "Optoelectric conversion factor"),
    (0x9000, "ExifVersion", "Exif version"),
    (0x9003, "DateTimeOriginal", "Date and time of original data generation"),
    (0x9004, "DateTimeDigitized", "Date and time of digital data generation"),
    (0x9101, "ComponentsConfiguration", "Meaning of each component"),
    (0x9102, "CompressedBitsPerPixel", "Image compression mode"),
    (0x9201, "ShutterSpeedValue", "Shutter speed"),
    (0x9202, "ApertureValue", "Aperture"),
    (0x9203, "BrightnessValue", "Brightness"),
    (0x9204, "ExposureBiasValue", "Exposure bias"),
    (0x9205, "MaxApertureValue", "Maximum lens aperture"),
    (0x9206, "SubjectDistance", "Subject distance"),
    (0x9207, "MeteringMode", "Metering mode"),
    (0x9208, "LightSource", "Light source"),
    (0x9209, "Flash", "Flash"),
    (0x920A, "FocalLength", "Lens focal length"),
    (0x9214, "SubjectArea", "Subject area"),
    (0x927C, "MakerNote", "Manufacturer notes"),
    (0x9286, "UserComment", "User comments"),
    (0x9290, "SubSecTime", "DateTime subseconds"),
    (0x9291, "SubSecTimeOriginal", "DateTimeOriginal subseconds"),
    (0x9292, "SubSecTimeDigitized", "DateTimeDigitized subseconds"),
    (0xA000, "FlashpixVersion", "Supported Flashpix version"),
    (0xA001, "ColorSpace", "Color space information"),
    (0xA002, "PixelXDimension", "Valid image width"),
    (0xA003, "PixelYDimension", "Valid image height"),
    (0xA004, "RelatedSoundFile", "Related audio file"),
    (0xA005, "InteroperabilityIFDPointer", "Interoperability IFD pointer"),
    (0xA20B, "FlashEnergy", "Flash energy"),
    (0xA20C, "SpatialFrequencyResponse", "Spatial frequency response"),
    (0xA20E, "FocalPlaneXResolution", "Focal plane X resolution"),
    (0xA20F, "FocalPlaneYResolution", "Focal plane Y resolution"),
    (0xA210, "FocalPlaneResolutionUnit", "Focal plane resolution unit"),
    (0xA214, "SubjectLocation", "Subject location"),
    (0xA215, "ExposureIndex", "Exposure index"),
    (0xA217, "SensingMethod", "Sensing method"),
    (0xA300, "FileSource", "File source"),
    (0xA301, "SceneType", "Scene type"),
    (0xA302, "CFAPattern", "CFA pattern"),
    (0xA401, "CustomRendered", "Custom image processing"),
    (0xA402, "ExposureMode", "Exposure mode"),
    (0xA403, "WhiteBalance", "White balance"),
    (0xA404, "DigitalZoomRatio", "Digital zoom ratio"),
    (0xA405, "FocalLengthIn35mmFilm", "Focal length in 35 mm film"),
    (0xA406, "SceneCaptureType", "Scene capture type"),
    (0xA407, "GainControl", "Gain control"),
    (0xA408, "Contrast", "Contrast"),
    (0xA409, "Saturation", "Saturation"),
    (0xA40A, "Sharpness", "Sharpness"),
    (0xA40B, "DeviceSettingDescription", "Device settings description"),
    (0xA40C, "SubjectDistanceRange", "Subject distance range"),
    (0xA420, "ImageUniqueID", "Unique image ID"),
    (0xA430, "CameraOwnerName", "Camera owner name"),
    (0xA431, "BodySerialNumber", "Body serial number"),
    (0xA432, "LensSpecification", "Lens specification"),
    (0xA433, "LensMake", "Lens make"),
    (0xA434, "LensModel", "Lens model"),
    (0xA435, "LensSerialNumber", "Lens serial number"),
];

const INTEROP_TAGS: &[Row] = &[
    (0x0001, "InteroperabilityIndex", "Interoperability identification"),
    (0x0002, "InteroperabilityVersion", "Interoperability version"),
];

const GPS_TAGS: &[Row] = &[
    (0x0000, "GPSVersionID", "GPS tag version"),
    (0x0001, "GPSLatitudeRef", "North or South Latitude"),
    (0x0002, "GPSLatitude", "Latitude"),
    (0x0003, "GPSLongitudeRef", "East or West Longitude"),
    (0x0004, "GPSLongitude", "Longitude"),
    (0x0005, "GPSAltitudeRef", "Altitude reference"),
    (0x0006, "GPSAltitude", "Altitude"),
    (0x0007, "GPSTimeStamp", "GPS time (atomic clock)"),
    (0x0008, "GPSSatellites", "GPS satellites used for measurement"),
    (0x0009, "GPSStatus", "GPS receiver status"),
    (0x000A, "GPSMeasureMode", "GPS measurement mode"),
    (0x000B, "GPSDOP", "Measurement precision"),
    (0x000C, "GPSSpeedRef", "Speed unit"),
    (0x000D, "GPSSpeed", "Speed of GPS receiver"),
    (0x000E, "GPSTrackRef", "Reference for direction of movement"),
    (0x000F, "GPSTrack", "Direction of movement"),
    (0x0010, "GPSImgDirectionRef", "Reference for direction of image"),
    (0x0011, "GPSImgDirection", "Direction of image"),
    (0x0012, "GPSMapDatum", "Geodetic survey data used"),
    (0x0013, "GPSDestLatitudeRef", "Reference for latitude of destination"),
    (0x0014, "GPSDestLatitude", "Latitude of destination"),
    (0x0015, "GPSDestLongitudeRef", "Reference for longitude of destination"),
    (0x0016, "GPSDestLongitude", "Longitude of destination"),
    (0x0017, "GPSDestBearingRef", "Reference for bearing of destination"),
    (0x0018, "GPSDestBearing", "Bearing of destination"),
    (0x0019, "GPSDestDistanceRef", "Reference for distance to destination"),
    (0x001A, "GPSDestDistance", "Distance to destination"),
    (0x001B, "GPSProcessingMethod", "Name of GPS processing method"),
    (0x001C, "GPSAreaInformation", "Name of GPS area"),
    (0x001D, "GPSDateStamp", "GPS date"),
    (0x001E, "GPSDifferential", "GPS differential correction"),
];

/// IFD0, Exif, Interoperability, then GPS, each in ascending id order.
fn standard_descriptors() -> impl Iterator<Item = TagDescriptor> {
    [
        (IfdKind::Image, IMAGE_TAGS),
        (IfdKind::Exif, EXIF_TAGS),
        (IfdKind::Interop, INTEROP_TAGS),
        (IfdKind::Gps, GPS_TAGS),
    ]
    .into_iter()
    .flat_map(|(ifd, rows)| {
        rows.iter()
            .map(move |&(id, name, description)| TagDescriptor::new(ifd, id, name, description))
    })
}
