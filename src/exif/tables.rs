//! Enumerated constant tables for coded tag values.
//!
//! Every table is total: a code missing from `entries` maps to `fallback`.

/// A closed code → phrase mapping with a fallback phrase.
#[derive(Debug)]
pub struct CodeTable<K: 'static> {
    pub entries: &'static [(K, &'static str)],
    pub fallback: &'static str,
}

impl<K: PartialEq + Copy> CodeTable<K> {
    pub fn lookup(&self, code: K) -> &'static str {
        self.entries
            .iter()
            .find(|(k, _)| *k == code)
            .map(|&(_, phrase)| phrase)
            .unwrap_or(self.fallback)
    }
}

impl CodeTable<&'static str> {
    pub fn lookup_text(&self, code: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(k, _)| *k == code)
            .map(|&(_, phrase)| phrase)
            .unwrap_or(self.fallback)
    }
}

// ── SHORT ────────────────────────────────────────────────────────────

pub static EXPOSURE_PROGRAM: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "Not defined"),
        (1, "Manual"),
        (2, "Normal program"),
        (3, "Aperture priority"),
        (4, "Shutter priority"),
        (5, "Creative program (biased toward depth of field)"),
        (6, "Action program (biased toward fast shutter speed)"),
        (7, "Portrait mode (for closeup photos with the background out of focus)"),
        (8, "Landscape mode (for landscape photos with the background in focus)"),
    ],
    fallback: "reserved",
};

pub static METERING_MODE: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "unknown"),
        (1, "Average"),
        (2, "Center Weighted Average"),
        (3, "Spot"),
        (4, "MultiSpot"),
        (5, "Pattern"),
        (6, "Partial"),
        (255, "Other"),
    ],
    fallback: "reserved",
};

pub static LIGHT_SOURCE: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "unknown"),
        (1, "Daylight"),
        (2, "Fluorescent"),
        (3, "Tungsten (incandescent light)"),
        (4, "Flash"),
        (9, "Fine weather"),
        (10, "Cloudy weather"),
        (11, "Shade"),
        (12, "Daylight fluorescent (D 5700 – 7100K)"),
        (13, "Day white fluorescent (N 4600 – 5400K)"),
        (14, "Cool white fluorescent (W 3900 – 4500K)"),
        (15, "White fluorescent (WW 3200 – 3700K)"),
        (17, "Standard light A"),
        (18, "Standard light B"),
        (19, "Standard light C"),
        (20, "D55"),
        (21, "D65"),
        (22, "D75"),
        (23, "D50"),
        (24, "ISO studio tungsten"),
        (255, "ISO studio tungsten"),
    ],
    fallback: "other light source",
};

// Flash is a bit field; only the combinations the standard enumerates are named.
pub static FLASH: CodeTable<u16> = CodeTable {
    entries: &[
        (0x00, "Flash did not fire"),
        (0x01, "Flash fired"),
        (0x05, "Strobe return light not detected"),
        (0x07, "Strobe return light detected"),
        (0x09, "Flash fired, compulsory flash mode"),
        (0x0D, "Flash fired, compulsory flash mode, return light not detected"),
        (0x0F, "Flash fired, compulsory flash mode, return light detected"),
        (0x10, "Flash did not fire, compulsory flash mode"),
        (0x18, "Flash did not fire, auto mode"),
        (0x19, "Flash fired, auto mode"),
        (0x1D, "Flash fired, auto mode, return light not detected"),
        (0x1F, "Flash fired, auto mode, return light detected"),
        (0x20, "No flash function"),
        (0x41, "Flash fired, red-eye reduction mode"),
        (0x45, "Flash fired, red-eye reduction mode, return light not detected"),
        (0x47, "Flash fired, red-eye reduction mode, return light detected"),
        (0x49, "Flash fired, compulsory flash mode, red-eye reduction mode"),
        (
            0x4D,
            "Flash fired, compulsory flash mode, red-eye reduction mode, return light not detected",
        ),
        (
            0x4F,
            "Flash fired, compulsory flash mode, red-eye reduction mode, return light detected",
        ),
        (0x59, "Flash fired, auto mode, red-eye reduction mode"),
        (0x5D, "Flash fired, auto mode, return light not detected, red-eye reduction mode"),
        (0x5F, "Flash fired, auto mode, return light detected, red-eye reduction mode"),
    ],
    fallback: "reserved",
};

pub static RESOLUTION_UNIT: CodeTable<u16> = CodeTable {
    entries: &[(2, "Inch"), (3, "Centimeter")],
    fallback: "No Unit",
};

pub static ORIENTATION: CodeTable<u16> = CodeTable {
    entries: &[
        (1, "The 0th row is at the visual top of the image, and the 0th column is the visual left-hand side."),
        (2, "The 0th row is at the visual top of the image, and the 0th column is the visual right-hand side."),
        (3, "The 0th row is at the visual bottom of the image, and the 0th column is the visual right-hand side."),
        (4, "The 0th row is at the visual bottom of the image, and the 0th column is the visual left-hand side."),
        (5, "The 0th row is the visual left-hand side of the image, and the 0th column is the visual top."),
        (6, "The 0th row is the visual right-hand side of the image, and the 0th column is the visual top."),
        (7, "The 0th row is the visual right-hand side of the image, and the 0th column is the visual bottom."),
        (8, "The 0th row is the visual left-hand side of the image, and the 0th column is the visual bottom."),
    ],
    fallback: "Reserved",
};

pub static COLOR_SPACE: CodeTable<u16> = CodeTable {
    entries: &[(1, "sRGB"), (0xFFFF, "Uncalibrated")],
    fallback: "Reserved",
};

pub static WHITE_BALANCE: CodeTable<u16> = CodeTable {
    entries: &[(0, "Auto white balance"), (1, "Manual white balance")],
    fallback: "Reserved",
};

pub static SCENE_CAPTURE_TYPE: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "Standard"),
        (1, "Landscape"),
        (2, "Portrait"),
        (3, "Night scene"),
    ],
    fallback: "Reserved",
};

pub static SUBJECT_DISTANCE_RANGE: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "unknown"),
        (1, "Macro"),
        (2, "Close view"),
        (3, "Distant view"),
    ],
    fallback: "Reserved",
};

pub static GPS_DIFFERENTIAL: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "Measurement without differential correction"),
        (1, "Differential correction applied"),
    ],
    fallback: "Reserved",
};

pub static SENSING_METHOD: CodeTable<u16> = CodeTable {
    entries: &[
        (1, "Not defined"),
        (2, "One-chip color area sensor"),
        (3, "Two-chip color area sensor"),
        (4, "Three-chip color area sensor"),
        (5, "Color sequential area sensor"),
        (7, "Trilinear sensor"),
        (8, "Color sequential linear sensor"),
    ],
    fallback: " reserved",
};

pub static CONTRAST: CodeTable<u16> = CodeTable {
    entries: &[(0, "Normal"), (1, "Soft"), (2, "Hard")],
    fallback: "Reserved",
};

pub static SATURATION: CodeTable<u16> = CodeTable {
    entries: &[(0, "Normal"), (1, "Low saturation"), (2, "High saturation")],
    fallback: "Reserved",
};

pub static SHARPNESS: CodeTable<u16> = CodeTable {
    entries: &[(0, "Normal"), (1, "Soft"), (2, "Hard")],
    fallback: "Reserved",
};

pub static GAIN_CONTROL: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "None"),
        (1, "Low gain up"),
        (2, "High gain up"),
        (3, "Low gain down"),
        (4, "High gain down"),
    ],
    fallback: "Reserved",
};

pub static COMPRESSION: CodeTable<u16> = CodeTable {
    entries: &[(1, "Uncompressed"), (6, "JPEG compression (thumbnails only)")],
    fallback: "Reserved",
};

pub static PHOTOMETRIC_INTERPRETATION: CodeTable<u16> = CodeTable {
    entries: &[(2, "RGB"), (6, "YCbCr")],
    fallback: "Reserved",
};

pub static PLANAR_CONFIGURATION: CodeTable<u16> = CodeTable {
    entries: &[(1, "Chunky format"), (2, "Planar format")],
    fallback: "Reserved",
};

pub static YCBCR_POSITIONING: CodeTable<u16> = CodeTable {
    entries: &[(1, "centered"), (6, "co-sited")],
    fallback: "Reserved",
};

pub static CUSTOM_RENDERED: CodeTable<u16> = CodeTable {
    entries: &[(0, "Normal process"), (1, "Custom process")],
    fallback: "Reserved",
};

pub static EXPOSURE_MODE: CodeTable<u16> = CodeTable {
    entries: &[
        (0, "Auto exposure"),
        (1, "Manual exposure"),
        (2, "Auto bracket"),
    ],
    fallback: "Reserved",
};

// ── UNDEFINED ────────────────────────────────────────────────────────

pub static FILE_SOURCE: CodeTable<u8> = CodeTable {
    entries: &[
        (1, "Film scanner"),
        (2, "Reflection print scanner"),
        (3, "DSC"),
    ],
    fallback: "reserved",
};

pub static SCENE_TYPE: CodeTable<u8> = CodeTable {
    entries: &[(1, "A directly photographed image")],
    fallback: "reserved",
};

pub static FLASHPIX_VERSION: CodeTable<&'static str> = CodeTable {
    entries: &[
        ("0100", "Flashpix Format Version 1.0"),
        ("0101", "Flashpix Format Version 1.01"),
    ],
    fallback: "reserved",
};

/// Channel names for ComponentsConfiguration bytes; 0 means "does not exist".
pub const COMPONENTS: [&str; 7] = ["", "Y", "Cb", "Cr", "R", "G", "B"];

// ── ASCII (GPS reference letters) ────────────────────────────────────

pub static LATITUDE_REF: CodeTable<&'static str> = CodeTable {
    entries: &[("N", "North latitude"), ("S", "South latitude")],
    fallback: "reserved",
};

pub static LONGITUDE_REF: CodeTable<&'static str> = CodeTable {
    entries: &[("E", "East longitude"), ("W", "West longitude")],
    fallback: "reserved",
};

pub static GPS_STATUS: CodeTable<&'static str> = CodeTable {
    entries: &[
        ("A", "Measurement in progress"),
        ("V", "Measurement Interoperability"),
    ],
    fallback: "reserved",
};

pub static GPS_MEASURE_MODE: CodeTable<&'static str> = CodeTable {
    entries: &[
        ("2", "2-dimensional measurement"),
        ("3", "3-dimensional measurement"),
    ],
    fallback: "reserved",
};

pub static SPEED_UNIT: CodeTable<&'static str> = CodeTable {
    entries: &[
        ("K", "Kilometers per hour"),
        ("M", "Miles per hour"),
        ("N", "Knots"),
    ],
    fallback: "reserved",
};

pub static DIRECTION_REF: CodeTable<&'static str> = CodeTable {
    entries: &[("T", "True direction"), ("M", "Magnetic direction")],
    fallback: "reserved",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(EXPOSURE_PROGRAM.lookup(3), "Aperture priority");
        assert_eq!(METERING_MODE.lookup(255), "Other");
        assert_eq!(FLASH.lookup(0x19), "Flash fired, auto mode");
        assert_eq!(COLOR_SPACE.lookup(0xFFFF), "Uncalibrated");
        assert_eq!(FILE_SOURCE.lookup(3), "DSC");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(EXPOSURE_PROGRAM.lookup(9), "reserved");
        assert_eq!(RESOLUTION_UNIT.lookup(1), "No Unit");
        assert_eq!(ORIENTATION.lookup(0), "Reserved");
        assert_eq!(FILE_SOURCE.lookup(0), "reserved");
    }

    #[test]
    fn light_source_phrases() {
        assert_eq!(LIGHT_SOURCE.lookup(5), "other light source");
        assert_eq!(LIGHT_SOURCE.lookup(16), "other light source");
        assert_eq!(LIGHT_SOURCE.lookup(255), "ISO studio tungsten");
        assert_eq!(LIGHT_SOURCE.lookup(12), "Daylight fluorescent (D 5700 – 7100K)");
        assert_eq!(LIGHT_SOURCE.lookup(15), "White fluorescent (WW 3200 – 3700K)");
    }

    #[test]
    fn ycbcr_positioning_and_sensing_method() {
        assert_eq!(YCBCR_POSITIONING.lookup(1), "centered");
        assert_eq!(YCBCR_POSITIONING.lookup(6), "co-sited");
        assert_eq!(YCBCR_POSITIONING.lookup(2), "Reserved");
        assert_eq!(SENSING_METHOD.lookup(6), " reserved");
    }

    #[test]
    fn every_short_table_is_total() {
        let tables: [&CodeTable<u16>; 22] = [
            &EXPOSURE_PROGRAM,
            &METERING_MODE,
            &LIGHT_SOURCE,
            &FLASH,
            &RESOLUTION_UNIT,
            &ORIENTATION,
            &COLOR_SPACE,
            &WHITE_BALANCE,
            &SCENE_CAPTURE_TYPE,
            &SUBJECT_DISTANCE_RANGE,
            &GPS_DIFFERENTIAL,
            &SENSING_METHOD,
            &CONTRAST,
            &SATURATION,
            &SHARPNESS,
            &GAIN_CONTROL,
            &COMPRESSION,
            &PHOTOMETRIC_INTERPRETATION,
            &PLANAR_CONFIGURATION,
            &YCBCR_POSITIONING,
            &CUSTOM_RENDERED,
            &EXPOSURE_MODE,
        ];
        for table in tables {
            for code in [0u16, 1, 7, 254, 255, 0x7FFF, 0xFFFF] {
                assert!(!table.lookup(code).is_empty());
            }
        }
    }

    #[test]
    fn text_tables() {
        assert_eq!(LATITUDE_REF.lookup_text("N"), "North latitude");
        assert_eq!(LATITUDE_REF.lookup_text("X"), "reserved");
        assert_eq!(SPEED_UNIT.lookup_text("N"), "Knots");
        assert_eq!(DIRECTION_REF.lookup_text(""), "reserved");
    }
}
