//! EXIF property record decoding.
//!
//! - [`TagRegistry`]: the known IFD0, Exif, Interoperability and GPS tags
//! - [`Decoder`] / [`decode`]: typed payload → display text
//! - [`TagCollection::build`]: decode a record set against the whole registry
//! - [`read_records`]: load records from a JSON dump

mod collection;
mod decoder;
mod error;
mod rational;
mod reader;
mod record;
mod registry;
pub mod tables;

pub use collection::{CollectionBuilder, DecodedTag, GpsCoords, TagCollection};
pub use decoder::{Decoder, decode};
pub use error::{DecodeError, Result};
pub use rational::{GpsRational, Rational};
pub use reader::{RecordSet, parse_records, read_records};
pub use record::{Endian, RawPropertyRecord, TypeTag};
pub use registry::{IfdKind, TagDescriptor, TagKey, TagRegistry};
