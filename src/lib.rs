//! # exif-decode
//!
//! Turn raw EXIF property records (tag id, TIFF type code and payload bytes)
//! into human-readable text: exposure as `1/500 sec`, aperture as `F/2.8`,
//! flash modes, GPS positions and the rest of the IFD0, Exif, Interoperability
//! and GPS tag sets.
//!
//! ## Quick Start
//!
//! The pipeline module handles the full read → decode flow over JSON record
//! dumps:
//!
//! ```rust,no_run
//! use exif_decode::config::Config;
//! use exif_decode::exif::TagRegistry;
//! use exif_decode::pipeline::{collect_dumps, process_all};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!     let dumps = collect_dumps(&[PathBuf::from("./dumps")]);
//!
//!     for result in process_all(&dumps, TagRegistry::standard(), &config) {
//!         if let Some(ref err) = result.error {
//!             eprintln!("Error processing {}: {err}", result.path.display());
//!         } else if let Some(ref tags) = result.collection {
//!             for tag in tags.present() {
//!                 println!("{tag}");
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! Single payloads can be decoded directly:
//!
//! ```rust
//! use exif_decode::exif::{decode, IfdKind, RawPropertyRecord, TagCollection, TagKey, TypeTag};
//!
//! // ISOSpeedRatings, SHORT 200 little-endian
//! assert_eq!(decode(0x8827, TypeTag::Short, &[200, 0]).unwrap(), "ISO-200");
//!
//! let records = vec![RawPropertyRecord::new(0x010F, TypeTag::Ascii, b"Canon\0".to_vec())];
//! let tags = TagCollection::build(&records);
//! assert_eq!(tags.value(TagKey::new(IfdKind::Image, 0x010F)), Some("Canon"));
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration types and loading/saving
//! - [`exif`]: Tag registry, payload decoding and record dumps
//! - [`pipeline`]: Dump collection and batch decoding

pub mod config;
pub mod exif;
pub mod pipeline;
