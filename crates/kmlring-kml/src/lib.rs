//! # kmlring-kml
//!
//! KML and KMZ front end for [`kmlring_core`].
//!
//! Raw file bytes are decoded (and unpacked, for KMZ), parsed with the
//! [`kml`] crate, translated into a [`kmlring_core::GeometryNode`] tree and
//! handed to the extractor.
//!
//! ## Supported Formats
//!
//! | Format | Extension | Description |
//! |--------|-----------|-------------|
//! | KML | `.kml` | Keyhole Markup Language (Google Earth) |
//! | KMZ | `.kmz` | ZIP archive containing a KML document |
//!
//! ## Quick Start
//!
//! ```no_run
//! use kmlring_kml::extract_from_path;
//!
//! let result = extract_from_path("parcels.kmz")?;
//! for polygon in &result.polygons {
//!     println!("Polygon with {} points", polygon.len());
//! }
//! for error in &result.errors {
//!     println!("Skipped: {error}");
//! }
//! # Ok::<(), kmlring_kml::KmlError>(())
//! ```
//!
//! ## Error Handling
//!
//! The `extract_*` functions never fail on bad input: a malformed document
//! or an archive without a KML member shows up as an
//! [`kmlring_core::ExtractionError::Input`] in the result. Use
//! [`parse_document`] and [`read_kmz`] directly to get hard errors instead.

pub mod error;
pub mod extract;
pub mod kmz;
pub mod translate;

pub use error::{KmlError, Result};
pub use extract::{decode_document, extract_from_bytes, extract_from_path, extract_from_text};
pub use kmz::{is_kmz, read_kmz, MAX_MEMBER_SIZE};
pub use translate::{parse_document, translate};
