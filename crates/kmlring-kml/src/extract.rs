//! Polygon extraction entry points for KML text, KML/KMZ bytes and files

use crate::error::Result;
use crate::kmz::{is_kmz, read_kmz};
use crate::translate::parse_document;
use kmlring_core::{extract, ExtractionResult};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Extract polygons from KML document text
///
/// Text that cannot be parsed yields a result with no polygons and a single
/// input error.
///
/// # Examples
///
/// ```
/// use kmlring_kml::extract_from_text;
///
/// let result = extract_from_text(
///     r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
///          <Placemark><Polygon><outerBoundaryIs><LinearRing>
///            <coordinates>0,0 1,0 1,1 0,0</coordinates>
///          </LinearRing></outerBoundaryIs></Polygon></Placemark>
///        </Document></kml>"#,
/// );
/// assert_eq!(result.polygons.len(), 1);
/// assert!(result.is_clean());
/// ```
#[must_use]
pub fn extract_from_text(kml_text: &str) -> ExtractionResult {
    match parse_document(kml_text) {
        Ok(tree) => {
            let result = extract(&tree);
            debug!(
                "Extracted {} polygons with {} errors",
                result.polygons.len(),
                result.errors.len()
            );
            result
        }
        Err(e) => {
            warn!("{e}");
            ExtractionResult::from_input_error(e)
        }
    }
}

/// Decode raw file bytes into KML document text
///
/// Files named `*.kmz` (case-insensitive) are unpacked; anything else is
/// decoded as UTF-8, replacing invalid sequences.
///
/// # Errors
///
/// Returns the [`read_kmz`] errors for KMZ input. Plain KML input never fails.
#[must_use = "this function returns the KML text that should be parsed"]
pub fn decode_document(filename: &str, data: &[u8]) -> Result<String> {
    if is_kmz(filename) {
        read_kmz(data)
    } else {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Extract polygons from the contents of a `.kml` or `.kmz` file
///
/// `filename` only decides whether `data` is unpacked as a KMZ archive.
/// Archive failures (including a missing KML member) are reported in the
/// result's errors rather than returned.
#[must_use]
pub fn extract_from_bytes(filename: &str, data: &[u8]) -> ExtractionResult {
    match decode_document(filename, data) {
        Ok(text) => extract_from_text(&text),
        Err(e) => {
            warn!("{filename}: {e}");
            ExtractionResult::from_input_error(e)
        }
    }
}

/// Read a `.kml` or `.kmz` file and extract its polygons
///
/// # Errors
///
/// Returns [`crate::KmlError::Io`] if the file cannot be read. Every other
/// failure is reported inside the returned result.
#[must_use = "this function returns extracted polygons that should be processed"]
pub fn extract_from_path<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(extract_from_bytes(&filename, &data))
}
