//! Non-fatal extraction errors
//!
//! Every variant describes one sub-geometry (or one whole input) that could
//! not be turned into a polygon. They are collected, never raised: a caller
//! always receives the polygons that *could* be built alongside the reasons
//! for the ones that could not.

use thiserror::Error;

/// A reason a polygon could not be produced
///
/// The `Display` text is the user-facing message and is what gets
/// serialized into JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ExtractionError {
    /// A geometry tree node carried a type the extractor does not handle
    #[error("Unknown feature type: {type_name}")]
    UnknownGeometryType {
        /// Type tag of the offending node (e.g. `Point`)
        type_name: String,
    },

    /// Fewer than four coordinates remained, after stitching if any
    #[error(
        "Could not create a polygon because it had fewer than four coordinates \
         (last coordinate must be first coordinate repeated)"
    )]
    RingTooShort,

    /// First and last coordinate are further apart than the snap threshold
    #[error(
        "Could not create a polygon because its last coordinate was not equal to its \
         first coordinate (last coordinate must be first coordinate repeated)."
    )]
    RingNotClosed,

    /// Consecutive two-point edges of an edge-list polygon do not connect
    #[error(
        "Could not create polygon from set of two-coordinate LineStrings. \
         One coordinate pair's first coord did not match the previous coordinate's second coord."
    )]
    EdgeDiscontinuity,

    /// The input could not be turned into a geometry tree at all
    /// (unreadable archive, missing KML member, malformed XML)
    #[error("{0}")]
    Input(String),
}

impl serde::Serialize for ExtractionError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let unknown = ExtractionError::UnknownGeometryType {
            type_name: "Point".to_string(),
        };
        assert_eq!(unknown.to_string(), "Unknown feature type: Point");

        assert_eq!(
            ExtractionError::RingTooShort.to_string(),
            "Could not create a polygon because it had fewer than four coordinates \
             (last coordinate must be first coordinate repeated)"
        );
        assert_eq!(
            ExtractionError::RingNotClosed.to_string(),
            "Could not create a polygon because its last coordinate was not equal to its \
             first coordinate (last coordinate must be first coordinate repeated)."
        );
        assert!(ExtractionError::EdgeDiscontinuity
            .to_string()
            .starts_with("Could not create polygon from set of two-coordinate LineStrings. "));
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&ExtractionError::Input(
            "Could not find KML file in given KMZ.".to_string(),
        ))
        .unwrap();
        assert_eq!(json, "\"Could not find KML file in given KMZ.\"");
    }
}
