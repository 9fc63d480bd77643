//! Error types for KML and KMZ input

use std::io;
use thiserror::Error;

/// Errors that can occur before a geometry tree exists
#[derive(Debug, Error)]
pub enum KmlError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The KMZ bytes are not a readable ZIP archive
    #[error("Invalid KMZ archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The KMZ archive holds no `.kml` member
    #[error("Could not find KML file in given KMZ.")]
    MissingKmlMember,

    /// The KML member exceeds the size limit
    #[error("KML file '{name}' is too large ({size} bytes, max {max} bytes)")]
    MemberTooLarge {
        /// Member name within the archive
        name: String,
        /// Uncompressed size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// The document text is not valid KML
    #[error("KML parsing error: {0}")]
    Parse(String),
}

/// Result type for KML operations
pub type Result<T> = std::result::Result<T, KmlError>;
