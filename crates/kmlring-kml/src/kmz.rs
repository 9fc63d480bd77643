//! KMZ (zipped KML) reading
//!
//! A KMZ file is a ZIP archive holding one KML document (usually `doc.kml`)
//! next to images, icons and models. Only the document is read.

use crate::error::{KmlError, Result};
use log::{debug, warn};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Maximum uncompressed size of the KML member (100 MB)
///
/// Larger members are refused rather than inflated into memory.
pub const MAX_MEMBER_SIZE: u64 = 100_000_000;

/// Whether `name` ends in `extension` (ASCII case-insensitive)
///
/// `extension` includes the leading dot.
#[inline]
pub(crate) fn has_extension(name: &str, extension: &str) -> bool {
    let (name, extension) = (name.as_bytes(), extension.as_bytes());
    name.len() >= extension.len()
        && name[name.len() - extension.len()..].eq_ignore_ascii_case(extension)
}

/// Whether a file name designates a KMZ archive
#[inline]
#[must_use]
pub fn is_kmz(filename: &str) -> bool {
    has_extension(filename, ".kmz")
}

/// Extract the KML document text from KMZ archive bytes
///
/// The first member (in archive order) whose name ends in `.kml` is used;
/// directories are skipped. Invalid UTF-8 in the member is replaced with
/// U+FFFD.
///
/// # Errors
///
/// - [`KmlError::Archive`] if the bytes are not a readable ZIP archive
/// - [`KmlError::MissingKmlMember`] if no member is a KML file
/// - [`KmlError::MemberTooLarge`] if the member exceeds [`MAX_MEMBER_SIZE`]
#[must_use = "this function returns the KML text that should be parsed"]
pub fn read_kmz(data: &[u8]) -> Result<String> {
    read_kmz_with_limit(data, MAX_MEMBER_SIZE)
}

/// [`read_kmz`] with an explicit member size limit
pub(crate) fn read_kmz_with_limit(data: &[u8], max_size: u64) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut selected: Option<(usize, String, u64)> = None;
    for i in 0..archive.len() {
        // Raw access reads metadata only, so encrypted resources do not abort the scan
        let entry = archive.by_index_raw(i)?;
        if entry.is_dir() || !has_extension(entry.name(), ".kml") {
            continue;
        }
        if let Some((_, chosen, _)) = &selected {
            debug!("Ignoring KML member {} (using {chosen})", entry.name());
            continue;
        }
        selected = Some((i, entry.name().to_string(), entry.size()));
    }

    let (index, name, size) = selected.ok_or(KmlError::MissingKmlMember)?;
    check_member_size(name.as_str(), size, max_size)?;

    debug!("Reading KML member {name} ({size} bytes)");
    let mut member = archive.by_index(index)?;
    let mut contents = Vec::new();
    member.read_to_end(&mut contents)?;
    Ok(String::from_utf8_lossy(&contents).into_owned())
}

/// Refuse a member whose uncompressed size exceeds `max_size`
fn check_member_size(name: &str, size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        warn!("Refusing KML member {name}: {size} bytes exceeds {max_size} bytes limit");
        return Err(KmlError::MemberTooLarge {
            name: name.to_string(),
            size,
            max: max_size,
        });
    }
    Ok(())
}
