//! External image listing consumed by the catalog.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::Error;

/// One available image as described by the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub url: String,
}

/// Read a JSON manifest (`[{ "name": ..., "url": ... }, ...]`) from disk.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Manifest`]
/// if it is not a valid listing.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Vec<ManifestEntry>, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

/// Substitute a caller-supplied placeholder listing when the manifest came
/// back empty, so the slideshow always has something to show.
#[must_use]
pub fn or_fallback(listing: Vec<ManifestEntry>, fallback: &[ManifestEntry]) -> Vec<ManifestEntry> {
    if listing.is_empty() {
        info!(count = fallback.len(), "manifest empty; using fallback listing");
        fallback.to_vec()
    } else {
        listing
    }
}
