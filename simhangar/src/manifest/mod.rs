//! manifest.json field extraction.
//!
//! Every package declares its metadata in a manifest.json at the package
//! root. The handful of string fields needed here is pulled out with a
//! targeted quoted-key scan instead of a JSON document parser: vendor
//! manifests ship with trailing commas, comments, and other violations a
//! strict parser would reject, and a scan shrugs them off. The trade-off
//! is no nesting awareness — a key name occurring inside an unrelated
//! string value earlier in the file can shadow the real field.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Metadata declared by a package's manifest.json.
///
/// All fields are best-effort: a missing file or key leaves the field
/// empty, never errors. Immutable after parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// Root directory of the package this manifest describes.
    pub package_path: PathBuf,
    /// Content type tag; only `"AIRCRAFT"` packages are indexed.
    pub content_type: String,
    /// Display title.
    pub title: String,
    /// Aircraft manufacturer.
    pub manufacturer: String,
    /// Package creator (third-party developer).
    pub creator: String,
    /// Package version string.
    pub package_version: String,
    /// Minimum compatible simulator version string.
    pub minimum_game_version: String,
    /// Total package size as written in the manifest (unit unspecified).
    pub total_package_size: String,
    /// Stable content identifier; its presence marks a usable manifest.
    pub content_id: String,
    /// Complete raw manifest text, retained for diagnostic pass-through.
    pub raw_json: String,
}

/// Parse a manifest.json file.
///
/// A missing or unreadable file yields a default (empty) manifest.
pub fn parse_manifest(path: &Path) -> PackageManifest {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not read manifest.json");
            return PackageManifest::default();
        }
    };
    parse_manifest_str(&String::from_utf8_lossy(&bytes))
}

/// Parse manifest fields from raw manifest.json text.
///
/// The caller is responsible for setting `package_path`; the text alone
/// does not know where it came from.
pub fn parse_manifest_str(raw: &str) -> PackageManifest {
    PackageManifest {
        package_path: PathBuf::new(),
        content_type: extract_string_field(raw, "content_type"),
        title: extract_string_field(raw, "title"),
        manufacturer: extract_string_field(raw, "manufacturer"),
        creator: extract_string_field(raw, "creator"),
        package_version: extract_string_field(raw, "package_version"),
        minimum_game_version: extract_string_field(raw, "minimum_game_version"),
        total_package_size: extract_string_field(raw, "total_package_size"),
        content_id: extract_string_field(raw, "content_id"),
        raw_json: raw.to_string(),
    }
}

/// Locate `"key"`, skip to the next `:`, and take the double-quoted value.
///
/// Only string values are extracted; a numeric or boolean value after the
/// colon yields an empty string, as does a missing key.
fn extract_string_field(raw: &str, key: &str) -> String {
    let needle = format!("\"{}\"", key);
    let Some(key_pos) = raw.find(&needle) else {
        return String::new();
    };

    let after_key = &raw[key_pos + needle.len()..];
    let Some(colon) = after_key.find(':') else {
        return String::new();
    };

    let after_colon = after_key[colon + 1..].trim_start_matches([' ', '\t', '\n', '\r']);
    let Some(rest) = after_colon.strip_prefix('"') else {
        return String::new();
    };

    match rest.find('"') {
        Some(end) => rest[..end].to_string(),
        None => String::new(),
    }
}
