//! Package scanning.
//!
//! Walks a content root and turns every aircraft package into
//! [`IndexedAircraft`] records, one per flyable variant. A package is an
//! immediate subdirectory carrying a manifest.json; its variants live in
//! aircraft.cfg files under the conventional `SimObjects/Airplanes`
//! subtree. Traversal failures abort the root being scanned, never the
//! overall operation.

use std::path::Path;

use tracing::{debug, warn};

use crate::cfg::{parse_variants, AircraftVariant};
use crate::index::normalize_title;
use crate::manifest::{parse_manifest, PackageManifest};

/// Manifest file name expected at a package root.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Aircraft configuration file name inside a variant directory.
pub const AIRCRAFT_CFG_FILE: &str = "aircraft.cfg";
/// Content type tag marking a package as an aircraft package.
pub const AIRCRAFT_CONTENT_TYPE: &str = "AIRCRAFT";

/// One indexed unit: a package manifest paired with one aircraft variant.
///
/// Either half may be unusable on its own; the flags record which parts
/// carry data. A record with neither flag set is never materialized.
#[derive(Debug, Clone, Default)]
pub struct IndexedAircraft {
    /// Package-level metadata from manifest.json.
    pub manifest: PackageManifest,
    /// Variant-level data from aircraft.cfg.
    pub config: AircraftVariant,
    /// Whether the manifest parsed to a usable record (content id present).
    pub has_manifest: bool,
    /// Whether the config parsed to a usable record (raw text present).
    pub has_config: bool,
}

/// Scan one content root for aircraft packages.
///
/// Only immediate subdirectories are considered packages. A package must
/// carry a manifest declaring `AIRCRAFT` content; anything else is skipped
/// without parsing its config files.
pub fn scan_root(root: &Path) -> Vec<IndexedAircraft> {
    let mut found = Vec::new();
    if !root.exists() {
        return found;
    }

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "could not scan content root");
            return found;
        }
    };

    for entry in entries.flatten() {
        let package_path = entry.path();
        if !package_path.is_dir() {
            continue;
        }

        let manifest_path = package_path.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            continue;
        }

        let mut manifest = parse_manifest(&manifest_path);
        manifest.package_path = package_path.clone();

        if manifest.content_type != AIRCRAFT_CONTENT_TYPE {
            continue;
        }

        for config in package_variants(&package_path) {
            let aircraft = IndexedAircraft {
                has_manifest: !manifest.content_id.is_empty(),
                has_config: !config.raw_content.is_empty(),
                manifest: manifest.clone(),
                config,
            };
            if aircraft.has_manifest || aircraft.has_config {
                found.push(aircraft);
            }
        }
    }

    debug!(root = %root.display(), count = found.len(), "scanned content root");
    found
}

/// Fallback search through one root for an exact normalized title.
///
/// Unlike [`scan_root`], the manifest's content type is not consulted:
/// this is a recovery path for variants the index missed or superseded,
/// so any aircraft.cfg whose title matches wins. The package manifest is
/// attached when one is present.
pub fn search_root(root: &Path, normalized_title: &str) -> Option<IndexedAircraft> {
    if !root.exists() {
        return None;
    }

    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "fallback search could not read root");
            return None;
        }
    };

    for entry in entries.flatten() {
        let package_path = entry.path();
        if !package_path.is_dir() {
            continue;
        }

        for config in package_variants(&package_path) {
            if normalize_title(&config.title) != normalized_title {
                continue;
            }
            debug!(package = %package_path.display(), "fallback search matched");

            let mut aircraft = IndexedAircraft {
                config,
                has_config: true,
                ..Default::default()
            };

            let manifest_path = package_path.join(MANIFEST_FILE);
            if manifest_path.exists() {
                let mut manifest = parse_manifest(&manifest_path);
                manifest.package_path = package_path.clone();
                aircraft.has_manifest = !manifest.content_id.is_empty();
                aircraft.manifest = manifest;
            }

            return Some(aircraft);
        }
    }

    None
}

/// Parse every variant declared under a package's `SimObjects/Airplanes`.
fn package_variants(package_path: &Path) -> Vec<AircraftVariant> {
    let airplanes = package_path.join("SimObjects").join("Airplanes");
    let mut variants = Vec::new();
    if !airplanes.exists() {
        return variants;
    }

    let entries = match std::fs::read_dir(&airplanes) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %airplanes.display(), error = %e, "could not enumerate variant directories");
            return variants;
        }
    };

    for entry in entries.flatten() {
        let variant_dir = entry.path();
        if !variant_dir.is_dir() {
            continue;
        }
        let cfg_path = variant_dir.join(AIRCRAFT_CFG_FILE);
        if cfg_path.exists() {
            variants.extend(parse_variants(&cfg_path));
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write a package directory with a manifest and one aircraft.cfg.
    fn write_package(
        root: &Path,
        dir_name: &str,
        content_type: &str,
        manifest_title: &str,
        variant_titles: &[&str],
    ) -> PathBuf {
        let package = root.join(dir_name);
        let variant_dir = package.join("SimObjects").join("Airplanes").join("model");
        std::fs::create_dir_all(&variant_dir).unwrap();

        std::fs::write(
            package.join(MANIFEST_FILE),
            format!(
                "{{\n  \"content_type\": \"{}\",\n  \"title\": \"{}\",\n  \"manufacturer\": \"TestCo\",\n  \"content_id\": \"{}\"\n}}\n",
                content_type,
                manifest_title,
                dir_name
            ),
        )
        .unwrap();

        let mut cfg = String::from("[GENERAL]\ncategory = \"airplane\"\n\n");
        for (i, title) in variant_titles.iter().enumerate() {
            cfg.push_str(&format!("[FLTSIM.{}]\ntitle = \"{}\"\n\n", i, title));
        }
        std::fs::write(variant_dir.join(AIRCRAFT_CFG_FILE), cfg).unwrap();

        package
    }

    #[test]
    fn test_scan_emits_one_record_per_variant() {
        let temp = TempDir::new().unwrap();
        let package = write_package(
            temp.path(),
            "testco-aircraft-c172",
            "AIRCRAFT",
            "Cessna 172",
            &["Cessna 172 Classic", "Cessna 172 Floats"],
        );

        let found = scan_root(temp.path());
        assert_eq!(found.len(), 2);

        for aircraft in &found {
            assert!(aircraft.has_manifest);
            assert!(aircraft.has_config);
            assert_eq!(aircraft.manifest.title, "Cessna 172");
            assert_eq!(aircraft.manifest.package_path, package);
            assert_eq!(aircraft.config.category, "airplane");
        }
        let titles: Vec<&str> = found.iter().map(|a| a.config.title.as_str()).collect();
        assert!(titles.contains(&"Cessna 172 Classic"));
        assert!(titles.contains(&"Cessna 172 Floats"));
    }

    #[test]
    fn test_scan_skips_non_aircraft_packages() {
        let temp = TempDir::new().unwrap();
        write_package(temp.path(), "testco-scenery-klax", "SCENERY", "KLAX", &["Ghost"]);

        assert!(scan_root(temp.path()).is_empty());
    }

    #[test]
    fn test_scan_skips_directories_without_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("random-folder")).unwrap();

        assert!(scan_root(temp.path()).is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        assert!(scan_root(Path::new("/nonexistent/root")).is_empty());
    }

    #[test]
    fn test_scan_keeps_config_only_packages() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("no-content-id");
        let variant_dir = package.join("SimObjects").join("Airplanes").join("model");
        std::fs::create_dir_all(&variant_dir).unwrap();
        // Manifest declares AIRCRAFT but lacks a content id.
        std::fs::write(
            package.join(MANIFEST_FILE),
            "{\"content_type\": \"AIRCRAFT\", \"title\": \"Orphan\"}",
        )
        .unwrap();
        std::fs::write(
            variant_dir.join(AIRCRAFT_CFG_FILE),
            "[FLTSIM.0]\ntitle = \"Orphan Variant\"\n",
        )
        .unwrap();

        let found = scan_root(temp.path());
        assert_eq!(found.len(), 1);
        assert!(!found[0].has_manifest);
        assert!(found[0].has_config);
    }

    #[test]
    fn test_search_root_matches_exact_normalized_title() {
        let temp = TempDir::new().unwrap();
        write_package(
            temp.path(),
            "testco-aircraft-dr400",
            "AIRCRAFT",
            "Robin DR400",
            &["Robin  DR400-140B"],
        );

        let found = search_root(temp.path(), "robin dr400-140b").unwrap();
        assert_eq!(found.config.title, "Robin  DR400-140B");
        assert!(found.has_config);
        assert!(found.has_manifest);
        assert_eq!(found.manifest.content_id, "testco-aircraft-dr400");
    }

    #[test]
    fn test_search_root_ignores_content_type_gate() {
        let temp = TempDir::new().unwrap();
        // scan_root would skip this package outright; the fallback must not.
        write_package(temp.path(), "mislabeled", "MISC", "Mislabeled", &["Hidden Gem"]);

        assert!(scan_root(temp.path()).is_empty());
        let found = search_root(temp.path(), "hidden gem").unwrap();
        assert_eq!(found.config.title, "Hidden Gem");
    }

    #[test]
    fn test_search_root_requires_exact_match() {
        let temp = TempDir::new().unwrap();
        write_package(temp.path(), "pkg", "AIRCRAFT", "Full Title", &["Full Title Here"]);

        // Substring relationships are not enough in the fallback path.
        assert!(search_root(temp.path(), "full title").is_none());
        assert!(search_root(temp.path(), "full title here").is_some());
    }
}
