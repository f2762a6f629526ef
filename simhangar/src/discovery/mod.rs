//! Install path discovery.
//!
//! Resolves the simulator's content roots. The user's UserCfg.opt is
//! authoritative when present, since it records the actually configured
//! install location across both product generations (2020/2024) and both
//! distribution channels (Steam/Standard and Microsoft Store). Well-known
//! Xbox install directories are a last-resort heuristic when no UserCfg.opt
//! turns up. Discovered paths are persisted through [`PathCache`] so later
//! runs can skip the probe.

mod cache;
mod usercfg;

pub use cache::{CacheError, PathCache};
pub use usercfg::{installed_packages_path, parse_installed_packages_path};

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Name of the subdirectory holding third-party packages.
const COMMUNITY_SUBDIR: &str = "Community";
/// Name of the subdirectory holding official content, organized one level
/// deeper by distribution channel (OneStore, Steam).
const OFFICIAL_SUBDIR: &str = "Official";

/// Hard-coded Xbox app install roots probed when no UserCfg.opt is found.
const FALLBACK_ROOTS: [&str; 4] = [
    "C:\\XboxGames\\Microsoft Flight Simulator 2024\\Content\\Community",
    "C:\\XboxGames\\Microsoft Flight Simulator\\Content\\Community",
    "D:\\XboxGames\\Microsoft Flight Simulator 2024\\Content\\Community",
    "D:\\XboxGames\\Microsoft Flight Simulator\\Content\\Community",
];

/// One candidate UserCfg.opt location.
#[derive(Debug, Clone)]
pub struct UserCfgCandidate {
    /// Expected location of the UserCfg.opt file.
    pub path: PathBuf,
    /// Product generation / distribution channel this location covers.
    pub label: String,
}

impl UserCfgCandidate {
    /// Create a new candidate.
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// Locates simulator content roots and persists them between runs.
///
/// The default constructor resolves the standard per-user locations via
/// platform directories; tests inject their own candidate and fallback
/// lists along with a scratch cache file.
#[derive(Debug, Clone)]
pub struct InstallPathDiscovery {
    /// UserCfg.opt locations to probe, in preference order.
    candidates: Vec<UserCfgCandidate>,
    /// Hard-coded roots probed when no UserCfg.opt yields anything.
    fallback_roots: Vec<PathBuf>,
    /// Location of the persisted path cache.
    cache_file: PathBuf,
    /// The UserCfg.opt that discovery settled on, for the paths-info report.
    user_cfg_path: Option<PathBuf>,
}

impl Default for InstallPathDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallPathDiscovery {
    /// Discovery against the standard per-user locations.
    pub fn new() -> Self {
        let mut candidates = Vec::new();

        if let Some(config) = dirs::config_dir() {
            candidates.push(UserCfgCandidate::new(
                config
                    .join("Microsoft Flight Simulator 2024")
                    .join("UserCfg.opt"),
                "MSFS 2024 (Steam/Standard)",
            ));
            candidates.push(UserCfgCandidate::new(
                config.join("Microsoft Flight Simulator").join("UserCfg.opt"),
                "MSFS 2020 (Steam/Standard)",
            ));
        }

        if let Some(local) = dirs::data_local_dir() {
            candidates.push(UserCfgCandidate::new(
                local
                    .join("Packages")
                    .join("Microsoft.Limitless_8wekyb3d8bbwe")
                    .join("LocalCache")
                    .join("UserCfg.opt"),
                "MSFS 2024 (MS Store)",
            ));
            candidates.push(UserCfgCandidate::new(
                local
                    .join("Packages")
                    .join("Microsoft.FlightSimulator_8wekyb3d8bbwe")
                    .join("LocalCache")
                    .join("UserCfg.opt"),
                "MSFS 2020 (MS Store)",
            ));
        }

        Self::with_locations(
            candidates,
            FALLBACK_ROOTS.iter().map(PathBuf::from).collect(),
            default_cache_file(),
        )
    }

    /// Discovery with explicit locations.
    pub fn with_locations(
        candidates: Vec<UserCfgCandidate>,
        fallback_roots: Vec<PathBuf>,
        cache_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            candidates,
            fallback_roots,
            cache_file: cache_file.into(),
            user_cfg_path: None,
        }
    }

    /// Location of the persisted path cache.
    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// The UserCfg.opt that discovery settled on, if any.
    pub fn user_cfg_path(&self) -> Option<&Path> {
        self.user_cfg_path.as_deref()
    }

    /// Paths loaded from the persisted cache, verified to still exist.
    ///
    /// A missing or unreadable cache is not an error; it simply means the
    /// full probe has to run.
    pub fn cached_paths(&self) -> Vec<PathBuf> {
        if !self.cache_file.exists() {
            return Vec::new();
        }
        match PathCache::load(&self.cache_file) {
            Ok(cache) => cache.existing_paths(),
            Err(e) => {
                warn!(path = %self.cache_file.display(), error = %e, "could not load path cache");
                Vec::new()
            }
        }
    }

    /// Probe UserCfg.opt candidates, then fallback roots.
    ///
    /// Every UserCfg.opt that exists and parses contributes its root's
    /// `Community` subdirectory plus every immediate subdirectory of its
    /// `Official` subdirectory. Fallback roots are only consulted when no
    /// candidate yields anything. Any non-empty result is persisted to the
    /// path cache, overwriting the previous contents.
    pub fn detect(&mut self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for candidate in &self.candidates {
            if !candidate.path.exists() {
                continue;
            }
            info!(
                path = %candidate.path.display(),
                channel = %candidate.label,
                "found UserCfg.opt"
            );

            let Some(root) = installed_packages_path(&candidate.path) else {
                debug!(path = %candidate.path.display(), "could not parse InstalledPackagesPath");
                continue;
            };
            debug!(root = %root, "installed packages root");
            self.user_cfg_path = Some(candidate.path.clone());

            let root = PathBuf::from(root);

            let community = root.join(COMMUNITY_SUBDIR);
            if community.exists() {
                info!(path = %community.display(), "added Community folder");
                paths.push(community);
            }

            let official = root.join(OFFICIAL_SUBDIR);
            if official.exists() {
                match std::fs::read_dir(&official) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            let channel_dir = entry.path();
                            if channel_dir.is_dir() {
                                info!(path = %channel_dir.display(), "added Official folder");
                                paths.push(channel_dir);
                            }
                        }
                    }
                    Err(e) => {
                        warn!(
                            path = %official.display(),
                            error = %e,
                            "could not enumerate Official folder"
                        );
                    }
                }
            }
        }

        if paths.is_empty() {
            debug!("no UserCfg.opt yielded paths, probing fallback locations");
            for root in &self.fallback_roots {
                if root.exists() {
                    info!(path = %root.display(), "found fallback path");
                    paths.push(root.clone());
                }
            }
        }

        if !paths.is_empty() {
            if let Err(e) = PathCache::now(&paths).save(&self.cache_file) {
                warn!(path = %self.cache_file.display(), error = %e, "could not persist path cache");
            } else {
                debug!(path = %self.cache_file.display(), count = paths.len(), "saved paths to cache");
            }
        }

        paths
    }
}

/// Default location of the persisted path cache.
fn default_cache_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("SimHangar")
        .join("aircraft_paths.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lay out a fake installed-packages root with Community and Official
    /// content, plus a UserCfg.opt pointing at it.
    fn fake_install(temp: &TempDir) -> (PathBuf, PathBuf) {
        let packages_root = temp.path().join("MSFS Packages");
        std::fs::create_dir_all(packages_root.join("Community")).unwrap();
        std::fs::create_dir_all(packages_root.join("Official").join("OneStore")).unwrap();
        std::fs::create_dir_all(packages_root.join("Official").join("Steam")).unwrap();

        let user_cfg = temp.path().join("UserCfg.opt");
        std::fs::write(
            &user_cfg,
            format!(
                "Version 72\nInstalledPackagesPath \"{}\"\n",
                packages_root.display()
            ),
        )
        .unwrap();

        (packages_root, user_cfg)
    }

    #[test]
    fn test_detect_from_user_cfg() {
        let temp = TempDir::new().unwrap();
        let (packages_root, user_cfg) = fake_install(&temp);

        let mut discovery = InstallPathDiscovery::with_locations(
            vec![UserCfgCandidate::new(&user_cfg, "test")],
            Vec::new(),
            temp.path().join("cache.json"),
        );
        let mut paths = discovery.detect();
        paths.sort();

        let mut expected = vec![
            packages_root.join("Community"),
            packages_root.join("Official").join("OneStore"),
            packages_root.join("Official").join("Steam"),
        ];
        expected.sort();

        assert_eq!(paths, expected);
        assert_eq!(discovery.user_cfg_path(), Some(user_cfg.as_path()));
    }

    #[test]
    fn test_detect_persists_cache() {
        let temp = TempDir::new().unwrap();
        let (_, user_cfg) = fake_install(&temp);
        let cache_file = temp.path().join("nested").join("cache.json");

        let mut discovery = InstallPathDiscovery::with_locations(
            vec![UserCfgCandidate::new(&user_cfg, "test")],
            Vec::new(),
            &cache_file,
        );
        let detected = discovery.detect();
        assert!(!detected.is_empty());

        let mut cached = discovery.cached_paths();
        let mut detected_sorted = detected;
        cached.sort();
        detected_sorted.sort();
        assert_eq!(cached, detected_sorted);
    }

    #[test]
    fn test_detect_falls_back_when_no_user_cfg() {
        let temp = TempDir::new().unwrap();
        let fallback = temp.path().join("XboxGames").join("Content").join("Community");
        std::fs::create_dir_all(&fallback).unwrap();

        let mut discovery = InstallPathDiscovery::with_locations(
            vec![UserCfgCandidate::new(temp.path().join("absent.opt"), "test")],
            vec![fallback.clone(), temp.path().join("never-existed")],
            temp.path().join("cache.json"),
        );
        let paths = discovery.detect();

        assert_eq!(paths, vec![fallback]);
        assert_eq!(discovery.user_cfg_path(), None);
    }

    #[test]
    fn test_detect_nothing_found_writes_no_cache() {
        let temp = TempDir::new().unwrap();
        let cache_file = temp.path().join("cache.json");

        let mut discovery =
            InstallPathDiscovery::with_locations(Vec::new(), Vec::new(), &cache_file);

        assert!(discovery.detect().is_empty());
        assert!(!cache_file.exists());
        assert!(discovery.cached_paths().is_empty());
    }

    #[test]
    fn test_community_without_official() {
        let temp = TempDir::new().unwrap();
        let packages_root = temp.path().join("Packages");
        std::fs::create_dir_all(packages_root.join("Community")).unwrap();

        let user_cfg = temp.path().join("UserCfg.opt");
        std::fs::write(
            &user_cfg,
            format!(
                "InstalledPackagesPath \"{}\"\n",
                packages_root.display()
            ),
        )
        .unwrap();

        let mut discovery = InstallPathDiscovery::with_locations(
            vec![UserCfgCandidate::new(&user_cfg, "test")],
            Vec::new(),
            temp.path().join("cache.json"),
        );

        assert_eq!(discovery.detect(), vec![packages_root.join("Community")]);
    }

    #[test]
    fn test_unparseable_user_cfg_is_skipped() {
        let temp = TempDir::new().unwrap();
        let user_cfg = temp.path().join("UserCfg.opt");
        std::fs::write(&user_cfg, "Version 72\nNothingUseful 1\n").unwrap();

        let mut discovery = InstallPathDiscovery::with_locations(
            vec![UserCfgCandidate::new(&user_cfg, "test")],
            Vec::new(),
            temp.path().join("cache.json"),
        );

        assert!(discovery.detect().is_empty());
        assert_eq!(discovery.user_cfg_path(), None);
    }
}
