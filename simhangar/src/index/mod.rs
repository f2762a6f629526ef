//! Normalized-title index and tiered lookup.
//!
//! The index owns everything the lookup path needs: the search path list,
//! the scanned package arena, and the normalized-title map keyed into it.
//! One exclusive lock covers rebuilds and the in-memory lookup tiers; the
//! filesystem fallback tier deliberately runs outside the lock, against a
//! snapshot of the search paths, so a slow disk walk cannot stall other
//! callers' lookups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::discovery::InstallPathDiscovery;
use crate::scanner::{scan_root, search_root, IndexedAircraft};

/// Case-fold a title and collapse runs of interior spaces.
///
/// Telemetry, manifests, and aircraft.cfg files disagree on spacing and
/// capitalization for the same aircraft, so every index key and every
/// query goes through this first. Idempotent.
///
/// # Example
///
/// ```
/// use simhangar::normalize_title;
///
/// assert_eq!(normalize_title("Boeing   737"), "boeing 737");
/// ```
pub fn normalize_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut normalized = String::with_capacity(lower.len());
    let mut prev_space = false;
    for c in lower.chars() {
        if c == ' ' {
            if !prev_space {
                normalized.push(c);
            }
            prev_space = true;
        } else {
            normalized.push(c);
            prev_space = false;
        }
    }
    normalized
}

/// Discovery and index state reported to clients.
#[derive(Debug, Clone)]
pub struct PathsInfo {
    /// UserCfg.opt file discovery settled on, if any.
    pub user_cfg_path: Option<PathBuf>,
    /// Location of the persisted path cache.
    pub cache_file: PathBuf,
    /// Number of normalized-title entries in the index.
    pub indexed_count: usize,
    /// Active search paths.
    pub search_paths: Vec<PathBuf>,
}

/// Everything guarded by the index lock.
#[derive(Debug, Default)]
struct IndexState {
    /// Ordered, de-duplicated content roots.
    search_paths: Vec<PathBuf>,
    /// All scanned packages, in scan order.
    packages: Vec<IndexedAircraft>,
    /// Normalized title → slot in `packages`. On collision the
    /// later-scanned package wins (last-write-wins by scan order; directory
    /// traversal order is not contractually stable).
    by_title: HashMap<String, usize>,
    /// Discovery state, kept for the paths-info report.
    discovery: InstallPathDiscovery,
}

/// Title-indexed registry of installed aircraft packages.
///
/// Public operations never fail hard: a lookup miss is `None`, a failed
/// rebuild is `false`, and callers receive copies of records, never
/// references into the index. Rebuilds are synchronous and blocking;
/// callers wanting a non-blocking rebuild run it on their own thread.
/// Concurrent rebuilds are not a supported pattern and must be serialized
/// by the caller.
pub struct AircraftIndex {
    state: Mutex<IndexState>,
}

impl Default for AircraftIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AircraftIndex {
    /// Index using the standard per-user discovery locations.
    pub fn new() -> Self {
        Self::with_discovery(InstallPathDiscovery::new())
    }

    /// Index with explicit discovery locations.
    pub fn with_discovery(discovery: InstallPathDiscovery) -> Self {
        Self {
            state: Mutex::new(IndexState {
                discovery,
                ..IndexState::default()
            }),
        }
    }

    /// Discover content roots and build the full index.
    ///
    /// Discards any prior state, then runs path discovery (cache first,
    /// probe second), scans every root, and rebuilds the title map. Blocks
    /// until traversal finishes. Returns `false` when no usable search
    /// path was found, or when the scan indexed nothing.
    pub fn initialize(&self) -> bool {
        let mut state = self.state.lock();

        state.search_paths.clear();
        state.packages.clear();
        state.by_title.clear();

        let cached = state.discovery.cached_paths();
        for path in cached {
            push_unique(&mut state.search_paths, path);
        }
        let detected = state.discovery.detect();
        for path in detected {
            push_unique(&mut state.search_paths, path);
        }

        if state.search_paths.is_empty() {
            warn!("no simulator content roots found; aircraft data will not be available");
            return false;
        }

        let roots = state.search_paths.clone();
        for root in &roots {
            info!(root = %root.display(), "scanning content root");
            let scanned = scan_root(root);
            state.packages.extend(scanned);
        }

        rebuild_title_map(&mut state);

        info!(
            variants = state.by_title.len(),
            packages = state.packages.len(),
            "aircraft index built"
        );

        !state.packages.is_empty()
    }

    /// Rebuild from scratch, discarding prior state.
    pub fn rescan(&self) -> bool {
        self.initialize()
    }

    /// Resolve a telemetry title to an indexed package.
    ///
    /// Three tiers, strongest first:
    ///
    /// 1. Exact match on the normalized title.
    /// 2. Substring match in either direction over the index keys. Ties
    ///    are broken by shortest key, then lexicographic order, so the
    ///    winner never depends on map iteration order.
    /// 3. Full filesystem re-scan of the search paths, exact normalized
    ///    equality only. Runs without the index lock and does not touch
    ///    the index; it recovers variants that were missed or superseded
    ///    at scan time.
    pub fn find_by_title(&self, title: &str) -> Option<IndexedAircraft> {
        let normalized = normalize_title(title);

        let search_paths = {
            let state = self.state.lock();

            if let Some(&slot) = state.by_title.get(&normalized) {
                debug!(title, "exact match in index");
                return state.packages.get(slot).cloned();
            }

            let mut candidates: Vec<&String> = state
                .by_title
                .keys()
                .filter(|key| key.contains(&normalized) || normalized.contains(key.as_str()))
                .collect();
            candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

            if let Some(&key) = candidates.first() {
                debug!(title, key = key.as_str(), "partial match in index");
                let slot = state.by_title[key];
                return state.packages.get(slot).cloned();
            }

            state.search_paths.clone()
        };

        debug!(title, "no match in index, trying fallback search");
        for root in &search_paths {
            if let Some(found) = search_root(root, &normalized) {
                return Some(found);
            }
        }

        debug!(title, "fallback search found no matches");
        None
    }

    /// Number of normalized-title entries in the index.
    pub fn indexed_count(&self) -> usize {
        self.state.lock().by_title.len()
    }

    /// The content roots currently being scanned.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.state.lock().search_paths.clone()
    }

    /// Snapshot of discovery and index state for the paths-info response.
    pub fn paths_info(&self) -> PathsInfo {
        let state = self.state.lock();
        PathsInfo {
            user_cfg_path: state.discovery.user_cfg_path().map(Path::to_path_buf),
            cache_file: state.discovery.cache_file().to_path_buf(),
            indexed_count: state.by_title.len(),
            search_paths: state.search_paths.clone(),
        }
    }
}

/// Append a path unless it is already present, preserving order.
fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

/// Rebuild the normalized-title map over the package arena.
///
/// Each package contributes up to two keys: its manifest title and its
/// variant title (the latter usually carries the livery variation).
fn rebuild_title_map(state: &mut IndexState) {
    let mut by_title = HashMap::new();
    for (slot, aircraft) in state.packages.iter().enumerate() {
        if !aircraft.manifest.title.is_empty() {
            by_title.insert(normalize_title(&aircraft.manifest.title), slot);
        }
        if !aircraft.config.title.is_empty() {
            by_title.insert(normalize_title(&aircraft.config.title), slot);
        }
    }
    debug!(entries = by_title.len(), "built title index");
    state.by_title = by_title;
}
