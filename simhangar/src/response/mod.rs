//! Wire responses for aircraft data clients.
//!
//! Lookup results travel to clients as small JSON documents keyed by the
//! caller's request id. The field names are a wire contract shared with
//! existing clients; they stay camelCase regardless of the Rust names.

use serde::Serialize;

use crate::cfg::AircraftVariant;
use crate::index::PathsInfo;
use crate::manifest::PackageManifest;
use crate::scanner::IndexedAircraft;

/// `type` tag carried by aircraft data responses.
const AIRCRAFT_DATA_TYPE: &str = "aircraftDataResponse";
/// `type` tag carried by paths-info responses.
const MSFS_PATHS_TYPE: &str = "msfsPaths";

#[derive(Debug, Serialize)]
struct AircraftDataResponse<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "requestId")]
    request_id: &'a str,
    data: AircraftData<'a>,
}

#[derive(Debug, Serialize)]
struct AircraftData<'a> {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    manifest: Option<ManifestData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<ConfigData<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestData<'a> {
    #[serde(rename = "contentType")]
    content_type: &'a str,
    title: &'a str,
    manufacturer: &'a str,
    creator: &'a str,
    #[serde(rename = "packageVersion")]
    package_version: &'a str,
    #[serde(rename = "minimumGameVersion")]
    minimum_game_version: &'a str,
    #[serde(rename = "totalPackageSize")]
    total_package_size: &'a str,
    #[serde(rename = "contentId")]
    content_id: &'a str,
    raw: &'a str,
}

impl<'a> From<&'a PackageManifest> for ManifestData<'a> {
    fn from(m: &'a PackageManifest) -> Self {
        Self {
            content_type: &m.content_type,
            title: &m.title,
            manufacturer: &m.manufacturer,
            creator: &m.creator,
            package_version: &m.package_version,
            minimum_game_version: &m.minimum_game_version,
            total_package_size: &m.total_package_size,
            content_id: &m.content_id,
            raw: &m.raw_json,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigData<'a> {
    title: &'a str,
    model: &'a str,
    panel: &'a str,
    sound: &'a str,
    texture: &'a str,
    #[serde(rename = "atcType")]
    atc_type: &'a str,
    #[serde(rename = "atcModel")]
    atc_model: &'a str,
    #[serde(rename = "atcId")]
    atc_id: &'a str,
    #[serde(rename = "atcAirline")]
    atc_airline: &'a str,
    #[serde(rename = "atcFlightNumber")]
    atc_flight_number: &'a str,
    #[serde(rename = "uiManufacturer")]
    ui_manufacturer: &'a str,
    #[serde(rename = "uiType")]
    ui_type: &'a str,
    #[serde(rename = "uiVariation")]
    ui_variation: &'a str,
    #[serde(rename = "icaoAirline")]
    icao_airline: &'a str,
    #[serde(rename = "generalAtcType")]
    general_atc_type: &'a str,
    #[serde(rename = "generalAtcModel")]
    general_atc_model: &'a str,
    editable: &'a str,
    performance: &'a str,
    category: &'a str,
    raw: &'a str,
}

impl<'a> From<&'a AircraftVariant> for ConfigData<'a> {
    fn from(c: &'a AircraftVariant) -> Self {
        Self {
            title: &c.title,
            model: &c.model,
            panel: &c.panel,
            sound: &c.sound,
            texture: &c.texture,
            atc_type: &c.atc_type,
            atc_model: &c.atc_model,
            atc_id: &c.atc_id,
            atc_airline: &c.atc_airline,
            atc_flight_number: &c.atc_flight_number,
            ui_manufacturer: &c.ui_manufacturer,
            ui_type: &c.ui_type,
            ui_variation: &c.ui_variation,
            icao_airline: &c.icao_airline,
            general_atc_type: &c.general_atc_type,
            general_atc_model: &c.general_atc_model,
            editable: &c.editable,
            performance: &c.performance,
            category: &c.category,
            raw: &c.raw_content,
        }
    }
}

#[derive(Debug, Serialize)]
struct PathsInfoResponse {
    #[serde(rename = "type")]
    kind: &'static str,
    data: PathsData,
}

#[derive(Debug, Serialize)]
struct PathsData {
    #[serde(rename = "userCfgOptPath")]
    user_cfg_opt_path: String,
    #[serde(rename = "configFilePath")]
    config_file_path: String,
    #[serde(rename = "indexedAircraftCount")]
    indexed_aircraft_count: usize,
    #[serde(rename = "searchPaths")]
    search_paths: Vec<String>,
}

/// Serialize a lookup hit, keyed to the caller's request id.
///
/// Both the manifest and config objects are always embedded, with empty
/// strings for whatever was not parsed; clients branch on `found` and the
/// field values, not on object presence.
pub fn found_response(aircraft: &IndexedAircraft, request_id: &str) -> String {
    to_json(&AircraftDataResponse {
        kind: AIRCRAFT_DATA_TYPE,
        request_id,
        data: AircraftData {
            found: true,
            manifest: Some(ManifestData::from(&aircraft.manifest)),
            config: Some(ConfigData::from(&aircraft.config)),
        },
    })
}

/// Serialize a lookup miss, keyed to the caller's request id.
pub fn not_found_response(request_id: &str) -> String {
    to_json(&AircraftDataResponse {
        kind: AIRCRAFT_DATA_TYPE,
        request_id,
        data: AircraftData {
            found: false,
            manifest: None,
            config: None,
        },
    })
}

/// Serialize discovery and index state.
pub fn paths_info_response(info: &PathsInfo) -> String {
    to_json(&PathsInfoResponse {
        kind: MSFS_PATHS_TYPE,
        data: PathsData {
            user_cfg_opt_path: info
                .user_cfg_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            config_file_path: info.cache_file.to_string_lossy().into_owned(),
            indexed_aircraft_count: info.indexed_count,
            search_paths: info
                .search_paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        },
    })
}

/// Serialize, degrading to an empty document on failure.
///
/// The payload is strings and a count, so failure is unreachable in
/// practice; it is still logged rather than propagated, matching the
/// no-hard-errors contract of the public surface.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::error!(error = %e, "response serialization failed");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_aircraft() -> IndexedAircraft {
        let mut aircraft = IndexedAircraft {
            has_manifest: true,
            has_config: true,
            ..Default::default()
        };
        aircraft.manifest.content_type = "AIRCRAFT".into();
        aircraft.manifest.title = "Boeing 747-8i".into();
        aircraft.manifest.manufacturer = "Boeing".into();
        aircraft.manifest.content_id = "asobo-aircraft-b747-8i".into();
        aircraft.manifest.raw_json = "{\"title\": \"Boeing 747-8i\"}".into();
        aircraft.config.title = "Boeing 747-8i Asobo".into();
        aircraft.config.atc_id = "ASXGS".into();
        aircraft.config.category = "airplane".into();
        aircraft.config.raw_content = "[FLTSIM.0]\ntitle=\"Boeing 747-8i Asobo\"\n".into();
        aircraft
    }

    #[test]
    fn test_found_response_shape() {
        let json = found_response(&sample_aircraft(), "req-42");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "aircraftDataResponse");
        assert_eq!(value["requestId"], "req-42");
        assert_eq!(value["data"]["found"], true);
        assert_eq!(value["data"]["manifest"]["title"], "Boeing 747-8i");
        assert_eq!(value["data"]["manifest"]["contentId"], "asobo-aircraft-b747-8i");
        assert_eq!(value["data"]["config"]["title"], "Boeing 747-8i Asobo");
        assert_eq!(value["data"]["config"]["atcId"], "ASXGS");
        // Unparsed fields serialize as empty strings, not nulls.
        assert_eq!(value["data"]["config"]["atcFlightNumber"], "");
        // Raw source text passes through both halves.
        assert_eq!(
            value["data"]["config"]["raw"],
            "[FLTSIM.0]\ntitle=\"Boeing 747-8i Asobo\"\n"
        );
    }

    #[test]
    fn test_not_found_response_shape() {
        let json = not_found_response("req-43");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "aircraftDataResponse");
        assert_eq!(value["requestId"], "req-43");
        assert_eq!(value["data"]["found"], false);
        assert!(value["data"].get("manifest").is_none());
        assert!(value["data"].get("config").is_none());
    }

    #[test]
    fn test_special_characters_survive_encoding() {
        let mut aircraft = sample_aircraft();
        aircraft.config.title = "Quote \" Backslash \\ Newline \n Tab \t".into();

        let json = found_response(&aircraft, "req-44");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["data"]["config"]["title"],
            "Quote \" Backslash \\ Newline \n Tab \t"
        );
    }

    #[test]
    fn test_paths_info_response_shape() {
        let info = PathsInfo {
            user_cfg_path: Some(PathBuf::from("/cfg/UserCfg.opt")),
            cache_file: PathBuf::from("/cfg/SimHangar/aircraft_paths.json"),
            indexed_count: 7,
            search_paths: vec![PathBuf::from("/packages/Community")],
        };

        let json = paths_info_response(&info);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "msfsPaths");
        assert_eq!(value["data"]["userCfgOptPath"], "/cfg/UserCfg.opt");
        assert_eq!(
            value["data"]["configFilePath"],
            "/cfg/SimHangar/aircraft_paths.json"
        );
        assert_eq!(value["data"]["indexedAircraftCount"], 7);
        assert_eq!(value["data"]["searchPaths"][0], "/packages/Community");
    }

    #[test]
    fn test_paths_info_without_user_cfg() {
        let info = PathsInfo {
            user_cfg_path: None,
            cache_file: PathBuf::from("/cfg/cache.json"),
            indexed_count: 0,
            search_paths: Vec::new(),
        };

        let json = paths_info_response(&info);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["userCfgOptPath"], "");
        assert_eq!(value["data"]["searchPaths"].as_array().unwrap().len(), 0);
    }
}
