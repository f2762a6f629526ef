//! aircraft.cfg variant parsing.
//!
//! An aircraft.cfg is an INI-like file with a `[GENERAL]` section and one
//! `[FLTSIM.n]` section per flyable variant. Vendor-authored files are
//! frequently malformed, so this is a tolerant line scanner rather than a
//! grammar-driven parser: anything unparseable is skipped, and the worst
//! outcome is "no variants found".

use std::path::Path;

use tracing::debug;

use super::value::parse_config_value;

/// One flyable variant declared by a `[FLTSIM.n]` section.
///
/// All fields are plain strings as written by the vendor; nothing is
/// validated beyond the quote/comment stripping in
/// [`parse_config_value`](super::parse_config_value). A variant is only
/// materialized when its `title` key is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AircraftVariant {
    /// Variant title, as reported by simulator telemetry.
    pub title: String,
    /// Model reference.
    pub model: String,
    /// Panel reference.
    pub panel: String,
    /// Sound reference.
    pub sound: String,
    /// Texture reference.
    pub texture: String,
    /// ATC aircraft type.
    pub atc_type: String,
    /// ATC aircraft model.
    pub atc_model: String,
    /// ATC tail id.
    pub atc_id: String,
    /// ATC airline name.
    pub atc_airline: String,
    /// ATC flight number.
    pub atc_flight_number: String,
    /// Manufacturer shown in the simulator UI.
    pub ui_manufacturer: String,
    /// Aircraft type shown in the simulator UI.
    pub ui_type: String,
    /// Livery/variation shown in the simulator UI.
    pub ui_variation: String,
    /// ICAO airline code.
    pub icao_airline: String,

    /// `[GENERAL]` ATC type in effect when this variant was finalized.
    pub general_atc_type: String,
    /// `[GENERAL]` ATC model in effect when this variant was finalized.
    pub general_atc_model: String,
    /// `[GENERAL]` editable flag.
    pub editable: String,
    /// `[GENERAL]` performance string.
    pub performance: String,
    /// `[GENERAL]` category string.
    pub category: String,

    /// Complete raw file text, retained for diagnostic pass-through.
    pub raw_content: String,
}

/// `[GENERAL]` keys tracked while scanning.
///
/// Values persist until overwritten, so every variant finalized after a
/// `GENERAL` section inherits the state captured at that moment. Section
/// order in the file is significant: a `GENERAL` section appearing after a
/// variant was finalized does not retroactively affect it.
#[derive(Debug, Clone, Default)]
struct GeneralState {
    atc_type: String,
    atc_model: String,
    editable: String,
    performance: String,
    category: String,
}

/// Parse every variant from an aircraft.cfg file.
///
/// A missing or unreadable file yields no variants. Non-UTF-8 bytes are
/// replaced rather than rejected; vendor files come in assorted encodings.
pub fn parse_variants(path: &Path) -> Vec<AircraftVariant> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not read aircraft.cfg");
            return Vec::new();
        }
    };
    parse_variants_str(&String::from_utf8_lossy(&bytes))
}

/// Parse every variant from raw aircraft.cfg text.
///
/// Line state machine: `;`/`#` lines are comments; a `[section]` header
/// finalizes the variant being built (emitted only when its title is
/// non-empty, carrying the `GENERAL` state captured at that moment); a
/// section is variant-bearing iff its upper-cased name starts with
/// `FLTSIM.`. Lines without `=` and unterminated section headers are
/// skipped without aborting the scan.
pub fn parse_variants_str(raw: &str) -> Vec<AircraftVariant> {
    let mut variants = Vec::new();
    let mut general = GeneralState::default();
    let mut current = AircraftVariant::default();
    let mut current_section = String::new();
    let mut in_fltsim = false;

    for line in raw.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            // Any section header closes the variant under construction,
            // even one with a missing ']'.
            if in_fltsim && !current.title.is_empty() {
                variants.push(finalize(std::mem::take(&mut current), &general, raw));
            }

            if let Some(end) = line.find(']') {
                current_section = line[1..end].to_ascii_uppercase();
                in_fltsim = current_section.starts_with("FLTSIM.");
            }
            continue;
        }

        let Some(eq) = line.find('=') else {
            continue;
        };
        let key = line[..eq].trim_end_matches([' ', '\t']).to_ascii_lowercase();
        let value = parse_config_value(&line[eq + 1..]);

        if in_fltsim {
            match key.as_str() {
                "title" => current.title = value,
                "model" => current.model = value,
                "panel" => current.panel = value,
                "sound" => current.sound = value,
                "texture" => current.texture = value,
                "atc_type" => current.atc_type = value,
                "atc_model" => current.atc_model = value,
                "atc_id" => current.atc_id = value,
                "atc_airline" => current.atc_airline = value,
                "atc_flight_number" => current.atc_flight_number = value,
                "ui_manufacturer" => current.ui_manufacturer = value,
                "ui_type" => current.ui_type = value,
                "ui_variation" => current.ui_variation = value,
                "icao_airline" => current.icao_airline = value,
                _ => {}
            }
        } else if current_section == "GENERAL" {
            match key.as_str() {
                "atc_type" => general.atc_type = value,
                "atc_model" => general.atc_model = value,
                "editable" => general.editable = value,
                "performance" => general.performance = value,
                "category" => general.category = value,
                _ => {}
            }
        }
    }

    // End-of-file finalizes a still-open variant.
    if in_fltsim && !current.title.is_empty() {
        variants.push(finalize(current, &general, raw));
    }

    variants
}

/// Freeze the inherited `GENERAL` state and raw text into a variant.
fn finalize(mut variant: AircraftVariant, general: &GeneralState, raw: &str) -> AircraftVariant {
    variant.general_atc_type = general.atc_type.clone();
    variant.general_atc_model = general.atc_model.clone();
    variant.editable = general.editable.clone();
    variant.performance = general.performance.clone();
    variant.category = general.category.clone();
    variant.raw_content = raw.to_string();
    variant
}
