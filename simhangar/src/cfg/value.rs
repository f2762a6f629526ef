//! Scalar value normalization for aircraft.cfg lines.

/// Normalize the right-hand side of a `key = value` line.
///
/// Trims surrounding whitespace, discards everything from the first `;`
/// onward (vendor files start comments mid-value), and strips one matching
/// pair of surrounding double quotes. No escape sequences are recognized,
/// so a literal quote inside a quoted value is not representable.
///
/// Degenerate input yields an empty string; there is no failure path.
///
/// # Example
///
/// ```
/// use simhangar::cfg::parse_config_value;
///
/// assert_eq!(parse_config_value(" \"Boeing 747\" ; the queen"), "Boeing 747");
/// ```
pub fn parse_config_value(raw: &str) -> String {
    let mut value = raw.trim_start_matches([' ', '\t']);

    if let Some(comment) = value.find(';') {
        value = &value[..comment];
    }

    value = value.trim_end_matches([' ', '\t', '\r', '\n']);

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value = &value[1..value.len() - 1];
    }

    value.to_string()
}
