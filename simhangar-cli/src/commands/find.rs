//! `find` command: resolve a title and print the JSON response.

use simhangar::{response, AircraftIndex};

use crate::error::CliError;

/// Run the find command.
///
/// A failed initialize is not fatal here: the lookup simply degrades to a
/// not-found response, which is what a telemetry client would receive.
pub fn run(title: &str, request_id: &str) -> Result<(), CliError> {
    let index = AircraftIndex::new();
    index.initialize();

    let json = match index.find_by_title(title) {
        Some(aircraft) => response::found_response(&aircraft, request_id),
        None => response::not_found_response(request_id),
    };
    println!("{}", json);
    Ok(())
}
