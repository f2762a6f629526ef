//! `paths` command: show discovered paths and index status.

use simhangar::{response, AircraftIndex};

use crate::error::CliError;

/// Run the paths command.
pub fn run() -> Result<(), CliError> {
    let index = AircraftIndex::new();
    index.initialize();

    println!("{}", response::paths_info_response(&index.paths_info()));
    Ok(())
}
