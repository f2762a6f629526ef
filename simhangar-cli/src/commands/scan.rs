//! `scan` command: build the aircraft index and report totals.

use simhangar::AircraftIndex;

use crate::error::CliError;

/// Run the scan command.
pub fn run() -> Result<(), CliError> {
    let index = AircraftIndex::new();

    if !index.initialize() {
        return Err(CliError::Index(
            "no aircraft packages found; is the simulator installed and has it run at least once?"
                .to_string(),
        ));
    }

    println!("Indexed {} aircraft variants", index.indexed_count());
    println!("Search paths:");
    for path in index.search_paths() {
        println!("  {}", path.display());
    }
    Ok(())
}
