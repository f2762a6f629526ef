//! CLI command handlers, one module per subcommand.

pub mod find;
pub mod paths;
pub mod scan;
