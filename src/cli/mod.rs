// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Returns a `CliArgs` struct with the parsed command-line arguments. If
/// parsing fails (invalid arguments, missing required arguments, or the
/// --help flag), clap displays an error message or help text and exits
/// the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
