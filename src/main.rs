//! Transfer Engine CLI
//!
//! Command-line interface for applying account operations from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > balances.csv
//! cargo run -- --strategy sync operations.csv > balances.csv
//! cargo run -- --strategy async operations.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv > balances.csv
//! ```
//!
//! The program reads operation records (account creates and transfers)
//! from the input CSV file, applies them through the transfer engine
//! using the selected processing strategy, and outputs the final account
//! balances to stdout. Diagnostics, including rejected operations and
//! transfer notifications, go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Sequential, single-threaded application in file order
//! - **async**: Batched reading with concurrent transfer dispatch (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use std::process;
use transfer_engine::cli;
use transfer_engine::strategy;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Apply operations using the selected strategy; output goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
