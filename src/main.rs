//! SEPA transfer preview CLI
//!
//! Reads credit-transfer rows from CSV and prints the normalized records.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transfers.csv > preview.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `SEPA_DEFAULT_CURRENCY`, `SEPA_EXACT_ARITHMETIC`, `SEPA_IDENTIFICATION`:
//!   see [`sepa_transfer::TransferConfig`]

use sepa_transfer::{BatchPreview, CreditTransferFactory, Result, TransferConfig, TransferError};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(TransferError::MissingArgument);
    }

    let config = TransferConfig::from_env()?;

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut preview = BatchPreview::new(CreditTransferFactory::with_config(config));
    preview.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    preview.write_output(handle)?;

    Ok(())
}
