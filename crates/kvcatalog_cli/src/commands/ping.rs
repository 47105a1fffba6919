//! Ping command implementation.

use super::{BackendArgs, CliError};
use kvcatalog_core::{CatalogStore, Config, ConnectionState};
use std::time::Instant;

/// Runs the ping command.
pub fn run(args: &BackendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    let store = CatalogStore::connect(args.backend()?, Config::new().key_prefix(&args.prefix));

    match store.state() {
        ConnectionState::Connected => {
            store.ping()?;
            let count = store.count()?;
            println!(
                "{} is reachable ({} ms), {} under '{}'",
                args.describe(),
                started.elapsed().as_millis(),
                super::count_label(count, "record"),
                args.prefix
            );
            Ok(())
        }
        ConnectionState::Degraded => Err(CliError::Unreachable(args.describe()).into()),
    }
}
