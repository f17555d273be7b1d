//! CLI command implementations

pub mod builds;
pub mod config;
pub mod server;
pub mod views;
pub mod watch;

use anyhow::Result;

use crate::config::Config;
use crate::duck::DuckClient;
use crate::store::SyncStore;

/// Build a synchronization store from configuration
fn store_from(config: &Config) -> Result<SyncStore> {
    let client = DuckClient::new(config.timeout())?;
    Ok(SyncStore::new(client, config.server.address.clone()))
}
