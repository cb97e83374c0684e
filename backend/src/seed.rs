//! Startup seed loading.
//!
//! Account and store registration flows live in a separate admin system, so
//! the server takes its initial record set from a JSON file named by
//! `SEED_PATH`.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::domain::models::account::{Account, Child};
use crate::domain::models::store::Store;
use crate::storage::memory::MemoryConnection;
use crate::storage::traits::{AccountStorage, StoreStorage};

#[derive(Debug, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub stores: Vec<Store>,
}

pub fn load_seed(connection: &Arc<MemoryConnection>, path: &Path) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seed: SeedData = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;

    let (accounts, children, stores) = (seed.accounts, seed.children, seed.stores);
    connection
        .transaction(|tables| {
            for account in &accounts {
                tables.save_account(account)?;
            }
            for child in &children {
                tables.save_child(child)?;
            }
            for store in &stores {
                tables.save_store(store)?;
            }
            Ok(())
        })
        .map_err(anyhow::Error::from)?;

    info!(
        "Seeded {} accounts, {} children, {} stores from {}",
        accounts.len(),
        children.len(),
        stores.len(),
        path.display()
    );
    Ok(())
}
