use once_cell::sync::OnceCell;

use super::directus::DirectusClient;
use crate::shared::config::RecordStoreConfig;

static STORE: OnceCell<DirectusClient> = OnceCell::new();

pub fn initialize_store(config: &RecordStoreConfig) -> anyhow::Result<()> {
    let client = DirectusClient::new(&config.url, &config.token)?;
    if STORE.set(client).is_err() {
        anyhow::bail!("record store client already initialized");
    }
    tracing::info!("Record store client initialized for {}", config.url);
    Ok(())
}

pub fn store() -> &'static DirectusClient {
    STORE.get().expect("record store client is not initialized")
}
