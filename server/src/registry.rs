use filemgr_common::types::{ClientMap, ClientRecord};
use tokio::sync::RwLock;
use tracing::info;

/// In-memory map of registered clients.
///
/// Entries are created or overwritten by `register` and live until the process
/// exits. There is no expiry and no removal.
pub struct ClientRegistry {
    clients: RwLock<ClientMap>,
    host: String,
}

impl ClientRegistry {
    pub fn new() -> Self {
        let host = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "localhost".into());
        Self::with_host(host)
    }

    /// Registry that stamps records with `host` instead of the machine name.
    pub fn with_host(host: impl Into<String>) -> Self {
        ClientRegistry {
            clients: RwLock::new(ClientMap::new()),
            host: host.into(),
        }
    }

    pub async fn register(&self, client_name: &str, source_address: &str) -> ClientRecord {
        let record = ClientRecord {
            source_address: source_address.to_string(),
            name: client_name.to_string(),
            last_seen: self.host.clone(),
        };
        self.clients
            .write()
            .await
            .insert(client_name.to_string(), record.clone());
        info!(client = client_name, ip = source_address, "Client registered");
        record
    }

    pub async fn list_clients(&self) -> ClientMap {
        self.clients.read().await.clone()
    }

    pub async fn lookup(&self, client_name: &str) -> Option<ClientRecord> {
        self.clients.read().await.get(client_name).cloned()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
