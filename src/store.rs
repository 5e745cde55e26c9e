use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

/// Persistent map of server path to original relative path
///
/// Used to rebuild hierarchy display for files uploaded in an earlier
/// session. The contract is best-effort: backend failures (quota, parse
/// errors) are swallowed, never propagated, so implementors log and degrade
/// instead of returning errors.
#[async_trait]
pub trait PathStore: Send + Sync {
    /// Look up the relative path recorded for a server path
    async fn get(&self, server_path: &str) -> Option<String>;

    /// Record an association
    async fn set(&self, server_path: &str, relative_path: &str);

    /// All recorded associations
    async fn entries(&self) -> HashMap<String, String>;

    /// Remove an association
    async fn remove(&self, server_path: &str);
}

/// In-memory path store
pub struct MemoryPathStore {
    map: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPathStore {
    pub fn new() -> Self {
        Self {
            map: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryPathStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PathStore for MemoryPathStore {
    async fn get(&self, server_path: &str) -> Option<String> {
        let map = self.map.read().await;
        map.get(server_path).cloned()
    }

    async fn set(&self, server_path: &str, relative_path: &str) {
        let mut map = self.map.write().await;
        map.insert(server_path.to_string(), relative_path.to_string());
    }

    async fn entries(&self) -> HashMap<String, String> {
        let map = self.map.read().await;
        map.clone()
    }

    async fn remove(&self, server_path: &str) {
        let mut map = self.map.write().await;
        map.remove(server_path);
    }
}

/// Path store persisted as one JSON document on disk
///
/// A missing or unparseable file degrades to an empty map; write failures
/// are logged at warn and dropped.
pub struct JsonFilePathStore {
    path: PathBuf,
}

impl JsonFilePathStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load(&self) -> HashMap<String, String> {
        match fs::read(&self.path).await {
            Ok(data) => serde_json::from_slice(&data).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    async fn save(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent).await;
        }
        match serde_json::to_vec(map) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.path, data).await {
                    warn!(path = %self.path.display(), error = %e, "failed to persist path store");
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize path store");
            }
        }
    }
}

#[async_trait]
impl PathStore for JsonFilePathStore {
    async fn get(&self, server_path: &str) -> Option<String> {
        self.load().await.get(server_path).cloned()
    }

    async fn set(&self, server_path: &str, relative_path: &str) {
        let mut map = self.load().await;
        map.insert(server_path.to_string(), relative_path.to_string());
        self.save(&map).await;
    }

    async fn entries(&self) -> HashMap<String, String> {
        self.load().await
    }

    async fn remove(&self, server_path: &str) {
        let mut map = self.load().await;
        map.remove(server_path);
        self.save(&map).await;
    }
}
