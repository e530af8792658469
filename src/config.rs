/// Server configuration and shared handler state

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use crate::store::{FeatureStore, MemoryStore};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_BODY_MB: usize = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Where sanitized uploads are also written to disk, if anywhere
    pub upload_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn with_body_limit_mb(mut self, megabytes: usize) -> Self {
        self.max_body_bytes = megabytes.max(1) * 1024 * 1024;
        self
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            upload_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_MB * 1024 * 1024,
        }
    }
}

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeatureStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn FeatureStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Fresh in-memory store with the given configuration
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }
}
