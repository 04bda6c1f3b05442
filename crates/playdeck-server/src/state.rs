use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::auth::AuthConfig;
use crate::catalog::Catalog;
use crate::config::ServerConfig;

pub type SharedCatalog = Arc<RwLock<Catalog>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    pub auth: AuthConfig,
    pub sse_subscriber_count: Arc<AtomicUsize>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let auth = AuthConfig {
            bearer_token: config.auth.bearer_token.clone(),
        };
        let catalog = Catalog::with_capacity(
            config.limits.max_games,
            config.limits.broadcast_capacity,
        );
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            auth,
            sse_subscriber_count: Arc::new(AtomicUsize::new(0)),
            config: Arc::new(config),
        }
    }
}

/// RAII guard that decrements a connection counter on drop, so SSE
/// subscriber slots are released even when a stream ends abruptly.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
