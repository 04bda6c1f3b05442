use std::net::SocketAddr;
use std::time::Duration;

pub use playdeck_core::test_helpers::{make_game, make_jackpot};

use playdeck_server::build_app;
use playdeck_server::config::{AuthFileConfig, ServerConfig};
use playdeck_server::state::AppState;

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with no auth.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// Start a test server requiring the given bearer token for mutations.
    pub async fn with_auth(token: &str) -> Self {
        let config = ServerConfig {
            auth: AuthFileConfig {
                bearer_token: Some(token.to_string()),
            },
            ..ServerConfig::default()
        };
        Self::from_config(config).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            state,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Insert games directly into the catalog, bypassing the HTTP surface.
    pub async fn seed_games(&self, games: &[(&str, &[&str])]) {
        let mut catalog = self.state.catalog.write().await;
        for (id, keys) in games {
            catalog.insert_game(make_game(id, keys)).unwrap();
        }
    }
}
