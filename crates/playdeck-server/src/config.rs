use serde::Deserialize;

/// Top-level server configuration, loaded from `playdeck.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    /// Optional JSON seed file ingested into the catalog at startup.
    pub seed_path: Option<String>,
    pub auth: AuthFileConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            seed_path: None,
            auth: AuthFileConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Auth section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileConfig {
    /// Bearer token required for mutating API calls. None = auth disabled.
    pub bearer_token: Option<String>,
}

/// Infrastructure limits (catalog size, subscriber caps, batch sizes).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_games: usize,
    pub max_sse_subscribers: usize,
    pub broadcast_capacity: usize,
    pub game_batch_limit: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_games: 500,
            max_sse_subscribers: 100,
            broadcast_capacity: 1024,
            game_batch_limit: 100,
        }
    }
}

impl ServerConfig {
    /// Validate configuration, logging warnings for issues.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        // Warn about secrets in config file (should use env vars in production)
        if self.auth.bearer_token.is_some() {
            tracing::warn!(
                "bearer_token is set in config file — use PLAYDECK_API_TOKEN env var in production"
            );
        }

        if self.limits.max_games == 0 {
            tracing::error!("limits.max_games must be > 0");
            std::process::exit(1);
        }
        if self.limits.max_sse_subscribers == 0 {
            tracing::error!("limits.max_sse_subscribers must be > 0");
            std::process::exit(1);
        }
        if self.limits.broadcast_capacity == 0 {
            tracing::error!("limits.broadcast_capacity must be > 0");
            std::process::exit(1);
        }
        if self.limits.game_batch_limit == 0 {
            tracing::error!("limits.game_batch_limit must be > 0");
            std::process::exit(1);
        }
    }

    /// Load config from `playdeck.toml` if it exists, then apply env var
    /// overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("playdeck.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from playdeck.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse playdeck.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No playdeck.toml found, using defaults");
                ServerConfig::default()
            },
        };

        // Environment variable overrides
        if let Ok(addr) = std::env::var("PLAYDECK_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("PLAYDECK_WEB_ROOT")
            && !root.is_empty()
        {
            config.web_root = root;
        }
        if let Ok(path) = std::env::var("PLAYDECK_SEED_PATH")
            && !path.is_empty()
        {
            config.seed_path = Some(path);
        }
        if let Ok(token) = std::env::var("PLAYDECK_API_TOKEN")
            && !token.is_empty()
        {
            config.auth.bearer_token = Some(token);
        }

        // Limits overrides
        if let Ok(val) = std::env::var("PLAYDECK_MAX_GAMES")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_games = n;
        }
        if let Ok(val) = std::env::var("PLAYDECK_MAX_SSE_SUBSCRIBERS")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_sse_subscribers = n;
        }
        if let Ok(val) = std::env::var("PLAYDECK_GAME_BATCH_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.game_batch_limit = n;
        }

        config
    }
}
