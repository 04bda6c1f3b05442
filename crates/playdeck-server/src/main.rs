use tracing_subscriber::EnvFilter;

use playdeck_server::build_app;
use playdeck_server::config::ServerConfig;
use playdeck_server::seed;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::load();
    config.validate();

    let listen_addr = config.listen_addr.clone();
    let seed_path = config.seed_path.clone();

    let (app, state) = build_app(config);

    if let Some(path) = seed_path {
        let mut catalog = state.catalog.write().await;
        match seed::load_seed(&path, &mut catalog) {
            Ok(report) => tracing::info!(
                games = report.games_loaded,
                jackpots = report.jackpots_loaded,
                skipped = report.games_skipped + report.jackpots_skipped,
                "Seed catalog loaded from {path}"
            ),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            },
        }
    }

    let listener = match tokio::net::TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {listen_addr}: {e}");
            std::process::exit(1);
        },
    };

    tracing::info!("Playdeck lobby server listening on {listen_addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
