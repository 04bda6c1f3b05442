use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::stream::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::catalog::CatalogUpdate;
use crate::state::{AppState, ConnectionGuard};

fn event_name(update: &CatalogUpdate) -> &'static str {
    match update {
        CatalogUpdate::GameAdded { .. } => "game.added",
        CatalogUpdate::GameRemoved { .. } => "game.removed",
        CatalogUpdate::JackpotChanged { .. } => "jackpot.changed",
    }
}

fn event_id(update: &CatalogUpdate) -> String {
    match update {
        CatalogUpdate::GameAdded { game } => game.id.to_string(),
        CatalogUpdate::GameRemoved { id } => id.to_string(),
        CatalogUpdate::JackpotChanged { jackpot } => jackpot.game.to_string(),
    }
}

/// GET /api/v1/jackpots/stream — SSE endpoint streaming catalog updates so
/// the front end can tick jackpot amounts live.
pub async fn updates_stream(
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<SseEvent, Infallible>>>, StatusCode> {
    let max_sse = state.config.limits.max_sse_subscribers;
    let current = state.sse_subscriber_count.load(Ordering::Relaxed);
    if current >= max_sse {
        tracing::warn!(current, max = max_sse, "SSE subscriber limit reached");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let guard = ConnectionGuard::new(Arc::clone(&state.sse_subscriber_count));

    let catalog = state.catalog.read().await;
    let rx = catalog.subscribe();
    drop(catalog);

    let stream = BroadcastStream::new(rx).filter_map(
        move |result: Result<CatalogUpdate, _>| {
            let _guard = &guard;
            match result {
                Ok(update) => {
                    let json = serde_json::to_string(&update).unwrap_or_default();
                    Some(Ok(SseEvent::default()
                        .event(event_name(&update))
                        .data(json)
                        .id(event_id(&update))))
                },
                Err(e) => {
                    tracing::warn!("SSE broadcast receive error: {e}");
                    None
                },
            }
        },
    );

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
