use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use playdeck_core::category::{CategoryKey, CategoryLabel};
use playdeck_core::game::{Game, GameId};
use playdeck_core::home::HomeView;
use playdeck_core::jackpot::Jackpot;

use crate::catalog::CatalogStats;
use crate::error::AppError;
use crate::state::AppState;

/// Request body for posting games: a single record or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PostGamesBody {
    Single(Box<Game>),
    Batch(Vec<Game>),
}

/// Response for a successful game post.
#[derive(Debug, Serialize)]
pub struct PostGamesResponse {
    pub accepted: usize,
    pub game_ids: Vec<GameId>,
}

/// Validate game field lengths to prevent abuse.
fn validate_game_fields(game: &Game) -> Result<(), AppError> {
    if game.id.as_str().len() > 128 {
        return Err(AppError::BadRequest("id exceeds 128 chars".to_string()));
    }
    if game.name.len() > 256 {
        return Err(AppError::BadRequest("name exceeds 256 chars".to_string()));
    }
    if game.image.len() > 2048 {
        return Err(AppError::BadRequest("image exceeds 2048 chars".to_string()));
    }
    if game.categories.len() > 20 {
        return Err(AppError::BadRequest(
            "categories exceed 20 entries".to_string(),
        ));
    }
    for key in &game.categories {
        if key.as_str().len() > 64 {
            return Err(AppError::BadRequest(
                "category key exceeds 64 chars".to_string(),
            ));
        }
    }
    Ok(())
}

/// POST /api/v1/games — ingest a single game or a batch.
pub async fn post_games(
    State(state): State<AppState>,
    Json(body): Json<PostGamesBody>,
) -> Result<(StatusCode, Json<PostGamesResponse>), AppError> {
    let games = match body {
        PostGamesBody::Single(g) => vec![*g],
        PostGamesBody::Batch(v) => v,
    };

    if games.is_empty() {
        return Err(AppError::BadRequest("No games provided".to_string()));
    }

    let batch_limit = state.config.limits.game_batch_limit;
    if games.len() > batch_limit {
        return Err(AppError::BadRequest(format!(
            "Batch too large: {} (max {batch_limit})",
            games.len()
        )));
    }

    // Validate field lengths before inserting
    for game in &games {
        validate_game_fields(game)?;
    }

    let mut game_ids = Vec::with_capacity(games.len());
    let mut catalog = state.catalog.write().await;
    for game in games {
        game_ids.push(game.id.clone());
        // First failure aborts the batch; entries inserted before it remain
        catalog.insert_game(game)?;
    }

    Ok((
        StatusCode::CREATED,
        Json(PostGamesResponse {
            accepted: game_ids.len(),
            game_ids,
        }),
    ))
}

/// GET /api/v1/home — the assembled lobby home payload.
pub async fn get_home(State(state): State<AppState>) -> Json<HomeView> {
    let catalog = state.catalog.read().await;
    Json(catalog.home_view())
}

/// One entry of the category listing.
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub label: CategoryLabel,
    pub key: CategoryKey,
}

/// GET /api/v1/categories — the closed label set with canonical keys.
pub async fn get_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        CategoryLabel::ALL
            .into_iter()
            .map(|label| CategoryInfo {
                label,
                key: label.key(),
            })
            .collect(),
    )
}

/// Query parameters for the game listing.
#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    /// Category key filter. Any string is accepted, including
    /// non-canonical keys.
    pub category: Option<String>,
}

/// GET /api/v1/games — all games, or one category's games.
pub async fn get_games(
    State(state): State<AppState>,
    Query(query): Query<ListGamesQuery>,
) -> Json<Vec<Game>> {
    let catalog = state.catalog.read().await;
    let games = match query.category {
        Some(key) => catalog
            .games_in(&CategoryKey::new(key))
            .into_iter()
            .cloned()
            .collect(),
        None => catalog.games().to_vec(),
    };
    Json(games)
}

/// GET /api/v1/games/{game_id} — a single game.
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, AppError> {
    let catalog = state.catalog.read().await;
    catalog
        .get(&GameId::new(game_id.clone()))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Game {game_id} not found")))
}

/// DELETE /api/v1/games/{game_id} — remove a game and its jackpot.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut catalog = state.catalog.write().await;
    if catalog.remove_game(&GameId::new(game_id.clone())) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Game {game_id} not found")))
    }
}

/// GET /api/v1/jackpots — all jackpot entries.
pub async fn get_jackpots(State(state): State<AppState>) -> Json<Vec<Jackpot>> {
    let catalog = state.catalog.read().await;
    Json(catalog.jackpots().to_vec())
}

/// PUT /api/v1/jackpots — upsert one jackpot entry keyed by game reference.
pub async fn put_jackpot(
    State(state): State<AppState>,
    Json(jackpot): Json<Jackpot>,
) -> Result<Json<Jackpot>, AppError> {
    let mut catalog = state.catalog.write().await;
    catalog.set_jackpot(jackpot.clone())?;
    Ok(Json(jackpot))
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub stats: CatalogStats,
    pub recent_games: Vec<GameSummary>,
}

/// Summary of a game for the status endpoint.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub id: GameId,
    pub name: String,
    pub categories: Vec<CategoryKey>,
    pub has_jackpot: bool,
}

/// GET /api/v1/status — catalog stats plus the most recently added games.
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let catalog = state.catalog.read().await;
    let stats = catalog.stats();

    let recent_games: Vec<GameSummary> = catalog
        .games()
        .iter()
        .rev()
        .take(20)
        .map(|game| GameSummary {
            id: game.id.clone(),
            name: game.name.clone(),
            categories: game.categories.clone(),
            has_jackpot: catalog.jackpot_for(&game.id).is_some(),
        })
        .collect();

    Json(StatusResponse {
        stats,
        recent_games,
    })
}
