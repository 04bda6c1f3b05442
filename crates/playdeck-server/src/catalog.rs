use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use playdeck_core::category::{CategoryKey, CategoryLabel};
use playdeck_core::game::{Game, GameId};
use playdeck_core::home::{CategorySection, HomeView};
use playdeck_core::jackpot::Jackpot;

/// Default maximum number of games stored in the catalog.
const DEFAULT_MAX_GAMES: usize = 500;

/// Default broadcast channel capacity for update fan-out.
const DEFAULT_BROADCAST_CAPACITY: usize = 1024;

/// Validation failure for a catalog mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    DuplicateGame(GameId),
    EmptyId,
    EmptyName(GameId),
    NoCategories(GameId),
    CatalogFull { max: usize },
    UnknownGame(GameId),
    InvalidAmount { game: GameId, amount: f64 },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateGame(id) => write!(f, "game {id} already exists"),
            Self::EmptyId => write!(f, "game id must not be empty"),
            Self::EmptyName(id) => write!(f, "game {id} has an empty name"),
            Self::NoCategories(id) => {
                write!(f, "game {id} must belong to at least one category")
            },
            Self::CatalogFull { max } => write!(f, "catalog is full (max {max} games)"),
            Self::UnknownGame(id) => write!(f, "no game with id {id}"),
            Self::InvalidAmount { game, amount } => {
                write!(
                    f,
                    "jackpot amount for {game} must be a finite non-negative number, got {amount}"
                )
            },
        }
    }
}

/// Broadcast notification of a catalog mutation, fanned out to SSE
/// subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogUpdate {
    GameAdded { game: Game },
    GameRemoved { id: GameId },
    JackpotChanged { jackpot: Jackpot },
}

/// Aggregate statistics about the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_games: usize,
    pub total_jackpots: usize,
    /// Number of category labels with at least one game listed.
    pub sections_populated: usize,
}

/// Authoritative in-memory collection of games and jackpots.
///
/// Owns the relational invariants the wire shapes leave open: game ids are
/// unique, every game has at least one category key, and every jackpot
/// references an existing game.
pub struct Catalog {
    games: Vec<Game>,
    jackpots: Vec<Jackpot>,
    broadcast_tx: broadcast::Sender<CatalogUpdate>,
    max_games: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_GAMES, DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a catalog with configurable capacity limits.
    pub fn with_capacity(max_games: usize, broadcast_capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(broadcast_capacity);
        Self {
            games: Vec::new(),
            jackpots: Vec::new(),
            broadcast_tx,
            max_games,
        }
    }

    /// Insert a new game after validating it. Broadcasts `GameAdded` to all
    /// subscribers on success.
    pub fn insert_game(&mut self, game: Game) -> Result<(), CatalogError> {
        if game.id.as_str().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if game.name.is_empty() {
            return Err(CatalogError::EmptyName(game.id.clone()));
        }
        if game.categories.is_empty() {
            return Err(CatalogError::NoCategories(game.id.clone()));
        }
        if self.get(&game.id).is_some() {
            return Err(CatalogError::DuplicateGame(game.id.clone()));
        }
        if self.games.len() >= self.max_games {
            return Err(CatalogError::CatalogFull {
                max: self.max_games,
            });
        }
        tracing::debug!(game = %game.id, name = %game.name, "Game added to catalog");
        let _ = self.broadcast_tx.send(CatalogUpdate::GameAdded {
            game: game.clone(),
        });
        self.games.push(game);
        Ok(())
    }

    /// Remove a game and its jackpot entry, if any. Returns true if the
    /// game existed.
    pub fn remove_game(&mut self, id: &GameId) -> bool {
        let Some(pos) = self.games.iter().position(|g| g.id == *id) else {
            return false;
        };
        self.games.remove(pos);
        // Dangling jackpot references are never left behind
        self.jackpots.retain(|j| j.game != *id);
        tracing::debug!(game = %id, "Game removed from catalog");
        let _ = self
            .broadcast_tx
            .send(CatalogUpdate::GameRemoved { id: id.clone() });
        true
    }

    /// Get a game by id.
    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == *id)
    }

    /// All games in insertion order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Games listed under the given category key, in insertion order.
    pub fn games_in(&self, key: &CategoryKey) -> Vec<&Game> {
        self.games.iter().filter(|g| g.has_category(key)).collect()
    }

    /// Whether a game belongs to the section of the given label.
    ///
    /// "Other" additionally collects games none of whose keys map to a
    /// label, so every catalogued game is reachable from some section.
    fn in_section(game: &Game, label: CategoryLabel) -> bool {
        if game.has_category(&label.key()) {
            return true;
        }
        label == CategoryLabel::Other && !game.categories.iter().any(CategoryKey::is_canonical)
    }

    /// Populated category sections in display order. Empty sections are
    /// omitted.
    pub fn sections(&self) -> Vec<CategorySection> {
        CategoryLabel::ALL
            .into_iter()
            .filter_map(|label| {
                let games: Vec<Game> = self
                    .games
                    .iter()
                    .filter(|g| Self::in_section(g, label))
                    .cloned()
                    .collect();
                if games.is_empty() {
                    None
                } else {
                    Some(CategorySection {
                        label,
                        key: label.key(),
                        games,
                    })
                }
            })
            .collect()
    }

    /// The full payload the front end renders on the home screen.
    pub fn home_view(&self) -> HomeView {
        HomeView {
            sections: self.sections(),
            jackpots: self.jackpots.clone(),
        }
    }

    /// Upsert a jackpot entry keyed by its game reference. The reference
    /// must resolve to an existing game and the amount must be finite and
    /// non-negative (zero is a valid reset value). Broadcasts
    /// `JackpotChanged` on success.
    pub fn set_jackpot(&mut self, jackpot: Jackpot) -> Result<(), CatalogError> {
        if self.get(&jackpot.game).is_none() {
            return Err(CatalogError::UnknownGame(jackpot.game.clone()));
        }
        if !jackpot.amount.is_finite() || jackpot.amount < 0.0 {
            return Err(CatalogError::InvalidAmount {
                game: jackpot.game.clone(),
                amount: jackpot.amount,
            });
        }
        tracing::debug!(game = %jackpot.game, amount = jackpot.amount, "Jackpot updated");
        let _ = self.broadcast_tx.send(CatalogUpdate::JackpotChanged {
            jackpot: jackpot.clone(),
        });
        if let Some(existing) = self.jackpots.iter_mut().find(|j| j.game == jackpot.game) {
            existing.amount = jackpot.amount;
        } else {
            self.jackpots.push(jackpot);
        }
        Ok(())
    }

    /// All jackpot entries in insertion order. Updates keep their slot.
    pub fn jackpots(&self) -> &[Jackpot] {
        &self.jackpots
    }

    /// Get the jackpot entry for a game, if any.
    pub fn jackpot_for(&self, id: &GameId) -> Option<&Jackpot> {
        self.jackpots.iter().find(|j| j.game == *id)
    }

    /// Subscribe to the broadcast channel for catalog updates.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogUpdate> {
        self.broadcast_tx.subscribe()
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_games: self.games.len(),
            total_jackpots: self.jackpots.len(),
            sections_populated: self.sections().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playdeck_core::test_helpers::{make_game, make_jackpot};

    #[test]
    fn insert_and_retrieve() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("starburst", &["slots"])).unwrap();
        assert_eq!(
            catalog.get(&GameId::new("starburst")).unwrap().name,
            "Game starburst"
        );
        assert!(catalog.get(&GameId::new("nonexistent")).is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("starburst", &["slots"])).unwrap();
        let err = catalog
            .insert_game(make_game("starburst", &["top"]))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateGame(GameId::new("starburst")));
        assert_eq!(catalog.games().len(), 1);
    }

    #[test]
    fn empty_id_rejected() {
        let mut catalog = Catalog::new();
        let err = catalog.insert_game(make_game("", &["slots"])).unwrap_err();
        assert_eq!(err, CatalogError::EmptyId);
    }

    #[test]
    fn empty_name_rejected() {
        let mut catalog = Catalog::new();
        let mut game = make_game("g1", &["slots"]);
        game.name = String::new();
        let err = catalog.insert_game(game).unwrap_err();
        assert_eq!(err, CatalogError::EmptyName(GameId::new("g1")));
    }

    #[test]
    fn empty_categories_rejected() {
        let mut catalog = Catalog::new();
        let err = catalog.insert_game(make_game("orphan", &[])).unwrap_err();
        assert_eq!(err, CatalogError::NoCategories(GameId::new("orphan")));
    }

    #[test]
    fn bounded_capacity() {
        let mut catalog = Catalog::with_capacity(2, 16);
        catalog.insert_game(make_game("g1", &["slots"])).unwrap();
        catalog.insert_game(make_game("g2", &["slots"])).unwrap();
        let err = catalog.insert_game(make_game("g3", &["slots"])).unwrap_err();
        assert_eq!(err, CatalogError::CatalogFull { max: 2 });
    }

    #[test]
    fn games_in_filters_by_key() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["slots", "top"])).unwrap();
        catalog.insert_game(make_game("g2", &["live"])).unwrap();
        catalog.insert_game(make_game("g3", &["slots"])).unwrap();

        let slots = catalog.games_in(&CategoryKey::slots());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].id, GameId::new("g1"));
        assert_eq!(slots[1].id, GameId::new("g3"));
        assert_eq!(catalog.games_in(&CategoryKey::poker()).len(), 0);
    }

    #[test]
    fn sections_group_by_label_in_display_order() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["slots"])).unwrap();
        catalog.insert_game(make_game("g2", &["top", "slots"])).unwrap();

        let sections = catalog.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, CategoryLabel::TopGames);
        assert_eq!(sections[0].games.len(), 1);
        assert_eq!(sections[1].label, CategoryLabel::Slots);
        assert_eq!(sections[1].games.len(), 2);
    }

    #[test]
    fn unknown_keys_land_in_other_section() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["megaways"])).unwrap();
        catalog.insert_game(make_game("g2", &["slots", "megaways"])).unwrap();

        let sections = catalog.sections();
        let other = sections
            .iter()
            .find(|s| s.label == CategoryLabel::Other)
            .unwrap();
        // g2 has a canonical key, so it is not orphaned
        assert_eq!(other.games.len(), 1);
        assert_eq!(other.games[0].id, GameId::new("g1"));
    }

    #[test]
    fn explicit_other_key_is_respected() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["other", "slots"])).unwrap();
        let sections = catalog.sections();
        let other = sections
            .iter()
            .find(|s| s.label == CategoryLabel::Other)
            .unwrap();
        assert_eq!(other.games.len(), 1);
    }

    #[test]
    fn jackpot_requires_existing_game() {
        let mut catalog = Catalog::new();
        let err = catalog.set_jackpot(make_jackpot("ghost", 100.0)).unwrap_err();
        assert_eq!(err, CatalogError::UnknownGame(GameId::new("ghost")));
    }

    #[test]
    fn negative_jackpot_rejected_zero_accepted() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["jackpots"])).unwrap();

        let err = catalog.set_jackpot(make_jackpot("g1", -1.0)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAmount { .. }));

        // Zero represents a freshly reset jackpot
        catalog.set_jackpot(make_jackpot("g1", 0.0)).unwrap();
        assert!((catalog.jackpot_for(&GameId::new("g1")).unwrap().amount).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_jackpot_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["jackpots"])).unwrap();
        assert!(catalog.set_jackpot(make_jackpot("g1", f64::NAN)).is_err());
        assert!(catalog.set_jackpot(make_jackpot("g1", f64::INFINITY)).is_err());
    }

    #[test]
    fn jackpot_upsert_keeps_slot() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["jackpots"])).unwrap();
        catalog.insert_game(make_game("g2", &["jackpots"])).unwrap();
        catalog.set_jackpot(make_jackpot("g1", 100.0)).unwrap();
        catalog.set_jackpot(make_jackpot("g2", 200.0)).unwrap();
        catalog.set_jackpot(make_jackpot("g1", 150.0)).unwrap();

        let jackpots = catalog.jackpots();
        assert_eq!(jackpots.len(), 2);
        assert_eq!(jackpots[0].game, GameId::new("g1"));
        assert!((jackpots[0].amount - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_game_drops_its_jackpot() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["jackpots"])).unwrap();
        catalog.set_jackpot(make_jackpot("g1", 500.0)).unwrap();

        assert!(catalog.remove_game(&GameId::new("g1")));
        assert!(catalog.get(&GameId::new("g1")).is_none());
        assert!(catalog.jackpots().is_empty());

        assert!(!catalog.remove_game(&GameId::new("g1")));
    }

    #[test]
    fn home_view_composes_sections_and_jackpots() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["slots"])).unwrap();
        catalog.insert_game(make_game("g2", &["jackpots"])).unwrap();
        catalog.set_jackpot(make_jackpot("g2", 10_000.0)).unwrap();

        let view = catalog.home_view();
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.jackpots.len(), 1);
        assert_eq!(view.jackpots[0].game, GameId::new("g2"));
    }

    #[test]
    fn stats_are_correct() {
        let mut catalog = Catalog::new();
        catalog.insert_game(make_game("g1", &["slots", "top"])).unwrap();
        catalog.insert_game(make_game("g2", &["slots"])).unwrap();
        catalog.set_jackpot(make_jackpot("g1", 100.0)).unwrap();

        let stats = catalog.stats();
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.total_jackpots, 1);
        assert_eq!(stats.sections_populated, 2);
    }

    #[tokio::test]
    async fn broadcast_subscriber_receives_updates() {
        let mut catalog = Catalog::new();
        let mut rx = catalog.subscribe();

        catalog.insert_game(make_game("g1", &["slots"])).unwrap();
        catalog.set_jackpot(make_jackpot("g1", 100.0)).unwrap();
        catalog.remove_game(&GameId::new("g1"));

        match rx.recv().await.unwrap() {
            CatalogUpdate::GameAdded { game } => assert_eq!(game.id, GameId::new("g1")),
            other => panic!("Expected GameAdded, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            CatalogUpdate::JackpotChanged { jackpot } => {
                assert!((jackpot.amount - 100.0).abs() < f64::EPSILON);
            },
            other => panic!("Expected JackpotChanged, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            CatalogUpdate::GameRemoved { id } => assert_eq!(id, GameId::new("g1")),
            other => panic!("Expected GameRemoved, got {other:?}"),
        }
    }

    #[test]
    fn update_json_is_tagged_by_kind() {
        let update = CatalogUpdate::JackpotChanged {
            jackpot: make_jackpot("g1", 42.0),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["kind"], "jackpot_changed");
        assert_eq!(json["jackpot"]["game"], "g1");
    }
}
