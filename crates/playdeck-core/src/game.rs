use serde::{Deserialize, Serialize};

use crate::category::CategoryKey;

/// Unique identifier for a game in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One playable game as listed in the lobby.
///
/// Pure wire shape: the catalog, not the type, enforces id uniqueness and
/// the non-empty category rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Category keys this game is listed under, in display priority order.
    pub categories: Vec<CategoryKey>,
    /// Display name shown on the lobby tile.
    pub name: String,
    /// Thumbnail URL or path; not validated here.
    pub image: String,
    pub id: GameId,
}

impl Game {
    pub fn has_category(&self, key: &CategoryKey) -> bool {
        self.categories.contains(key)
    }
}
