use serde::{Deserialize, Serialize};

use crate::category::{CategoryKey, CategoryLabel};
use crate::game::Game;
use crate::jackpot::Jackpot;

/// One rendered category section of the lobby home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySection {
    pub label: CategoryLabel,
    /// Canonical key of `label`, so the front end can wire up filtering
    /// without re-deriving the mapping.
    pub key: CategoryKey,
    pub games: Vec<Game>,
}

/// Full payload for the lobby home screen: populated category sections in
/// display order plus the current jackpot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeView {
    pub sections: Vec<CategorySection>,
    pub jackpots: Vec<Jackpot>,
}
