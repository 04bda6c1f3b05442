use serde::{Deserialize, Serialize};

/// Display label for a lobby category section.
///
/// Closed set: the front end renders exactly these ten tabs, and an unknown
/// label string fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "Top Games")]
    TopGames,
    #[serde(rename = "New Games")]
    NewGames,
    #[serde(rename = "Slots")]
    Slots,
    #[serde(rename = "Jackpots")]
    Jackpots,
    #[serde(rename = "Live")]
    Live,
    #[serde(rename = "Blackjack")]
    Blackjack,
    #[serde(rename = "Roulette")]
    Roulette,
    #[serde(rename = "Table")]
    Table,
    #[serde(rename = "Poker")]
    Poker,
    #[serde(rename = "Other")]
    Other,
}

impl CategoryLabel {
    /// All labels in display order.
    pub const ALL: [CategoryLabel; 10] = [
        CategoryLabel::TopGames,
        CategoryLabel::NewGames,
        CategoryLabel::Slots,
        CategoryLabel::Jackpots,
        CategoryLabel::Live,
        CategoryLabel::Blackjack,
        CategoryLabel::Roulette,
        CategoryLabel::Table,
        CategoryLabel::Poker,
        CategoryLabel::Other,
    ];

    /// Human-readable display string, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopGames => "Top Games",
            Self::NewGames => "New Games",
            Self::Slots => "Slots",
            Self::Jackpots => "Jackpots",
            Self::Live => "Live",
            Self::Blackjack => "Blackjack",
            Self::Roulette => "Roulette",
            Self::Table => "Table",
            Self::Poker => "Poker",
            Self::Other => "Other",
        }
    }

    /// Canonical filter key for this label.
    pub fn key(self) -> CategoryKey {
        CategoryKey::new(match self {
            Self::TopGames => "top",
            Self::NewGames => "new",
            Self::Slots => "slots",
            Self::Jackpots => "jackpots",
            Self::Live => "live",
            Self::Blackjack => "blackjack",
            Self::Roulette => "roulette",
            Self::Table => "table",
            Self::Poker => "poker",
            Self::Other => "other",
        })
    }

    /// Label whose canonical key matches `key`, if any. Keys are open-ended,
    /// so non-canonical keys return `None`.
    pub fn from_key(key: &CategoryKey) -> Option<CategoryLabel> {
        Self::ALL.iter().copied().find(|label| label.key() == *key)
    }
}

impl std::fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short identifier used for filtering and grouping games.
///
/// Deliberately open-ended: any string is a valid key and nothing enforces
/// membership in the canonical set. `top`, `slots`, and `new` are the keys
/// the original contract documents; the constructors below cover the full
/// label set for convenience.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(pub String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key is the canonical key of some label.
    pub fn is_canonical(&self) -> bool {
        CategoryLabel::from_key(self).is_some()
    }

    pub fn top() -> Self {
        CategoryLabel::TopGames.key()
    }

    pub fn new_games() -> Self {
        CategoryLabel::NewGames.key()
    }

    pub fn slots() -> Self {
        CategoryLabel::Slots.key()
    }

    pub fn jackpots() -> Self {
        CategoryLabel::Jackpots.key()
    }

    pub fn live() -> Self {
        CategoryLabel::Live.key()
    }

    pub fn blackjack() -> Self {
        CategoryLabel::Blackjack.key()
    }

    pub fn roulette() -> Self {
        CategoryLabel::Roulette.key()
    }

    pub fn table() -> Self {
        CategoryLabel::Table.key()
    }

    pub fn poker() -> Self {
        CategoryLabel::Poker.key()
    }

    pub fn other() -> Self {
        CategoryLabel::Other.key()
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}
