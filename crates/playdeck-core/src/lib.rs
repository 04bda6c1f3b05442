pub mod category;
pub mod game;
pub mod home;
pub mod jackpot;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::category::CategoryKey;
    use crate::game::{Game, GameId};
    use crate::jackpot::Jackpot;

    /// Create a game with the given id, listed under the given category keys.
    pub fn make_game(id: &str, keys: &[&str]) -> Game {
        Game {
            categories: keys.iter().map(|k| CategoryKey::new(*k)).collect(),
            name: format!("Game {id}"),
            image: format!("/img/{id}.png"),
            id: GameId::new(id),
        }
    }

    /// Create `n` slot games with sequential ids starting at 1.
    pub fn make_games(n: usize) -> Vec<Game> {
        (0..n)
            .map(|i| make_game(&format!("game-{}", i + 1), &["slots"]))
            .collect()
    }

    /// Create a jackpot entry for the given game id.
    pub fn make_jackpot(game_id: &str, amount: f64) -> Jackpot {
        Jackpot {
            game: GameId::new(game_id),
            amount,
        }
    }
}
