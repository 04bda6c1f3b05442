use serde::{Deserialize, Serialize};

use crate::game::GameId;

/// A jackpot ticker entry pairing a game reference with a prize amount.
///
/// `game` carries the id of a game record; the catalog resolves and
/// validates the reference. The shape puts no constraint on `amount` —
/// zero is a legitimate post-payout reset value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jackpot {
    pub game: GameId,
    pub amount: f64,
}
