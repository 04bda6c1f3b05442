use serde::Deserialize;

use playdeck_core::game::Game;
use playdeck_core::jackpot::Jackpot;

use crate::catalog::Catalog;

/// On-disk seed catalog: the producer-side wire shapes, verbatim.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub jackpots: Vec<Jackpot>,
}

/// Counts of what a seed load accepted and skipped.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub games_loaded: usize,
    pub games_skipped: usize,
    pub jackpots_loaded: usize,
    pub jackpots_skipped: usize,
}

/// Load a JSON seed file and ingest it through the catalog's validating
/// operations. Entries that fail validation are logged and skipped; a
/// missing or malformed file is an error, since the path was explicitly
/// configured.
pub fn load_seed(path: &str, catalog: &mut Catalog) -> Result<SeedReport, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    let seed: SeedFile =
        serde_json::from_str(&content).map_err(|e| format!("failed to parse {path}: {e}"))?;
    Ok(apply_seed(seed, catalog))
}

/// Ingest an already-parsed seed. Games first, then jackpots, so jackpot
/// references can resolve.
pub fn apply_seed(seed: SeedFile, catalog: &mut Catalog) -> SeedReport {
    let mut report = SeedReport::default();

    for game in seed.games {
        let id = game.id.clone();
        match catalog.insert_game(game) {
            Ok(()) => report.games_loaded += 1,
            Err(e) => {
                tracing::warn!(game = %id, "Skipping seed game: {e}");
                report.games_skipped += 1;
            },
        }
    }

    for jackpot in seed.jackpots {
        let game = jackpot.game.clone();
        match catalog.set_jackpot(jackpot) {
            Ok(()) => report.jackpots_loaded += 1,
            Err(e) => {
                tracing::warn!(game = %game, "Skipping seed jackpot: {e}");
                report.jackpots_skipped += 1;
            },
        }
    }

    report
}
