//! Card Catalog Cache
//!
//! Holds the full card list of each supported game in memory. A catalog is
//! loaded from the game's remote API, or from the last persisted copy when
//! the API is unreachable, and is always replaced as a whole.

mod fetch;
mod record;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use fetch::CatalogFetcher;
pub use record::CardRecord;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API returned status {0}")]
    Status(u16),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed {game} catalog: {reason}")]
    Malformed { game: Game, reason: String },

    #[error("{game} catalog unavailable (remote: {remote}; local: {local})")]
    Unavailable {
        game: Game,
        remote: String,
        local: String,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

// ============================================================================
// Games
// ============================================================================

/// Supported card games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    /// Legend of the Five Rings LCG (fiveringsdb.com)
    FiveRings,
    /// Star Wars Destiny (swdestinydb.com)
    Destiny,
}

/// How a game's API wraps its card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{"records": [...]}`
    Records,
    /// `[...]`
    BareList,
}

impl Game {
    pub const ALL: [Game; 2] = [Game::FiveRings, Game::Destiny];

    pub fn envelope(self) -> Envelope {
        match self {
            Game::FiveRings => Envelope::Records,
            Game::Destiny => Envelope::BareList,
        }
    }

    /// Field matched against lookup queries.
    pub fn name_field(self) -> &'static str {
        match self {
            Game::FiveRings => "name_canonical",
            Game::Destiny => "label",
        }
    }

    /// File name of the persisted fallback copy.
    pub fn cache_file(self) -> &'static str {
        match self {
            Game::FiveRings => "cards.json",
            Game::Destiny => "swcards.json",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Game::FiveRings => write!(f, "L5R"),
            Game::Destiny => write!(f, "SW Destiny"),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Where a catalog's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Remote,
    LocalFallback,
}

/// Every card of one game, from exactly one successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    game: Game,
    origin: CatalogOrigin,
    records: Vec<CardRecord>,
}

impl Catalog {
    pub fn new(game: Game, origin: CatalogOrigin, records: Vec<CardRecord>) -> Self {
        Self {
            game,
            origin,
            records,
        }
    }

    pub fn game(&self) -> Game {
        self.game
    }

    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory catalogs keyed by game.
///
/// A refresh swaps the `Arc` for its game; callers holding the previous
/// catalog keep a consistent snapshot.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: HashMap<Game, Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game: Game) -> Option<Arc<Catalog>> {
        self.catalogs.get(&game).cloned()
    }

    pub fn replace(&mut self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        self.catalogs.insert(catalog.game(), Arc::clone(&catalog));
        catalog
    }

    /// Load `game` through `fetcher` and swap it in.
    ///
    /// On failure the currently held catalog, if any, is left untouched.
    pub async fn refresh(&mut self, fetcher: &CatalogFetcher, game: Game) -> Result<Arc<Catalog>> {
        let catalog = fetcher.load(game).await?;
        if catalog.is_empty() {
            log::warn!("{} catalog has no cards", game);
        }
        log::info!(
            "Loaded {} {} cards ({:?})",
            catalog.len(),
            game,
            catalog.origin()
        );
        Ok(self.replace(catalog))
    }
}
