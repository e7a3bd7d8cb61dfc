//! Chat Bot
//!
//! Turns trigger commands into replies. [`CardBot`] owns the catalogs and
//! the HTTP clients; [`runner::Runner`] feeds it messages from a
//! [`transport::ChatTransport`].

pub mod router;
pub mod runner;
pub mod slack;
pub mod transport;

pub use router::Command;
pub use runner::Runner;
pub use transport::{ChatTransport, IncomingMessage, Reply};

use crate::core::cards::{build, fields, matcher, schema_for};
use crate::core::catalog::{CatalogError, CatalogFetcher, CatalogStore, Game};
use crate::core::rulings::RulingsClient;

pub const NOT_FOUND: &str = "Card not found";
pub const REFRESHED: &str = "Refreshed DB";

pub struct CardBot {
    store: CatalogStore,
    fetcher: CatalogFetcher,
    rulings: RulingsClient,
}

impl CardBot {
    pub fn new(fetcher: CatalogFetcher, rulings: RulingsClient) -> Self {
        Self {
            store: CatalogStore::new(),
            fetcher,
            rulings,
        }
    }

    /// Reload every game. Failed games keep their previous catalog.
    pub async fn refresh_all(&mut self) -> Vec<CatalogError> {
        let mut failures = Vec::new();
        for game in Game::ALL {
            if let Err(e) = self.store.refresh(&self.fetcher, game).await {
                log::error!("{}", e);
                failures.push(e);
            }
        }
        failures
    }

    pub async fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Card(query) => self.lookup(Game::FiveRings, &query),
            Command::SwCard(query) => self.lookup(Game::Destiny, &query),
            Command::Rule(query) => self.rulings(&query).await,
            Command::Refresh => {
                let failures = self.refresh_all().await;
                if failures.is_empty() {
                    Reply::text(REFRESHED)
                } else {
                    let reasons: Vec<String> = failures.iter().map(|e| e.to_string()).collect();
                    Reply::text(format!("{} with errors: {}", REFRESHED, reasons.join("; ")))
                }
            }
        }
    }

    fn lookup(&self, game: Game, query: &str) -> Reply {
        let Some(catalog) = self.store.get(game) else {
            return unavailable(game);
        };
        let Some(card) = matcher::find(&catalog, query) else {
            return Reply::text(NOT_FOUND);
        };

        match build(schema_for(game), card) {
            Ok(attachment) => Reply::Attachments(vec![attachment]),
            Err(e) => {
                log::warn!("Could not format {} card for {:?}: {}", game, query, e);
                Reply::text(e.to_string())
            }
        }
    }

    async fn rulings(&self, query: &str) -> Reply {
        let Some(catalog) = self.store.get(Game::FiveRings) else {
            return unavailable(Game::FiveRings);
        };
        let Some(card) = matcher::find(&catalog, query) else {
            return Reply::text(NOT_FOUND);
        };

        let id = fields::field(card, "id");
        let name = fields::field(card, "name");
        if id.is_empty() {
            return Reply::text(format!("No rulings found for {}", name));
        }

        match self.rulings.rulings(&id).await {
            Ok(rulings) if rulings.is_empty() => Reply::text(format!("No rulings found for {}", name)),
            Ok(rulings) => Reply::Attachments(rulings.iter().map(|r| r.to_attachment()).collect()),
            Err(e) => {
                log::warn!("Rulings lookup for {} failed: {}", id, e);
                Reply::text(format!("Could not fetch rulings for {}", name))
            }
        }
    }
}

fn unavailable(game: Game) -> Reply {
    Reply::text(format!("The {} card database is unavailable", game))
}
