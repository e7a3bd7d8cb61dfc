use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::{CardRecord, Catalog, CatalogError, CatalogOrigin, Envelope, Game, Result};
use crate::config::CatalogConfig;

/// Loads catalogs over HTTP and keeps the on-disk fallback copies.
pub struct CatalogFetcher {
    client: Client,
    five_rings_url: String,
    destiny_url: String,
    cache_dir: PathBuf,
}

impl CatalogFetcher {
    pub fn new(client: Client, config: &CatalogConfig, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            five_rings_url: config.five_rings_url.clone(),
            destiny_url: config.destiny_url.clone(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Builds its own client bounded by `timeout`.
    pub fn with_timeout(
        config: &CatalogConfig,
        cache_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, config, cache_dir))
    }

    pub fn endpoint(&self, game: Game) -> &str {
        match game {
            Game::FiveRings => &self.five_rings_url,
            Game::Destiny => &self.destiny_url,
        }
    }

    pub fn cache_path(&self, game: Game) -> PathBuf {
        self.cache_dir.join(game.cache_file())
    }

    /// Remote first, persisted copy second. Never mixes the two.
    pub async fn load(&self, game: Game) -> Result<Catalog> {
        let remote_err = match self.fetch_remote(game).await {
            Ok(records) => {
                if let Err(e) = self.persist(game, &records) {
                    log::warn!(
                        "Could not persist {} catalog to {}: {}",
                        game,
                        self.cache_path(game).display(),
                        e
                    );
                }
                return Ok(Catalog::new(game, CatalogOrigin::Remote, records));
            }
            Err(e) => e,
        };

        log::warn!("Remote {} catalog fetch failed: {}; trying local copy", game, remote_err);

        match self.load_local(game) {
            Ok(records) => Ok(Catalog::new(game, CatalogOrigin::LocalFallback, records)),
            Err(local_err) => Err(CatalogError::Unavailable {
                game,
                remote: remote_err.to_string(),
                local: local_err.to_string(),
            }),
        }
    }

    pub async fn fetch_remote(&self, game: Game) -> Result<Vec<CardRecord>> {
        let url = self.endpoint(game);
        log::debug!("Fetching {} catalog from {}", game, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        unwrap_envelope(game, body)
    }

    /// Read the persisted copy; it is always a bare list.
    pub fn load_local(&self, game: Game) -> Result<Vec<CardRecord>> {
        let contents = fs::read_to_string(self.cache_path(game))?;
        let body: Value = serde_json::from_str(&contents)?;
        validate(game, body)
    }

    /// Write-then-rename; the copy on disk is never partial.
    pub fn persist(&self, game: Game, records: &[CardRecord]) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;
        let target = self.cache_path(game);
        let tmp = tmp_path(&target);
        fs::write(&tmp, serde_json::to_vec(records)?)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

fn tmp_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Strip the game-specific wrapping and validate the card list.
pub(crate) fn unwrap_envelope(game: Game, body: Value) -> Result<Vec<CardRecord>> {
    let list = match (game.envelope(), body) {
        (Envelope::BareList, list @ Value::Array(_)) => list,
        (Envelope::Records, Value::Object(mut envelope)) => {
            envelope.remove("records").ok_or_else(|| CatalogError::Malformed {
                game,
                reason: "missing `records` key".to_string(),
            })?
        }
        (_, other) => {
            return Err(CatalogError::Malformed {
                game,
                reason: format!("unexpected top-level {}", json_kind(&other)),
            })
        }
    };
    validate(game, list)
}

/// Every entry must be an object with the game's name field as a string.
fn validate(game: Game, list: Value) -> Result<Vec<CardRecord>> {
    let items = match list {
        Value::Array(items) => items,
        other => {
            return Err(CatalogError::Malformed {
                game,
                reason: format!("expected a list of cards, got {}", json_kind(&other)),
            })
        }
    };

    let name_field = game.name_field();
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record = CardRecord::try_from(item).map_err(|other| CatalogError::Malformed {
                game,
                reason: format!("entry {} is {}, not an object", index, json_kind(&other)),
            })?;
            if record.str(name_field).is_none() {
                return Err(CatalogError::Malformed {
                    game,
                    reason: format!("entry {} has no `{}`", index, name_field),
                });
            }
            Ok(record)
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
