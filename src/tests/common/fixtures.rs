//! Test Fixtures
//!
//! Sample catalog payloads in each game's wire format, and helpers that
//! point the HTTP clients at a wiremock server.

use std::path::Path;

use reqwest::Client;
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::config::CatalogConfig;
use crate::core::catalog::{CardRecord, CatalogFetcher};
use crate::core::rulings::RulingsClient;

pub const FIVE_RINGS_PATH: &str = "/cards";
pub const DESTINY_PATH: &str = "/api/public/cards";

// =============================================================================
// Card Payloads
// =============================================================================

/// L5R card list, as found under `records`.
pub fn five_rings_cards() -> Value {
    json!([
        {
            "id": "doji-whisperer",
            "name": "Doji Whisperer",
            "name_canonical": "doji whisperer",
            "clan": "crane",
            "side": "dynasty",
            "type": "character",
            "cost": 3,
            "political": 3,
            "glory": 2,
            "unicity": false,
            "traits": ["courtier"],
            "text": "<b>Action:</b> Bow a [political] character.",
            "pack_cards": [{"pack": {"id": "core"}, "position": 27}]
        },
        {
            "id": "bayushi-manipulator",
            "name": "Bayushi Manipulator",
            "name_canonical": "bayushi manipulator",
            "clan": "scorpion",
            "side": "dynasty",
            "type": "character",
            "cost": 1,
            "military": 1,
            "political": 1,
            "glory": 0,
            "unicity": false,
            "traits": ["courtier"]
        },
        {
            "id": "fine-katana",
            "name": "Fine Katana",
            "name_canonical": "fine katana",
            "clan": "neutral",
            "side": "conflict",
            "type": "attachment",
            "cost": 0,
            "military_bonus": "+2",
            "political_bonus": "+0",
            "traits": ["weapon"]
        }
    ])
}

/// L5R API response body.
pub fn five_rings_envelope() -> Value {
    json!({ "records": five_rings_cards(), "size": 3, "success": true })
}

/// SW Destiny API response body (bare list).
pub fn destiny_cards() -> Value {
    json!([
        {
            "code": "01001",
            "label": "Captain Phasma - Elite Trooper",
            "name": "Captain Phasma",
            "faction_code": "red",
            "faction_name": "Command",
            "affiliation_name": "Villain",
            "rarity_name": "Legendary",
            "type_name": "Character",
            "health": 11,
            "points": "12/15",
            "is_unique": true,
            "sides": ["1RD", "2RD", "1F", "1Dc", "1R", "-"],
            "set_code": "AW",
            "set_name": "Awakenings",
            "position": 1
        },
        {
            "code": "01099",
            "label": "Broken Die",
            "faction_code": "gray",
            "sides": ["1RD", "1ZZ"]
        }
    ])
}

pub fn records(list: &Value) -> Vec<CardRecord> {
    serde_json::from_value(list.clone()).expect("fixture is a list of objects")
}

// =============================================================================
// Client Wiring
// =============================================================================

pub fn catalog_config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        five_rings_url: format!("{}{}", server.uri(), FIVE_RINGS_PATH),
        destiny_url: format!("{}{}", server.uri(), DESTINY_PATH),
        rulings_base_url: server.uri(),
        cache_dir: None,
    }
}

pub fn mock_fetcher(server: &MockServer, cache_dir: &Path) -> CatalogFetcher {
    CatalogFetcher::new(Client::new(), &catalog_config(server), cache_dir)
}

pub fn mock_rulings(server: &MockServer) -> RulingsClient {
    RulingsClient::new(Client::new(), &server.uri())
}
