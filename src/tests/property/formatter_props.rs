//! Property-based tests for card formatting
//!
//! Tests invariants:
//! - Title-casing is idempotent
//! - Chat markup removes every square bracket
//! - `build` is pure for both games
//! - Die side grammar

use proptest::prelude::*;
use serde_json::{json, Value};

use crate::bot::Command;
use crate::core::cards::dice::{decode_die, DieSide};
use crate::core::cards::fields::{chat_markup, title_case};
use crate::core::cards::{build, schema_for};
use crate::core::catalog::{CardRecord, Game};

// ============================================================================
// Strategies
// ============================================================================

const KNOWN_CODES: [&str; 11] = ["-", "MD", "RD", "ID", "Dr", "Dc", "F", "R", "Sp", "Sh", "X"];

fn arb_side() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("+"), Just("-")],
        prop::option::of(0u32..20),
        prop::sample::select(KNOWN_CODES.to_vec()),
        prop::option::of(1u32..5),
    )
        .prop_map(|(sign, value, code, cost)| {
            // A lone "-" reads as a blank face, not a sign.
            let sign = if code == "-" { "" } else { sign };
            format!(
                "{}{}{}{}",
                sign,
                value.map(|v| v.to_string()).unwrap_or_default(),
                code,
                cost.map(|c| c.to_string()).unwrap_or_default()
            )
        })
}

fn arb_card_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9<>/\\[\\].:]{0,80}"
}

fn arb_five_rings_card() -> impl Strategy<Value = CardRecord> {
    (
        "[a-z ]{1,20}",
        prop::sample::select(vec!["crab", "crane", "dragon", "phoenix", "neutral", "shadowlands"]),
        prop::option::of(0i64..10),
        arb_card_text(),
        any::<bool>(),
    )
        .prop_map(|(name, clan, cost, text, unique)| {
            CardRecord::try_from(json!({
                "id": name.replace(' ', "-"),
                "name": name,
                "name_canonical": name,
                "clan": clan,
                "side": "dynasty",
                "type": "character",
                "cost": cost,
                "text": text,
                "unicity": unique,
                "traits": ["bushi"],
            }))
            .unwrap()
        })
}

fn arb_destiny_card() -> impl Strategy<Value = CardRecord> {
    (
        "[a-z ]{1,20}",
        prop::sample::select(vec!["red", "yellow", "blue", "gray", "purple"]),
        prop::option::of(0i64..6),
        prop::collection::vec(arb_side(), 0..7),
        arb_card_text(),
        any::<bool>(),
    )
        .prop_map(|(label, faction, cost, sides, text, unique)| {
            CardRecord::try_from(json!({
                "code": "01001",
                "label": label,
                "faction_code": faction,
                "type_name": "character",
                "cost": cost,
                "sides": sides,
                "text": text,
                "is_unique": unique,
                "set_code": "AW",
                "set_name": "Awakenings",
                "position": 1,
            }))
            .unwrap()
        })
}

fn arb_card() -> impl Strategy<Value = (Game, CardRecord)> {
    prop_oneof![
        arb_five_rings_card().prop_map(|card| (Game::FiveRings, card)),
        arb_destiny_card().prop_map(|card| (Game::Destiny, card)),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_title_case_idempotent(s in "[ a-zA-Z0-9'-]{0,40}") {
        let once = title_case(&s);
        prop_assert_eq!(title_case(&once), once.clone());
        prop_assert_eq!(once.len(), s.len());
    }

    #[test]
    fn prop_chat_markup_has_no_brackets(text in arb_card_text()) {
        let out = chat_markup(&text);
        prop_assert!(!out.contains('['));
        prop_assert!(!out.contains(']'));
        prop_assert!(!out.contains("<b>"));
    }

    #[test]
    fn prop_build_is_pure((game, card) in arb_card()) {
        let schema = schema_for(game);
        let first = serde_json::to_string(&build(schema, &card).unwrap()).unwrap();
        let second = serde_json::to_string(&build(schema, &card).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_fallback_equals_title((game, card) in arb_card()) {
        let attachment = build(schema_for(game), &card).unwrap();
        prop_assert_eq!(attachment.fallback, attachment.title);
    }

    #[test]
    fn prop_known_sides_decode(sides in prop::collection::vec(arb_side(), 1..7)) {
        for side in &sides {
            prop_assert!(DieSide::parse(side).is_ok(), "side {:?} rejected", side);
        }
        let values: Vec<Value> = sides.iter().map(|s| json!(s)).collect();
        let decoded = decode_die(&values).unwrap();
        prop_assert_eq!(decoded.matches("] [").count(), sides.len() - 1);
    }

    #[test]
    fn prop_unknown_code_rejected(value in 0u32..10, code in "[A-Z][a-z]") {
        prop_assume!(!KNOWN_CODES.contains(&code.as_str()));
        let side = format!("{}{}", value, code);
        prop_assert!(DieSide::parse(&side).is_err());
    }

    #[test]
    fn prop_command_query_trimmed(query in "[a-z ]{0,20}", pad in " {0,3}") {
        let text = format!("!card{}{}{}", pad, query, pad);
        let parsed = Command::parse(&text);
        prop_assert_eq!(parsed, Some(Command::Card(query.trim().to_string())));
    }
}
