use super::{CardSchema, FormatError, Result};
use crate::core::cards::attachment::{AttachmentField, DEFAULT_COLOR};
use crate::core::cards::dice::decode_die;
use crate::core::cards::fields::{body_text, display_name, field, titled, UniqueMarker};
use crate::core::catalog::{CardRecord, Game};

const CARD_URL: &str = "https://swdestinydb.com/card/";

const MARKER: UniqueMarker = UniqueMarker {
    flag: "is_unique",
    prefix: ":unique: ",
};

/// Star Wars Destiny, as served by swdestinydb.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestinySchema;

fn faction_color(faction: &str) -> &'static str {
    match faction {
        "red" => "#b22222",
        "yellow" => "#dab032",
        "blue" => "#0b609e",
        "gray" => "#979d9f",
        _ => DEFAULT_COLOR,
    }
}

fn labelled(label: &str, value: String) -> String {
    if value.is_empty() {
        value
    } else {
        format!("{}: {}", label, value)
    }
}

impl CardSchema for DestinySchema {
    fn game(&self) -> Game {
        Game::Destiny
    }

    fn title(&self, card: &CardRecord) -> String {
        display_name(card, "label", MARKER, true)
    }

    fn color(&self, card: &CardRecord) -> &'static str {
        faction_color(card.str("faction_code").unwrap_or_default())
    }

    fn author(&self, card: &CardRecord) -> String {
        ["affiliation_name", "faction_name", "rarity_name"]
            .iter()
            .map(|key| titled(card, key))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(". ")
    }

    /// `*Character - Trooper Health: 11 Points: 12/15*`
    fn summary(&self, card: &CardRecord) -> String {
        let mut kind = titled(card, "type_name");
        let subtype = titled(card, "subtype_name");
        if !subtype.is_empty() {
            kind = format!("{} - {}", kind, subtype);
        }

        let parts: Vec<String> = [
            kind,
            labelled("Health", field(card, "health")),
            labelled("Points", field(card, "points")),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!("*{}*", parts.join(" "))
        }
    }

    /// Record `url`, else the card page by code, else nothing.
    fn title_link(&self, card: &CardRecord) -> String {
        if let Some(url) = card.str("url").filter(|url| !url.is_empty()) {
            return url.to_string();
        }
        let code = field(card, "code");
        if code.is_empty() {
            code
        } else {
            format!("{}{}", CARD_URL, code)
        }
    }

    fn image(&self, card: &CardRecord) -> String {
        field(card, "imagesrc")
    }

    fn footer(&self, card: &CardRecord) -> String {
        let set_code = field(card, "set_code");
        let set_name = field(card, "set_name");
        let position = field(card, "position");
        if set_code.is_empty() && set_name.is_empty() && position.is_empty() {
            return String::new();
        }
        format!(":{}: {} #{}", set_code, set_name, position)
    }

    fn fields(&self, card: &CardRecord) -> Result<Vec<AttachmentField>> {
        let cost = field(card, "cost");
        let cost = if cost.is_empty() {
            None
        } else {
            AttachmentField::titled("Cost", format!("{} :resource:", cost), true)
        };

        let die = decode_die(card.list("sides")).map_err(|source| FormatError::Dice {
            card: field(card, "label"),
            source,
        })?;

        Ok([
            cost,
            AttachmentField::untitled(die, false),
            AttachmentField::untitled(body_text(card), false),
        ]
        .into_iter()
        .flatten()
        .collect())
    }

    fn markdown_targets(&self) -> &'static [&'static str] {
        &["fields", "text", "footer", "title", "fallback"]
    }
}
