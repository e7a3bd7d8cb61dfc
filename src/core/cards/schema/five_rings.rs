use super::{CardSchema, Result};
use crate::core::cards::attachment::{is_blank, AttachmentField, DEFAULT_COLOR};
use crate::core::cards::fields::{
    body_text, display_name, field, image_url, pack_id, pack_position, slugify, title_case,
    titled, traits, UniqueMarker,
};
use crate::core::catalog::{CardRecord, Game};

const CARD_URL: &str = "https://fiveringsdb.com/card/";

const MARKER: UniqueMarker = UniqueMarker {
    flag: "unicity",
    prefix: "◦ ",
};

/// Stat cells in display order. The second key is read only when the
/// first is blank, and is shown under the first key's name.
const STATS: &[(&str, Option<&str>)] = &[
    ("cost", None),
    ("military", Some("military_bonus")),
    ("glory", None),
    ("political", Some("political_bonus")),
    ("influence", None),
];

/// Legend of the Five Rings, as served by fiveringsdb.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiveRingsSchema;

fn clan_color(clan: &str) -> &'static str {
    match clan {
        "crab" => "#001c94",
        "crane" => "#0089de",
        "dragon" => "#00a472",
        "lion" => "#cb9d00",
        "phoenix" => "#c16400",
        "scorpion" => "#a61600",
        "unicorn" => "#780098",
        _ => DEFAULT_COLOR,
    }
}

fn stat(card: &CardRecord, key: &str, bonus: Option<&str>) -> Option<AttachmentField> {
    let base = field(card, key);
    let value = match bonus {
        Some(bonus) if is_blank(&base) => field(card, bonus),
        _ => base,
    };
    AttachmentField::titled(title_case(key), value, true)
}

impl CardSchema for FiveRingsSchema {
    fn game(&self) -> Game {
        Game::FiveRings
    }

    fn title(&self, card: &CardRecord) -> String {
        display_name(card, "name", MARKER, false)
    }

    fn color(&self, card: &CardRecord) -> &'static str {
        clan_color(card.str("clan").unwrap_or_default())
    }

    fn author(&self, card: &CardRecord) -> String {
        format!(
            "{} - {} - {} [{} {}]",
            titled(card, "clan"),
            titled(card, "side"),
            titled(card, "type"),
            pack_id(card),
            pack_position(card)
        )
    }

    fn title_link(&self, card: &CardRecord) -> String {
        let id = field(card, "id");
        let slug = if id.is_empty() {
            slugify(&field(card, "name"))
        } else {
            id
        };
        format!("{}{}", CARD_URL, slug)
    }

    fn image(&self, card: &CardRecord) -> String {
        image_url(card)
    }

    fn fields(&self, card: &CardRecord) -> Result<Vec<AttachmentField>> {
        let stats = STATS.iter().map(|(key, bonus)| stat(card, key, *bonus));
        let body = [
            AttachmentField::titled("Traits", traits(card), true),
            AttachmentField::titled("Text", body_text(card), false),
        ];
        Ok(stats.chain(body).flatten().collect())
    }

    fn markdown_targets(&self) -> &'static [&'static str] {
        &["fields"]
    }
}
