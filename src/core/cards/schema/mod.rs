//! Card Schemas
//!
//! Each supported game stores cards under different field names. A
//! [`CardSchema`] answers the same questions (title, color, stats, ...)
//! for its game so that [`build`] never looks at raw field names.

mod destiny;
mod five_rings;

use thiserror::Error;

pub use destiny::DestinySchema;
pub use five_rings::FiveRingsSchema;

use super::attachment::{Attachment, AttachmentField};
use super::dice::DiceError;
use crate::core::catalog::{CardRecord, Game};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Could not read the die of {card}: {source}")]
    Dice {
        card: String,
        #[source]
        source: DiceError,
    },
}

pub type Result<T> = std::result::Result<T, FormatError>;

pub trait CardSchema: Send + Sync {
    fn game(&self) -> Game;

    /// Display name, unique marker included.
    fn title(&self, card: &CardRecord) -> String;

    fn color(&self, card: &CardRecord) -> &'static str;

    /// Header line above the title.
    fn author(&self, card: &CardRecord) -> String;

    /// Summary line under the title.
    fn summary(&self, _card: &CardRecord) -> String {
        String::new()
    }

    fn title_link(&self, card: &CardRecord) -> String;

    fn image(&self, card: &CardRecord) -> String;

    fn footer(&self, _card: &CardRecord) -> String {
        String::new()
    }

    /// Body cells, blanks already dropped.
    fn fields(&self, card: &CardRecord) -> Result<Vec<AttachmentField>>;

    /// Attachment parts the chat client should render as markup.
    fn markdown_targets(&self) -> &'static [&'static str];
}

/// Schema for `game`.
pub fn schema_for(game: Game) -> &'static dyn CardSchema {
    match game {
        Game::FiveRings => &FiveRingsSchema,
        Game::Destiny => &DestinySchema,
    }
}

/// Assemble a card attachment. Pure: equal inputs give equal outputs.
pub fn build(schema: &dyn CardSchema, card: &CardRecord) -> Result<Attachment> {
    let title = schema.title(card);
    Ok(Attachment {
        fallback: title.clone(),
        color: schema.color(card).to_string(),
        author_name: schema.author(card),
        title,
        title_link: schema.title_link(card),
        text: schema.summary(card),
        fields: schema.fields(card)?,
        image_url: schema.image(card),
        footer: schema.footer(card),
        mrkdwn_in: schema
            .markdown_targets()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}
