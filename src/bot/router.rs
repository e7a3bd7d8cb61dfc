use std::fmt;

pub const CARD_TRIGGER: &str = "!card";
pub const RULE_TRIGGER: &str = "!rule";
pub const SWCARD_TRIGGER: &str = "!swcard";
pub const REFRESH_TRIGGER: &str = "!refresh";

/// A chat command and its query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// L5R card lookup.
    Card(String),
    /// L5R rulings lookup.
    Rule(String),
    /// SW Destiny card lookup.
    SwCard(String),
    /// Reload every catalog.
    Refresh,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Card,
    Rule,
    SwCard,
    Refresh,
}

const TRIGGERS: [(&str, Trigger); 4] = [
    (CARD_TRIGGER, Trigger::Card),
    (RULE_TRIGGER, Trigger::Rule),
    (SWCARD_TRIGGER, Trigger::SwCard),
    (REFRESH_TRIGGER, Trigger::Refresh),
];

impl Command {
    /// Find the earliest trigger in `text`; everything after it is the query.
    pub fn parse(text: &str) -> Option<Self> {
        let (start, keyword, trigger) = TRIGGERS
            .iter()
            .filter_map(|(keyword, trigger)| text.find(keyword).map(|pos| (pos, *keyword, *trigger)))
            .min_by_key(|(pos, _, _)| *pos)?;

        let query = text[start + keyword.len()..].trim().to_string();
        Some(match trigger {
            Trigger::Card => Command::Card(query),
            Trigger::Rule => Command::Rule(query),
            Trigger::SwCard => Command::SwCard(query),
            Trigger::Refresh => Command::Refresh,
        })
    }

    pub fn trigger(&self) -> &'static str {
        match self {
            Command::Card(_) => CARD_TRIGGER,
            Command::Rule(_) => RULE_TRIGGER,
            Command::SwCard(_) => SWCARD_TRIGGER,
            Command::Refresh => REFRESH_TRIGGER,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Card(q) | Command::Rule(q) | Command::SwCard(q) => {
                write!(f, "{} {}", self.trigger(), q)
            }
            Command::Refresh => write!(f, "{}", REFRESH_TRIGGER),
        }
    }
}
