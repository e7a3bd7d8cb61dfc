//! Die Side Decoding
//!
//! SW Destiny encodes each die side compactly: an optional sign, an
//! optional value, a face code and an optional resource cost, e.g.
//! `1RD` (1 ranged), `-` (blank), `2F3` (2 focus, costs 3).
//!
//! # Example
//!
//! ```ignore
//! let side = DieSide::parse("2F3")?;
//! assert_eq!(side.to_string(), "2:focus:3:resource:");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::fields::display_value;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Malformed die side: {0:?}")]
    Malformed(String),

    #[error("Unknown die face code {code:?} in side {side:?}")]
    UnknownCode { side: String, code: String },
}

pub type Result<T> = std::result::Result<T, DiceError>;

// ============================================================================
// Faces
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieFace {
    Blank,
    Melee,
    Ranged,
    Indirect,
    Disrupt,
    Discard,
    Focus,
    Resource,
    Special,
    Shield,
    /// `X`: value set by the card text, no icon.
    Variable,
}

impl DieFace {
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "-" => DieFace::Blank,
            "MD" => DieFace::Melee,
            "RD" => DieFace::Ranged,
            "ID" => DieFace::Indirect,
            "Dr" => DieFace::Disrupt,
            "Dc" => DieFace::Discard,
            "F" => DieFace::Focus,
            "R" => DieFace::Resource,
            "Sp" => DieFace::Special,
            "Sh" => DieFace::Shield,
            "X" => DieFace::Variable,
            _ => return None,
        })
    }

    /// Emoji name rendered as `:name:`.
    pub fn icon(self) -> Option<&'static str> {
        match self {
            DieFace::Blank => Some("blank"),
            DieFace::Melee => Some("melee"),
            DieFace::Ranged => Some("ranged"),
            DieFace::Indirect => Some("indirect"),
            DieFace::Disrupt => Some("disrupt"),
            DieFace::Discard => Some("discard"),
            DieFace::Focus => Some("focus"),
            DieFace::Resource => Some("resource"),
            DieFace::Special => Some("special"),
            DieFace::Shield => Some("shield"),
            DieFace::Variable => None,
        }
    }
}

// ============================================================================
// Sides
// ============================================================================

/// sign? value? code cost?
static SIDE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?P<sign>[-+]?)                 # Optional sign
        (?P<value>\d*?)                 # Optional value
        (?P<code>[-A-Z][a-zA-Z]?)       # Face code
        (?P<cost>\d*?)                  # Optional resource cost
        $
        ",
    )
    .expect("Failed to compile die side regex")
});

/// One decoded die side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieSide {
    pub sign: Option<char>,
    pub value: Option<u32>,
    pub face: DieFace,
    pub cost: Option<u32>,
}

impl DieSide {
    pub fn parse(raw: &str) -> Result<Self> {
        let caps = SIDE_PATTERN
            .captures(raw)
            .ok_or_else(|| DiceError::Malformed(raw.to_string()))?;

        let number = |digits: &str| -> Result<Option<u32>> {
            if digits.is_empty() {
                return Ok(None);
            }
            digits
                .parse()
                .map(Some)
                .map_err(|_| DiceError::Malformed(raw.to_string()))
        };

        let code = group(&caps, "code");
        let face = DieFace::from_code(code).ok_or_else(|| DiceError::UnknownCode {
            side: raw.to_string(),
            code: code.to_string(),
        })?;

        Ok(Self {
            sign: group(&caps, "sign").chars().next(),
            value: number(group(&caps, "value"))?,
            face,
            cost: number(group(&caps, "cost"))?,
        })
    }
}

impl fmt::Display for DieSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sign) = self.sign {
            write!(f, "{}", sign)?;
        }
        if let Some(value) = self.value {
            write!(f, "{}", value)?;
        }
        match self.face.icon() {
            Some(icon) => write!(f, ":{}:", icon)?,
            None => write!(f, "X")?,
        }
        if let Some(cost) = self.cost {
            write!(f, "{}:resource:", cost)?;
        }
        Ok(())
    }
}

fn group<'t>(caps: &regex::Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

/// Render a whole die as `[side] [side] ...`; an empty die renders as `""`.
pub fn decode_die(sides: &[Value]) -> Result<String> {
    if sides.is_empty() {
        return Ok(String::new());
    }
    let rendered = sides
        .iter()
        .map(|side| DieSide::parse(&display_value(side)).map(|s| format!("[{}]", s)))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(" "))
}
