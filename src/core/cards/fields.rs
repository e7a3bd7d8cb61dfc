//! Field Formatting
//!
//! Pure conversions from card record fields to display strings. A missing
//! or null field always formats to `""`.

use serde_json::Value;

use crate::core::catalog::CardRecord;

/// Name prefix shown for unique cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueMarker {
    /// Record field holding the uniqueness flag.
    pub flag: &'static str,
    pub prefix: &'static str,
}

/// Display string for a single field.
pub fn field(card: &CardRecord, key: &str) -> String {
    card.get(key).map(display_value).unwrap_or_default()
}

/// `field` followed by `title_case`.
pub fn titled(card: &CardRecord, key: &str) -> String {
    title_case(&field(card, key))
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// JSON truthiness: `true`, non-zero numbers, non-empty strings and lists.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Uppercase a letter that follows a non-letter, lowercase every other one.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Name field with the unique marker in front when the card's flag is set.
///
/// Title-casing, when asked for, applies to the name only.
pub fn display_name(card: &CardRecord, key: &str, marker: UniqueMarker, title: bool) -> String {
    let name = if title { titled(card, key) } else { field(card, key) };
    if name.is_empty() {
        return name;
    }
    if is_truthy(card.get(marker.flag)) {
        format!("{}{}", marker.prefix, name)
    } else {
        name
    }
}

/// Translate card-text markup into chat markup.
///
/// Bracketed icon names (`[military]`) become `:military:` emoji references.
pub fn chat_markup(text: &str) -> String {
    text.replace("<b>", "*")
        .replace("</b>", "*")
        .replace("<em>", "*_")
        .replace("</em>", "_*")
        .replace("<i>", "_")
        .replace("</i>", "_")
        .replace(['[', ']'], ":")
}

/// `traits` list, comma-joined and title-cased.
pub fn traits(card: &CardRecord) -> String {
    let joined = card
        .list("traits")
        .iter()
        .map(display_value)
        .collect::<Vec<_>>()
        .join(", ");
    title_case(&joined)
}

/// Card text with chat markup applied.
pub fn body_text(card: &CardRecord) -> String {
    card.str("text").map(chat_markup).unwrap_or_default()
}

// ============================================================================
// Printings
// ============================================================================

/// First element of `items` for which `pick` yields a value.
pub fn first_match<'a, T>(
    items: &'a [Value],
    pick: impl FnMut(&'a Value) -> Option<T>,
) -> Option<T> {
    items.iter().find_map(pick)
}

/// Image of the first printing that has one.
pub fn image_url(card: &CardRecord) -> String {
    first_match(card.list("pack_cards"), |p| p.get("image_url"))
        .map(display_value)
        .unwrap_or_default()
}

/// Pack id of the first printing whose pack has an id, title-cased.
pub fn pack_id(card: &CardRecord) -> String {
    first_match(card.list("pack_cards"), |p| p.get("pack")?.get("id"))
        .map(|id| title_case(&display_value(id)))
        .unwrap_or_default()
}

/// Position of the first printing that records one.
pub fn pack_position(card: &CardRecord) -> String {
    first_match(card.list("pack_cards"), |p| p.get("position"))
        .map(display_value)
        .unwrap_or_default()
}

/// Lowercase, ASCII alphanumerics separated by single dashes.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
