use crate::core::catalog::{CardRecord, Catalog};

/// First card, in catalog order, whose name field contains `query`
/// case-insensitively. An empty query matches the first card.
pub fn find<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a CardRecord> {
    find_in(catalog.records(), catalog.game().name_field(), query)
}

pub fn find_in<'a>(records: &'a [CardRecord], name_field: &str, query: &str) -> Option<&'a CardRecord> {
    let needle = query.to_lowercase();
    records.iter().find(|card| {
        card.str(name_field)
            .map(|name| name.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}
