use crate::domain::listing::Catalog;
use std::collections::BTreeSet;

/// Locations present in a category, for the location dropdown.
/// Sentinel and blank locations are left out; the result is sorted and unique.
pub fn distinct_locations(catalog: &Catalog, category: &str) -> Vec<String> {
    catalog
        .get(category)
        .unwrap_or_default()
        .iter()
        .filter_map(|l| l.known_location())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tab label for a category key: `"house-lot"` -> `"House Lot"`.
pub fn category_label(key: &str) -> String {
    key.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
