// src/domain/listing.rs

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Marker used by the catalog for "not applicable / unknown".
pub const SENTINEL: &str = "-";

/// One property record as published in the catalog document.
///
/// Text fields missing from the document come through as empty strings.
/// The three money fields that are commonly left blank are optional, so a
/// listing without a reservation fee is distinguishable from one whose fee
/// happens to parse as zero.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, rename = "desc", deserialize_with = "text")]
    pub description: String,
    #[serde(default, rename = "img", deserialize_with = "text")]
    pub image: String,
    #[serde(default, deserialize_with = "text")]
    pub price: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(default, deserialize_with = "text")]
    pub accessible_to: String,
    #[serde(default, deserialize_with = "text")]
    pub area: String,
    #[serde(default, deserialize_with = "text")]
    pub floor_area: String,

    #[serde(default, deserialize_with = "optional_text")]
    pub reservation_fee: Option<String>,
    #[serde(default, rename = "downpayment", deserialize_with = "optional_text")]
    pub down_payment: Option<String>,
    #[serde(default, rename = "tcp", deserialize_with = "optional_text")]
    pub total_contract_price: Option<String>,
}

impl Listing {
    /// Location usable as a filter facet (not blank, not the sentinel).
    pub fn known_location(&self) -> Option<&str> {
        let loc = self.location.as_str();
        if loc.trim().is_empty() || loc == SENTINEL {
            None
        } else {
            Some(loc)
        }
    }
}

/// Catalog fields are mostly strings, but hand-edited documents sometimes
/// carry bare numbers (`"area": 80`). Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(TextOrNumber::into_string).unwrap_or_default())
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value
        .map(TextOrNumber::into_string)
        .filter(|s| !s.trim().is_empty()))
}

/// Category key -> listings, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<(String, Vec<Listing>)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a category. A replaced category keeps its position.
    pub fn insert(&mut self, category: impl Into<String>, listings: Vec<Listing>) {
        let category = category.into();
        match self.categories.iter_mut().find(|(k, _)| *k == category) {
            Some((_, existing)) => *existing = listings,
            None => self.categories.push((category, listings)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[Listing]> {
        self.categories
            .iter()
            .find(|(k, _)| k == category)
            .map(|(_, v)| v.as_slice())
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn listing_count(&self) -> usize {
        self.categories.iter().map(|(_, v)| v.len()).sum()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to arrays of listings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Catalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = Catalog::new();
                while let Some((key, listings)) = map.next_entry::<String, Vec<Listing>>()? {
                    catalog.insert(key, listings);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
