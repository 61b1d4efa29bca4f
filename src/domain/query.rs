// src/domain/query.rs

//! Filter and sort pipeline over one category of the catalog.
//!
//! Everything here is pure: the same inputs always give the same ordered
//! output, and `sort` is stable so listings with equal keys keep their
//! catalog order.

use crate::domain::listing::{Catalog, Listing};
use crate::domain::numbers::{parse_area_magnitude, parse_currency};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Location,
    Price,
    Area,
    Reservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Compound sort selection, written as `field-direction` (e.g. `price-desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

/// All selectable sort keys with their dropdown labels, in menu order.
pub const SORT_OPTIONS: &[(SortKey, &str)] = &[
    (SortKey::new(SortField::Location, SortDirection::Asc), "Location (A–Z)"),
    (SortKey::new(SortField::Location, SortDirection::Desc), "Location (Z–A)"),
    (SortKey::new(SortField::Price, SortDirection::Asc), "Price (low to high)"),
    (SortKey::new(SortField::Price, SortDirection::Desc), "Price (high to low)"),
    (SortKey::new(SortField::Area, SortDirection::Asc), "Area (small to large)"),
    (SortKey::new(SortField::Area, SortDirection::Desc), "Area (large to small)"),
    (SortKey::new(SortField::Reservation, SortDirection::Asc), "Reservation fee (low to high)"),
    (SortKey::new(SortField::Reservation, SortDirection::Desc), "Reservation fee (high to low)"),
];

impl SortKey {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Lenient parse for form input: empty or unknown text means "no sort".
    pub fn from_param(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse() {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::debug!("ignoring sort key: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised sort key `{0}`")]
pub struct InvalidSortKey(pub String);

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSortKey(s.to_string());
        let (field, direction) = s.rsplit_once('-').ok_or_else(invalid)?;

        let field = match field {
            "location" => SortField::Location,
            "price" => SortField::Price,
            "area" => SortField::Area,
            "reservation" => SortField::Reservation,
            _ => return Err(invalid()),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid()),
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Location => "location",
            SortField::Price => "price",
            SortField::Area => "area",
            SortField::Reservation => "reservation",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{field}-{direction}")
    }
}

/// Keep listings matching the search term (title or description,
/// case-insensitive) and the location (exact). Both are optional and combine
/// with AND.
pub fn filter(listings: Vec<Listing>, search_term: &str, location: Option<&str>) -> Vec<Listing> {
    let needle = search_term.trim().to_lowercase();
    let location = location.filter(|l| !l.is_empty());

    if needle.is_empty() && location.is_none() {
        return listings;
    }

    listings
        .into_iter()
        .filter(|l| {
            needle.is_empty()
                || l.title.to_lowercase().contains(&needle)
                || l.description.to_lowercase().contains(&needle)
        })
        .filter(|l| location.map_or(true, |loc| l.location == loc))
        .collect()
}

/// Stable sort by the given key. `None` leaves the order untouched.
pub fn sort(mut listings: Vec<Listing>, key: Option<SortKey>) -> Vec<Listing> {
    let Some(key) = key else {
        return listings;
    };

    listings.sort_by(|a, b| {
        let ord = compare(a, b, key.field);
        match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    listings
}

fn compare(a: &Listing, b: &Listing, field: SortField) -> Ordering {
    match field {
        SortField::Location => compare_locations(&a.location, &b.location),
        SortField::Price => parse_currency(&a.price).total_cmp(&parse_currency(&b.price)),
        SortField::Area => parse_area_magnitude(&a.area).total_cmp(&parse_area_magnitude(&b.area)),
        SortField::Reservation => reservation(a).total_cmp(&reservation(b)),
    }
}

/// Caseless, accent-insensitive first (`Écija` sorts with the E's), then
/// accents break ties. Case alone never does.
fn compare_locations(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| caseless(a).cmp(&caseless(b)))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn caseless(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

fn reservation(l: &Listing) -> f64 {
    l.reservation_fee.as_deref().map_or(0.0, parse_currency)
}

/// Filter then sort one category. An unknown category is an empty result.
pub fn query(
    catalog: &Catalog,
    category: &str,
    search_term: &str,
    location: Option<&str>,
    sort_key: Option<SortKey>,
) -> Vec<Listing> {
    let listings = catalog.get(category).map(<[Listing]>::to_vec).unwrap_or_default();
    sort(filter(listings, search_term, location), sort_key)
}
