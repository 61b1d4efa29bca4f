pub mod listing;
pub mod numbers;
pub mod query;

pub use listing::{Catalog, Listing, SENTINEL};
pub use query::{SortKey, SORT_OPTIONS};
