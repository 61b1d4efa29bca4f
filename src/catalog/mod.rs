mod catalog_error;
mod loader;
mod store;

pub use catalog_error::LoadError;
pub use loader::{parse_catalog, CatalogLoader, CatalogSource};
pub use store::{category_label, distinct_locations};
