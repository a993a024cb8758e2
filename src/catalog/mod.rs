pub mod json;
pub mod seed;
pub mod traits;
pub mod validate;

pub use json::JsonCatalog;
pub use seed::{default_category_graph, default_locations, SeedCatalog};
pub use traits::CatalogSource;
pub use validate::{validate_items, CatalogError};
