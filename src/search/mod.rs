//! Marketplace search.
//!
//! A search runs in a fixed order: coarse filtering, relevance scoring (only
//! when a query is present), sorting, then suggestion and related-category
//! hints. Nothing here performs I/O or mutates the catalog.
//!
//! - **`engine`**: `SearchEngine`, the pipeline and the read-only accessors.
//! - **`geo`**: Haversine distance and the place-name lookup table.
//! - **`scoring`**: relevance weights.
//! - **`suggest`**: follow-up suggestions and the category adjacency table.
//! - **`types`**: filters and results, JSON-friendly.

pub mod engine;
pub mod geo;
pub mod scoring;
pub mod suggest;
pub mod types;

pub use engine::SearchEngine;
pub use geo::{haversine_km, LocationTable, EARTH_RADIUS_KM};
pub use suggest::CategoryGraph;
pub use types::{
    AccessibilityFilter, AvailabilityFilter, PriceRange, SearchFilters, SearchResult, SortBy,
};

#[cfg(test)]
pub(crate) mod tests;
