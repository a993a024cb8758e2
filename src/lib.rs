//! Community marketplace search.
//!
//! - **`models`**: catalog item types; one closed enum per item variant.
//! - **`search`**: filtering, relevance scoring, sorting and suggestions over
//!   an immutable item collection.
//! - **`catalog`**: where items come from (built-in seed data or a JSON file),
//!   validated on load.
//! - **`config`**: environment settings.

pub mod catalog;
pub mod config;
pub mod models;
pub mod search;

pub use models::{Category, MarketplaceItem};
pub use search::{SearchEngine, SearchFilters, SearchResult, SortBy};
