use crate::models::MarketplaceItem;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply catalog items
/// The search engine never cares where its items came from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every item, validated and in catalog order
    async fn load(&self) -> Result<Vec<MarketplaceItem>>;

    /// Get the name of the catalog source
    fn source_name(&self) -> &'static str;
}
