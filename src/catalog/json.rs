use crate::catalog::traits::CatalogSource;
use crate::catalog::validate::validate_items;
use crate::models::MarketplaceItem;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Catalog read from a JSON array of items on disk
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonCatalog {
    async fn load(&self) -> Result<Vec<MarketplaceItem>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog {}", self.path.display()))?;

        let items: Vec<MarketplaceItem> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog {}", self.path.display()))?;
        validate_items(&items)
            .with_context(|| format!("Catalog {} is invalid", self.path.display()))?;

        info!("Loaded {} items from {}", items.len(), self.path.display());
        Ok(items)
    }

    fn source_name(&self) -> &'static str {
        "json"
    }
}
