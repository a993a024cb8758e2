use crate::catalog::traits::CatalogSource;
use crate::catalog::validate::validate_items;
use crate::models::{Category, Coordinates, MarketplaceItem};
use crate::search::{CategoryGraph, LocationTable};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

const SEED_ITEMS: &str = include_str!("seed.json");

/// Built-in sample catalog of a Zimbabwean community marketplace
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedCatalog;

impl SeedCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Parse the embedded items without going through the async trait
    pub fn items(&self) -> Result<Vec<MarketplaceItem>> {
        let items: Vec<MarketplaceItem> =
            serde_json::from_str(SEED_ITEMS).context("Failed to parse built-in catalog")?;
        validate_items(&items).context("Built-in catalog is invalid")?;
        Ok(items)
    }
}

#[async_trait]
impl CatalogSource for SeedCatalog {
    async fn load(&self) -> Result<Vec<MarketplaceItem>> {
        let items = self.items()?;
        debug!("Loaded {} seed items", items.len());
        Ok(items)
    }

    fn source_name(&self) -> &'static str {
        "seed"
    }
}

/// Place names the marketplace knows coordinates for
pub fn default_locations() -> LocationTable {
    [
        ("Harare", Coordinates::new(-17.8292, 31.0522)),
        ("Bulawayo", Coordinates::new(-20.1325, 28.6265)),
        ("Chitungwiza", Coordinates::new(-18.0127, 31.0756)),
        ("Mutare", Coordinates::new(-18.9707, 32.6709)),
        ("Gweru", Coordinates::new(-19.4500, 29.8167)),
        ("Kwekwe", Coordinates::new(-18.9281, 29.8149)),
        ("Masvingo", Coordinates::new(-20.0744, 30.8328)),
        ("Victoria Falls", Coordinates::new(-17.9243, 25.8572)),
    ]
    .into_iter()
    .collect()
}

/// Hand-authored "people also browse" adjacency
pub fn default_category_graph() -> CategoryGraph {
    use Category::*;

    let mut graph = CategoryGraph::new();
    graph.insert(FoodAndGroceries, [Agriculture, HomeAndGarden, HealthAndBeauty]);
    graph.insert(ElectronicsAndTechnology, [DigitalContent, Education, Services]);
    graph.insert(FashionAndClothing, [HealthAndBeauty, ArtsAndCrafts]);
    graph.insert(HomeAndGarden, [Property, Agriculture, Services]);
    graph.insert(HealthAndBeauty, [FashionAndClothing, FoodAndGroceries]);
    graph.insert(Agriculture, [FoodAndGroceries, HomeAndGarden, Services]);
    graph.insert(Automotive, [Services, ElectronicsAndTechnology]);
    graph.insert(Property, [HomeAndGarden, Services]);
    graph.insert(Services, [HomeAndGarden, Jobs, Property]);
    graph.insert(Jobs, [Education, Services]);
    graph.insert(Events, [ArtsAndCrafts, SportsAndRecreation, Education]);
    graph.insert(Education, [DigitalContent, Jobs]);
    graph.insert(DigitalContent, [Education, ElectronicsAndTechnology, Events]);
    graph.insert(ArtsAndCrafts, [FashionAndClothing, Events, HomeAndGarden]);
    graph
}
