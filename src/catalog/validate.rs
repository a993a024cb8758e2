use crate::models::MarketplaceItem;
use std::collections::HashSet;

/// Reasons a catalog is rejected at load time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("item at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate item id: {0}")]
    DuplicateId(String),
    #[error("item {id} has a negative price ({price})")]
    NegativePrice { id: String, price: f64 },
    #[error("item {id} has a rating outside 0..=5 ({rating})")]
    RatingOutOfRange { id: String, rating: f64 },
}

/// Check the invariants the search engine relies on
pub fn validate_items(items: &[MarketplaceItem]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(CatalogError::EmptyId(position));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(CatalogError::DuplicateId(item.id.clone()));
        }
        if let Some(price) = item.price {
            if !(price >= 0.0) {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                    price,
                });
            }
        }
        if let Some(rating) = item.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: item.id.clone(),
                    rating,
                });
            }
        }
    }

    Ok(())
}
