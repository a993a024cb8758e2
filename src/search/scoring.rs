//! Additive relevance score.
//!
//! Every contribution is independent; the weights are fixed so that rankings
//! are reproducible across runs and hosts.

use super::types::SearchFilters;
use crate::models::MarketplaceItem;

pub const TITLE_TERM: f64 = 10.0;
pub const DESCRIPTION_TERM: f64 = 5.0;
pub const TAG_TERM: f64 = 8.0;
pub const CATEGORY_MATCH: f64 = 15.0;
pub const SUBCATEGORY_MATCH: f64 = 12.0;
pub const LOCATION_MATCH: f64 = 10.0;
pub const PRICE_IN_RANGE: f64 = 5.0;
pub const RATING_MARGIN: f64 = 2.0;
pub const IN_STOCK: f64 = 3.0;
pub const DELIVERY: f64 = 2.0;
pub const PICKUP: f64 = 2.0;
pub const PROXIMITY_MAX: f64 = 10.0;
pub const SIGN_LANGUAGE: f64 = 5.0;
pub const AUDIO_DESCRIPTION: f64 = 5.0;

/// Distinct lowercase whitespace-separated terms, in first-seen order
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.to_lowercase().split_whitespace() {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

/// Score one item. `distance_km` is the item's distance from the filter
/// location when both ends resolved to coordinates.
pub fn relevance_score(
    item: &MarketplaceItem,
    filters: &SearchFilters,
    terms: &[String],
    distance_km: Option<f64>,
) -> f64 {
    let mut score = 0.0;

    let title = item.title.to_lowercase();
    let description = item.description.to_lowercase();
    let tags = item.tags.join(" ").to_lowercase();

    for term in terms {
        if title.contains(term.as_str()) {
            score += TITLE_TERM;
        }
        if description.contains(term.as_str()) {
            score += DESCRIPTION_TERM;
        }
        if !item.tags.is_empty() && tags.contains(term.as_str()) {
            score += TAG_TERM;
        }
    }

    if filters.category == Some(item.category) {
        score += CATEGORY_MATCH;
    }

    if let (Some(wanted), Some(actual)) = (&filters.subcategory, &item.subcategory) {
        if wanted == actual {
            score += SUBCATEGORY_MATCH;
        }
    }

    if let (Some(wanted), Some(actual)) = (&filters.location, &item.location) {
        if actual.to_lowercase().contains(&wanted.to_lowercase()) {
            score += LOCATION_MATCH;
        }
    }

    if let (Some(range), Some(price)) = (filters.price_range, item.price) {
        if !range.is_malformed() && range.contains(price) {
            score += PRICE_IN_RANGE;
        }
    }

    if let (Some(floor), Some(rating)) = (filters.rating, item.rating) {
        if rating >= floor {
            score += (rating - floor) * RATING_MARGIN;
        }
    }

    if let (Some(wanted), Some(stock)) = (filters.availability, item.stock()) {
        if wanted.in_stock && stock.in_stock {
            score += IN_STOCK;
        }
        if wanted.delivery && stock.delivery {
            score += DELIVERY;
        }
        if wanted.pickup && stock.pickup {
            score += PICKUP;
        }
    }

    if let (Some(max), Some(actual)) = (filters.distance, distance_km) {
        if max > 0.0 && actual <= max {
            score += ((max - actual) / max * PROXIMITY_MAX).max(0.0);
        }
    }

    if let (Some(wanted), Some(offered)) = (filters.accessibility, item.accessibility()) {
        if wanted.sign_language && offered.sign_language {
            score += SIGN_LANGUAGE;
        }
        if wanted.audio_description && offered.audio_description {
            score += AUDIO_DESCRIPTION;
        }
    }

    score
}
