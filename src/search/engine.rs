use super::geo::{haversine_km, LocationTable};
use super::scoring::{query_terms, relevance_score};
use super::suggest::{suggestions, CategoryGraph};
use super::types::{SearchFilters, SearchResult, SortBy};
use crate::models::{Category, Coordinates, MarketplaceItem};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Minimum rating for `top_rated`
pub const TOP_RATED_FLOOR: f64 = 4.5;

/// Filter, score and sort an immutable item collection.
///
/// Cloning is cheap; clones share the collection and lookup tables, so one
/// engine can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    items: Arc<[MarketplaceItem]>,
    locations: Arc<LocationTable>,
    related: Arc<CategoryGraph>,
    latency: Duration,
}

/// A candidate that survived filtering, with what scoring and sorting need
struct Candidate<'a> {
    item: &'a MarketplaceItem,
    distance_km: Option<f64>,
    score: f64,
}

impl SearchEngine {
    pub fn new(
        items: impl Into<Arc<[MarketplaceItem]>>,
        locations: LocationTable,
        related: CategoryGraph,
    ) -> Self {
        Self {
            items: items.into(),
            locations: Arc::new(locations),
            related: Arc::new(related),
            latency: Duration::ZERO,
        }
    }

    /// Delay applied by `search_async` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn items(&self) -> &[MarketplaceItem] {
        &self.items
    }

    pub fn locations_table(&self) -> &LocationTable {
        &self.locations
    }

    /// Run the full pipeline: filter, score, sort, suggest, relate
    pub fn search(&self, filters: &SearchFilters) -> SearchResult {
        let reference = self.reference_point(filters);

        let mut candidates: Vec<Candidate<'_>> = self
            .items
            .iter()
            .filter_map(|item| {
                let distance_km = reference
                    .zip(self.locations.resolve_item(item))
                    .map(|(from, to)| haversine_km(from, to));
                matches_filters(item, filters, distance_km).then_some(Candidate {
                    item,
                    distance_km,
                    score: 0.0,
                })
            })
            .collect();
        debug!(
            total = self.items.len(),
            matched = candidates.len(),
            "filtered catalog"
        );

        let query = filters.query_text();
        if let Some(query) = query {
            let terms = query_terms(query);
            for candidate in &mut candidates {
                candidate.score =
                    relevance_score(candidate.item, filters, &terms, candidate.distance_km);
            }
            candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        sort_candidates(&mut candidates, filters.sort_by, reference.is_some());

        let suggestions = query
            .map(|q| suggestions(&self.items, q))
            .unwrap_or_default();
        let related_categories = match filters.category {
            Some(category) if !self.items.is_empty() => self.related.related(category),
            _ => Vec::new(),
        };

        let items: Vec<MarketplaceItem> = candidates.into_iter().map(|c| c.item.clone()).collect();
        SearchResult {
            total_count: items.len(),
            items,
            has_more: false,
            filters: filters.clone(),
            suggestions,
            related_categories,
        }
    }

    /// Same as `search`, answered after the configured latency
    pub async fn search_async(&self, filters: SearchFilters) -> SearchResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.search(&filters)
    }

    /// Every category of the closed set
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL.to_vec()
    }

    /// Distinct subcategories used by items of `category`, in catalog order
    pub fn subcategories(&self, category: Category) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for sub in self
            .items
            .iter()
            .filter(|item| item.category == category)
            .filter_map(|item| item.subcategory.as_ref())
        {
            if !found.contains(sub) {
                found.push(sub.clone());
            }
        }
        found
    }

    pub fn locations(&self) -> Vec<String> {
        self.locations.names()
    }

    pub fn items_by_category(&self, category: Category) -> Vec<MarketplaceItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    /// Up to `limit` items rated at least 4.5, best first
    pub fn top_rated(&self, limit: usize) -> Vec<MarketplaceItem> {
        let mut rated: Vec<&MarketplaceItem> = self
            .items
            .iter()
            .filter(|item| item.rating.is_some_and(|r| r >= TOP_RATED_FLOOR))
            .collect();
        rated.sort_by(|a, b| rating_of(b).total_cmp(&rating_of(a)));
        rated.into_iter().take(limit).cloned().collect()
    }

    /// Items within `radius_km` of a named place, nearest first.
    /// Items without resolvable coordinates are left out.
    pub fn items_near_location(&self, name: &str, radius_km: f64) -> Vec<MarketplaceItem> {
        let Some(origin) = self.locations.lookup(name) else {
            warn!(location = name, "unknown location, nothing is near it");
            return Vec::new();
        };

        let mut near: Vec<(f64, &MarketplaceItem)> = self
            .items
            .iter()
            .filter_map(|item| {
                let distance = haversine_km(origin, self.locations.resolve_item(item)?);
                (distance <= radius_km).then_some((distance, item))
            })
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        near.into_iter().map(|(_, item)| item.clone()).collect()
    }

    fn reference_point(&self, filters: &SearchFilters) -> Option<Coordinates> {
        let name = filters.location.as_deref()?;
        let point = self.locations.lookup(name);
        if point.is_none() && (filters.distance.is_some() || filters.sort_by == SortBy::Distance) {
            debug!(location = name, "filter location has no coordinates, distance ignored");
        }
        point
    }
}

fn rating_of(item: &MarketplaceItem) -> f64 {
    item.rating.unwrap_or(0.0)
}

fn price_of(item: &MarketplaceItem) -> f64 {
    item.price.unwrap_or(0.0)
}

/// Whether `item` passes every requested constraint. Each check is
/// independent and an absent filter field never excludes anything.
fn matches_filters(item: &MarketplaceItem, filters: &SearchFilters, distance_km: Option<f64>) -> bool {
    if let Some(query) = filters.query_text() {
        if !item.searchable_text().contains(&query.to_lowercase()) {
            return false;
        }
    }

    if filters.category.is_some_and(|c| c != item.category) {
        return false;
    }

    if let (Some(wanted), Some(actual)) = (&filters.subcategory, &item.subcategory) {
        if wanted != actual {
            return false;
        }
    }

    if let Some(wanted) = &filters.location {
        match &item.location {
            Some(actual) if actual.to_lowercase().contains(&wanted.to_lowercase()) => {}
            _ => return false,
        }
    }

    if let Some(range) = filters.price_range {
        if range.is_malformed() {
            return false;
        }
        if item.price.is_some_and(|price| !range.contains(price)) {
            return false;
        }
    }

    if let (Some(floor), Some(rating)) = (filters.rating, item.rating) {
        if rating < floor {
            return false;
        }
    }

    if let (Some(wanted), Some(stock)) = (filters.availability, item.stock()) {
        if (wanted.in_stock && !stock.in_stock)
            || (wanted.delivery && !stock.delivery)
            || (wanted.pickup && !stock.pickup)
        {
            return false;
        }
    }

    // fail-open: no coordinates on either side means no distance constraint
    if let (Some(max), Some(actual)) = (filters.distance, distance_km) {
        if actual > max {
            return false;
        }
    }

    if let (Some(wanted), Some(offered)) = (filters.accessibility, item.accessibility()) {
        if (wanted.sign_language && !offered.sign_language)
            || (wanted.audio_description && !offered.audio_description)
        {
            return false;
        }
    }

    true
}

/// Stable sorts only, so relevance order breaks ties
fn sort_candidates(candidates: &mut [Candidate<'_>], sort_by: SortBy, has_reference: bool) {
    match sort_by {
        SortBy::Relevance => {}
        SortBy::PriceLow => {
            candidates.sort_by(|a, b| price_of(a.item).total_cmp(&price_of(b.item)));
        }
        SortBy::PriceHigh => {
            candidates.sort_by(|a, b| price_of(b.item).total_cmp(&price_of(a.item)));
        }
        SortBy::Rating => {
            candidates.sort_by(|a, b| rating_of(b.item).total_cmp(&rating_of(a.item)));
        }
        SortBy::Distance if has_reference => {
            candidates.sort_by(|a, b| match (a.distance_km, b.distance_km) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        SortBy::Distance => {}
        SortBy::Newest => {
            // None sorts below Some, so reversing puts undated items last
            candidates.sort_by(|a, b| b.item.created_at.cmp(&a.item.created_at));
        }
    }
}
