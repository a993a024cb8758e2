//! Search engine tests.
//!
//! Fixtures here are shared with the unit tests in `scoring` and `suggest`.

use super::engine::SearchEngine;
use super::geo::LocationTable;
use super::suggest::CategoryGraph;
use super::types::{AccessibilityFilter, AvailabilityFilter, PriceRange, SearchFilters, SortBy};
use crate::models::{
    Accessibility, Category, Coordinates, ItemKind, MarketplaceItem, ServiceSchedule,
    StockAvailability,
};
use chrono::{TimeZone, Utc};
use std::time::Duration;

pub(crate) const HARARE: Coordinates = Coordinates::new(-17.8292, 31.0522);
pub(crate) const BULAWAYO: Coordinates = Coordinates::new(-20.1325, 28.6265);

/// In-stock product with delivery, no location, rating or tags
pub(crate) fn product(id: &str, title: &str, description: &str, price: Option<f64>) -> MarketplaceItem {
    MarketplaceItem {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: Category::FoodAndGroceries,
        subcategory: None,
        location: None,
        coordinates: None,
        price,
        rating: None,
        tags: Vec::new(),
        created_at: None,
        kind: ItemKind::Product {
            availability: StockAvailability {
                in_stock: true,
                quantity: 10,
                delivery: true,
                pickup: false,
            },
            seller: "Test Seller".to_string(),
            condition: None,
        },
    }
}

pub(crate) fn service(id: &str, title: &str, accessibility: Option<Accessibility>) -> MarketplaceItem {
    MarketplaceItem {
        category: Category::Services,
        kind: ItemKind::Service {
            availability: ServiceSchedule::default(),
            provider: "Test Provider".to_string(),
            accessibility,
        },
        ..product(id, title, "", None)
    }
}

fn in_category(mut item: MarketplaceItem, category: Category) -> MarketplaceItem {
    item.category = category;
    item
}

fn located(mut item: MarketplaceItem, location: &str) -> MarketplaceItem {
    item.location = Some(location.to_string());
    item
}

fn engine(items: Vec<MarketplaceItem>) -> SearchEngine {
    let locations: LocationTable = [("Harare", HARARE), ("Bulawayo", BULAWAYO)]
        .into_iter()
        .collect();
    let mut graph = CategoryGraph::new();
    graph.insert(
        Category::Property,
        [Category::HomeAndGarden, Category::Services],
    );
    SearchEngine::new(items, locations, graph)
}

fn ids(items: &[MarketplaceItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

fn maize_and_laptop() -> Vec<MarketplaceItem> {
    vec![
        product("maize", "Maize Seeds", "", Some(25.0)),
        in_category(
            product("laptop", "Laptop", "", Some(999.0)),
            Category::ElectronicsAndTechnology,
        ),
    ]
}

// ============================================================
// FILTERING
// ============================================================

#[test]
fn empty_filters_return_everything_in_order() {
    let items = vec![
        product("c", "Carrots", "", Some(3.0)),
        product("a", "Apples", "", Some(9.0)),
        product("b", "Beans", "", None),
    ];
    let result = engine(items).search(&SearchFilters::default());

    assert_eq!(ids(&result.items), vec!["c", "a", "b"]);
    assert_eq!(result.total_count, 3);
    assert!(!result.has_more);
    assert!(result.suggestions.is_empty());
    assert!(result.related_categories.is_empty());
}

#[test]
fn category_filter_keeps_only_that_category() {
    let result = engine(maize_and_laptop())
        .search(&SearchFilters::default().with_category(Category::FoodAndGroceries));

    assert_eq!(ids(&result.items), vec!["maize"]);
    assert_eq!(result.total_count, 1);
    assert!(result
        .items
        .iter()
        .all(|item| item.category == Category::FoodAndGroceries));
}

#[test]
fn price_range_excludes_out_of_range_items() {
    let mut items = maize_and_laptop();
    items.push(product("free", "Free Compost", "", None));
    let result = engine(items).search(&SearchFilters::default().with_price_range(0.0, 100.0));

    assert_eq!(ids(&result.items), vec!["maize", "free"]);
    for price in result.items.iter().filter_map(|item| item.price) {
        assert!((0.0..=100.0).contains(&price));
    }
}

#[test]
fn price_range_bounds_are_inclusive_and_open_ended() {
    let items = vec![
        product("low", "Low", "", Some(10.0)),
        product("high", "High", "", Some(50.0)),
    ];
    let engine = engine(items);

    let both = engine.search(&SearchFilters::default().with_price_range(10.0, 50.0));
    assert_eq!(both.total_count, 2);

    let only_min = engine.search(&SearchFilters {
        price_range: Some(PriceRange {
            min: Some(20.0),
            max: None,
        }),
        ..SearchFilters::default()
    });
    assert_eq!(ids(&only_min.items), vec!["high"]);
}

#[test]
fn malformed_price_range_matches_nothing() {
    let result = engine(maize_and_laptop())
        .search(&SearchFilters::default().with_price_range(500.0, 100.0));
    assert!(result.items.is_empty());
    assert_eq!(result.total_count, 0);
}

#[test]
fn rating_floor_is_respected() {
    let mut good = product("good", "Good", "", None);
    good.rating = Some(4.8);
    let mut poor = product("poor", "Poor", "", None);
    poor.rating = Some(2.0);
    let unrated = product("unrated", "Unrated", "", None);

    let result = engine(vec![good, poor, unrated]).search(&SearchFilters {
        rating: Some(4.0),
        ..SearchFilters::default()
    });

    assert_eq!(ids(&result.items), vec!["good", "unrated"]);
}

#[test]
fn query_prefilter_uses_whole_query_as_substring() {
    let mut tagged = product("tagged", "Bag", "", None);
    tagged.tags = vec!["Organic Fertiliser".to_string()];
    let items = vec![tagged, product("plain", "Bag", "", None)];
    let engine = engine(items);

    let result = engine.search(&SearchFilters::default().with_query("organic fert"));
    assert_eq!(ids(&result.items), vec!["tagged"]);

    // category name is part of the haystack
    let result = engine.search(&SearchFilters::default().with_query("groceries"));
    assert_eq!(result.total_count, 2);
}

#[test]
fn subcategory_and_location_filters() {
    let mut veg = located(product("veg", "Veg Box", "", None), "Harare CBD");
    veg.subcategory = Some("Vegetables".to_string());
    let mut meat = located(product("meat", "Beef", "", None), "Bulawayo");
    meat.subcategory = Some("Meat".to_string());
    let bare = product("bare", "Salt", "", None);
    let engine = engine(vec![veg, meat, bare]);

    let by_sub = engine.search(&SearchFilters {
        subcategory: Some("Vegetables".to_string()),
        ..SearchFilters::default()
    });
    assert_eq!(ids(&by_sub.items), vec!["veg", "bare"]);

    let by_location = engine.search(&SearchFilters::default().with_location("harare"));
    assert_eq!(ids(&by_location.items), vec!["veg"]);
}

#[test]
fn location_filter_excludes_items_without_location() {
    let here = located(product("here", "Here", "", None), "Harare");
    let nowhere = product("nowhere", "Nowhere", "", None);

    let result = engine(vec![here, nowhere]).search(&SearchFilters::default().with_location("Harare"));
    assert_eq!(ids(&result.items), vec!["here"]);
}

#[test]
fn availability_applies_to_products_only() {
    let mut pickup_only = product("pickup", "Pickup Only", "", None);
    if let ItemKind::Product { availability, .. } = &mut pickup_only.kind {
        availability.delivery = false;
        availability.pickup = true;
    }
    let delivered = product("delivered", "Delivered", "", None);
    let plumber = service("plumber", "Plumber", None);

    let result = engine(vec![pickup_only, delivered, plumber]).search(&SearchFilters {
        availability: Some(AvailabilityFilter {
            in_stock: true,
            delivery: true,
            pickup: false,
        }),
        ..SearchFilters::default()
    });

    assert_eq!(ids(&result.items), vec!["delivered", "plumber"]);
}

#[test]
fn accessibility_applies_to_items_with_a_record() {
    let signed = service(
        "signed",
        "Signed Tour",
        Some(Accessibility {
            sign_language: true,
            audio_description: false,
        }),
    );
    let unsigned = service("unsigned", "Plain Tour", Some(Accessibility::default()));
    let unknown = service("unknown", "Mystery Tour", None);

    let result = engine(vec![signed, unsigned, unknown]).search(&SearchFilters {
        accessibility: Some(AccessibilityFilter {
            sign_language: true,
            audio_description: false,
        }),
        ..SearchFilters::default()
    });

    assert_eq!(ids(&result.items), vec!["signed", "unknown"]);
}

#[test]
fn distance_filter_fails_open_without_coordinates() {
    let near = located(product("near", "Near", "", None), "Harare");
    let mut far = located(product("far", "Far", "", None), "Harare North");
    far.coordinates = Some(BULAWAYO);
    let unknown = located(product("unknown", "Unknown", "", None), "Harare Outskirts");

    let result = engine(vec![near, far, unknown]).search(&SearchFilters {
        location: Some("Harare".to_string()),
        distance: Some(10.0),
        ..SearchFilters::default()
    });

    assert_eq!(ids(&result.items), vec!["near", "unknown"]);
}

#[test]
fn distance_filter_ignored_for_unknown_reference() {
    let mut item = located(product("x", "X", "", None), "Gweru");
    item.coordinates = Some(BULAWAYO);

    let result = engine(vec![item]).search(&SearchFilters {
        location: Some("Gweru".to_string()),
        distance: Some(1.0),
        ..SearchFilters::default()
    });

    assert_eq!(result.total_count, 1);
}

// ============================================================
// SCORING
// ============================================================

#[test]
fn title_match_outranks_description_match() {
    let items = vec![
        product("tools", "Garden Tools", "seeds not included", None),
        product("tomato", "Organic Tomato Seeds", "fresh seeds", None),
    ];
    let result = engine(items).search(&SearchFilters::default().with_query("seeds"));

    assert_eq!(ids(&result.items), vec!["tomato", "tools"]);
}

#[test]
fn extra_title_term_strictly_raises_rank() {
    let items = vec![
        product("without", "Bulk Pack", "tomato seeds", None),
        product("with", "Seeds Pack", "tomato seeds", None),
    ];
    let result = engine(items).search(&SearchFilters::default().with_query("seeds"));

    assert_eq!(ids(&result.items), vec!["with", "without"]);
}

#[test]
fn equal_scores_keep_catalog_order() {
    let items = vec![
        product("first", "Seeds", "", None),
        product("second", "Seeds", "", None),
    ];
    let result = engine(items).search(&SearchFilters::default().with_query("seeds"));

    assert_eq!(ids(&result.items), vec!["first", "second"]);
}

// ============================================================
// SORTING
// ============================================================

#[test]
fn price_low_is_non_decreasing_with_missing_as_zero() {
    let items = vec![
        product("mid", "Mid", "", Some(50.0)),
        product("none", "None", "", None),
        product("cheap", "Cheap", "", Some(5.0)),
        product("dear", "Dear", "", Some(500.0)),
    ];
    let engine = engine(items);

    let low = engine.search(&SearchFilters::default().with_sort(SortBy::PriceLow));
    assert_eq!(ids(&low.items), vec!["none", "cheap", "mid", "dear"]);
    let prices: Vec<f64> = low.items.iter().map(|i| i.price.unwrap_or(0.0)).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    let high = engine.search(&SearchFilters::default().with_sort(SortBy::PriceHigh));
    assert_eq!(ids(&high.items), vec!["dear", "mid", "cheap", "none"]);
}

#[test]
fn rating_sort_is_descending() {
    let mut items = Vec::new();
    for (id, rating) in [("a", Some(3.0)), ("b", None), ("c", Some(4.9)), ("d", Some(3.0))] {
        let mut item = product(id, id, "", None);
        item.rating = rating;
        items.push(item);
    }
    let result = engine(items).search(&SearchFilters::default().with_sort(SortBy::Rating));

    assert_eq!(ids(&result.items), vec!["c", "a", "d", "b"]);
}

#[test]
fn distance_sort_orders_nearest_first() {
    let mut far = located(product("far", "Far", "", None), "Harare North");
    far.coordinates = Some(BULAWAYO);
    let mut near = located(product("near", "Near", "", None), "Harare");
    near.coordinates = Some(HARARE);
    let nowhere = located(product("nowhere", "Nowhere", "", None), "Harare Outskirts");
    let engine = engine(vec![far, nowhere, near]);

    let sorted = engine.search(&SearchFilters {
        location: Some("Harare".to_string()),
        sort_by: SortBy::Distance,
        ..SearchFilters::default()
    });
    assert_eq!(ids(&sorted.items), vec!["near", "far", "nowhere"]);

    // without a reference point the order is left alone
    let untouched = engine.search(&SearchFilters::default().with_sort(SortBy::Distance));
    assert_eq!(ids(&untouched.items), vec!["far", "nowhere", "near"]);
}

#[test]
fn newest_sort_puts_undated_last() {
    let mut old = product("old", "Old", "", None);
    old.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let mut new = product("new", "New", "", None);
    new.created_at = Some(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap());
    let undated = product("undated", "Undated", "", None);

    let result = engine(vec![undated, old, new])
        .search(&SearchFilters::default().with_sort(SortBy::Newest));

    assert_eq!(ids(&result.items), vec!["new", "old", "undated"]);
}

// ============================================================
// SUGGESTIONS & RELATED CATEGORIES
// ============================================================

#[test]
fn suggestions_come_from_unfiltered_catalog() {
    let items = vec![
        in_category(product("tv", "Samsung Television", "", Some(900.0)), Category::ElectronicsAndTechnology),
        product("tea", "Tea Leaves", "", Some(2.0)),
    ];
    let result = engine(items).search(&SearchFilters {
        query: Some("tele".to_string()),
        price_range: Some(PriceRange::new(0.0, 10.0)),
        ..SearchFilters::default()
    });

    assert!(result.items.is_empty());
    assert_eq!(result.suggestions, vec!["Television"]);
}

#[test]
fn result_hints_are_bounded() {
    let items: Vec<_> = (0..30)
        .map(|i| {
            let mut item = product(&format!("p{i}"), &format!("Seedling{i} tray"), "", None);
            item.tags = vec![format!("seed-{i}")];
            item
        })
        .collect();
    let result = engine(items).search(&SearchFilters {
        query: Some("seed".to_string()),
        category: Some(Category::Agriculture),
        ..SearchFilters::default()
    });

    assert!(result.suggestions.len() <= 8);
    assert!(result.related_categories.len() <= 3);
}

#[test]
fn related_categories_follow_the_graph() {
    let house = in_category(product("house", "House", "", None), Category::Property);
    let engine = engine(vec![house]);

    let result = engine.search(&SearchFilters::default().with_category(Category::Property));
    assert_eq!(
        result.related_categories,
        vec![Category::HomeAndGarden, Category::Services]
    );

    let result = engine.search(&SearchFilters::default().with_category(Category::Jobs));
    assert_eq!(
        result.related_categories,
        vec![Category::Services, Category::ElectronicsAndTechnology]
    );
}

#[test]
fn empty_catalog_yields_empty_result() {
    let result = engine(Vec::new()).search(&SearchFilters {
        query: Some("anything".to_string()),
        category: Some(Category::Property),
        ..SearchFilters::default()
    });

    assert!(result.items.is_empty());
    assert_eq!(result.total_count, 0);
    assert!(result.suggestions.is_empty());
    assert!(result.related_categories.is_empty());
}

// ============================================================
// ACCESSORS
// ============================================================

#[test]
fn near_location_includes_same_point_and_excludes_far() {
    let mut here = product("here", "Here", "", None);
    here.coordinates = Some(HARARE);
    let mut away = product("away", "Away", "", None);
    // ~100 km north
    away.coordinates = Some(Coordinates::new(HARARE.lat + 0.9, HARARE.lng));
    let nowhere = product("nowhere", "Nowhere", "", None);
    let engine = engine(vec![away, nowhere, here]);

    assert_eq!(ids(&engine.items_near_location("Harare", 1.0)), vec!["here"]);
    assert_eq!(
        ids(&engine.items_near_location("harare", 150.0)),
        vec!["here", "away"]
    );
    assert!(engine.items_near_location("Atlantis", 10_000.0).is_empty());
}

#[test]
fn catalog_accessors() {
    let mut veg = product("veg", "Veg", "", None);
    veg.subcategory = Some("Vegetables".to_string());
    veg.rating = Some(4.6);
    let mut fruit = product("fruit", "Fruit", "", None);
    fruit.subcategory = Some("Fruit".to_string());
    fruit.rating = Some(4.9);
    let mut more_veg = product("more-veg", "More Veg", "", None);
    more_veg.subcategory = Some("Vegetables".to_string());
    more_veg.rating = Some(4.4);
    let phone = in_category(product("phone", "Phone", "", None), Category::ElectronicsAndTechnology);
    let engine = engine(vec![veg, fruit, more_veg, phone]);

    assert_eq!(engine.categories().len(), Category::ALL.len());
    assert_eq!(
        engine.subcategories(Category::FoodAndGroceries),
        vec!["Vegetables".to_string(), "Fruit".to_string()]
    );
    assert_eq!(engine.locations(), vec!["Bulawayo".to_string(), "Harare".to_string()]);
    assert_eq!(
        ids(&engine.items_by_category(Category::ElectronicsAndTechnology)),
        vec!["phone"]
    );
    assert_eq!(ids(&engine.top_rated(5)), vec!["fruit", "veg"]);
    assert_eq!(ids(&engine.top_rated(1)), vec!["fruit"]);
}

// ============================================================
// ASYNC & SERIALIZATION
// ============================================================

#[tokio::test]
async fn async_search_matches_sync_search() {
    let engine = engine(maize_and_laptop()).with_latency(Duration::from_millis(5));
    let filters = SearchFilters::default().with_query("maize");

    let result = engine.search_async(filters.clone()).await;
    assert_eq!(result, engine.search(&filters));
    assert_eq!(ids(&result.items), vec!["maize"]);
}

#[test]
fn filters_decode_from_camel_case_json() {
    let filters: SearchFilters = serde_json::from_str(
        r#"{
            "query": "seeds",
            "category": "Food & Groceries",
            "priceRange": { "min": 0, "max": 100 },
            "availability": { "inStock": true },
            "sortBy": "price-low"
        }"#,
    )
    .unwrap();

    assert_eq!(filters.category, Some(Category::FoodAndGroceries));
    assert_eq!(filters.price_range, Some(PriceRange::new(0.0, 100.0)));
    assert!(filters.availability.unwrap().in_stock);
    assert_eq!(filters.sort_by, SortBy::PriceLow);

    let result = engine(maize_and_laptop()).search(&filters);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["hasMore"], false);
    assert_eq!(json["filters"]["sortBy"], "price-low");
}
