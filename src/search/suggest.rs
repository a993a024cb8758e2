use crate::models::{Category, MarketplaceItem};
use std::collections::HashMap;

pub const MAX_SUGGESTIONS: usize = 8;
pub const MAX_RELATED: usize = 3;

/// Fallback when a category has no hand-authored neighbours
pub const DEFAULT_RELATED: [Category; 2] = [Category::Services, Category::ElectronicsAndTechnology];

/// Follow-up query strings harvested from the whole collection.
///
/// Items are scanned in order; each contributes its category name, location,
/// tags and title words longer than three characters, in that order, when
/// they contain `query` case-insensitively. Original casing is kept.
pub fn suggestions(items: &[MarketplaceItem], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let mut found: Vec<String> = Vec::new();
    if needle.is_empty() {
        return found;
    }

    let offer = |candidate: &str, found: &mut Vec<String>| {
        if found.len() < MAX_SUGGESTIONS
            && candidate.to_lowercase().contains(&needle)
            && !found.iter().any(|s| s == candidate)
        {
            found.push(candidate.to_string());
        }
    };

    for item in items {
        offer(item.category.name(), &mut found);
        if let Some(location) = &item.location {
            offer(location, &mut found);
        }
        for tag in &item.tags {
            offer(tag, &mut found);
        }
        for word in item.title.split_whitespace().filter(|w| w.chars().count() > 3) {
            offer(word, &mut found);
        }
        if found.len() >= MAX_SUGGESTIONS {
            break;
        }
    }

    found
}

/// Hand-authored category adjacency used for "people also browse" hints
#[derive(Debug, Clone, Default)]
pub struct CategoryGraph {
    edges: HashMap<Category, Vec<Category>>,
}

impl CategoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: Category, to: impl IntoIterator<Item = Category>) {
        self.edges.insert(from, to.into_iter().collect());
    }

    /// At most three neighbours of `category`, or the default pair
    pub fn related(&self, category: Category) -> Vec<Category> {
        match self.edges.get(&category) {
            Some(neighbours) => neighbours.iter().copied().take(MAX_RELATED).collect(),
            None => DEFAULT_RELATED.to_vec(),
        }
    }
}
