use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace category, serialized as its display name
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food & Groceries")]
    FoodAndGroceries,
    #[serde(rename = "Electronics & Technology")]
    ElectronicsAndTechnology,
    #[serde(rename = "Fashion & Clothing")]
    FashionAndClothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    #[serde(rename = "Health & Beauty")]
    HealthAndBeauty,
    Agriculture,
    Automotive,
    Property,
    Services,
    Jobs,
    Events,
    Education,
    #[serde(rename = "Digital Content")]
    DigitalContent,
    #[serde(rename = "Arts & Crafts")]
    ArtsAndCrafts,
    #[serde(rename = "Sports & Recreation")]
    SportsAndRecreation,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::FoodAndGroceries,
        Category::ElectronicsAndTechnology,
        Category::FashionAndClothing,
        Category::HomeAndGarden,
        Category::HealthAndBeauty,
        Category::Agriculture,
        Category::Automotive,
        Category::Property,
        Category::Services,
        Category::Jobs,
        Category::Events,
        Category::Education,
        Category::DigitalContent,
        Category::ArtsAndCrafts,
        Category::SportsAndRecreation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::FoodAndGroceries => "Food & Groceries",
            Category::ElectronicsAndTechnology => "Electronics & Technology",
            Category::FashionAndClothing => "Fashion & Clothing",
            Category::HomeAndGarden => "Home & Garden",
            Category::HealthAndBeauty => "Health & Beauty",
            Category::Agriculture => "Agriculture",
            Category::Automotive => "Automotive",
            Category::Property => "Property",
            Category::Services => "Services",
            Category::Jobs => "Jobs",
            Category::Events => "Events",
            Category::Education => "Education",
            Category::DigitalContent => "Digital Content",
            Category::ArtsAndCrafts => "Arts & Crafts",
            Category::SportsAndRecreation => "Sports & Recreation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(wanted.to_string()))
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Accessibility features offered by services, events and digital content
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    #[serde(default)]
    pub sign_language: bool,
    #[serde(default)]
    pub audio_description: bool,
}

/// Stock-based availability of a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockAvailability {
    pub in_stock: bool,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub pickup: bool,
}

/// Weekly schedule of a service provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSchedule {
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub hours: String,
}

/// Date from which a property can be occupied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAvailability {
    pub available_from: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Sale,
    Rent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Casual,
}

/// Variant-specific payload of a marketplace item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemKind {
    #[serde(rename_all = "camelCase")]
    Product {
        availability: StockAvailability,
        seller: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Service {
        availability: ServiceSchedule,
        provider: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessibility: Option<Accessibility>,
    },
    #[serde(rename_all = "camelCase")]
    Property {
        availability: PropertyAvailability,
        listing: Listing,
        #[serde(default)]
        bedrooms: u8,
    },
    #[serde(rename_all = "camelCase")]
    Job {
        employer: String,
        employment_type: EmploymentType,
        #[serde(default)]
        remote: bool,
    },
    #[serde(rename_all = "camelCase")]
    Event {
        starts_at: DateTime<Utc>,
        venue: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessibility: Option<Accessibility>,
    },
    #[serde(rename_all = "camelCase")]
    DigitalContent {
        format: String,
        creator: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accessibility: Option<Accessibility>,
    },
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Product { .. } => "product",
            ItemKind::Service { .. } => "service",
            ItemKind::Property { .. } => "property",
            ItemKind::Job { .. } => "job",
            ItemKind::Event { .. } => "event",
            ItemKind::DigitalContent { .. } => "digitalContent",
        }
    }
}

/// A catalog entry: common display fields plus a variant payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl MarketplaceItem {
    /// Stock record, present only for products
    pub fn stock(&self) -> Option<&StockAvailability> {
        match &self.kind {
            ItemKind::Product { availability, .. } => Some(availability),
            _ => None,
        }
    }

    pub fn accessibility(&self) -> Option<&Accessibility> {
        match &self.kind {
            ItemKind::Service { accessibility, .. }
            | ItemKind::Event { accessibility, .. }
            | ItemKind::DigitalContent { accessibility, .. } => accessibility.as_ref(),
            _ => None,
        }
    }

    /// Lowercased haystack used by the coarse query pre-filter
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.description.len() + 32);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.description);
        text.push(' ');
        text.push_str(self.category.name());
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}
