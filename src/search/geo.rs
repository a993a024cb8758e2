use crate::models::{Coordinates, MarketplaceItem};
use std::collections::BTreeMap;

/// Mean Earth radius used by every distance computation in the crate
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Place name to coordinates lookup. Names match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    // keyed by lowercased name; value keeps the display name
    places: BTreeMap<String, (String, Coordinates)>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, coordinates: Coordinates) {
        let name = name.into();
        self.places
            .insert(name.trim().to_lowercase(), (name, coordinates));
    }

    pub fn lookup(&self, name: &str) -> Option<Coordinates> {
        self.places
            .get(&name.trim().to_lowercase())
            .map(|(_, coordinates)| *coordinates)
    }

    /// Display names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.places.values().map(|(name, _)| name.clone()).collect();
        names.sort();
        names
    }

    /// Explicit item coordinates win over a lookup of the item's location name
    pub fn resolve_item(&self, item: &MarketplaceItem) -> Option<Coordinates> {
        item.coordinates
            .or_else(|| item.location.as_deref().and_then(|name| self.lookup(name)))
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinates)> for LocationTable {
    fn from_iter<I: IntoIterator<Item = (S, Coordinates)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, coordinates) in iter {
            table.insert(name, coordinates);
        }
        table
    }
}
