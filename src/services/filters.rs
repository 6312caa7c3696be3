// src/services/filters.rs
// DOCUMENTATION: Client-side presentation helpers
// PURPOSE: Category lists, price badges, image URLs and favorites filtering

use crate::models::{Favorite, Place, PriceRange};

/// Category choice: display label and the value sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub value: &'static str,
}

/// Filter drawer choices; the empty value means no filter
pub const FILTER_CATEGORIES: [Category; 7] = [
    Category { label: "All", value: "" },
    Category { label: "Cafés", value: "cafe" },
    Category { label: "Libraries", value: "library" },
    Category { label: "Parks", value: "park" },
    Category { label: "Restaurants", value: "restaurant" },
    Category { label: "Museums", value: "museum" },
    Category { label: "Gyms", value: "gym" },
];

/// Categories offered when adding a place
pub const PLACE_CATEGORIES: [&str; 7] = [
    "Bars",
    "Cafe",
    "Library",
    "Park",
    "Restaurant",
    "Museum",
    "Gym",
];

pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.png";

/// Price badge for a place
/// An explicit range wins; otherwise it is derived from the average price
pub fn price_badge(place: &Place) -> Option<&'static str> {
    if let Some(range) = place.price_range.as_deref().and_then(PriceRange::from_symbol) {
        return Some(range.symbol());
    }

    let avg = place.avg_price?;
    let range = if avg < 10 {
        PriceRange::Low
    } else if avg < 25 {
        PriceRange::Mid
    } else {
        PriceRange::High
    };
    Some(range.symbol())
}

/// Displayable image URL
pub fn image_url(image: Option<&str>, backend_base: &str) -> String {
    match image.map(str::trim).filter(|i| !i.is_empty()) {
        None => PLACEHOLDER_IMAGE.to_string(),
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(path) => format!(
            "{}/{}",
            backend_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
    }
}

/// Favorites whose name or address contains `term`, ignoring case
pub fn filter_favorites<'a>(favorites: &'a [Favorite], term: &str) -> Vec<&'a Favorite> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return favorites.iter().collect();
    }

    favorites
        .iter()
        .filter(|fav| {
            [fav.name.as_deref(), fav.address.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}
