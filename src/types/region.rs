//! Administrative regions used for location filtering

use serde::{Deserialize, Serialize};

/// Default region vocabulary seeded at startup
pub const DEFAULT_REGIONS: &[&str] = &[
    "NCR - National Capital Region",
    "CAR - Cordillera Administrative Region",
    "Region I - Ilocos Region",
    "Region II - Cagayan Valley",
    "Region III - Central Luzon",
    "Region IV-A - CALABARZON",
    "MIMAROPA Region",
    "Region V - Bicol Region",
    "Region VI - Western Visayas",
    "Region VII - Central Visayas",
    "Region VIII - Eastern Visayas",
    "Region IX - Zamboanga Peninsula",
    "Region X - Northern Mindanao",
    "Region XI - Davao Region",
    "Region XII - SOCCSKSARGEN",
    "Region XIII - Caraga",
    "BARMM - Bangsamoro Autonomous Region in Muslim Mindanao",
];

/// Region reference record, keyed by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

impl Region {
    /// Build a region whose id is the slug of its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slugify(&name),
            name,
        }
    }
}

/// Lowercase, alphanumeric runs joined by single dashes
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The default vocabulary as region records
pub fn default_regions() -> Vec<Region> {
    DEFAULT_REGIONS.iter().map(|name| Region::new(*name)).collect()
}
