//! Event category vocabulary

/// Categories an event `type` may take
pub const CATEGORIES: &[&str] = &[
    "Music",
    "Sports",
    "Arts",
    "Food",
    "Technology",
    "Education",
    "Community",
    "Charity",
    "Health",
    "Outdoors",
    "Business",
    "Other",
];

/// Canonical spelling of `category`, if it belongs to the vocabulary
pub fn canonical_category(category: &str) -> Option<&'static str> {
    let category = category.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(category))
}
