//! Search strategy selection

use serde::Deserialize;

use super::EventFilter;

/// Wildcard query text
pub const ALL_QUERY: &str = "All";

/// Which search strategy the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    Global,
    Category,
    Region,
}

/// A search as received from a client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub query: String,
    pub kind: SearchKind,
    pub region: Option<String>,
}

impl SearchRequest {
    pub fn global(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: SearchKind::Global,
            region: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            query: category.into(),
            kind: SearchKind::Category,
            region: None,
        }
    }

    pub fn in_region(query: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            kind: SearchKind::Region,
            region: Some(region.into()),
        }
    }
}

/// Pick the store filter for `request`
///
/// - `"All"` with no region: every event
/// - category search: exact category match
/// - otherwise: text match on name or description, narrowed by region when
///   one is given; `"All"` with a region filters on region alone
pub fn route(request: &SearchRequest) -> EventFilter {
    let query = request.query.trim();
    let is_all = query.eq_ignore_ascii_case(ALL_QUERY);
    let region = request
        .region
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let filter = match (is_all, region, request.kind) {
        (true, None, _) => EventFilter::All,
        (_, _, SearchKind::Category) => EventFilter::Category(query.to_string()),
        (true, Some(region), _) => EventFilter::Region(region),
        (false, region, _) => EventFilter::Text {
            needle: query.to_string(),
            region,
        },
    };

    tracing::debug!(query, kind = ?request.kind, filter = ?filter, "routed search");
    filter
}
