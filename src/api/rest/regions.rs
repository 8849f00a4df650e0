//! Region endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::state::AppState;
use crate::types::Region;

/// `{regions: [...]}`
#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<Region>,
}

/// GET /regions - The seeded region vocabulary
pub async fn list_regions(State(state): State<Arc<AppState>>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.store.regions(),
    })
}
