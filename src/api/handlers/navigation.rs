use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    api::state::AppState,
    directory::Location,
    error::{AppError, Result},
    listing::constraint,
};

#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NavigationListResponse {
    pub locations: Vec<Location>,
    pub categories: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LocationDetailResponse {
    pub location: Location,
    pub nearby: Vec<Location>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NavigationQuery>,
) -> Result<Json<NavigationListResponse>> {
    let category = constraint(params.category.as_deref());
    let search = params.search.as_deref().filter(|s| !s.is_empty());

    let locations: Vec<Location> = state
        .directory
        .search(category, search)
        .into_iter()
        .cloned()
        .collect();
    let categories = state
        .directory
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();

    let total = locations.len();

    Ok(Json(NavigationListResponse {
        locations,
        categories,
        total,
    }))
}

/// The full directory, unfiltered, for rendering the campus map.
pub async fn map(State(state): State<AppState>) -> Result<Json<NavigationListResponse>> {
    let locations = state.directory.all().to_vec();
    let categories = state
        .directory
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    let total = locations.len();

    Ok(Json(NavigationListResponse {
        locations,
        categories,
        total,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<LocationDetailResponse>> {
    let location = state
        .directory
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

    let nearby = state
        .directory
        .nearby(&location)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(LocationDetailResponse { location, nearby }))
}
