use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogFilters, WatchList, WatchQuery},
    error::AppResult,
    models::Watch,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_watches))
        .route("/featured", get(featured_watches))
        .route("/filters", get(list_filters))
        .route("/{id}", get(get_watch))
}

#[utoipa::path(
    get,
    path = "/api/watches",
    params(
        ("brand" = Option<String>, Query, description = "Brand name"),
        ("gender" = Option<String>, Query, description = "Gender name"),
        ("type" = Option<String>, Query, description = "Watch type name"),
        ("price" = Option<String>, Query, description = "Price band: 0-50, 51-100, 101-200, 201-500, 500+"),
        ("page" = Option<i64>, Query, description = "Page number, default 1; 9 watches per page"),
    ),
    responses(
        (status = 200, description = "Filtered, paginated watches", body = ApiResponse<WatchList>)
    ),
    tag = "Catalog"
)]
pub async fn list_watches(
    State(state): State<AppState>,
    Query(query): Query<WatchQuery>,
) -> AppResult<Json<ApiResponse<WatchList>>> {
    let resp = catalog_service::list_watches(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/watches/featured",
    responses(
        (status = 200, description = "Watches for the home page", body = ApiResponse<WatchList>)
    ),
    tag = "Catalog"
)]
pub async fn featured_watches(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<WatchList>>> {
    let resp = catalog_service::featured_watches(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/watches/filters",
    responses(
        (status = 200, description = "Brands, genders and types", body = ApiResponse<CatalogFilters>)
    ),
    tag = "Catalog"
)]
pub async fn list_filters(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CatalogFilters>>> {
    let resp = catalog_service::list_filters(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/watches/{id}",
    params(
        ("id" = Uuid, Path, description = "Watch ID")
    ),
    responses(
        (status = 200, description = "Get watch", body = ApiResponse<Watch>),
        (status = 404, description = "Watch not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_watch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Watch>>> {
    let resp = catalog_service::get_watch(&state, id).await?;
    Ok(Json(resp))
}
