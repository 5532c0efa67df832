use axum::{Json, Router, http::StatusCode, routing::post};

use crate::{dto::cart::SessionResponse, response::ApiResponse, services::cart_service};

pub fn router() -> Router<crate::state::AppState> {
    Router::new().route("/", post(create_session))
}

#[utoipa::path(
    post,
    path = "/api/session",
    responses(
        (status = 201, description = "Issue a cart session id for the X-Session-Id header", body = ApiResponse<SessionResponse>)
    ),
    tag = "Cart"
)]
pub async fn create_session() -> (StatusCode, Json<ApiResponse<SessionResponse>>) {
    (StatusCode::CREATED, Json(cart_service::create_session()))
}
