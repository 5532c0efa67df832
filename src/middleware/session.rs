use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{error::AppError, session::SessionId};

pub const SESSION_HEADER: &str = "x-session-id";

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing X-Session-Id header".into()))?;

        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid X-Session-Id header".into()))?;

        Uuid::parse_str(raw.trim())
            .map(SessionId)
            .map_err(|_| AppError::BadRequest("Invalid X-Session-Id header".into()))
    }
}
