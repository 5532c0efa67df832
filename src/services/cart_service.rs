use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    cart::{CartOp, CartSnapshot},
    dto::cart::{AddToCartRequest, SessionResponse},
    entity::Watches,
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    session::SessionId,
    state::AppState,
};

pub fn create_session() -> ApiResponse<SessionResponse> {
    let session = SessionId::generate();
    ApiResponse::success(
        "Session created",
        SessionResponse {
            session_id: session.0,
        },
        None,
    )
}

pub async fn view_cart(
    state: &AppState,
    session: SessionId,
) -> AppResult<ApiResponse<CartSnapshot>> {
    let cart = state.carts.read(session).await?;
    Ok(ApiResponse::success("OK", cart.snapshot(), Some(Meta::empty())))
}

pub async fn add_to_cart(
    state: &AppState,
    session: SessionId,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartSnapshot>> {
    let product = Watches::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut locked = state.carts.lock(session).await?;
    let quantity = locked.cart.add(&product).quantity;
    let cart = locked.commit().await?;

    tracing::debug!(%session, product_id = %product.id, quantity, "cart add");
    Ok(ApiResponse::success("Added to cart", cart.snapshot(), None))
}

pub async fn update_cart(
    state: &AppState,
    session: SessionId,
    product_id: Uuid,
    op: CartOp,
) -> AppResult<ApiResponse<CartSnapshot>> {
    let mut locked = state.carts.lock(session).await?;
    let remaining = locked.cart.apply(product_id, op)?;
    let cart = locked.commit().await?;

    tracing::debug!(%session, product_id = %product_id, ?op, remaining, "cart update");
    let message = if remaining == 0 {
        "Removed from cart"
    } else {
        "Cart updated"
    };
    Ok(ApiResponse::success(message, cart.snapshot(), None))
}

pub async fn clear_cart(
    state: &AppState,
    session: SessionId,
) -> AppResult<ApiResponse<CartSnapshot>> {
    let mut locked = state.carts.lock(session).await?;
    locked.cart.clear();
    let cart = locked.commit().await?;

    tracing::debug!(%session, "cart cleared");
    Ok(ApiResponse::success("Cart cleared", cart.snapshot(), None))
}
