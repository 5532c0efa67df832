mod common;

use std::sync::Arc;

use common::{RecordingMailer, create_watch, seed_catalog, setup_state};
use uuid::Uuid;
use watch_storefront::{
    cart::CartOp,
    dto::{cart::AddToCartRequest, contact::ContactRequest},
    error::AppError,
    services::{cart_service, contact_service},
    session::SessionId,
};

#[tokio::test]
async fn adding_twice_increments_quantity() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    let watch = create_watch(&state, "Seamaster", 10000, c.brand_omega, c.men, c.diver).await.unwrap();
    let session = SessionId::generate();

    for _ in 0..2 {
        cart_service::add_to_cart(&state, session, AddToCartRequest { product_id: watch.id })
            .await
            .unwrap();
    }

    let cart = cart_service::view_cart(&state, session).await.unwrap().data.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
    assert_eq!(cart.items[0].name, "Seamaster");
    assert_eq!(cart.total_price, 20000);
}

#[tokio::test]
async fn unknown_product_is_not_added() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let session = SessionId::generate();

    let err = cart_service::add_to_cart(&state, session, AddToCartRequest { product_id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let cart = cart_service::view_cart(&state, session).await.unwrap().data.unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn decrease_at_one_removes_line() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    let watch = create_watch(&state, "Weekender", 4999, c.brand_timex, c.women, c.dress).await.unwrap();
    let session = SessionId::generate();
    cart_service::add_to_cart(&state, session, AddToCartRequest { product_id: watch.id })
        .await
        .unwrap();

    let resp = cart_service::update_cart(&state, session, watch.id, CartOp::Decrease)
        .await
        .unwrap();
    assert_eq!(resp.message, "Removed from cart");
    assert!(resp.data.unwrap().items.is_empty());

    let err = cart_service::update_cart(&state, session, watch.id, CartOp::Increase)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotInCart));
}

#[tokio::test]
async fn clear_empties_only_that_session() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    let watch = create_watch(&state, "Q Diver", 17900, c.brand_timex, c.men, c.diver).await.unwrap();
    let mine = SessionId::generate();
    let theirs = SessionId::generate();
    for session in [mine, theirs] {
        cart_service::add_to_cart(&state, session, AddToCartRequest { product_id: watch.id })
            .await
            .unwrap();
    }

    cart_service::clear_cart(&state, mine).await.unwrap();

    let mine = cart_service::view_cart(&state, mine).await.unwrap().data.unwrap();
    let theirs = cart_service::view_cart(&state, theirs).await.unwrap().data.unwrap();
    assert!(mine.items.is_empty());
    assert_eq!(theirs.item_count, 1);
}

#[tokio::test]
async fn contact_message_requires_fields() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();

    let stored = contact_service::submit_contact(
        &state,
        ContactRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            message: " Is the Seamaster water resistant? ".into(),
        },
    )
    .await
    .unwrap()
    .data
    .unwrap();
    assert_eq!(stored.message, "Is the Seamaster water resistant?");

    let err = contact_service::submit_contact(
        &state,
        ContactRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "not-an-email".into(),
            message: "Hello".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "email"));
}
