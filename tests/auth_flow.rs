mod common;

use std::sync::Arc;

use common::{RecordingMailer, setup_state};
use sea_orm::{EntityTrait, PaginatorTrait};
use watch_storefront::{
    dto::auth::{LoginRequest, RegisterRequest},
    entity::Users,
    error::AppError,
    middleware::auth::decode_bearer,
    services::auth_service,
};

fn registration(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.into(),
        email: email.into(),
        password: "correct horse".into(),
        first_name: Some("Ada".into()),
        last_name: None,
    }
}

#[tokio::test]
async fn register_then_login_issues_customer_token() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();

    let user = auth_service::register_user(&state, registration(" ada ", "ada@example.com"))
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.role, "customer");

    let token = auth_service::login_user(
        &state,
        LoginRequest {
            username: "ada".into(),
            password: "correct horse".into(),
        },
    )
    .await
    .unwrap()
    .data
    .unwrap()
    .token;

    let auth = decode_bearer(&token, &state.config.jwt_secret).unwrap();
    assert_eq!(auth.user_id, user.id);
    assert_eq!(auth.role, "customer");

    let me = auth_service::current_user(&state, &auth).await.unwrap().data.unwrap();
    assert_eq!(me.email, "ada@example.com");
}

#[tokio::test]
async fn duplicate_username_is_a_field_error() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    auth_service::register_user(&state, registration("ada", "ada@example.com"))
        .await
        .unwrap();

    let err = auth_service::register_user(&state, registration("ada", "other@example.com"))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { field, message } => {
            assert_eq!(field, "username");
            assert_eq!(message, "This username is already taken.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(Users::find().count(&state.orm).await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_email_is_a_field_error() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    auth_service::register_user(&state, registration("ada", "ada@example.com"))
        .await
        .unwrap();

    let err = auth_service::register_user(&state, registration("lovelace", "ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "email"));
    assert_eq!(Users::find().count(&state.orm).await.unwrap(), 1);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let mut payload = registration("ada", "ada@example.com");
    payload.password = "short".into();

    let err = auth_service::register_user(&state, payload).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "password"));
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    auth_service::register_user(&state, registration("ada", "ada@example.com"))
        .await
        .unwrap();

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            username: "ada".into(),
            password: "incorrect".into(),
        },
    )
    .await
    .unwrap_err();
    let unknown = auth_service::login_user(
        &state,
        LoginRequest {
            username: "nobody".into(),
            password: "correct horse".into(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(wrong.to_string(), unknown.to_string());
    assert!(matches!(wrong, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let user = auth_service::register_user(&state, registration("ada", "ada@example.com"))
        .await
        .unwrap()
        .data
        .unwrap();
    let token = auth_service::issue_token(&state, &user.id, "customer").unwrap();

    assert!(decode_bearer(&format!("Bearer {token}"), "another-secret").is_err());
    assert!(decode_bearer(&token, &state.config.jwt_secret).is_err());
}
