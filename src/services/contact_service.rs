use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::contact::ContactRequest,
    entity::contacts::ActiveModel as ContactActive,
    error::AppResult,
    models::Contact,
    response::ApiResponse,
    state::AppState,
};

pub async fn submit_contact(
    state: &AppState,
    payload: ContactRequest,
) -> AppResult<ApiResponse<Contact>> {
    let payload = payload.trimmed();
    payload.validate()?;

    let contact = ContactActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        message: Set(payload.message),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(contact_id = %contact.id, "contact message stored");
    Ok(ApiResponse::success(
        "Thank you for your message",
        Contact::from(contact),
        None,
    ))
}
