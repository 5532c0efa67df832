use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    brands, genders,
    order_items::Model as OrderItemModel,
    orders::{Model as OrderModel, OrderStatus, PaymentMethod},
    users::Model as UserModel,
    watch_types,
    watches::Model as WatchModel,
};

/// Public view of an account; never carries the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            role: model.role().to_string(),
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NamedRef {
    pub id: Uuid,
    pub name: String,
}

impl From<brands::Model> for NamedRef {
    fn from(model: brands::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<genders::Model> for NamedRef {
    fn from(model: genders::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<watch_types::Model> for NamedRef {
    fn from(model: watch_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Prices are in cents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Watch {
    pub id: Uuid,
    pub title: String,
    pub brand_id: Uuid,
    pub gender_id: Uuid,
    pub type_id: Uuid,
    pub image_url: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<WatchModel> for Watch {
    fn from(model: WatchModel) -> Self {
        Self {
            id: model.id,
            title: model.title,
            brand_id: model.brand_id,
            gender_id: model.gender_id,
            type_id: model.type_id,
            image_url: model.image_url,
            price: model.price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub total_price: i64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_country: String,
    pub email: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderModel> for Order {
    fn from(model: OrderModel) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            total_price: model.total_price,
            status: model.status,
            shipping_address: model.shipping_address,
            shipping_city: model.shipping_city,
            shipping_postal_code: model.shipping_postal_code,
            shipping_country: model.shipping_country,
            email: model.email,
            payment_method: model.payment_method,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_title: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

impl From<OrderItemModel> for OrderItem {
    fn from(model: OrderItemModel) -> Self {
        Self {
            line_total: model.line_total(),
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            product_title: model.product_title,
            unit_price: model.unit_price,
            quantity: model.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::contacts::Model> for Contact {
    fn from(model: crate::entity::contacts::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            message: model.message,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
