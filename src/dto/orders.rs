use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::orders::{OrderStatus, PaymentMethod},
    models::{Order, OrderItem},
};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "shipping address is required"))]
    pub address: String,
    #[validate(length(min = 1, max = 255, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 20, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 255, message = "country is required"))]
    pub country: String,
    #[validate(email(message = "enter a valid email address"))]
    pub email: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutRequest {
    pub fn trimmed(self) -> Self {
        Self {
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
            email: self.email.trim().to_string(),
            payment_method: self.payment_method,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
