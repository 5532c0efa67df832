use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::{CartItemView, CartOp, CartSnapshot},
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, SessionResponse, UpdateCartRequest},
        catalog::{CatalogFilters, WatchList},
        contact::ContactRequest,
        orders::{CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
    },
    entity::orders::{OrderStatus, PaymentMethod},
    models::{Contact, NamedRef, Order, OrderItem, User, Watch},
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, catalog, contact, health, orders, params, session},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        session::create_session,
        auth::login,
        auth::register,
        auth::me,
        catalog::list_watches,
        catalog::featured_watches,
        catalog::list_filters,
        catalog::get_watch,
        cart::view_cart,
        cart::add_to_cart,
        cart::clear_cart,
        cart::update_cart,
        cart::remove_from_cart,
        orders::list_orders,
        orders::checkout,
        orders::get_order,
        contact::submit_contact,
        admin::order_desk,
        admin::order_detail,
        admin::set_order_status
    ),
    components(
        schemas(
            User,
            Watch,
            NamedRef,
            Order,
            OrderItem,
            OrderStatus,
            PaymentMethod,
            Contact,
            CartOp,
            CartItemView,
            CartSnapshot,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            UpdateCartRequest,
            SessionResponse,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            ContactRequest,
            WatchList,
            CatalogFilters,
            OrderList,
            OrderWithItems,
            params::Pagination,
            params::OrderListQuery,
            Meta,
            ApiResponse<Watch>,
            ApiResponse<WatchList>,
            ApiResponse<CartSnapshot>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Watch catalog endpoints"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Orders", description = "Checkout and order endpoints"),
        (name = "Admin", description = "Staff endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Contact", description = "Contact form endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
