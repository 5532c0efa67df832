use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    cart::CartSnapshot,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems},
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, OrderStatus},
        users::Entity as Users,
        watches::{Column as WatchCol, Entity as Watches},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    notification::spawn_order_confirmation,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    session::SessionId,
    state::AppState,
};

/// Turn the session's cart into an order.
///
/// The session lock is held from snapshot to cart clear, so a second
/// submission from the same session waits and then finds an empty cart.
/// Order and items are written in one transaction. Once it commits the order
/// is returned even if clearing the cart or sending the email fails.
pub async fn place_order(
    state: &AppState,
    user: Option<&AuthUser>,
    session: SessionId,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let user = user.ok_or_else(|| AppError::unauthorized("Sign in to check out"))?;
    let account_active = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .is_some_and(|account| account.is_active);
    if !account_active {
        return Err(AppError::unauthorized("Account no longer exists"));
    }

    let shipping = payload.trimmed();
    shipping.validate()?;

    let mut locked = state.carts.lock(session).await?;
    let snapshot = locked.cart.snapshot();
    if snapshot.is_empty() {
        return Err(AppError::EmptyCart);
    }

    let txn = state.orm.begin().await?;
    let (order, items) = persist_order(&txn, user.user_id, &shipping, &snapshot).await?;
    txn.commit().await?;

    locked.cart.clear();
    if let Err(err) = locked.commit().await {
        tracing::error!(
            order_id = %order.id,
            %session,
            error = %err,
            "order placed but cart could not be cleared"
        );
    }

    let order = Order::from(order);
    let items: Vec<OrderItem> = items.into_iter().map(OrderItem::from).collect();

    tracing::info!(
        order_id = %order.id,
        user_id = %user.user_id,
        total_price = order.total_price,
        items = items.len(),
        "order placed"
    );

    spawn_order_confirmation(state.mailer.clone(), order.clone(), items.clone());

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems { order, items },
        Some(Meta::empty()),
    ))
}

async fn persist_order(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    shipping: &CheckoutRequest,
    snapshot: &CartSnapshot,
) -> AppResult<(
    crate::entity::orders::Model,
    Vec<crate::entity::order_items::Model>,
)> {
    let lines = snapshot
        .items
        .iter()
        .map(|item| {
            i32::try_from(item.quantity)
                .map(|quantity| (item, quantity))
                .map_err(|_| AppError::validation("quantity", "is too large"))
        })
        .collect::<AppResult<Vec<_>>>()?;

    // Products removed from the catalog since they were added keep their
    // frozen title and price but lose the reference.
    let product_ids: Vec<Uuid> = lines.iter().map(|(item, _)| item.product_id).collect();
    let existing: HashSet<Uuid> = Watches::find()
        .select_only()
        .column(WatchCol::Id)
        .filter(WatchCol::Id.is_in(product_ids))
        .into_tuple::<Uuid>()
        .all(txn)
        .await?
        .into_iter()
        .collect();

    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(user_id)),
        total_price: Set(snapshot.total_price),
        status: Set(OrderStatus::Pending),
        shipping_address: Set(shipping.address.clone()),
        shipping_city: Set(shipping.city.clone()),
        shipping_postal_code: Set(shipping.postal_code.clone()),
        shipping_country: Set(shipping.country.clone()),
        email: Set(shipping.email.clone()),
        payment_method: Set(shipping.payment_method),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (item, quantity) in lines {
        let product_id = existing.contains(&item.product_id).then_some(item.product_id);
        let row = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(product_id),
            product_title: Set(item.name.clone()),
            unit_price: Set(item.unit_price),
            quantity: Set(quantity),
        }
        .insert(txn)
        .await?;
        items.push(row);
    }

    Ok((order, items))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(OrderCol::UserId.eq(user.user_id));
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let mut finder = Orders::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Order confirmation view. Only the owner may read an order.
pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(
            Condition::all()
                .add(OrderCol::UserId.eq(user.user_id))
                .add(OrderCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = load_items(state, order.id).await?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub(crate) async fn load_items(state: &AppState, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    Ok(OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::ProductTitle)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect())
}
