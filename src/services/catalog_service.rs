use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogFilters, WatchList, WatchQuery},
    entity::{
        Brands, Genders, WatchTypes, brands, genders, watch_types,
        watches::{Column, Entity as Watches},
    },
    error::{AppError, AppResult},
    models::Watch,
    response::{ApiResponse, Meta},
    routes::params::clamp_page,
    state::AppState,
};

pub const CATALOG_PAGE_SIZE: i64 = 9;
pub const FEATURED_LIMIT: u64 = 12;

/// Price filter bands offered by the shop, in cents, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    UpTo50,
    From51To100,
    From101To200,
    From201To500,
    Over500,
}

impl PriceBand {
    /// Unknown values mean "no price filter".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0-50" => Some(PriceBand::UpTo50),
            "51-100" => Some(PriceBand::From51To100),
            "101-200" => Some(PriceBand::From101To200),
            "201-500" => Some(PriceBand::From201To500),
            "500+" => Some(PriceBand::Over500),
            _ => None,
        }
    }

    pub fn bounds(&self) -> (i64, Option<i64>) {
        match self {
            PriceBand::UpTo50 => (0, Some(5_000)),
            PriceBand::From51To100 => (5_001, Some(10_000)),
            PriceBand::From101To200 => (10_001, Some(20_000)),
            PriceBand::From201To500 => (20_001, Some(50_000)),
            PriceBand::Over500 => (50_001, None),
        }
    }

    pub fn contains(&self, price: i64) -> bool {
        let (low, high) = self.bounds();
        price >= low && high.is_none_or(|high| price <= high)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn filtered(query: &WatchQuery) -> Select<Watches> {
    let mut finder = Watches::find();

    if let Some(brand) = non_empty(&query.brand) {
        finder = finder
            .inner_join(Brands)
            .filter(brands::Column::Name.eq(brand));
    }
    if let Some(gender) = non_empty(&query.gender) {
        finder = finder
            .inner_join(Genders)
            .filter(genders::Column::Name.eq(gender));
    }
    if let Some(watch_type) = non_empty(&query.watch_type) {
        finder = finder
            .inner_join(WatchTypes)
            .filter(watch_types::Column::Name.eq(watch_type));
    }
    if let Some(band) = query.price.as_deref().and_then(PriceBand::parse) {
        finder = match band.bounds() {
            (low, Some(high)) => finder.filter(Column::Price.between(low, high)),
            (low, None) => finder.filter(Column::Price.gte(low)),
        };
    }

    finder
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
}

pub async fn list_watches(
    state: &AppState,
    query: WatchQuery,
) -> AppResult<ApiResponse<WatchList>> {
    let page = clamp_page(query.page);
    let limit = CATALOG_PAGE_SIZE;
    let offset = (page - 1) * limit;

    let finder = filtered(&query);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Watch::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Watches", WatchList { items }, Some(meta)))
}

pub async fn featured_watches(state: &AppState) -> AppResult<ApiResponse<WatchList>> {
    let items = Watches::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .limit(FEATURED_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Watch::from)
        .collect();

    Ok(ApiResponse::success("Featured watches", WatchList { items }, None))
}

pub async fn get_watch(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Watch>> {
    let watch = Watches::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Watch::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Watch", watch, None))
}

pub async fn list_filters(state: &AppState) -> AppResult<ApiResponse<CatalogFilters>> {
    let brands = Brands::find()
        .order_by_asc(brands::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let genders = Genders::find()
        .order_by_asc(genders::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let types = WatchTypes::find()
        .order_by_asc(watch_types::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Filters",
        CatalogFilters {
            brands,
            genders,
            types,
        },
        None,
    ))
}
