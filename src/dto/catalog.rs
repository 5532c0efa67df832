use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{NamedRef, Watch};

/// Shop filters. Each present, non-empty value narrows the result.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WatchQuery {
    pub brand: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "type")]
    pub watch_type: Option<String>,
    /// One of `0-50`, `51-100`, `101-200`, `201-500`, `500+`.
    pub price: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WatchList {
    pub items: Vec<Watch>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogFilters {
    pub brands: Vec<NamedRef>,
    pub genders: Vec<NamedRef>,
    pub types: Vec<NamedRef>,
}
