mod common;

use std::sync::Arc;

use common::{RecordingMailer, create_watch, seed_catalog, setup_state};
use uuid::Uuid;
use watch_storefront::{
    dto::catalog::WatchQuery,
    error::AppError,
    routes::params::MAX_PAGE,
    services::catalog_service::{self, CATALOG_PAGE_SIZE},
};

#[tokio::test]
async fn filters_by_brand_gender_and_type() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    create_watch(&state, "Seamaster", 520000, c.brand_omega, c.men, c.diver).await.unwrap();
    create_watch(&state, "Ladymatic", 610000, c.brand_omega, c.women, c.dress).await.unwrap();
    create_watch(&state, "Q Diver", 17900, c.brand_timex, c.men, c.diver).await.unwrap();

    let omega = catalog_service::list_watches(
        &state,
        WatchQuery {
            brand: Some("Omega".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(omega.meta.unwrap().total, Some(2));

    let men_divers = catalog_service::list_watches(
        &state,
        WatchQuery {
            gender: Some("Men".into()),
            watch_type: Some("Diver".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .data
    .unwrap();
    let mut titles: Vec<_> = men_divers.items.iter().map(|w| w.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, ["Q Diver", "Seamaster"]);

    let blank_is_ignored = catalog_service::list_watches(
        &state,
        WatchQuery {
            brand: Some("  ".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(blank_is_ignored.meta.unwrap().total, Some(3));
}

#[tokio::test]
async fn price_bands_are_inclusive() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    for (title, cents) in [
        ("Fifty", 5000),
        ("Fifty And A Cent", 5001),
        ("Hundred", 10000),
        ("Five Hundred", 50000),
        ("Above", 50001),
    ] {
        create_watch(&state, title, cents, c.brand_timex, c.men, c.dress).await.unwrap();
    }

    let titles = |band: &str| {
        let state = state.clone();
        let band = band.to_string();
        async move {
            let mut titles: Vec<String> = catalog_service::list_watches(
                &state,
                WatchQuery {
                    price: Some(band),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .data
            .unwrap()
            .items
            .into_iter()
            .map(|w| w.title)
            .collect();
            titles.sort();
            titles
        }
    };

    assert_eq!(titles("0-50").await, ["Fifty"]);
    assert_eq!(titles("51-100").await, ["Fifty And A Cent", "Hundred"]);
    assert_eq!(titles("201-500").await, ["Five Hundred"]);
    assert_eq!(titles("500+").await, ["Above"]);
    assert_eq!(titles("cheap").await.len(), 5);
}

#[tokio::test]
async fn pages_hold_nine_watches() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    for n in 0..11 {
        create_watch(&state, &format!("Model {n:02}"), 10000 + n, c.brand_timex, c.men, c.dress)
            .await
            .unwrap();
    }

    let first = catalog_service::list_watches(&state, WatchQuery::default()).await.unwrap();
    let meta = first.meta.unwrap();
    assert_eq!(first.data.unwrap().items.len(), CATALOG_PAGE_SIZE as usize);
    assert_eq!(meta.total, Some(11));
    assert_eq!(meta.total_pages, Some(2));

    let second = catalog_service::list_watches(
        &state,
        WatchQuery {
            page: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(second.data.unwrap().items.len(), 2);

    let featured = catalog_service::featured_watches(&state).await.unwrap();
    assert_eq!(featured.data.unwrap().items.len(), 11);
}

#[tokio::test]
async fn unknown_watch_is_not_found() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let err = catalog_service::get_watch(&state, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn filters_list_lookup_names() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    seed_catalog(&state).await.unwrap();

    let filters = catalog_service::list_filters(&state).await.unwrap().data.unwrap();
    let brands: Vec<_> = filters.brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(brands, ["Omega", "Timex"]);
    assert_eq!(filters.genders.len(), 2);
    assert_eq!(filters.types.len(), 2);
}

#[tokio::test]
async fn out_of_range_page_is_capped_not_fatal() {
    let state = setup_state(Arc::new(RecordingMailer::default())).await.unwrap();
    let c = seed_catalog(&state).await.unwrap();
    create_watch(&state, "Only One", 9900, c.brand_timex, c.men, c.dress).await.unwrap();

    let far = catalog_service::list_watches(
        &state,
        WatchQuery {
            page: Some(i64::MAX),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let meta = far.meta.unwrap();
    assert_eq!(meta.page, Some(MAX_PAGE));
    assert_eq!(meta.total, Some(1));
    assert!(far.data.unwrap().items.is_empty());

    let negative = catalog_service::list_watches(
        &state,
        WatchQuery {
            page: Some(i64::MIN),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(negative.meta.unwrap().page, Some(1));
    assert_eq!(negative.data.unwrap().items.len(), 1);
}
