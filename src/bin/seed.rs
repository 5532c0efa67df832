use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;
use watch_storefront::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Brands, Genders, Users, WatchTypes, Watches, brands, genders, users, watch_types, watches,
    },
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin", "admin@example.com", "admin1234", true).await?;
    let user_id = ensure_user(&orm, "customer", "user@example.com", "user12345", false).await?;
    seed_watches(&orm).await?;

    tracing::info!(%admin_id, %user_id, "seed completed");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
    is_staff: bool,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Username.eq(username))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_active: Set(true),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    tracing::info!(username, is_staff, "ensured user");
    Ok(user.id)
}

async fn brand_id(orm: &DatabaseConnection, name: &str) -> anyhow::Result<Uuid> {
    if let Some(found) = Brands::find()
        .filter(brands::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(found.id);
    }
    let model = brands::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}

async fn gender_id(orm: &DatabaseConnection, name: &str) -> anyhow::Result<Uuid> {
    if let Some(found) = Genders::find()
        .filter(genders::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(found.id);
    }
    let model = genders::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}

async fn type_id(orm: &DatabaseConnection, name: &str) -> anyhow::Result<Uuid> {
    if let Some(found) = WatchTypes::find()
        .filter(watch_types::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(found.id);
    }
    let model = watch_types::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(model.id)
}

async fn seed_watches(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog = [
        ("Seamaster Diver 300M", "Omega", "Men", "Diver", 529_000),
        ("Tank Must", "Cartier", "Women", "Dress", 329_000),
        ("Khaki Field Mechanical", "Hamilton", "Men", "Field", 49_500),
        ("Presage Cocktail Time", "Seiko", "Unisex", "Dress", 42_500),
        ("Prospex Solar Diver", "Seiko", "Men", "Diver", 29_500),
        ("Weekender", "Timex", "Unisex", "Field", 4_500),
        ("Marlin Hand-Wound", "Timex", "Women", "Dress", 9_900),
        ("PRX Powermatic 80", "Tissot", "Men", "Sport", 72_500),
        ("Le Locle", "Tissot", "Women", "Dress", 19_500),
    ];

    for (title, brand, gender, kind, price) in catalog {
        let exists = Watches::find()
            .filter(watches::Column::Title.eq(title))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let slug = title.to_lowercase().replace(' ', "-");
        watches::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            brand_id: Set(brand_id(orm, brand).await?),
            gender_id: Set(gender_id(orm, gender).await?),
            type_id: Set(type_id(orm, kind).await?),
            image_url: Set(format!("https://images.watch-store.local/{slug}.jpg")),
            price: Set(price),
            created_at: Set(Utc::now().into()),
        }
        .insert(orm)
        .await?;
    }

    tracing::info!("seeded watches");
    Ok(())
}
