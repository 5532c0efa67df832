#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use uuid::Uuid;
use watch_storefront::{
    config::AppConfig,
    db::run_migrations,
    entity::{brands, genders, users, watch_types, watches},
    middleware::auth::AuthUser,
    cart::Cart,
    error::{AppError, AppResult},
    notification::{Mailer, NotificationError},
    session::{CartStore, MemorySessionStore, SessionId, SessionStore},
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("mailer lock").clone()
    }

    /// Confirmations go out on a background task; give it a moment.
    pub async fn wait_for(&self, count: usize) -> Vec<SentMail> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().expect("mailer lock").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected(503))
    }
}

/// Session store that keeps carts in memory but refuses to store an empty
/// one, as a backend outage right after checkout would.
#[derive(Default)]
pub struct ClearFailsStore {
    inner: MemorySessionStore,
}

#[async_trait]
impl SessionStore for ClearFailsStore {
    async fn load(&self, session: SessionId) -> AppResult<Cart> {
        self.inner.load(session).await
    }

    async fn save(&self, session: SessionId, cart: &Cart) -> AppResult<()> {
        if cart.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!("session backend unavailable")));
        }
        self.inner.save(session, cart).await
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        jwt_ttl_hours: 1,
        mail_from: "orders@test.local".into(),
        mail_api_url: None,
    }
}

/// Fresh in-memory database with the full schema. A single pooled
/// connection keeps every query on the same in-memory database.
pub async fn setup_state(mailer: Arc<dyn Mailer>) -> anyhow::Result<AppState> {
    setup_state_with(mailer, Arc::new(MemorySessionStore::default())).await
}

pub async fn setup_state_with(
    mailer: Arc<dyn Mailer>,
    sessions: Arc<dyn SessionStore>,
) -> anyhow::Result<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let orm = Database::connect(opt).await?;
    run_migrations(&orm).await?;

    Ok(AppState {
        orm,
        config: Arc::new(test_config()),
        carts: Arc::new(CartStore::new(sessions)),
        mailer,
    })
}

pub struct Catalog {
    pub brand_omega: Uuid,
    pub brand_timex: Uuid,
    pub men: Uuid,
    pub women: Uuid,
    pub diver: Uuid,
    pub dress: Uuid,
}

pub async fn seed_catalog(state: &AppState) -> anyhow::Result<Catalog> {
    let brand_omega = named(state, "brand", "Omega").await?;
    let brand_timex = named(state, "brand", "Timex").await?;
    let men = named(state, "gender", "Men").await?;
    let women = named(state, "gender", "Women").await?;
    let diver = named(state, "type", "Diver").await?;
    let dress = named(state, "type", "Dress").await?;
    Ok(Catalog {
        brand_omega,
        brand_timex,
        men,
        women,
        diver,
        dress,
    })
}

async fn named(state: &AppState, kind: &str, name: &str) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    match kind {
        "brand" => {
            brands::ActiveModel {
                id: Set(id),
                name: Set(name.into()),
            }
            .insert(&state.orm)
            .await?;
        }
        "gender" => {
            genders::ActiveModel {
                id: Set(id),
                name: Set(name.into()),
            }
            .insert(&state.orm)
            .await?;
        }
        _ => {
            watch_types::ActiveModel {
                id: Set(id),
                name: Set(name.into()),
            }
            .insert(&state.orm)
            .await?;
        }
    }
    Ok(id)
}

pub async fn create_watch(
    state: &AppState,
    title: &str,
    price: i64,
    brand_id: Uuid,
    gender_id: Uuid,
    type_id: Uuid,
) -> anyhow::Result<watches::Model> {
    Ok(watches::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.into()),
        brand_id: Set(brand_id),
        gender_id: Set(gender_id),
        type_id: Set(type_id),
        image_url: Set(format!("https://img.test/{}.png", title.to_lowercase())),
        price: Set(price),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?)
}

pub async fn create_user(state: &AppState, username: &str, is_staff: bool) -> anyhow::Result<AuthUser> {
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("dummy".into()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        is_active: Set(true),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role().to_string(),
    })
}
