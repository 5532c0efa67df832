use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    notification::{HttpMailer, LogMailer, Mailer, NotificationError},
    session::{CartStore, MemorySessionStore},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub carts: Arc<CartStore>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Wire the default collaborators: in-memory session carts and the mailer
    /// selected by `MAIL_API_URL`.
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Result<Self, NotificationError> {
        let mailer: Arc<dyn Mailer> = match config.mail_api_url.clone() {
            Some(url) => Arc::new(HttpMailer::new(url, config.mail_from.clone())?),
            None => Arc::new(LogMailer::new(config.mail_from.clone())),
        };
        Ok(Self {
            orm,
            config: Arc::new(config),
            carts: Arc::new(CartStore::new(Arc::new(MemorySessionStore::default()))),
            mailer,
        })
    }
}
