use std::sync::Arc;

use axum::extract::FromRef;
use crm_core_postgres::PostgresRepositories;
use sqlx::PgPool;

use crate::auth::JwtKeys;
use crate::config::ServerConfig;
use crate::storage::{LocalObjectStorage, ObjectStorage, UploadPolicy};

/// Shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub repos: PostgresRepositories,
    pub config: Arc<ServerConfig>,
    pub jwt: Arc<JwtKeys>,
    pub storage: Arc<dyn ObjectStorage>,
    pub upload_policy: Arc<UploadPolicy>,
}

impl AppState {
    pub fn new(pool: Arc<PgPool>, config: ServerConfig) -> Self {
        let storage = LocalObjectStorage::new(&config.storage_dir, config.public_base_url.clone());
        Self::with_storage(pool, config, Arc::new(storage))
    }

    pub fn with_storage(pool: Arc<PgPool>, config: ServerConfig, storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            repos: PostgresRepositories::new(pool),
            jwt: Arc::new(JwtKeys::new(&config.jwt_secret, config.jwt_expires_in_secs)),
            upload_policy: Arc::new(UploadPolicy::from(&config)),
            config: Arc::new(config),
            storage,
        }
    }
}

impl FromRef<AppState> for PostgresRepositories {
    fn from_ref(state: &AppState) -> Self {
        state.repos.clone()
    }
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
