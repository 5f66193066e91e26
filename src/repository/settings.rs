use std::sync::Arc;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    dto::settings::{ConfigView, UpdateConfigRequest},
    error::{AppError, AppResult},
    models::StoreConfig,
    store::{Collection, RecordStore},
};

#[derive(Clone)]
pub struct ConfigStore {
    store: Arc<RecordStore>,
    initial_password: Arc<str>,
}

impl ConfigStore {
    /// `initial_password` is accepted while no password has been stored.
    pub fn new(store: Arc<RecordStore>, initial_password: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            initial_password: initial_password.into(),
        }
    }

    pub async fn get(&self) -> StoreConfig {
        let _guard = self.store.lock(Collection::Config).await;
        self.store.load(Collection::Config).await
    }

    pub async fn public_view(&self) -> ConfigView {
        ConfigView::from(&self.get().await)
    }

    pub async fn update(&self, input: UpdateConfigRequest) -> AppResult<StoreConfig> {
        let password_hash = match input.admin_password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let _guard = self.store.lock(Collection::Config).await;
        let mut config: StoreConfig = self.store.load(Collection::Config).await;

        if let Some(store_name) = input.store_name.filter(|n| !n.is_empty()) {
            config.store_name = Some(store_name);
        }
        if let Some(hash) = password_hash {
            config.admin_password_hash = Some(hash);
            config.admin_password = None;
            tracing::info!("admin password changed");
        }

        self.store.save(Collection::Config, &config).await?;
        Ok(config)
    }

    pub async fn verify_password(&self, candidate: &str) -> bool {
        let config = self.get().await;
        if let Some(hash) = config.admin_password_hash.as_deref() {
            return verify_hash(candidate, hash);
        }
        if let Some(legacy) = config.admin_password.as_deref() {
            return candidate == legacy;
        }
        candidate == &*self.initial_password
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_hash(candidate: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(error = %err, "stored admin password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}
