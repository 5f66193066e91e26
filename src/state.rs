use std::sync::Arc;

use crate::{
    clock::{Clock, IdGenerator, SystemClock},
    config::AppConfig,
    repository::{ConfigStore, OrderRepository, ProductRepository},
    store::{BlobStore, FsBlobStore, RecordStore},
    uploads::ImageStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub products: ProductRepository,
    pub orders: OrderRepository,
    pub settings: ConfigStore,
    pub images: ImageStore,
}

impl AppState {
    pub fn new(config: AppConfig, blobs: Arc<dyn BlobStore>) -> Self {
        Self::with_clock(config, blobs, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, blobs: Arc<dyn BlobStore>, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(RecordStore::new(blobs));
        let ids = Arc::new(IdGenerator::new(clock));
        Self {
            products: ProductRepository::new(store.clone(), ids.clone()),
            orders: OrderRepository::new(store.clone(), ids.clone()),
            settings: ConfigStore::new(store, config.initial_admin_password.as_str()),
            images: ImageStore::new(config.uploads_dir.clone(), ids),
            config: Arc::new(config),
        }
    }

    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;
        tokio::fs::create_dir_all(&config.uploads_dir).await?;
        let blobs = Arc::new(FsBlobStore::new(config.data_dir.clone()));
        Ok(Self::new(config, blobs))
    }
}
