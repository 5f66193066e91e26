#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use gift_store::{
    config::AppConfig,
    dto::products::ProductInput,
    state::AppState,
    store::{FsBlobStore, MemoryBlobStore},
};
use serde_json::Value;

pub const JWT_SECRET: &str = "test-secret";

/// State over in-memory collections; uploads go under `root`.
pub fn memory_state(root: &Path) -> AppState {
    let config = AppConfig::rooted_at(root, JWT_SECRET);
    AppState::new(config, Arc::new(MemoryBlobStore::new()))
}

/// State over JSON files in `<root>/data`.
pub fn fs_state(root: &Path) -> AppState {
    let config = AppConfig::rooted_at(root, JWT_SECRET);
    let blobs = Arc::new(FsBlobStore::new(config.data_dir.clone()));
    AppState::new(config, blobs)
}

pub fn product_input(name: &str, price: &str) -> ProductInput {
    ProductInput {
        name: Some(name.to_string()),
        price: Some(Value::String(price.to_string())),
        ..Default::default()
    }
}
