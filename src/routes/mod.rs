use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
    uploads::UPLOADS_ROUTE,
};

pub mod admin;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod store;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/store", store::router())
        .nest("/admin", admin::router())
        .fallback(not_found)
}

/// The whole application: health, API, docs, uploaded images and the static
/// storefront/admin pages. `/admin*` falls back to the admin page, every
/// other unknown path to the storefront page.
pub fn create_app(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();
    let admin_dir = public_dir.join("admin");
    let uploads_dir = state.images.dir().to_path_buf();

    let admin_pages = ServeDir::new(&admin_dir)
        .not_found_service(ServeFile::new(admin_dir.join("index.html")));
    let storefront_pages =
        ServeDir::new(&public_dir).not_found_service(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest_service(UPLOADS_ROUTE, ServeDir::new(uploads_dir))
        .nest_service("/admin", admin_pages)
        .merge(doc::scalar_docs())
        .fallback_service(storefront_pages)
        .with_state(state)
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
