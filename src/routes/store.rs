use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::settings::ConfigView,
    error::AppResult,
    response::ApiResponse,
    services::settings_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(store_info))
}

#[utoipa::path(
    get,
    path = "/api/store",
    responses(
        (status = 200, description = "Public store information", body = ApiResponse<ConfigView>)
    ),
    tag = "Store"
)]
pub async fn store_info(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ConfigView>>> {
    let resp = settings_service::store_info(&state).await?;
    Ok(Json(resp))
}
