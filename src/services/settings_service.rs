use crate::{
    audit::log_audit,
    dto::settings::{ConfigView, UpdateConfigRequest},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn store_info(state: &AppState) -> AppResult<ApiResponse<ConfigView>> {
    let view = state.settings.public_view().await;
    Ok(ApiResponse::success("Store", view, None))
}

pub async fn get_config(state: &AppState) -> AppResult<ApiResponse<ConfigView>> {
    let view = state.settings.public_view().await;
    Ok(ApiResponse::success("Settings", view, Some(Meta::empty())))
}

pub async fn update_config(
    state: &AppState,
    payload: UpdateConfigRequest,
) -> AppResult<ApiResponse<ConfigView>> {
    let password_changed = payload
        .admin_password
        .as_deref()
        .is_some_and(|p| !p.is_empty());
    let config = state.settings.update(payload).await?;

    log_audit(
        "config_update",
        Some("config"),
        Some(serde_json::json!({
            "store_name": config.store_name,
            "password_changed": password_changed,
        })),
    );

    Ok(ApiResponse::success(
        "Settings saved",
        ConfigView::from(&config),
        Some(Meta::empty()),
    ))
}
