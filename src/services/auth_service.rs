use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use crate::{
    audit::log_audit,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::ADMIN_ROLE,
    response::{ApiResponse, Meta},
    state::AppState,
};

const SESSION_HOURS: i64 = 12;

pub async fn login_admin(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    if !state.settings.verify_password(&payload.password).await {
        tracing::warn!("admin login rejected");
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&state.config.jwt_secret)?;
    log_audit("admin_login", Some("session"), None);

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

pub fn issue_token(secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: ADMIN_ROLE.to_string(),
        role: ADMIN_ROLE.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}
