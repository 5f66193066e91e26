use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::orders::{CreateOrderRequest, OrderCreated},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(place_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = ApiResponse<OrderCreated>),
        (status = 500, description = "Order could not be stored"),
    ),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderCreated>>> {
    let resp = order_service::place_order(&state, payload).await?;
    Ok(Json(resp))
}
