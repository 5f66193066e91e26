use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderCreated, OrderList, UpdateOrderStatusRequest},
    error::AppResult,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    state::AppState,
};

pub async fn place_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderCreated>> {
    let order = state.orders.create(payload).await?;
    Ok(ApiResponse::success(
        "Order placed",
        OrderCreated {
            order_id: order.id.clone(),
            order,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let items = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(status) => state.orders.list_by_status(status).await,
        None => state.orders.list_all().await,
    };
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.get_by_id(id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

pub async fn update_order_status(
    state: &AppState,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = state.orders.set_status(id, payload.status.as_deref()).await?;

    log_audit(
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    );

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}
