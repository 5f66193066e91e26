use axum::{
    Form, Json, Router,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::header,
    routing::{get, post, put},
};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{OrderList, UpdateOrderStatusRequest},
        products::{DeleteResult, ProductInput, ProductList},
        settings::{ConfigView, UpdateConfigRequest},
    },
    error::{AppError, AppResult},
    middleware::auth::AdminSession,
    models::{Order, Product},
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::{auth_service, order_service, product_service, settings_service},
    state::AppState,
    uploads::PendingImage,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", put(update_order_status))
        .route("/config", get(get_config).put(update_config))
}

pub struct ProductForm {
    pub input: ProductInput,
    pub image: Option<PendingImage>,
}

impl FromRequest<AppState> for ProductForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(input) = Form::<ProductInput>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(ProductForm { input, image: None })
        } else {
            let Json(input) = Json::<ProductInput>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(ProductForm { input, image: None })
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut input = ProductInput::default();
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            // Browsers send an empty part when no file was picked.
            if bytes.is_empty() {
                continue;
            }
            image = Some(PendingImage::new(file_name, content_type, bytes)?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            input.set_text_field(&name, value);
        }
    }
    Ok(ProductForm { input, image })
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin session token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid password"),
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_admin(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    responses(
        (status = 200, description = "All products, hidden ones included", body = ApiResponse<ProductList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_all_products(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body(content = ProductInput, description = "JSON, urlencoded or multipart with an `image` file part"),
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    _session: AdminSession,
    form: ProductForm,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::create_product(&state, form.input, form.image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body(content = ProductInput, description = "Fields to change; omitted fields are kept"),
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    form: ProductForm,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &id, form.input, form.image).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted, or was already absent", body = ApiResponse<DeleteResult>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DeleteResult>>> {
    let resp = product_service::delete_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order", body = ApiResponse<Order>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::get_order(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Update order status", body = ApiResponse<Order>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order_status(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/config",
    responses(
        (status = 200, description = "Store settings", body = ApiResponse<ConfigView>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_config(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<ApiResponse<ConfigView>>> {
    let resp = settings_service::get_config(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/config",
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Settings saved", body = ApiResponse<ConfigView>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_config(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<UpdateConfigRequest>,
) -> AppResult<Json<ApiResponse<ConfigView>>> {
    let resp = settings_service::update_config(&state, payload).await?;
    Ok(Json(resp))
}
