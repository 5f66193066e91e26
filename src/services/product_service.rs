use crate::{
    audit::log_audit,
    dto::products::{DeleteResult, ProductInput, ProductList},
    error::AppResult,
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
    uploads::PendingImage,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let items = match query.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
        Some(category) => state.products.list_active_in(category).await,
        None => state.products.list_active().await,
    };
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state.products.get_by_id(id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn list_all_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = state.products.list_all().await;
    let meta = Meta::count(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn create_product(
    state: &AppState,
    mut input: ProductInput,
    image: Option<PendingImage>,
) -> AppResult<ApiResponse<Product>> {
    attach_image(state, &mut input, image).await?;
    let product = state.products.create(input).await?;

    log_audit(
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: &str,
    mut input: ProductInput,
    image: Option<PendingImage>,
) -> AppResult<ApiResponse<Product>> {
    if image.is_some() {
        // Unknown ids must not leave a file behind.
        state.products.get_by_id(id).await?;
    }
    attach_image(state, &mut input, image).await?;
    let product = state.products.update(id, input).await?;

    log_audit(
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(state: &AppState, id: &str) -> AppResult<ApiResponse<DeleteResult>> {
    let removed = state.products.delete(id).await?;

    log_audit(
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id, "removed": removed })),
    );

    Ok(ApiResponse::success(
        "Deleted",
        DeleteResult { removed },
        Some(Meta::empty()),
    ))
}

async fn attach_image(
    state: &AppState,
    input: &mut ProductInput,
    image: Option<PendingImage>,
) -> AppResult<()> {
    if let Some(image) = image {
        input.uploaded_image = Some(state.images.save(image).await?);
    }
    Ok(())
}
