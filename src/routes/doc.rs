use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{CreateOrderRequest, OrderCreated, OrderList, UpdateOrderStatusRequest},
        products::{DeleteResult, ProductInput, ProductList},
        settings::{ConfigView, UpdateConfigRequest},
    },
    models::{LineItem, Order, Product},
    response::{ApiResponse, Meta},
    routes::{admin, health, orders, params, products, store},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        orders::place_order,
        store::store_info,
        admin::login,
        admin::list_products,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::get_config,
        admin::update_config
    ),
    components(
        schemas(
            Product,
            LineItem,
            Order,
            ProductInput,
            ProductList,
            DeleteResult,
            CreateOrderRequest,
            OrderCreated,
            OrderList,
            UpdateOrderStatusRequest,
            LoginRequest,
            LoginResponse,
            ConfigView,
            UpdateConfigRequest,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderCreated>,
            ApiResponse<ConfigView>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Storefront catalog"),
        (name = "Orders", description = "Checkout"),
        (name = "Store", description = "Public store information"),
        (name = "Admin", description = "Password-gated store management"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
