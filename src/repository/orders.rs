use std::sync::Arc;

use crate::{
    clock::IdGenerator,
    dto::orders::CreateOrderRequest,
    error::{AppError, AppResult},
    models::{LineItem, NEW_ORDER_STATUS, Order},
    store::{Collection, RecordStore},
};

const TOTAL_EPSILON: f64 = 0.005;

#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<RecordStore>,
    ids: Arc<IdGenerator>,
}

impl OrderRepository {
    pub fn new(store: Arc<RecordStore>, ids: Arc<IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Stores the order at the front of the collection with status
    /// [`NEW_ORDER_STATUS`]. The submitted total is kept even when it
    /// disagrees with the items; the mismatch is only logged.
    pub async fn create(&self, payload: CreateOrderRequest) -> AppResult<Order> {
        let _guard = self.store.lock(Collection::Orders).await;
        let mut orders: Vec<Order> = self.store.load(Collection::Orders).await;

        let id = self.ids.order_id();
        let computed: f64 = payload.items.iter().map(LineItem::line_total).sum();
        if (computed - payload.total).abs() > TOTAL_EPSILON {
            tracing::warn!(
                order_id = %id,
                submitted = payload.total,
                computed,
                "order total does not match its items"
            );
        }

        let order = Order {
            id,
            customer_name: payload.customer_name,
            phone: payload.phone,
            email: payload.email.unwrap_or_default(),
            address: payload.address,
            notes: payload.notes.unwrap_or_default(),
            items: payload.items,
            total: payload.total,
            status: NEW_ORDER_STATUS.to_string(),
            created_at: Some(self.ids.now()),
        };

        orders.insert(0, order.clone());
        self.store.save(Collection::Orders, &orders).await?;
        tracing::info!(order_id = %order.id, items = order.items.len(), "order placed");
        Ok(order)
    }

    pub async fn list_all(&self) -> Vec<Order> {
        let _guard = self.store.lock(Collection::Orders).await;
        self.store.load(Collection::Orders).await
    }

    pub async fn list_by_status(&self, status: &str) -> Vec<Order> {
        let mut orders = self.list_all().await;
        orders.retain(|o| o.status == status);
        orders
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Order> {
        self.list_all()
            .await
            .into_iter()
            .find(|o| o.id == id)
            .ok_or(AppError::NotFound)
    }

    /// Overwrites the status only. An empty or missing status leaves the
    /// current one in place.
    pub async fn set_status(&self, id: &str, status: Option<&str>) -> AppResult<Order> {
        let _guard = self.store.lock(Collection::Orders).await;
        let mut orders: Vec<Order> = self.store.load(Collection::Orders).await;

        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            order.status = status.to_string();
        }
        let updated = order.clone();

        self.store.save(Collection::Orders, &orders).await?;
        Ok(updated)
    }
}
