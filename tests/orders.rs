use gift_store::{
    dto::orders::CreateOrderRequest,
    error::AppError,
    models::{LineItem, NEW_ORDER_STATUS},
};

mod common;

fn checkout(customer: &str, items: Vec<LineItem>, total: f64) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_name: customer.to_string(),
        phone: "0500000000".to_string(),
        address: "Riyadh".to_string(),
        items,
        total,
        ..Default::default()
    }
}

fn item(id: &str, price: f64, quantity: u32) -> LineItem {
    LineItem {
        id: id.to_string(),
        name: format!("Item {id}"),
        price,
        image: String::new(),
        quantity,
    }
}

#[tokio::test]
async fn new_orders_get_id_and_initial_status() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let order = state
        .orders
        .create(checkout("Sara", vec![item("p1", 100.0, 2)], 200.0))
        .await?;

    assert!(order.id.starts_with("ORD-"));
    assert_eq!(order.status, NEW_ORDER_STATUS);
    assert_eq!(order.email, "");
    assert_eq!(order.notes, "");
    assert!(order.created_at.is_some());
    assert_eq!(state.orders.get_by_id(&order.id).await?, order);
    Ok(())
}

#[tokio::test]
async fn newest_order_comes_first() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let a = state.orders.create(checkout("A", vec![], 0.0)).await?;
    let b = state.orders.create(checkout("B", vec![], 0.0)).await?;

    let ids: Vec<String> = state
        .orders
        .list_all()
        .await
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec![b.id, a.id]);
    Ok(())
}

#[tokio::test]
async fn submitted_total_is_stored_as_is() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let order = state
        .orders
        .create(checkout("Sara", vec![item("p1", 100.0, 2)], 150.0))
        .await?;

    assert_eq!(order.total, 150.0);
    assert_eq!(state.orders.get_by_id(&order.id).await?.total, 150.0);
    Ok(())
}

#[tokio::test]
async fn status_update_touches_only_status() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let placed = state
        .orders
        .create(checkout("Sara", vec![item("p1", 50.0, 1)], 50.0))
        .await?;

    let shipped = state.orders.set_status(&placed.id, Some("shipped")).await?;

    assert_eq!(shipped.status, "shipped");
    assert_eq!(
        gift_store::models::Order {
            status: placed.status.clone(),
            ..shipped.clone()
        },
        placed
    );
    assert_eq!(state.orders.get_by_id(&placed.id).await?, shipped);
    Ok(())
}

#[tokio::test]
async fn empty_status_keeps_the_current_one() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let placed = state.orders.create(checkout("Sara", vec![], 0.0)).await?;
    state.orders.set_status(&placed.id, Some("processing")).await?;

    let blank = state.orders.set_status(&placed.id, Some("")).await?;
    let missing = state.orders.set_status(&placed.id, None).await?;

    assert_eq!(blank.status, "processing");
    assert_eq!(missing.status, "processing");
    Ok(())
}

#[tokio::test]
async fn unknown_orders_are_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = common::memory_state(dir.path());

    assert!(matches!(
        state.orders.get_by_id("ORD-1").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        state.orders.set_status("ORD-1", Some("shipped")).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn order_items_survive_product_deletion() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let product = state
        .products
        .create(common::product_input("Royal Oud", "450"))
        .await?;

    let order = state
        .orders
        .create(checkout(
            "Sara",
            vec![LineItem::snapshot(&product, 1)],
            450.0,
        ))
        .await?;
    state.products.delete(&product.id).await?;

    let stored = state.orders.get_by_id(&order.id).await?;
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].id, product.id);
    assert_eq!(stored.items[0].name, "Royal Oud");
    assert_eq!(stored.items[0].price, 450.0);
    Ok(())
}

#[tokio::test]
async fn orders_filter_by_status() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let first = state.orders.create(checkout("A", vec![], 0.0)).await?;
    let second = state.orders.create(checkout("B", vec![], 0.0)).await?;
    state.orders.set_status(&first.id, Some("delivered")).await?;

    let fresh = state.orders.list_by_status(NEW_ORDER_STATUS).await;
    let delivered = state.orders.list_by_status("delivered").await;

    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].id, second.id);
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].id, first.id);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_are_all_kept() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::fs_state(dir.path());

    let mut handles = Vec::new();
    for n in 0..20 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .orders
                .create(checkout(&format!("Customer {n}"), vec![], 0.0))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = state.orders.list_all().await;
    let unique: std::collections::HashSet<&str> = stored.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(stored.len(), 20);
    assert_eq!(unique.len(), 20);
    Ok(())
}
