use gift_store::{
    dto::products::ProductInput,
    error::AppError,
    models::DEFAULT_CATEGORY,
};
use serde_json::json;

mod common;

#[tokio::test]
async fn create_fills_in_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let product = state
        .products
        .create(ProductInput {
            name: Some("Royal Oud".into()),
            price: Some(json!("not a number")),
            image_url: Some("https://cdn.example.com/oud.png".into()),
            ..Default::default()
        })
        .await?;

    assert!(product.id.starts_with('p'));
    assert_eq!(product.name_en, "Royal Oud");
    assert_eq!(product.description, "");
    assert_eq!(product.price, 0.0);
    assert_eq!(product.category, DEFAULT_CATEGORY);
    assert_eq!(product.image, "https://cdn.example.com/oud.png");
    assert_eq!(product.active, Some(true));
    assert!(product.created_at.is_some());
    Ok(())
}

#[tokio::test]
async fn products_keep_insertion_order_and_unique_ids() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        ids.push(state.products.create(common::product_input(name, "10")).await?.id);
    }

    let listed: Vec<String> = state
        .products
        .list_all()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, ids);

    let unique: std::collections::HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 4);
    Ok(())
}

#[tokio::test]
async fn active_defaults_to_true_and_only_false_hides() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());

    let shown = state
        .products
        .create(common::product_input("Shown", "10"))
        .await?;
    let hidden = state
        .products
        .create(ProductInput {
            active: Some(json!("false")),
            ..common::product_input("Hidden", "10")
        })
        .await?;

    let active: Vec<String> = state
        .products
        .list_active()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(active, vec![shown.id.clone()]);
    assert_eq!(state.products.list_all().await.len(), 2);

    // Hidden products are still reachable by id.
    assert_eq!(state.products.get_by_id(&hidden.id).await?.active, Some(false));
    Ok(())
}

#[tokio::test]
async fn stored_products_without_active_flag_are_listed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::fs_state(dir.path());
    std::fs::create_dir_all(&state.config.data_dir)?;
    std::fs::write(
        state.config.data_dir.join("products.json"),
        r#"[{"id":"p1","name":"Legacy Musk","price":50},{"id":"p2","name":"Off","active":false}]"#,
    )?;

    let active = state.products.list_active().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "p1");
    assert_eq!(active[0].category_or_default(), DEFAULT_CATEGORY);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let original = state
        .products
        .create(ProductInput {
            name: Some("Taif Rose".into()),
            category: Some("gifts".into()),
            image_url: Some("/uploads/1-rose.png".into()),
            price: Some(json!(120)),
            ..Default::default()
        })
        .await?;

    let updated = state
        .products
        .update(
            &original.id,
            ProductInput {
                price: Some(json!("99.5")),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.price, 99.5);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.name_en, original.name_en);
    assert_eq!(updated.category, original.category);
    assert_eq!(updated.image, original.image);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(state.products.get_by_id(&original.id).await?, updated);
    Ok(())
}

#[tokio::test]
async fn update_recomputes_active_from_input() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let product = state
        .products
        .create(common::product_input("Bakhoor", "85"))
        .await?;

    let hidden = state
        .products
        .update(
            &product.id,
            ProductInput {
                active: Some(json!(false)),
                ..Default::default()
            },
        )
        .await?;
    assert!(!hidden.is_active());

    // Leaving `active` out counts as "not false".
    let shown = state
        .products
        .update(&product.id, ProductInput::default())
        .await?;
    assert!(shown.is_active());
    Ok(())
}

#[tokio::test]
async fn update_image_rules() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let product = state
        .products
        .create(ProductInput {
            image_url: Some("/uploads/1-old.png".into()),
            ..common::product_input("Gift Box", "290")
        })
        .await?;

    let kept = state
        .products
        .update(
            &product.id,
            ProductInput {
                image_url: Some(String::new()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(kept.image, "/uploads/1-old.png");

    let by_url = state
        .products
        .update(
            &product.id,
            ProductInput {
                image_url: Some("https://cdn.example.com/box.png".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(by_url.image, "https://cdn.example.com/box.png");

    let uploaded = state
        .products
        .update(
            &product.id,
            ProductInput {
                image_url: Some("https://cdn.example.com/ignored.png".into()),
                uploaded_image: Some("/uploads/2-new.png".into()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(uploaded.image, "/uploads/2-new.png");
    Ok(())
}

#[tokio::test]
async fn missing_products_are_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = common::memory_state(dir.path());

    assert!(matches!(
        state.products.get_by_id("p404").await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        state
            .products
            .update("p404", common::product_input("x", "1"))
            .await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn delete_is_idempotent() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    let keep = state.products.create(common::product_input("Keep", "1")).await?;
    let gone = state.products.create(common::product_input("Gone", "1")).await?;

    assert!(!state.products.delete("p-missing").await?);
    assert_eq!(state.products.list_all().await.len(), 2);

    assert!(state.products.delete(&gone.id).await?);
    let remaining = state.products.list_all().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);

    assert!(!state.products.delete(&gone.id).await?);
    assert_eq!(state.products.list_all().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn category_listing_uses_default_category() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::memory_state(dir.path());
    state.products.create(common::product_input("Oud", "1")).await?;
    state
        .products
        .create(ProductInput {
            category: Some("gifts".into()),
            ..common::product_input("Box", "1")
        })
        .await?;

    let perfumes = state.products.list_active_in(DEFAULT_CATEGORY).await;
    let gifts = state.products.list_active_in("gifts").await;

    assert_eq!(perfumes.len(), 1);
    assert_eq!(perfumes[0].name, "Oud");
    assert_eq!(gifts.len(), 1);
    assert_eq!(gifts[0].name, "Box");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_kept() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = common::fs_state(dir.path());

    let mut handles = Vec::new();
    for n in 0..20 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            state
                .products
                .create(common::product_input(&format!("Item {n}"), "10"))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let stored = state.products.list_all().await;
    let unique: std::collections::HashSet<&str> = stored.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(stored.len(), 20);
    assert_eq!(unique.len(), 20);
    Ok(())
}
