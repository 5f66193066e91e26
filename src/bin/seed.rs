use gift_store::{
    config::AppConfig,
    dto::{products::ProductInput, settings::UpdateConfigRequest},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(config).await?;

    ensure_store_name(&state, "Gift & Perfume Store").await?;
    seed_products(&state).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_store_name(state: &AppState, name: &str) -> anyhow::Result<()> {
    if state.settings.get().await.store_name.is_some() {
        return Ok(());
    }
    state
        .settings
        .update(UpdateConfigRequest {
            store_name: Some(name.to_string()),
            admin_password: None,
        })
        .await?;
    println!("Set store name to {name}");
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = [
        ("Royal Oud", "perfumes", "Deep oud with amber and rose", "450"),
        ("Taif Rose Mist", "perfumes", "Light rose water body mist", "120"),
        ("Gold Gift Box", "gifts", "Wrapped box with three mini perfumes", "290"),
        ("Bakhoor Burner", "incense", "Ceramic burner with charcoal tablets", "85"),
    ];

    let existing = state.products.list_all().await;
    for (name, category, description, price) in products {
        if existing.iter().any(|p| p.name == name) {
            continue;
        }
        state
            .products
            .create(ProductInput {
                name: Some(name.to_string()),
                description: Some(description.to_string()),
                category: Some(category.to_string()),
                price: Some(serde_json::Value::String(price.to_string())),
                ..Default::default()
            })
            .await?;
        println!("Seeded product {name}");
    }

    Ok(())
}
