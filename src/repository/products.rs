use std::sync::Arc;

use crate::{
    clock::IdGenerator,
    dto::products::ProductInput,
    error::{AppError, AppResult},
    models::{DEFAULT_CATEGORY, Product},
    store::{Collection, RecordStore},
};

#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<RecordStore>,
    ids: Arc<IdGenerator>,
}

impl ProductRepository {
    pub fn new(store: Arc<RecordStore>, ids: Arc<IdGenerator>) -> Self {
        Self { store, ids }
    }

    pub async fn list_all(&self) -> Vec<Product> {
        let _guard = self.store.lock(Collection::Products).await;
        self.store.load(Collection::Products).await
    }

    pub async fn list_active(&self) -> Vec<Product> {
        let mut products = self.list_all().await;
        products.retain(Product::is_active);
        products
    }

    pub async fn list_active_in(&self, category: &str) -> Vec<Product> {
        let mut products = self.list_active().await;
        products.retain(|p| p.category_or_default() == category);
        products
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Product> {
        self.list_all()
            .await
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)
    }

    pub async fn create(&self, input: ProductInput) -> AppResult<Product> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.load(Collection::Products).await;

        let name = input.name.clone().unwrap_or_default();
        let product = Product {
            id: self.ids.product_id(),
            name_en: input
                .name_en
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| name.clone()),
            name,
            description: input.description.clone().unwrap_or_default(),
            price: input.price().unwrap_or(0.0),
            category: input
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image: input.image().unwrap_or_default().to_string(),
            active: Some(input.is_active()),
            created_at: Some(self.ids.now()),
        };

        products.push(product.clone());
        self.store.save(Collection::Products, &products).await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Field-level merge: supplied fields overwrite, the rest are kept.
    /// `active` follows the create rule, so leaving it out re-shows the product.
    pub async fn update(&self, id: &str, input: ProductInput) -> AppResult<Product> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.load(Collection::Products).await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        apply_update(product, input);
        let updated = product.clone();

        self.store.save(Collection::Products, &products).await?;
        tracing::info!(product_id = %updated.id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let _guard = self.store.lock(Collection::Products).await;
        let mut products: Vec<Product> = self.store.load(Collection::Products).await;

        let before = products.len();
        products.retain(|p| p.id != id);
        let removed = products.len() != before;

        self.store.save(Collection::Products, &products).await?;
        Ok(removed)
    }
}

fn apply_update(product: &mut Product, input: ProductInput) {
    let active = input.is_active();
    let price = input.price();
    let image = input.image().map(str::to_owned);

    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(name_en) = input.name_en {
        product.name_en = name_en;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(price) = price {
        product.price = price;
    }
    if let Some(category) = input.category {
        product.category = category;
    }
    if let Some(image) = image {
        product.image = image;
    }
    product.active = Some(active);
}
