use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, Product, ProductPayload};

/// Repository trait for Product persistence
///
/// Absence is reported through `Option`/`bool`; only `update` treats a
/// missing row as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product, assigning its id
    async fn create(&self, input: ProductPayload) -> ProductResult<Product>;

    /// Replace every field of the row with `product.id`
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Get a product by ID
    async fn find(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Every product, ordered by id
    async fn all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>>;

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        let store = self.store.read().await;
        store.products.values().filter(|p| keep(p)).cloned().collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductPayload) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let product = Product::from_parts(store.last_id, input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let existing = store
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *existing = product.clone();

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        Ok(self.select(|p| p.name == name).await)
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        Ok(self.select(|p| p.category == category).await)
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        Ok(self.select(|p| p.available == available).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn payload(name: &str, category: Category, available: bool) -> ProductPayload {
        ProductPayload {
            name: name.to_string(),
            description: "A test product".to_string(),
            price: Decimal::new(1999, 2),
            available,
            category,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(payload("a", Category::Food, true)).await.unwrap();
        let second = repo.create(payload("b", Category::Food, true)).await.unwrap();
        assert!(second.id > first.id);

        repo.delete(second.id).await.unwrap();
        let third = repo.create(payload("c", Category::Food, true)).await.unwrap();
        assert!(third.id > second.id, "ids are never reused");
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(payload("Fedora", Category::Cloths, true)).await.unwrap();

        assert_eq!(repo.find(product.id).await.unwrap(), Some(product.clone()));
        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert_eq!(repo.find(product.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product::from_parts(99, payload("ghost", Category::Unknown, false));

        let result = repo.update(ghost).await;
        assert!(matches!(result, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryProductRepository::new();
        let mut product = repo.create(payload("Fedora", Category::Cloths, true)).await.unwrap();

        product.apply(payload("Bowler", Category::Cloths, false));
        let updated = repo.update(product.clone()).await.unwrap();

        assert_eq!(updated, product);
        assert_eq!(repo.find(product.id).await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_equality_finders() {
        let repo = InMemoryProductRepository::new();
        repo.create(payload("Fedora", Category::Cloths, true)).await.unwrap();
        repo.create(payload("Wrench", Category::Tools, false)).await.unwrap();
        repo.create(payload("Hammer", Category::Tools, true)).await.unwrap();

        assert_eq!(repo.all().await.unwrap().len(), 3);
        assert_eq!(repo.find_by_name("Wrench").await.unwrap().len(), 1);
        assert!(repo.find_by_name("wrench").await.unwrap().is_empty());
        assert_eq!(repo.find_by_category(Category::Tools).await.unwrap().len(), 2);
        assert_eq!(repo.find_by_availability(false).await.unwrap().len(), 1);

        let ids: Vec<i32> = repo.all().await.unwrap().iter().map(|p| p.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
