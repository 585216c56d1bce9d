//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::filter::ProductFilter;
use crate::models::{Product, ProductPayload};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The repository is injected; the service owns the existence checks that
/// turn absence into [`ProductError::NotFound`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductPayload) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products matching every criterion of the filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        match (&filter.name, filter.category, filter.available) {
            (None, None, None) => self.repository.all().await,
            (Some(name), None, None) => self.repository.find_by_name(name).await,
            (None, Some(category), None) => self.repository.find_by_category(category).await,
            (None, None, Some(available)) => {
                self.repository.find_by_availability(available).await
            }
            _ => Ok(filter.apply(self.repository.all().await?)),
        }
    }

    /// Replace every field of an existing product except its id
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: ProductPayload) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self.get_product(id).await?;
        product.apply(input);

        self.repository.update(product).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
