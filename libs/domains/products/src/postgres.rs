use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Category, Product, ProductPayload},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn select(&self, condition: Option<sea_orm::Condition>) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find();
        if let Some(condition) = condition {
            query = query.filter(condition);
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: ProductPayload) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => ProductError::Database(other),
        })?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn all(&self) -> ProductResult<Vec<Product>> {
        self.select(None).await
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        self.select(Some(
            sea_orm::Condition::all().add(entity::Column::Name.eq(name)),
        ))
        .await
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        self.select(Some(
            sea_orm::Condition::all().add(entity::Column::Category.eq(category)),
        ))
        .await
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        self.select(Some(
            sea_orm::Condition::all().add(entity::Column::Available.eq(available)),
        ))
        .await
    }
}
