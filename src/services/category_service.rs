// src/services/category_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::CategoryRepository,
    models::{
        categories::{Category, UpdateCategoryPayload},
        Patch,
    },
};

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
    pool: PgPool,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Category, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Category))
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Category, AppError> {
        let category = self.repo.create(&self.pool, name.trim(), description).await?;
        tracing::info!("Categoria criada: {} ({})", category.name, category.id);
        Ok(category)
    }

    pub async fn update(&self, id: i32, changes: UpdateCategoryPayload) -> Result<Category, AppError> {
        let current = self.get(id).await?;
        let merged = changes.apply_to(current);

        self.repo
            .update(&self.pool, &merged)
            .await?
            .ok_or(AppError::NotFound(Resource::Category))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get(id).await?;

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Category));
        }
        tracing::info!("Categoria removida: {}", id);
        Ok(())
    }
}
