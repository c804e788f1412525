// src/services/product_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::ProductRepository,
    models::{
        products::{ImageUpload, NewProduct, ProductChanges, ProductImage, ProductView},
        Patch,
    },
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    pool: PgPool,
}

impl ProductService {
    pub fn new(repo: ProductRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<ProductView>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<ProductView, AppError> {
        self.repo
            .find_view(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))
    }

    /// Imagem ausente ou vazia conta como inexistente.
    pub async fn image(&self, id: i32) -> Result<ProductImage, AppError> {
        self.repo
            .find_image(id)
            .await?
            .filter(|image| !image.bytes.is_empty())
            .ok_or(AppError::NotFound(Resource::ProductImage))
    }

    /// Produto e imagem na mesma transação.
    pub async fn create(
        &self,
        product: NewProduct,
        image: Option<ImageUpload>,
    ) -> Result<ProductView, AppError> {
        let mut tx = self.pool.begin().await?;

        let id = self.repo.create(&mut *tx, &product).await?;
        if let Some(image) = &image {
            self.repo.save_image(&mut *tx, id, image).await?;
        }
        let view = self
            .repo
            .find_view(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;

        tx.commit().await?;

        tracing::info!("Produto criado: {} ({}), imagem: {}", view.name, view.id, image.is_some());
        Ok(view)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: ProductChanges,
        image: Option<ImageUpload>,
    ) -> Result<ProductView, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;
        let merged = changes.apply_to(current);

        if !self.repo.update(&mut *tx, &merged).await? {
            return Err(AppError::NotFound(Resource::Product));
        }
        if let Some(image) = &image {
            self.repo.save_image(&mut *tx, id, image).await?;
        }
        let view = self
            .repo
            .find_view(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Product))?;

        tx.commit().await?;

        tracing::info!("Produto atualizado: {}", id);
        Ok(view)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repo.find_by_id(&self.pool, id).await?.is_none() {
            return Err(AppError::NotFound(Resource::Product));
        }

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Product));
        }
        tracing::info!("Produto removido: {}", id);
        Ok(())
    }
}
