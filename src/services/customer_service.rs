// src/services/customer_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::CustomerRepository,
    models::{
        people::{Customer, UpdateCustomerPayload},
        Patch,
    },
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    pool: PgPool,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Customer))
    }

    pub async fn customer_for_user(&self, user_id: i32) -> Result<Option<i32>, AppError> {
        self.repo.find_id_by_user(user_id).await
    }

    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        user_id: Option<i32>,
    ) -> Result<Customer, AppError> {
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let customer = self.repo.create(&self.pool, name.trim(), email, user_id).await?;

        tracing::info!("Cliente criado: {}", customer.id);
        Ok(customer)
    }

    pub async fn update(&self, id: i32, changes: UpdateCustomerPayload) -> Result<Customer, AppError> {
        let current = self.get(id).await?;
        let merged = changes.apply_to(current);

        self.repo
            .update(&self.pool, &merged)
            .await?
            .ok_or(AppError::NotFound(Resource::Customer))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get(id).await?;

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Customer));
        }
        tracing::info!("Cliente removido: {}", id);
        Ok(())
    }
}
