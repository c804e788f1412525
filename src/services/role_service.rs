// src/services/role_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::RoleRepository,
    models::{
        roles::{Role, UpdateRolePayload},
        Patch,
    },
};

#[derive(Clone)]
pub struct RoleService {
    repo: RoleRepository,
    pool: PgPool,
}

impl RoleService {
    pub fn new(repo: RoleRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<Role>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Role, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Role))
    }

    pub async fn create(&self, name: &str, code: &str) -> Result<Role, AppError> {
        let role = self.repo.create(&self.pool, name.trim(), code.trim()).await?;
        tracing::info!("Cargo criado: {} ({})", role.name, role.id);
        Ok(role)
    }

    pub async fn update(&self, id: i32, changes: UpdateRolePayload) -> Result<Role, AppError> {
        let current = self.get(id).await?;
        let merged = changes.apply_to(current);

        self.repo
            .update(&self.pool, &merged)
            .await?
            .ok_or(AppError::NotFound(Resource::Role))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get(id).await?;

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Role));
        }
        tracing::info!("Cargo removido: {}", id);
        Ok(())
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        self.repo.code_exists(&self.pool, code.trim()).await
    }
}
