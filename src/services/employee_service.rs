// src/services/employee_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{field_error, AppError, Resource},
    db::{EmployeeRepository, RoleRepository, UserRepository},
    models::{
        people::{EmployeeView, UpdateEmployeePayload},
        Patch,
    },
};

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
    user_repo: UserRepository,
    role_repo: RoleRepository,
    pool: PgPool,
}

impl EmployeeService {
    pub fn new(
        repo: EmployeeRepository,
        user_repo: UserRepository,
        role_repo: RoleRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            user_repo,
            role_repo,
            pool,
        }
    }

    pub async fn list(&self) -> Result<Vec<EmployeeView>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<EmployeeView, AppError> {
        self.repo
            .find_view(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Employee))
    }

    /// Confere a conta e o cargo antes de gravar.
    /// Conta já vinculada a outro funcionário vira conflito (unicidade no banco).
    pub async fn create(
        &self,
        name: &str,
        role_id: Option<i32>,
        user_id: i32,
    ) -> Result<EmployeeView, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.user_repo.find_by_id(&mut *tx, user_id).await?.is_none() {
            return Err(field_error("user_id", "not_found", "Usuário não encontrado."));
        }
        if let Some(role_id) = role_id {
            if self.role_repo.find_by_id(&mut *tx, role_id).await?.is_none() {
                return Err(field_error("role_id", "not_found", "Cargo não encontrado."));
            }
        }

        let employee = self.repo.create(&mut *tx, name.trim(), role_id, user_id).await?;
        let view = self
            .repo
            .find_view(&mut *tx, employee.id)
            .await?
            .ok_or(AppError::NotFound(Resource::Employee))?;

        tx.commit().await?;

        tracing::info!("Funcionário criado: {} (usuário {})", view.id, view.user_id);
        Ok(view)
    }

    pub async fn update(&self, id: i32, changes: UpdateEmployeePayload) -> Result<EmployeeView, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Employee))?;
        let merged = changes.apply_to(current);

        self.repo
            .update(&mut *tx, &merged)
            .await?
            .ok_or(AppError::NotFound(Resource::Employee))?;
        let view = self
            .repo
            .find_view(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Employee))?;

        tx.commit().await?;
        Ok(view)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repo.find_by_id(&self.pool, id).await?.is_none() {
            return Err(AppError::NotFound(Resource::Employee));
        }

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Employee));
        }
        tracing::info!("Funcionário removido: {}", id);
        Ok(())
    }
}
