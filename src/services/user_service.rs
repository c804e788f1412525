// src/services/user_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::UserRepository,
    models::{
        people::{UpdateUserPayload, User},
        Patch,
    },
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(repo: UserRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    pub async fn create(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        // Hashing fora de qualquer conexão
        let password_hash = hash_password(password.to_owned()).await?;

        let user = self
            .repo
            .create(&self.pool, name.trim(), email.trim(), &password_hash)
            .await?;

        tracing::info!("Usuário criado: {}", user.id);
        Ok(user)
    }

    pub async fn update(&self, id: i32, mut changes: UpdateUserPayload) -> Result<User, AppError> {
        let current = self.get(id).await?;

        let password_hash = match changes.password.take().filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        let merged = changes.apply_to(current);

        self.repo
            .update(&self.pool, &merged, password_hash.as_deref())
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.get(id).await?;

        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::User));
        }
        tracing::info!("Usuário removido: {}", id);
        Ok(())
    }
}
