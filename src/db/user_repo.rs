// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::{auth::UserCredentials, people::User},
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT idusuario AS id, nomeusuario AS name, email FROM usuario ORDER BY idusuario",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            "SELECT idusuario AS id, nomeusuario AS name, email FROM usuario WHERE idusuario = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT idusuario AS id, nomeusuario AS name, email FROM usuario WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    // Só para a conferência de senha
    pub async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT idusuario AS id, nomeusuario AS name, senha AS password FROM usuario WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuario (nomeusuario, email, senha)
            VALUES ($1, $2, $3)
            RETURNING idusuario AS id, nomeusuario AS name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::User))
    }

    /// Atualiza nome e e-mail. A senha só muda quando um novo hash é passado.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE usuario
            SET nomeusuario = $1, email = $2, senha = COALESCE($3, senha)
            WHERE idusuario = $4
            RETURNING idusuario AS id, nomeusuario AS name, email
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(user.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::User))
    }

    // Apaga o funcionário em cascata e desvincula cliente/pedidos
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM usuario WHERE idusuario = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::User))?;

        Ok(result.rows_affected())
    }
}
