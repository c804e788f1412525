// src/db/role_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::roles::Role,
};

#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Role>, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT idcargo AS id, nomecargo AS name, codigocargo AS code FROM cargos ORDER BY idcargo",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Role>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>(
            "SELECT idcargo AS id, nomecargo AS name, codigocargo AS code FROM cargos WHERE idcargo = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(role)
    }

    pub async fn code_exists<'e, E>(&self, executor: E, code: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM cargos WHERE codigocargo = $1)",
        )
        .bind(code)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str, code: &str) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO cargos (nomecargo, codigocargo)
            VALUES ($1, $2)
            RETURNING idcargo AS id, nomecargo AS name, codigocargo AS code
            "#,
        )
        .bind(name)
        .bind(code)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Role))
    }

    /// Grava a linha inteira. `None` se o cargo sumiu entre a leitura e a escrita.
    pub async fn update<'e, E>(&self, executor: E, role: &Role) -> Result<Option<Role>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE cargos SET nomecargo = $1, codigocargo = $2
            WHERE idcargo = $3
            RETURNING idcargo AS id, nomecargo AS name, codigocargo AS code
            "#,
        )
        .bind(&role.name)
        .bind(&role.code)
        .bind(role.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::Role))
    }

    /// Devolve quantas linhas foram removidas (0 ou 1).
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cargos WHERE idcargo = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Role))?;

        Ok(result.rows_affected())
    }
}
