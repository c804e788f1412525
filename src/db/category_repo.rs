// src/db/category_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::categories::Category,
};

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT idcategoria AS id, nomecategoria AS name, descricao AS description
            FROM categoria
            ORDER BY nomecategoria
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT idcategoria AS id, nomecategoria AS name, descricao AS description
            FROM categoria
            WHERE idcategoria = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(category)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categoria (nomecategoria, descricao)
            VALUES ($1, $2)
            RETURNING idcategoria AS id, nomecategoria AS name, descricao AS description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Category))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        category: &Category,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categoria SET nomecategoria = $1, descricao = $2
            WHERE idcategoria = $3
            RETURNING idcategoria AS id, nomecategoria AS name, descricao AS description
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::Category))
    }

    // Produtos da categoria bloqueiam a remoção (RESTRICT)
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categoria WHERE idcategoria = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Category))?;

        Ok(result.rows_affected())
    }
}
