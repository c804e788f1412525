// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::people::Customer,
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT idcliente AS id, idusuario AS user_id, nomecliente AS name, email
            FROM cliente
            ORDER BY nomecliente
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT idcliente AS id, idusuario AS user_id, nomecliente AS name, email
            FROM cliente
            WHERE idcliente = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(customer)
    }

    /// O primeiro cliente vinculado à conta, se houver.
    pub async fn find_id_by_user(&self, user_id: i32) -> Result<Option<i32>, AppError> {
        let id = sqlx::query_scalar::<_, i32>(
            "SELECT idcliente FROM cliente WHERE idusuario = $1 ORDER BY idcliente LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: Option<&str>,
        user_id: Option<i32>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO cliente (nomecliente, email, idusuario)
            VALUES ($1, $2, $3)
            RETURNING idcliente AS id, idusuario AS user_id, nomecliente AS name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Customer))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        customer: &Customer,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE cliente SET nomecliente = $1, email = $2, idusuario = $3
            WHERE idcliente = $4
            RETURNING idcliente AS id, idusuario AS user_id, nomecliente AS name, email
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.user_id)
        .bind(customer.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::Customer))
    }

    // Os pedidos do cliente ficam sem cliente (SET NULL)
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cliente WHERE idcliente = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Customer))?;

        Ok(result.rows_affected())
    }
}
