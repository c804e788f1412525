// src/db/finance_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::finance::{NewPayment, Payment, PaymentMethod, PaymentView},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FORMAS DE PAGAMENTO
    // =========================================================================

    pub async fn list_methods(&self) -> Result<Vec<PaymentMethod>, AppError> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT idformapagamento AS id, nomeformapagamento AS name
            FROM formadepagamento
            ORDER BY idformapagamento
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
    }

    pub async fn find_method<'e, E>(&self, executor: E, id: i32) -> Result<Option<PaymentMethod>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT idformapagamento AS id, nomeformapagamento AS name
            FROM formadepagamento
            WHERE idformapagamento = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(method)
    }

    pub async fn create_method<'e, E>(&self, executor: E, name: &str) -> Result<PaymentMethod, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PaymentMethod>(
            r#"
            INSERT INTO formadepagamento (nomeformapagamento)
            VALUES ($1)
            RETURNING idformapagamento AS id, nomeformapagamento AS name
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::PaymentMethod))
    }

    pub async fn update_method<'e, E>(
        &self,
        executor: E,
        method: &PaymentMethod,
    ) -> Result<Option<PaymentMethod>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PaymentMethod>(
            r#"
            UPDATE formadepagamento SET nomeformapagamento = $1
            WHERE idformapagamento = $2
            RETURNING idformapagamento AS id, nomeformapagamento AS name
            "#,
        )
        .bind(&method.name)
        .bind(method.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::PaymentMethod))
    }

    // Pagamentos registrados bloqueiam a remoção (RESTRICT)
    pub async fn delete_method<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM formadepagamento WHERE idformapagamento = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::PaymentMethod))?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    pub async fn list_payments(&self) -> Result<Vec<PaymentView>, AppError> {
        let payments = sqlx::query_as::<_, PaymentView>(
            r#"
            SELECT p.idpagamento AS id, p.idpedido AS order_id, p.valorpago AS amount_paid,
                   p.idformapagamento AS payment_method_id,
                   f.nomeformapagamento AS payment_method_name,
                   p.datapagamento AS paid_at
            FROM pagamento p
            LEFT JOIN formadepagamento f ON f.idformapagamento = p.idformapagamento
            ORDER BY p.datapagamento DESC, p.idpagamento DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Não confere o valor contra o total nem pagamentos anteriores.
    pub async fn insert_payment<'e, E>(&self, executor: E, payment: &NewPayment) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO pagamento (idpedido, valorpago, idformapagamento, datapagamento)
            VALUES ($1, $2, $3, NOW())
            RETURNING idpagamento AS id, idpedido AS order_id, valorpago AS amount_paid,
                      idformapagamento AS payment_method_id, datapagamento AS paid_at
            "#,
        )
        .bind(payment.order_id)
        .bind(payment.amount_paid)
        .bind(payment.payment_method_id)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Payment))
    }
}
