// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::orders::{
        CustomerOption, EmployeeOption, LineItem, OrderHeader, OrderItemView, OrderSummary,
        ProductOption,
    },
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    /// Cabeçalhos, do mais recente para o mais antigo.
    /// A situação vem de EXISTS para não duplicar pedidos com vários pagamentos.
    pub async fn list(&self) -> Result<Vec<OrderSummary>, AppError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT p.idpedido AS id, p.datapedido AS created_at, p.valortotal AS total,
                   c.nomecliente AS customer_name, u.nomeusuario AS employee_name,
                   EXISTS (SELECT 1 FROM pagamento pg WHERE pg.idpedido = p.idpedido) AS has_payment
            FROM pedido p
            LEFT JOIN cliente c ON c.idcliente = p.idcliente
            LEFT JOIN usuario u ON u.idusuario = p.idusuario
            ORDER BY p.datapedido DESC, p.idpedido DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn find_header<'e, E>(&self, executor: E, id: i32) -> Result<Option<OrderHeader>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let header = sqlx::query_as::<_, OrderHeader>(
            r#"
            SELECT p.idpedido AS id, p.datapedido AS created_at, p.valortotal AS total,
                   p.idcliente AS customer_id, c.nomecliente AS customer_name, c.email AS customer_email,
                   p.idusuario AS employee_id, u.nomeusuario AS employee_name,
                   EXISTS (SELECT 1 FROM pagamento pg WHERE pg.idpedido = p.idpedido) AS has_payment
            FROM pedido p
            LEFT JOIN cliente c ON c.idcliente = p.idcliente
            LEFT JOIN usuario u ON u.idusuario = p.idusuario
            WHERE p.idpedido = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(header)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: i32) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM pedido WHERE idpedido = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn list_items<'e, E>(&self, executor: E, order_id: i32) -> Result<Vec<OrderItemView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItemView>(
            r#"
            SELECT pp.idpedido AS order_id, pp.idproduto AS product_id, pr.nomeproduto AS product_name,
                   pp.quantidade AS quantity, pp.precounitario AS unit_price
            FROM pedidoproduto pp
            JOIN produto pr ON pr.idproduto = pp.idproduto
            WHERE pp.idpedido = $1
            ORDER BY pr.nomeproduto
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(items)
    }

    // =========================================================================
    //  CABEÇALHO
    // =========================================================================

    pub async fn insert_header<'e, E>(
        &self,
        executor: E,
        customer_id: i32,
        employee_id: i32,
        total: Decimal,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO pedido (idcliente, idusuario, valortotal, datapedido)
            VALUES ($1, $2, $3, NOW())
            RETURNING idpedido
            "#,
        )
        .bind(customer_id)
        .bind(employee_id)
        .bind(total)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Order))
    }

    /// `false` quando o pedido não existe.
    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        id: i32,
        customer_id: i32,
        employee_id: i32,
        total: Decimal,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE pedido SET idcliente = $1, idusuario = $2, valortotal = $3
            WHERE idpedido = $4
            "#,
        )
        .bind(customer_id)
        .bind(employee_id)
        .bind(total)
        .bind(id)
        .execute(executor)
        .await
        .map_err(on_write(Resource::Order))?;

        Ok(result.rows_affected() > 0)
    }

    /// Recalcula o total a partir dos itens gravados.
    /// `None` quando o pedido não existe.
    pub async fn recalculate_total<'e, E>(&self, executor: E, order_id: i32) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE pedido
            SET valortotal = (
                SELECT COALESCE(SUM(pp.quantidade * pp.precounitario), 0)
                FROM pedidoproduto pp
                WHERE pp.idpedido = pedido.idpedido
            )
            WHERE idpedido = $1
            RETURNING valortotal
            "#,
        )
        .bind(order_id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::Order))?;

        Ok(total)
    }

    // Itens e pagamentos saem em cascata
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM pedido WHERE idpedido = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Order))?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn insert_item<'e, E>(&self, executor: E, order_id: i32, item: &LineItem) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO pedidoproduto (idpedido, idproduto, quantidade, precounitario)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .execute(executor)
        .await
        .map_err(on_write(Resource::OrderItem))?;

        Ok(())
    }

    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE pedidoproduto SET quantidade = $1, precounitario = $2
            WHERE idpedido = $3 AND idproduto = $4
            "#,
        )
        .bind(quantity)
        .bind(unit_price)
        .bind(order_id)
        .bind(product_id)
        .execute(executor)
        .await
        .map_err(on_write(Resource::OrderItem))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, order_id: i32, product_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM pedidoproduto WHERE idpedido = $1 AND idproduto = $2")
            .bind(order_id)
            .bind(product_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_items<'e, E>(&self, executor: E, order_id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM pedidoproduto WHERE idpedido = $1")
            .bind(order_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  LISTAS AUXILIARES
    // =========================================================================

    pub async fn customer_options(&self) -> Result<Vec<CustomerOption>, AppError> {
        let customers = sqlx::query_as::<_, CustomerOption>(
            "SELECT idcliente AS id, nomecliente AS name FROM cliente ORDER BY nomecliente",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    // Só contas que pertencem a um funcionário
    pub async fn employee_options(&self) -> Result<Vec<EmployeeOption>, AppError> {
        let employees = sqlx::query_as::<_, EmployeeOption>(
            r#"
            SELECT u.idusuario AS user_id, u.nomeusuario AS name
            FROM usuario u
            JOIN funcionario f ON f.idusuario = u.idusuario
            ORDER BY u.nomeusuario
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn product_options(&self) -> Result<Vec<ProductOption>, AppError> {
        let products = sqlx::query_as::<_, ProductOption>(
            "SELECT idproduto AS id, nomeproduto AS name, precounitario AS price FROM produto ORDER BY nomeproduto",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}
