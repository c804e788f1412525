// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    common::error::{AppError, Resource},
    db::OrderRepository,
    models::orders::{
        CustomerOption, EmployeeOption, LineItem, NewOrder, OrderCreated, OrderDetail,
        OrderItemView, OrderSummary, ProductOption,
    },
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(repo: OrderRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn list(&self) -> Result<Vec<OrderSummary>, AppError> {
        self.repo.list().await
    }

    /// Cabeçalho (com nomes e situação) mais os itens.
    pub async fn get(&self, id: i32) -> Result<OrderDetail, AppError> {
        let header = self
            .repo
            .find_header(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::Order))?;
        let items = self.repo.list_items(&self.pool, id).await?;

        Ok(OrderDetail { header, items })
    }

    /// Cabeçalho e itens entram juntos ou nada entra.
    /// O total é calculado a partir dos preços enviados.
    pub async fn create(&self, order: NewOrder) -> Result<OrderCreated, AppError> {
        let total = order.total()?;
        let mut tx = self.pool.begin().await?;

        let id = self
            .repo
            .insert_header(&mut *tx, order.customer_id, order.employee_id, total)
            .await?;
        self.insert_items(&mut tx, id, &order.items).await?;

        tx.commit().await?;

        tracing::info!("Pedido {} criado com {} itens, total {}", id, order.items.len(), total);
        Ok(OrderCreated { id, total })
    }

    /// Substitui o pedido inteiro: itens ausentes no payload são removidos.
    pub async fn update(&self, id: i32, order: NewOrder) -> Result<OrderCreated, AppError> {
        let total = order.total()?;
        let mut tx = self.pool.begin().await?;

        let updated = self
            .repo
            .update_header(&mut *tx, id, order.customer_id, order.employee_id, total)
            .await?;
        if !updated {
            return Err(AppError::NotFound(Resource::Order));
        }

        let removed = self.repo.delete_items(&mut *tx, id).await?;
        self.insert_items(&mut tx, id, &order.items).await?;

        tx.commit().await?;

        tracing::info!(
            "Pedido {} atualizado: {} itens substituídos por {}, total {}",
            id,
            removed,
            order.items.len(),
            total
        );
        Ok(OrderCreated { id, total })
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if self.repo.delete(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::Order));
        }
        tracing::info!("Pedido removido: {}", id);
        Ok(())
    }

    async fn insert_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
        items: &[LineItem],
    ) -> Result<(), AppError> {
        for item in items {
            self.repo.insert_item(&mut **tx, order_id, item).await?;
        }
        Ok(())
    }

    // =========================================================================
    //  ITENS AVULSOS (o total é recalculado a cada escrita)
    // =========================================================================

    pub async fn list_items(&self, order_id: i32) -> Result<Vec<OrderItemView>, AppError> {
        if !self.repo.exists(&self.pool, order_id).await? {
            return Err(AppError::NotFound(Resource::Order));
        }
        self.repo.list_items(&self.pool, order_id).await
    }

    pub async fn add_item(&self, order_id: i32, item: LineItem) -> Result<OrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.repo.exists(&mut *tx, order_id).await? {
            return Err(AppError::NotFound(Resource::Order));
        }
        self.repo.insert_item(&mut *tx, order_id, &item).await?;
        let total = self.recalculate(&mut tx, order_id).await?;

        tx.commit().await?;

        tracing::info!("Produto {} adicionado ao pedido {}, total {}", item.product_id, order_id, total);
        self.get(order_id).await
    }

    pub async fn update_item(
        &self,
        order_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = self
            .repo
            .update_item(&mut *tx, order_id, product_id, quantity, unit_price)
            .await?;
        if !updated {
            return Err(AppError::NotFound(Resource::OrderItem));
        }
        let total = self.recalculate(&mut tx, order_id).await?;

        tx.commit().await?;

        tracing::info!("Item {}/{} atualizado, total {}", order_id, product_id, total);
        self.get(order_id).await
    }

    pub async fn delete_item(&self, order_id: i32, product_id: i32) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        if self.repo.delete_item(&mut *tx, order_id, product_id).await? == 0 {
            return Err(AppError::NotFound(Resource::OrderItem));
        }
        let total = self.recalculate(&mut tx, order_id).await?;

        tx.commit().await?;

        tracing::info!("Item {}/{} removido, total {}", order_id, product_id, total);
        Ok(())
    }

    async fn recalculate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
    ) -> Result<Decimal, AppError> {
        self.repo
            .recalculate_total(&mut **tx, order_id)
            .await?
            .ok_or(AppError::NotFound(Resource::Order))
    }

    // =========================================================================
    //  LISTAS AUXILIARES
    // =========================================================================

    pub async fn customer_options(&self) -> Result<Vec<CustomerOption>, AppError> {
        self.repo.customer_options().await
    }

    pub async fn employee_options(&self) -> Result<Vec<EmployeeOption>, AppError> {
        self.repo.employee_options().await
    }

    pub async fn product_options(&self) -> Result<Vec<ProductOption>, AppError> {
        self.repo.product_options().await
    }
}
