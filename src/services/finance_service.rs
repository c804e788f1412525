// src/services/finance_service.rs

use sqlx::PgPool;

use crate::{
    common::error::{AppError, Resource},
    db::FinanceRepository,
    models::{
        finance::{NewPayment, Payment, PaymentMethod, PaymentView, UpdatePaymentMethodPayload},
        Patch,
    },
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- Formas de pagamento ---

    pub async fn list_methods(&self) -> Result<Vec<PaymentMethod>, AppError> {
        self.repo.list_methods().await
    }

    pub async fn get_method(&self, id: i32) -> Result<PaymentMethod, AppError> {
        self.repo
            .find_method(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound(Resource::PaymentMethod))
    }

    pub async fn create_method(&self, name: &str) -> Result<PaymentMethod, AppError> {
        let method = self.repo.create_method(&self.pool, name.trim()).await?;
        tracing::info!("Forma de pagamento criada: {} ({})", method.name, method.id);
        Ok(method)
    }

    pub async fn update_method(
        &self,
        id: i32,
        changes: UpdatePaymentMethodPayload,
    ) -> Result<PaymentMethod, AppError> {
        let current = self.get_method(id).await?;
        let merged = changes.apply_to(current);

        self.repo
            .update_method(&self.pool, &merged)
            .await?
            .ok_or(AppError::NotFound(Resource::PaymentMethod))
    }

    pub async fn delete_method(&self, id: i32) -> Result<(), AppError> {
        self.get_method(id).await?;

        if self.repo.delete_method(&self.pool, id).await? == 0 {
            return Err(AppError::NotFound(Resource::PaymentMethod));
        }
        tracing::info!("Forma de pagamento removida: {}", id);
        Ok(())
    }

    // --- Pagamentos ---

    pub async fn list_payments(&self) -> Result<Vec<PaymentView>, AppError> {
        self.repo.list_payments().await
    }

    /// Pedido ou forma de pagamento inexistentes viram referência inválida.
    pub async fn register_payment(&self, payment: NewPayment) -> Result<Payment, AppError> {
        let payment = self.repo.insert_payment(&self.pool, &payment).await?;

        tracing::info!(
            "Pagamento {} registrado para o pedido {}: {}",
            payment.id,
            payment.order_id,
            payment.amount_paid
        );
        Ok(payment)
    }
}
