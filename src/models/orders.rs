// src/models/orders.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::{field_error, AppError};
use crate::models::{max_amount, to_cents};

// =============================================================================
//  1. ENUMS
// =============================================================================

/// Situação derivada: pago quando existe ao menos um pagamento para o pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl From<bool> for PaymentStatus {
    fn from(has_payment: bool) -> Self {
        if has_payment {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }
}

// =============================================================================
//  2. PAYLOADS DE ENTRADA
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    #[serde(alias = "idproduto", alias = "idProduto")]
    pub product_id: Option<i32>,

    #[serde(alias = "quantidade")]
    pub quantity: Option<i32>,

    #[serde(alias = "precounitario", alias = "precoUnitario")]
    #[schema(value_type = Option<f64>, example = 12.5)]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(alias = "idCliente", alias = "idcliente")]
    #[validate(required(message = "O cliente é obrigatório."))]
    pub customer_id: Option<i32>,

    // A conta do funcionário que registrou o pedido
    #[serde(alias = "idUsuario", alias = "idusuario")]
    #[validate(required(message = "O funcionário é obrigatório."))]
    pub employee_id: Option<i32>,

    #[serde(default, alias = "produtos", alias = "itens")]
    #[validate(length(min = 1, message = "O pedido precisa de ao menos um item."))]
    pub items: Vec<LineItemPayload>,
}

// =============================================================================
//  3. TIPOS VALIDADOS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl LineItem {
    /// `None` em caso de estouro.
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Um pedido pronto para gravar: cliente, funcionário e itens já conferidos.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: i32,
    pub employee_id: i32,
    pub items: Vec<LineItem>,
}

impl NewOrder {
    /// Total = Σ(quantidade × preço unitário) dos itens enviados.
    pub fn total(&self) -> Result<Decimal, AppError> {
        order_total(&self.items).ok_or_else(|| {
            field_error(
                "items",
                "range",
                "O total do pedido excede o valor máximo permitido.",
            )
        })
    }
}

/// Soma exata dos itens; `None` quando passa do que a coluna do total comporta.
pub fn order_total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
        .filter(|total| *total <= max_amount())
}

impl LineItemPayload {
    pub fn into_line_item(self) -> Result<LineItem, AppError> {
        let product_id = self
            .product_id
            .ok_or_else(|| field_error("items", "product_required", "Cada item precisa de um produto."))?;

        let quantity = match self.quantity {
            Some(q) if q >= 1 => q,
            _ => {
                return Err(field_error(
                    "items",
                    "quantity",
                    "A quantidade de cada item deve ser maior que zero.",
                ))
            }
        };

        let unit_price = match self.unit_price {
            Some(p) if p >= Decimal::ZERO => p,
            _ => {
                return Err(field_error(
                    "items",
                    "unit_price",
                    "O preço unitário de cada item deve ser zero ou maior.",
                ))
            }
        };
        // O banco guarda centavos; o total é somado sobre o mesmo valor gravado
        let unit_price = to_cents(unit_price).ok_or_else(|| {
            field_error(
                "items",
                "range",
                "O preço unitário excede o valor máximo permitido.",
            )
        })?;

        Ok(LineItem {
            product_id,
            quantity,
            unit_price,
        })
    }
}

impl OrderPayload {
    /// Valida o payload inteiro e devolve o pedido pronto para gravar.
    pub fn into_new_order(self) -> Result<NewOrder, AppError> {
        self.validate()?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for payload in self.items {
            let item = payload.into_line_item()?;
            if !seen.insert(item.product_id) {
                return Err(field_error(
                    "items",
                    "duplicate_product",
                    "O mesmo produto aparece mais de uma vez no pedido.",
                ));
            }
            items.push(item);
        }

        // validate() já garantiu os dois campos
        let order = match (self.customer_id, self.employee_id) {
            (Some(customer_id), Some(employee_id)) => NewOrder {
                customer_id,
                employee_id,
                items,
            },
            (None, _) => return Err(field_error("customer_id", "required", "O cliente é obrigatório.")),
            (_, None) => {
                return Err(field_error("employee_id", "required", "O funcionário é obrigatório."))
            }
        };
        order.total()?;
        Ok(order)
    }
}

// Sub-recurso de itens (/api/pedido-itens)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemPayload {
    #[serde(alias = "idpedido", alias = "idPedido")]
    #[validate(required(message = "O pedido é obrigatório."))]
    pub order_id: Option<i32>,

    #[serde(flatten)]
    pub item: LineItemPayload,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[serde(alias = "quantidade")]
    pub quantity: Option<i32>,

    #[serde(alias = "precounitario", alias = "precoUnitario")]
    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,
}

// =============================================================================
//  4. LEITURA
// =============================================================================

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub customer_name: Option<String>,
    pub employee_name: Option<String>,
    #[sqlx(try_from = "bool", rename = "has_payment")]
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub customer_id: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub employee_id: Option<i32>,
    pub employee_name: Option<String>,
    #[sqlx(try_from = "bool", rename = "has_payment")]
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub id: i32,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

// Listas auxiliares do formulário de pedidos
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOption {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeOption {
    pub user_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: i32,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
}
