// src/models/finance.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::{field_error, AppError};
use crate::models::{filled, to_cents, Patch};

// --- Formas de pagamento ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i32,
    #[schema(example = "Pix")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentMethodPayload {
    #[serde(alias = "nomeFormaPagamento", alias = "nomeformapagamento")]
    #[validate(
        required(message = "O nome da forma de pagamento é obrigatório."),
        length(min = 1, max = 60, message = "O nome deve ter entre 1 e 60 caracteres.")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentMethodPayload {
    #[serde(alias = "nomeFormaPagamento", alias = "nomeformapagamento")]
    pub name: Option<String>,
}

impl Patch<PaymentMethod> for UpdatePaymentMethodPayload {
    fn apply_to(self, current: PaymentMethod) -> PaymentMethod {
        PaymentMethod {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
        }
    }
}

// --- Pagamentos ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i32,
    pub order_id: i32,
    #[schema(value_type = f64, example = 25.0)]
    pub amount_paid: Decimal,
    pub payment_method_id: i32,
    pub paid_at: DateTime<Utc>,
}

// Pagamento com o nome da forma de pagamento
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: i32,
    pub order_id: i32,
    #[schema(value_type = f64)]
    pub amount_paid: Decimal,
    pub payment_method_id: i32,
    pub payment_method_name: Option<String>,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentPayload {
    #[serde(alias = "idPedido", alias = "idpedido")]
    #[validate(required(message = "O pedido é obrigatório."))]
    pub order_id: Option<i32>,

    #[serde(alias = "valorPago", alias = "valorpago")]
    #[validate(required(message = "O valor pago é obrigatório."))]
    #[schema(value_type = Option<f64>, example = 25.0)]
    pub amount_paid: Option<Decimal>,

    #[serde(alias = "idFormaPagamento", alias = "idformapagamento")]
    #[validate(required(message = "A forma de pagamento é obrigatória."))]
    pub payment_method_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub order_id: i32,
    pub amount_paid: Decimal,
    pub payment_method_id: i32,
}

impl RegisterPaymentPayload {
    pub fn into_new_payment(self) -> Result<NewPayment, AppError> {
        self.validate()?;

        match (self.order_id, self.amount_paid, self.payment_method_id) {
            (Some(order_id), Some(amount_paid), Some(payment_method_id)) => {
                if amount_paid <= Decimal::ZERO {
                    return Err(field_error(
                        "amount_paid",
                        "range",
                        "O valor pago deve ser maior que zero.",
                    ));
                }
                let amount_paid = to_cents(amount_paid).ok_or_else(|| {
                    field_error(
                        "amount_paid",
                        "range",
                        "O valor pago excede o valor máximo permitido.",
                    )
                })?;
                Ok(NewPayment {
                    order_id,
                    amount_paid,
                    payment_method_id,
                })
            }
            _ => Err(field_error(
                "order_id",
                "required",
                "Campos obrigatórios ausentes.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn reads_the_legacy_field_names() {
        let payload: RegisterPaymentPayload = serde_json::from_value(json!({
            "idPedido": 3,
            "valorPago": 25.5,
            "idFormaPagamento": 1
        }))
        .unwrap();

        let payment = payload.into_new_payment().unwrap();
        assert_eq!(payment.order_id, 3);
        assert_eq!(payment.amount_paid, Decimal::new(255, 1));
        assert_eq!(payment.payment_method_id, 1);
    }

    #[rstest]
    #[case(json!({ "valorPago": 10, "idFormaPagamento": 1 }), "order_id")]
    #[case(json!({ "idPedido": 3, "idFormaPagamento": 1 }), "amount_paid")]
    #[case(json!({ "idPedido": 3, "valorPago": 10 }), "payment_method_id")]
    #[case(json!({ "idPedido": 3, "valorPago": 0, "idFormaPagamento": 1 }), "amount_paid")]
    #[case(json!({ "idPedido": 3, "valorPago": 1e12, "idFormaPagamento": 1 }), "amount_paid")]
    fn rejects_incomplete_payments(#[case] body: serde_json::Value, #[case] field: &str) {
        let payload: RegisterPaymentPayload = serde_json::from_value(body).unwrap();

        match payload.into_new_payment() {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key(field), "{errors:?}");
            }
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
    }
}
