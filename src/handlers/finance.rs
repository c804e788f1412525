// src/handlers/finance.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody, path_ids::EntityId},
    models::finance::{
        CreatePaymentMethodPayload, Payment, PaymentMethod, PaymentView, RegisterPaymentPayload,
        UpdatePaymentMethodPayload,
    },
};

// =============================================================================
//  1. FORMAS DE PAGAMENTO
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/formas-pagamento",
    tag = "Financeiro",
    responses((status = 200, description = "Formas de pagamento", body = Vec<PaymentMethod>))
)]
pub async fn list_payment_methods(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let methods = app_state
        .finance_service
        .list_methods()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(methods))
}

#[utoipa::path(
    post,
    path = "/api/formas-pagamento",
    tag = "Financeiro",
    request_body = CreatePaymentMethodPayload,
    responses(
        (status = 201, description = "Forma de pagamento criada", body = PaymentMethod),
        (status = 400, description = "Nome ausente")
    )
)]
pub async fn create_payment_method(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreatePaymentMethodPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let name = payload.name.unwrap_or_default();
    let method = app_state
        .finance_service
        .create_method(&name)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(method)))
}

#[utoipa::path(
    get,
    path = "/api/formas-pagamento/{id}",
    tag = "Financeiro",
    params(("id" = i32, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 200, description = "Forma de pagamento encontrada", body = PaymentMethod),
        (status = 404, description = "Forma de pagamento não encontrada")
    )
)]
pub async fn get_payment_method(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let method = app_state
        .finance_service
        .get_method(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(method))
}

#[utoipa::path(
    put,
    path = "/api/formas-pagamento/{id}",
    tag = "Financeiro",
    params(("id" = i32, Path, description = "ID da forma de pagamento")),
    request_body = UpdatePaymentMethodPayload,
    responses(
        (status = 200, description = "Forma de pagamento atualizada", body = PaymentMethod),
        (status = 404, description = "Forma de pagamento não encontrada")
    )
)]
pub async fn update_payment_method(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdatePaymentMethodPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let method = app_state
        .finance_service
        .update_method(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(method))
}

#[utoipa::path(
    delete,
    path = "/api/formas-pagamento/{id}",
    tag = "Financeiro",
    params(("id" = i32, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 204, description = "Forma de pagamento removida"),
        (status = 404, description = "Forma de pagamento não encontrada"),
        (status = 400, description = "Forma de pagamento usada em pagamentos")
    )
)]
pub async fn delete_payment_method(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_service
        .delete_method(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. PAGAMENTOS
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/pagamentos",
    tag = "Financeiro",
    responses((status = 200, description = "Pagamentos registrados", body = Vec<PaymentView>))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let payments = app_state
        .finance_service
        .list_payments()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(payments))
}

#[utoipa::path(
    post,
    path = "/api/pagamentos",
    tag = "Financeiro",
    request_body = RegisterPaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado; o pedido passa a constar como pago", body = Payment),
        (status = 400, description = "Campos ausentes, valor inválido, pedido ou forma inexistentes")
    )
)]
pub async fn register_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<RegisterPaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = payload
        .into_new_payment()
        .map_err(|e| e.to_api_error(&locale))?;

    let registered = app_state
        .finance_service
        .register_payment(payment)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(registered)))
}
