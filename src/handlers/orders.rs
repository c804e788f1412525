// src/handlers/orders.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        json_body::JsonBody,
        path_ids::{EntityId, ItemKey},
    },
    models::orders::{
        AddItemPayload, CustomerOption, EmployeeOption, LineItemPayload, OrderCreated,
        OrderDetail, OrderItemView, OrderPayload, OrderSummary, ProductOption, UpdateItemPayload,
    },
};

// =============================================================================
//  1. PEDIDOS (/api/pedidos)
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/pedidos",
    tag = "Pedidos",
    responses((status = 200, description = "Pedidos, do mais recente ao mais antigo", body = Vec<OrderSummary>))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/api/pedidos",
    tag = "Pedidos",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Pedido criado com todos os itens", body = OrderCreated),
        (status = 400, description = "Cliente, funcionário ou itens ausentes/inválidos")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<OrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = payload
        .into_new_order()
        .map_err(|e| e.to_api_error(&locale))?;

    let created = app_state
        .order_service
        .create(order)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Cabeçalho e itens do pedido", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(order))
}

/// Substitui cabeçalho e itens de uma vez.
#[utoipa::path(
    put,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "ID do pedido")),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Pedido substituído", body = OrderCreated),
        (status = 400, description = "Cliente, funcionário ou itens ausentes/inválidos"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<OrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = payload
        .into_new_order()
        .map_err(|e| e.to_api_error(&locale))?;

    let updated = app_state
        .order_service
        .update(id, order)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido junto com itens e pagamentos"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .order_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// -----------------------------------------------------------------------------
//  Listas para os formulários de pedido
// -----------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/pedidos/clientes",
    tag = "Pedidos",
    responses((status = 200, description = "Clientes para seleção", body = Vec<CustomerOption>))
)]
pub async fn list_customer_options(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .order_service
        .customer_options()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(options))
}

#[utoipa::path(
    get,
    path = "/api/pedidos/funcionarios",
    tag = "Pedidos",
    responses((status = 200, description = "Funcionários para seleção", body = Vec<EmployeeOption>))
)]
pub async fn list_employee_options(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .order_service
        .employee_options()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(options))
}

#[utoipa::path(
    get,
    path = "/api/pedidos/produtos",
    tag = "Pedidos",
    responses((status = 200, description = "Produtos com preço para seleção", body = Vec<ProductOption>))
)]
pub async fn list_product_options(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .order_service
        .product_options()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(options))
}

// =============================================================================
//  2. ITENS DE PEDIDO (/api/pedido-itens)
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/pedido-itens/{id}",
    tag = "Itens de Pedido",
    params(("id" = i32, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Itens do pedido", body = Vec<OrderItemView>),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn list_order_items(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(order_id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .order_service
        .list_items(order_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/pedido-itens",
    tag = "Itens de Pedido",
    request_body = AddItemPayload,
    responses(
        (status = 201, description = "Item incluído; devolve o pedido atualizado", body = OrderDetail),
        (status = 400, description = "Item inválido ou produto inexistente"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Produto já está no pedido")
    )
)]
pub async fn add_order_item(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<AddItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let order_id = payload.order_id.unwrap_or_default();
    let item = payload
        .item
        .into_line_item()
        .map_err(|e| e.to_api_error(&locale))?;

    let order = app_state
        .order_service
        .add_item(order_id, item)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/pedido-itens/{order_id}/{product_id}",
    tag = "Itens de Pedido",
    params(
        ("order_id" = i32, Path, description = "ID do pedido"),
        ("product_id" = i32, Path, description = "ID do produto")
    ),
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Item alterado; devolve o pedido atualizado", body = OrderDetail),
        (status = 400, description = "Quantidade ou preço inválidos"),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn update_order_item(
    State(app_state): State<AppState>,
    locale: Locale,
    key: ItemKey,
    JsonBody(payload): JsonBody<UpdateItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    // Mesmas regras de um item novo
    let item = LineItemPayload {
        product_id: Some(key.product_id),
        quantity: payload.quantity,
        unit_price: payload.unit_price,
    }
    .into_line_item()
    .map_err(|e| e.to_api_error(&locale))?;

    let order = app_state
        .order_service
        .update_item(key.order_id, key.product_id, item.quantity, item.unit_price)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(order))
}

#[utoipa::path(
    delete,
    path = "/api/pedido-itens/{order_id}/{product_id}",
    tag = "Itens de Pedido",
    params(
        ("order_id" = i32, Path, description = "ID do pedido"),
        ("product_id" = i32, Path, description = "ID do produto")
    ),
    responses(
        (status = 204, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn delete_order_item(
    State(app_state): State<AppState>,
    locale: Locale,
    key: ItemKey,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .order_service
        .delete_item(key.order_id, key.product_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
