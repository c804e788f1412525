// src/handlers/people.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody, path_ids::EntityId},
    models::people::{
        CreateCustomerPayload, CreateEmployeePayload, CreateUserPayload, Customer, CustomerLink,
        EmployeeView, UpdateCustomerPayload, UpdateEmployeePayload, UpdateUserPayload, User,
    },
};

// =============================================================================
//  1. CONTAS DE ACESSO (/api/usuarios)
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "Usuários",
    responses((status = 200, description = "Lista de contas", body = Vec<User>))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/usuarios",
    tag = "Usuários",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Conta criada", body = User),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let name = payload.name.unwrap_or_default();
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = app_state
        .user_service
        .create(&name, &email, &password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    params(("id" = i32, Path, description = "ID da conta")),
    responses(
        (status = 200, description = "Conta encontrada", body = User),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    params(("id" = i32, Path, description = "ID da conta")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Conta atualizada", body = User),
        (status = 404, description = "Conta não encontrada"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    tag = "Usuários",
    params(("id" = i32, Path, description = "ID da conta")),
    responses(
        (status = 204, description = "Conta removida"),
        (status = 404, description = "Conta não encontrada")
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .user_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. CLIENTES (/api/pessoas)
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/pessoas",
    tag = "Clientes",
    responses((status = 200, description = "Lista de clientes (por nome)", body = Vec<Customer>))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .customer_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(customers))
}

#[utoipa::path(
    post,
    path = "/api/pessoas",
    tag = "Clientes",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Nome ausente ou conta inexistente")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let name = payload.name.unwrap_or_default();
    let customer = app_state
        .customer_service
        .create(&name, payload.email.as_deref(), payload.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/pessoas/{id}",
    tag = "Clientes",
    params(("id" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let customer = app_state
        .customer_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(customer))
}

#[utoipa::path(
    get,
    path = "/api/pessoas/usuario/{id}",
    tag = "Clientes",
    params(("id" = i32, Path, description = "ID da conta")),
    responses((status = 200, description = "Cliente vinculado à conta (ou null)", body = CustomerLink))
)]
pub async fn get_customer_for_user(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(user_id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = app_state
        .customer_service
        .customer_for_user(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(CustomerLink { customer_id }))
}

#[utoipa::path(
    put,
    path = "/api/pessoas/{id}",
    tag = "Clientes",
    params(("id" = i32, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = app_state
        .customer_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(customer))
}

#[utoipa::path(
    delete,
    path = "/api/pessoas/{id}",
    tag = "Clientes",
    params(("id" = i32, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .customer_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  3. FUNCIONÁRIOS (/api/funcionarios)
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/funcionarios",
    tag = "Funcionários",
    responses((status = 200, description = "Lista de funcionários", body = Vec<EmployeeView>))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .employee_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(employees))
}

#[utoipa::path(
    post,
    path = "/api/funcionarios",
    tag = "Funcionários",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = EmployeeView),
        (status = 400, description = "Campos ausentes, conta ou cargo inexistentes"),
        (status = 409, description = "Conta já vinculada a outro funcionário")
    )
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let name = payload.name.unwrap_or_default();
    let user_id = payload.user_id.unwrap_or_default();

    let employee = app_state
        .employee_service
        .create(&name, payload.role_id, user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/funcionarios/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "ID do funcionário")),
    responses(
        (status = 200, description = "Funcionário encontrado", body = EmployeeView),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/funcionarios/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = EmployeeView),
        (status = 404, description = "Funcionário não encontrado"),
        (status = 409, description = "Conta já vinculada a outro funcionário")
    )
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/funcionarios/{id}",
    tag = "Funcionários",
    params(("id" = i32, Path, description = "ID do funcionário")),
    responses(
        (status = 204, description = "Funcionário removido"),
        (status = 404, description = "Funcionário não encontrado")
    )
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .employee_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
