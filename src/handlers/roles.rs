// src/handlers/roles.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody, path_ids::EntityId},
    models::roles::{CheckRoleCodePayload, CreateRolePayload, Role, RoleCodeCheck, UpdateRolePayload},
};

#[utoipa::path(
    get,
    path = "/api/cargos",
    tag = "Cargos",
    responses(
        (status = 200, description = "Lista de cargos", body = Vec<Role>)
    )
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let roles = app_state
        .role_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(roles))
}

#[utoipa::path(
    post,
    path = "/api/cargos",
    tag = "Cargos",
    request_body = CreateRolePayload,
    responses(
        (status = 201, description = "Cargo criado", body = Role),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 409, description = "Código de cargo já existe")
    )
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    // validate() já garantiu os campos obrigatórios
    let name = payload.name.unwrap_or_default();
    let code = payload.code.unwrap_or_default();

    let role = app_state
        .role_service
        .create(&name, &code)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(role)))
}

#[utoipa::path(
    get,
    path = "/api/cargos/{id}",
    tag = "Cargos",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo encontrado", body = Role),
        (status = 400, description = "ID inválido"),
        (status = 404, description = "Cargo não encontrado")
    )
)]
pub async fn get_role(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .role_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}

#[utoipa::path(
    put,
    path = "/api/cargos/{id}",
    tag = "Cargos",
    params(("id" = i32, Path, description = "ID do cargo")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Cargo atualizado", body = Role),
        (status = 404, description = "Cargo não encontrado"),
        (status = 409, description = "Código de cargo já existe")
    )
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .role_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}

#[utoipa::path(
    delete,
    path = "/api/cargos/{id}",
    tag = "Cargos",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 204, description = "Cargo removido"),
        (status = 404, description = "Cargo não encontrado")
    )
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .role_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

/// 409 quando o código já está em uso, 200 quando está livre.
#[utoipa::path(
    post,
    path = "/api/cargos/verificarCodigo",
    tag = "Cargos",
    request_body = CheckRoleCodePayload,
    responses(
        (status = 200, description = "Código disponível", body = RoleCodeCheck),
        (status = 409, description = "Código já cadastrado", body = RoleCodeCheck)
    )
)]
pub async fn check_role_code(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CheckRoleCodePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let code = payload.code.unwrap_or_default();
    let exists = app_state
        .role_service
        .code_exists(&code)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let status = if exists { StatusCode::CONFLICT } else { StatusCode::OK };
    Ok((status, Json(RoleCodeCheck { exists })))
}
