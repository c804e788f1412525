// src/handlers/categories.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json_body::JsonBody, path_ids::EntityId},
    models::categories::{Category, CreateCategoryPayload, UpdateCategoryPayload},
};

#[utoipa::path(
    get,
    path = "/api/categorias",
    tag = "Categorias",
    responses(
        (status = 200, description = "Lista de categorias (por nome)", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .category_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/categorias",
    tag = "Categorias",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Nome ausente"),
        (status = 409, description = "Nome já cadastrado")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let name = payload.name.unwrap_or_default();
    let category = app_state
        .category_service
        .create(&name, payload.description.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    tag = "Categorias",
    params(("id" = i32, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria encontrada", body = Category),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let category = app_state
        .category_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(category))
}

#[utoipa::path(
    put,
    path = "/api/categorias/{id}",
    tag = "Categorias",
    params(("id" = i32, Path, description = "ID da categoria")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria não encontrada"),
        (status = 409, description = "Nome já cadastrado")
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    JsonBody(payload): JsonBody<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let category = app_state
        .category_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categorias/{id}",
    tag = "Categorias",
    params(("id" = i32, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 400, description = "Categoria vinculada a produtos"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .category_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
