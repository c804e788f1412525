// src/handlers/products.rs

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, path_ids::EntityId},
    models::products::{ImageUpload, ProductForm, ProductUpload, ProductView, DEFAULT_IMAGE_TYPE},
};

/// Lê o formulário multipart inteiro.
/// Campos desconhecidos são ignorados e arquivo vazio conta como "sem imagem".
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if ProductForm::is_image_field(&name) {
            let content_type = field
                .content_type()
                .map(str::to_owned)
                .unwrap_or_else(|| DEFAULT_IMAGE_TYPE.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(e.body_text()))?;

            if !bytes.is_empty() {
                form.image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    content_type,
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;
        if !form.set_text(&name, value) {
            tracing::debug!("Campo de formulário ignorado: {}", name);
        }
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/produtos",
    tag = "Produtos",
    responses((status = 200, description = "Lista de produtos", body = Vec<ProductView>))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .product_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/api/produtos",
    tag = "Produtos",
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Produto criado", body = ProductView),
        (status = 400, description = "Nome ou preço ausentes, preço inválido ou categoria inexistente")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_product_form(multipart)
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    let (product, image) = form
        .into_new_product()
        .map_err(|e| e.to_api_error(&locale))?;

    let created = app_state
        .product_service
        .create(product, image)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = ProductView),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .product_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/produtos/{id}/image",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Bytes da imagem", content_type = "image/*"),
        (status = 404, description = "Produto sem imagem")
    )
)]
pub async fn get_product_image(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    let image = app_state
        .product_service
        .image(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

#[utoipa::path(
    put,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    request_body(content = ProductUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Produto atualizado", body = ProductView),
        (status = 400, description = "Preço inválido ou categoria inexistente"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_product_form(multipart)
        .await
        .map_err(|e| e.to_api_error(&locale))?;
    let (changes, image) = form.into_changes().map_err(|e| e.to_api_error(&locale))?;

    let product = app_state
        .product_service
        .update(id, changes, image)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado"),
        (status = 400, description = "Produto usado em pedidos")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .product_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
