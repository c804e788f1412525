// src/middleware/path_ids.rs
//
// Extratores de IDs numéricos da URL.
// O `Path<i32>` padrão do axum rejeita com texto puro; aqui a rejeição
// segue o mesmo formato JSON dos outros erros da API.

use axum::extract::{FromRequestParts, RawPathParams};
use axum::http::request::Parts;

use crate::common::error::{ApiError, AppError};
use crate::middleware::i18n::Locale;

/// O ID de um recurso (`/:id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

/// A chave composta de um item de pedido (`/:order_id/:product_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemKey {
    pub order_id: i32,
    pub product_id: i32,
}

pub(crate) fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidId(raw.to_string()))
}

async fn numeric_params<S>(parts: &mut Parts, state: &S) -> Result<Vec<i32>, ApiError>
where
    S: Send + Sync,
{
    let locale = Locale::from_request_parts(parts, state)
        .await
        .unwrap_or_default();

    let params = RawPathParams::from_request_parts(parts, state)
        .await
        .map_err(|_| AppError::InvalidId(String::new()).to_api_error(&locale))?;

    params
        .iter()
        .map(|(_, value)| parse_id(value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_api_error(&locale))
}

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match numeric_params(parts, state).await?.as_slice() {
            [id, ..] => Ok(EntityId(*id)),
            [] => Err(AppError::InvalidId(String::new()).to_api_error(&Locale::default())),
        }
    }
}

impl<S> FromRequestParts<S> for ItemKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match numeric_params(parts, state).await?.as_slice() {
            [order_id, product_id, ..] => Ok(ItemKey {
                order_id: *order_id,
                product_id: *product_id,
            }),
            _ => Err(AppError::InvalidId(String::new()).to_api_error(&Locale::default())),
        }
    }
}
