// src/middleware/json_body.rs

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::common::error::{ApiError, AppError};
use crate::middleware::i18n::Locale;

/// `Json<T>` com a rejeição no formato de erro da API (400 + JSON),
/// em vez do texto puro do axum.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let locale = Locale::from_request_parts(&mut parts, state)
            .await
            .unwrap_or_default();

        match Json::<T>::from_request(Request::from_parts(parts, body), state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Corpo JSON rejeitado: {}", rejection.body_text());
                Err(AppError::InvalidInput(rejection.body_text()).to_api_error(&locale))
            }
        }
    }
}
