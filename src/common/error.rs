// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::common::messages::{self, Lang};
use crate::middleware::i18n::Locale;

/// O recurso ao qual um erro de negócio se refere.
/// Usado para escolher a mensagem certa na resposta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Role,
    Category,
    User,
    Customer,
    Employee,
    Product,
    ProductImage,
    PaymentMethod,
    Order,
    OrderItem,
    Payment,
}

// O único tipo de erro que atravessa repositórios, serviços e handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Identificador inválido: {0}")]
    InvalidId(String),

    #[error("{0:?} não encontrado")]
    NotFound(Resource),

    // Violação de unicidade reportada pelo banco
    #[error("Conflito de unicidade em {0:?}")]
    Conflict(Resource),

    // Violação de chave estrangeira ao deletar
    #[error("{0:?} possui registros dependentes")]
    DependencyConflict(Resource),

    // Violação de chave estrangeira ao inserir/atualizar
    #[error("Registro referenciado não existe")]
    InvalidReference,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Corpo de erro devolvido ao cliente.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::InvalidId(_)
            | AppError::DependencyConflict(_)
            | AppError::InvalidReference => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro na resposta pública, já no idioma do cliente.
    /// Detalhes de falhas internas ficam apenas no log.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let lang = locale.lang();
        let status = self.status();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                ApiError {
                    status,
                    error: messages::validation(lang).to_string(),
                    details: Some(serde_json::json!(details)),
                }
            }
            AppError::InvalidInput(reason) => ApiError {
                status,
                error: messages::invalid_input(lang).to_string(),
                details: Some(serde_json::json!({ "reason": reason })),
            },
            AppError::InvalidId(raw) => ApiError {
                status,
                error: messages::invalid_id(lang).to_string(),
                details: Some(serde_json::json!({ "id": raw })),
            },
            AppError::NotFound(resource) => ApiError::new(status, resource.not_found(lang)),
            AppError::Conflict(resource) => ApiError::new(status, resource.conflict(lang)),
            AppError::DependencyConflict(resource) => {
                ApiError::new(status, resource.has_dependents(lang))
            }
            AppError::InvalidReference => ApiError::new(status, messages::invalid_reference(lang)),
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(status, messages::internal(lang))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

// Sem um Locale explícito, respondemos no idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

// Os campos aparecem nos detalhes com o mesmo nome usado no JSON
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Atalho para montar um erro de validação de um único campo,
/// no mesmo formato produzido pelo `validator`.
pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> AppError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(message.into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, err);
    AppError::ValidationError(errors)
}

impl From<Lang> for Locale {
    fn from(lang: Lang) -> Self {
        Locale(lang.tag().to_string())
    }
}
