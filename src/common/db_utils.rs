// src/common/db_utils.rs

use crate::common::error::{AppError, Resource};

const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Classificação das falhas do banco que interessam à regra de negócio.
/// Os repositórios usam isto em vez de olhar o SQLSTATE do Postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    UniqueViolation,
    ForeignKeyViolation,
    CheckViolation(Option<String>),
    /// SQLSTATE 22003: valor maior do que a coluna NUMERIC comporta.
    OutOfRange,
    Other,
}

pub(crate) fn classify(err: &sqlx::Error) -> DbFailure {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbFailure::UniqueViolation,
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DbFailure::ForeignKeyViolation
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            DbFailure::CheckViolation(db_err.constraint().map(str::to_string))
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
            DbFailure::OutOfRange
        }
        _ => DbFailure::Other,
    }
}

/// Tradução para INSERT/UPDATE:
/// unicidade vira conflito do recurso, chave estrangeira vira referência inválida.
pub(crate) fn on_write(resource: Resource) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match classify(&e) {
        DbFailure::UniqueViolation => AppError::Conflict(resource),
        DbFailure::ForeignKeyViolation => AppError::InvalidReference,
        DbFailure::CheckViolation(constraint) => AppError::InvalidInput(
            constraint.unwrap_or_else(|| "check".to_string()),
        ),
        DbFailure::OutOfRange => AppError::InvalidInput("numeric_value_out_of_range".to_string()),
        DbFailure::Other => e.into(),
    }
}

/// Tradução para DELETE: chave estrangeira significa que ainda há dependentes.
pub(crate) fn on_delete(resource: Resource) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match classify(&e) {
        DbFailure::ForeignKeyViolation => AppError::DependencyConflict(resource),
        _ => e.into(),
    }
}
