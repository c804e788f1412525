// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Estrutura de dados ("claims") dentro do marcador de sessão
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,     // Subject (ID do usuário)
    pub name: String, // Nome de exibição
    pub exp: usize,   // Expiration time
    pub iat: usize,   // Issued At
}

// O que o repositório devolve para conferir a senha
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyEmailPayload {
    #[validate(
        required(message = "O e-mail é obrigatório."),
        length(min = 1, message = "O e-mail é obrigatório.")
    )]
    #[schema(example = "maria@restaurante.com")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailCheck {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyPasswordPayload {
    #[validate(
        required(message = "O e-mail é obrigatório."),
        length(min = 1, message = "O e-mail é obrigatório.")
    )]
    pub email: Option<String>,

    #[serde(alias = "senha")]
    #[validate(
        required(message = "A senha é obrigatória."),
        length(min = 1, message = "A senha é obrigatória.")
    )]
    pub password: Option<String>,
}

/// Resultado da conferência de senha.
/// `Incorrect` não distingue e-mail inexistente de senha errada.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    Ok { id: i32, name: String },
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    Ok { id: i32, name: String },
    NotLoggedIn,
    LoggedOut,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManagerQuery {
    /// ID do usuário a consultar
    pub idusuario: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagerCheck {
    pub is_manager: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcomes_are_tagged_by_status() {
        let ok = LoginOutcome::Ok {
            id: 4,
            name: "Maria".into(),
        };

        assert_eq!(
            serde_json::to_value(ok).unwrap(),
            json!({ "status": "ok", "id": 4, "name": "Maria" })
        );
        assert_eq!(
            serde_json::to_value(LoginOutcome::Incorrect).unwrap(),
            json!({ "status": "incorrect" })
        );
        assert_eq!(
            serde_json::to_value(SessionStatus::NotLoggedIn).unwrap(),
            json!({ "status": "not_logged_in" })
        );
    }

    #[test]
    fn password_accepts_the_portuguese_field() {
        let payload: VerifyPasswordPayload =
            serde_json::from_str(r#"{"email":"a@b.com","senha":"123"}"#).unwrap();

        assert_eq!(payload.password.as_deref(), Some("123"));
    }
}
