// src/handlers/auth.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        json_body::JsonBody,
        path_ids::parse_id,
        session::{cleared_session_cookie, session_cookie, CurrentSession},
    },
    models::auth::{
        EmailCheck, LoginOutcome, ManagerCheck, ManagerQuery, SessionStatus, VerifyEmailPayload,
        VerifyPasswordPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/login/verificarEmail",
    tag = "Login",
    request_body = VerifyEmailPayload,
    responses(
        (status = 200, description = "Se o e-mail está cadastrado (e o nome, quando está)", body = EmailCheck),
        (status = 400, description = "E-mail ausente")
    )
)]
pub async fn verify_email(
    State(app_state): State<AppState>,
    locale: Locale,
    JsonBody(payload): JsonBody<VerifyEmailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let email = payload.email.unwrap_or_default();
    let check = app_state
        .auth_service
        .verify_email(&email)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(check))
}

// Handler de login: grava o cookie de sessão quando a senha confere
#[utoipa::path(
    post,
    path = "/api/login/verificarSenha",
    tag = "Login",
    request_body = VerifyPasswordPayload,
    responses(
        (status = 200, description = "`ok` com o cookie de sessão, ou `incorrect`", body = LoginOutcome),
        (status = 400, description = "E-mail ou senha ausentes")
    )
)]
pub async fn verify_password(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    JsonBody(payload): JsonBody<VerifyPasswordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let session = app_state
        .auth_service
        .login(&email, &password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    match session {
        Some((claims, token)) => {
            let jar = jar.add(session_cookie(token, app_state.settings.cookie_secure));
            let outcome = LoginOutcome::Ok {
                id: claims.sub,
                name: claims.name,
            };
            Ok((jar, Json(outcome)))
        }
        None => Ok((jar, Json(LoginOutcome::Incorrect))),
    }
}

#[utoipa::path(
    post,
    path = "/api/login/verificaSeUsuarioEstaLogado",
    tag = "Login",
    responses((status = 200, description = "`ok` com o usuário da sessão, ou `not_logged_in`", body = SessionStatus))
)]
pub async fn session_status(CurrentSession(session): CurrentSession) -> Json<SessionStatus> {
    let status = match session {
        Some(claims) => SessionStatus::Ok {
            id: claims.sub,
            name: claims.name,
        },
        None => SessionStatus::NotLoggedIn,
    };

    Json(status)
}

#[utoipa::path(
    post,
    path = "/api/login/logout",
    tag = "Login",
    responses((status = 200, description = "Cookie de sessão removido", body = SessionStatus))
)]
pub async fn logout(State(app_state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    // `add`, não `remove`: o jar só emite remoção de cookies que vieram na requisição
    let jar = jar.add(cleared_session_cookie(app_state.settings.cookie_secure));
    (jar, Json(SessionStatus::LoggedOut))
}

#[utoipa::path(
    get,
    path = "/api/login/verificarGerente",
    tag = "Login",
    params(ManagerQuery),
    responses(
        (status = 200, description = "Se o usuário tem o cargo de gerente", body = ManagerCheck),
        (status = 400, description = "idusuario ausente ou inválido")
    )
)]
pub async fn check_manager(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ManagerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = parse_id(query.idusuario.as_deref().unwrap_or_default())
        .map_err(|e| e.to_api_error(&locale))?;

    let is_manager = app_state
        .auth_service
        .is_manager(user_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(ManagerCheck { is_manager }))
}
