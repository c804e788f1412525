// src/middleware/session.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{config::AppState, models::auth::SessionClaims};

/// Nome do cookie que carrega o marcador de sessão.
pub const SESSION_COOKIE: &str = "usuarioLogado";

/// Validade do marcador de sessão.
pub const SESSION_TTL_HOURS: i64 = 24;

// Extrator da sessão atual.
// `None` quando não há cookie, ou quando o token é inválido/expirado.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionClaims>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let claims = jar.get(SESSION_COOKIE).and_then(|cookie| {
            app_state
                .auth_service
                .decode_session(cookie.value())
                .map_err(|e| tracing::debug!("Marcador de sessão rejeitado: {}", e))
                .ok()
        });

        Ok(CurrentSession(claims))
    }
}

/// Cookie com o token de sessão: httpOnly, cross-site, 24h.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::hours(SESSION_TTL_HOURS))
        .build()
}

/// Cookie de remoção (mesmos atributos, para o navegador casar o cookie).
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .build();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_carries_cross_site_attributes() {
        let cookie = session_cookie("abc".into(), true);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let cookie = cleared_session_cookie(false);

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }
}
