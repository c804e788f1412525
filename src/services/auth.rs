// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::{EmployeeRepository, UserRepository},
    middleware::session::SESSION_TTL_HOURS,
    models::auth::{EmailCheck, SessionClaims},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    employee_repo: EmployeeRepository,
    session_secret: String,
    manager_role_id: i32,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        employee_repo: EmployeeRepository,
        session_secret: String,
        manager_role_id: i32,
    ) -> Self {
        Self {
            user_repo,
            employee_repo,
            session_secret,
            manager_role_id,
        }
    }

    pub async fn verify_email(&self, email: &str) -> Result<EmailCheck, AppError> {
        let user = self.user_repo.find_by_email(email.trim()).await?;

        Ok(EmailCheck {
            exists: user.is_some(),
            name: user.map(|u| u.name),
        })
    }

    /// Confere a senha e, se bater, devolve o marcador de sessão.
    /// E-mail desconhecido e senha errada dão o mesmo `None`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<(SessionClaims, String)>, AppError> {
        let Some(user) = self.user_repo.find_credentials(email.trim()).await? else {
            tracing::debug!("Login recusado: e-mail não cadastrado");
            return Ok(None);
        };

        if !password_matches(password.to_owned(), user.password.clone()).await? {
            tracing::debug!("Login recusado para o usuário {}", user.id);
            return Ok(None);
        }

        if !is_bcrypt_hash(&user.password) {
            tracing::warn!(
                "Usuário {} ainda tem senha sem hash; grave uma nova senha para migrar",
                user.id
            );
        }

        let session = self.create_session(user.id, &user.name)?;
        tracing::info!("Usuário {} entrou", user.id);
        Ok(Some(session))
    }

    pub fn create_session(&self, user_id: i32, name: &str) -> Result<(SessionClaims, String), AppError> {
        encode_session(&self.session_secret, user_id, name, Utc::now())
    }

    pub fn decode_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode_session(&self.session_secret, token)
    }

    /// Gerente = funcionário com o cargo configurado.
    /// Conta sem funcionário não é gerente.
    pub async fn is_manager(&self, user_id: i32) -> Result<bool, AppError> {
        let role = self.employee_repo.find_role_by_user(user_id).await?;
        Ok(matches!(role, Some(Some(role_id)) if role_id == self.manager_role_id))
    }
}

// =============================================================================
//  SENHAS
// =============================================================================

pub(crate) async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    Ok(hashed)
}

fn is_bcrypt_hash(stored: &str) -> bool {
    ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|prefix| stored.starts_with(prefix))
}

// Linhas antigas guardam a senha em texto puro
async fn password_matches(password: String, stored: String) -> Result<bool, AppError> {
    if !is_bcrypt_hash(&stored) {
        return Ok(password == stored);
    }

    let valid = tokio::task::spawn_blocking(move || verify(&password, &stored))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

    Ok(valid)
}

// =============================================================================
//  MARCADOR DE SESSÃO (JWT HS256)
// =============================================================================

fn encode_session(
    secret: &str,
    user_id: i32,
    name: &str,
    now: DateTime<Utc>,
) -> Result<(SessionClaims, String), AppError> {
    let expires_at = now + Duration::hours(SESSION_TTL_HOURS);

    let claims = SessionClaims {
        sub: user_id,
        name: name.to_string(),
        exp: unix_seconds(expires_at)?,
        iat: unix_seconds(now)?,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((claims, token))
}

// Datas anteriores a 1970 não cabem em `usize`
fn unix_seconds(at: DateTime<Utc>) -> Result<usize, AppError> {
    usize::try_from(at.timestamp())
        .map_err(|_| AppError::InternalServerError(anyhow::anyhow!("Data fora do intervalo do token: {}", at)))
}

fn decode_session(secret: &str, token: &str) -> Result<SessionClaims, AppError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn session_token_round_trips_the_user() {
        let (claims, token) = encode_session(SECRET, 7, "Maria", Utc::now()).unwrap();

        let decoded = decode_session(SECRET, &token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.name, "Maria");
        assert_eq!(decoded.exp - decoded.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let (_, token) = encode_session("outro-segredo", 7, "Maria", Utc::now()).unwrap();

        assert!(matches!(decode_session(SECRET, &token), Err(AppError::JwtError(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let two_days_ago = Utc::now() - Duration::hours(48);
        let (_, token) = encode_session(SECRET, 7, "Maria", two_days_ago).unwrap();

        assert!(decode_session(SECRET, &token).is_err());
    }

    #[test]
    fn pre_epoch_clock_is_an_error_not_a_wrapped_timestamp() {
        let before_epoch = DateTime::from_timestamp(-86_400, 0).unwrap();

        assert!(matches!(
            encode_session(SECRET, 7, "Maria", before_epoch),
            Err(AppError::InternalServerError(_))
        ));
    }

    #[test]
    fn recognizes_bcrypt_hashes() {
        assert!(is_bcrypt_hash("$2b$12$abcdefghijklmnopqrstuu"));
        assert!(!is_bcrypt_hash("senha123"));
    }

    #[tokio::test]
    async fn legacy_cleartext_passwords_compare_by_equality() {
        assert!(password_matches("senha123".into(), "senha123".into()).await.unwrap());
        assert!(!password_matches("errada".into(), "senha123".into()).await.unwrap());
    }

    #[tokio::test]
    async fn hashed_passwords_are_verified_with_bcrypt() {
        let stored = hash_password("senha123".into()).await.unwrap();

        assert!(is_bcrypt_hash(&stored));
        assert!(password_matches("senha123".into(), stored.clone()).await.unwrap());
        assert!(!password_matches("errada".into(), stored).await.unwrap());
    }
}
