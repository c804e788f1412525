// src/config.rs

use std::{env, net::SocketAddr, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CategoryRepository, CustomerRepository, EmployeeRepository, FinanceRepository,
        OrderRepository, ProductRepository, RoleRepository, UserRepository,
    },
    services::{
        auth::AuthService, category_service::CategoryService, customer_service::CustomerService,
        employee_service::EmployeeService, finance_service::FinanceService,
        order_service::OrderService, product_service::ProductService, role_service::RoleService,
        user_service::UserService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub manager_role_id: i32,
    pub cookie_secure: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte de chave/valor.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let session_secret = lookup("SESSION_SECRET").context("SESSION_SECRET deve ser definido")?;
        if session_secret.trim().is_empty() {
            anyhow::bail!("SESSION_SECRET não pode ser vazio");
        }

        let bind_addr = parse_or(&lookup, "BIND_ADDR", "0.0.0.0:3000".parse()?)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        let acquire_secs: u64 = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?;
        let manager_role_id = parse_or(&lookup, "MANAGER_ROLE_ID", 1)?;
        let cookie_secure = parse_or(&lookup, "COOKIE_SECURE", true)?;

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            manager_role_id,
            cookie_secure,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválido ({}): {}", key, raw, e)),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Settings,
    pub role_service: RoleService,
    pub category_service: CategoryService,
    pub user_service: UserService,
    pub customer_service: CustomerService,
    pub employee_service: EmployeeService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub finance_service: FinanceService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        let settings = Settings::from_env()?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, settings))
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, settings: Settings) -> Self {
        let role_repo = RoleRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            employee_repo.clone(),
            settings.session_secret.clone(),
            settings.manager_role_id,
        );

        Self {
            role_service: RoleService::new(role_repo.clone(), db_pool.clone()),
            category_service: CategoryService::new(
                CategoryRepository::new(db_pool.clone()),
                db_pool.clone(),
            ),
            user_service: UserService::new(user_repo.clone(), db_pool.clone()),
            customer_service: CustomerService::new(
                CustomerRepository::new(db_pool.clone()),
                db_pool.clone(),
            ),
            employee_service: EmployeeService::new(
                employee_repo,
                user_repo,
                role_repo,
                db_pool.clone(),
            ),
            product_service: ProductService::new(
                ProductRepository::new(db_pool.clone()),
                db_pool.clone(),
            ),
            order_service: OrderService::new(OrderRepository::new(db_pool.clone()), db_pool.clone()),
            finance_service: FinanceService::new(
                FinanceRepository::new(db_pool.clone()),
                db_pool.clone(),
            ),
            auth_service,
            settings,
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn fills_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/backoffice"),
            ("SESSION_SECRET", "s3gredo"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(settings.db_max_connections, 5);
        assert_eq!(settings.db_acquire_timeout, Duration::from_secs(3));
        assert_eq!(settings.manager_role_id, 1);
        assert!(settings.cookie_secure);
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/backoffice"),
            ("SESSION_SECRET", "s3gredo"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("MANAGER_ROLE_ID", "4"),
            ("COOKIE_SECURE", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.manager_role_id, 4);
        assert!(!settings.cookie_secure);
    }

    #[test]
    fn requires_database_url_and_secret() {
        assert!(Settings::from_lookup(lookup(&[("SESSION_SECRET", "x")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).is_err());
    }

    #[test]
    fn rejects_malformed_numbers() {
        let result = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/backoffice"),
            ("SESSION_SECRET", "s3gredo"),
            ("MANAGER_ROLE_ID", "gerente"),
        ]));

        assert!(result.is_err());
    }
}
