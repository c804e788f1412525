// src/db/employee_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::people::{Employee, EmployeeView},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<EmployeeView>, AppError> {
        let employees = sqlx::query_as::<_, EmployeeView>(
            r#"
            SELECT f.idfuncionario AS id, f.nomefuncionario AS name,
                   f.idcargo AS role_id, c.nomecargo AS role_name,
                   f.idusuario AS user_id, u.nomeusuario AS user_name
            FROM funcionario f
            LEFT JOIN cargos c ON c.idcargo = f.idcargo
            LEFT JOIN usuario u ON u.idusuario = f.idusuario
            ORDER BY f.idfuncionario
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn find_view<'e, E>(&self, executor: E, id: i32) -> Result<Option<EmployeeView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, EmployeeView>(
            r#"
            SELECT f.idfuncionario AS id, f.nomefuncionario AS name,
                   f.idcargo AS role_id, c.nomecargo AS role_name,
                   f.idusuario AS user_id, u.nomeusuario AS user_name
            FROM funcionario f
            LEFT JOIN cargos c ON c.idcargo = f.idcargo
            LEFT JOIN usuario u ON u.idusuario = f.idusuario
            WHERE f.idfuncionario = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT idfuncionario AS id, nomefuncionario AS name, idcargo AS role_id, idusuario AS user_id
            FROM funcionario
            WHERE idfuncionario = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(employee)
    }

    /// O cargo do funcionário vinculado à conta.
    /// `None` quando a conta não é de um funcionário.
    pub async fn find_role_by_user(&self, user_id: i32) -> Result<Option<Option<i32>>, AppError> {
        let role = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT idcargo FROM funcionario WHERE idusuario = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        role_id: Option<i32>,
        user_id: i32,
    ) -> Result<Employee, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO funcionario (nomefuncionario, idcargo, idusuario)
            VALUES ($1, $2, $3)
            RETURNING idfuncionario AS id, nomefuncionario AS name, idcargo AS role_id, idusuario AS user_id
            "#,
        )
        .bind(name)
        .bind(role_id)
        .bind(user_id)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Employee))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        employee: &Employee,
    ) -> Result<Option<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE funcionario SET nomefuncionario = $1, idcargo = $2, idusuario = $3
            WHERE idfuncionario = $4
            RETURNING idfuncionario AS id, nomefuncionario AS name, idcargo AS role_id, idusuario AS user_id
            "#,
        )
        .bind(&employee.name)
        .bind(employee.role_id)
        .bind(employee.user_id)
        .bind(employee.id)
        .fetch_optional(executor)
        .await
        .map_err(on_write(Resource::Employee))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM funcionario WHERE idfuncionario = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Employee))?;

        Ok(result.rows_affected())
    }
}
