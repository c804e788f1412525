// src/models/people.rs
//
// Contas de acesso (usuario), clientes (cliente) e funcionários (funcionario).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{filled, present, Patch};

// =============================================================================
//  1. CONTAS DE ACESSO
// =============================================================================

// A senha nunca sai do repositório por este tipo
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[schema(example = "maria@restaurante.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[serde(alias = "nomeUsuario", alias = "nomeusuario")]
    #[validate(
        required(message = "O nome é obrigatório."),
        length(min = 1, max = 120, message = "O nome deve ter entre 1 e 120 caracteres.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "O e-mail é obrigatório."),
        email(message = "O e-mail fornecido é inválido.")
    )]
    pub email: Option<String>,

    #[serde(alias = "senha")]
    #[validate(
        required(message = "A senha é obrigatória."),
        length(min = 1, message = "A senha é obrigatória.")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[serde(alias = "nomeUsuario", alias = "nomeusuario")]
    pub name: Option<String>,

    pub email: Option<String>,

    // Quando enviada, vira um novo hash
    #[serde(alias = "senha")]
    pub password: Option<String>,
}

impl Patch<User> for UpdateUserPayload {
    fn apply_to(self, current: User) -> User {
        User {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
            email: filled(self.email).unwrap_or(current.email),
        }
    }
}

// =============================================================================
//  2. CLIENTES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub user_id: Option<i32>,
    #[schema(example = "João Lima")]
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[serde(alias = "nomeCliente", alias = "nomecliente")]
    #[validate(
        required(message = "O nome do cliente é obrigatório."),
        length(min = 1, max = 120, message = "O nome deve ter entre 1 e 120 caracteres.")
    )]
    pub name: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[serde(alias = "idUsuario", alias = "idusuario")]
    pub user_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[serde(alias = "nomeCliente", alias = "nomecliente")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, alias = "idUsuario", alias = "idusuario", deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub user_id: Option<Option<i32>>,
}

impl Patch<Customer> for UpdateCustomerPayload {
    fn apply_to(self, current: Customer) -> Customer {
        Customer {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
            email: self.email.unwrap_or(current.email),
            user_id: self.user_id.unwrap_or(current.user_id),
        }
    }
}

/// O cliente vinculado a uma conta (ou `null`).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLink {
    pub customer_id: Option<i32>,
}

// =============================================================================
//  3. FUNCIONÁRIOS
// =============================================================================

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub role_id: Option<i32>,
    pub user_id: i32,
}

// Funcionário com os nomes do cargo e da conta
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i32,
    #[schema(example = "Carlos Pereira")]
    pub name: String,
    pub role_id: Option<i32>,
    pub role_name: Option<String>,
    pub user_id: i32,
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[serde(alias = "nomeFuncionario", alias = "nomefuncionario")]
    #[validate(
        required(message = "O nome do funcionário é obrigatório."),
        length(min = 1, max = 120, message = "O nome deve ter entre 1 e 120 caracteres.")
    )]
    pub name: Option<String>,

    #[serde(alias = "idCargo", alias = "idcargo")]
    pub role_id: Option<i32>,

    #[serde(alias = "idUsuario", alias = "idusuario")]
    #[validate(required(message = "O ID do usuário é obrigatório."))]
    pub user_id: Option<i32>,
}

// null ou ausente mantém o valor atual
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[serde(alias = "nomeFuncionario", alias = "nomefuncionario")]
    pub name: Option<String>,

    #[serde(alias = "idCargo", alias = "idcargo")]
    pub role_id: Option<i32>,

    #[serde(alias = "idUsuario", alias = "idusuario")]
    pub user_id: Option<i32>,
}

impl Patch<Employee> for UpdateEmployeePayload {
    fn apply_to(self, current: Employee) -> Employee {
        Employee {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
            role_id: self.role_id.or(current.role_id),
            user_id: self.user_id.unwrap_or(current.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_patch_distinguishes_null_from_absent() {
        let current = Customer {
            id: 1,
            user_id: Some(9),
            name: "João".into(),
            email: Some("joao@ex.com".into()),
        };

        let changes: UpdateCustomerPayload =
            serde_json::from_str(r#"{"nomeCliente":"João Lima","idUsuario":null}"#).unwrap();
        let updated = changes.apply_to(current);

        assert_eq!(updated.name, "João Lima");
        assert_eq!(updated.email.as_deref(), Some("joao@ex.com"));
        assert_eq!(updated.user_id, None);
    }

    #[test]
    fn employee_patch_keeps_role_when_not_sent() {
        let current = Employee {
            id: 5,
            name: "Carlos".into(),
            role_id: Some(2),
            user_id: 7,
        };

        let changes: UpdateEmployeePayload =
            serde_json::from_str(r#"{"nomefuncionario":"Carlos P."}"#).unwrap();
        let updated = changes.apply_to(current);

        assert_eq!(updated.name, "Carlos P.");
        assert_eq!(updated.role_id, Some(2));
        assert_eq!(updated.user_id, 7);
    }

    #[test]
    fn user_payload_requires_a_valid_email() {
        let payload: CreateUserPayload = serde_json::from_str(
            r#"{"nomeUsuario":"Maria","email":"nao-e-email","senha":"x"}"#,
        )
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn user_never_serializes_a_password_field() {
        let user = User {
            id: 1,
            name: "Maria".into(),
            email: "maria@ex.com".into(),
        };

        let json = serde_json::to_value(user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("senha").is_none());
    }
}
