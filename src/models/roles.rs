// src/models/roles.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{filled, Patch};

// O que sai do banco (tabela cargos)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Gerente")]
    pub name: String,

    #[schema(example = "GER123")]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[serde(alias = "nomecargo", alias = "nomeCargo")]
    #[validate(
        required(message = "O nome do cargo é obrigatório."),
        length(min = 1, message = "O nome do cargo é obrigatório.")
    )]
    #[schema(example = "Garçom")]
    pub name: Option<String>,

    #[serde(alias = "codigocargo", alias = "codigoCargo")]
    #[validate(
        required(message = "O código do cargo é obrigatório."),
        length(min = 1, max = 30, message = "O código deve ter entre 1 e 30 caracteres.")
    )]
    #[schema(example = "GAR001")]
    pub code: Option<String>,
}

// Campos ausentes (ou em branco) mantêm o valor atual
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    #[serde(alias = "nomecargo", alias = "nomeCargo")]
    pub name: Option<String>,

    #[serde(alias = "codigocargo", alias = "codigoCargo")]
    pub code: Option<String>,
}

impl Patch<Role> for UpdateRolePayload {
    fn apply_to(self, current: Role) -> Role {
        Role {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
            code: filled(self.code).unwrap_or(current.code),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRoleCodePayload {
    #[serde(alias = "codigocargo", alias = "codigoCargo")]
    #[validate(
        required(message = "O código do cargo é obrigatório."),
        length(min = 1, message = "O código do cargo é obrigatório.")
    )]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleCodeCheck {
    pub exists: bool,
}
