// src/models/categories.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{filled, present, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    #[schema(example = "Bebidas")]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[serde(alias = "nomecategoria", alias = "nomeCategoria")]
    #[validate(
        required(message = "O nome da categoria é obrigatório."),
        length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres.")
    )]
    pub name: Option<String>,

    #[serde(alias = "descricao")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    #[serde(alias = "nomecategoria", alias = "nomeCategoria")]
    pub name: Option<String>,

    // null limpa a descrição; ausente mantém
    #[serde(default, alias = "descricao", deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl Patch<Category> for UpdateCategoryPayload {
    fn apply_to(self, current: Category) -> Category {
        Category {
            id: current.id,
            name: filled(self.name).unwrap_or(current.name),
            description: match self.description {
                Some(value) => value,
                None => current.description,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drinks() -> Category {
        Category {
            id: 2,
            name: "Bebidas".into(),
            description: Some("Geladas".into()),
        }
    }

    #[test]
    fn absent_description_is_kept() {
        let changes: UpdateCategoryPayload = serde_json::from_str(r#"{"name":"Drinks"}"#).unwrap();

        let updated = changes.apply_to(drinks());
        assert_eq!(updated.name, "Drinks");
        assert_eq!(updated.description.as_deref(), Some("Geladas"));
    }

    #[test]
    fn null_description_clears_it() {
        let changes: UpdateCategoryPayload =
            serde_json::from_str(r#"{"descricao":null}"#).unwrap();

        let updated = changes.apply_to(drinks());
        assert_eq!(updated.name, "Bebidas");
        assert_eq!(updated.description, None);
    }
}
