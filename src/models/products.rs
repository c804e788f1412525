// src/models/products.rs

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::common::error::{field_error, AppError};
use crate::models::{filled, to_cents, Patch};

pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

// =============================================================================
//  1. LEITURA
// =============================================================================

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category_id: Option<i32>,
}

// Produto com o nome da categoria e a indicação de imagem
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i32,
    #[schema(example = "Suco de Laranja")]
    pub name: String,
    #[schema(value_type = f64, example = 9.5)]
    pub price: Decimal,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub has_image: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

// =============================================================================
//  2. ESCRITA (multipart)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Os campos de texto e o arquivo recebidos no formulário multipart.
/// Cada campo aceita o nome camelCase e o nome da coluna.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub image: Option<ImageUpload>,
}

// Só para documentar o formulário no OpenAPI
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProductUpload {
    #[schema(example = "Suco de Laranja")]
    pub nomeproduto: Option<String>,
    #[schema(example = "9.50")]
    pub precounitario: Option<String>,
    pub descricao: Option<String>,
    pub idcategoria: Option<i32>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub imagem: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category_id: Option<i32>,
}

/// Alteração parcial de um produto.
/// `description: Some(None)` limpa a descrição.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<Option<String>>,
    pub category_id: Option<i32>,
}

impl Patch<Product> for ProductChanges {
    fn apply_to(self, current: Product) -> Product {
        Product {
            id: current.id,
            name: self.name.unwrap_or(current.name),
            price: self.price.unwrap_or(current.price),
            description: self.description.unwrap_or(current.description),
            category_id: self.category_id.or(current.category_id),
        }
    }
}

impl ProductForm {
    /// Guarda um campo de texto. Devolve `false` se o nome não é conhecido.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" | "nomeproduto" | "nomeProduto" => &mut self.name,
            "price" | "precounitario" | "precoUnitario" => &mut self.price,
            "description" | "descricao" => &mut self.description,
            "categoryId" | "idcategoria" | "idCategoria" => &mut self.category_id,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn is_image_field(field: &str) -> bool {
        matches!(field, "image" | "imagem")
    }

    pub fn into_new_product(self) -> Result<(NewProduct, Option<ImageUpload>), AppError> {
        let name = filled(self.name)
            .ok_or_else(|| field_error("name", "required", "O nome do produto é obrigatório."))?;
        let price = match filled(self.price) {
            Some(raw) => parse_price(&raw)?,
            None => {
                return Err(field_error(
                    "price",
                    "required",
                    "O preço do produto é obrigatório.",
                ))
            }
        };

        let product = NewProduct {
            name: name.trim().to_string(),
            price,
            description: filled(self.description),
            category_id: parse_category(self.category_id)?,
        };
        Ok((product, self.image))
    }

    pub fn into_changes(self) -> Result<(ProductChanges, Option<ImageUpload>), AppError> {
        let price = match filled(self.price) {
            Some(raw) => Some(parse_price(&raw)?),
            None => None,
        };

        let changes = ProductChanges {
            name: filled(self.name).map(|n| n.trim().to_string()),
            price,
            // Campo enviado vazio limpa a descrição
            description: self.description.map(|d| filled(Some(d))),
            category_id: parse_category(self.category_id)?,
        };
        Ok((changes, self.image))
    }
}

// Aceita "9.50" e "9,50"
fn parse_price(raw: &str) -> Result<Decimal, AppError> {
    let price = Decimal::from_str(&raw.trim().replace(',', "."))
        .map_err(|_| field_error("price", "invalid", "O preço deve ser um número válido."))?;

    if price < Decimal::ZERO {
        return Err(field_error(
            "price",
            "range",
            "O preço não pode ser negativo.",
        ));
    }
    to_cents(price).ok_or_else(|| {
        field_error(
            "price",
            "range",
            "O preço excede o valor máximo permitido.",
        )
    })
}

fn parse_category(raw: Option<String>) -> Result<Option<i32>, AppError> {
    match filled(raw) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| {
                field_error("category_id", "invalid", "A categoria informada é inválida.")
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(fields: &[(&str, &str)]) -> ProductForm {
        let mut form = ProductForm::default();
        for (field, value) in fields {
            assert!(form.set_text(field, value.to_string()));
        }
        form
    }

    #[rstest]
    #[case("9.50", Decimal::new(950, 2))]
    #[case("9,50", Decimal::new(950, 2))]
    #[case(" 0 ", Decimal::ZERO)]
    #[case("4,999", Decimal::new(500, 2))]
    fn parses_prices(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_price(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("abc")]
    #[case("10000000000")]
    #[case("1e25")]
    fn rejects_bad_prices(#[case] raw: &str) {
        assert!(matches!(parse_price(raw), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn create_requires_name_and_price() {
        let missing_price = form(&[("nomeproduto", "Suco")]).into_new_product();
        assert!(matches!(missing_price, Err(AppError::ValidationError(_))));

        let missing_name = form(&[("precounitario", "5")]).into_new_product();
        assert!(matches!(missing_name, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn create_reads_column_named_fields() {
        let (product, image) = form(&[
            ("nomeproduto", "Suco"),
            ("precounitario", "7.25"),
            ("descricao", ""),
            ("idcategoria", "3"),
        ])
        .into_new_product()
        .unwrap();

        assert_eq!(product.name, "Suco");
        assert_eq!(product.price, Decimal::new(725, 2));
        assert_eq!(product.description, None);
        assert_eq!(product.category_id, Some(3));
        assert!(image.is_none());
    }

    #[test]
    fn update_merges_over_the_stored_product() {
        let current = Product {
            id: 8,
            name: "Suco".into(),
            price: Decimal::new(700, 2),
            description: Some("Natural".into()),
            category_id: Some(2),
        };

        let (changes, _) = form(&[("price", "8"), ("name", "")]).into_changes().unwrap();
        let updated = changes.apply_to(current.clone());
        assert_eq!(updated.name, "Suco");
        assert_eq!(updated.price, Decimal::from(8));
        assert_eq!(updated.description.as_deref(), Some("Natural"));
        assert_eq!(updated.category_id, Some(2));

        let (changes, _) = form(&[("descricao", "")]).into_changes().unwrap();
        assert_eq!(changes.apply_to(current).description, None);
    }

    #[test]
    fn unknown_fields_are_reported() {
        let mut form = ProductForm::default();
        assert!(!form.set_text("cor", "azul".into()));
        assert!(ProductForm::is_image_field("imagem"));
    }
}
