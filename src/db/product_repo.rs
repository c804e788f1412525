// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::{
        db_utils::{on_delete, on_write},
        error::{AppError, Resource},
    },
    models::products::{ImageUpload, NewProduct, Product, ProductImage, ProductView},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn list(&self) -> Result<Vec<ProductView>, AppError> {
        let products = sqlx::query_as::<_, ProductView>(
            r#"
            SELECT p.idproduto AS id, p.nomeproduto AS name, p.precounitario AS price,
                   p.descricao AS description, p.idcategoria AS category_id,
                   c.nomecategoria AS category_name,
                   EXISTS (
                       SELECT 1 FROM imagemproduto i
                       WHERE i.idproduto = p.idproduto AND octet_length(i.imagem) > 0
                   ) AS has_image
            FROM produto p
            LEFT JOIN categoria c ON c.idcategoria = p.idcategoria
            ORDER BY p.idproduto
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_view<'e, E>(&self, executor: E, id: i32) -> Result<Option<ProductView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, ProductView>(
            r#"
            SELECT p.idproduto AS id, p.nomeproduto AS name, p.precounitario AS price,
                   p.descricao AS description, p.idcategoria AS category_id,
                   c.nomecategoria AS category_name,
                   EXISTS (
                       SELECT 1 FROM imagemproduto i
                       WHERE i.idproduto = p.idproduto AND octet_length(i.imagem) > 0
                   ) AS has_image
            FROM produto p
            LEFT JOIN categoria c ON c.idcategoria = p.idcategoria
            WHERE p.idproduto = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i32) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT idproduto AS id, nomeproduto AS name, precounitario AS price,
                   descricao AS description, idcategoria AS category_id
            FROM produto
            WHERE idproduto = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(product)
    }

    pub async fn create<'e, E>(&self, executor: E, product: &NewProduct) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO produto (nomeproduto, precounitario, descricao, idcategoria)
            VALUES ($1, $2, $3, $4)
            RETURNING idproduto
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category_id)
        .fetch_one(executor)
        .await
        .map_err(on_write(Resource::Product))
    }

    /// `false` se nenhuma linha foi atualizada.
    pub async fn update<'e, E>(&self, executor: E, product: &Product) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE produto
            SET nomeproduto = $1, precounitario = $2, descricao = $3, idcategoria = $4
            WHERE idproduto = $5
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.id)
        .execute(executor)
        .await
        .map_err(on_write(Resource::Product))?;

        Ok(result.rows_affected() > 0)
    }

    // A imagem sai em cascata; itens de pedido bloqueiam (RESTRICT)
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM produto WHERE idproduto = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(on_delete(Resource::Product))?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  IMAGEM
    // =========================================================================

    pub async fn find_image(&self, product_id: i32) -> Result<Option<ProductImage>, AppError> {
        let image = sqlx::query_as::<_, ProductImage>(
            "SELECT imagem AS bytes, tipoconteudo AS content_type FROM imagemproduto WHERE idproduto = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    /// Primeira gravação insere; as seguintes substituem os bytes.
    pub async fn save_image<'e, E>(
        &self,
        executor: E,
        product_id: i32,
        image: &ImageUpload,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO imagemproduto (idproduto, imagem, tipoconteudo)
            VALUES ($1, $2, $3)
            ON CONFLICT (idproduto)
            DO UPDATE SET imagem = EXCLUDED.imagem, tipoconteudo = EXCLUDED.tipoconteudo
            "#,
        )
        .bind(product_id)
        .bind(&image.bytes)
        .bind(&image.content_type)
        .execute(executor)
        .await
        .map_err(on_write(Resource::ProductImage))?;

        Ok(())
    }
}
