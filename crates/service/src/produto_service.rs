use models::produto::{self, Entity as ProdutoEntity};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::ServiceError;

/// List every stored product, in storage order.
pub async fn list_produtos(db: &DatabaseConnection) -> Result<Vec<produto::Model>, ServiceError> {
    let rows = ProdutoEntity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Fetch a product by id. Absence is a normal outcome, not an error.
pub async fn get_produto(db: &DatabaseConnection, id: i64) -> Result<Option<produto::Model>, ServiceError> {
    let found = ProdutoEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Insert or replace a product. Without an id the database assigns one;
/// with an id the row is overwritten, created if it does not exist.
pub async fn save_produto(
    db: &DatabaseConnection,
    id: Option<i64>,
    nome: &str,
    preco: f64,
    quantidade: i32,
    entrega: bool,
) -> Result<produto::Model, ServiceError> {
    let saved = produto::save(db, id, nome, preco, quantidade, entrega).await?;
    Ok(saved)
}

/// Delete a product; returns true if a row was removed.
pub async fn delete_produto(db: &DatabaseConnection, id: i64) -> Result<bool, ServiceError> {
    let res = ProdutoEntity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
