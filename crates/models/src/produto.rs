use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    pub preco: f64,
    pub quantidade: i32,
    pub entrega: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert-or-replace keyed by id.
/// Without an id the database assigns the next key; with one, the row is
/// overwritten in place, created if no such row exists yet.
pub async fn save(
    db: &DatabaseConnection,
    id: Option<i64>,
    nome: &str,
    preco: f64,
    quantidade: i32,
    entrega: bool,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: id.map_or(NotSet, Set),
        nome: Set(nome.to_string()),
        preco: Set(preco),
        quantidade: Set(quantidade),
        entrega: Set(entrega),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Nome, Column::Preco, Column::Quantidade, Column::Entrega])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
