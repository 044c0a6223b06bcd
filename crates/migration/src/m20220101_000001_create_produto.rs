//! Create `produto` table.
//! One row per product; the key is assigned by the database on insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produto::Table)
                    .if_not_exists()
                    .col(big_integer(Produto::Id).auto_increment().primary_key())
                    .col(string_len(Produto::Nome, 256).not_null())
                    .col(double(Produto::Preco).not_null())
                    .col(integer(Produto::Quantidade).not_null())
                    .col(boolean(Produto::Entrega).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Produto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Produto {
    Table,
    Id,
    Nome,
    Preco,
    Quantidade,
    Entrega,
}
