use sea_orm_migration::prelude::*;

/// Creates the `roundsize` table with the player capacity bounds shared by rounds.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Roundsize {
    Table,
    Id,
    Min,
    Max,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roundsize::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roundsize::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roundsize::Min).integer().not_null())
                    .col(ColumnDef::new(Roundsize::Max).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roundsize::Table).to_owned())
            .await
    }
}
