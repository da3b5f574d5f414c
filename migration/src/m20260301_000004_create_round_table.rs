use sea_orm_migration::prelude::*;

/// Creates the `round` table.
///
/// `roundstatus_id` holds the numeric round status: 1 open, 2 closed, 3 running, 4 finished.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Round {
    Table,
    Id,
    Name,
    Wallpaper,
    RoundsizeId,
    Starttime,
    RoundstatusId,
}

#[derive(DeriveIden)]
enum Roundsize {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Round::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Round::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Round::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Round::Wallpaper)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Round::RoundsizeId).integer().not_null())
                    .col(
                        ColumnDef::new(Round::Starttime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Round::RoundstatusId)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_roundsize_id")
                            .from(Round::Table, Round::RoundsizeId)
                            .to(Roundsize::Table, Roundsize::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_round_status")
                    .table(Round::Table)
                    .col(Round::RoundstatusId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Round::Table).to_owned())
            .await
    }
}
