use sea_orm_migration::prelude::*;

/// Creates the `roundentry` membership table.
///
/// The unique index on `(user_id, round_id)` is what makes joining a round idempotent.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Roundentry {
    Table,
    Id,
    UserId,
    RoundId,
    Authtoken,
    Roundticket,
    Watchtoken,
    Aeskey,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Round {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roundentry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roundentry::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roundentry::UserId).integer().not_null())
                    .col(ColumnDef::new(Roundentry::RoundId).integer().not_null())
                    .col(
                        ColumnDef::new(Roundentry::Authtoken)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Roundentry::Roundticket)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Roundentry::Watchtoken)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Roundentry::Aeskey).binary().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roundentry_user_id")
                            .from(Roundentry::Table, Roundentry::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roundentry_round_id")
                            .from(Roundentry::Table, Roundentry::RoundId)
                            .to(Round::Table, Round::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_roundentry_user_round")
                    .table(Roundentry::Table)
                    .col(Roundentry::UserId)
                    .col(Roundentry::RoundId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_roundentry_round_id")
                    .table(Roundentry::Table)
                    .col(Roundentry::RoundId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roundentry::Table).to_owned())
            .await
    }
}
