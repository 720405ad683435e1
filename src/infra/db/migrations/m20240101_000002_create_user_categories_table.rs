//! Migration: Create the user_categories reference table and seed it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserCategories {
    Table,
    Alias,
    Title,
}

/// Seed rows for the account-type selection list.
const SEED: [(&str, &str); 3] = [
    ("student", "Student"),
    ("employee", "Medewerker"),
    ("admin", "Beheerder"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCategories::Alias)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserCategories::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (alias, title) in SEED {
            let insert = Query::insert()
                .into_table(UserCategories::Table)
                .columns([UserCategories::Alias, UserCategories::Title])
                .values_panic([alias.into(), title.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCategories::Table).to_owned())
            .await
    }
}
