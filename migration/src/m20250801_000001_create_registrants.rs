use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create registrants table keyed by normalized email
        manager
            .create_table(
                Table::create()
                    .table(Registrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrants::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Registrants::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Registrants::FullName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrants::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrants::Interests)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrants::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrants::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_registrants_email")
                    .table(Registrants::Table)
                    .col(Registrants::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registrants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Registrants {
    Table,
    Id,
    Email,
    FullName,
    PhoneNumber,
    Interests,
    CreatedAt,
    UpdatedAt,
}
