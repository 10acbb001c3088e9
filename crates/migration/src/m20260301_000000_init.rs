//! Initial schema migration.
//!
//! Creates one flat table per entity:
//!
//! - `currencies`: ISO code, display name and optional symbol
//! - `journals`: accounting journals with their creation instant
//! - `vat_rates`: VAT percentages, stored as decimal strings

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Currencies {
    Table,
    Id,
    Code,
    Name,
    Symbol,
}

#[derive(Iden)]
enum Journals {
    Table,
    Id,
    Code,
    Name,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum VatRates {
    Table,
    Id,
    Code,
    Percentage,
    Description,
    ValidFrom,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Currencies::Code).string().not_null())
                    .col(ColumnDef::new(Currencies::Name).string().not_null())
                    .col(ColumnDef::new(Currencies::Symbol).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Journals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Journals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Journals::Code).string().not_null())
                    .col(ColumnDef::new(Journals::Name).string().not_null())
                    .col(ColumnDef::new(Journals::Description).string())
                    .col(
                        ColumnDef::new(Journals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VatRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VatRates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VatRates::Code).string().not_null())
                    .col(ColumnDef::new(VatRates::Percentage).string().not_null())
                    .col(ColumnDef::new(VatRates::Description).string())
                    .col(ColumnDef::new(VatRates::ValidFrom).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VatRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Journals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        Ok(())
    }
}
