//! Create product_prices table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductPrices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductPrices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductPrices::HtsCode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductPrices::FetchDate).date().not_null())
                    .col(ColumnDef::new(ProductPrices::GeneralRate).string())
                    .col(ColumnDef::new(ProductPrices::SpecialRate).string())
                    .col(ColumnDef::new(ProductPrices::Description).text())
                    .col(ColumnDef::new(ProductPrices::Category).string())
                    .to_owned(),
            )
            .await?;

        // One snapshot per code per date
        manager
            .create_index(
                Index::create()
                    .name("idx_product_prices_code_date")
                    .table(ProductPrices::Table)
                    .col(ProductPrices::HtsCode)
                    .col(ProductPrices::FetchDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_prices_category")
                    .table(ProductPrices::Table)
                    .col(ProductPrices::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductPrices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProductPrices {
    Table,
    Id,
    HtsCode,
    FetchDate,
    GeneralRate,
    SpecialRate,
    Description,
    Category,
}
