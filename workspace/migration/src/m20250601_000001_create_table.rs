use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create shops table
        manager
            .create_table(
                Table::create()
                    .table(Shops::Table)
                    .if_not_exists()
                    .col(pk_auto(Shops::Id))
                    .col(string(Shops::Name))
                    .col(string(Shops::Address))
                    .col(string(Shops::Email))
                    .col(date_time(Shops::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string(Users::Email))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(boolean(Users::IsSuperuser).default(false))
                    .col(string_len(Users::Role, 20))
                    .col(integer_null(Users::ShopId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_shop")
                            .from(Users::Table, Users::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create frames table
        manager
            .create_table(
                Table::create()
                    .table(Frames::Table)
                    .if_not_exists()
                    .col(pk_auto(Frames::Id))
                    .col(string_len(Frames::ProductId, 50).unique_key())
                    .col(string(Frames::Name))
                    .col(string_len(Frames::FrameType, 50))
                    .col(string_len(Frames::Color, 50))
                    .col(string_len(Frames::Material, 50))
                    .col(decimal_len(Frames::Price, 10, 2))
                    .col(string_len(Frames::Brand, 100))
                    .to_owned(),
            )
            .await?;

        // Create lens_types table
        manager
            .create_table(
                Table::create()
                    .table(LensTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(LensTypes::Id))
                    .col(string_len(LensTypes::Name, 100).unique_key())
                    .col(string_null(LensTypes::Description))
                    .col(decimal_len(LensTypes::PriceModifier, 5, 2).default("0.00"))
                    .to_owned(),
            )
            .await?;

        // Create shop_inventories table
        manager
            .create_table(
                Table::create()
                    .table(ShopInventories::Table)
                    .if_not_exists()
                    .col(pk_auto(ShopInventories::Id))
                    .col(integer(ShopInventories::ShopId))
                    .col(integer(ShopInventories::FrameId))
                    .col(integer(ShopInventories::QuantityReceived).default(0))
                    .col(integer(ShopInventories::QuantitySold).default(0))
                    .col(decimal_len(ShopInventories::CostPerUnit, 10, 2))
                    .col(date_time(ShopInventories::LastRestocked))
                    .col(date_time(ShopInventories::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shop_inventory_shop")
                            .from(ShopInventories::Table, ShopInventories::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shop_inventory_frame")
                            .from(ShopInventories::Table, ShopInventories::FrameId)
                            .to(Frames::Table, Frames::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One stock position per (shop, frame) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_shop_inventory_shop_frame")
                    .table(ShopInventories::Table)
                    .col(ShopInventories::ShopId)
                    .col(ShopInventories::FrameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create inventory_transactions table
        manager
            .create_table(
                Table::create()
                    .table(InventoryTransactions::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryTransactions::Id))
                    .col(integer(InventoryTransactions::ShopInventoryId))
                    .col(string_len(InventoryTransactions::TransactionType, 20))
                    .col(integer(InventoryTransactions::Quantity))
                    .col(decimal_len_null(InventoryTransactions::UnitCost, 10, 2))
                    .col(decimal_len_null(InventoryTransactions::UnitPrice, 10, 2))
                    .col(string(InventoryTransactions::Notes).default(""))
                    .col(date_time(InventoryTransactions::CreatedAt))
                    .col(integer(InventoryTransactions::CreatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_transaction_inventory")
                            .from(
                                InventoryTransactions::Table,
                                InventoryTransactions::ShopInventoryId,
                            )
                            .to(ShopInventories::Table, ShopInventories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_transaction_user")
                            .from(
                                InventoryTransactions::Table,
                                InventoryTransactions::CreatedBy,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create shop_financial_summaries table
        manager
            .create_table(
                Table::create()
                    .table(ShopFinancialSummaries::Table)
                    .if_not_exists()
                    .col(pk_auto(ShopFinancialSummaries::Id))
                    .col(integer(ShopFinancialSummaries::ShopId))
                    .col(date(ShopFinancialSummaries::Month))
                    .col(decimal_len(ShopFinancialSummaries::TotalRevenue, 12, 2).default("0.00"))
                    .col(decimal_len(ShopFinancialSummaries::TotalCost, 12, 2).default("0.00"))
                    .col(decimal_len(ShopFinancialSummaries::TotalProfit, 12, 2).default("0.00"))
                    .col(
                        decimal_len(ShopFinancialSummaries::AmountToPayDistributor, 12, 2)
                            .default("0.00"),
                    )
                    .col(integer(ShopFinancialSummaries::UnitsSold).default(0))
                    .col(date_time(ShopFinancialSummaries::CreatedAt))
                    .col(date_time(ShopFinancialSummaries::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_summary_shop")
                            .from(
                                ShopFinancialSummaries::Table,
                                ShopFinancialSummaries::ShopId,
                            )
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One rollup row per (shop, month)
        manager
            .create_index(
                Index::create()
                    .name("idx_financial_summary_shop_month")
                    .table(ShopFinancialSummaries::Table)
                    .col(ShopFinancialSummaries::ShopId)
                    .col(ShopFinancialSummaries::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShopFinancialSummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShopInventories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LensTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Frames::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shops::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Shops {
    Table,
    Id,
    Name,
    Address,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Email,
    IsStaff,
    IsSuperuser,
    Role,
    ShopId,
}

#[derive(DeriveIden)]
enum Frames {
    Table,
    Id,
    ProductId,
    Name,
    FrameType,
    Color,
    Material,
    Price,
    Brand,
}

#[derive(DeriveIden)]
enum LensTypes {
    Table,
    Id,
    Name,
    Description,
    PriceModifier,
}

#[derive(DeriveIden)]
enum ShopInventories {
    Table,
    Id,
    ShopId,
    FrameId,
    QuantityReceived,
    QuantitySold,
    CostPerUnit,
    LastRestocked,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InventoryTransactions {
    Table,
    Id,
    ShopInventoryId,
    TransactionType,
    Quantity,
    UnitCost,
    UnitPrice,
    Notes,
    CreatedAt,
    CreatedBy,
}

#[derive(DeriveIden)]
enum ShopFinancialSummaries {
    Table,
    Id,
    ShopId,
    Month,
    TotalRevenue,
    TotalCost,
    TotalProfit,
    AmountToPayDistributor,
    UnitsSold,
    CreatedAt,
    UpdatedAt,
}
