use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create accounts table
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(pk_auto(Accounts::Id))
                    .col(string(Accounts::Username).unique_key())
                    .col(string(Accounts::Email).unique_key())
                    .col(string_null(Accounts::FirstName))
                    .col(string_null(Accounts::LastName))
                    .col(string(Accounts::Role))
                    .col(boolean(Accounts::IsElevated).default(false))
                    .col(boolean(Accounts::IsSuperuser).default(false))
                    .col(boolean(Accounts::IsActive).default(true))
                    .to_owned(),
            )
            .await?;

        // Create profiles table (one per account)
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_auto(Profiles::Id))
                    .col(integer(Profiles::AccountId).unique_key())
                    .col(string(Profiles::DisplayName))
                    .col(string_null(Profiles::Email))
                    .col(string(Profiles::Role))
                    .col(time_null(Profiles::ShiftStart))
                    .col(time_null(Profiles::ShiftEnd))
                    .col(date_null(Profiles::AttendanceDate))
                    .col(string(Profiles::AttendanceStatus))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_account")
                            .from(Profiles::Table, Profiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create locations table
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(pk_auto(Locations::Id))
                    .col(string(Locations::Address))
                    .to_owned(),
            )
            .await?;

        // Create restaurants table
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(pk_auto(Restaurants::Id))
                    .col(string(Restaurants::Name))
                    .col(integer_null(Restaurants::LocationId))
                    .col(string_null(Restaurants::Address))
                    .col(string_null(Restaurants::PhoneNumber))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_restaurant_location")
                            .from(Restaurants::Table, Restaurants::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create tables table
        manager
            .create_table(
                Table::create()
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(pk_auto(Tables::Id))
                    .col(integer(Tables::RestaurantId))
                    .col(integer(Tables::TableNumber))
                    .col(integer(Tables::Capacity))
                    .col(string(Tables::Status))
                    .col(json_null(Tables::Coordinates))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_table_restaurant")
                            .from(Tables::Table, Tables::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Table numbers are unique within a restaurant
        manager
            .create_index(
                Index::create()
                    .name("uq_table_number_per_restaurant")
                    .table(Tables::Table)
                    .col(Tables::RestaurantId)
                    .col(Tables::TableNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create menu_items table
        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(pk_auto(MenuItems::Id))
                    .col(integer(MenuItems::RestaurantId))
                    .col(string(MenuItems::Name))
                    .col(string_null(MenuItems::Description))
                    .col(string(MenuItems::Category))
                    .col(decimal(MenuItems::BasePrice))
                    .col(boolean(MenuItems::IsActive).default(true))
                    .col(integer(MenuItems::PrepMinutes).default(10))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_item_restaurant")
                            .from(MenuItems::Table, MenuItems::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_menu_item_name_per_restaurant")
                    .table(MenuItems::Table)
                    .col(MenuItems::RestaurantId)
                    .col(MenuItems::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create menu_variants table
        manager
            .create_table(
                Table::create()
                    .table(MenuVariants::Table)
                    .if_not_exists()
                    .col(pk_auto(MenuVariants::Id))
                    .col(integer(MenuVariants::MenuItemId))
                    .col(string(MenuVariants::Name))
                    .col(decimal(MenuVariants::PriceModifier).default(0))
                    .col(integer(MenuVariants::Stock).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_variant_item")
                            .from(MenuVariants::Table, MenuVariants::MenuItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create orders table. The table FK is RESTRICT: order history blocks
        // table deletion rather than disappearing with it.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(integer(Orders::TableId))
                    .col(string(Orders::Status))
                    .col(timestamp_with_time_zone(Orders::CreatedAt))
                    .col(timestamp_with_time_zone(Orders::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_table")
                            .from(Orders::Table, Orders::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create order_items table
        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderItems::Id))
                    .col(integer(OrderItems::OrderId))
                    .col(integer(OrderItems::MenuItemId))
                    .col(integer_null(OrderItems::VariantId))
                    .col(integer(OrderItems::Quantity).default(1))
                    .col(string_null(OrderItems::Notes))
                    .col(string(OrderItems::Status))
                    .col(timestamp_with_time_zone(OrderItems::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_menu_item")
                            .from(OrderItems::Table, OrderItems::MenuItemId)
                            .to(MenuItems::Table, MenuItems::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_item_variant")
                            .from(OrderItems::Table, OrderItems::VariantId)
                            .to(MenuVariants::Table, MenuVariants::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create kitchen_tickets table (one per order item)
        manager
            .create_table(
                Table::create()
                    .table(KitchenTickets::Table)
                    .if_not_exists()
                    .col(pk_auto(KitchenTickets::Id))
                    .col(integer(KitchenTickets::OrderItemId).unique_key())
                    .col(string(KitchenTickets::Station))
                    .col(string(KitchenTickets::Status))
                    .col(integer(KitchenTickets::Priority).default(1))
                    .col(timestamp_with_time_zone(KitchenTickets::CreatedAt))
                    .col(timestamp_with_time_zone(KitchenTickets::DueAt))
                    .col(timestamp_with_time_zone_null(KitchenTickets::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_kitchen_ticket_order_item")
                            .from(KitchenTickets::Table, KitchenTickets::OrderItemId)
                            .to(OrderItems::Table, OrderItems::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::OrderId))
                    .col(decimal(Payments::Amount))
                    .col(string(Payments::Method))
                    .col(string(Payments::Status))
                    .col(string_null(Payments::GatewayRef))
                    .col(timestamp_with_time_zone(Payments::CreatedAt))
                    .col(timestamp_with_time_zone_null(Payments::PaidAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_order")
                            .from(Payments::Table, Payments::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create qr_tokens table
        manager
            .create_table(
                Table::create()
                    .table(QrTokens::Table)
                    .if_not_exists()
                    .col(pk_auto(QrTokens::Id))
                    .col(uuid(QrTokens::Token).unique_key())
                    .col(integer_null(QrTokens::TableId))
                    .col(integer_null(QrTokens::OrderId))
                    .col(timestamp_with_time_zone(QrTokens::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_qr_token_table")
                            .from(QrTokens::Table, QrTokens::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_qr_token_order")
                            .from(QrTokens::Table, QrTokens::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create screen_displays table
        manager
            .create_table(
                Table::create()
                    .table(ScreenDisplays::Table)
                    .if_not_exists()
                    .col(pk_auto(ScreenDisplays::Id))
                    .col(string(ScreenDisplays::Name))
                    .col(json(ScreenDisplays::Content))
                    .col(json(ScreenDisplays::Config))
                    .to_owned(),
            )
            .await?;

        // Create inventory_items table
        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryItems::Id))
                    .col(integer(InventoryItems::RestaurantId))
                    .col(string(InventoryItems::Name))
                    .col(decimal(InventoryItems::Quantity))
                    .col(string(InventoryItems::Unit))
                    .col(decimal(InventoryItems::LowStockThreshold).default(0))
                    .col(timestamp_with_time_zone(InventoryItems::LastUpdated))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_item_restaurant")
                            .from(InventoryItems::Table, InventoryItems::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_inventory_item_name_per_restaurant")
                    .table(InventoryItems::Table)
                    .col(InventoryItems::RestaurantId)
                    .col(InventoryItems::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create sales_records table
        manager
            .create_table(
                Table::create()
                    .table(SalesRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(SalesRecords::Id))
                    .col(integer(SalesRecords::RestaurantId))
                    .col(date(SalesRecords::Date))
                    .col(string(SalesRecords::Month))
                    .col(decimal(SalesRecords::Amount))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_record_restaurant")
                            .from(SalesRecords::Table, SalesRecords::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_sales_per_day_per_restaurant")
                    .table(SalesRecords::Table)
                    .col(SalesRecords::RestaurantId)
                    .col(SalesRecords::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SalesRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScreenDisplays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QrTokens::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(KitchenTickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuVariants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    Role,
    IsElevated,
    IsSuperuser,
    IsActive,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    AccountId,
    DisplayName,
    Email,
    Role,
    ShiftStart,
    ShiftEnd,
    AttendanceDate,
    AttendanceStatus,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Address,
}

#[derive(DeriveIden)]
enum Restaurants {
    Table,
    Id,
    Name,
    LocationId,
    Address,
    PhoneNumber,
}

#[derive(DeriveIden)]
enum Tables {
    Table,
    Id,
    RestaurantId,
    TableNumber,
    Capacity,
    Status,
    Coordinates,
}

#[derive(DeriveIden)]
enum MenuItems {
    Table,
    Id,
    RestaurantId,
    Name,
    Description,
    Category,
    BasePrice,
    IsActive,
    PrepMinutes,
}

#[derive(DeriveIden)]
enum MenuVariants {
    Table,
    Id,
    MenuItemId,
    Name,
    PriceModifier,
    Stock,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    TableId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    MenuItemId,
    VariantId,
    Quantity,
    Notes,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum KitchenTickets {
    Table,
    Id,
    OrderItemId,
    Station,
    Status,
    Priority,
    CreatedAt,
    DueAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    OrderId,
    Amount,
    Method,
    Status,
    GatewayRef,
    CreatedAt,
    PaidAt,
}

#[derive(DeriveIden)]
enum QrTokens {
    Table,
    Id,
    Token,
    TableId,
    OrderId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScreenDisplays {
    Table,
    Id,
    Name,
    Content,
    Config,
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    RestaurantId,
    Name,
    Quantity,
    Unit,
    LowStockThreshold,
    LastUpdated,
}

#[derive(DeriveIden)]
enum SalesRecords {
    Table,
    Id,
    RestaurantId,
    Date,
    Month,
    Amount,
}
