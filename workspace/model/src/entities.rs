//! Root for all SeaORM entity modules of the restaurant back-office domain:
//! staff identity on one side, the operational graph (restaurant -> tables /
//! menu -> orders -> tickets / payments) on the other.

pub mod account;
pub mod inventory_item;
pub mod kitchen_ticket;
pub mod location;
pub mod menu_item;
pub mod menu_variant;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod profile;
pub mod qr_token;
pub mod restaurant;
pub mod sales_record;
pub mod screen_display;
pub mod table;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::inventory_item::Entity as InventoryItem;
    pub use super::kitchen_ticket::Entity as KitchenTicket;
    pub use super::location::Entity as Location;
    pub use super::menu_item::Entity as MenuItem;
    pub use super::menu_variant::Entity as MenuVariant;
    pub use super::order::Entity as Order;
    pub use super::order_item::Entity as OrderItem;
    pub use super::payment::Entity as Payment;
    pub use super::profile::Entity as Profile;
    pub use super::qr_token::Entity as QrToken;
    pub use super::restaurant::Entity as Restaurant;
    pub use super::sales_record::Entity as SalesRecord;
    pub use super::screen_display::Entity as ScreenDisplay;
    pub use super::table::Entity as Table;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };
    use uuid::Uuid;

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    async fn seed_restaurant(db: &DatabaseConnection) -> Result<restaurant::Model, DbErr> {
        let location = location::ActiveModel {
            address: Set("12 Ladder Street, Sheung Wan".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        restaurant::ActiveModel {
            name: Set("Harbour Kitchen".to_string()),
            location_id: Set(Some(location.id)),
            address: Set(Some("12 Ladder Street".to_string())),
            phone_number: Set(Some("+852 2544 0000".to_string())),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        // Staff side: account plus its one-to-one profile.
        let manager = account::ActiveModel {
            username: Set("amara".to_string()),
            email: Set("amara@harbour.example".to_string()),
            first_name: Set(Some("Amara".to_string())),
            last_name: Set(None),
            role: Set(account::Role::Manager),
            is_elevated: Set(true),
            is_superuser: Set(false),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let profile = profile::ActiveModel {
            account_id: Set(manager.id),
            display_name: Set("Amara".to_string()),
            email: Set(Some("amara@harbour.example".to_string())),
            role: Set(account::Role::Manager),
            shift_start: Set(None),
            shift_end: Set(None),
            attendance_date: Set(None),
            attendance_status: Set(profile::AttendanceStatus::Absent),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Operational side: restaurant -> table / menu -> order graph.
        let restaurant = seed_restaurant(&db).await?;

        let table = table::ActiveModel {
            restaurant_id: Set(restaurant.id),
            table_number: Set(1),
            capacity: Set(4),
            status: Set(table::TableStatus::Free),
            coordinates: Set(Some(serde_json::json!({"x": 10, "y": 20}))),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let burger = menu_item::ActiveModel {
            restaurant_id: Set(restaurant.id),
            name: Set("Burger".to_string()),
            description: Set(Some("A delicious beef burger.".to_string())),
            category: Set(menu_item::Category::Main),
            base_price: Set(Decimal::new(999, 2)),
            is_active: Set(true),
            prep_minutes: Set(12),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let large = menu_variant::ActiveModel {
            menu_item_id: Set(burger.id),
            name: Set("Large".to_string()),
            price_modifier: Set(Decimal::new(150, 2)),
            stock: Set(100),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        let order = order::ActiveModel {
            table_id: Set(table.id),
            status: Set(order::OrderStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let line = order_item::ActiveModel {
            order_id: Set(order.id),
            menu_item_id: Set(burger.id),
            variant_id: Set(Some(large.id)),
            quantity: Set(2),
            notes: Set(Some("no onions".to_string())),
            status: Set(order_item::OrderItemStatus::Pending),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let ticket = kitchen_ticket::ActiveModel {
            order_item_id: Set(line.id),
            station: Set("Grill".to_string()),
            status: Set(kitchen_ticket::TicketStatus::Pending),
            priority: Set(1),
            created_at: Set(now),
            due_at: Set(now + chrono::Duration::minutes(12)),
            completed_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let payment = payment::ActiveModel {
            order_id: Set(order.id),
            amount: Set(Decimal::new(2298, 2)),
            method: Set(payment::PaymentMethod::Card),
            status: Set(payment::PaymentStatus::Pending),
            gateway_ref: Set(None),
            created_at: Set(now),
            paid_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let qr = qr_token::ActiveModel {
            token: Set(Uuid::new_v4()),
            table_id: Set(Some(table.id)),
            order_id: Set(Some(order.id)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let _display = screen_display::ActiveModel {
            name: Set("Kitchen Screen 1".to_string()),
            content: Set(serde_json::json!({"view": "tickets"})),
            config: Set(serde_json::json!({"rotation": 0})),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let sales_day = NaiveDate::from_ymd_opt(2026, 7, 14).unwrap();
        let _sales = sales_record::ActiveModel {
            restaurant_id: Set(restaurant.id),
            date: Set(sales_day),
            month: Set(sales_record::month_label(sales_day)),
            amount: Set(Decimal::new(184250, 2)),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let _flour = inventory_item::ActiveModel {
            restaurant_id: Set(restaurant.id),
            name: Set("Flour".to_string()),
            quantity: Set(Decimal::new(12000, 3)),
            unit: Set("kg".to_string()),
            low_stock_threshold: Set(Decimal::new(5000, 3)),
            last_updated: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read the graph back through the Related implementations.
        let loaded_profile = manager
            .find_related(Profile)
            .one(&db)
            .await?
            .expect("profile should exist");
        assert_eq!(loaded_profile.id, profile.id);

        let tables = restaurant.find_related(Table).all(&db).await?;
        assert_eq!(tables.len(), 1);

        let lines = order.find_related(OrderItem).all(&db).await?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].variant_id, Some(large.id));

        let loaded_ticket = KitchenTicket::find()
            .filter(kitchen_ticket::Column::OrderItemId.eq(line.id))
            .one(&db)
            .await?
            .expect("ticket should exist");
        assert_eq!(loaded_ticket.id, ticket.id);
        assert_eq!(loaded_ticket.due_at - loaded_ticket.created_at, chrono::Duration::minutes(12));

        let payments = order.find_related(Payment).all(&db).await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, payment.id);

        let found_qr = QrToken::find()
            .filter(qr_token::Column::Token.eq(qr.token))
            .one(&db)
            .await?;
        assert!(found_qr.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_only_one_ticket_per_order_item() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let restaurant = seed_restaurant(&db).await?;

        let table = table::ActiveModel {
            restaurant_id: Set(restaurant.id),
            table_number: Set(3),
            capacity: Set(2),
            status: Set(table::TableStatus::Free),
            coordinates: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let soup = menu_item::ActiveModel {
            restaurant_id: Set(restaurant.id),
            name: Set("Soup".to_string()),
            description: Set(None),
            category: Set(menu_item::Category::Appetizer),
            base_price: Set(Decimal::new(450, 2)),
            is_active: Set(true),
            prep_minutes: Set(5),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        let order = order::ActiveModel {
            table_id: Set(table.id),
            status: Set(order::OrderStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let line = order_item::ActiveModel {
            order_id: Set(order.id),
            menu_item_id: Set(soup.id),
            variant_id: Set(None),
            quantity: Set(1),
            notes: Set(None),
            status: Set(order_item::OrderItemStatus::Pending),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        kitchen_ticket::ActiveModel {
            order_item_id: Set(line.id),
            station: Set("Soup".to_string()),
            status: Set(kitchen_ticket::TicketStatus::Pending),
            priority: Set(1),
            created_at: Set(now),
            due_at: Set(now + chrono::Duration::minutes(5)),
            completed_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The unique index on order_item_id must reject a second ticket.
        let duplicate = kitchen_ticket::ActiveModel {
            order_item_id: Set(line.id),
            station: Set("Soup".to_string()),
            status: Set(kitchen_ticket::TicketStatus::Pending),
            priority: Set(2),
            created_at: Set(now),
            due_at: Set(now + chrono::Duration::minutes(5)),
            completed_at: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(duplicate.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_restaurant_delete_cascades_to_tables_and_menu() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let restaurant = seed_restaurant(&db).await?;

        table::ActiveModel {
            restaurant_id: Set(restaurant.id),
            table_number: Set(1),
            capacity: Set(4),
            status: Set(table::TableStatus::Free),
            coordinates: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        menu_item::ActiveModel {
            restaurant_id: Set(restaurant.id),
            name: Set("Fries".to_string()),
            description: Set(None),
            category: Set(menu_item::Category::Side),
            base_price: Set(Decimal::new(399, 2)),
            is_active: Set(true),
            prep_minutes: Set(8),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        Restaurant::delete_by_id(restaurant.id).exec(&db).await?;

        assert_eq!(Table::find().all(&db).await?.len(), 0);
        assert_eq!(MenuItem::find().all(&db).await?.len(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_table_with_orders_cannot_be_deleted() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let restaurant = seed_restaurant(&db).await?;

        let table = table::ActiveModel {
            restaurant_id: Set(restaurant.id),
            table_number: Set(7),
            capacity: Set(6),
            status: Set(table::TableStatus::Occupied),
            coordinates: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        order::ActiveModel {
            table_id: Set(table.id),
            status: Set(order::OrderStatus::Open),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // The orders FK is RESTRICT; history protects the table row.
        let result = Table::delete_by_id(table.id).exec(&db).await;
        assert!(result.is_err());

        Ok(())
    }
}
